use super::{
    Activity, BranchCondition, BranchPoint, ChildWorkflowCall, Decision, ExternalSignalSend,
    Membership, NodeSeed, SignalWait, Step, TargetPattern, make_node_id,
};
use crate::error::ValidationError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Everything the detector found in one workflow function, ordered by source line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkflowMetadata {
    pub workflow_name: String,
    /// Activities, child workflow calls and external signal sends.
    pub steps: Vec<Step>,
    /// Decisions and signal waits. This is also the enumeration order.
    pub branch_points: Vec<BranchPoint>,
}

impl WorkflowMetadata {
    /// Creates metadata from already-identified parts, sorting both lists by source line.
    pub fn new(
        workflow_name: impl Into<String>,
        mut steps: Vec<Step>,
        mut branch_points: Vec<BranchPoint>,
    ) -> Self {
        steps.sort_by_key(|s| s.source_line());
        branch_points.sort_by_key(|b| b.source_line());
        Self {
            workflow_name: workflow_name.into(),
            steps,
            branch_points,
        }
    }

    pub fn builder(workflow_name: impl Into<String>) -> MetadataBuilder {
        MetadataBuilder::new(workflow_name)
    }

    pub fn total_branch_points(&self) -> usize {
        self.branch_points.len()
    }

    /// `2^total_branch_points`, saturating at `u64::MAX`.
    pub fn total_paths(&self) -> u64 {
        path_count(self.total_branch_points())
    }

    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.steps.iter().filter_map(|s| match s {
            Step::Activity(a) => Some(a),
            _ => None,
        })
    }

    pub fn child_workflows(&self) -> impl Iterator<Item = &ChildWorkflowCall> {
        self.steps.iter().filter_map(|s| match s {
            Step::ChildWorkflow(c) => Some(c),
            _ => None,
        })
    }

    pub fn external_signals(&self) -> impl Iterator<Item = &ExternalSignalSend> {
        self.steps.iter().filter_map(|s| match s {
            Step::ExternalSignal(e) => Some(e),
            _ => None,
        })
    }

    pub fn decisions(&self) -> impl Iterator<Item = &Decision> {
        self.branch_points.iter().filter_map(|b| match b {
            BranchPoint::Decision(d) => Some(d),
            _ => None,
        })
    }

    pub fn signal_waits(&self) -> impl Iterator<Item = &SignalWait> {
        self.branch_points.iter().filter_map(|b| match b {
            BranchPoint::SignalWait(s) => Some(s),
            _ => None,
        })
    }

    pub fn branch_point(&self, node_id: &str) -> Option<&BranchPoint> {
        self.branch_points.iter().find(|b| b.node_id() == node_id)
    }

    /// `membership` with the conditions of every branch point it depends on
    /// added, transitively. A step under a nested decision is then only
    /// reachable when the enclosing branches are taken as well.
    ///
    /// `Unknown` stays `Unknown`.
    pub fn effective_membership(&self, membership: &Membership) -> Membership {
        match membership {
            Membership::Unknown => Membership::Unknown,
            Membership::Known(_) => Membership::Known(self.condition_closure(membership)),
        }
    }

    /// Breadth-first over branch point memberships. Terminates on cycles.
    fn condition_closure(&self, membership: &Membership) -> Vec<BranchCondition> {
        let mut queue: Vec<&BranchCondition> = membership.conditions().iter().collect();
        let mut expanded: AHashSet<&str> = AHashSet::new();
        let mut closure: Vec<BranchCondition> = Vec::new();
        let mut i = 0;
        while i < queue.len() {
            let condition = queue[i];
            i += 1;
            if !closure.contains(condition) {
                closure.push(condition.clone());
            }
            if expanded.insert(condition.branch_id.as_str()) {
                if let Some(parent) = self.branch_point(&condition.branch_id) {
                    queue.extend(parent.membership().conditions());
                }
            }
        }
        closure
    }

    /// Checks names, id uniqueness and that every condition points at a known branch point.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.workflow_name.trim().is_empty() {
            return Err(ValidationError::new(
                "workflow_name",
                "must not be empty",
                "pass the name of the workflow class or function",
            ));
        }

        let branch_ids: AHashSet<&str> = self.branch_points.iter().map(|b| b.node_id()).collect();
        let mut seen: AHashSet<&str> = AHashSet::new();

        for (i, branch) in self.branch_points.iter().enumerate() {
            let field = format!("branch_points[{}]", i);
            check_entry(&field, branch.name(), branch.node_id(), &mut seen)?;
            check_membership(&field, branch.membership(), &branch_ids, Some(branch.node_id()))?;
        }
        for (i, step) in self.steps.iter().enumerate() {
            let field = format!("steps[{}]", i);
            check_entry(&field, step.display_name(), step.node_id(), &mut seen)?;
            check_membership(&field, step.membership(), &branch_ids, None)?;
        }
        for (i, branch) in self.branch_points.iter().enumerate() {
            let depends_on_itself = self
                .condition_closure(branch.membership())
                .iter()
                .any(|c| c.branch_id == branch.node_id());
            if depends_on_itself {
                return Err(ValidationError::new(
                    format!("branch_points[{}].membership", i),
                    format!("branch point '{}' depends on itself", branch.node_id()),
                    "nested branch points may only depend on enclosing ones",
                ));
            }
        }
        Ok(())
    }
}

pub(crate) fn path_count(branch_points: usize) -> u64 {
    u32::try_from(branch_points)
        .ok()
        .and_then(|n| 2u64.checked_pow(n))
        .unwrap_or(u64::MAX)
}

fn check_entry<'a>(
    field: &str,
    name: &str,
    node_id: &'a str,
    seen: &mut AHashSet<&'a str>,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new(
            format!("{}.name", field),
            "must not be empty",
            "give every detected call a display name",
        ));
    }
    if node_id.is_empty() {
        return Err(ValidationError::new(
            format!("{}.node_id", field),
            "must not be empty",
            "derive ids with make_node_id or use MetadataBuilder",
        ));
    }
    if !seen.insert(node_id) {
        return Err(ValidationError::new(
            format!("{}.node_id", field),
            format!("duplicate node id '{}'", node_id),
            "ensure (kind, name, line) is unique per workflow",
        ));
    }
    Ok(())
}

fn check_membership(
    field: &str,
    membership: &Membership,
    branch_ids: &AHashSet<&str>,
    own_id: Option<&str>,
) -> Result<(), ValidationError> {
    for condition in membership.conditions() {
        if !branch_ids.contains(condition.branch_id.as_str()) {
            return Err(ValidationError::new(
                format!("{}.membership", field),
                format!("refers to unknown branch point '{}'", condition.branch_id),
                "reference the node id of a decision or signal wait in this workflow",
            ));
        }
        if own_id == Some(condition.branch_id.as_str()) {
            return Err(ValidationError::new(
                format!("{}.membership", field),
                format!("branch point '{}' is conditional on itself", condition.branch_id),
                "remove the self-reference from the branch point's conditions",
            ));
        }
    }
    Ok(())
}

/// Opaque reference to a branch point registered on a [`MetadataBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchHandle(usize);

/// Builder-side membership, expressed against [`BranchHandle`]s because node
/// ids are only assigned in [`MetadataBuilder::finish`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Guard {
    #[default]
    Always,
    When(Vec<(BranchHandle, bool)>),
    Unknown,
}

impl Guard {
    pub fn when(branch: BranchHandle, value: bool) -> Self {
        Guard::When(vec![(branch, value)])
    }

    /// Adds another condition. `Unknown` stays unknown.
    pub fn and(self, branch: BranchHandle, value: bool) -> Self {
        match self {
            Guard::Always => Guard::when(branch, value),
            Guard::When(mut conditions) => {
                conditions.push((branch, value));
                Guard::When(conditions)
            }
            Guard::Unknown => Guard::Unknown,
        }
    }
}

enum PendingStep {
    Activity { name: String },
    ChildWorkflow { name: String },
    ExternalSignal { name: String, target: TargetPattern },
}

enum PendingBranch {
    Decision {
        name: String,
    },
    SignalWait {
        name: String,
        condition_expr: String,
        timeout_expr: String,
        labels: Option<(String, String)>,
    },
}

/// Single-use collector for detected calls.
///
/// Calls may be registered in any order; [`finish`](Self::finish) sorts them by
/// source line, assigns node ids and resolves guards into [`Membership`]s.
pub struct MetadataBuilder {
    workflow_name: String,
    steps: Vec<(PendingStep, u32, Guard)>,
    branches: Vec<(PendingBranch, u32, Guard)>,
}

impl MetadataBuilder {
    pub fn new(workflow_name: impl Into<String>) -> Self {
        Self {
            workflow_name: workflow_name.into(),
            steps: Vec::new(),
            branches: Vec::new(),
        }
    }

    pub fn activity(&mut self, name: impl Into<String>, line: u32, guard: Guard) -> &mut Self {
        self.steps.push((PendingStep::Activity { name: name.into() }, line, guard));
        self
    }

    pub fn child_workflow(
        &mut self,
        name: impl Into<String>,
        line: u32,
        guard: Guard,
    ) -> &mut Self {
        self.steps
            .push((PendingStep::ChildWorkflow { name: name.into() }, line, guard));
        self
    }

    pub fn external_signal(
        &mut self,
        signal_name: impl Into<String>,
        target: TargetPattern,
        line: u32,
        guard: Guard,
    ) -> &mut Self {
        self.steps.push((
            PendingStep::ExternalSignal {
                name: signal_name.into(),
                target,
            },
            line,
            guard,
        ));
        self
    }

    pub fn decision(&mut self, name: impl Into<String>, line: u32, guard: Guard) -> BranchHandle {
        self.branches
            .push((PendingBranch::Decision { name: name.into() }, line, guard));
        BranchHandle(self.branches.len() - 1)
    }

    pub fn signal_wait(
        &mut self,
        name: impl Into<String>,
        line: u32,
        condition_expr: impl Into<String>,
        timeout_expr: impl Into<String>,
        guard: Guard,
    ) -> BranchHandle {
        self.branches.push((
            PendingBranch::SignalWait {
                name: name.into(),
                condition_expr: condition_expr.into(),
                timeout_expr: timeout_expr.into(),
                labels: None,
            },
            line,
            guard,
        ));
        BranchHandle(self.branches.len() - 1)
    }

    /// Overrides the edge labels of a signal wait. Ignored for decisions.
    pub fn branch_labels(
        &mut self,
        branch: BranchHandle,
        true_label: impl Into<String>,
        false_label: impl Into<String>,
    ) -> &mut Self {
        if let Some((PendingBranch::SignalWait { labels, .. }, _, _)) =
            self.branches.get_mut(branch.0)
        {
            *labels = Some((true_label.into(), false_label.into()));
        }
        self
    }

    /// Consumes the builder and produces validated metadata.
    pub fn finish(self) -> Result<WorkflowMetadata, ValidationError> {
        let mut branch_order: Vec<usize> = (0..self.branches.len()).collect();
        branch_order.sort_by_key(|&i| self.branches[i].1);

        let mut branch_ids: AHashMap<usize, String> = AHashMap::new();
        let mut next_decision = 0;
        for &i in &branch_order {
            let (pending, line, _) = &self.branches[i];
            let id = match pending {
                PendingBranch::Decision { .. } => {
                    let id = make_node_id(NodeSeed::Decision {
                        ordinal: next_decision,
                    });
                    next_decision += 1;
                    id
                }
                PendingBranch::SignalWait { name, .. } => {
                    make_node_id(NodeSeed::SignalWait { name, line: *line })
                }
            };
            branch_ids.insert(i, id);
        }

        let resolve = |guard: Guard, line: u32| -> Result<Membership, ValidationError> {
            match guard {
                Guard::Always => Ok(Membership::unconditional()),
                Guard::Unknown => Ok(Membership::Unknown),
                Guard::When(conditions) => conditions
                    .into_iter()
                    .map(|(handle, value)| {
                        branch_ids
                            .get(&handle.0)
                            .map(|id| BranchCondition::new(id.clone(), value))
                            .ok_or_else(|| {
                                ValidationError::new(
                                    format!("line {}.guard", line),
                                    "refers to a branch handle from another builder",
                                    "only use handles returned by this builder",
                                )
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Membership::Known),
            }
        };

        let mut branches: Vec<Option<(PendingBranch, u32, Guard)>> =
            self.branches.into_iter().map(Some).collect();
        let mut branch_points = Vec::with_capacity(branches.len());
        for i in branch_order {
            let Some((pending, line, guard)) = branches[i].take() else {
                continue;
            };
            let node_id = branch_ids.get(&i).cloned().unwrap_or_default();
            let membership = resolve(guard, line)?;
            branch_points.push(match pending {
                PendingBranch::Decision { name } => BranchPoint::Decision(Decision {
                    name,
                    node_id,
                    line,
                    membership,
                }),
                PendingBranch::SignalWait {
                    name,
                    condition_expr,
                    timeout_expr,
                    labels,
                } => {
                    let (true_label, false_label) = labels.unzip();
                    BranchPoint::SignalWait(SignalWait {
                        name,
                        node_id,
                        line,
                        condition_expr,
                        timeout_expr,
                        true_label,
                        false_label,
                        membership,
                    })
                }
            });
        }

        let mut pending_steps = self.steps;
        pending_steps.sort_by_key(|(_, line, _)| *line);
        let mut steps = Vec::with_capacity(pending_steps.len());
        let mut next_activity = 1;
        for (pending, line, guard) in pending_steps {
            let membership = resolve(guard, line)?;
            steps.push(match pending {
                PendingStep::Activity { name } => {
                    let node_id = make_node_id(NodeSeed::Activity {
                        ordinal: next_activity,
                    });
                    next_activity += 1;
                    Step::Activity(Activity {
                        name,
                        node_id,
                        line,
                        membership,
                    })
                }
                PendingStep::ChildWorkflow { name } => {
                    let node_id = make_node_id(NodeSeed::ChildWorkflow { name: &name, line });
                    Step::ChildWorkflow(ChildWorkflowCall {
                        workflow_name: name,
                        node_id,
                        line,
                        membership,
                    })
                }
                PendingStep::ExternalSignal { name, target } => {
                    let node_id = make_node_id(NodeSeed::ExternalSignal { name: &name, line });
                    Step::ExternalSignal(ExternalSignalSend {
                        signal_name: name,
                        target,
                        node_id,
                        line,
                        membership,
                    })
                }
            });
        }

        let metadata = WorkflowMetadata {
            workflow_name: self.workflow_name,
            steps,
            branch_points,
        };
        metadata.validate()?;
        Ok(metadata)
    }
}
