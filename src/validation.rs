//! Non-fatal findings about a workflow. They never change the generated graph.

use crate::model::{Membership, Step, WorkflowMetadata};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The detector could not tell which branch the call belongs to; it was placed on every path.
    UnknownMembership { node_id: String, line: u32 },
    /// The call requires a branch point to be both true and false, directly or
    /// through the branch points enclosing it.
    UnreachableStep {
        node_id: String,
        name: String,
        line: u32,
    },
    DynamicSignalTarget { signal_name: String, line: u32 },
    NoActivities { workflow: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownMembership { node_id, line } => write!(
                f,
                "line {}: branch of '{}' could not be determined, shown on every path",
                line, node_id
            ),
            Warning::UnreachableStep {
                node_id,
                name,
                line,
            } => write!(
                f,
                "line {}: '{}' ({}) is never reachable, its branch conditions contradict each other",
                line, name, node_id
            ),
            Warning::DynamicSignalTarget { signal_name, line } => write!(
                f,
                "line {}: target of signal '{}' is only known at runtime",
                line, signal_name
            ),
            Warning::NoActivities { workflow } => {
                write!(f, "workflow '{}' has no activities", workflow)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    warnings: Vec<Warning>,
}

impl ValidationReport {
    pub fn for_metadata(metadata: &WorkflowMetadata) -> Self {
        let mut warnings = Vec::new();

        let entries = metadata
            .branch_points
            .iter()
            .map(|b| (b.node_id(), b.name(), b.source_line(), b.membership()))
            .chain(
                metadata
                    .steps
                    .iter()
                    .map(|s| (s.node_id(), s.display_name(), s.source_line(), s.membership())),
            );
        for (node_id, name, line, membership) in entries {
            if let Membership::Unknown = membership {
                warnings.push(Warning::UnknownMembership {
                    node_id: node_id.to_string(),
                    line,
                });
            } else if metadata.effective_membership(membership).is_contradictory() {
                warnings.push(Warning::UnreachableStep {
                    node_id: node_id.to_string(),
                    name: name.to_string(),
                    line,
                });
            }
        }

        for step in &metadata.steps {
            if let Step::ExternalSignal(signal) = step {
                if signal.target.is_dynamic() {
                    warnings.push(Warning::DynamicSignalTarget {
                        signal_name: signal.signal_name.clone(),
                        line: signal.line,
                    });
                }
            }
        }

        if metadata.activities().next().is_none() {
            warnings.push(Warning::NoActivities {
                workflow: metadata.workflow_name.clone(),
            });
        }

        warnings.sort_by_key(|w| match w {
            Warning::UnknownMembership { line, .. }
            | Warning::UnreachableStep { line, .. }
            | Warning::DynamicSignalTarget { line, .. } => *line,
            Warning::NoActivities { .. } => u32::MAX,
        });
        Self { warnings }
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.warnings.is_empty() {
            return writeln!(f, "Validation: no issues found");
        }
        writeln!(f, "Validation: {} warning(s)", self.warnings.len())?;
        for warning in &self.warnings {
            writeln!(f, "  - {}", warning)?;
        }
        Ok(())
    }
}
