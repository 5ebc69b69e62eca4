//! The seam to the source-scanning collaborator.
//!
//! Whatever walks the syntax tree of a workflow implements [`IntoMetadata`].
//! [`WorkflowSource`] is a ready-made implementation for detectors that emit
//! their findings as JSON:
//!
//! ```json
//! {
//!   "workflow": "MoneyTransfer",
//!   "calls": [
//!     { "kind": "activity", "name": "withdrawFunds", "line": 12 },
//!     { "kind": "decision", "name": "NeedToConvert", "line": 14 },
//!     { "kind": "activity", "name": "currencyConvert", "line": 15,
//!       "when": [{ "branch": "NeedToConvert", "value": true }] },
//!     { "kind": "external_signal", "name": "ship_order", "line": 20,
//!       "target": "shipping-{*}" }
//!   ]
//! }
//! ```

use crate::error::ParseError;
use crate::model::{BranchHandle, Guard, MetadataBuilder, TargetPattern, WorkflowMetadata};
use serde::Deserialize;

/// Converts a detector's findings into [`WorkflowMetadata`].
pub trait IntoMetadata {
    fn into_metadata(self) -> Result<WorkflowMetadata, ParseError>;
}

impl IntoMetadata for WorkflowMetadata {
    fn into_metadata(self) -> Result<WorkflowMetadata, ParseError> {
        self.validate()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    Activity,
    Decision,
    SignalWait,
    ChildWorkflow,
    ExternalSignal,
}

/// Reference to an enclosing branch point, by name or `name@line`.
#[derive(Debug, Clone, Deserialize)]
pub struct WhenClause {
    pub branch: String,
    pub value: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectedCall {
    pub kind: CallKind,
    pub line: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub when: Vec<WhenClause>,
    /// Set when the detector could not establish which branch the call is in.
    #[serde(default)]
    pub membership_unknown: bool,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub timeout: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub true_label: Option<String>,
    #[serde(default)]
    pub false_label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowSource {
    pub workflow: String,
    pub calls: Vec<DetectedCall>,
}

impl WorkflowSource {
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(|e| ParseError::InvalidDocument(e.to_string()))
    }
}

struct Declared {
    name: String,
    line: u32,
    handle: BranchHandle,
}

impl IntoMetadata for WorkflowSource {
    fn into_metadata(self) -> Result<WorkflowMetadata, ParseError> {
        let mut builder = MetadataBuilder::new(self.workflow);
        let mut declared: Vec<Declared> = Vec::new();

        let mut calls = self.calls;
        calls.sort_by_key(|c| c.line);

        for call in calls {
            let name = require(call.name.as_deref(), &call, "name")?.to_string();
            let guard = resolve_guard(&call, &declared)?;

            match call.kind {
                CallKind::Activity => {
                    builder.activity(name, call.line, guard);
                }
                CallKind::ChildWorkflow => {
                    builder.child_workflow(name, call.line, guard);
                }
                CallKind::ExternalSignal => {
                    let target = TargetPattern::classify(call.target.as_deref());
                    builder.external_signal(name, target, call.line, guard);
                }
                CallKind::Decision => {
                    let handle = builder.decision(name.clone(), call.line, guard);
                    declared.push(Declared {
                        name,
                        line: call.line,
                        handle,
                    });
                }
                CallKind::SignalWait => {
                    let condition = require(call.condition.as_deref(), &call, "condition")?;
                    let timeout = require(call.timeout.as_deref(), &call, "timeout")?;
                    let handle =
                        builder.signal_wait(name.clone(), call.line, condition, timeout, guard);
                    if let (Some(t), Some(f)) = (&call.true_label, &call.false_label) {
                        builder.branch_labels(handle, t.clone(), f.clone());
                    }
                    declared.push(Declared {
                        name,
                        line: call.line,
                        handle,
                    });
                }
            }
        }

        Ok(builder.finish()?)
    }
}

fn require<'c>(
    value: Option<&'c str>,
    call: &DetectedCall,
    argument: &str,
) -> Result<&'c str, ParseError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ParseError::MissingArgument {
            line: call.line,
            call: call_name(call),
            argument: argument.to_string(),
        })
}

fn call_name(call: &DetectedCall) -> String {
    match call.kind {
        CallKind::Activity => "execute_activity",
        CallKind::Decision => "to_decision",
        CallKind::SignalWait => "wait_condition",
        CallKind::ChildWorkflow => "execute_child_workflow",
        CallKind::ExternalSignal => "signal",
    }
    .to_string()
}

/// Conditions may only reference branch points declared up to the call's line. A bare name
/// resolves to the closest earlier branch point with that name.
fn resolve_guard(call: &DetectedCall, declared: &[Declared]) -> Result<Guard, ParseError> {
    if call.membership_unknown {
        return Ok(Guard::Unknown);
    }
    let mut guard = Guard::Always;
    for clause in &call.when {
        let (name, line) = match clause.branch.rsplit_once('@') {
            Some((name, line)) => match line.parse::<u32>() {
                Ok(line) => (name, Some(line)),
                Err(_) => (clause.branch.as_str(), None),
            },
            None => (clause.branch.as_str(), None),
        };
        let found = declared
            .iter()
            .rev()
            .filter(|d| d.line <= call.line)
            .find(|d| d.name == name && line.is_none_or(|l| l == d.line))
            .ok_or_else(|| ParseError::UnknownBranch {
                line: call.line,
                reference: clause.branch.clone(),
            })?;
        guard = guard.and(found.handle, clause.value);
    }
    Ok(guard)
}
