use super::{Membership, NodeKind};
use crate::context::GraphBuildingContext;
use serde::{Deserialize, Serialize};

/// A boolean decision in the workflow body, e.g. `if await to_decision(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub name: String,
    pub node_id: String,
    pub line: u32,
    #[serde(default)]
    pub membership: Membership,
}

/// A wait on an internal condition with a timeout. The true branch is
/// "condition met", the false branch is "timed out".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalWait {
    pub name: String,
    pub node_id: String,
    pub line: u32,
    /// Unparsed source text, informational only.
    pub condition_expr: String,
    pub timeout_expr: String,
    #[serde(default)]
    pub true_label: Option<String>,
    #[serde(default)]
    pub false_label: Option<String>,
    #[serde(default)]
    pub membership: Membership,
}

/// A point in the source with exactly two outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BranchPoint {
    Decision(Decision),
    SignalWait(SignalWait),
}

impl BranchPoint {
    pub fn name(&self) -> &str {
        match self {
            BranchPoint::Decision(d) => &d.name,
            BranchPoint::SignalWait(s) => &s.name,
        }
    }

    pub fn node_id(&self) -> &str {
        match self {
            BranchPoint::Decision(d) => &d.node_id,
            BranchPoint::SignalWait(s) => &s.node_id,
        }
    }

    pub fn source_line(&self) -> u32 {
        match self {
            BranchPoint::Decision(d) => d.line,
            BranchPoint::SignalWait(s) => s.line,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            BranchPoint::Decision(_) => NodeKind::Decision,
            BranchPoint::SignalWait(_) => NodeKind::SignalWait,
        }
    }

    pub fn membership(&self) -> &Membership {
        match self {
            BranchPoint::Decision(d) => &d.membership,
            BranchPoint::SignalWait(s) => &s.membership,
        }
    }

    /// The edge label for leaving this branch point with outcome `value`.
    /// Signal waits may override the context's decision labels.
    pub fn outcome_label<'a>(&'a self, value: bool, context: &'a GraphBuildingContext) -> &'a str {
        let (true_override, false_override) = match self {
            BranchPoint::Decision(_) => (None, None),
            BranchPoint::SignalWait(s) => (s.true_label.as_deref(), s.false_label.as_deref()),
        };
        if value {
            true_override.unwrap_or(&context.decision_true_label)
        } else {
            false_override.unwrap_or(&context.decision_false_label)
        }
    }
}
