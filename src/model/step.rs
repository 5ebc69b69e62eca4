use super::{Membership, NodeKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder shown when a signal target cannot be resolved statically.
pub const DYNAMIC_TARGET: &str = "dynamic";

/// The workflow an external signal is addressed to, as far as it is known statically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPattern {
    /// A plain string literal, e.g. `"shipping-42"`.
    Exact(String),
    /// A format string with the runtime parts replaced by `{*}`, e.g. `"shipping-{*}"`.
    Wildcard(String),
    Dynamic,
}

impl TargetPattern {
    /// Classifies a pre-resolved target string.
    pub fn classify(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => TargetPattern::Dynamic,
            Some(s) if s == DYNAMIC_TARGET => TargetPattern::Dynamic,
            Some(s) if s.contains("{*}") => TargetPattern::Wildcard(s.to_string()),
            Some(s) => TargetPattern::Exact(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TargetPattern::Exact(s) | TargetPattern::Wildcard(s) => s,
            TargetPattern::Dynamic => DYNAMIC_TARGET,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, TargetPattern::Dynamic)
    }
}

impl fmt::Display for TargetPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub node_id: String,
    pub line: u32,
    #[serde(default)]
    pub membership: Membership,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildWorkflowCall {
    pub workflow_name: String,
    pub node_id: String,
    pub line: u32,
    #[serde(default)]
    pub membership: Membership,
}

/// A fire-and-forget signal sent to another (peer) workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalSignalSend {
    pub signal_name: String,
    pub target: TargetPattern,
    pub node_id: String,
    pub line: u32,
    #[serde(default)]
    pub membership: Membership,
}

/// A step with no branching of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Activity(Activity),
    ChildWorkflow(ChildWorkflowCall),
    ExternalSignal(ExternalSignalSend),
}

impl Step {
    pub fn display_name(&self) -> &str {
        match self {
            Step::Activity(a) => &a.name,
            Step::ChildWorkflow(c) => &c.workflow_name,
            Step::ExternalSignal(s) => &s.signal_name,
        }
    }

    pub fn node_id(&self) -> &str {
        match self {
            Step::Activity(a) => &a.node_id,
            Step::ChildWorkflow(c) => &c.node_id,
            Step::ExternalSignal(s) => &s.node_id,
        }
    }

    pub fn source_line(&self) -> u32 {
        match self {
            Step::Activity(a) => a.line,
            Step::ChildWorkflow(c) => c.line,
            Step::ExternalSignal(s) => s.line,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Step::Activity(_) => NodeKind::Activity,
            Step::ChildWorkflow(_) => NodeKind::ChildWorkflow,
            Step::ExternalSignal(_) => NodeKind::ExternalSignal,
        }
    }

    pub fn membership(&self) -> &Membership {
        match self {
            Step::Activity(a) => &a.membership,
            Step::ChildWorkflow(c) => &c.membership,
            Step::ExternalSignal(s) => &s.membership,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_targets() {
        assert_eq!(TargetPattern::classify(None), TargetPattern::Dynamic);
        assert_eq!(TargetPattern::classify(Some("dynamic")), TargetPattern::Dynamic);
        assert_eq!(
            TargetPattern::classify(Some("shipping-{*}")),
            TargetPattern::Wildcard("shipping-{*}".to_string())
        );
        assert_eq!(
            TargetPattern::classify(Some("billing")),
            TargetPattern::Exact("billing".to_string())
        );
    }
}
