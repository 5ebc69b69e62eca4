use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Requires the branch point `branch_id` to have taken `value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchCondition {
    pub branch_id: String,
    pub value: bool,
}

impl BranchCondition {
    pub fn new(branch_id: impl Into<String>, value: bool) -> Self {
        Self {
            branch_id: branch_id.into(),
            value,
        }
    }
}

/// Which branch outcomes a step (or a nested branch point) lies under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    /// All conditions must hold. An empty list means unconditional.
    Known(Vec<BranchCondition>),
    /// The detector could not tell. Treated as unconditional, but reported.
    Unknown,
}

impl Default for Membership {
    fn default() -> Self {
        Membership::Known(Vec::new())
    }
}

impl Membership {
    pub fn unconditional() -> Self {
        Self::default()
    }

    pub fn when(conditions: impl IntoIterator<Item = BranchCondition>) -> Self {
        Membership::Known(conditions.into_iter().collect())
    }

    pub fn conditions(&self) -> &[BranchCondition] {
        match self {
            Membership::Known(conditions) => conditions,
            Membership::Unknown => &[],
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Membership::Unknown)
    }

    /// Whether a step with this membership lies on the path chosen by `decisions`.
    pub fn is_satisfied_by(&self, decisions: &BTreeMap<String, bool>) -> bool {
        self.conditions()
            .iter()
            .all(|c| decisions.get(&c.branch_id) == Some(&c.value))
    }

    /// True when the same branch point is required to be both true and false,
    /// so no assignment can ever reach the step.
    pub fn is_contradictory(&self) -> bool {
        let conditions = self.conditions();
        conditions.iter().enumerate().any(|(i, a)| {
            conditions[i + 1..]
                .iter()
                .any(|b| a.branch_id == b.branch_id && a.value != b.value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_is_always_satisfied() {
        assert!(Membership::Unknown.is_satisfied_by(&BTreeMap::new()));
    }

    #[test]
    fn detects_contradiction() {
        let m = Membership::when([
            BranchCondition::new("d0", true),
            BranchCondition::new("d1", true),
            BranchCondition::new("d0", false),
        ]);
        assert!(m.is_contradictory());
        assert!(!Membership::when([BranchCondition::new("d0", true)]).is_contradictory());
    }
}
