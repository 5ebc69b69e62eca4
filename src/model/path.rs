use super::{BranchPoint, Step};
use std::collections::BTreeMap;

/// One element of a concrete execution path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathElement<'m> {
    Start,
    Step(&'m Step),
    /// A branch point together with the outcome chosen for this path.
    Branch {
        point: &'m BranchPoint,
        taken: bool,
    },
    End,
}

/// One assignment of outcomes to every branch point, plus the steps it reaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPath<'m> {
    elements: Vec<PathElement<'m>>,
    decisions: BTreeMap<String, bool>,
}

impl<'m> GraphPath<'m> {
    pub(crate) fn new(elements: Vec<PathElement<'m>>, decisions: BTreeMap<String, bool>) -> Self {
        Self {
            elements,
            decisions,
        }
    }

    pub fn elements(&self) -> &[PathElement<'m>] {
        &self.elements
    }

    /// Branch point node id -> chosen outcome. Holds every branch point, including
    /// ones that are not reached on this path.
    pub fn decisions(&self) -> &BTreeMap<String, bool> {
        &self.decisions
    }

    /// The steps of this path, skipping start, end and branch points.
    pub fn steps(&self) -> impl Iterator<Item = &'m Step> + '_ {
        self.elements.iter().filter_map(|e| match e {
            PathElement::Step(step) => Some(*step),
            _ => None,
        })
    }
}
