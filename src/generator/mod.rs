//! Exhaustive enumeration of execution paths.
//!
//! Given `n` branch points the generator produces exactly `2^n` [`GraphPath`]s,
//! one per boolean assignment. Assignments are enumerated as binary counting
//! from all-false to all-true with the first branch point (lowest source line)
//! as the least-significant bit, so path `k` takes branch point `i` iff bit `i`
//! of `k` is set.

use crate::context::GraphBuildingContext;
use crate::error::GenerationError;
use crate::model::{BranchPoint, GraphPath, Membership, PathElement, Step, WorkflowMetadata};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Steps and branch points merged into source order.
#[derive(Clone, Copy)]
enum Entry<'m> {
    Step(&'m Step),
    Branch(&'m BranchPoint),
}

impl<'m> Entry<'m> {
    fn line(&self) -> u32 {
        match self {
            Entry::Step(s) => s.source_line(),
            Entry::Branch(b) => b.source_line(),
        }
    }

    fn membership(&self) -> &'m Membership {
        match self {
            Entry::Step(s) => s.membership(),
            Entry::Branch(b) => b.membership(),
        }
    }
}

/// Turns workflow metadata into the full set of execution paths.
pub struct PathGenerator<'a> {
    context: &'a GraphBuildingContext,
}

impl<'a> PathGenerator<'a> {
    pub fn new(context: &'a GraphBuildingContext) -> Self {
        Self { context }
    }

    /// Fails fast with [`GenerationError::TooManyBranchPoints`] before any
    /// enumeration work if the workflow exceeds the configured limits.
    pub fn check_limits(&self, metadata: &WorkflowMetadata) -> Result<(), GenerationError> {
        let branch_points = metadata.total_branch_points();
        let total_paths = metadata.total_paths();
        if branch_points > self.context.max_decision_points {
            return Err(GenerationError::TooManyBranchPoints {
                branch_points,
                total_paths,
                limit: self.context.max_decision_points,
            });
        }
        let limit = self.context.path_limit();
        if total_paths > limit {
            return Err(GenerationError::TooManyPaths { total_paths, limit });
        }
        Ok(())
    }

    pub fn generate<'m>(
        &self,
        metadata: &'m WorkflowMetadata,
    ) -> Result<Vec<GraphPath<'m>>, GenerationError> {
        self.context.validate()?;
        self.check_limits(metadata)?;
        metadata.validate()?;

        let timeline = timeline(metadata);
        for entry in &timeline {
            if entry.membership().is_unknown() {
                log::warn!(
                    "{}: branch membership of line {} is unknown, including it on every path",
                    metadata.workflow_name,
                    entry.line()
                );
            }
        }

        // Conditions of enclosing branch points are folded in, so a step under a
        // nested decision is dropped on paths that never reach that decision.
        let guarded: Vec<(Entry<'m>, Membership)> = timeline
            .into_iter()
            .map(|entry| (entry, metadata.effective_membership(entry.membership())))
            .collect();

        let branch_points = &metadata.branch_points;
        log::debug!(
            "{}: enumerating {} paths over {} branch points",
            metadata.workflow_name,
            metadata.total_paths(),
            branch_points.len()
        );

        if branch_points.is_empty() {
            return Ok(vec![build_path(&guarded, BTreeMap::new())]);
        }

        // The last position of a cartesian product varies fastest, so positions
        // are mapped to branch points in reverse to make the first one the LSB.
        let paths = (0..branch_points.len())
            .map(|_| [false, true])
            .multi_cartesian_product()
            .map(|tuple| {
                let decisions: BTreeMap<String, bool> = branch_points
                    .iter()
                    .rev()
                    .zip(tuple)
                    .map(|(point, value)| (point.node_id().to_string(), value))
                    .collect();
                build_path(&guarded, decisions)
            })
            .collect();
        Ok(paths)
    }
}

/// Convenience wrapper. `None` uses a default context.
pub fn generate_paths<'m>(
    metadata: &'m WorkflowMetadata,
    context: Option<&GraphBuildingContext>,
) -> Result<Vec<GraphPath<'m>>, GenerationError> {
    match context {
        Some(context) => PathGenerator::new(context).generate(metadata),
        None => PathGenerator::new(&GraphBuildingContext::default()).generate(metadata),
    }
}

/// Merges steps and branch points by source line. On a shared line the step comes first.
fn timeline(metadata: &WorkflowMetadata) -> Vec<Entry<'_>> {
    metadata
        .steps
        .iter()
        .map(Entry::Step)
        .chain(metadata.branch_points.iter().map(Entry::Branch))
        .sorted_by_key(|entry| (entry.line(), matches!(entry, Entry::Branch(_))))
        .collect()
}

fn build_path<'m>(
    guarded: &[(Entry<'m>, Membership)],
    decisions: BTreeMap<String, bool>,
) -> GraphPath<'m> {
    let mut elements = Vec::with_capacity(guarded.len() + 2);
    elements.push(PathElement::Start);
    for (entry, membership) in guarded {
        if !membership.is_satisfied_by(&decisions) {
            continue;
        }
        elements.push(match *entry {
            Entry::Step(step) => PathElement::Step(step),
            Entry::Branch(point) => PathElement::Branch {
                point,
                taken: decisions.get(point.node_id()).copied().unwrap_or(false),
            },
        });
    }
    elements.push(PathElement::End);
    GraphPath::new(elements, decisions)
}
