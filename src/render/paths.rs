use super::label::{branch_label, step_label};
use crate::context::GraphBuildingContext;
use crate::model::{GraphPath, PathElement, Step};
use crate::validation::ValidationReport;
use std::fmt::Write;

/// Lists every path on its own line, numbered in enumeration order.
///
/// ```text
/// Decision Points: 1 (2^1 = 2 paths)
///
/// Path 1: Start → Withdraw → Need To Convert (no) → End
/// Path 2: Start → Withdraw → Need To Convert (yes) → Convert → End
/// ```
pub fn render_path_list(
    paths: &[GraphPath<'_>],
    context: &GraphBuildingContext,
    report: Option<&ValidationReport>,
) -> String {
    let branch_points = paths.first().map_or(0, |p| p.decisions().len());
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Decision Points: {} (2^{} = {} paths)",
        branch_points,
        branch_points,
        paths.len()
    );
    let _ = writeln!(out);

    for (i, path) in paths.iter().enumerate() {
        let parts: Vec<String> = path
            .elements()
            .iter()
            .filter_map(|element| describe(element, context))
            .collect();
        let _ = writeln!(out, "Path {}: {}", i + 1, parts.join(" → "));
    }

    if let Some(report) = report {
        let _ = writeln!(out);
        let _ = write!(out, "{}", report);
    }
    out
}

fn describe(element: &PathElement<'_>, context: &GraphBuildingContext) -> Option<String> {
    match element {
        PathElement::Start => Some(context.start_node_label.clone()),
        PathElement::End => Some(context.end_node_label.clone()),
        PathElement::Step(Step::ExternalSignal(_)) if !context.show_external_signals => None,
        PathElement::Step(step) => Some(step_label(step, context)),
        PathElement::Branch { point, taken } => Some(format!(
            "{} ({})",
            branch_label(point, context),
            point.outcome_label(*taken, context)
        )),
    }
}
