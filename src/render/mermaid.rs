use super::graph::{EdgeStyle, RenderedGraph, RenderedNode};
use super::label::mermaid_text;
use crate::model::NodeKind;
use crate::validation::ValidationReport;
use std::fmt::Write;

/// Amber fill and orange stroke for external signal nodes.
pub const SIGNAL_NODE_STYLE: &str = "fill:#fff4e6,stroke:#ff9800";

/// Formats a merged graph as a Mermaid flowchart.
///
/// Layout: the `flowchart LR` directive, one declaration per node, one line per
/// edge, then one `style` line per external signal node. Node and edge labels
/// are quoted the same way.
pub fn render_mermaid(graph: &RenderedGraph, report: Option<&ValidationReport>) -> String {
    let mut out = String::from("flowchart LR\n");

    for node in graph.nodes() {
        let _ = writeln!(out, "{}", declare(node));
    }

    for edge in graph.edges() {
        let _ = match (edge.style, edge.label.as_deref()) {
            (EdgeStyle::Plain, _) | (_, None) => writeln!(out, "{} --> {}", edge.from, edge.to),
            (EdgeStyle::Branch, Some(label)) => {
                writeln!(out, "{} -- {} --> {}", edge.from, mermaid_text(label), edge.to)
            }
            (EdgeStyle::Signal, Some(label)) => {
                writeln!(out, "{} -.{}.-> {}", edge.from, mermaid_text(label), edge.to)
            }
        };
    }

    for node in graph
        .nodes()
        .iter()
        .filter(|n| n.kind == NodeKind::ExternalSignal)
    {
        let _ = writeln!(out, "style {} {}", node.id, SIGNAL_NODE_STYLE);
    }

    if let Some(report) = report {
        for warning in report.warnings() {
            let _ = writeln!(out, "%% warning: {}", warning);
        }
    }
    out
}

fn declare(node: &RenderedNode) -> String {
    let (open, close) = match node.kind {
        NodeKind::Start | NodeKind::End => ("((", "))"),
        NodeKind::Activity => ("[", "]"),
        NodeKind::Decision => ("{", "}"),
        NodeKind::SignalWait => ("{{", "}}"),
        NodeKind::ChildWorkflow => ("[[", "]]"),
        NodeKind::ExternalSignal => ("[/", "\\]"),
    };
    format!("{}{}{}{}", node.id, open, mermaid_text(&node.label), close)
}
