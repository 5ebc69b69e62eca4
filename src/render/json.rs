use super::graph::{RenderedEdge, RenderedGraph, RenderedNode};
use crate::model::{END_NODE_ID, GraphPath, PathElement, START_NODE_ID};
use crate::validation::Warning;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct JsonPath<'a> {
    decisions: &'a BTreeMap<String, bool>,
    /// Node ids in traversal order, including start and end.
    nodes: Vec<&'a str>,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    total_branch_points: usize,
    total_paths: usize,
    nodes: &'a [RenderedNode],
    edges: &'a [RenderedEdge],
    paths: Vec<JsonPath<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<&'a [Warning]>,
}

pub fn render_json(
    graph: &RenderedGraph,
    paths: &[GraphPath<'_>],
    warnings: Option<&[Warning]>,
) -> Result<String, serde_json::Error> {
    let document = JsonDocument {
        total_branch_points: paths.first().map_or(0, |p| p.decisions().len()),
        total_paths: paths.len(),
        nodes: graph.nodes(),
        edges: graph.edges(),
        paths: paths
            .iter()
            .map(|path| JsonPath {
                decisions: path.decisions(),
                nodes: path
                    .elements()
                    .iter()
                    .filter_map(|e| match e {
                        PathElement::Start => Some(START_NODE_ID),
                        PathElement::End => Some(END_NODE_ID),
                        PathElement::Step(step) => {
                            graph.node(step.node_id()).map(|n| n.id.as_str())
                        }
                        PathElement::Branch { point, .. } => Some(point.node_id()),
                    })
                    .collect(),
            })
            .collect(),
        warnings,
    };
    serde_json::to_string_pretty(&document)
}
