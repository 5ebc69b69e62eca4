use super::label::{branch_label, step_label};
use crate::context::GraphBuildingContext;
use crate::error::RenderError;
use crate::model::{END_NODE_ID, GraphPath, NodeKind, PathElement, START_NODE_ID, Step};
use ahash::{AHashMap, AHashSet};
use serde::Serialize;

pub const SIGNAL_EDGE_LABEL: &str = "signal";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    /// `a --> b`
    Plain,
    /// `a -- yes --> b`, leaving a decision or signal wait.
    Branch,
    /// `a -.signal.-> b`, into or out of an external signal.
    Signal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEdge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub style: EdgeStyle,
}

/// The union of all paths with duplicate nodes and edges collapsed.
///
/// Nodes and edges keep first-seen order, so the same paths always produce
/// the same output.
#[derive(Debug, Default)]
pub struct RenderedGraph {
    nodes: Vec<RenderedNode>,
    node_index: AHashMap<String, usize>,
    edges: Vec<RenderedEdge>,
    edge_keys: AHashSet<(String, String, Option<String>)>,
}

impl RenderedGraph {
    pub fn from_paths(
        paths: &[GraphPath<'_>],
        context: &GraphBuildingContext,
    ) -> Result<Self, RenderError> {
        let mut graph = RenderedGraph::default();

        if paths.is_empty() {
            graph.add_node(start_node(context))?;
            graph.add_node(end_node(context))?;
            graph.add_edge(START_NODE_ID, END_NODE_ID, None);
        }

        for path in paths {
            let mut previous: Option<String> = None;
            let mut pending_label: Option<String> = None;

            for element in path.elements() {
                let (node, outcome) = match element {
                    PathElement::Start => (start_node(context), None),
                    PathElement::End => (end_node(context), None),
                    PathElement::Step(step) => {
                        if !context.show_external_signals && is_external_signal(step) {
                            continue;
                        }
                        (
                            RenderedNode {
                                id: step.node_id().to_string(),
                                kind: step.kind(),
                                label: step_label(step, context),
                            },
                            None,
                        )
                    }
                    PathElement::Branch { point, taken } => (
                        RenderedNode {
                            id: point.node_id().to_string(),
                            kind: point.kind(),
                            label: branch_label(point, context),
                        },
                        Some(point.outcome_label(*taken, context).to_string()),
                    ),
                };

                let id = graph.add_node(node)?;
                if let Some(from) = previous.take() {
                    graph.add_edge(&from, &id, pending_label.take());
                }
                pending_label = outcome;
                previous = Some(id);
            }
        }

        graph.check_edges()?;
        log::debug!(
            "merged {} paths into {} nodes and {} edges",
            paths.len(),
            graph.nodes.len(),
            graph.edges.len()
        );
        Ok(graph)
    }

    pub fn nodes(&self) -> &[RenderedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RenderedEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&RenderedNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Registers a node once. A second node with the same id must be of the same kind.
    fn add_node(&mut self, node: RenderedNode) -> Result<String, RenderError> {
        if let Some(&i) = self.node_index.get(&node.id) {
            let existing = &self.nodes[i];
            if existing.kind != node.kind {
                return Err(RenderError::ConflictingNode {
                    node_id: node.id,
                    existing: existing.kind.to_string(),
                    incoming: node.kind.to_string(),
                });
            }
            return Ok(node.id);
        }
        let id = node.id.clone();
        self.node_index.insert(id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    /// Branch labels win over the signal style when both apply.
    fn add_edge(&mut self, from: &str, to: &str, branch_label: Option<String>) {
        let touches_signal = [from, to]
            .iter()
            .any(|id| self.node(id).map(|n| n.kind) == Some(NodeKind::ExternalSignal));
        let (label, style) = match branch_label {
            Some(label) => (Some(label), EdgeStyle::Branch),
            None if touches_signal => (Some(SIGNAL_EDGE_LABEL.to_string()), EdgeStyle::Signal),
            None => (None, EdgeStyle::Plain),
        };
        let key = (from.to_string(), to.to_string(), label.clone());
        if self.edge_keys.insert(key) {
            self.edges.push(RenderedEdge {
                from: from.to_string(),
                to: to.to_string(),
                label,
                style,
            });
        }
    }

    fn check_edges(&self) -> Result<(), RenderError> {
        for edge in &self.edges {
            for id in [&edge.from, &edge.to] {
                if !self.node_index.contains_key(id) {
                    return Err(RenderError::UnresolvedNode {
                        node_id: id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn start_node(context: &GraphBuildingContext) -> RenderedNode {
    RenderedNode {
        id: START_NODE_ID.to_string(),
        kind: NodeKind::Start,
        label: context.start_node_label.clone(),
    }
}

fn end_node(context: &GraphBuildingContext) -> RenderedNode {
    RenderedNode {
        id: END_NODE_ID.to_string(),
        kind: NodeKind::End,
        label: context.end_node_label.clone(),
    }
}

fn is_external_signal(step: &Step) -> bool {
    matches!(step, Step::ExternalSignal(_))
}
