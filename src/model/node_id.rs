use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a rendered node. Drives shape selection in the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Start,
    End,
    Activity,
    Decision,
    SignalWait,
    ChildWorkflow,
    ExternalSignal,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Activity => "activity",
            NodeKind::Decision => "decision",
            NodeKind::SignalWait => "signal wait",
            NodeKind::ChildWorkflow => "child workflow",
            NodeKind::ExternalSignal => "external signal",
        };
        f.write_str(name)
    }
}

/// The inputs a node id is derived from.
///
/// Activities and decisions are numbered by their position in source order;
/// everything else is keyed on its name and source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSeed<'a> {
    Start,
    End,
    Activity { ordinal: usize },
    Decision { ordinal: usize },
    SignalWait { name: &'a str, line: u32 },
    ChildWorkflow { name: &'a str, line: u32 },
    ExternalSignal { name: &'a str, line: u32 },
}

impl NodeSeed<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeSeed::Start => NodeKind::Start,
            NodeSeed::End => NodeKind::End,
            NodeSeed::Activity { .. } => NodeKind::Activity,
            NodeSeed::Decision { .. } => NodeKind::Decision,
            NodeSeed::SignalWait { .. } => NodeKind::SignalWait,
            NodeSeed::ChildWorkflow { .. } => NodeKind::ChildWorkflow,
            NodeSeed::ExternalSignal { .. } => NodeKind::ExternalSignal,
        }
    }
}

pub const START_NODE_ID: &str = "s";
pub const END_NODE_ID: &str = "e";

/// Derives the diagram id of a node. Pure: equal seeds always give equal ids.
///
/// | seed | id |
/// |---|---|
/// | start / end | `s` / `e` |
/// | activity #n (1-based) | `n` |
/// | decision #n (0-based) | `d{n}` |
/// | signal wait | `sig_{name}_{line}` |
/// | child workflow | `child_{name}_{line}` |
/// | external signal | `ext_sig_{name}_{line}` |
///
/// Names are lowercased and anything outside `[a-z0-9_]` becomes `_`.
pub fn make_node_id(seed: NodeSeed<'_>) -> String {
    match seed {
        NodeSeed::Start => START_NODE_ID.to_string(),
        NodeSeed::End => END_NODE_ID.to_string(),
        NodeSeed::Activity { ordinal } => ordinal.to_string(),
        NodeSeed::Decision { ordinal } => format!("d{}", ordinal),
        NodeSeed::SignalWait { name, line } => format!("sig_{}_{}", sanitize(name), line),
        NodeSeed::ChildWorkflow { name, line } => format!("child_{}_{}", sanitize(name), line),
        NodeSeed::ExternalSignal { name, line } => {
            format!("ext_sig_{}_{}", sanitize(name), line)
        }
    }
}

fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
