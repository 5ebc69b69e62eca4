//! Merges generated paths into a single diagram.

mod graph;
mod json;
pub mod label;
mod mermaid;
mod paths;

pub use graph::{EdgeStyle, RenderedEdge, RenderedGraph, RenderedNode, SIGNAL_EDGE_LABEL};
pub use mermaid::SIGNAL_NODE_STYLE;

use crate::context::{GraphBuildingContext, OutputFormat};
use crate::error::RenderError;
use crate::model::GraphPath;
use crate::validation::ValidationReport;

/// One-shot transform from paths to output text in the configured format.
pub struct Renderer<'a> {
    context: &'a GraphBuildingContext,
}

impl<'a> Renderer<'a> {
    pub fn new(context: &'a GraphBuildingContext) -> Self {
        Self { context }
    }

    /// Renders `paths` as `context.output_format`. `report` is attached as-is;
    /// deciding whether it should be shown is up to the caller.
    pub fn render(
        &self,
        paths: &[GraphPath<'_>],
        report: Option<&ValidationReport>,
    ) -> Result<String, RenderError> {
        match self.context.output_format {
            OutputFormat::Mermaid => {
                let graph = RenderedGraph::from_paths(paths, self.context)?;
                Ok(mermaid::render_mermaid(&graph, report))
            }
            OutputFormat::Paths => {
                // The listing does not draw the graph, but node ids are checked all the same.
                RenderedGraph::from_paths(paths, self.context)?;
                Ok(paths::render_path_list(paths, self.context, report))
            }
            OutputFormat::Json => {
                let graph = RenderedGraph::from_paths(paths, self.context)?;
                json::render_json(&graph, paths, report.map(|r| r.warnings()))
                    .map_err(|e| RenderError::Serialization(e.to_string()))
            }
        }
    }
}
