//! # wfgraph - Workflow Path Enumeration and Flowchart Rendering
//!
//! **wfgraph** takes what a static scan of a workflow function found (activities,
//! decisions, signal waits, child workflow calls and peer-to-peer signal sends),
//! enumerates every possible execution path through its branch points and merges
//! those paths into one deduplicated flowchart.
//!
//! ## Core Workflow
//!
//! 1.  **Describe the workflow**: Either build a [`WorkflowMetadata`](model::WorkflowMetadata)
//!     with the single-use [`MetadataBuilder`](model::MetadataBuilder), or implement
//!     [`IntoMetadata`](source::IntoMetadata) for your detector's output. A JSON
//!     implementation ships as [`WorkflowSource`](source::WorkflowSource).
//! 2.  **Configure**: Create a [`GraphBuildingContext`](context::GraphBuildingContext).
//!     It is read-only and can be shared across analyses.
//! 3.  **Generate**: [`PathGenerator`](generator::PathGenerator) produces exactly `2^n`
//!     paths for `n` branch points, failing fast when `n` exceeds `max_decision_points`.
//! 4.  **Render**: [`Renderer`](render::Renderer) merges the paths into a Mermaid
//!     flowchart, a path listing or a JSON dump.
//!
//! [`analyze`](analysis::analyze) runs steps 3 and 4 in one call.
//!
//! ## Quick Start
//!
//! ```rust
//! use wfgraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut builder = WorkflowMetadata::builder("LoanApproval");
//!     builder.activity("checkCredit", 10, Guard::Always);
//!     let approved = builder.decision("IsApproved", 11, Guard::Always);
//!     builder.activity("disburseLoan", 12, Guard::when(approved, true));
//!     builder.activity("sendRejection", 14, Guard::when(approved, false));
//!     let metadata = builder.finish()?;
//!
//!     let context = GraphBuildingContext::builder()
//!         .with_decision_labels("approved", "rejected")
//!         .build()?;
//!
//!     let diagram = analyze(&metadata, &context)?;
//!     assert!(diagram.contains("d0{Is Approved}"));
//!     assert!(diagram.contains("d0 -- approved --> 2"));
//!     println!("{}", diagram);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod context;
pub mod error;
pub mod generator;
pub mod model;
pub mod prelude;
pub mod render;
pub mod source;
pub mod validation;
