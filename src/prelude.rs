//! Prelude module for convenient imports
//!
//! Re-exports the types needed to describe a workflow, generate its paths and
//! render them.
//!
//! # Example
//!
//! ```rust
//! use wfgraph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut builder = WorkflowMetadata::builder("MoneyTransfer");
//! builder.activity("withdrawFunds", 10, Guard::Always);
//! let convert = builder.decision("NeedToConvert", 12, Guard::Always);
//! builder.activity("currencyConvert", 13, Guard::when(convert, true));
//! builder.activity("depositFunds", 15, Guard::Always);
//! let metadata = builder.finish()?;
//!
//! let context = GraphBuildingContext::default();
//! let diagram = analyze(&metadata, &context)?;
//! assert!(diagram.starts_with("flowchart LR"));
//! # Ok(())
//! # }
//! # run_example().unwrap();
//! ```

// Entry points
pub use crate::analysis::{analyze, analyze_source, analyze_to_file, write_output};
pub use crate::generator::{PathGenerator, generate_paths};
pub use crate::render::Renderer;

// Configuration
pub use crate::context::{GraphBuildingContext, OutputFormat, SignalLabelStyle};

// Model types
pub use crate::model::{
    BranchCondition, BranchPoint, GraphPath, Guard, Membership, MetadataBuilder, NodeKind,
    PathElement, Step, TargetPattern, WorkflowMetadata, make_node_id,
};
pub use crate::source::{IntoMetadata, WorkflowSource};
pub use crate::validation::{ValidationReport, Warning};

// Error types
pub use crate::error::{
    AnalysisError, GenerationError, ParseError, RenderError, ValidationError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
