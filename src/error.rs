use thiserror::Error;

/// A malformed or missing configuration / metadata field.
///
/// Raised eagerly at the boundary, before any path generation starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for '{field}': {message}. Suggestion: {suggestion}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: String,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// Errors that can occur while enumerating execution paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error(
        "Too many branch points ({branch_points}) would generate {total_paths} paths (limit: {limit} branch points). Suggestion: refactor workflow or increase max_decision_points"
    )]
    TooManyBranchPoints {
        branch_points: usize,
        total_paths: u64,
        limit: usize,
    },

    #[error(
        "Workflow would generate {total_paths} paths (limit: {limit} paths). Suggestion: refactor workflow or raise max_paths"
    )]
    TooManyPaths { total_paths: u64, limit: u64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised by the source-scanning collaborator when a call cannot be
/// understood statically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Line {line}: call '{call}' is missing required argument '{argument}'. Suggestion: pass '{argument}' explicitly so it can be read statically"
    )]
    MissingArgument {
        line: u32,
        call: String,
        argument: String,
    },

    #[error(
        "Line {line}: condition refers to unknown branch point '{reference}'. Suggestion: reference a decision or signal wait declared in the same workflow"
    )]
    UnknownBranch { line: u32, reference: String },

    #[error("Failed to read workflow source: {0}. Suggestion: check the document against the source schema")]
    InvalidDocument(String),

    #[error(transparent)]
    Metadata(#[from] ValidationError),
}

/// Internal invariant violations detected while merging paths into one graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error(
        "Edge references node '{node_id}' which was never declared. Suggestion: this is a bug in path generation, please report it with the workflow source"
    )]
    UnresolvedNode { node_id: String },

    #[error(
        "Node id '{node_id}' is shared by a {existing} and a {incoming}. Suggestion: rename one of the calls or move it to a different line"
    )]
    ConflictingNode {
        node_id: String,
        existing: String,
        incoming: String,
    },

    #[error("Failed to serialize graph: {0}")]
    Serialization(String),
}

/// Umbrella error for one full analysis call. All variants are fatal.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write output to '{path}': {source}. Suggestion: check that the directory exists and is writable")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
