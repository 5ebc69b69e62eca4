use crate::context::GraphBuildingContext;
use crate::error::AnalysisError;
use crate::generator::PathGenerator;
use crate::model::WorkflowMetadata;
use crate::render::Renderer;
use crate::source::IntoMetadata;
use crate::validation::ValidationReport;
use std::fs;
use std::path::Path;

/// Runs generate -> render for one workflow and returns the output text in
/// `context.output_format`.
///
/// The validation report is attached only when `include_validation_report`
/// is set and `suppress_validation` is not.
pub fn analyze(
    metadata: &WorkflowMetadata,
    context: &GraphBuildingContext,
) -> Result<String, AnalysisError> {
    context.validate()?;

    let paths = PathGenerator::new(context).generate(metadata)?;
    let report = context
        .report_enabled()
        .then(|| ValidationReport::for_metadata(metadata));

    let output = Renderer::new(context).render(&paths, report.as_ref())?;
    log::debug!(
        "{}: rendered {} paths as {:?} ({} bytes)",
        metadata.workflow_name,
        paths.len(),
        context.output_format,
        output.len()
    );
    Ok(output)
}

/// Like [`analyze`], starting from a detector's raw findings.
pub fn analyze_source<S: IntoMetadata>(
    source: S,
    context: &GraphBuildingContext,
) -> Result<String, AnalysisError> {
    let metadata = source.into_metadata()?;
    analyze(&metadata, context)
}

/// Analyzes and writes the result to `path`, returning the text as well.
pub fn analyze_to_file(
    metadata: &WorkflowMetadata,
    context: &GraphBuildingContext,
    path: impl AsRef<Path>,
) -> Result<String, AnalysisError> {
    let output = analyze(metadata, context)?;
    write_output(path, &output)?;
    Ok(output)
}

pub fn write_output(path: impl AsRef<Path>, content: &str) -> Result<(), AnalysisError> {
    let path = path.as_ref();
    fs::write(path, content).map_err(|source| AnalysisError::Io {
        path: path.display().to_string(),
        source,
    })
}
