use clap::{Parser, ValueEnum};
use std::fs;
use std::time::Instant;
use wfgraph::prelude::*;

/// CLI-specific mirror of `OutputFormat` for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Mermaid,
    Paths,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SignalLabelsCli {
    NameOnly,
    TargetPattern,
}

/// Renders every execution path of a workflow as a flowchart
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow source JSON produced by the detector
    source_path: String,

    /// Optional JSON file with graph building options
    #[arg(short, long)]
    config: Option<String>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<FormatCli>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Maximum number of decision points before refusing to enumerate
    #[arg(long)]
    max_decision_points: Option<usize>,

    /// Keep names as written instead of splitting camelCase into words
    #[arg(long)]
    no_split_names: bool,

    /// Leave external signal sends out of the diagram
    #[arg(long)]
    hide_external_signals: bool,

    /// How external signal nodes are labelled
    #[arg(long, value_enum)]
    signal_labels: Option<SignalLabelsCli>,

    /// Append the validation report to the output
    #[arg(long)]
    validation_report: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let context = load_context(&cli);
    let source_json = fs::read_to_string(&cli.source_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read workflow source '{}': {}",
            &cli.source_path, e
        ))
    });
    let source = WorkflowSource::from_json(&source_json)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let workflow = source.workflow.clone();

    let output = analyze_source(source, &context)
        .unwrap_or_else(|e| exit_with_error(&format!("Analysis of '{}' failed: {}", workflow, e)));

    match &cli.output {
        Some(path) => {
            write_output(path, &output).unwrap_or_else(|e| exit_with_error(&e.to_string()));
            log::info!("wrote {} to '{}' in {:?}", workflow, path, start.elapsed());
        }
        None => print!("{}", output),
    }
}

/// Config file first, then command line flags on top.
fn load_context(cli: &Cli) -> GraphBuildingContext {
    let mut context = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read config file '{}': {}", path, e))
            });
            serde_json::from_str::<GraphBuildingContext>(&json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse config file '{}': {}", path, e))
            })
        }
        None => GraphBuildingContext::default(),
    };

    if let Some(format) = cli.format {
        context.output_format = match format {
            FormatCli::Mermaid => OutputFormat::Mermaid,
            FormatCli::Paths => OutputFormat::Paths,
            FormatCli::Json => OutputFormat::Json,
        };
    }
    if let Some(limit) = cli.max_decision_points {
        context.max_decision_points = limit;
    }
    if let Some(style) = cli.signal_labels {
        context.external_signal_label_style = match style {
            SignalLabelsCli::NameOnly => SignalLabelStyle::NameOnly,
            SignalLabelsCli::TargetPattern => SignalLabelStyle::TargetPattern,
        };
    }
    if cli.no_split_names {
        context.split_names_by_words = false;
    }
    if cli.hide_external_signals {
        context.show_external_signals = false;
    }
    if cli.validation_report {
        context.include_validation_report = true;
    }

    context
        .validate()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    context
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
