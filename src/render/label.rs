use crate::context::{GraphBuildingContext, SignalLabelStyle};
use crate::model::{BranchPoint, ExternalSignalSend, Step};
use regex::Regex;
use std::sync::LazyLock;

static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("word boundary pattern is valid"));

/// `withdrawFunds` -> `Withdraw Funds`.
pub fn split_words(name: &str) -> String {
    let spaced = WORD_BOUNDARY.replace_all(name, "$1 $2");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn display_name(name: &str, context: &GraphBuildingContext) -> String {
    if context.split_names_by_words {
        split_words(name)
    } else {
        name.to_string()
    }
}

pub fn step_label(step: &Step, context: &GraphBuildingContext) -> String {
    match step {
        Step::Activity(a) => display_name(&a.name, context),
        Step::ChildWorkflow(c) => display_name(&c.workflow_name, context),
        Step::ExternalSignal(s) => signal_label(s, context),
    }
}

pub fn branch_label(point: &BranchPoint, context: &GraphBuildingContext) -> String {
    display_name(point.name(), context)
}

/// Signal names are literals and are never word-split.
pub fn signal_label(signal: &ExternalSignalSend, context: &GraphBuildingContext) -> String {
    match context.external_signal_label_style {
        SignalLabelStyle::NameOnly => format!("Signal '{}'", signal.signal_name),
        SignalLabelStyle::TargetPattern => {
            format!("Signal '{}' to {}", signal.signal_name, signal.target)
        }
    }
}

/// Wraps the label in a Mermaid string when it contains characters that
/// would otherwise be read as shape syntax.
pub fn mermaid_text(label: &str) -> String {
    const SPECIAL: &[char] = &[
        '(', ')', '[', ']', '{', '}', '<', '>', '"', '\'', '/', '\\', '|', '#', ';', '&',
    ];
    if label.contains(SPECIAL) {
        format!("\"{}\"", label.replace('"', "#quot;"))
    } else {
        label.to_string()
    }
}
