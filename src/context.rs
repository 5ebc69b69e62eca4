use crate::error::ValidationError;
use crate::model::metadata::path_count;
use serde::{Deserialize, Serialize};

/// Largest `max_decision_points` whose path count still fits in a `u64`.
pub const MAX_SUPPORTED_DECISION_POINTS: usize = 63;

/// How external signal nodes are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalLabelStyle {
    /// Just the quoted signal name.
    #[default]
    NameOnly,
    /// The quoted signal name followed by ` to <target pattern>`.
    TargetPattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Mermaid,
    Paths,
    Json,
}

/// Read-only options shared by the generator and the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphBuildingContext {
    pub max_decision_points: usize,
    /// Explicit cap on the number of paths. `None` means `2^max_decision_points`.
    pub max_paths: Option<u64>,
    pub start_node_label: String,
    pub end_node_label: String,
    pub split_names_by_words: bool,
    pub decision_true_label: String,
    pub decision_false_label: String,
    pub suppress_validation: bool,
    pub include_validation_report: bool,
    pub show_external_signals: bool,
    pub external_signal_label_style: SignalLabelStyle,
    pub output_format: OutputFormat,
}

impl Default for GraphBuildingContext {
    fn default() -> Self {
        Self {
            max_decision_points: 10,
            max_paths: None,
            start_node_label: "Start".to_string(),
            end_node_label: "End".to_string(),
            split_names_by_words: true,
            decision_true_label: "yes".to_string(),
            decision_false_label: "no".to_string(),
            suppress_validation: false,
            include_validation_report: false,
            show_external_signals: true,
            external_signal_label_style: SignalLabelStyle::NameOnly,
            output_format: OutputFormat::Mermaid,
        }
    }
}

impl GraphBuildingContext {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// The effective path cap: `max_paths` if set, otherwise `2^max_decision_points`.
    pub fn path_limit(&self) -> u64 {
        self.max_paths
            .unwrap_or_else(|| path_count(self.max_decision_points))
    }

    /// Whether the validation report should be attached to the output.
    pub fn report_enabled(&self) -> bool {
        self.include_validation_report && !self.suppress_validation
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_decision_points > MAX_SUPPORTED_DECISION_POINTS {
            return Err(ValidationError::new(
                "max_decision_points",
                format!(
                    "{} exceeds the supported maximum of {}",
                    self.max_decision_points, MAX_SUPPORTED_DECISION_POINTS
                ),
                "use a value of 63 or less (10 is the default)",
            ));
        }
        if self.max_paths == Some(0) {
            return Err(ValidationError::new(
                "max_paths",
                "must be at least 1",
                "leave it unset to derive the cap from max_decision_points",
            ));
        }
        for (field, value) in [
            ("start_node_label", &self.start_node_label),
            ("end_node_label", &self.end_node_label),
            ("decision_true_label", &self.decision_true_label),
            ("decision_false_label", &self.decision_false_label),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::new(
                    field,
                    "must not be empty",
                    "use a short non-empty label",
                ));
            }
        }
        if self.decision_true_label == self.decision_false_label {
            return Err(ValidationError::new(
                "decision_false_label",
                format!(
                    "is identical to decision_true_label ('{}')",
                    self.decision_true_label
                ),
                "use distinct labels such as 'yes' and 'no'",
            ));
        }
        Ok(())
    }
}

/// Consuming builder for [`GraphBuildingContext`].
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    context: GraphBuildingContext,
}

impl ContextBuilder {
    pub fn with_max_decision_points(mut self, limit: usize) -> Self {
        self.context.max_decision_points = limit;
        self
    }
    pub fn with_max_paths(mut self, limit: u64) -> Self {
        self.context.max_paths = Some(limit);
        self
    }
    pub fn with_node_labels(mut self, start: &str, end: &str) -> Self {
        self.context.start_node_label = start.to_string();
        self.context.end_node_label = end.to_string();
        self
    }
    pub fn with_split_names_by_words(mut self, split: bool) -> Self {
        self.context.split_names_by_words = split;
        self
    }
    pub fn with_decision_labels(mut self, true_label: &str, false_label: &str) -> Self {
        self.context.decision_true_label = true_label.to_string();
        self.context.decision_false_label = false_label.to_string();
        self
    }
    pub fn with_suppress_validation(mut self, suppress: bool) -> Self {
        self.context.suppress_validation = suppress;
        self
    }
    pub fn with_validation_report(mut self, include: bool) -> Self {
        self.context.include_validation_report = include;
        self
    }
    pub fn with_external_signals(mut self, show: bool) -> Self {
        self.context.show_external_signals = show;
        self
    }
    pub fn with_signal_label_style(mut self, style: SignalLabelStyle) -> Self {
        self.context.external_signal_label_style = style;
        self
    }
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.context.output_format = format;
        self
    }

    /// Validates and returns the finished context.
    pub fn build(self) -> Result<GraphBuildingContext, ValidationError> {
        self.context.validate()?;
        Ok(self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_limit_is_derived() {
        assert_eq!(GraphBuildingContext::default().path_limit(), 1024);
    }

    #[test]
    fn report_is_suppressed_by_suppress_validation() {
        let ctx = GraphBuildingContext::builder()
            .with_validation_report(true)
            .with_suppress_validation(true)
            .build()
            .unwrap();
        assert!(!ctx.report_enabled());
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let ctx: GraphBuildingContext = serde_json::from_str(
            r#"{"max_decision_points": 4, "external_signal_label_style": "target-pattern"}"#,
        )
        .unwrap();
        assert_eq!(ctx.max_decision_points, 4);
        assert_eq!(ctx.external_signal_label_style, SignalLabelStyle::TargetPattern);
        assert_eq!(ctx.start_node_label, "Start");
    }
}
