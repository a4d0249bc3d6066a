//! Report generator implementation.

use crate::config::ReportConfig;
use crate::error::Result;

use chrono::{DateTime, Utc};
use mt_common::{Evaluation, EvaluationStats, Label, OutputFormat};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::debug;

/// Complete report data structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    /// Name of the classifier that produced the evaluation.
    pub algorithm: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Generator version.
    pub generator_version: String,
    /// Raw evaluation result.
    pub evaluation: Evaluation,
    /// Derived statistics.
    pub stats: EvaluationStats,
}

impl ReportData {
    /// Wrap an evaluation with generation metadata and derived stats.
    pub fn new(algorithm: impl Into<String>, evaluation: Evaluation) -> ReportData {
        let stats = evaluation.stats();
        ReportData {
            algorithm: algorithm.into(),
            generated_at: Utc::now(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            evaluation,
            stats,
        }
    }
}

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render the report in the requested format.
    pub fn render(&self, data: &ReportData, format: OutputFormat) -> Result<String> {
        debug!(algorithm = %data.algorithm, format = %format, "rendering report");
        match format {
            OutputFormat::Text => Ok(self.render_text(data)),
            OutputFormat::Md => Ok(self.render_markdown(data)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        }
    }

    fn title(&self, data: &ReportData) -> String {
        self.config
            .title
            .clone()
            .unwrap_or_else(|| format!("{} classification report", data.algorithm))
    }

    fn render_text(&self, data: &ReportData) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}\n", self.title(data));

        if self.config.include_messages {
            out.push_str("============================================\n");
            for outcome in &data.evaluation.outcomes {
                let verdict = if outcome.correct { "correct" } else { "INCORRECT" };
                let _ = writeln!(
                    out,
                    "| {:<16} | {:>8} | {:>10} |",
                    outcome.file_name, outcome.predicted, verdict
                );
            }
            out.push_str("============================================\n\n");
        }

        let m = &data.evaluation.matrix;
        out.push_str("CONFUSION MATRIX\n");
        out.push_str("================\n\n");
        let _ = writeln!(out, "  {:<8}   {:>8}   {:>8}", "", "Spam", "Not Spam");
        out.push_str("==================================\n");
        let _ = writeln!(
            out,
            "| {:<8} | {:>8} | {:>8} |",
            "Spam",
            format!("TP {}", m.tp),
            format!("FP {}", m.fp)
        );
        out.push_str("+================================+\n");
        let _ = writeln!(
            out,
            "| {:<8} | {:>8} | {:>8} |",
            "Not Spam",
            format!("FN {}", m.fn_),
            format!("TN {}", m.tn)
        );
        out.push_str("==================================\n\n");

        let stats = &data.stats;
        out.push_str("STATISTICS\n");
        out.push_str("==========\n\n");
        let _ = writeln!(out, "{:<25} {}", "Messages Classified:", stats.total);
        let _ = writeln!(out, "{:<25} {}", "Correct Predictions:", stats.correct);
        let _ = writeln!(out, "{:<25} {}", "Incorrect Predictions:", stats.incorrect);
        let _ = writeln!(out, "{:<25} {}", "Accuracy:", fmt_ratio(stats.accuracy));
        let _ = writeln!(
            out,
            "{:<25} {}",
            "Misclassification:",
            fmt_ratio(stats.misclassification)
        );
        let _ = writeln!(out, "{:<25} {}", "Precision:", fmt_ratio(stats.precision));
        let _ = writeln!(out, "{:<25} {}", "Recall:", fmt_ratio(stats.recall));
        let _ = writeln!(
            out,
            "{:<25} {}",
            format!("Null Error Rate ({}):", fmt_majority(stats.majority_class)),
            fmt_ratio(stats.null_error_rate)
        );

        out
    }

    fn render_markdown(&self, data: &ReportData) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", self.title(data));
        let _ = writeln!(out, "Generated at: {}\n", data.generated_at.to_rfc3339());

        if self.config.include_messages && !data.evaluation.outcomes.is_empty() {
            out.push_str("## Messages\n\n");
            out.push_str("| File | Predicted | Actual | Result |\n");
            out.push_str("|------|-----------|--------|--------|\n");
            for outcome in &data.evaluation.outcomes {
                let verdict = if outcome.correct { "correct" } else { "incorrect" };
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} |",
                    outcome.file_name, outcome.predicted, outcome.actual, verdict
                );
            }
            out.push('\n');
        }

        let m = &data.evaluation.matrix;
        out.push_str("## Confusion matrix\n\n");
        out.push_str("| | Actual spam | Actual ham |\n");
        out.push_str("|---|---|---|\n");
        let _ = writeln!(out, "| **Predicted spam** | TP {} | FP {} |", m.tp, m.fp);
        let _ = writeln!(out, "| **Predicted ham** | FN {} | TN {} |\n", m.fn_, m.tn);

        let stats = &data.stats;
        out.push_str("## Statistics\n\n");
        out.push_str("| Statistic | Value |\n");
        out.push_str("|-----------|-------|\n");
        let _ = writeln!(out, "| Messages classified | {} |", stats.total);
        let _ = writeln!(out, "| Correct predictions | {} |", stats.correct);
        let _ = writeln!(out, "| Incorrect predictions | {} |", stats.incorrect);
        let _ = writeln!(out, "| Accuracy | {} |", fmt_ratio(stats.accuracy));
        let _ = writeln!(
            out,
            "| Misclassification | {} |",
            fmt_ratio(stats.misclassification)
        );
        let _ = writeln!(out, "| Precision | {} |", fmt_ratio(stats.precision));
        let _ = writeln!(out, "| Recall | {} |", fmt_ratio(stats.recall));
        let _ = writeln!(
            out,
            "| Null error rate ({}) | {} |",
            fmt_majority(stats.majority_class),
            fmt_ratio(stats.null_error_rate)
        );

        out
    }
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.6}"),
        None => "undefined".to_string(),
    }
}

fn fmt_majority(label: Option<Label>) -> String {
    match label {
        Some(label) => format!("Majority {label}"),
        None => "no majority".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_common::Label::{Ham, Spam};

    fn sample_evaluation() -> Evaluation {
        let mut eval = Evaluation::default();
        eval.record("s001.txt", Spam, Spam);
        eval.record("s002.txt", Ham, Spam);
        eval.record("h001.txt", Ham, Ham);
        eval.record("h002.txt", Spam, Ham);
        eval
    }

    #[test]
    fn text_report_contains_matrix_and_stats() {
        let data = ReportData::new("knn", sample_evaluation());
        let out = ReportGenerator::default_config()
            .render(&data, OutputFormat::Text)
            .unwrap();

        assert!(out.contains("CONFUSION MATRIX"));
        assert!(out.contains("TP 1"));
        assert!(out.contains("FP 1"));
        assert!(out.contains("FN 1"));
        assert!(out.contains("TN 1"));
        let classified = out
            .lines()
            .find(|l| l.starts_with("Messages Classified:"))
            .unwrap();
        assert!(classified.ends_with('4'));
        let accuracy = out.lines().find(|l| l.starts_with("Accuracy:")).unwrap();
        assert!(accuracy.ends_with("0.500000"));
        let missed_spam = format!("| {:<16} | {:>8} | {:>10} |", "s002.txt", "ham", "INCORRECT");
        assert!(out.contains(&missed_spam));
    }

    #[test]
    fn text_report_starts_with_the_title() {
        let data = ReportData::new("KNN (k = 1)", sample_evaluation());
        let out = ReportGenerator::default_config()
            .render(&data, OutputFormat::Text)
            .unwrap();
        assert!(out.starts_with("KNN (k = 1) classification report\n"));

        let titled = ReportGenerator::new(ReportConfig::default().with_title("nightly run"));
        let out = titled.render(&data, OutputFormat::Text).unwrap();
        assert!(out.starts_with("nightly run\n"));
    }

    #[test]
    fn per_message_table_can_be_suppressed() {
        let data = ReportData::new("knn", sample_evaluation());
        let generator = ReportGenerator::new(ReportConfig::default().without_messages());
        let out = generator.render(&data, OutputFormat::Text).unwrap();
        assert!(!out.contains("s001.txt"));
        assert!(out.contains("CONFUSION MATRIX"));
    }

    #[test]
    fn empty_run_prints_undefined_not_nan() {
        let data = ReportData::new("nb", Evaluation::default());
        let out = ReportGenerator::default_config()
            .render(&data, OutputFormat::Text)
            .unwrap();
        let accuracy = out.lines().find(|l| l.starts_with("Accuracy:")).unwrap();
        assert!(accuracy.ends_with("undefined"));
        assert!(out.contains("Null Error Rate (no majority):"));
        assert!(!out.contains("NaN"));
    }

    #[test]
    fn json_report_round_trips() {
        let data = ReportData::new("nb", sample_evaluation());
        let json = ReportGenerator::default_config()
            .render(&data, OutputFormat::Json)
            .unwrap();
        let parsed: ReportData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.algorithm, "nb");
        assert_eq!(parsed.evaluation.matrix.total(), 4);
        assert_eq!(parsed.stats.accuracy, Some(0.5));
    }

    #[test]
    fn markdown_report_has_tables() {
        let data = ReportData::new("knn", sample_evaluation());
        let out = ReportGenerator::default_config()
            .render(&data, OutputFormat::Md)
            .unwrap();
        assert!(out.contains("## Confusion matrix"));
        assert!(out.contains("| **Predicted spam** | TP 1 | FP 1 |"));
        assert!(out.contains("| Accuracy | 0.500000 |"));
    }
}
