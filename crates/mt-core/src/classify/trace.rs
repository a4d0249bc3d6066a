//! Verbosity-tiered scoring trace.
//!
//! A pure side-channel: classifiers call these hooks while scoring, and
//! nothing they emit affects classification outcomes. The CLI installs a
//! [`LogTrace`] whose tier comes from the `-v` count; library callers get
//! the silent [`NullTrace`] unless they inject their own observer.

use mt_common::Label;
use tracing::info;

/// Observer for classifier scoring and evaluation progress.
pub trait ScoreTrace {
    /// A known token's log-probability contribution to one label score.
    fn token(&self, token: &str, label: Label, contribution: f64) {
        let _ = (token, label, contribution);
    }

    /// Predicted-vs-actual outcome for one message.
    fn message(&self, file_name: &str, predicted: Label, actual: Label) {
        let _ = (file_name, predicted, actual);
    }

    /// Per-label accuracy over one evaluation run.
    fn label_summary(&self, label: Label, correct: u64, total: u64) {
        let _ = (label, correct, total);
    }

    /// Overall accuracy over one evaluation run.
    fn overall(&self, correct: u64, total: u64) {
        let _ = (correct, total);
    }
}

/// Silent trace; the default for library use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl ScoreTrace for NullTrace {}

/// Trace that reports through the `tracing` subscriber, tiered by level:
/// 1 prints aggregate accuracy, 2 adds per-message lines, 3 adds
/// per-token contributions.
#[derive(Debug, Clone, Copy)]
pub struct LogTrace {
    level: u8,
}

impl LogTrace {
    pub fn new(level: u8) -> LogTrace {
        LogTrace { level }
    }
}

impl ScoreTrace for LogTrace {
    fn token(&self, token: &str, label: Label, contribution: f64) {
        if self.level >= 3 {
            info!(token, label = %label, contribution, "token contribution");
        }
    }

    fn message(&self, file_name: &str, predicted: Label, actual: Label) {
        if self.level >= 2 {
            let verdict = if predicted == actual {
                "Correct"
            } else {
                "Wrong"
            };
            info!(
                file = file_name,
                actual = %actual,
                predicted = %predicted,
                verdict,
                "prediction"
            );
        }
    }

    fn label_summary(&self, label: Label, correct: u64, total: u64) {
        if self.level >= 1 && total > 0 {
            info!(
                label = %label,
                correct,
                total,
                accuracy = format!("{:.1}%", correct as f64 * 100.0 / total as f64),
                "label accuracy"
            );
        }
    }

    fn overall(&self, correct: u64, total: u64) {
        if self.level >= 1 && total > 0 {
            info!(
                correct,
                total,
                accuracy = format!("{:.1}%", correct as f64 * 100.0 / total as f64),
                "model accuracy"
            );
        }
    }
}
