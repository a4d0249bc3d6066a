//! Confusion matrix and derived classification statistics.
//!
//! Counters are accumulated message-by-message during one evaluation run
//! and never mutated afterwards. Spam is the positive class. Every ratio
//! with a zero denominator is `None` ("undefined"), never a silent
//! division.

use crate::label::Label;
use serde::{Deserialize, Serialize};

/// Raw confusion-matrix counters for one evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tp: u64,
    pub tn: u64,
    pub fp: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
}

impl ConfusionMatrix {
    /// Record one prediction against the true label.
    pub fn record(&mut self, predicted: Label, actual: Label) {
        match (predicted.is_spam(), actual.is_spam()) {
            (true, true) => self.tp += 1,
            (false, false) => self.tn += 1,
            (true, false) => self.fp += 1,
            (false, true) => self.fn_ += 1,
        }
    }

    /// Total messages evaluated. Always equals tp + tn + fp + fn.
    pub fn total(&self) -> u64 {
        self.tp + self.tn + self.fp + self.fn_
    }

    pub fn correct(&self) -> u64 {
        self.tp + self.tn
    }

    pub fn incorrect(&self) -> u64 {
        self.fp + self.fn_
    }
}

/// Outcome of classifying a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOutcome {
    pub file_name: String,
    pub predicted: Label,
    pub actual: Label,
    pub correct: bool,
}

/// Accumulated result of evaluating a classifier over a test corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub matrix: ConfusionMatrix,
    pub outcomes: Vec<MessageOutcome>,
    pub actual_spam: u64,
    pub actual_ham: u64,
}

impl Evaluation {
    /// Record one prediction, updating the matrix, the actual-label
    /// counters, and the per-message outcome list.
    pub fn record(&mut self, file_name: impl Into<String>, predicted: Label, actual: Label) {
        self.matrix.record(predicted, actual);
        match actual {
            Label::Spam => self.actual_spam += 1,
            Label::Ham => self.actual_ham += 1,
        }
        self.outcomes.push(MessageOutcome {
            file_name: file_name.into(),
            predicted,
            actual,
            correct: predicted == actual,
        });
    }

    pub fn total(&self) -> u64 {
        self.matrix.total()
    }

    /// Derive the statistics block for this run.
    pub fn stats(&self) -> EvaluationStats {
        EvaluationStats::from_evaluation(self)
    }
}

/// Derived statistics for one evaluation run.
///
/// `None` means the ratio is undefined for this run (zero denominator),
/// e.g. precision with no predicted positives or any ratio over an empty
/// test corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationStats {
    pub total: u64,
    pub correct: u64,
    pub incorrect: u64,
    pub accuracy: Option<f64>,
    pub misclassification: Option<f64>,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub majority_class: Option<Label>,
    pub null_error_rate: Option<f64>,
}

impl EvaluationStats {
    pub fn from_evaluation(eval: &Evaluation) -> EvaluationStats {
        let m = &eval.matrix;
        let total = m.total();

        let majority_class = if total == 0 {
            None
        } else if eval.actual_spam > eval.actual_ham {
            Some(Label::Spam)
        } else {
            Some(Label::Ham)
        };

        // Error rate of the always-predict-majority baseline: the
        // fraction of messages in the minority class.
        let null_error_rate = majority_class.map(|major| {
            let minority = match major {
                Label::Spam => eval.actual_ham,
                Label::Ham => eval.actual_spam,
            };
            minority as f64 / total as f64
        });

        EvaluationStats {
            total,
            correct: m.correct(),
            incorrect: m.incorrect(),
            accuracy: ratio(m.correct(), total),
            misclassification: ratio(m.incorrect(), total),
            precision: ratio(m.tp, m.tp + m.fp),
            recall: ratio(m.tp, m.tp + m.fn_),
            majority_class,
            null_error_rate,
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_from(pairs: &[(Label, Label)]) -> Evaluation {
        let mut eval = Evaluation::default();
        for (i, (predicted, actual)) in pairs.iter().enumerate() {
            eval.record(format!("m{i}"), *predicted, *actual);
        }
        eval
    }

    #[test]
    fn matrix_counters_sum_to_total() {
        use Label::{Ham, Spam};
        let eval = eval_from(&[
            (Spam, Spam),
            (Spam, Ham),
            (Ham, Spam),
            (Ham, Ham),
            (Spam, Spam),
        ]);
        let m = eval.matrix;
        assert_eq!(m.tp, 2);
        assert_eq!(m.fp, 1);
        assert_eq!(m.fn_, 1);
        assert_eq!(m.tn, 1);
        assert_eq!(m.total(), 5);
        assert_eq!(m.tp + m.tn + m.fp + m.fn_, eval.total());
    }

    #[test]
    fn stats_match_hand_computed_values() {
        use Label::{Ham, Spam};
        // 3 spam, 1 ham; one spam misclassified as ham.
        let eval = eval_from(&[(Spam, Spam), (Spam, Spam), (Ham, Spam), (Ham, Ham)]);
        let stats = eval.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.correct, 3);
        assert_eq!(stats.accuracy, Some(0.75));
        assert_eq!(stats.misclassification, Some(0.25));
        assert_eq!(stats.precision, Some(1.0)); // 2 / (2 + 0)
        assert_eq!(stats.recall, Some(2.0 / 3.0));
        assert_eq!(stats.majority_class, Some(Spam));
        assert_eq!(stats.null_error_rate, Some(0.25)); // 1 ham / 4
    }

    #[test]
    fn empty_run_reports_undefined_ratios() {
        let eval = Evaluation::default();
        let stats = eval.stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.accuracy, None);
        assert_eq!(stats.misclassification, None);
        assert_eq!(stats.precision, None);
        assert_eq!(stats.recall, None);
        assert_eq!(stats.majority_class, None);
        assert_eq!(stats.null_error_rate, None);
    }

    #[test]
    fn no_predicted_positives_makes_precision_undefined() {
        use Label::{Ham, Spam};
        let eval = eval_from(&[(Ham, Spam), (Ham, Ham)]);
        let stats = eval.stats();
        assert_eq!(stats.precision, None);
        assert_eq!(stats.recall, Some(0.0));
    }

    #[test]
    fn ties_in_actual_counts_pick_ham_as_majority() {
        use Label::{Ham, Spam};
        let eval = eval_from(&[(Spam, Spam), (Ham, Ham)]);
        let stats = eval.stats();
        assert_eq!(stats.majority_class, Some(Ham));
        assert_eq!(stats.null_error_rate, Some(0.5));
    }
}
