//! Multinomial Naive Bayes with Laplace (additive) smoothing.
//!
//! Training accumulates per-token, per-label counts; likelihoods are
//! computed in one batch pass after all training messages are processed,
//! never per message. Scoring runs in log space.
//!
//! Two deliberate contract points, both validated against literal
//! expected values in tests:
//!
//! - The smoothing denominator is inflated by `alpha * total token
//!   occurrences across the whole model`, not by the textbook vocabulary
//!   size.
//! - A token that never occurred under a label is skipped entirely when
//!   scoring that label, not smoothed toward a token-absent prior. Rare
//!   tokens therefore only ever add evidence for labels that actually saw
//!   them.

use crate::classify::trace::{NullTrace, ScoreTrace};
use crate::classify::Classifier;
use clap::ValueEnum;
use mt_common::{Error, Evaluation, Label, Result, TokenizedMessage};
use mt_math::{safe_ln, smoothed_log_likelihood};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

const SUBJECT_TAG: &str = "##subject##";
const BODY_TAG: &str = "##body##";

/// How tokens are namespaced during training and prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaggingLevel {
    /// Subject and body tokens share one namespace.
    #[default]
    None,
    /// Subject and body tokens are kept apart with `##subject##` /
    /// `##body##` prefixes.
    Fields,
}

impl std::fmt::Display for TaggingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaggingLevel::None => write!(f, "none"),
            TaggingLevel::Fields => write!(f, "fields"),
        }
    }
}

/// Naive Bayes model configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NaiveBayesConfig {
    /// Additive-smoothing constant, non-negative.
    pub alpha: f64,
    pub tagging: TaggingLevel,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        NaiveBayesConfig {
            alpha: 1.0,
            tagging: TaggingLevel::None,
        }
    }
}

/// A pair of per-label counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub spam: u64,
    pub ham: u64,
}

impl LabelCounts {
    pub fn get(&self, label: Label) -> u64 {
        match label {
            Label::Spam => self.spam,
            Label::Ham => self.ham,
        }
    }

    pub fn increment(&mut self, label: Label) {
        match label {
            Label::Spam => self.spam += 1,
            Label::Ham => self.ham += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.spam + self.ham
    }
}

/// A pair of per-label scores or probabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelScores {
    pub spam: f64,
    pub ham: f64,
}

impl LabelScores {
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Spam => self.spam,
            Label::Ham => self.ham,
        }
    }

    pub fn set(&mut self, label: Label, value: f64) {
        match label {
            Label::Spam => self.spam = value,
            Label::Ham => self.ham = value,
        }
    }

    /// The label with the larger score; a tie resolves to ham, the
    /// negative class.
    pub fn argmax(&self) -> Label {
        if self.spam > self.ham {
            Label::Spam
        } else {
            Label::Ham
        }
    }
}

/// Per-distinct-token state owned by one model instance.
///
/// Counts mutate monotonically during training; the likelihood cache is
/// filled by the batch pass after training.
#[derive(Debug, Clone, Default)]
struct TokenStats {
    count: LabelCounts,
    log_likelihood: LabelScores,
}

/// Multinomial Naive Bayes classifier for tokenized messages.
pub struct NaiveBayes {
    config: NaiveBayesConfig,
    tokens: HashMap<String, TokenStats>,
    message_counts: LabelCounts,
    token_counts: LabelCounts,
    priors: LabelScores,
    trace: Box<dyn ScoreTrace>,
}

impl NaiveBayes {
    /// An untrained model with the given configuration and no trace.
    pub fn new(config: NaiveBayesConfig) -> NaiveBayes {
        Self::with_trace(config, Box::new(NullTrace))
    }

    /// An untrained model reporting scoring progress to `trace`.
    pub fn with_trace(config: NaiveBayesConfig, trace: Box<dyn ScoreTrace>) -> NaiveBayes {
        NaiveBayes {
            config,
            tokens: HashMap::new(),
            message_counts: LabelCounts::default(),
            token_counts: LabelCounts::default(),
            priors: LabelScores::default(),
            trace,
        }
    }

    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    /// Number of distinct (possibly tagged) tokens in the model.
    pub fn vocabulary_len(&self) -> usize {
        self.tokens.len()
    }

    pub fn message_counts(&self) -> LabelCounts {
        self.message_counts
    }

    pub fn token_counts(&self) -> LabelCounts {
        self.token_counts
    }

    /// `P(label)` from the batch pass, or `None` if untrained.
    pub fn prior(&self, label: Label) -> Option<f64> {
        if self.message_counts.total() == 0 {
            None
        } else {
            Some(self.priors.get(label))
        }
    }

    /// Occurrences of `token` under `label` across training messages.
    pub fn token_count(&self, token: &str, label: Label) -> u64 {
        self.tokens
            .get(token)
            .map(|stats| stats.count.get(label))
            .unwrap_or(0)
    }

    /// Cached smoothed `ln P(token|label)`, or `None` for an unseen token.
    pub fn token_log_likelihood(&self, token: &str, label: Label) -> Option<f64> {
        self.tokens
            .get(token)
            .map(|stats| stats.log_likelihood.get(label))
    }

    /// Train on a batch of messages, then compute priors and likelihoods
    /// in one pass.
    ///
    /// May be called again with more messages; counts accumulate and the
    /// batch pass recomputes every derived probability.
    pub fn train(&mut self, messages: &[TokenizedMessage]) {
        for message in messages {
            self.observe(message);
        }
        self.calculate_priors();
        debug!(
            messages = self.message_counts.total(),
            vocabulary = self.tokens.len(),
            "naive bayes trained"
        );
    }

    fn observe(&mut self, message: &TokenizedMessage) {
        let label = message.label();
        self.message_counts.increment(label);

        // Each distinct token contributes at most once per message.
        for token in self.tagged_tokens(message) {
            let stats = self.tokens.entry(token).or_default();
            stats.count.increment(label);
            self.token_counts.increment(label);
        }
    }

    /// The batch pass: `P(label)` for each label, and the smoothed
    /// `P(token|label)` cache for every known token.
    fn calculate_priors(&mut self) {
        let total_messages = self.message_counts.total();
        if total_messages == 0 {
            return;
        }

        let alpha = self.config.alpha;
        // The denominator inflation scales with total observed token
        // occurrences across the whole model.
        let alpha_d = alpha * self.token_counts.total() as f64;
        let token_counts = self.token_counts;

        for label in Label::ALL {
            self.priors.set(
                label,
                self.message_counts.get(label) as f64 / total_messages as f64,
            );
        }

        for stats in self.tokens.values_mut() {
            for label in Label::ALL {
                stats.log_likelihood.set(
                    label,
                    smoothed_log_likelihood(
                        stats.count.get(label),
                        token_counts.get(label),
                        alpha,
                        alpha_d,
                    ),
                );
            }
        }
    }

    /// Score a token sequence against every trained label.
    ///
    /// Each label's score starts from `ln P(label)`, adds the smoothed
    /// log likelihood of every token known for that label, and is then
    /// negated, so the larger score wins. Scores are comparative, not
    /// normalized posteriors.
    pub fn predict_scores(&self, tokens: &[String]) -> Result<LabelScores> {
        let total_messages = self.message_counts.total();
        if total_messages == 0 {
            return Err(Error::ModelNotReady(
                "Naive Bayes has no training data".to_string(),
            ));
        }

        let mut scores = LabelScores::default();
        for label in Label::ALL {
            let mut accumulated = safe_ln(self.priors.get(label));
            for token in tokens {
                let Some(stats) = self.tokens.get(token) else {
                    continue;
                };
                // Unknown for this label: skipped entirely, not smoothed.
                if stats.count.get(label) == 0 {
                    continue;
                }
                let contribution = stats.log_likelihood.get(label);
                self.trace.token(token, label, contribution);
                accumulated += contribution;
            }
            scores.set(label, -accumulated);
        }
        Ok(scores)
    }

    /// The deduplicated, optionally field-tagged token sequence used for
    /// both training and prediction. Sorted, so scoring order (and the
    /// trace) is deterministic.
    fn tagged_tokens(&self, message: &TokenizedMessage) -> Vec<String> {
        match self.config.tagging {
            TaggingLevel::None => {
                let set: BTreeSet<String> = message.all_tokens().into_iter().collect();
                set.into_iter().collect()
            }
            TaggingLevel::Fields => {
                let subject: BTreeSet<String> = message
                    .subject_tokens
                    .iter()
                    .map(|t| format!("{SUBJECT_TAG}{t}"))
                    .collect();
                let body: BTreeSet<String> = message
                    .body_tokens
                    .iter()
                    .map(|t| format!("{BODY_TAG}{t}"))
                    .collect();
                subject.into_iter().chain(body).collect()
            }
        }
    }

    fn trained(&self, label: Label) -> bool {
        self.message_counts.get(label) > 0
    }
}

impl Classifier for NaiveBayes {
    fn predict(&self, message: &TokenizedMessage) -> Result<Label> {
        let scores = self.predict_scores(&self.tagged_tokens(message))?;

        // Restrict the argmax to labels that appeared in training; an
        // unseen label has prior 0 and its negated -inf score would
        // otherwise win vacuously.
        Ok(match (self.trained(Label::Spam), self.trained(Label::Ham)) {
            (true, true) => scores.argmax(),
            (true, false) => Label::Spam,
            (false, true) => Label::Ham,
            // predict_scores already failed with ModelNotReady.
            (false, false) => unreachable!("untrained model"),
        })
    }

    fn evaluate(&self, messages: &[TokenizedMessage]) -> Result<Evaluation> {
        let mut evaluation = Evaluation::default();
        let mut correct = LabelCounts::default();

        for message in messages {
            let actual = message.label();
            if !self.trained(actual) {
                return Err(Error::UnknownLabel {
                    label: actual.to_string(),
                });
            }
            let predicted = self.predict(message)?;
            self.trace.message(message.file_name(), predicted, actual);
            if predicted == actual {
                correct.increment(actual);
            }
            evaluation.record(message.file_name(), predicted, actual);
        }

        self.trace
            .label_summary(Label::Spam, correct.spam, evaluation.actual_spam);
        self.trace
            .label_summary(Label::Ham, correct.ham, evaluation.actual_ham);
        self.trace
            .overall(evaluation.matrix.correct(), evaluation.total());

        Ok(evaluation)
    }
}
