//! The two classifiers and their shared interface.

pub mod bayes;
pub mod knn;
pub mod trace;

pub use bayes::{LabelScores, NaiveBayes, NaiveBayesConfig, TaggingLevel};
pub use knn::Knn;
pub use trace::{LogTrace, NullTrace, ScoreTrace};

use mt_common::{Evaluation, Label, Result, TokenizedMessage};

/// Common capability of the classifiers: predict one message, evaluate a
/// test corpus.
///
/// No shared state lives behind this trait; each implementation owns its
/// model outright.
pub trait Classifier {
    /// Predict the label of a single wrangled message.
    fn predict(&self, message: &TokenizedMessage) -> Result<Label>;

    /// Predict every message and accumulate the confusion matrix against
    /// the ground-truth labels.
    fn evaluate(&self, messages: &[TokenizedMessage]) -> Result<Evaluation> {
        let mut evaluation = Evaluation::default();
        for message in messages {
            let predicted = self.predict(message)?;
            evaluation.record(message.file_name(), predicted, message.label());
        }
        Ok(evaluation)
    }
}
