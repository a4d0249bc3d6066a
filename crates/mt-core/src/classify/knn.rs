//! K-Nearest-Neighbors classification of tokenized messages.
//!
//! Exact brute force: every query computes its similarity to every
//! training message (O(n) per query, O(n log n) for the sort), which is
//! the intended design for corpora of tens to low thousands of messages.

use crate::classify::Classifier;
use mt_common::{Error, Label, Result, TokenizedMessage};
use mt_math::token_set_similarity;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// One retained training message with its precomputed token set.
struct TrainingExample {
    file_name: String,
    label: Label,
    tokens: HashSet<String>,
}

/// Cosine-similarity KNN classifier over binary token vectors.
pub struct Knn {
    k: usize,
    training: Vec<TrainingExample>,
}

impl Knn {
    /// Build a classifier holding a fixed training set.
    pub fn new(training: Vec<TokenizedMessage>, k: usize) -> Knn {
        let training = training
            .into_iter()
            .map(|message| TrainingExample {
                file_name: message.file_name().to_string(),
                label: message.label(),
                tokens: message.all_tokens(),
            })
            .collect();
        Knn { k, training }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn training_len(&self) -> usize {
        self.training.len()
    }

    /// Similarity of the query to every training message, sorted
    /// descending. Equal similarities order by training file name so the
    /// neighbor ranking is deterministic.
    fn ranked_neighbors(&self, query: &HashSet<String>) -> Vec<(f64, &TrainingExample)> {
        let mut ranked: Vec<(f64, &TrainingExample)> = self
            .training
            .iter()
            .map(|example| (token_set_similarity(query, &example.tokens), example))
            .collect();
        ranked.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.file_name.cmp(&b.1.file_name))
        });
        ranked
    }
}

impl Classifier for Knn {
    fn predict(&self, message: &TokenizedMessage) -> Result<Label> {
        if self.training.is_empty() {
            return Err(Error::ModelNotReady(
                "KNN has an empty training set".to_string(),
            ));
        }

        let query = message.all_tokens();
        let ranked = self.ranked_neighbors(&query);

        // Strict majority over the top k. Integer division floors the
        // threshold, so odd k is always decisive and an exact half vote
        // for even k stays ham.
        let threshold = self.k / 2;
        let votes_for_spam = ranked
            .iter()
            .take(self.k)
            .filter(|(_, example)| example.label.is_spam())
            .count();

        let predicted = if votes_for_spam > threshold {
            Label::Spam
        } else {
            Label::Ham
        };

        debug!(
            file = message.file_name(),
            votes_for_spam,
            k = self.k,
            predicted = %predicted,
            "knn vote"
        );

        Ok(predicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_common::Message;

    fn tokenized(file_name: &str, tokens: &[&str]) -> TokenizedMessage {
        let message = Message::new(file_name, "", vec![]);
        TokenizedMessage::new(
            message,
            vec![],
            tokens.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[test]
    fn k1_predicts_label_of_nearest_neighbor() {
        let training = vec![
            tokenized("s001", &["free", "money", "now"]),
            tokenized("h001", &["meeting", "agenda", "monday"]),
        ];
        let knn = Knn::new(training, 1);

        let spammy = tokenized("query1", &["free", "money"]);
        assert_eq!(knn.predict(&spammy).unwrap(), Label::Spam);

        let hammy = tokenized("query2", &["meeting", "monday"]);
        assert_eq!(knn.predict(&hammy).unwrap(), Label::Ham);
    }

    #[test]
    fn identical_query_tops_ranking_with_similarity_one() {
        let training = vec![
            tokenized("h001", &["alpha", "beta"]),
            tokenized("s002", &["free", "prize", "claim"]),
            tokenized("h003", &["gamma", "delta"]),
            tokenized("s004", &["free", "meds"]),
            tokenized("h005", &["status", "report"]),
        ];
        let knn = Knn::new(training, 3);

        // Token-identical to training message s002; s004 shares "free",
        // so the top 3 carry two spam votes and the strict majority holds.
        let query = tokenized("query", &["free", "prize", "claim"]);
        let ranked = knn.ranked_neighbors(&query.all_tokens());
        assert_eq!(ranked[0].1.file_name, "s002");
        assert!((ranked[0].0 - 1.0).abs() < 1e-12);
        assert_eq!(ranked[1].1.file_name, "s004");

        assert_eq!(knn.predict(&query).unwrap(), Label::Spam);
    }

    #[test]
    fn lone_perfect_match_cannot_outvote_two_closer_labels() {
        // Similarity never weights the vote: one 1.0 spam neighbor among
        // two 0.0 ham neighbors is still a 1-of-3 minority.
        let training = vec![
            tokenized("h001", &["alpha", "beta"]),
            tokenized("s002", &["free", "prize", "claim"]),
            tokenized("h003", &["gamma", "delta"]),
        ];
        let knn = Knn::new(training, 3);
        let query = tokenized("query", &["free", "prize", "claim"]);
        assert_eq!(knn.predict(&query).unwrap(), Label::Ham);
    }

    #[test]
    fn even_k_exact_half_votes_stays_ham() {
        // k=2 with one spam and one ham neighbor: 1 vote is not > 2/2.
        let training = vec![
            tokenized("s001", &["free", "shared"]),
            tokenized("h001", &["work", "shared"]),
        ];
        let knn = Knn::new(training, 2);
        let query = tokenized("query", &["shared"]);
        assert_eq!(knn.predict(&query).unwrap(), Label::Ham);
    }

    #[test]
    fn similarity_ties_break_by_file_name() {
        // Both training messages are equally similar to the query; with
        // k=1 the lexicographically smaller file name wins.
        let training = vec![
            tokenized("s_tie", &["shared", "one"]),
            tokenized("h_tie", &["shared", "two"]),
        ];
        let knn = Knn::new(training, 1);
        let query = tokenized("query", &["shared"]);
        assert_eq!(knn.predict(&query).unwrap(), Label::Ham);
    }

    #[test]
    fn zero_token_query_is_dissimilar_to_everything() {
        let training = vec![
            tokenized("s001", &["free"]),
            tokenized("s002", &["prize"]),
            tokenized("h001", &["agenda"]),
        ];
        let knn = Knn::new(training, 3);
        let query = tokenized("query", &[]);
        // All similarities are 0.0; the top 3 are 2 spam + 1 ham, and a
        // strict majority of spam votes still predicts spam.
        assert_eq!(knn.predict(&query).unwrap(), Label::Spam);
    }

    #[test]
    fn empty_training_set_is_model_not_ready() {
        let knn = Knn::new(vec![], 3);
        let query = tokenized("query", &["free"]);
        let err = knn.predict(&query).unwrap_err();
        assert_eq!(err.code(), 20);
    }

    #[test]
    fn evaluate_accumulates_confusion_matrix() {
        let training = vec![
            tokenized("s001", &["free", "money"]),
            tokenized("s002", &["win", "prize"]),
            tokenized("h001", &["meeting", "agenda"]),
            tokenized("h002", &["lunch", "friday"]),
        ];
        let knn = Knn::new(training, 1);

        let test = vec![
            tokenized("s101", &["free", "money"]),
            tokenized("h101", &["meeting", "agenda"]),
            tokenized("h102", &["win", "prize"]), // ham that looks like spam
        ];
        let eval = knn.evaluate(&test).unwrap();
        assert_eq!(eval.total(), 3);
        assert_eq!(eval.matrix.tp, 1);
        assert_eq!(eval.matrix.tn, 1);
        assert_eq!(eval.matrix.fp, 1);
        assert_eq!(eval.matrix.fn_, 0);
    }
}
