//! The wrangling pipeline: tokenize, normalize, filter stop words.
//!
//! Each stage rebuilds the token lists wholesale; nothing mutates a list
//! while iterating it. The historical implementation deleted stop words by
//! index during an ascending scan, which skipped the element following
//! every removal; the contract here is full removal.

pub mod stopwords;

pub use stopwords::{is_stop_word, DEFAULT_STOP_WORDS};

use mt_common::{Message, TokenizedMessage};
use std::collections::HashSet;
use tracing::debug;

/// Tokenizer behavior switches, passed explicitly per call.
#[derive(Debug, Clone, Copy)]
pub struct TokenizerConfig {
    /// Remove duplicate tokens within the subject and within each body
    /// line (per-line, not pipeline-wide).
    pub remove_duplicates: bool,

    /// Filter tokens against [`DEFAULT_STOP_WORDS`] after normalization.
    pub remove_stop_words: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            remove_duplicates: true,
            remove_stop_words: false,
        }
    }
}

/// Split the subject and body of a message into whitespace-delimited
/// tokens.
///
/// With `remove_duplicates` set, duplicates are dropped independently
/// within the subject and within each body line before body tokens are
/// concatenated, preserving first-seen order.
pub fn tokenize(message: &Message, config: &TokenizerConfig) -> TokenizedMessage {
    let subject_tokens = split_tokens(message.subject(), config.remove_duplicates);

    let mut body_tokens = Vec::new();
    for line in message.body() {
        body_tokens.extend(split_tokens(line, config.remove_duplicates));
    }

    TokenizedMessage::new(message.clone(), subject_tokens, body_tokens)
}

/// Lowercase every token in both fields. Idempotent.
pub fn lowercase(message: &mut TokenizedMessage) {
    message.subject_tokens = message
        .subject_tokens
        .iter()
        .map(|t| t.to_lowercase())
        .collect();
    message.body_tokens = message
        .body_tokens
        .iter()
        .map(|t| t.to_lowercase())
        .collect();
}

/// Remove every stop-word token from both fields.
pub fn remove_stop_words(message: &mut TokenizedMessage) {
    let before = message.subject_tokens.len() + message.body_tokens.len();
    message.subject_tokens.retain(|t| !is_stop_word(t));
    message.body_tokens.retain(|t| !is_stop_word(t));
    let after = message.subject_tokens.len() + message.body_tokens.len();
    debug!(
        file = message.file_name(),
        removed = before - after,
        "removed stop words"
    );
}

/// Run the full wrangling pipeline over a set of parsed messages:
/// tokenize, lowercase, then (if configured) filter stop words.
pub fn wrangle(messages: &[Message], config: &TokenizerConfig) -> Vec<TokenizedMessage> {
    messages
        .iter()
        .map(|message| {
            let mut tokenized = tokenize(message, config);
            lowercase(&mut tokenized);
            if config.remove_stop_words {
                remove_stop_words(&mut tokenized);
            }
            tokenized
        })
        .collect()
}

fn split_tokens(text: &str, remove_duplicates: bool) -> Vec<String> {
    let tokens = text.split_whitespace().map(str::to_string);
    if remove_duplicates {
        let mut seen = HashSet::new();
        tokens.filter(|t| seen.insert(t.clone())).collect()
    } else {
        tokens.collect()
    }
}
