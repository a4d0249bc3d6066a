//! Parsed and tokenized message records.
//!
//! A [`Message`] is the immutable result of parsing one corpus file; a
//! [`TokenizedMessage`] composes a message with the token lists derived
//! from it by the wrangling pipeline. Token lists are rebuilt wholesale by
//! each pipeline stage, never patched in place.

use crate::error::{Error, Result};
use crate::label::Label;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The literal prefix stripped from the first line of a corpus file.
const SUBJECT_PREFIX: &str = "Subject: ";

/// Data and metadata from one parsed email message.
///
/// The label is derived once, at construction, from the filename
/// convention and is treated as ground truth from then on. It is never
/// inferred from content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    file_name: String,
    subject: String,
    body: Vec<String>,
    label: Label,
}

impl Message {
    /// Build a message directly from its parts. The label is derived from
    /// the file name.
    pub fn new(file_name: impl Into<String>, subject: impl Into<String>, body: Vec<String>) -> Message {
        let file_name = file_name.into();
        let label = Label::from_file_name(&file_name);
        Message {
            file_name,
            subject: subject.into(),
            body,
            label,
        }
    }

    /// Parse the raw text of one corpus file.
    ///
    /// The first line is the subject (with the `Subject: ` prefix
    /// stripped when present); a single blank separator line after it is
    /// dropped; everything else is the body. An empty file has no subject
    /// line and is malformed.
    pub fn parse(file_name: impl Into<String>, text: &str) -> Result<Message> {
        let file_name = file_name.into();
        let mut lines = text.lines();

        let first = lines.next().ok_or_else(|| Error::MalformedMessage {
            file_name: file_name.clone(),
            reason: "empty file, missing subject line".to_string(),
        })?;
        let subject = first.strip_prefix(SUBJECT_PREFIX).unwrap_or(first).to_string();

        let mut body: Vec<String> = lines.map(str::to_string).collect();
        if body.first().is_some_and(|line| line.trim().is_empty()) {
            body.remove(0);
        }

        Ok(Message::new(file_name, subject, body))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn is_spam(&self) -> bool {
        self.label.is_spam()
    }
}

/// A message plus the token lists derived from it.
///
/// The token fields are replaced wholesale by each wrangling stage
/// (tokenize, lowercase, stop-word filter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedMessage {
    message: Message,
    pub subject_tokens: Vec<String>,
    pub body_tokens: Vec<String>,
}

impl TokenizedMessage {
    pub fn new(message: Message, subject_tokens: Vec<String>, body_tokens: Vec<String>) -> Self {
        TokenizedMessage {
            message,
            subject_tokens,
            body_tokens,
        }
    }

    /// The underlying immutable message.
    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn file_name(&self) -> &str {
        self.message.file_name()
    }

    pub fn label(&self) -> Label {
        self.message.label()
    }

    pub fn is_spam(&self) -> bool {
        self.message.is_spam()
    }

    /// The deduplicated union of subject and body tokens.
    pub fn all_tokens(&self) -> HashSet<String> {
        self.subject_tokens
            .iter()
            .chain(self.body_tokens.iter())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_subject_prefix_and_separator() {
        let text = "Subject: cheap meds today\n\nbuy now\nwhile stocks last\n";
        let msg = Message::parse("s001.txt", text).unwrap();
        assert_eq!(msg.subject(), "cheap meds today");
        assert_eq!(msg.body(), ["buy now", "while stocks last"]);
        assert_eq!(msg.label(), Label::Spam);
    }

    #[test]
    fn parse_tolerates_missing_prefix() {
        let msg = Message::parse("h001.txt", "meeting notes\n\nagenda attached\n").unwrap();
        assert_eq!(msg.subject(), "meeting notes");
        assert_eq!(msg.body(), ["agenda attached"]);
        assert!(!msg.is_spam());
    }

    #[test]
    fn parse_keeps_body_when_separator_absent() {
        let msg = Message::parse("h002.txt", "Subject: hi\nfirst body line\n").unwrap();
        assert_eq!(msg.body(), ["first body line"]);
    }

    #[test]
    fn parse_rejects_empty_file() {
        let err = Message::parse("s009.txt", "").unwrap_err();
        assert_eq!(err.code(), 10);
        assert!(err.to_string().contains("s009.txt"));
    }

    #[test]
    fn all_tokens_is_duplicate_free_union() {
        let msg = Message::new("h003.txt", "a b", vec![]);
        let tk = TokenizedMessage::new(
            msg,
            vec!["free".into(), "money".into()],
            vec!["money".into(), "now".into(), "money".into()],
        );
        let all = tk.all_tokens();
        assert_eq!(all.len(), 3);
        assert!(all.contains("free") && all.contains("money") && all.contains("now"));
    }
}
