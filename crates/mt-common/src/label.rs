//! The spam/ham classification label.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Ground-truth or predicted class of a message.
///
/// Spam is the positive class throughout: confusion matrices and the
/// precision/recall statistics treat a spam prediction as a positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Spam,
    Ham,
}

impl Label {
    /// Derive the ground-truth label from the corpus filename convention:
    /// a name whose first character is `s` is spam, anything else is ham.
    pub fn from_file_name(file_name: &str) -> Label {
        if file_name.starts_with('s') {
            Label::Spam
        } else {
            Label::Ham
        }
    }

    /// True if this label is the positive (spam) class.
    pub fn is_spam(self) -> bool {
        self == Label::Spam
    }

    /// The other label.
    pub fn opposite(self) -> Label {
        match self {
            Label::Spam => Label::Ham,
            Label::Ham => Label::Spam,
        }
    }

    /// Both labels, spam first.
    pub const ALL: [Label; 2] = [Label::Spam, Label::Ham];
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Spam => f.pad("spam"),
            Label::Ham => f.pad("ham"),
        }
    }
}

impl std::str::FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Label> {
        match s.to_ascii_lowercase().as_str() {
            "spam" => Ok(Label::Spam),
            "ham" => Ok(Label::Ham),
            other => Err(Error::UnknownLabel {
                label: other.to_string(),
            }),
        }
    }
}
