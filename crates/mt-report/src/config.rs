//! Report configuration.

use serde::{Deserialize, Serialize};

/// Configuration for report rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report title. Defaults to a title derived from the algorithm name.
    pub title: Option<String>,

    /// Include the per-message outcome table.
    pub include_messages: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            title: None,
            include_messages: true,
        }
    }
}

impl ReportConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn without_messages(mut self) -> Self {
        self.include_messages = false;
        self
    }
}
