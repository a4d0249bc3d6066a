//! Classification report rendering for mail triage runs.
//!
//! Renders an evaluation (confusion matrix, statistics block, optional
//! per-message table) as plain text, Markdown, or JSON. Rendering is a
//! presentation concern layered on top of the structured
//! [`mt_common::Evaluation`] result; it never recomputes statistics.
//!
//! # Example
//!
//! ```
//! use mt_report::{ReportConfig, ReportData, ReportGenerator};
//! use mt_common::{Evaluation, Label, OutputFormat};
//!
//! let mut eval = Evaluation::default();
//! eval.record("s001.txt", Label::Spam, Label::Spam);
//! let data = ReportData::new("knn", eval);
//! let generator = ReportGenerator::new(ReportConfig::default());
//! let text = generator.render(&data, OutputFormat::Text).unwrap();
//! assert!(text.contains("CONFUSION MATRIX"));
//! ```

pub mod config;
pub mod error;
pub mod generator;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use generator::{ReportData, ReportGenerator};
