//! Mail Triage common types, labels, and errors.
//!
//! This crate provides foundational types shared across mt-core modules:
//! - The spam/ham label with its filename convention
//! - Parsed and tokenized message records
//! - Confusion-matrix counters and derived statistics
//! - Common error types with stable codes
//! - Output format specifications

pub mod error;
pub mod eval;
pub mod label;
pub mod message;
pub mod output;

pub use error::{Error, ErrorCategory, Result};
pub use eval::{ConfusionMatrix, Evaluation, EvaluationStats, MessageOutcome};
pub use label::Label;
pub use message::{Message, TokenizedMessage};
pub use output::OutputFormat;
