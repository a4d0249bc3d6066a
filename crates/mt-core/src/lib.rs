//! Mail Triage Core Library
//!
//! This library provides the core functionality for mail triage:
//! - Tokenization and wrangling of parsed messages
//! - Corpus loading from directories of message files
//! - The KNN and Naive Bayes classifiers
//! - Exit codes for CLI operations
//!
//! The binary entry point is in `main.rs`.

pub mod classify;
pub mod corpus;
pub mod exit_codes;
pub mod logging;
pub mod tokenize;
