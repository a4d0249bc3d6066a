//! Core math modules.

pub mod similarity;
pub mod stable;
