//! Mail Triage math utilities.

pub mod math;

pub use math::similarity::*;
pub use math::stable::*;
