//! Post-processing of produced corpora.
pub mod check;

pub use check::{check, Mismatch, Report};
