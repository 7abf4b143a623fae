//! Corpus sources.
//!
//! The Polish Parliamentary Corpus is distributed as a (gzipped) tar container
//! holding one JSON file per document.
mod record;
pub mod tarball;

pub use record::{Record, RecordMetadata};
pub use tarball::{Records, Tarball};
