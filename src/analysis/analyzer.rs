//! Analyzer trait and its inputs/outputs.
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Texts longer than this get a raised limit, sized to the text.
pub const RAISE_THRESHOLD: usize = 100_000;

/// Margin added to the text length when raising the limit.
pub const LENGTH_MARGIN: usize = 100;

/// Linguistic counts for a single text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub sentences: u64,
    pub words: u64,
    pub verbs: u64,
    pub nouns: u64,
    pub punctuations: u64,
    pub symbols: u64,
    pub stopwords: u64,
}

/// Per-call analysis limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum text length, in characters.
    pub max_length: usize,
}

impl Limits {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Compute the limits to use for a text of `length` characters.
    ///
    /// Texts over [RAISE_THRESHOLD] get a limit of `length + LENGTH_MARGIN`,
    /// other ones keep `default`.
    pub fn for_length(length: usize, default: Limits) -> Self {
        if length > RAISE_THRESHOLD {
            Self {
                max_length: length.saturating_add(LENGTH_MARGIN).max(default.max_length),
            }
        } else {
            default
        }
    }
}

/// Linguistic analysis capability.
///
/// Analyzers are stateful and expensive to build:
/// each worker builds its own and keeps it for its whole lifetime.
pub trait Analyze {
    /// Limits used when the text does not require raising them.
    fn default_limits(&self) -> Limits;

    /// Analyze `text`.
    ///
    /// Empty text yields an all-zero [Analysis].
    /// Fails with [Error::AnalyzerCapacityExceeded] if the text is too long for `limits`,
    /// or for the analyzer itself.
    fn analyze(&mut self, text: &str, limits: Limits) -> Result<Analysis, Error>;
}
