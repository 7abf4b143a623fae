/*! Linguistic analysis

Holds the [Analyze] trait, implemented by analyzers used in the processing workers.

The bundled analyzer is a rule-based Polish one ([PolishAnalyzer]), that needs no model files.
!*/
mod analyzer;
pub mod polish;
pub mod stopwords;
pub mod tagger;

pub use analyzer::{Analysis, Analyze, Limits, LENGTH_MARGIN, RAISE_THRESHOLD};
pub use polish::{PolishAnalyzer, PolishAnalyzerBuilder};
