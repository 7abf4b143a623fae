//! Document processing: from a raw [Record] to normalized text and statistics.
use log::warn;
use serde::{Deserialize, Serialize};

use crate::analysis::{Analysis, Analyze, Limits};
use crate::error::Error;
use crate::sources::Record;

/// Per-document statistics.
///
/// This is what is stored alongside the text in the archive, field order included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatistics {
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub length: u64,
    pub sentences: u64,
    pub words: u64,
    pub verbs: u64,
    pub nouns: u64,
    pub punctuations: u64,
    pub symbols: u64,
    pub stopwords: u64,
}

impl DocumentStatistics {
    fn new(publisher: Option<String>, title: Option<String>, length: u64, a: Analysis) -> Self {
        Self {
            publisher,
            title,
            length,
            sentences: a.sentences,
            words: a.words,
            verbs: a.verbs,
            nouns: a.nouns,
            punctuations: a.punctuations,
            symbols: a.symbols,
            stopwords: a.stopwords,
        }
    }
}

/// A processed document: trimmed text and its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub text: String,
    pub statistics: DocumentStatistics,
}

/// Process a record using the provided analyzer.
///
/// Texts that are too long for the analyzer are kept, with zeroed linguistic statistics.
/// Other analyzer errors are returned.
pub fn process<A: Analyze>(record: &Record, analyzer: &mut A) -> Result<Processed, Error> {
    let text = record.text().trim();
    let length = text.chars().count();

    let limits = Limits::for_length(length, analyzer.default_limits());
    let analysis = match analyzer.analyze(text, limits) {
        Ok(analysis) => analysis,
        Err(Error::AnalyzerCapacityExceeded { length, max_length }) => {
            warn!(
                "{}: text too long ({} > {}), statistics zeroed",
                record.metadata().title().unwrap_or("<untitled>"),
                length,
                max_length
            );
            Analysis::default()
        }
        Err(e) => return Err(e),
    };

    let metadata = record.metadata();
    let statistics = DocumentStatistics::new(
        metadata.publisher().map(String::from),
        metadata.title().map(String::from),
        length as u64,
        analysis,
    );

    Ok(Processed {
        text: text.to_string(),
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use crate::analysis::PolishAnalyzerBuilder;
    use crate::sources::RecordMetadata;

    use super::*;

    fn record(text: &str, publisher: &str, title: Option<&str>) -> Record {
        Record::new(
            Some(text.to_string()),
            RecordMetadata::new(Some(publisher.to_string()), title.map(String::from)),
        )
    }

    #[test]
    fn trimmed_length() {
        let mut a = PolishAnalyzerBuilder::default().build().unwrap();
        let r = record("\n  Zażółć gęślą jaźń.  \t", "Sejm", Some("T"));
        let p = process(&r, &mut a).unwrap();

        assert_eq!(p.text, "Zażółć gęślą jaźń.");
        // chars, not bytes
        assert_eq!(p.statistics.length, 18);
        assert_eq!(p.statistics.publisher.as_deref(), Some("Sejm"));
        assert_eq!(p.statistics.title.as_deref(), Some("T"));
    }

    #[test]
    fn empty_text() {
        let mut a = PolishAnalyzerBuilder::default().build().unwrap();
        for text in &["", "   ", "\n\n\t"] {
            let r = record(text, "Senat", None);
            let p = process(&r, &mut a).unwrap();
            assert_eq!(p.text, "");
            assert_eq!(
                p.statistics,
                DocumentStatistics {
                    publisher: Some("Senat".to_string()),
                    ..Default::default()
                }
            );
        }
    }

    #[test]
    fn too_long_text_is_zeroed() {
        let mut a = PolishAnalyzerBuilder::default()
            .max_length(10)
            .ceiling(10)
            .build()
            .unwrap();
        let r = record("To jest zbyt długi tekst.", "Sejm", None);
        let p = process(&r, &mut a).unwrap();

        assert_eq!(p.statistics.length, 25);
        assert_eq!(p.statistics.words, 0);
        assert_eq!(p.statistics.sentences, 0);
    }

    #[test]
    fn serialized_field_order() {
        let stats = DocumentStatistics {
            publisher: Some("Sejm".to_string()),
            title: None,
            length: 1,
            ..Default::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(
            json,
            r#"{"publisher":"Sejm","title":null,"length":1,"sentences":0,"words":0,"verbs":0,"nouns":0,"punctuations":0,"symbols":0,"stopwords":0}"#
        );
    }
}
