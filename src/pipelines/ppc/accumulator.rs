//! Corpus-wide statistics and the sink that feeds them.
use std::path::Path;

use log::{error, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::io::ArchiveWriter;

use super::config::ErrorPolicy;
use super::document::{DocumentStatistics, Processed};

/// Running sums of document statistics.
///
/// Sums are order-independent, so documents can be added in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CorpusAccumulator {
    pub documents: u64,
    pub sentences: u64,
    pub words: u64,
    pub nouns: u64,
    pub verbs: u64,
    pub characters: u64,
    pub punctuations: u64,
    pub symbols: u64,
    pub stopwords: u64,
}

impl CorpusAccumulator {
    /// Add a document.
    pub fn add(&mut self, stats: &DocumentStatistics) {
        self.documents += 1;
        self.sentences += stats.sentences;
        self.words += stats.words;
        self.nouns += stats.nouns;
        self.verbs += stats.verbs;
        self.characters += stats.length;
        self.punctuations += stats.punctuations;
        self.symbols += stats.symbols;
        self.stopwords += stats.stopwords;
    }
}

/// Consumes processing results, updating the [CorpusAccumulator] and writing documents into the archive.
///
/// Sole owner of both the accumulator and the archive writer.
pub struct Aggregator {
    accumulator: CorpusAccumulator,
    archive: ArchiveWriter,
    policy: ErrorPolicy,
    failed: u64,
}

impl Aggregator {
    pub fn new(archive: ArchiveWriter, policy: ErrorPolicy) -> Self {
        Self {
            accumulator: CorpusAccumulator::default(),
            archive,
            policy,
            failed: 0,
        }
    }

    /// Create an aggregator writing into a new archive at `dst`.
    pub fn create(dst: &Path, policy: ErrorPolicy) -> Result<Self, Error> {
        Ok(Self::new(ArchiveWriter::create(dst)?, policy))
    }

    /// Consume a processing result.
    ///
    /// Failures are counted and skipped, unless policy is [ErrorPolicy::Abort].
    pub fn consume(&mut self, result: Result<Processed, Error>) -> Result<(), Error> {
        match result {
            Ok(processed) => self.add(processed),
            Err(e) => match self.policy {
                ErrorPolicy::Abort => {
                    error!("document processing failed: {:?}", e);
                    Err(e)
                }
                ErrorPolicy::Skip => {
                    warn!("skipping document: {:?}", e);
                    self.failed += 1;
                    Ok(())
                }
            },
        }
    }

    /// Add a processed document to both the accumulator and the archive.
    pub fn add(&mut self, processed: Processed) -> Result<(), Error> {
        let Processed { text, statistics } = processed;
        self.archive.add(&text, &statistics)?;
        self.accumulator.add(&statistics);

        match &statistics.title {
            Some(title) => info!("Added {}", title),
            None => info!("Added..."),
        }
        Ok(())
    }

    pub fn accumulator(&self) -> &CorpusAccumulator {
        &self.accumulator
    }

    /// Number of documents that failed and were skipped.
    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// Commit the archive.
    ///
    /// Returns the final statistics and the archive size on disk.
    pub fn finish(self) -> Result<(CorpusAccumulator, u64), Error> {
        if self.failed > 0 {
            warn!("{} documents failed and were skipped", self.failed);
        }
        let file_size = self.archive.commit()?;
        Ok((self.accumulator, file_size))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    use crate::io::{ArchiveReader, Entry};

    use super::*;

    fn stats(title: Option<&str>, length: u64, words: u64) -> DocumentStatistics {
        DocumentStatistics {
            publisher: Some("Sejm".to_string()),
            title: title.map(String::from),
            length,
            sentences: 1,
            words,
            verbs: 1,
            nouns: 2,
            punctuations: 3,
            symbols: 0,
            stopwords: words / 2,
        }
    }

    fn documents(n: u64) -> Vec<Processed> {
        (0..n)
            .map(|i| Processed {
                text: "x".repeat(i as usize),
                statistics: stats(Some(format!("doc {}", i).as_str()), i, i * 3),
            })
            .collect()
    }

    #[test]
    fn sums() {
        let mut acc = CorpusAccumulator::default();
        for doc in documents(10) {
            acc.add(&doc.statistics);
        }

        assert_eq!(acc.documents, 10);
        assert_eq!(acc.characters, (0..10).sum::<u64>());
        assert_eq!(acc.words, (0..10).map(|i| i * 3).sum::<u64>());
        assert_eq!(acc.sentences, 10);
        assert_eq!(acc.punctuations, 30);
    }

    #[test]
    fn order_independent() {
        let docs = documents(100);
        let mut reference = CorpusAccumulator::default();
        docs.iter().for_each(|d| reference.add(&d.statistics));

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let mut shuffled = docs.clone();
            shuffled.shuffle(&mut rng);
            let mut acc = CorpusAccumulator::default();
            shuffled.iter().for_each(|d| acc.add(&d.statistics));
            assert_eq!(acc, reference);
        }
    }

    #[test]
    fn aggregator_writes_archive() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("corpus.jsonl.zst");

        let mut agg = Aggregator::create(&dst, ErrorPolicy::Abort).unwrap();
        for doc in documents(5) {
            agg.consume(Ok(doc)).unwrap();
        }
        agg.consume(Ok(Processed {
            text: String::new(),
            statistics: stats(None, 0, 0),
        }))
        .unwrap();

        let (acc, size) = agg.finish().unwrap();
        assert_eq!(acc.documents, 6);
        assert_eq!(size, std::fs::metadata(&dst).unwrap().len());

        let entries: Vec<Entry<DocumentStatistics>> = ArchiveReader::open(&dst)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[5].meta.title, None);
        assert_eq!(entries[3].text, "xxx");
        assert_eq!(entries[3].meta.length, 3);
    }

    #[test]
    fn abort_policy() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("corpus.jsonl.zst");

        let mut agg = Aggregator::create(&dst, ErrorPolicy::Abort).unwrap();
        let res = agg.consume(Err(Error::WorkerPanic {
            message: "boom".to_string(),
        }));
        assert!(res.is_err());

        // dropping without finishing leaves no archive
        drop(agg);
        assert!(!dst.exists());
    }

    #[test]
    fn skip_policy() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("corpus.jsonl.zst");

        let mut agg = Aggregator::create(&dst, ErrorPolicy::Skip).unwrap();
        for doc in documents(3) {
            agg.consume(Ok(doc)).unwrap();
        }
        agg.consume(Err(Error::WorkerPanic {
            message: "boom".to_string(),
        }))
        .unwrap();

        assert_eq!(agg.failed(), 1);
        assert_eq!(agg.accumulator().documents, 3);
        let (acc, _) = agg.finish().unwrap();
        assert_eq!(acc.documents, 3);
    }
}
