//! Consistency check of a produced corpus.
//!
//! Statistics are recomputed from the metadata stored in the archive,
//! then compared with the ones of the manifest, along with the archive size.
use std::fmt;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::Error;
use crate::io::{ArchiveReader, Entry};
use crate::manifest::Manifest;
use crate::pipelines::ppc::{CorpusAccumulator, DocumentStatistics};

/// A value that differs between the manifest and the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub field: &'static str,
    pub manifest: u64,
    pub archive: u64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: manifest says {}, archive has {}",
            self.field, self.manifest, self.archive
        )
    }
}

/// Result of a check.
#[derive(Debug)]
pub struct Report {
    pub stats: CorpusAccumulator,
    pub file_size: u64,
    pub mismatches: Vec<Mismatch>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Recompute statistics from `archive` and compare them with `manifest`.
pub fn check(archive: &Path, manifest: &Path) -> Result<Report, Error> {
    let manifest = Manifest::read(manifest)?;
    let file_size = std::fs::metadata(archive)?.len();

    let mut stats = CorpusAccumulator::default();
    for entry in ArchiveReader::<DocumentStatistics>::open(archive)? {
        let Entry { meta, .. } = entry?;
        stats.add(&meta);
    }
    debug!("recomputed statistics: {:?}", stats);

    let expected = &manifest.stats;
    let mut mismatches = Vec::new();
    let mut compare = |field, in_manifest: u64, in_archive: u64| {
        if in_manifest != in_archive {
            mismatches.push(Mismatch {
                field,
                manifest: in_manifest,
                archive: in_archive,
            });
        }
    };
    compare("file_size", manifest.file_size, file_size);
    compare("documents", expected.documents, stats.documents);
    compare("sentences", expected.sentences, stats.sentences);
    compare("words", expected.words, stats.words);
    compare("nouns", expected.nouns, stats.nouns);
    compare("verbs", expected.verbs, stats.verbs);
    compare("characters", expected.characters, stats.characters);
    compare("punctuations", expected.punctuations, stats.punctuations);
    compare("symbols", expected.symbols, stats.symbols);
    compare("stopwords", expected.stopwords, stats.stopwords);

    if mismatches.is_empty() {
        info!("{:?} is consistent with its manifest", archive);
    } else {
        for m in &mismatches {
            warn!("{}", m);
        }
    }

    Ok(Report {
        stats,
        file_size,
        mismatches,
    })
}
