//! PPC pipeline
//!
//! Reads the records of the PPC container, computes statistics for each one on a pool of workers,
//! writes texts and statistics into a compressed archive and finally writes the corpus manifest.
//!
//! # Processing
//! 1. A producer thread reads records lazily from the container and feeds them to the pool.
//! 1. Each worker builds its own analyzer, then trims and analyzes the records it receives.
//! 1. Results are consumed on the calling thread, in completion order: statistics are summed and
//!    documents are appended to the archive.
//! 1. Once every record is processed, the archive is committed and the manifest is written.
//!
//! If the run fails, neither the archive nor the manifest are left behind.
use log::{debug, info, warn};

use crate::analysis::{PolishAnalyzer, PolishAnalyzerBuilder};
use crate::error::Error;
use crate::manifest::Manifest;
use crate::pipelines::pipeline::Pipeline;
use crate::sources::{Record, Tarball};

use super::accumulator::Aggregator;
use super::config::{ErrorPolicy, PipelineConfig};
use super::document::process;
use super::pool::{Feeder, WorkerPool};

pub struct PpcPipeline {
    config: PipelineConfig,
}

impl PpcPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn pool(&self) -> WorkerPool {
        let workers = self
            .config
            .workers
            .unwrap_or_else(|| WorkerPool::default().workers());
        let queue_depth = self.config.queue_depth.unwrap_or(2 * workers);
        WorkerPool::new(workers, queue_depth)
    }

    fn build_analyzer(&self, id: usize) -> Result<PolishAnalyzer, Error> {
        let mut builder = PolishAnalyzerBuilder::default();
        if let Some(max_length) = self.config.max_length {
            builder.max_length(max_length);
        }
        if let Some(path) = &self.config.stopwords {
            builder.stopwords(path);
        }
        let analyzer = builder.build()?;
        debug!("[worker {}] analyzer ready", id);
        Ok(analyzer)
    }

    /// Feed the records of the container to the pool.
    ///
    /// Malformed records stop the run unless policy is [ErrorPolicy::Skip].
    fn produce(&self, feeder: &Feeder<Record>) -> Result<(), Error> {
        let mut tarball = Tarball::from_path(&self.config.src)?;
        let mut skipped = 0;
        for record in tarball.records()? {
            let record = match record {
                Ok(record) => record,
                Err(e @ Error::MalformedRecord { .. }) if self.config.on_error == ErrorPolicy::Skip => {
                    warn!("{}", e);
                    skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !feeder.feed(record) {
                debug!("pool stopped accepting records");
                break;
            }
        }

        if skipped > 0 {
            warn!("{} malformed records skipped", skipped);
        }
        Ok(())
    }
}

impl Pipeline<Manifest> for PpcPipeline {
    fn run(&self) -> Result<Manifest, Error> {
        let pool = self.pool();
        let mut aggregator = Aggregator::create(&self.config.archive, self.config.on_error)?;

        info!("processing {:?}", self.config.src);
        let nb_results = pool.run(
            |feeder| self.produce(feeder),
            |id| self.build_analyzer(id),
            |analyzer, record: Record| process(&record, analyzer),
            |result| aggregator.consume(result),
        )?;
        debug!("{} results received", nb_results);

        let (stats, file_size) = aggregator.finish()?;
        let manifest = Manifest::build(&stats, file_size);
        manifest.write(&self.config.manifest)?;

        info!(
            "{} documents, {} characters, archive is {} bytes",
            stats.documents, stats.characters, file_size
        );
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use crate::sources::tarball::tests::build_tar;

    use super::*;

    fn config(dir: &std::path::Path) -> PipelineConfig {
        let mut config = PipelineConfig::new(
            dir.join("PPC.tar"),
            dir.join("corpus.jsonl.zst"),
            dir.join("corpus.manifest"),
        );
        config.workers(2).queue_depth(2);
        config
    }

    #[test]
    fn missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let p = PpcPipeline::new(config(dir.path()));

        assert!(matches!(p.run(), Err(Error::Io(_))));
        assert!(!p.config().archive().exists());
        assert!(!p.config().manifest().exists());
        // temporary archive is removed too
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn single_record() {
        let dir = tempfile::tempdir().unwrap();
        let c = config(dir.path());
        std::fs::write(
            c.src(),
            build_tar(&[(
                "PPC/1.json",
                r#"{"text": "  Posłanka głosowała.  ", "metadata": {"publisher": "Sejm", "title": "Posiedzenie"}}"#,
            )]),
        )
        .unwrap();

        let manifest = PpcPipeline::new(c).run().unwrap();
        assert_eq!(manifest.stats.documents, 1);
        assert_eq!(manifest.stats.characters, 19);
        assert_eq!(manifest.stats.sentences, 1);
        assert_eq!(manifest.stats.punctuations, 1);
    }

    #[test]
    fn invalid_analyzer_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = config(dir.path());
        c.max_length(0);
        std::fs::write(c.src(), build_tar(&[("PPC/1.json", r#"{"text": "a"}"#)])).unwrap();

        let p = PpcPipeline::new(c);
        assert!(matches!(p.run(), Err(Error::Custom(_))));
        assert!(!p.config().manifest().exists());
    }
}
