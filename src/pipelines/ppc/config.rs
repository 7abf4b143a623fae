//! Pipeline configuration.
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Fixed source URL of the corpus.
pub const SOURCE_URL: &str = "http://mozart.ipipan.waw.pl/~rtuora/resources/PPC.tgz";

/// Default location of the downloaded container.
pub const DEFAULT_SOURCE: &str = "PPC.tgz";

/// Default location of the produced archive.
pub const DEFAULT_ARCHIVE: &str = "PPC_corpus.jsonl.zst";

/// Default location of the produced manifest.
pub const DEFAULT_MANIFEST: &str = "PPC_corpus.manifest";

/// What to do when a single document cannot be read or processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the whole run. No manifest is written.
    #[default]
    Abort,
    /// Log the error and go on with the next document.
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "unknown error policy {:?} (expected abort or skip)",
                other
            )),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Pipeline settings.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub(crate) src: PathBuf,
    pub(crate) archive: PathBuf,
    pub(crate) manifest: PathBuf,
    pub(crate) workers: Option<usize>,
    pub(crate) queue_depth: Option<usize>,
    pub(crate) on_error: ErrorPolicy,
    pub(crate) max_length: Option<usize>,
    pub(crate) stopwords: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(src: PathBuf, archive: PathBuf, manifest: PathBuf) -> Self {
        Self {
            src,
            archive,
            manifest,
            workers: None,
            queue_depth: None,
            on_error: ErrorPolicy::default(),
            max_length: None,
            stopwords: None,
        }
    }

    /// Number of workers. Defaults to available parallelism.
    pub fn workers(&mut self, workers: usize) -> &mut Self {
        self.workers = Some(workers);
        self
    }

    /// Maximum number of queued records. Defaults to twice the number of workers.
    pub fn queue_depth(&mut self, queue_depth: usize) -> &mut Self {
        self.queue_depth = Some(queue_depth);
        self
    }

    pub fn on_error(&mut self, policy: ErrorPolicy) -> &mut Self {
        self.on_error = policy;
        self
    }

    /// Default analyzer text length limit, in characters.
    pub fn max_length(&mut self, max_length: usize) -> &mut Self {
        self.max_length = Some(max_length);
        self
    }

    /// Additional stop-words file.
    pub fn stopwords(&mut self, path: PathBuf) -> &mut Self {
        self.stopwords = Some(path);
        self
    }

    pub fn src(&self) -> &Path {
        &self.src
    }

    pub fn archive(&self) -> &Path {
        &self.archive
    }

    pub fn manifest(&self) -> &Path {
        &self.manifest
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(
            PathBuf::from(DEFAULT_SOURCE),
            PathBuf::from(DEFAULT_ARCHIVE),
            PathBuf::from(DEFAULT_MANIFEST),
        )
    }
}
