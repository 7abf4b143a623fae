//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use ppc_corpus::pipelines::ppc::config::{ErrorPolicy, PipelineConfig};

#[derive(Debug, StructOpt)]
#[structopt(name = "ppc-corpus", about = "Polish Parliamentary Corpus generation tool.")]
/// Holds every command that is callable by the `ppc-corpus` command.
pub enum Ppc {
    #[structopt(about = "Download the PPC container")]
    Download(Download),
    #[structopt(about = "Run pipeline on an already downloaded container")]
    Pipeline(Pipeline),
    #[structopt(about = "Download the container, then run pipeline")]
    Run(Run),
    #[structopt(about = "Check an archive against its manifest")]
    Check(Check),
    #[structopt(about = "Print the JSON Schema of the manifest")]
    Schema,
}

#[derive(Debug, StructOpt)]
/// Download command and parameters.
/// ```sh
/// ppc-corpus-download 0.1.0
/// Download the PPC container
///
/// USAGE:
///     ppc-corpus download [OPTIONS]
///
/// OPTIONS:
///         --url <url>    source url [default: http://mozart.ipipan.waw.pl/~rtuora/resources/PPC.tgz]
///     -o <dst>           download destination [default: PPC.tgz]
/// ```
pub struct Download {
    #[structopt(
        long = "url",
        help = "source url",
        default_value = "http://mozart.ipipan.waw.pl/~rtuora/resources/PPC.tgz"
    )]
    pub url: String,
    #[structopt(
        short = "o",
        parse(from_os_str),
        help = "download destination",
        default_value = "PPC.tgz"
    )]
    pub dst: PathBuf,
    #[structopt(short = "q", long = "quiet", help = "hide progress bar")]
    pub quiet: bool,
}

#[derive(Debug, StructOpt)]
/// Pipeline command and parameters.
///
/// ```sh
/// ppc-corpus-pipeline 0.1.0
/// Run pipeline on an already downloaded container
///
/// USAGE:
///     ppc-corpus pipeline [OPTIONS] [src]
///
/// ARGS:
///     <src>    source container (.tar or .tgz) [default: PPC.tgz]
/// ```
pub struct Pipeline {
    #[structopt(
        parse(from_os_str),
        help = "source container (.tar or .tgz)",
        default_value = "PPC.tgz"
    )]
    pub src: PathBuf,
    #[structopt(flatten)]
    pub options: PipelineOptions,
}

#[derive(Debug, StructOpt)]
/// Run command and parameters: download, then pipeline.
pub struct Run {
    #[structopt(
        long = "url",
        help = "source url",
        default_value = "http://mozart.ipipan.waw.pl/~rtuora/resources/PPC.tgz"
    )]
    pub url: String,
    #[structopt(
        long = "src",
        parse(from_os_str),
        help = "download destination",
        default_value = "PPC.tgz"
    )]
    pub src: PathBuf,
    #[structopt(
        long = "skip-download",
        help = "use an existing container instead of downloading it"
    )]
    pub skip_download: bool,
    #[structopt(
        long = "remove-source",
        help = "remove the container after a successful run"
    )]
    pub remove_source: bool,
    #[structopt(flatten)]
    pub options: PipelineOptions,
}

#[derive(Debug, StructOpt)]
pub struct PipelineOptions {
    #[structopt(
        long = "archive",
        parse(from_os_str),
        help = "archive destination",
        default_value = "PPC_corpus.jsonl.zst"
    )]
    pub archive: PathBuf,
    #[structopt(
        long = "manifest",
        parse(from_os_str),
        help = "manifest destination",
        default_value = "PPC_corpus.manifest"
    )]
    pub manifest: PathBuf,
    #[structopt(
        short = "w",
        long = "workers",
        help = "number of workers. Default is the number of available cores."
    )]
    pub workers: Option<usize>,
    #[structopt(
        long = "queue-depth",
        help = "maximum number of queued records. Default is twice the number of workers."
    )]
    pub queue_depth: Option<usize>,
    #[structopt(
        long = "on-error",
        help = "what to do on a failing document (abort or skip)",
        default_value = "abort"
    )]
    pub on_error: ErrorPolicy,
    #[structopt(long = "max-length", help = "default analyzer text length limit")]
    pub max_length: Option<usize>,
    #[structopt(
        long = "stopwords",
        parse(from_os_str),
        help = "additional stop-words file (one per line)"
    )]
    pub stopwords: Option<PathBuf>,
}

impl PipelineOptions {
    pub fn into_config(self, src: PathBuf) -> PipelineConfig {
        let mut config = PipelineConfig::new(src, self.archive, self.manifest);
        config.on_error(self.on_error);
        if let Some(workers) = self.workers {
            config.workers(workers);
        }
        if let Some(queue_depth) = self.queue_depth {
            config.queue_depth(queue_depth);
        }
        if let Some(max_length) = self.max_length {
            config.max_length(max_length);
        }
        if let Some(stopwords) = self.stopwords {
            config.stopwords(stopwords);
        }
        config
    }
}

#[derive(Debug, StructOpt)]
/// Check command and parameters.
pub struct Check {
    #[structopt(
        parse(from_os_str),
        help = "archive location",
        default_value = "PPC_corpus.jsonl.zst"
    )]
    pub archive: PathBuf,
    #[structopt(
        parse(from_os_str),
        help = "manifest location",
        default_value = "PPC_corpus.manifest"
    )]
    pub manifest: PathBuf,
}

#[cfg(test)]
mod tests {
    use ppc_corpus::pipelines::ppc::config::{
        DEFAULT_ARCHIVE, DEFAULT_MANIFEST, DEFAULT_SOURCE, SOURCE_URL,
    };

    use super::*;

    // defaults are duplicated as literals in attributes
    #[test]
    fn run_defaults() {
        let opt = Ppc::from_iter(["ppc-corpus", "run"]);
        match opt {
            Ppc::Run(r) => {
                assert_eq!(r.url, SOURCE_URL);
                assert_eq!(r.src, PathBuf::from(DEFAULT_SOURCE));
                assert!(!r.remove_source);
                let config = r.options.into_config(r.src);
                assert_eq!(config.archive(), PathBuf::from(DEFAULT_ARCHIVE));
                assert_eq!(config.manifest(), PathBuf::from(DEFAULT_MANIFEST));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn pipeline_options() {
        let opt = Ppc::from_iter([
            "ppc-corpus",
            "pipeline",
            "corpus.tar",
            "-w",
            "3",
            "--on-error",
            "skip",
        ]);
        match opt {
            Ppc::Pipeline(p) => {
                assert_eq!(p.src, PathBuf::from("corpus.tar"));
                assert_eq!(p.options.workers, Some(3));
                assert_eq!(p.options.on_error, ErrorPolicy::Skip);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn invalid_policy() {
        let res = Ppc::from_iter_safe(["ppc-corpus", "pipeline", "--on-error", "retry"]);
        assert!(res.is_err());
    }
}
