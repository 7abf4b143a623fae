//! # ppc-corpus
//!
//! Builds the Polish Parliamentary Corpus: a compressed archive of the documents of the
//! Polish Parliament proceedings along with their linguistic statistics, and a manifest
//! describing it.
//!
//! ## Getting started
//!
//! ```sh
//! ppc-corpus 0.1.0
//! Polish Parliamentary Corpus generation tool.
//!
//! USAGE:
//!     ppc-corpus <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     check       Check an archive against its manifest
//!     download    Download the PPC container
//!     help        Prints this message or the help of the given subcommand(s)
//!     pipeline    Run pipeline on an already downloaded container
//!     run         Download the container, then run pipeline
//!     schema      Print the JSON Schema of the manifest
//! ```
//!
//! Logging is controlled by `RUST_LOG` (e.g. `RUST_LOG=info ppc-corpus run`).
use std::path::Path;

use structopt::StructOpt;

use ppc_corpus::download::Downloader;
use ppc_corpus::error::Error;
use ppc_corpus::manifest::Manifest;
use ppc_corpus::pipelines::{Pipeline, PpcPipeline};
use ppc_corpus::processing;

#[macro_use]
extern crate log;

mod cli;

fn download(url: &str, dst: &Path, quiet: bool) -> Result<(), Error> {
    let mut dl = Downloader::new(url)?;
    if quiet {
        dl = dl.quiet();
    }
    dl.save_to(dst)?;
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Ppc::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Ppc::Download(d) => download(&d.url, &d.dst, d.quiet)?,

        cli::Ppc::Pipeline(p) => {
            let p = PpcPipeline::new(p.options.into_config(p.src));
            p.run()?;
        }

        cli::Ppc::Run(r) => {
            if r.skip_download {
                info!("using existing container {:?}", r.src);
            } else {
                download(&r.url, &r.src, false)?;
            }

            let src = r.src.clone();
            let p = PpcPipeline::new(r.options.into_config(r.src));
            p.run()?;

            if r.remove_source {
                info!("removing {:?}", src);
                std::fs::remove_file(&src)?;
            }
        }

        cli::Ppc::Check(c) => {
            let report = processing::check(&c.archive, &c.manifest)?;
            if !report.is_ok() {
                for m in &report.mismatches {
                    error!("{}", m);
                }
                return Err(Error::Custom(format!(
                    "{:?} does not match {:?}",
                    c.archive, c.manifest
                )));
            }
            println!("{:?} matches {:?}", c.archive, c.manifest);
        }

        cli::Ppc::Schema => {
            println!("{}", serde_json::to_string_pretty(&Manifest::schema())?);
        }
    };
    Ok(())
}
