/*! Polish Parliamentary Corpus pipeline.

- [document] turns a raw record into a trimmed text and its statistics,
- [pool] runs processing on a fixed number of workers,
- [accumulator] sums statistics and writes the archive,
- [pipeline] wires everything together.
!*/
pub mod accumulator;
pub mod config;
pub mod document;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod pool;

pub use accumulator::{Aggregator, CorpusAccumulator};
pub use config::{ErrorPolicy, PipelineConfig};
pub use document::{process, DocumentStatistics, Processed};
pub use pipeline::PpcPipeline;
pub use pool::{Feeder, WorkerPool};
