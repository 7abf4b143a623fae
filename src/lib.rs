/*! # ppc-corpus

Pipeline building the Polish Parliamentary Corpus from its tar container.

- [sources] reads JSON records from the container,
- [analysis] computes linguistic counts,
- [pipelines] holds the parallel processing pipeline,
- [io] writes and reads the compressed archive,
- [manifest] describes the produced corpus.
!*/
pub mod analysis;
pub mod download;
pub mod error;
pub mod io;
pub mod manifest;
pub mod pipelines;
pub mod processing;
pub mod sources;
