//! Archive writing.
mod archive;
pub use archive::ArchiveWriter;
