//! Archive reading.
mod archive;
pub use archive::{ArchiveReader, Entry};
