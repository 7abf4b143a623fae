/*!
# IO utilities

Corpus archive saving and loading.

Archives are zstd-compressed JSON lines files, each line holding a document text and its metadata.
!*/
pub mod reader;
pub mod writer;

pub use reader::{ArchiveReader, Entry};
pub use writer::ArchiveWriter;
