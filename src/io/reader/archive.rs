//! Reader for archives produced by [crate::io::writer::ArchiveWriter].
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::marker::PhantomData;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use zstd::stream::read::Decoder;

use crate::error::Error;

/// Archive entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<M> {
    pub text: String,
    pub meta: M,
}

/// Iterates over the entries of an archive, generic over metadata type.
pub struct ArchiveReader<M, R: Read = Decoder<'static, BufReader<File>>> {
    lines: Lines<BufReader<R>>,
    phantom: PhantomData<M>,
}

impl<M> ArchiveReader<M> {
    pub fn open(src: &Path) -> Result<Self, Error> {
        let decoder = Decoder::new(File::open(src)?)?;
        Ok(Self::new(decoder))
    }
}

impl<M, R: Read> ArchiveReader<M, R> {
    /// Read entries from an already decompressed stream.
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            phantom: PhantomData,
        }
    }
}

impl<M: DeserializeOwned, R: Read> Iterator for ArchiveReader<M, R> {
    type Item = Result<Entry<M>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::Io(e))),
            };

            // tolerate blank lines
            if line.trim().is_empty() {
                continue;
            }

            return Some(serde_json::from_str(&line).map_err(Error::Serde));
        }
    }
}
