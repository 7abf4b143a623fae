use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use flate2::read::MultiGzDecoder;
use log::debug;

use crate::error::Error;
use crate::sources::Record;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Tar container of JSON records, generic over reader type.
///
/// This genericity enables reading both plain and gzipped (`.tgz`) containers,
/// and reading from in-memory buffers in tests.
pub struct Tarball<R: Read> {
    archive: tar::Archive<R>,
}

/// Tarball reading from a file, either plain or gzipped.
impl Tarball<Box<dyn Read + Send>> {
    /// Open a container, sniffing the gzip magic to decide whether to decompress.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);

        let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
        debug!("opening {:?} (gzip: {})", path.as_ref(), is_gzip);

        let reader: Box<dyn Read + Send> = if is_gzip {
            Box::new(MultiGzDecoder::new(reader))
        } else {
            Box::new(reader)
        };

        Ok(Self::new(reader))
    }
}

impl<R: Read> Tarball<R> {
    pub fn new(reader: R) -> Self {
        Self {
            archive: tar::Archive::new(reader),
        }
    }

    /// Lazily iterate over the records of the container.
    ///
    /// Members are read and parsed one at a time, in container order.
    /// Since the underlying stream is consumed, this can only be done once.
    pub fn records(&mut self) -> Result<Records<'_, R>, Error> {
        Ok(Records {
            entries: self.archive.entries()?,
        })
    }
}

/// Iterator over the records of a [Tarball].
///
/// Directories and special entries are skipped.
/// A member that is not valid JSON yields [Error::MalformedRecord], and the iteration can continue
/// past it.
pub struct Records<'a, R: 'a + Read> {
    entries: tar::Entries<'a, R>,
}

impl<'a, R: Read> Iterator for Records<'a, R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };

            if !entry.header().entry_type().is_file() {
                debug!("skipping non-file entry {:?}", entry.path());
                continue;
            }

            let member = entry
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "<invalid path>".to_string());

            let record = serde_json::from_reader(entry).map_err(|source| {
                if source.is_io() {
                    Error::Io(source.into())
                } else {
                    Error::MalformedRecord { member, source }
                }
            });

            return Some(record);
        }
    }
}
