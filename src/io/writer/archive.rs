/*! Compressed, append-only archive writer.

Entries are written as JSON lines (`{"text": ..., "meta": ...}`) in a single zstd frame.

The archive is written into a temporary file next to its destination,
and only moved to the destination on [ArchiveWriter::commit].
An archive that is dropped without being committed leaves nothing behind.
!*/
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;
use tempfile::NamedTempFile;
use zstd::stream::write::Encoder;

use crate::error::Error;

#[derive(Serialize)]
struct EntryRef<'a, M> {
    text: &'a str,
    meta: &'a M,
}

pub struct ArchiveWriter {
    dst: PathBuf,
    encoder: Encoder<'static, BufWriter<NamedTempFile>>,
    nb_entries: usize,
}

impl ArchiveWriter {
    /// Create a new archive that will be committed to `dst`.
    pub fn create(dst: &Path) -> Result<Self, Error> {
        Self::with_level(dst, zstd::DEFAULT_COMPRESSION_LEVEL)
    }

    /// Create a new archive using the provided zstd compression level.
    pub fn with_level(dst: &Path, level: i32) -> Result<Self, Error> {
        let parent = match dst.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let tmp = tempfile::Builder::new()
            .prefix(".archive")
            .suffix(".jsonl.zst.part")
            .tempfile_in(&parent)?;
        debug!("writing archive into temporary file {:?}", tmp.path());

        let encoder = Encoder::new(BufWriter::new(tmp), level)?;

        Ok(Self {
            dst: dst.to_path_buf(),
            encoder,
            nb_entries: 0,
        })
    }

    /// Append an entry.
    pub fn add<M: Serialize>(&mut self, text: &str, meta: &M) -> Result<(), Error> {
        serde_json::to_writer(&mut self.encoder, &EntryRef { text, meta })?;
        self.encoder.write_all(b"\n")?;
        self.nb_entries += 1;
        Ok(())
    }

    pub fn nb_entries(&self) -> usize {
        self.nb_entries
    }

    /// Finish the archive, move it to its destination and return its size on disk, in bytes.
    pub fn commit(self) -> Result<u64, Error> {
        let bufwriter = self.encoder.finish()?;
        let tmp = bufwriter.into_inner().map_err(|e| e.into_error())?;
        tmp.as_file().sync_all()?;

        let file: File = tmp.persist(&self.dst)?;
        let size = file.metadata()?.len();

        info!(
            "committed {} entries to {:?} ({} bytes)",
            self.nb_entries, self.dst, size
        );
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader};

    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn commit_writes_jsonl_zst() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("corpus.jsonl.zst");

        let mut wr = ArchiveWriter::create(&dst).unwrap();
        wr.add("pierwszy", &json!({"title": "A"})).unwrap();
        wr.add("drugi\nz nową linią", &json!({"title": null}))
            .unwrap();
        assert_eq!(wr.nb_entries(), 2);
        let size = wr.commit().unwrap();

        assert_eq!(size, std::fs::metadata(&dst).unwrap().len());

        let decoder = zstd::stream::read::Decoder::new(File::open(&dst).unwrap()).unwrap();
        let lines: Vec<Value> = BufReader::new(decoder)
            .lines()
            .map(|l| serde_json::from_str(&l.unwrap()).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], json!({"text": "pierwszy", "meta": {"title": "A"}}));
        assert_eq!(lines[1]["text"], "drugi\nz nową linią");
        assert_eq!(lines[1]["meta"]["title"], Value::Null);

        // only the committed archive is left
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn dropped_archive_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("corpus.jsonl.zst");

        {
            let mut wr = ArchiveWriter::create(&dst).unwrap();
            wr.add("never committed", &json!({})).unwrap();
        }

        assert!(!dst.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn empty_archive() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("empty.jsonl.zst");

        let size = ArchiveWriter::create(&dst).unwrap().commit().unwrap();
        // a zstd frame has a header, even when empty
        assert!(size > 0);
        assert_eq!(size, std::fs::metadata(&dst).unwrap().len());
    }
}
