/*! Corpus manifest

Describes the produced archive: provenance, license, on-disk size and corpus-wide statistics.
Written once, as pretty-printed JSON (4 spaces indentation), after the archive has been committed.
!*/
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use schemars::{schema::RootSchema, schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::Error;
use crate::pipelines::ppc::CorpusAccumulator;

pub const PROJECT: &str = "SpeakLeash";
pub const NAME: &str = "The Polish Parliamentary Corpus";
pub const DESCRIPTION: &str = "The Polish Parliamentary Corpus (PPC) is a large collection of documents from the proceedings of the Polish Parliament, Sejm and Senate, both plenary and committee sittings, interpellations and questions.";
pub const LICENSE: &str = "Public Domain";
pub const LANGUAGE: &str = "pl";
pub const SOURCE_URL: &str = "http://clip.ipipan.waw.pl/PPC";

/// Corpus source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Source {
    pub name: String,
    pub url: String,
    pub license: String,
}

/// Corpus manifest.
///
/// Field order is kept on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Manifest {
    pub project: String,
    pub name: String,
    pub description: String,
    pub license: String,
    pub language: String,
    /// Size of the archive on disk, in bytes.
    pub file_size: u64,
    pub sources: Vec<Source>,
    pub stats: CorpusAccumulator,
}

impl Manifest {
    /// Build the manifest from final statistics and the committed archive size.
    pub fn build(stats: &CorpusAccumulator, file_size: u64) -> Self {
        Self {
            project: PROJECT.to_string(),
            name: NAME.to_string(),
            description: DESCRIPTION.to_string(),
            license: LICENSE.to_string(),
            language: LANGUAGE.to_string(),
            file_size,
            sources: vec![Source {
                name: NAME.to_string(),
                url: SOURCE_URL.to_string(),
                license: LICENSE.to_string(),
            }],
            stats: *stats,
        }
    }

    /// Serialize into a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, Error> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::Custom(e.to_string()))
    }

    /// Write the manifest at `dst`, replacing any existing file.
    pub fn write(&self, dst: &Path) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(dst)?);
        self.serialize_into(&mut w)?;
        w.flush()?;
        info!("wrote manifest to {:?}", dst);
        Ok(())
    }

    /// Read a manifest back.
    pub fn read(src: &Path) -> Result<Self, Error> {
        let r = BufReader::new(File::open(src)?);
        Ok(serde_json::from_reader(r)?)
    }

    /// JSON Schema of the manifest.
    pub fn schema() -> RootSchema {
        schema_for!(Manifest)
    }

    fn serialize_into<W: Write>(&self, w: W) -> Result<(), Error> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(w, formatter);
        self.serialize(&mut ser)?;
        Ok(())
    }
}
