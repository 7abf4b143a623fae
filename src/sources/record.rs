//! Raw document records, as found in the PPC container.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single document of the container.
///
/// Every field is optional: some documents have no title (and some dumps
/// have `null` text), and these must be tolerated rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    metadata: RecordMetadata,
}

/// Record metadata.
///
/// Only `publisher` and `title` are used, other keys are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(default)]
    publisher: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

impl Record {
    pub fn new(text: Option<String>, metadata: RecordMetadata) -> Self {
        Self { text, metadata }
    }

    /// Get the raw text, empty if absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }
}

impl RecordMetadata {
    pub fn new(publisher: Option<String>, title: Option<String>) -> Self {
        Self {
            publisher,
            title,
            extra: HashMap::new(),
        }
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn extra(&self) -> &HashMap<String, Value> {
        &self.extra
    }
}
