//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Http(reqwest::Error),
    Custom(String),

    /// Received byte count does not match the declared content length.
    DownloadIncomplete {
        expected: u64,
        received: u64,
    },

    /// A container member is not a valid JSON record.
    MalformedRecord {
        member: String,
        source: serde_json::Error,
    },

    /// Text is longer than what the analyzer accepts, even after raising its limit.
    AnalyzerCapacityExceeded {
        length: usize,
        max_length: usize,
    },

    /// A worker panicked while processing a document.
    WorkerPanic {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "serialization error: {}", e),
            Error::Http(e) => write!(f, "http error: {}", e),
            Error::Custom(s) => write!(f, "{}", s),
            Error::DownloadIncomplete { expected, received } => write!(
                f,
                "download incomplete: expected {} bytes, received {}",
                expected, received
            ),
            Error::MalformedRecord { member, source } => {
                write!(f, "malformed record {}: {}", member, source)
            }
            Error::AnalyzerCapacityExceeded { length, max_length } => write!(
                f,
                "text of {} characters exceeds analyzer capacity of {}",
                length, max_length
            ),
            Error::WorkerPanic { message } => write!(f, "worker panicked: {}", message),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Http(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(e: tempfile::PersistError) -> Error {
        Error::Io(e.error)
    }
}
