//! Error types for extraction passes.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::locale::Messages;
use crate::waypoint::SchemaError;

/// Why one candidate file contributed no waypoint. Never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    /// The file could not be opened or read.
    #[error("could not be read: {message}")]
    Read { message: String },
    /// The content is not valid JSON.
    #[error("invalid JSON: {message}")]
    Parse { message: String },
    /// Valid JSON, but not a waypoint source.
    #[error("{0}")]
    Schema(#[from] SchemaError),
}

impl FileError {
    pub(crate) fn read(e: &io::Error) -> Self {
        FileError::Read {
            message: e.to_string(),
        }
    }

    /// Maps serde_json's error categories: I/O failures while streaming count as reads.
    pub(crate) fn from_json(e: &serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Io => FileError::Read {
                message: e.to_string(),
            },
            _ => FileError::Parse {
                message: e.to_string(),
            },
        }
    }

    /// True when the file parsed but does not match the source schema.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, FileError::Schema(_))
    }
}

/// Failure of a whole extraction pass.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The folder does not exist or is not a directory. Nothing was written.
    #[error("not a directory: {}", .path.display())]
    InvalidFolder { path: PathBuf },
    /// The folder exists but its entries could not be listed. Nothing was written.
    #[error("cannot list {}: {source}", .path.display())]
    ReadFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Serializing or writing the aggregated output failed.
    #[error("cannot write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExtractError {
    /// Localized explanation followed by the diagnostic detail.
    pub fn user_message(&self, m: &Messages) -> String {
        match self {
            ExtractError::InvalidFolder { path } => {
                format!("{} ({})", m.invalid_folder, path.display())
            }
            ExtractError::ReadFolder { path, source } => {
                format!("{} {}: {}", m.folder_unreadable, path.display(), source)
            }
            ExtractError::OutputWrite { path, source } => {
                format!("{} {}: {}", m.output_write_failed, path.display(), source)
            }
        }
    }
}
