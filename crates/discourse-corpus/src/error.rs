//! Error types for corpus ingestion.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::DocId;

/// Errors that can occur while loading a corpus.
///
/// Any of these aborts ingestion; a partially read corpus is never returned.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus directory does not exist or is not a directory.
    #[error("corpus directory not found: {path}")]
    RootNotFound {
        /// The configured corpus path.
        path: PathBuf,
    },

    /// No corpus directory was configured.
    #[error("no corpus path configured")]
    NoCorpusPath,

    /// Walking the corpus directory failed.
    #[error("failed to walk corpus directory {path}: {source}")]
    Walk {
        /// Path at which the walk failed.
        path: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },

    /// Failed to read a document.
    #[error("failed to read document {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A document is not valid UTF-8 text.
    #[error("document is not valid UTF-8: {path}")]
    InvalidUtf8 {
        /// Path to the offending file.
        path: PathBuf,
    },

    /// Two documents share an identifier.
    #[error("duplicate document id: {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: DocId,
    },

    /// The corpus holds more documents than the configured bound.
    #[error("corpus has {found} documents, more than the limit of {limit}")]
    TooManyDocuments {
        /// Documents discovered.
        found: usize,
        /// Configured upper bound.
        limit: usize,
    },

    /// Failed to compile a glob pattern.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The invalid pattern.
        pattern: String,
        /// Underlying glob error.
        source: globset::Error,
    },
}
