//! Error types for archive assembly and extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while building or extracting archives.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// A registered source path does not exist.
    #[error("source path not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A source path is neither a regular file nor a directory.
    #[error("source is neither a file nor a directory: {path}")]
    InvalidSource {
        /// The offending path.
        path: PathBuf,
    },

    /// Extraction requires an absolute destination path.
    #[error("absolute destination path required: {path}")]
    DestinationNotAbsolute {
        /// The rejected destination.
        path: PathBuf,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive could not be parsed or failed an integrity check.
    #[error("corrupt archive: {0}")]
    CorruptArchive(String),
}

impl ArchiveError {
    /// Returns `true` if this error concerns a registered source rather
    /// than the archive container or the sink.
    ///
    /// Source errors are the ones the fail-soft exit policy may skip
    /// during archive assembly.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use zipline_core::ArchiveError;
    ///
    /// let err = ArchiveError::SourceNotFound {
    ///     path: PathBuf::from("/missing"),
    /// };
    /// assert!(err.is_source_error());
    ///
    /// let err = ArchiveError::CorruptArchive("bad header".into());
    /// assert!(!err.is_source_error());
    /// ```
    #[must_use]
    pub const fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. } | Self::InvalidSource { .. }
        )
    }
}
