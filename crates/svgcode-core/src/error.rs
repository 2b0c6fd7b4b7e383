//! Error handling for svgcode
//!
//! Provides error types for every layer of a conversion:
//! - Document errors (input validation, cleanup, markup extraction)
//! - Parse errors (path-data syntax, local to one path string)
//! - Path errors (parse errors lifted with the offending path index)
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Document error type
///
/// Represents failures that happen before any path data is looked at:
/// locating and reading the input, cleaning it, and extracting paths.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Input document does not exist or is not a regular file
    #[error("File doesn't exist at path: {}", path.display())]
    InputNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// Input document has the wrong file category
    #[error("File doesn't end in .svg: {}", path.display())]
    InputWrongCategory {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The cleanup collaborator rejected the document
    #[error("Cleanup failed: {reason}")]
    CleanupFailed {
        /// The reason cleanup failed.
        reason: String,
    },

    /// The markup-extraction collaborator rejected the document
    #[error("Extraction failed: {reason}")]
    ExtractionFailed {
        /// The reason extraction failed.
        reason: String,
    },

    /// I/O error while reading the document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    /// Create a cleanup failure from any displayable reason
    pub fn cleanup(reason: impl Into<String>) -> Self {
        Self::CleanupFailed {
            reason: reason.into(),
        }
    }

    /// Create an extraction failure from any displayable reason
    pub fn extraction(reason: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            reason: reason.into(),
        }
    }
}

/// Path-data syntax error
///
/// Produced by the path parser, which only sees a single path string and
/// therefore knows nothing about where the path came from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The data does not follow the path grammar
    #[error("malformed path data at byte {position}: {reason}")]
    Malformed {
        /// Byte offset into the path string.
        position: usize,
        /// What the parser expected or found.
        reason: String,
    },

    /// A letter in command position is not a path command
    #[error("unknown command '{code}' at byte {position}")]
    UnknownCommand {
        /// Byte offset into the path string.
        position: usize,
        /// The offending letter.
        code: char,
    },
}

impl ParseError {
    /// Create a malformed-data error at `position`
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            position,
            reason: reason.into(),
        }
    }

    /// Attach the index of the path this error came from
    pub fn at_path(self, path_index: usize) -> PathError {
        match self {
            Self::Malformed { position, reason } => PathError::MalformedPathData {
                path_index,
                position,
                reason,
            },
            Self::UnknownCommand { code, .. } => PathError::UnknownCommandKind { path_index, code },
        }
    }
}

/// Path error type
///
/// Fatal errors tied to one path of a document. Any of these aborts the
/// whole conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Path data could not be parsed
    #[error("Malformed path data in path {path_index} at byte {position}: {reason}")]
    MalformedPathData {
        /// Index of the path within the document.
        path_index: usize,
        /// Byte offset into the path string.
        position: usize,
        /// What the parser expected or found.
        reason: String,
    },

    /// A command letter with no known meaning
    #[error("Unknown command kind '{code}' in path {path_index}")]
    UnknownCommandKind {
        /// Index of the path within the document.
        path_index: usize,
        /// The offending letter.
        code: char,
    },

    /// A command reached motion emission without being normalized
    #[error("Command {command_index} of path {path_index} was not normalized")]
    NotNormalized {
        /// Index of the path within the document.
        path_index: usize,
        /// Index of the command within the path.
        command_index: usize,
    },
}

impl PathError {
    /// Index of the path that caused the error
    pub fn path_index(&self) -> usize {
        match self {
            Self::MalformedPathData { path_index, .. }
            | Self::UnknownCommandKind { path_index, .. }
            | Self::NotNormalized { path_index, .. } => *path_index,
        }
    }
}

/// Main error type for svgcode
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Path error
    #[error(transparent)]
    Path(#[from] PathError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a document error
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::Document(_))
    }

    /// Check if this is a path error
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Path(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
