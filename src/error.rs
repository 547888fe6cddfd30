//! Error types for predecir operations.
//!
//! Merge-time conditions (`SourceUnavailable`, `UnknownField`, `UnmatchedKey`)
//! are recoverable: callers report them and continue with the remaining
//! entries. Numerical conditions (`SingularMatrix`, `EmptyDataset`,
//! `DimensionMismatch`) are fatal to the step that raised them.

use std::fmt;

/// Main error type for predecir operations.
///
/// # Examples
///
/// ```
/// use predecir::error::PredecirError;
///
/// let err = PredecirError::DimensionMismatch {
///     expected: "3x3".to_string(),
///     actual: "3x2".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum PredecirError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Linear system is singular (rank-deficient or not positive definite).
    SingularMatrix {
        /// What was being solved when the factorization broke down
        context: String,
    },

    /// Fit or evaluation attempted on zero records.
    EmptyDataset {
        /// The operation that required a non-empty dataset
        context: String,
    },

    /// A source document could not be opened or parsed.
    SourceUnavailable {
        /// Path of the offending source
        path: String,
        /// Underlying cause description
        reason: String,
    },

    /// A config key outside the recognized field set.
    UnknownField {
        /// The unrecognized key as it appeared in the document
        key: String,
    },

    /// A measurement entry whose identifier has no config-created record.
    UnmatchedKey {
        /// The kernel identifier that was not found
        id: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Document or value parsing error.
    Parse(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for PredecirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredecirError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Matrix dimension mismatch: expected {expected}, got {actual}"
                )
            }
            PredecirError::SingularMatrix { context } => {
                write!(f, "Singular system: {context}")
            }
            PredecirError::EmptyDataset { context } => {
                write!(f, "Empty dataset: {context}")
            }
            PredecirError::SourceUnavailable { path, reason } => {
                write!(f, "Source {path} unavailable: {reason}")
            }
            PredecirError::UnknownField { key } => {
                write!(f, "Unrecognized config field: {key}")
            }
            PredecirError::UnmatchedKey { id } => {
                write!(f, "No config record for kernel: {id}")
            }
            PredecirError::Io(e) => write!(f, "I/O error: {e}"),
            PredecirError::Parse(msg) => write!(f, "Parse error: {msg}"),
            PredecirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PredecirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PredecirError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PredecirError {
    fn from(err: std::io::Error) -> Self {
        PredecirError::Io(err)
    }
}

impl From<serde_json::Error> for PredecirError {
    fn from(err: serde_json::Error) -> Self {
        PredecirError::Parse(err.to_string())
    }
}

impl From<&str> for PredecirError {
    fn from(msg: &str) -> Self {
        PredecirError::Other(msg.to_string())
    }
}

impl From<String> for PredecirError {
    fn from(msg: String) -> Self {
        PredecirError::Other(msg)
    }
}

impl PredecirError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty dataset error naming the operation that needed data
    #[must_use]
    pub fn empty_dataset(context: &str) -> Self {
        Self::EmptyDataset {
            context: context.to_string(),
        }
    }

    /// Create a source-unavailable error from a path and cause
    #[must_use]
    pub fn source_unavailable(path: &std::path::Path, reason: impl fmt::Display) -> Self {
        Self::SourceUnavailable {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PredecirError>;
