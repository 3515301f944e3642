//! Error types for the alignment pipeline.
//!
//! Only conditions that would corrupt a run are errors: malformed alignment
//! input, desynchronized corpora, I/O failures, and invalid configuration.
//! A missing key in a table is "no evidence", never an error.

use thiserror::Error;

use crate::Side;

/// Errors that can occur while loading input or running the bootstrap.
#[derive(Debug, Error)]
pub enum AlignError {
    /// An alignment token that is not of the form `<int>-<int>`.
    #[error("malformed alignment token {token:?} on line {line}")]
    MalformedIndex { line: usize, token: String },

    /// A Pharaoh position points past the end of its tokenized sentence.
    #[error("alignment position {position} on line {line} is out of range for the {side} sentence ({len} tokens)")]
    IndexOutOfRange {
        line: usize,
        position: usize,
        len: usize,
        side: Side,
    },

    /// The three line-synchronized corpus files disagree on their length.
    #[error("corpus files are not line-synchronized: {alignment} alignment lines, {left} left lines, {right} right lines")]
    CorpusLength {
        alignment: usize,
        left: usize,
        right: usize,
    },

    /// Error reading an input file.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },

    /// Error writing an output file.
    #[error("failed to save {path}: {message}")]
    Save { path: String, message: String },

    /// Invalid run configuration.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl AlignError {
    pub(crate) fn load(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        AlignError::Load {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn save(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        AlignError::Save {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        AlignError::Config {
            message: message.into(),
        }
    }
}

/// Result type for alignment operations.
pub type AlignResult<T> = Result<T, AlignError>;
