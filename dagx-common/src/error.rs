//! Error handling for the DAG extractor
//!
//! A single error type covers IR construction, extraction, record parsing
//! and output. Only [`DagError::LockFileOpen`] is treated as fatal by the
//! driver; everything else costs at most the records of one function.

use crate::types::TempId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DagError {
    #[error("IR construction error: {message}")]
    IrBuild { message: String },

    #[error("Value %{id} is used but never defined in function '{function}'")]
    UndefinedValue { function: String, id: TempId },

    #[error("Value %{id} is defined more than once in function '{function}'")]
    DuplicateDefinition { function: String, id: TempId },

    #[error("Operand %{id} has no counterpart in the synthetic function")]
    UnmappedOperand { id: TempId },

    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error("Failed to open lock file {path}: {message}")]
    LockFileOpen { path: String, message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl DagError {
    pub fn ir_build(message: impl Into<String>) -> Self {
        DagError::IrBuild { message: message.into() }
    }

    pub fn malformed_record(line: usize, message: impl Into<String>) -> Self {
        DagError::MalformedRecord { line, message: message.into() }
    }

    /// Whether the error signals a broken deployment rather than a
    /// per-function failure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DagError::LockFileOpen { .. })
    }
}

impl From<std::io::Error> for DagError {
    fn from(err: std::io::Error) -> Self {
        DagError::IoError {
            message: err.to_string(),
        }
    }
}

/// Convert from String (for simple error cases)
impl From<String> for DagError {
    fn from(message: String) -> Self {
        DagError::InternalError { message }
    }
}
