//! Error types for the store and the ingestion pipeline

use std::collections::TryReserveError;

use thiserror::Error;

use crate::model::ColumnType;

/// Convenience result type for store operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Convenience result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Pipeline stage an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Header,
    Inference,
    Row,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Header => write!(f, "header"),
            Stage::Inference => write!(f, "inference"),
            Stage::Row => write!(f, "row"),
        }
    }
}

/// Errors raised by [`crate::model::Matrix`] and [`crate::model::Column`].
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Backing storage could not be reserved. Existing contents are left intact.
    #[error("failed to allocate {requested} slots for column '{column}'")]
    Allocation {
        column: String,
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("cannot declare column '{name}': store already holds the maximum of {max} columns")]
    CapacityExceeded { name: String, max: usize },

    #[error("column '{name}' is already declared")]
    DuplicateName { name: String },

    #[error("column '{column}' is already typed as {column_type}")]
    AlreadyTyped {
        column: String,
        column_type: ColumnType,
    },

    #[error("column '{column}' holds {expected} values, got {found}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        found: ColumnType,
    },

    #[error("column '{column}' has no type bound yet")]
    Untyped { column: String },

    #[error("no column at index {index} (store has {size})")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("no column named '{name}'")]
    NotFound { name: String },
}

/// Errors raised while ingesting a delimited text table.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Underlying I/O error (including invalid UTF-8 in the input).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input ended before the {stage} line")]
    UnexpectedEof { stage: Stage },

    #[error("line {line} exceeds the maximum length of {limit} bytes")]
    LineTooLong { line: usize, limit: usize },

    #[error("invalid header at field {field}: {reason}")]
    InvalidHeader { field: usize, reason: String },

    #[error("{stage} line {line}: expected {expected} fields, found {found}")]
    RowArityMismatch {
        stage: Stage,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A data field could not be parsed as its column's bound type.
    #[error("row line {line}, column '{column}': cannot parse '{raw}' as {expected}")]
    Parse {
        line: usize,
        column: String,
        raw: String,
        expected: ColumnType,
    },

    #[error("{stage} line {line}: {source}")]
    Store {
        stage: Stage,
        line: usize,
        #[source]
        source: MatrixError,
    },

    #[error("ingestion already ran on this ingestor")]
    AlreadyIngested,
}

impl IngestError {
    /// Stage the error belongs to, when it is tied to one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            IngestError::UnexpectedEof { stage }
            | IngestError::RowArityMismatch { stage, .. }
            | IngestError::Store { stage, .. } => Some(*stage),
            IngestError::InvalidHeader { .. } => Some(Stage::Header),
            IngestError::Parse { .. } => Some(Stage::Row),
            IngestError::Io(_) | IngestError::LineTooLong { .. } | IngestError::AlreadyIngested => {
                None
            }
        }
    }

    /// Whether the error only concerns a single row and may be skipped in lenient mode.
    pub fn is_row_local(&self) -> bool {
        matches!(
            self,
            IngestError::Parse { .. }
                | IngestError::RowArityMismatch {
                    stage: Stage::Row,
                    ..
                }
        )
    }
}
