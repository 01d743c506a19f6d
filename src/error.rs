//! Error types for addressdb
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using DbError
pub type Result<T> = std::result::Result<T, DbError>;

/// Unified error type for addressdb operations
#[derive(Debug, Error)]
pub enum DbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("failed to open the file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load database: {0}")]
    Load(#[source] std::io::Error),

    #[error("failed to load database: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("failed to load database: {0}")]
    Corrupt(String),

    #[error("failed to write database: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to write database: wrote {actual} of {expected} bytes")]
    ShortWrite { expected: usize, actual: usize },

    #[error("flush failed: {0}")]
    Flush(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Row Errors
    // -------------------------------------------------------------------------
    #[error("id out of range: {id} (table has {row_count} rows)")]
    IndexOutOfRange { id: i64, row_count: u32 },

    #[error("id {id} already set, delete it first")]
    AlreadySet { id: u32 },

    #[error("id {id} is not set")]
    NotSet { id: u32 },

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("invalid table parameters: {0}")]
    InvalidParameters(String),

    #[error("database has not been created")]
    Uninitialized,
}

impl DbError {
    /// True for failures raised by the file layer (open, load, write, flush)
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            DbError::Open { .. }
                | DbError::Load(_)
                | DbError::ShortRead { .. }
                | DbError::Corrupt(_)
                | DbError::Write(_)
                | DbError::ShortWrite { .. }
                | DbError::Flush(_)
        )
    }
}
