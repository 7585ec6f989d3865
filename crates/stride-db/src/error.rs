//! Errors from the libSQL store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("query failed: {0}")]
    Query(String),

    #[error("migration {0}")]
    Migration(String),

    /// The targeted row does not exist.
    #[error("no matching row")]
    NoResult,

    /// A stored value could not be read back, such as a JSON column that no
    /// longer matches its schema.
    #[error("invalid stored value: {0}")]
    InvalidState(String),

    /// A plan was committed for an assignment that already has tasks.
    #[error("assignment {0} already has tasks")]
    Conflict(String),

    #[error("libSQL: {0}")]
    LibSql(#[from] libsql::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
