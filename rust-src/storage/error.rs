//! Errors raised by the record store.

use thiserror::Error;


/// All possible failures of a `RecordStore` operation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open database {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database is not connected. Call connect() first.")]
    NotConnected,

    #[error("A record for {record_date} {resource} already exists")]
    UniqueConstraintViolation {
        record_date: String,
        resource: String,
    },

    #[error("Database error: {0}")]
    Query(#[from] rusqlite::Error),
}


/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;
