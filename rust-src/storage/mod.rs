//! Storage layer for aggregated hit counts.

mod error;
mod record_store;

#[allow(unused_imports)]
pub use error::{Result, StoreError};
#[allow(unused_imports)]
pub use record_store::{DateQuery, RecordRows, RecordStore};
