//! Data models for access log entries and stored hit counts.

mod access_record;
mod granularity;
mod log_entry;

pub use access_record::AccessRecord;
pub use granularity::Granularity;
pub use log_entry::LogEntry;
