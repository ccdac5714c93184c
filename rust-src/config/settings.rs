//! Application settings and path constants.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::models::Granularity;


/// Number of rows a report shows unless told otherwise.
pub const DEFAULT_REPORT_LIMIT: u32 = 10;

/// Environment variable overriding the database location.
pub const DB_ENV_VAR: &str = "ALA_DB";


/// Get the analyzer's data directory.
pub fn get_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".access-log-analyzer")
}


/// Get the default database path.
pub fn get_db_path() -> PathBuf {
    get_data_dir().join("records.db")
}


/// Database path from the command line, falling back to the default.
pub fn resolve_db_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(get_db_path)
}


/// Period key of the current local date, e.g. `2024` for `Granularity::Year`.
///
/// This is the period kept when stale records are pruned.
pub fn current_period(granularity: Granularity) -> String {
    granularity.period_key(&Local::now())
}
