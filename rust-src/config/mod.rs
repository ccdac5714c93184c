//! Configuration and settings for the access log analyzer.

mod settings;

#[allow(unused_imports)]
pub use settings::{
    current_period,
    get_data_dir,
    get_db_path,
    resolve_db_path,
    DB_ENV_VAR,
    DEFAULT_REPORT_LIMIT,
};
