//! Readers for web server access logs.

mod access_log_parser;

#[allow(unused_imports)]
pub use access_log_parser::{parse_all_log_files, parse_log_file, MAX_RESOURCE_LEN};
