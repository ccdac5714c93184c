//! Parser for Common and Combined Log Format access logs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use log::warn;
use regex::Regex;

use crate::models::LogEntry;


/// Longest resource the `records` table stores.
pub const MAX_RESOURCE_LEN: usize = 256;

const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";


fn line_regex() -> &'static Regex {
    static LINE_RE: OnceLock<Regex> = OnceLock::new();
    LINE_RE.get_or_init(|| {
        Regex::new(
            r#"^(?P<host>\S+) \S+ \S+ \[(?P<time>[^\]]+)\] "(?P<method>[A-Z]+) (?P<path>\S+)(?: [^"]*)?" (?P<status>\d{3}) "#,
        )
        .expect("access log regex is valid")
    })
}


/// Parse a single access log file and return its requests.
pub fn parse_log_file(file_path: &Path) -> Result<Vec<LogEntry>> {
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open file: {}", file_path.display()))?;

    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = match line_result {
            Ok(l) => l,
            Err(e) => {
                warn!(
                    "Error reading line {} in {}: {}",
                    line_num + 1,
                    file_path.display(),
                    e
                );
                continue;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Some(entry) => entries.push(entry),
            None => warn!(
                "Skipping malformed log line at {}:{}",
                file_path.display(),
                line_num + 1
            ),
        }
    }

    Ok(entries)
}


/// Parse multiple access log files. Unreadable files are reported and skipped.
pub fn parse_all_log_files<P: AsRef<Path>>(file_paths: &[P]) -> Result<Vec<LogEntry>> {
    if file_paths.is_empty() {
        anyhow::bail!("No log files provided to parse");
    }

    let mut all_entries = Vec::new();

    for file_path in file_paths {
        let file_path = file_path.as_ref();
        match parse_log_file(file_path) {
            Ok(entries) => all_entries.extend(entries),
            Err(e) => warn!("Error parsing {}: {:#}", file_path.display(), e),
        }
    }

    Ok(all_entries)
}


/// Parse one log line, `None` if it is not in Common Log Format.
pub fn parse_line(line: &str) -> Option<LogEntry> {
    let caps = line_regex().captures(line)?;

    let timestamp = parse_timestamp(&caps["time"])?;
    let status = caps["status"].parse().ok()?;

    Some(LogEntry {
        host: caps["host"].to_string(),
        timestamp,
        method: caps["method"].to_string(),
        resource: normalize_resource(&caps["path"]),
        status,
    })
}


/// Parse a `10/Oct/2000:13:55:36 -0700` timestamp.
fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}


/// Strip the query string and fragment, and cap the length to the column width.
fn normalize_resource(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].chars().take(MAX_RESOURCE_LEN).collect()
}
