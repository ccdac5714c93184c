//! Access Log Analyzer CLI
//!
//! Per-resource hit counts from web server access logs, stored in SQLite.

mod aggregation;
mod cli;
mod commands;
mod config;
mod data;
mod logger;
mod models;
mod storage;


fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
