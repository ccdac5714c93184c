//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use crate::config::{resolve_db_path, DB_ENV_VAR, DEFAULT_REPORT_LIMIT};
use crate::logger::init_logger;
use crate::models::Granularity;


/// Access Log Analyzer - count and report hits per resource from web server logs
#[derive(Parser)]
#[command(name = "ala")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Record database file (default: ~/.access-log-analyzer/records.db)
    #[arg(long, global = true, env = DB_ENV_VAR)]
    db: Option<PathBuf>,

    /// Print debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// Count hits in access logs and store them per year, month and day
    Update {
        /// Access log files in Common or Combined Log Format
        #[arg(required = true)]
        log_files: Vec<PathBuf>,

        /// Drop every year, month and day except the current ones
        #[arg(long)]
        prune: bool,

        /// Write each count with a single upsert statement
        #[arg(long)]
        atomic_upsert: bool,
    },

    /// Show the most requested resources
    Report {
        /// Exact period to report, e.g. 2024, 2024-01 or 2024-01-15
        #[arg(short, long, conflicts_with = "granularity")]
        period: Option<String>,

        /// Report every period of this granularity (default: day)
        #[arg(short, long, value_enum)]
        granularity: Option<Granularity>,

        /// Maximum number of rows, 0 for all
        #[arg(short = 'n', long, default_value_t = DEFAULT_REPORT_LIMIT)]
        limit: u32,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete stored periods with the same length as PERIOD, except PERIOD itself
    Prune {
        /// Period to keep, e.g. 2024 keeps this year and drops other years
        period: String,
    },
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let db_path = resolve_db_path(cli.db.as_deref());

    match cli.command {
        Some(Commands::Update { log_files, prune, atomic_upsert }) => {
            commands::update::run(&db_path, &log_files, prune, atomic_upsert)?;
        }
        Some(Commands::Report { period, granularity, limit, json }) => {
            commands::report::run(&db_path, period, granularity, limit, json)?;
        }
        Some(Commands::Prune { period }) => {
            commands::prune::run(&db_path, &period)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
