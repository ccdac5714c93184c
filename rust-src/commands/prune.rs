//! Prune command - drop stale periods of one granularity.

use std::path::Path;

use anyhow::Result;

use crate::models::Granularity;
use crate::storage::RecordStore;


/// Run the prune command, keeping `period` and deleting every other
/// period key of the same length.
pub fn run(db_path: &Path, period: &str) -> Result<()> {
    if period.is_empty() {
        anyhow::bail!("Period must not be empty");
    }

    if !db_path.exists() {
        println!("\x1b[33mNo record database found at {}\x1b[0m", db_path.display());
        return Ok(());
    }

    if Granularity::from_key(period).is_none() {
        println!(
            "\x1b[33mWarning: '{}' is not a year, month or day period; pruning by length {}\x1b[0m",
            period,
            period.chars().count()
        );
    }

    let mut store = RecordStore::open(db_path)?;
    store.setup()?;
    let deleted = store.delete_stale_records(period)?;
    store.commit()?;
    store.close()?;

    println!("\x1b[32m+ Pruned {} stale records (kept {})\x1b[0m", deleted, period);

    Ok(())
}
