//! Update command - load access logs into the record store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

use crate::aggregation::{count_hits, HitCounts};
use crate::config::current_period;
use crate::data::parse_all_log_files;
use crate::models::Granularity;
use crate::storage::{RecordStore, StoreError};


/// How `write_counts` changed the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}


/// Run the update command.
pub fn run(db_path: &Path, log_files: &[PathBuf], prune: bool, atomic_upsert: bool) -> Result<()> {
    println!("Updating record database...");

    let entries = parse_all_log_files(log_files)?;
    println!("Parsed {} requests from {} file(s)", entries.len(), log_files.len());

    let counts = count_hits(&entries, &Granularity::ALL);

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut store = RecordStore::open(db_path)?;
    store.setup()?;

    let summary = if atomic_upsert {
        upsert_counts(&mut store, &counts)?
    } else {
        write_counts(&mut store, &counts)?
    };

    let mut pruned = 0;
    if prune {
        for granularity in Granularity::ALL {
            pruned += store.delete_stale_records(&current_period(granularity))?;
        }
    }

    store.commit()?;
    store.close()?;

    println!(
        "Inserted {} and updated {} records ({} unchanged)",
        summary.inserted, summary.updated, summary.unchanged
    );
    if prune {
        println!("Pruned {} stale records", pruned);
    }
    println!("Database: {}", db_path.display());

    Ok(())
}


/// Store each count, inserting new pairs and overwriting existing ones.
///
/// Looks every pair up first and chooses between insert and update.
pub fn write_counts(store: &mut RecordStore, counts: &HitCounts) -> Result<UpdateSummary> {
    let mut summary = UpdateSummary::default();

    for ((record_date, resource), &count) in sorted(counts) {
        let existing = store.query_record_count(record_date, resource)?;

        if existing == count {
            summary.unchanged += 1;
            continue;
        }

        if existing == 0 {
            match store.insert_record_count(count, record_date, resource) {
                Ok(()) => {
                    summary.inserted += 1;
                    continue;
                }
                // A stored zero reads the same as a missing row.
                Err(StoreError::UniqueConstraintViolation { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }

        store.update_record_count(count, record_date, resource)?;
        summary.updated += 1;
    }

    debug!("Wrote counts: {:?}", summary);
    Ok(summary)
}


/// Store each count with a single upsert statement per pair.
pub fn upsert_counts(store: &mut RecordStore, counts: &HitCounts) -> Result<UpdateSummary> {
    for ((record_date, resource), &count) in sorted(counts) {
        store.upsert_record_count(count, record_date, resource)?;
    }

    Ok(UpdateSummary {
        updated: counts.len(),
        ..Default::default()
    })
}


fn sorted(counts: &HitCounts) -> Vec<(&(String, String), &i64)> {
    let mut pairs: Vec<_> = counts.iter().collect();
    pairs.sort();
    pairs
}
