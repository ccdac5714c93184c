//! Report command - show the most requested resources.

use std::path::Path;

use anyhow::Result;

use crate::models::{AccessRecord, Granularity};
use crate::storage::{DateQuery, RecordStore};


/// Run the report command.
pub fn run(
    db_path: &Path,
    period: Option<String>,
    granularity: Option<Granularity>,
    limit: u32,
    json: bool,
) -> Result<()> {
    if !db_path.exists() {
        println!("No record database found. Run 'ala update <LOG_FILES>' to start tracking.");
        return Ok(());
    }

    let query = match period {
        Some(period) => DateQuery::from(period),
        None => DateQuery::from(granularity.unwrap_or(Granularity::Day)),
    };

    let records = load_records(db_path, query.clone(), limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No records match {}", describe(&query));
        return Ok(());
    }

    println!("\n{}", "=".repeat(60));
    println!("{:^60}", format!("Top resources by {}", describe(&query)));
    println!("{}\n", "=".repeat(60));

    println!("  {:10} {:>12}  {}", "PERIOD", "HITS", "RESOURCE");
    println!("{}", "-".repeat(60));

    for record in &records {
        println!(
            "  {:10} {:>12}  {}",
            record.record_date,
            format_number(record.record_count),
            record.resource
        );
    }

    Ok(())
}


/// Query the store and collect the result rows.
fn load_records(db_path: &Path, query: DateQuery, limit: u32) -> Result<Vec<AccessRecord>> {
    let mut store = RecordStore::open(db_path)?;
    store.setup()?;

    let records = store.query_records(query, Some(limit))?.collect();
    store.close()?;

    Ok(records)
}


fn describe(query: &DateQuery) -> String {
    match query {
        DateQuery::Exact(period) => format!("period {}", period),
        DateQuery::Length(len) => match Granularity::from_len(*len) {
            Some(granularity) => granularity.to_string(),
            None => format!("{}-character periods", len),
        },
    }
}


/// Format a number with commas.
fn format_number(n: i64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}
