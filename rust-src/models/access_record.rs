//! Aggregated hit count row.

use serde::{Deserialize, Serialize};


/// Hits on one resource during one period.
///
/// `record_date` is a period key whose length encodes its granularity
/// (`2024`, `2024-01` or `2024-01-15`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    pub record_date: String,
    pub resource: String,
    pub record_count: i64,
}
