//! Hit counting per period and resource.

use std::collections::HashMap;

use crate::models::{Granularity, LogEntry};


/// `(period key, resource)` pair identifying one stored record.
pub type PeriodResource = (String, String);

/// Hit totals keyed by period and resource.
pub type HitCounts = HashMap<PeriodResource, i64>;


/// Count hits for every requested granularity.
///
/// Each entry contributes once per granularity, so a request on
/// 2024-01-15 is counted under `2024`, `2024-01` and `2024-01-15`.
/// Failed requests (status 400 and above) are ignored.
pub fn count_hits(entries: &[LogEntry], granularities: &[Granularity]) -> HitCounts {
    let mut counts = HitCounts::new();

    for entry in entries.iter().filter(|e| e.is_hit()) {
        for &granularity in granularities {
            *counts
                .entry((entry.date_key(granularity), entry.resource.clone()))
                .or_insert(0) += 1;
        }
    }

    counts
}
