//! Aggregation of parsed requests into per-period hit counts.

mod hit_counts;

#[allow(unused_imports)]
pub use hit_counts::{count_hits, HitCounts, PeriodResource};
