//! CLI command implementations.

pub mod prune;
pub mod report;
pub mod update;
