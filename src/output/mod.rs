//! Output module for presenting crawl results
//!
//! This module handles:
//! - Printing per-seed child sets and run counters after a crawl
//! - Reading visited-set statistics for the `--stats` mode

mod report;
pub mod stats;

pub use report::{format_report, format_run_stats, print_report};
pub use stats::{load_statistics, load_statistics_at, print_statistics, StoreStatistics};
