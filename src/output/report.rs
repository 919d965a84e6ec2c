//! Plain-text rendering of a finished crawl run

use crate::crawler::{CrawlReport, StatsSnapshot};
use std::fmt::Write;

/// Renders the per-seed child sets followed by the run counters
pub fn format_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "=== Crawl Results ===\n");
    for entry in &report.seeds {
        let children = entry.outcome.children();
        let _ = writeln!(
            out,
            "{} [{}] ({} children)",
            entry.seed,
            entry.outcome.state(),
            children.len()
        );
        for child in children {
            let _ = writeln!(out, "  - {}", child);
        }
    }

    let _ = writeln!(out);
    out.push_str(&format_run_stats(&report.stats));
    let _ = writeln!(out, "  Elapsed: {:.2}s", report.elapsed.as_secs_f64());

    out
}

/// Renders the run counters
pub fn format_run_stats(stats: &StatsSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Run Statistics:");
    let _ = writeln!(out, "  Addresses claimed: {}", stats.claimed);
    let _ = writeln!(out, "  Pages fetched: {}", stats.fetched);
    let _ = writeln!(out, "  Fetch failures: {}", stats.fetch_failures);
    let _ = writeln!(out, "  Already visited: {}", stats.already_visited);
    let _ = writeln!(out, "  Depth exhausted: {}", stats.depth_exhausted);
    let _ = writeln!(out, "  Rejected: {}", stats.rejected);
    let _ = writeln!(
        out,
        "  Links discovered: {} ({} followed)",
        stats.links_discovered, stats.children_accepted
    );

    out
}

/// Prints the report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}
