//! End-of-run summary
//!
//! Formats run statistics for the terminal once a crawl has finished.

use crate::state::RunStats;
use std::time::Duration;

/// Formats run statistics as a multi-line report
pub fn format_run_summary(stats: &RunStats, elapsed: Duration) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Summary ===\n\n");
    out.push_str(&format!("  Pages scanned: {}\n", stats.scanned));
    out.push_str(&format!(
        "  Records found: {} ({:.1}% of scanned pages)\n",
        stats.found,
        stats.yield_rate()
    ));
    out.push_str(&format!(
        "  Errors: {} ({:.1}%)\n",
        stats.errors,
        stats.error_rate()
    ));

    let secs = elapsed.as_secs_f64();
    out.push_str(&format!("  Duration: {:.1}s", secs));
    if secs > 0.0 && stats.scanned > 0 {
        out.push_str(&format!(" ({:.2} pages/sec)", stats.scanned as f64 / secs));
    }
    out.push('\n');

    out
}

/// Prints run statistics to stdout
pub fn print_run_summary(stats: &RunStats, elapsed: Duration) {
    print!("{}", format_run_summary(stats, elapsed));
}
