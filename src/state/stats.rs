/// Counters for a single crawl run
///
/// Only the crawl engine increments these; everyone else receives copies.
/// All counters start at zero for each run and never decrease within it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Pages fetched (or attempted)
    pub scanned: u64,

    /// Records extracted
    pub found: u64,

    /// Pages that failed to fetch or parse
    pub errors: u64,
}

impl RunStats {
    /// Creates zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_scan(&mut self) {
        self.scanned += 1;
    }

    pub(crate) fn record_found(&mut self) {
        self.found += 1;
    }

    pub(crate) fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Share of scanned pages that produced a record, as a percentage
    pub fn yield_rate(&self) -> f64 {
        if self.scanned == 0 {
            return 0.0;
        }
        (self.found as f64 / self.scanned as f64) * 100.0
    }

    /// Share of scanned pages that failed, as a percentage
    pub fn error_rate(&self) -> f64 {
        if self.scanned == 0 {
            return 0.0;
        }
        (self.errors as f64 / self.scanned as f64) * 100.0
    }
}
