//! Lifecycle state of the crawl engine
//!
//! This module defines the engine's run states and the shared cell through
//! which another task can request a cooperative stop.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Represents the current state of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// No run has started yet
    Idle,

    /// The traversal loop is active
    Running,

    /// The run ended, either by request or because the frontier emptied
    Stopped,
}

impl CrawlState {
    /// Returns true if the engine may fetch more pages
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    fn to_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Stopped => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Stopped,
            _ => Self::Idle,
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
        };
        write!(f, "{}", name)
    }
}

/// Crawl state shared between the engine and its stop handles
#[derive(Debug, Clone)]
pub struct SharedCrawlState {
    inner: Arc<AtomicU8>,
}

impl SharedCrawlState {
    /// Creates a cell in the Idle state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AtomicU8::new(CrawlState::Idle.to_u8())),
        }
    }

    /// Current state
    pub fn get(&self) -> CrawlState {
        CrawlState::from_u8(self.inner.load(Ordering::SeqCst))
    }

    /// Moves to Running at the start of a run
    pub fn begin(&self) {
        self.inner
            .store(CrawlState::Running.to_u8(), Ordering::SeqCst);
    }

    /// Moves Running to Stopped
    ///
    /// Returns true if this call performed the transition. An idle or
    /// already stopped engine is left untouched.
    pub fn request_stop(&self) -> bool {
        self.inner
            .compare_exchange(
                CrawlState::Running.to_u8(),
                CrawlState::Stopped.to_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok()
    }

    /// Marks the run finished regardless of the previous state
    pub fn finish(&self) {
        self.inner
            .store(CrawlState::Stopped.to_u8(), Ordering::SeqCst);
    }
}

impl Default for SharedCrawlState {
    fn default() -> Self {
        Self::new()
    }
}
