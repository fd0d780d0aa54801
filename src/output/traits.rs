//! Progress observer interface
//!
//! This module defines the trait through which the crawl engine reports
//! progress, and a channel-backed implementation for consumers that live on
//! another task (a terminal presenter, a UI event loop).

use crate::output::record::Record;
use crate::state::RunStats;
use tokio::sync::mpsc::UnboundedSender;

/// Receiver of crawl progress
///
/// The engine calls these synchronously from the crawl task, in the exact
/// order pages are processed.
pub trait ProgressObserver {
    /// A human-readable progress line
    fn on_status(&mut self, message: &str);

    /// One newly extracted record
    fn on_data(&mut self, record: &Record);

    /// Final statistics; called exactly once per run, after the loop exits
    fn on_done(&mut self, stats: RunStats);
}

/// A progress event in owned form
#[derive(Debug, Clone, PartialEq)]
pub enum CrawlEvent {
    /// Progress line
    Status(String),

    /// Newly extracted record
    Data(Record),

    /// Terminal statistics
    Done(RunStats),
}

/// Forwards every event into an unbounded channel
///
/// Sending never blocks the crawl. Events sent after the receiver is gone
/// are dropped.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: UnboundedSender<CrawlEvent>,
}

impl ChannelObserver {
    /// Creates an observer feeding `tx`
    pub fn new(tx: UnboundedSender<CrawlEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: CrawlEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("Progress receiver dropped, discarding event");
        }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_status(&mut self, message: &str) {
        self.send(CrawlEvent::Status(message.to_string()));
    }

    fn on_data(&mut self, record: &Record) {
        self.send(CrawlEvent::Data(record.clone()));
    }

    fn on_done(&mut self, stats: RunStats) {
        self.send(CrawlEvent::Done(stats));
    }
}
