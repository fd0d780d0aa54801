//! Breadth-first frontier with a run-wide visited set

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting to be processed, with its link distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to fetch
    pub url: Url,

    /// Number of link hops from the seed (the seed is 0)
    pub depth: u32,
}

/// FIFO queue of pending URLs plus every URL ever admitted to it
///
/// A URL is admitted at most once per run: the visited set only grows, and
/// membership is checked before enqueueing. Because the queue is FIFO and
/// each entry's children are one level deeper, all entries of depth *d* are
/// dequeued before any entry of depth *d + 1* produced from them.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    dequeued: u64,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all state and admits the seed at depth 0
    pub fn reset(&mut self, seed: Url) {
        self.queue.clear();
        self.visited.clear();
        self.dequeued = 0;
        self.visited.insert(seed.as_str().to_string());
        self.queue.push_back(FrontierEntry { url: seed, depth: 0 });
    }

    /// Enqueues the URL at `depth` unless it was admitted before
    ///
    /// Returns true if the URL was enqueued. The first admission fixes the
    /// URL's depth for the rest of the run.
    pub fn push_if_unseen(&mut self, url: Url, depth: u32) -> bool {
        if !self.visited.insert(url.as_str().to_string()) {
            return false;
        }
        self.queue.push_back(FrontierEntry { url, depth });
        true
    }

    /// Removes and returns the oldest entry
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        let entry = self.queue.pop_front()?;
        self.dequeued += 1;
        Some(entry)
    }

    /// Number of entries waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs admitted during this run
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of entries dequeued during this run
    pub fn dequeued(&self) -> u64 {
        self.dequeued
    }
}
