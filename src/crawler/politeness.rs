//! Politeness delay between consecutive fetches
//!
//! After every fetched page the engine pauses for a base delay plus a random
//! jitter drawn uniformly from `[0, jitter]`, so requests arrive at an
//! irregular, bounded rate.

use fastrand::Rng;
use std::time::Duration;

/// Base delay and jitter bound applied after each fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Politeness {
    /// Minimum pause after each fetch
    pub delay: Duration,

    /// Maximum random pause added on top of `delay`
    pub jitter: Duration,
}

impl Politeness {
    /// Creates a policy with the given base delay and no jitter
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            jitter: Duration::ZERO,
        }
    }

    /// Adds random jitter on top of the base delay
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Computes one pause: `delay + U[0, jitter]`
    pub fn effective_delay(&self, rng: &mut Rng) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.delay;
        }
        self.delay + Duration::from_millis(rng.u64(0..=jitter_ms))
    }

    /// Sleeps for one effective delay
    pub async fn pause(&self, rng: &mut Rng) {
        let pause = self.effective_delay(rng);
        if pause.is_zero() {
            return;
        }
        tracing::trace!("Politeness pause of {:?}", pause);
        tokio::time::sleep(pause).await;
    }
}
