//! Crawl engine - breadth-first crawl orchestration
//!
//! This module contains the crawl loop that ties the other pieces together:
//! - Seeding and draining the frontier in FIFO order
//! - Fetching pages with rotating request headers
//! - Extracting records and discovering same-host links
//! - Applying the politeness pause between fetches
//! - Reporting progress and honoring stop requests

use crate::config::{Config, SelectorRuleset};
use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::headers::RequestHeaders;
use crate::crawler::parser::{discover_links, parse_document};
use crate::crawler::politeness::Politeness;
use crate::output::{ProgressObserver, ResultSink};
use crate::state::{CrawlState, Frontier, FrontierEntry, RunStats, SharedCrawlState};
use crate::url::{normalize_url, ExtensionDenylist};
use crate::{HarvestError, PageError};
use fastrand::Rng;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Number of URL characters shown in a status line
const STATUS_URL_CHARS: usize = 60;

/// What a single call to [`CrawlEngine::step`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing left to do: the frontier is empty or the run is not active
    Exhausted,

    /// The entry was beyond the depth limit and was dropped unfetched
    TooDeep,

    /// The page answered with a status other than 200
    NonSuccess {
        /// HTTP status code
        status_code: u16,
    },

    /// The page was fetched and processed
    Processed {
        /// Whether a record was extracted
        record: bool,
        /// Number of new links admitted to the frontier
        links_enqueued: usize,
    },

    /// Fetching or parsing the page failed
    Failed,
}

/// Cloneable handle that can stop a running crawl from another task
#[derive(Debug, Clone)]
pub struct StopHandle {
    state: SharedCrawlState,
}

impl StopHandle {
    /// Requests the crawl to stop after the page currently in flight
    ///
    /// Has no effect unless the crawl is running.
    pub fn stop(&self) {
        if self.state.request_stop() {
            tracing::info!("Stop requested, finishing current page");
        }
    }

    /// Current lifecycle state of the engine
    pub fn state(&self) -> CrawlState {
        self.state.get()
    }
}

/// Single-domain breadth-first crawler
///
/// One engine runs one crawl at a time; `start` takes `&mut self` and
/// returns only when the run is over. Use [`CrawlEngine::stop_handle`] to
/// stop it from elsewhere.
pub struct CrawlEngine {
    client: Client,
    headers: RequestHeaders,
    extractor: Extractor,
    denylist: ExtensionDenylist,
    jitter: Duration,
    rng: Rng,

    state: SharedCrawlState,
    frontier: Frontier,
    stats: RunStats,
    sink: ResultSink,

    seed: Option<Url>,
    max_depth: u32,
    politeness: Politeness,
}

impl CrawlEngine {
    /// Creates an idle engine
    ///
    /// # Arguments
    ///
    /// * `config` - Fetch, link and politeness settings
    /// * `ruleset` - Field selectors used for extraction and export columns
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlEngine)` - Engine ready to start
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: &Config, ruleset: &SelectorRuleset) -> Result<Self, HarvestError> {
        let timeout = Duration::from_secs(config.crawler.request_timeout_secs);
        let client = build_http_client(timeout)?;
        let extractor = Extractor::new(ruleset);
        if extractor.is_empty() {
            tracing::warn!("No extraction rules configured, the crawl will produce no records");
        }
        let sink = ResultSink::new(extractor.field_names());

        Ok(Self {
            client,
            headers: RequestHeaders::from_config(&config.fetch),
            extractor,
            denylist: ExtensionDenylist::new(&config.links.denied_extensions),
            jitter: Duration::from_millis(config.crawler.jitter_ms),
            rng: Rng::new(),
            state: SharedCrawlState::new(),
            frontier: Frontier::new(),
            stats: RunStats::new(),
            sink,
            seed: None,
            max_depth: 0,
            politeness: Politeness::new(Duration::ZERO),
        })
    }

    /// Seeds the random source used for jitter and User-Agent rotation
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }

    /// Returns a handle that can stop this engine from another task
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            state: self.state.clone(),
        }
    }

    /// Requests the running crawl to stop; a no-op when idle or stopped
    pub fn stop(&self) {
        self.stop_handle().stop();
    }

    /// Current lifecycle state
    pub fn state(&self) -> CrawlState {
        self.state.get()
    }

    /// Counters of the current or last run
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Records collected by the current or last run
    pub fn results(&self) -> &ResultSink {
        &self.sink
    }

    /// Consumes the engine and returns its records
    pub fn into_results(self) -> ResultSink {
        self.sink
    }

    /// Number of URLs waiting in the frontier
    pub fn pending(&self) -> usize {
        self.frontier.len()
    }

    /// Number of frontier entries taken during the current or last run
    ///
    /// Entries dropped for depth count here but not in `scanned`.
    pub fn dequeued(&self) -> u64 {
        self.frontier.dequeued()
    }

    /// Runs a complete crawl
    ///
    /// Validates the input, resets all per-run state, then steps until the
    /// frontier is empty or a stop is requested. The observer's `on_done` is
    /// called exactly once when the loop exits.
    ///
    /// # Arguments
    ///
    /// * `seed` - Absolute http(s) URL; its host bounds the crawl
    /// * `max_depth` - Maximum link distance from the seed (0 = seed only)
    /// * `delay` - Base politeness pause after each fetch
    /// * `observer` - Receives status, data and done events
    ///
    /// # Returns
    ///
    /// * `Ok(RunStats)` - Final counters
    /// * `Err(HarvestError::InvalidInput)` - Bad seed or negative depth; no
    ///   events are emitted in this case
    pub async fn start<O>(
        &mut self,
        seed: &str,
        max_depth: i32,
        delay: Duration,
        observer: &mut O,
    ) -> Result<RunStats, HarvestError>
    where
        O: ProgressObserver + ?Sized,
    {
        self.prepare(seed, max_depth, delay)?;

        tracing::info!(
            "Starting crawl of {} (max depth {}, delay {:?})",
            seed,
            self.max_depth,
            delay
        );
        let start_time = std::time::Instant::now();

        loop {
            if self.step(observer).await == StepOutcome::Exhausted {
                break;
            }
        }

        let stopped_early = !self.frontier.is_empty();
        self.state.finish();

        if stopped_early {
            tracing::info!(
                "Crawl stopped with {} URLs still queued",
                self.frontier.len()
            );
        }
        tracing::info!(
            "Crawl finished: {} scanned, {} found, {} errors, {} URLs discovered in {:?}",
            self.stats.scanned,
            self.stats.found,
            self.stats.errors,
            self.frontier.visited_count(),
            start_time.elapsed()
        );

        observer.on_done(self.stats);
        Ok(self.stats)
    }

    /// Validates input and resets per-run state without fetching anything
    ///
    /// After a successful call the engine is Running with only the seed in
    /// the frontier, so the crawl can be driven one [`step`](Self::step) at
    /// a time.
    pub fn prepare(
        &mut self,
        seed: &str,
        max_depth: i32,
        delay: Duration,
    ) -> Result<(), HarvestError> {
        let seed_url = normalize_url(seed)
            .map_err(|e| HarvestError::InvalidInput(format!("seed URL '{}': {}", seed, e)))?;

        let max_depth = u32::try_from(max_depth).map_err(|_| {
            HarvestError::InvalidInput(format!("max depth must not be negative, got {}", max_depth))
        })?;

        self.frontier.reset(seed_url.clone());
        self.stats = RunStats::new();
        self.sink.clear();
        self.seed = Some(seed_url);
        self.max_depth = max_depth;
        self.politeness = Politeness::new(delay).with_jitter(self.jitter);
        self.state.begin();

        Ok(())
    }

    /// Processes the next frontier entry
    ///
    /// # Step Flow
    ///
    /// 1. Pop the oldest entry; drop it unfetched if it is too deep
    /// 2. Count it as scanned and report a status line
    /// 3. Fetch it; on HTTP 200 extract a record and, below the depth
    ///    limit, enqueue unseen same-host links one level deeper
    /// 4. Count any fetch or parse failure as an error
    /// 5. Pause for the politeness delay
    ///
    /// Returns [`StepOutcome::Exhausted`] without doing anything if the run
    /// is not active or the frontier is empty.
    pub async fn step<O>(&mut self, observer: &mut O) -> StepOutcome
    where
        O: ProgressObserver + ?Sized,
    {
        if !self.state.get().is_running() {
            return StepOutcome::Exhausted;
        }

        let Some(entry) = self.frontier.pop() else {
            return StepOutcome::Exhausted;
        };

        if entry.depth > self.max_depth {
            tracing::debug!("Skipping {} at depth {}", entry.url, entry.depth);
            return StepOutcome::TooDeep;
        }

        self.stats.record_scan();
        observer.on_status(&status_line(entry.url.as_str()));
        tracing::debug!("Fetching {} (depth {})", entry.url, entry.depth);

        let headers = self.headers.build(&mut self.rng);
        let outcome = match fetch_page(&self.client, &entry.url, headers).await {
            Ok(page) if page.is_ok() => {
                if page.final_url != entry.url.as_str() {
                    tracing::debug!("{} redirected to {}", entry.url, page.final_url);
                }
                match self.process_page(&entry, &page.body, observer) {
                    Ok(outcome) => outcome,
                    Err(e) => self.record_failure(&e),
                }
            }
            Ok(page) => {
                tracing::debug!("{} returned HTTP {}", entry.url, page.status_code);
                StepOutcome::NonSuccess {
                    status_code: page.status_code,
                }
            }
            Err(e) => self.record_failure(&e),
        };

        self.politeness.pause(&mut self.rng).await;

        outcome
    }

    /// Extracts and enqueues from one fetched page
    ///
    /// Synchronous so that the parsed document never lives across an await.
    fn process_page<O>(
        &mut self,
        entry: &FrontierEntry,
        body: &[u8],
        observer: &mut O,
    ) -> Result<StepOutcome, PageError>
    where
        O: ProgressObserver + ?Sized,
    {
        let document = parse_document(&entry.url, body)?;

        let record = self.extractor.extract(&document, entry.url.as_str());
        let links = match &self.seed {
            Some(seed) if entry.depth < self.max_depth => {
                discover_links(&document, &entry.url, seed, &self.denylist)
            }
            _ => Vec::new(),
        };
        drop(document);

        let found = record.is_some();
        let matched = record.as_ref().map_or(0, |r| r.matched_count());
        if let Some(record) = record {
            self.stats.record_found();
            observer.on_data(&record);
            self.sink.push(record);
        }

        let mut links_enqueued = 0;
        for link in links {
            if self.frontier.push_if_unseen(link, entry.depth + 1) {
                links_enqueued += 1;
            }
        }

        tracing::trace!(
            "{}: {} fields matched, {} new links",
            entry.url,
            matched,
            links_enqueued
        );

        Ok(StepOutcome::Processed {
            record: found,
            links_enqueued,
        })
    }

    fn record_failure(&mut self, error: &PageError) -> StepOutcome {
        self.stats.record_error();
        tracing::error!("{}", error);
        StepOutcome::Failed
    }
}

fn status_line(url: &str) -> String {
    let shown: String = url.chars().take(STATUS_URL_CHARS).collect();
    format!("Scanning: {}...", shown)
}
