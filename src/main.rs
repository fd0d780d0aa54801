//! Shop-Harvest main entry point
//!
//! This is the command-line interface for the Shop-Harvest product crawler.

use clap::Parser;
use shop_harvest::config::{load_config_with_hash, Config, SelectorRuleset};
use shop_harvest::output::{print_run_summary, ChannelObserver, CrawlEvent, ExportFormat};
use shop_harvest::output::{NOT_FOUND, URL_COLUMN};
use shop_harvest::{CrawlEngine, ExportError, Record};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::unbounded_channel;
use tracing_subscriber::EnvFilter;

/// Shop-Harvest: A polite single-domain product crawler
///
/// Shop-Harvest walks one shop breadth-first from a seed URL, extracts
/// product fields with CSS selectors, and exports what it found as CSV,
/// JSON or a spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "shop-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A polite single-domain product crawler", long_about = None)]
struct Cli {
    /// Seed URL; only pages on its host are crawled
    #[arg(value_name = "SEED")]
    seed: String,

    /// Path to TOML configuration file (defaults are used if omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to JSON selector file (overrides the config)
    #[arg(short, long, value_name = "FILE")]
    selectors: Option<PathBuf>,

    /// Maximum link depth from the seed (overrides the config)
    #[arg(short, long, allow_negative_numbers = true)]
    depth: Option<i32>,

    /// Politeness delay after each page in milliseconds (overrides the config)
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Export format: csv, json or xlsx (overrides the config)
    #[arg(short, long)]
    format: Option<String>,

    /// Output file prefix; a timestamp and extension are appended
    #[arg(short, long, value_name = "PREFIX")]
    output: Option<String>,

    /// Do not export records after the crawl
    #[arg(long)]
    no_export: bool,

    /// Validate config and selectors and show what would be crawled
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Settings for one run after applying CLI overrides to the config
struct RunPlan {
    config: Config,
    ruleset: SelectorRuleset,
    selectors_path: PathBuf,
    max_depth: i32,
    delay: Duration,
    format: ExportFormat,
    prefix: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let plan = build_plan(&cli, config)?;

    if cli.dry_run {
        handle_dry_run(&cli.seed, &plan);
        return Ok(());
    }

    handle_crawl(cli.seed, plan, !cli.no_export).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shop_harvest=info,warn"),
            1 => EnvFilter::new("shop_harvest=debug,info"),
            2 => EnvFilter::new("shop_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies CLI overrides and loads the selector ruleset
fn build_plan(cli: &Cli, config: Config) -> Result<RunPlan, Box<dyn std::error::Error>> {
    let selectors_path = cli
        .selectors
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.selectors.path));
    let ruleset = SelectorRuleset::load(&selectors_path)?;

    let max_depth = match cli.depth {
        Some(depth) => depth,
        None => i32::try_from(config.crawler.max_depth).unwrap_or(i32::MAX),
    };

    let delay = Duration::from_millis(cli.delay_ms.unwrap_or(config.crawler.politeness_delay_ms));

    let format: ExportFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()?;

    let prefix = cli
        .output
        .clone()
        .unwrap_or_else(|| config.output.prefix.clone());

    Ok(RunPlan {
        config,
        ruleset,
        selectors_path,
        max_depth,
        delay,
        format,
        prefix,
    })
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(seed: &str, plan: &RunPlan) {
    println!("=== Shop-Harvest Dry Run ===\n");

    println!("Seed: {}", seed);
    println!("  Max depth: {}", plan.max_depth);
    println!("  Politeness delay: {:?}", plan.delay);
    println!("  Jitter: up to {}ms", plan.config.crawler.jitter_ms);
    println!(
        "  Request timeout: {}s",
        plan.config.crawler.request_timeout_secs
    );

    println!("\nRequest headers:");
    println!("  User agents in pool: {}", plan.config.fetch.user_agents.len());
    println!("  Accept-Language: {}", plan.config.fetch.accept_language);

    println!(
        "\nDenied extensions: {}",
        plan.config.links.denied_extensions.join(" ")
    );

    println!(
        "\nSelectors ({} fields from {}):",
        plan.ruleset.len(),
        plan.selectors_path.display()
    );
    if plan.ruleset.is_empty() {
        println!("  (none, links are followed but no records are produced)");
    }
    for (field, selectors) in plan.ruleset.iter() {
        println!("  - {}: {}", field, selectors.join(" | "));
    }

    println!("\nOutput: {}_<timestamp>.{}", plan.prefix, plan.format.extension());
    let mut columns = vec![URL_COLUMN.to_string()];
    columns.extend(plan.ruleset.field_names());
    println!("  Columns: {}", columns.join(", "));

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    seed: String,
    plan: RunPlan,
    export: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = CrawlEngine::new(&plan.config, &plan.ruleset)?;
    let stop = engine.stop_handle();

    let (tx, mut rx) = unbounded_channel();
    let start_time = Instant::now();

    let (max_depth, delay) = (plan.max_depth, plan.delay);
    let crawl = tokio::spawn(async move {
        let mut observer = ChannelObserver::new(tx);
        let result = engine.start(&seed, max_depth, delay, &mut observer).await;
        (engine, result)
    });

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping after the current page");
            stop.stop();
        }
    });

    // The channel closes when the crawl task drops its observer
    let mut presenter = Presenter::default();
    while let Some(event) = rx.recv().await {
        presenter.present(&event);
    }

    let (engine, result) = crawl.await?;
    interrupt.abort();

    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if export {
        export_results(&engine, plan.format, &plan.prefix);
    }

    print_run_summary(&stats, start_time.elapsed());

    Ok(())
}

/// Writes the collected records, reporting the outcome on the log
fn export_results(engine: &CrawlEngine, format: ExportFormat, prefix: &str) {
    match engine.results().export(format, prefix) {
        Ok(path) => tracing::info!("Saved to {}", display_path(&path)),
        Err(ExportError::EmptyResult) => tracing::warn!("No data to export"),
        Err(e) => tracing::error!("Export failed: {}", e),
    }
}

/// Logs progress events, keeping a running count of found records
#[derive(Debug, Default)]
struct Presenter {
    found: u64,
}

impl Presenter {
    fn present(&mut self, event: &CrawlEvent) {
        match event {
            CrawlEvent::Status(message) => tracing::info!("{}", self.status_line(message)),
            CrawlEvent::Data(record) => {
                self.found += 1;
                tracing::info!("[FOUND] {}", headline(record));
            }
            CrawlEvent::Done(stats) => tracing::info!(
                "Done. Scanned: {}, Found: {}, Errors: {}",
                stats.scanned,
                stats.found,
                stats.errors
            ),
        }
    }

    fn status_line(&self, message: &str) -> String {
        format!("{} | Products: {}", message, self.found)
    }
}

/// The first two field values of a record, e.g. `Widget - $9.99`
fn headline(record: &Record) -> String {
    let values: Vec<&str> = record
        .fields()
        .take(2)
        .map(|(_, value)| value.unwrap_or(NOT_FOUND))
        .collect();

    if values.is_empty() {
        return record.url().to_string();
    }
    values.join(" - ")
}

fn display_path(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
