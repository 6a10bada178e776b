//! # Trending Now
//!
//! A trending-search scraper that drives a real Chromium session against
//! Google Trends, extracts keywords through a cascade of fallback
//! strategies, and prints one JSON report on stdout.
//!
//! ## Features
//!
//! - Scrapes the trending feed for any geo, category, and time window
//! - Survives DOM churn with three extraction strategies (component
//!   selectors, ARIA roles, embedded-JSON regex over the page source)
//! - Case-insensitive dedup keeping first-seen order, capped at a hard limit
//! - Machine-readable success and failure envelopes on stdout; every
//!   diagnostic goes to stderr
//!
//! ## Usage
//!
//! ```sh
//! trending_now --geo US --category 18 --hours 24 --limit 20
//! ```
//!
//! ## Architecture
//!
//! One run is one pipeline pass:
//! 1. **Launch**: Start Chromium with the anti-automation profile
//! 2. **Navigate**: Load the trending page and let client rendering settle
//! 3. **Extract**: Run the strategy cascade into the run's keyword sink
//! 4. **Report**: Print exactly one JSON envelope and exit 0 or 1

use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod browser;
mod categories;
mod cli;
mod keywords;
mod models;
mod page;
mod scrape;
mod strategies;

use cli::Cli;
use models::{RequestContext, TrendsReport};
use scrape::ScrapeOptions;

#[tokio::main]
#[instrument]
async fn main() -> ExitCode {
    // --- Tracing init ---
    // stdout belongs to the JSON report, so all log output goes to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("trending_now starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.geo, ?args.category, ?args.hours, args.limit, "Parsed CLI arguments");

    let ctx = RequestContext::new(&args.geo, &args.category, &args.hours, args.limit as usize);
    let options = ScrapeOptions {
        headless: !args.no_headless,
        settle: Duration::from_secs(args.settle_secs),
    };

    let report = match scrape::scrape_trending(&ctx, &options).await {
        Ok(keywords) => TrendsReport::success(&ctx, keywords),
        Err(error) => {
            error!(%error, "Scrape failed");
            TrendsReport::failure(error.to_string())
        }
    };
    let ok = emit(&report) && !report.is_failure();

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    if ok { ExitCode::SUCCESS } else { ExitCode::from(1) }
}

/// Print the report as the run's single line of stdout. Returns whether a
/// success envelope could actually be emitted: if serialization fails, a
/// hand-built failure envelope goes out instead so consumers always read
/// well-formed JSON.
fn emit(report: &TrendsReport) -> bool {
    match serde_json::to_string(report) {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(error) => {
            error!(%error, "Could not serialize the report");
            println!(r#"{{"error":"failed to serialize report","keywords":[],"count":0}}"#);
            false
        }
    }
}
