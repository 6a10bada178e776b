//! Command-line interface definitions for the trending-keyword scraper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Invalid values (an unsupported time window, a zero limit) are rejected at
//! parse time, before any browser resource is acquired.

use clap::builder::PossibleValuesParser;
use clap::Parser;

/// Command-line arguments for one scrape invocation.
///
/// Defaults mirror the consuming service's expectations: United States, all
/// categories, the 7-day window, up to 50 keywords, headless browser.
///
/// # Examples
///
/// ```sh
/// # Defaults: --geo US --category 0 --hours 168 --limit 50
/// trending_now
///
/// # Sports trends in India over the last 7 days, top 20
/// trending_now --geo IN --category 17 --hours 168 --limit 20
///
/// # Show the browser window while debugging locally
/// trending_now --no-headless
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// ISO country/region code (e.g. US, IN, GB)
    #[arg(long, default_value = "US")]
    pub geo: String,

    /// Trending Now category id (0 = all categories)
    #[arg(long, default_value = "0")]
    pub category: String,

    /// Time window in hours
    #[arg(long, default_value = "168", value_parser = PossibleValuesParser::new(["4", "24", "48", "168"]))]
    pub hours: String,

    /// Maximum number of keywords to return
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: u64,

    /// Show the browser window instead of running headless (for debugging)
    #[arg(long)]
    pub no_headless: bool,

    /// Seconds to let client-side rendering settle before extraction
    #[arg(long, default_value_t = 4)]
    pub settle_secs: u64,
}
