//! End-to-end scrape pipeline.
//!
//! One run is one browser session: build the target URL, launch and
//! navigate, give client-side rendering a moment to settle, run the
//! extraction cascade, and tear the browser down. Fatal errors here are the
//! ones the extraction strategies cannot route around, launch and navigation
//! failures; everything past that point degrades to fewer (or zero)
//! keywords instead of an error.

use crate::browser::BrowserSession;
use crate::keywords::KeywordSink;
use crate::models::RequestContext;
use crate::strategies;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};

/// Knobs that shape a run without changing what is scraped.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeOptions {
    /// Run the browser without a visible window.
    pub headless: bool,
    /// How long to let scripts hydrate the page after navigation.
    pub settle: Duration,
}

/// Scrape one trending page and return its deduplicated keywords,
/// first-seen order, at most `ctx.limit` of them.
///
/// An empty vector is a normal outcome, not an error.
#[instrument(skip(ctx, options), fields(geo = %ctx.geo, category = %ctx.category, hours = %ctx.hours))]
pub async fn scrape_trending(
    ctx: &RequestContext,
    options: &ScrapeOptions,
) -> Result<Vec<String>, Box<dyn Error>> {
    let url = ctx.target_url()?;
    info!(%url, "Fetching trending page");
    let session = BrowserSession::open(&url, options.headless).await?;
    info!(settle_secs = options.settle.as_secs(), "Letting the page settle");
    tokio::time::sleep(options.settle).await;

    let mut sink = KeywordSink::new(ctx.limit);
    strategies::run_cascade(&session, &mut sink).await;
    session.close().await;

    let keywords = sink.into_keywords();
    info!(count = keywords.len(), "Extraction finished");
    Ok(keywords)
}
