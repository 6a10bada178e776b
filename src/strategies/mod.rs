//! Extraction strategies for pulling trending keywords out of the page.
//!
//! The page is hostile to scraping: class names are generated, the DOM layout
//! shifts between deployments, and headless sessions sometimes get a reduced
//! shell. Instead of one selector, extraction is an ordered cascade of three
//! techniques of decreasing specificity and increasing robustness:
//!
//! | Order | Strategy | Module | Runs when |
//! |-------|----------|--------|-----------|
//! | 1 | Component CSS selectors | [`components`] | always |
//! | 2 | ARIA role selectors | [`roles`] | strategy 1 found nothing |
//! | 3 | Embedded-JSON regex over page source | [`page_source`] | fewer than 3 keywords so far |
//!
//! # Common Patterns
//!
//! Each strategy module exports one `attempt(page, sink)` function that feeds
//! raw candidates into the run's shared [`KeywordSink`] and reports a
//! [`StrategyOutcome`]. Failures inside a strategy (a selector that errors, a
//! wait that times out) are soft: they surface as an outcome value for the
//! orchestrator to log, never as a propagated error, so a broken technique
//! can never take down the run.

pub mod components;
pub mod page_source;
pub mod roles;

use crate::keywords::KeywordSink;
use crate::page::TrendPage;
use tracing::{debug, info, warn};

/// Minimum keyword count the element-based strategies must reach before the
/// page-source fallback is skipped.
pub const FALLBACK_MIN_KEYWORDS: usize = 3;

/// One self-contained extraction technique in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Component CSS selectors against the rendered tree.
    ComponentSelectors,
    /// ARIA role selectors against the rendered tree.
    RoleElements,
    /// Regex rules over the raw page source.
    PageSource,
}

/// What one strategy attempt came to.
///
/// Swallowed per-strategy failures are explicit values here rather than
/// suppressed exceptions, so the orchestrator can inspect and log them while
/// the cascade keeps moving.
#[derive(Debug)]
pub enum StrategyOutcome {
    /// The strategy ran and fed `added` new keywords into the sink.
    Extracted { added: usize },
    /// The strategy could not run to completion. Never fatal.
    SoftFailed { reason: String },
}

impl Strategy {
    /// Cascade order: most specific first, most robust last.
    pub const CASCADE: [Strategy; 3] = [
        Strategy::ComponentSelectors,
        Strategy::RoleElements,
        Strategy::PageSource,
    ];

    /// Name used in log lines.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::ComponentSelectors => "component-selectors",
            Strategy::RoleElements => "role-elements",
            Strategy::PageSource => "page-source",
        }
    }

    /// Whether this step should run given what the sink already holds.
    ///
    /// Role extraction is only worth its bounded wait when the component
    /// selectors found nothing; the page-source fallback fires whenever the
    /// element strategies left fewer than [`FALLBACK_MIN_KEYWORDS`] keywords,
    /// merging into (never replacing) what they found.
    fn should_run(self, sink: &KeywordSink) -> bool {
        match self {
            Strategy::ComponentSelectors => true,
            Strategy::RoleElements => sink.is_empty(),
            Strategy::PageSource => sink.len() < FALLBACK_MIN_KEYWORDS,
        }
    }

    async fn attempt<P: TrendPage>(self, page: &P, sink: &mut KeywordSink) -> StrategyOutcome {
        match self {
            Strategy::ComponentSelectors => components::attempt(page, sink).await,
            Strategy::RoleElements => roles::attempt(page, sink).await,
            Strategy::PageSource => page_source::attempt(page, sink).await,
        }
    }
}

/// Run the full cascade against one page.
///
/// The sink is the run's single point of truth: every strategy feeds it, so
/// uniqueness and the limit hold across strategies, and the cascade stops as
/// soon as the sink is full.
pub async fn run_cascade<P: TrendPage>(page: &P, sink: &mut KeywordSink) {
    for strategy in Strategy::CASCADE {
        if sink.is_full() {
            debug!(total = sink.len(), "Keyword limit reached; skipping remaining strategies");
            break;
        }
        if !strategy.should_run(sink) {
            debug!(strategy = strategy.name(), total = sink.len(), "Skipping strategy");
            continue;
        }
        info!(strategy = strategy.name(), "Trying extraction strategy");
        match strategy.attempt(page, sink).await {
            StrategyOutcome::Extracted { added } => {
                info!(
                    strategy = strategy.name(),
                    added,
                    total = sink.len(),
                    "Strategy finished"
                );
            }
            StrategyOutcome::SoftFailed { reason } => {
                warn!(
                    strategy = strategy.name(),
                    %reason,
                    "Strategy failed; continuing with the next one"
                );
            }
        }
    }
}
