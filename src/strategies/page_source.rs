//! Strategy 3: embedded-JSON regex over the raw page source.
//!
//! The trending page inlines its data as JSON inside script tags. When the
//! rendered DOM gives up too little, this fallback scans the raw source for
//! known key patterns and harvests their string values. Matches merge into
//! whatever the element strategies already collected.

use crate::keywords::KeywordSink;
use crate::page::TrendPage;
use crate::strategies::StrategyOutcome;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Key patterns scanned in order. Values are capped at 80 characters in the
/// pattern itself so a malformed blob cannot produce runaway captures.
static EMBEDDED_PATTERNS: Lazy<[(&'static str, Regex); 3]> = Lazy::new(|| {
    [
        ("title", Regex::new(r#""title"\s*:\s*"([^"]{3,80})""#).unwrap()),
        ("query", Regex::new(r#""query"\s*:\s*"([^"]{3,80})""#).unwrap()),
        (
            "entityTitle",
            Regex::new(r#""entityTitle"\s*:\s*"([^"]{3,80})""#).unwrap(),
        ),
    ]
});

pub async fn attempt<P: TrendPage>(page: &P, sink: &mut KeywordSink) -> StrategyOutcome {
    let source = match page.source().await {
        Ok(source) => source,
        Err(error) => {
            return StrategyOutcome::SoftFailed {
                reason: format!("page source unavailable: {error}"),
            };
        }
    };
    debug!(bytes = source.len(), "Scanning page source");
    let before = sink.len();
    for (key, pattern) in EMBEDDED_PATTERNS.iter() {
        if sink.is_full() {
            break;
        }
        let mut added = 0usize;
        for captures in pattern.captures_iter(&source) {
            if sink.is_full() {
                break;
            }
            if let Some(value) = captures.get(1) {
                if sink.offer(value.as_str()) {
                    added += 1;
                }
            }
        }
        debug!(key, added, "Embedded-data pattern scanned");
    }
    StrategyOutcome::Extracted {
        added: sink.len() - before,
    }
}
