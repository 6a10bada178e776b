//! Strategy 1: component CSS selectors.
//!
//! Tries a fixed list of selector patterns observed on live trending pages,
//! most specific first. The first pattern whose matches survive normalization
//! wins and ends the scan; patterns that error, match nothing, or match only
//! noise are skipped.

use crate::keywords::KeywordSink;
use crate::page::TrendPage;
use crate::strategies::StrategyOutcome;
use tracing::{debug, warn};

/// Selector patterns for trend entries, in decreasing order of precision.
/// Custom-element and class names here track what the page currently ships
/// and are expected to rot; the later entries are the long-lived ones.
pub const COMPONENT_SELECTORS: [&str; 7] = [
    "feed-list-item",
    "mwc-list-item",
    ".K5L6z",
    "[class*='mZ3RIc']",
    "[jsname='oKdM2c']",
    ".trend-link",
    ".item-label",
];

pub async fn attempt<P: TrendPage>(page: &P, sink: &mut KeywordSink) -> StrategyOutcome {
    let before = sink.len();
    for selector in COMPONENT_SELECTORS {
        if sink.is_full() {
            break;
        }
        let texts = match page.texts_of_all(selector).await {
            Ok(texts) => texts,
            Err(error) => {
                warn!(selector, %error, "Selector lookup failed; trying the next pattern");
                continue;
            }
        };
        if texts.is_empty() {
            debug!(selector, "No elements matched");
            continue;
        }
        let mut added = 0usize;
        for text in &texts {
            if sink.is_full() {
                break;
            }
            if sink.offer(text) {
                added += 1;
            }
        }
        debug!(selector, matched = texts.len(), added, "Selector scanned");
        if added > 0 {
            break;
        }
    }
    StrategyOutcome::Extracted {
        added: sink.len() - before,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::StaticPage;

    #[tokio::test]
    async fn test_first_producing_selector_wins() {
        // Both patterns match, but the earlier one claims the result alone.
        let page = StaticPage::new(
            r#"<html><body>
                <mwc-list-item>Olympics 2028</mwc-list-item>
                <div class="trend-link">Solar Eclipse</div>
            </body></html>"#,
        );
        let mut sink = KeywordSink::new(10);
        attempt(&page, &mut sink).await;
        assert_eq!(sink.into_keywords(), vec!["Olympics 2028"]);
    }

    #[tokio::test]
    async fn test_noise_only_selector_does_not_win() {
        // mwc-list-item matches but yields nothing after normalization, so
        // the scan keeps going and a later pattern produces the result.
        let page = StaticPage::new(
            r#"<html><body>
                <mwc-list-item>Export</mwc-list-item>
                <mwc-list-item>Trending Now</mwc-list-item>
                <div class="trend-link">Solar Eclipse</div>
            </body></html>"#,
        );
        let mut sink = KeywordSink::new(10);
        let outcome = attempt(&page, &mut sink).await;
        assert!(matches!(outcome, StrategyOutcome::Extracted { added: 1 }));
        assert_eq!(sink.into_keywords(), vec!["Solar Eclipse"]);
    }

    #[tokio::test]
    async fn test_no_match_reports_zero_added() {
        let page = StaticPage::new("<html><body><p>nothing here</p></body></html>");
        let mut sink = KeywordSink::new(10);
        let outcome = attempt(&page, &mut sink).await;
        assert!(matches!(outcome, StrategyOutcome::Extracted { added: 0 }));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_multi_line_entry_keeps_title_line_only() {
        let page = StaticPage::new(
            r#"<html><body>
                <feed-list-item>Olympics 2028<span>500K+ searches</span></feed-list-item>
            </body></html>"#,
        );
        let mut sink = KeywordSink::new(10);
        attempt(&page, &mut sink).await;
        assert_eq!(sink.into_keywords(), vec!["Olympics 2028"]);
    }

    #[tokio::test]
    async fn test_stops_at_the_sink_limit() {
        let page = StaticPage::new(
            r#"<html><body>
                <div class="trend-link">Olympics 2028</div>
                <div class="trend-link">Solar Eclipse</div>
                <div class="trend-link">Quantum Chip</div>
            </body></html>"#,
        );
        let mut sink = KeywordSink::new(2);
        attempt(&page, &mut sink).await;
        assert_eq!(sink.into_keywords(), vec!["Olympics 2028", "Solar Eclipse"]);
    }
}
