//! Strategy 2: ARIA role selectors.
//!
//! Class names rot, but the trending table keeps its accessibility roles.
//! This strategy waits (bounded) for row or listitem elements to appear, then
//! takes the first non-empty line of each row's text as the candidate title.
//! Rows stack the trend title above search-volume and timing metadata, so the
//! first line is the title.

use crate::keywords::KeywordSink;
use crate::page::TrendPage;
use crate::strategies::StrategyOutcome;
use std::time::Duration;
use tracing::debug;

/// Matches both table-shaped and list-shaped renderings of the feed.
pub const ROLE_SELECTOR: &str = "[role='row'], [role='listitem']";

/// How long to wait for role elements before giving up on this strategy.
pub const APPEARANCE_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn attempt<P: TrendPage>(page: &P, sink: &mut KeywordSink) -> StrategyOutcome {
    if let Err(error) = page.wait_for(ROLE_SELECTOR, APPEARANCE_TIMEOUT).await {
        return StrategyOutcome::SoftFailed {
            reason: format!("role elements never appeared: {error}"),
        };
    }
    let texts = match page.texts_of_all(ROLE_SELECTOR).await {
        Ok(texts) => texts,
        Err(error) => {
            return StrategyOutcome::SoftFailed {
                reason: format!("role element lookup failed: {error}"),
            };
        }
    };
    debug!(matched = texts.len(), "Role elements found");
    let before = sink.len();
    for text in &texts {
        if sink.is_full() {
            break;
        }
        if let Some(title) = first_line(text) {
            sink.offer(title);
        }
    }
    StrategyOutcome::Extracted {
        added: sink.len() - before,
    }
}

/// First non-empty line of a row's text, or `None` for an all-blank row.
fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::StaticPage;

    #[test]
    fn test_first_line_skips_leading_blanks() {
        assert_eq!(first_line("\n  \nTaylor Swift\n1M+ searches"), Some("Taylor Swift"));
        assert_eq!(first_line("Mars Rover"), Some("Mars Rover"));
        assert_eq!(first_line("  \n \n"), None);
    }

    #[tokio::test]
    async fn test_extracts_row_titles() {
        let page = StaticPage::new(
            r#"<html><body>
                <div role="row">Taylor Swift<span>1M+ searches</span><span>2 hours ago</span></div>
                <div role="listitem">Mars Rover<span>200K+ searches</span></div>
            </body></html>"#,
        );
        let mut sink = KeywordSink::new(10);
        let outcome = attempt(&page, &mut sink).await;
        assert!(matches!(outcome, StrategyOutcome::Extracted { added: 2 }));
        assert_eq!(sink.into_keywords(), vec!["Taylor Swift", "Mars Rover"]);
    }

    #[tokio::test]
    async fn test_missing_role_elements_soft_fail() {
        let page = StaticPage::new("<html><body><p>shell only</p></body></html>");
        let mut sink = KeywordSink::new(10);
        let outcome = attempt(&page, &mut sink).await;
        assert!(matches!(outcome, StrategyOutcome::SoftFailed { .. }));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_header_rows_are_filtered_as_noise() {
        let page = StaticPage::new(
            r#"<html><body>
                <div role="row">Trending now</div>
                <div role="row">Started</div>
                <div role="row">Quantum Chip<span>50K+ searches</span></div>
            </body></html>"#,
        );
        let mut sink = KeywordSink::new(10);
        attempt(&page, &mut sink).await;
        assert_eq!(sink.into_keywords(), vec!["Quantum Chip"]);
    }
}
