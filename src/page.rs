//! The rendered-page collaborator seam.
//!
//! Every extraction strategy is written against [`TrendPage`], which is the
//! whole of what the pipeline needs from a page: selector-based text lookup,
//! a bounded wait for an element to appear, and a raw source snapshot. The
//! production implementation drives a live browser (see [`crate::browser`]);
//! [`StaticPage`] here wraps an already-serialized HTML snapshot so every
//! strategy can be exercised without one.

#[cfg(test)]
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::time::Duration;

/// Query interface over a rendered page.
///
/// Implementations swallow nothing: a selector that matches no element is an
/// empty `Ok`, while an invalid selector or a lost page is an `Err`. Deciding
/// whether an error is fatal is the caller's business; inside the strategy
/// cascade it never is.
pub trait TrendPage {
    /// Visible text of every element matching `selector`, in document order.
    async fn texts_of_all(&self, selector: &str) -> Result<Vec<String>, Box<dyn Error>>;

    /// Resolve once at least one element matches `selector`, or fail after
    /// `timeout`.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), Box<dyn Error>>;

    /// Full serialized page source at this moment.
    async fn source(&self) -> Result<String, Box<dyn Error>>;
}

/// A page backed by a static HTML snapshot.
///
/// Element text is assembled from the element's text nodes: each chunk is
/// trimmed and empty chunks are dropped, then chunks are joined with `\n`.
/// That keeps the line structure a live browser would render for the feed's
/// stacked title/metadata markup, which is what the normalizer's first-line
/// rule expects.
#[cfg(test)]
#[derive(Debug)]
pub struct StaticPage {
    raw: String,
    document: Html,
}

#[cfg(test)]
impl StaticPage {
    /// Parse `html` into a queryable snapshot.
    pub fn new(html: &str) -> Self {
        Self {
            raw: html.to_string(),
            document: Html::parse_document(html),
        }
    }
}

#[cfg(test)]
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
impl TrendPage for StaticPage {
    async fn texts_of_all(&self, selector: &str) -> Result<Vec<String>, Box<dyn Error>> {
        let parsed = Selector::parse(selector)
            .map_err(|e| format!("invalid selector '{selector}': {e}"))?;
        Ok(self.document.select(&parsed).map(element_text).collect())
    }

    /// A snapshot never changes, so the wait degenerates to a presence check:
    /// immediate `Ok` when a match exists, immediate `Err` otherwise.
    async fn wait_for(&self, selector: &str, _timeout: Duration) -> Result<(), Box<dyn Error>> {
        if self.texts_of_all(selector).await?.is_empty() {
            return Err(format!("no element matched '{selector}' in the page snapshot").into());
        }
        Ok(())
    }

    async fn source(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.raw.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"<html><body>
        <div class="trend-link">Olympics 2028</div>
        <div class="trend-link">Solar Eclipse<span>1M+ searches</span></div>
        <p id="lonely">metadata</p>
    </body></html>"#;

    #[tokio::test]
    async fn test_texts_of_all_matches_in_document_order() {
        let page = StaticPage::new(FIXTURE);
        let texts = page.texts_of_all(".trend-link").await.unwrap();
        assert_eq!(texts, vec!["Olympics 2028", "Solar Eclipse\n1M+ searches"]);
    }

    #[tokio::test]
    async fn test_texts_of_all_empty_for_absent_selector() {
        let page = StaticPage::new(FIXTURE);
        let texts = page.texts_of_all(".missing").await.unwrap();
        assert!(texts.is_empty());
    }

    #[tokio::test]
    async fn test_texts_of_all_rejects_invalid_selector() {
        let page = StaticPage::new(FIXTURE);
        assert!(page.texts_of_all("[[[").await.is_err());
    }

    #[tokio::test]
    async fn test_wait_for_present_element_resolves() {
        let page = StaticPage::new(FIXTURE);
        assert!(page.wait_for("#lonely", Duration::from_secs(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_wait_for_absent_element_fails() {
        let page = StaticPage::new(FIXTURE);
        assert!(page.wait_for(".missing", Duration::from_secs(1)).await.is_err());
    }

    #[tokio::test]
    async fn test_source_returns_raw_snapshot() {
        let page = StaticPage::new(FIXTURE);
        assert_eq!(page.source().await.unwrap(), FIXTURE);
    }

    #[tokio::test]
    async fn test_whitespace_only_text_nodes_are_dropped() {
        let page = StaticPage::new("<div role='row'>\n   Taylor Swift\n   <span>2 hours ago</span>\n</div>");
        let texts = page.texts_of_all("[role='row']").await.unwrap();
        assert_eq!(texts, vec!["Taylor Swift\n2 hours ago"]);
    }
}
