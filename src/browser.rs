//! Chromium session management.
//!
//! Owns the lifecycle of one browser process per run: launch with an
//! anti-automation profile, navigate to the target, and tear everything down
//! again. The open session implements [`TrendPage`], which is the only view
//! the extraction strategies get of it.
//!
//! # Stealth Profile
//!
//! The trending page serves a reduced shell to sessions it flags as
//! automated. The launch profile pins a desktop window size and user agent,
//! disables the Blink automation flag, and masks `navigator.webdriver` after
//! navigation. Masking is best effort; a failure is logged and ignored.

use crate::page::TrendPage;
use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::error::Error;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

const WEBDRIVER_MASK: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

/// How often [`TrendPage::wait_for`] re-polls the DOM.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A launched browser with one page navigated to the target URL.
///
/// The CDP event handler runs on its own task for the lifetime of the
/// session; [`BrowserSession::close`] shuts the browser down and stops it.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
}

impl BrowserSession {
    /// Launch a browser and navigate its first page to `url`.
    ///
    /// Fails if the browser cannot be launched or the navigation does not
    /// complete; a half-open session is torn down before the error returns.
    #[instrument(skip(url), fields(url = %url))]
    pub async fn open(url: &Url, headless: bool) -> Result<Self, Box<dyn Error>> {
        let config = browser_config(headless)?;
        info!(headless, "Launching browser");
        let (browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::task::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page(url.as_str()).await {
            Ok(page) => page,
            Err(error) => {
                shutdown(browser, handler_task).await;
                return Err(error.into());
            }
        };
        if let Err(error) = page.wait_for_navigation().await {
            shutdown(browser, handler_task).await;
            return Err(error.into());
        }
        if let Err(error) = page.evaluate(WEBDRIVER_MASK).await {
            warn!(%error, "Could not mask navigator.webdriver");
        }
        info!("Page loaded");

        Ok(Self {
            browser,
            handler_task,
            page,
        })
    }

    /// Close the page and browser process. Teardown errors are logged, never
    /// propagated; by this point the keywords are already in hand.
    pub async fn close(self) {
        shutdown(self.browser, self.handler_task).await;
    }
}

impl TrendPage for BrowserSession {
    async fn texts_of_all(&self, selector: &str) -> Result<Vec<String>, Box<dyn Error>> {
        let elements = self.page.find_elements(selector).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            match element.inner_text().await {
                Ok(Some(text)) => texts.push(text),
                Ok(None) => {}
                Err(error) => {
                    debug!(selector, %error, "Skipping element whose text could not be read");
                }
            }
        }
        Ok(texts)
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), Box<dyn Error>> {
        let appeared = async {
            loop {
                if let Ok(elements) = self.page.find_elements(selector).await {
                    if !elements.is_empty() {
                        return;
                    }
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };
        match tokio::time::timeout(timeout, appeared).await {
            Ok(()) => Ok(()),
            Err(_) => Err(format!(
                "no element matched '{selector}' within {}s",
                timeout.as_secs()
            )
            .into()),
        }
    }

    async fn source(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.page.content().await?)
    }
}

async fn shutdown(mut browser: Browser, handler_task: JoinHandle<()>) {
    if let Err(error) = browser.close().await {
        warn!(%error, "Browser close failed");
    }
    if let Err(error) = browser.wait().await {
        warn!(%error, "Browser did not exit cleanly");
    }
    handler_task.abort();
    debug!("Browser session closed");
}

fn browser_config(headless: bool) -> Result<BrowserConfig, Box<dyn Error>> {
    let mut builder = BrowserConfig::builder()
        .no_sandbox()
        .window_size(1920, 1080)
        .args(stealth_args());
    builder = if headless {
        builder.headless_mode(HeadlessMode::New)
    } else {
        builder.with_head()
    };
    builder.build().map_err(Into::into)
}

fn stealth_args() -> Vec<String> {
    let mut args: Vec<String> = [
        "--disable-dev-shm-usage",
        "--disable-gpu",
        "--lang=en-US",
        "--disable-blink-features=AutomationControlled",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    args.push(format!("--user-agent={USER_AGENT}"));
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stealth_args_carry_the_user_agent() {
        let args = stealth_args();
        assert!(
            args.iter()
                .any(|arg| arg.starts_with("--user-agent=Mozilla/5.0"))
        );
        assert!(args.iter().any(|arg| arg == "--disable-blink-features=AutomationControlled"));
    }

    // Needs a local Chrome or Chromium install.
    #[tokio::test]
    #[ignore]
    async fn test_live_session_opens_and_closes() {
        let url = Url::parse("about:blank").unwrap();
        let session = BrowserSession::open(&url, true).await.unwrap();
        session.wait_for("body", Duration::from_secs(2)).await.unwrap();
        assert!(session.source().await.unwrap().contains("<html"));
        session.close().await;
    }
}
