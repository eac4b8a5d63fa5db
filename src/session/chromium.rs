//! Rendering session driving a Chromium browser through the DevTools protocol.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use log::{debug, warn};
use tokio::task::JoinHandle;

use super::{BlockHandle, PageSnapshot, RenderingSession, SessionProvider};
use crate::config::CHROME_PATH_ENV;
use crate::error_handling::SessionError;

/// Launches one browser per session.
#[derive(Debug, Clone)]
pub struct ChromiumSessionProvider {
    executable: Option<PathBuf>,
    navigation_timeout: Duration,
}

impl ChromiumSessionProvider {
    /// Provider using the browser named by `FLIGHT_SCAN_CHROME`, or the one
    /// chromiumoxide detects when the variable is unset.
    pub fn new(navigation_timeout: Duration) -> Self {
        let executable = std::env::var(CHROME_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        Self {
            executable,
            navigation_timeout,
        }
    }

    /// Uses the browser at `path` instead of the detected one.
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    fn browser_config(&self, headless: bool) -> Result<BrowserConfig, SessionError> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--disable-blink-features=AutomationControlled");
        if headless {
            builder = builder.arg("--headless=new");
        } else {
            builder = builder.with_head();
        }
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        builder
            .build()
            .map_err(|e| SessionError::AcquisitionFailed(format!("browser config: {e}")))
    }
}

impl SessionProvider for ChromiumSessionProvider {
    type Session = ChromiumSession;

    async fn acquire(&self, headless: bool) -> Result<ChromiumSession, SessionError> {
        let config = self.browser_config(headless)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| SessionError::AcquisitionFailed(format!("launch: {e}")))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(SessionError::AcquisitionFailed(format!("new page: {e}")));
            }
        };
        debug!("Chromium session started (headless: {})", headless);

        Ok(ChromiumSession {
            browser,
            handler,
            page,
            navigation_timeout: self.navigation_timeout,
            snapshot: None,
        })
    }
}

/// A browser with a single tab.
///
/// `count` and `find_blocks` take a fresh DOM snapshot; field reads are answered
/// from the snapshot taken by the last `find_blocks`, so block handles stay
/// consistent while one page is being read.
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    navigation_timeout: Duration,
    snapshot: Option<PageSnapshot>,
}

impl std::fmt::Debug for ChromiumSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromiumSession")
            .field("navigation_timeout", &self.navigation_timeout)
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

impl ChromiumSession {
    async fn refresh(&mut self) -> Result<&PageSnapshot, SessionError> {
        let html: String = self
            .page
            .evaluate("document.documentElement.outerHTML")
            .await
            .map_err(|e| SessionError::QueryFailed(e.to_string()))?
            .into_value()
            .map_err(|e| SessionError::QueryFailed(format!("{e:?}")))?;
        let url = self
            .page
            .url()
            .await
            .unwrap_or_default()
            .map(|u| u.to_string())
            .unwrap_or_default();
        let snapshot = self.snapshot.insert(PageSnapshot::parse(url, &html));
        Ok(&*snapshot)
    }

    fn snapshot(&self) -> Result<&PageSnapshot, SessionError> {
        self.snapshot.as_ref().ok_or(SessionError::NoPage)
    }
}

impl RenderingSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.snapshot = None;
        match tokio::time::timeout(self.navigation_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(SessionError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(SessionError::NavigationFailed {
                url: url.to_string(),
                reason: format!("timed out after {:?}", self.navigation_timeout),
            }),
        }
    }

    async fn count(&mut self, selector: &str) -> Result<usize, SessionError> {
        Ok(self.refresh().await?.count(selector))
    }

    async fn find_blocks(&mut self, selector: &str) -> Result<Vec<BlockHandle>, SessionError> {
        Ok(self.refresh().await?.blocks(selector))
    }

    async fn read_text(
        &mut self,
        block: &BlockHandle,
        selector: &str,
    ) -> Result<Option<String>, SessionError> {
        self.snapshot()?.text_within(block, selector)
    }

    async fn read_attribute(
        &mut self,
        block: &BlockHandle,
        selector: &str,
        attribute: &str,
    ) -> Result<Option<String>, SessionError> {
        self.snapshot()?.attribute_within(block, selector, attribute)
    }

    async fn release(mut self) -> Result<(), SessionError> {
        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            warn!("Chromium process did not exit cleanly: {}", e);
        }
        self.handler.abort();
        closed
            .map(|_| ())
            .map_err(|e| SessionError::ReleaseFailed(e.to_string()))
    }
}
