//! Rendering session backed by a plain HTTP fetch.
//!
//! The page is downloaded once per navigation and never re-rendered, so this
//! backend only sees offers that the server puts into the initial HTML.

use std::sync::Arc;

use log::debug;

use super::{BlockHandle, PageSnapshot, RenderingSession, SessionProvider};
use crate::error_handling::SessionError;

/// Hands out sessions sharing one `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpSessionProvider {
    client: Arc<reqwest::Client>,
}

impl HttpSessionProvider {
    /// Provider sharing `client` between its sessions.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

impl SessionProvider for HttpSessionProvider {
    type Session = HttpSession;

    async fn acquire(&self, headless: bool) -> Result<HttpSession, SessionError> {
        if !headless {
            debug!("HTTP backend has no window; ignoring headed mode");
        }
        Ok(HttpSession {
            client: Arc::clone(&self.client),
            page: None,
        })
    }
}

/// Session holding the last fetched page.
#[derive(Debug)]
pub struct HttpSession {
    client: Arc<reqwest::Client>,
    page: Option<PageSnapshot>,
}

impl HttpSession {
    fn page(&self) -> Result<&PageSnapshot, SessionError> {
        self.page.as_ref().ok_or(SessionError::NoPage)
    }

    async fn fetch(&self, url: &str) -> Result<(String, String), reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().to_string();
        let body = response.text().await?;
        Ok((final_url, body))
    }
}

impl RenderingSession for HttpSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.page = None;
        let (final_url, body) =
            self.fetch(url)
                .await
                .map_err(|e| SessionError::NavigationFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
        debug!("Fetched {} ({} bytes)", final_url, body.len());
        self.page = Some(PageSnapshot::parse(final_url, &body));
        Ok(())
    }

    async fn count(&mut self, selector: &str) -> Result<usize, SessionError> {
        Ok(self.page()?.count(selector))
    }

    async fn find_blocks(&mut self, selector: &str) -> Result<Vec<BlockHandle>, SessionError> {
        Ok(self.page()?.blocks(selector))
    }

    async fn read_text(
        &mut self,
        block: &BlockHandle,
        selector: &str,
    ) -> Result<Option<String>, SessionError> {
        self.page()?.text_within(block, selector)
    }

    async fn read_attribute(
        &mut self,
        block: &BlockHandle,
        selector: &str,
        attribute: &str,
    ) -> Result<Option<String>, SessionError> {
        self.page()?.attribute_within(block, selector, attribute)
    }

    async fn release(self) -> Result<(), SessionError> {
        Ok(())
    }
}
