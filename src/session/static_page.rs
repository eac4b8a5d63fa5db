//! Rendering session serving pre-recorded HTML.
//!
//! Used by the test suite and by `--html-file`, which re-runs extraction against
//! a result page saved from a browser.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{BlockHandle, PageSnapshot, RenderingSession, SessionProvider};
use crate::error_handling::{InitializationError, SessionError};

/// Serves fixed HTML pages by URL.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    pages: Arc<HashMap<String, String>>,
    fallback: Option<Arc<str>>,
    acquisition_failure: Option<String>,
    acquisitions: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
}

impl StaticSessionProvider {
    /// Provider with no pages; every navigation fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `html` as the content of `url`.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.pages).insert(url.into(), html.into());
        self
    }

    /// Serves `html` for every URL that has no page of its own.
    pub fn serving(html: impl Into<String>) -> Self {
        Self {
            fallback: Some(Arc::from(html.into())),
            ..Self::default()
        }
    }

    /// Serves the content of a saved HTML file for every URL.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::PageFileError` if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InitializationError> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::serving(html))
    }

    /// Provider whose acquisitions always fail with `reason`.
    pub fn failing_acquisition(reason: impl Into<String>) -> Self {
        Self {
            acquisition_failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Number of sessions handed out so far.
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }

    /// Number of sessions released so far.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl SessionProvider for StaticSessionProvider {
    type Session = StaticSession;

    async fn acquire(&self, _headless: bool) -> Result<StaticSession, SessionError> {
        if let Some(reason) = &self.acquisition_failure {
            return Err(SessionError::AcquisitionFailed(reason.clone()));
        }
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        Ok(StaticSession {
            pages: Arc::clone(&self.pages),
            fallback: self.fallback.clone(),
            releases: Arc::clone(&self.releases),
            page: None,
        })
    }
}

/// Session over a [`StaticSessionProvider`]'s pages.
#[derive(Debug)]
pub struct StaticSession {
    pages: Arc<HashMap<String, String>>,
    fallback: Option<Arc<str>>,
    releases: Arc<AtomicUsize>,
    page: Option<PageSnapshot>,
}

impl StaticSession {
    fn page(&self) -> Result<&PageSnapshot, SessionError> {
        self.page.as_ref().ok_or(SessionError::NoPage)
    }
}

impl RenderingSession for StaticSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        let html = self
            .pages
            .get(url)
            .map(String::as_str)
            .or(self.fallback.as_deref())
            .ok_or_else(|| SessionError::NavigationFailed {
                url: url.to_string(),
                reason: "no page recorded for this URL".to_string(),
            })?;
        self.page = Some(PageSnapshot::parse(url, html));
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
        self.releases.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
