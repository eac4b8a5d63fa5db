//! Parsed DOM snapshots answering structural queries.

use std::sync::Arc;

use scraper::{ElementRef, Html};

use super::BlockHandle;
use crate::error_handling::SessionError;
use crate::utils::{parse_selector_with_fallback, visible_text};

/// A parsed copy of a rendered page.
///
/// Selectors that fail to parse match nothing (see
/// [`parse_selector_with_fallback`]), so a broken layout selector reads as an
/// absent field rather than a failed search.
pub struct PageSnapshot {
    url: String,
    document: Html,
}

impl std::fmt::Debug for PageSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSnapshot")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl PageSnapshot {
    /// Parses `html` as the document found at `url`.
    pub fn parse(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }

    /// URL the snapshot was taken from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of elements matching `selector`.
    pub fn count(&self, selector: &str) -> usize {
        let selector = parse_selector_with_fallback(selector, "element count");
        self.document.select(&selector).count()
    }

    /// Handles for the elements matching `selector`, in document order.
    pub fn blocks(&self, selector: &str) -> Vec<BlockHandle> {
        let shared: Arc<str> = Arc::from(selector);
        (0..self.count(selector))
            .map(|index| BlockHandle::new(Arc::clone(&shared), index))
            .collect()
    }

    fn block(&self, block: &BlockHandle) -> Result<ElementRef<'_>, SessionError> {
        let selector = parse_selector_with_fallback(block.selector(), "offer block lookup");
        self.document
            .select(&selector)
            .nth(block.index())
            .ok_or(SessionError::StaleBlock(block.position()))
    }

    fn first_within<'a>(
        &'a self,
        block: &BlockHandle,
        selector: &str,
    ) -> Result<Option<ElementRef<'a>>, SessionError> {
        let element = self.block(block)?;
        let selector = parse_selector_with_fallback(selector, "field lookup");
        Ok(element.select(&selector).next())
    }

    /// Visible text of the first match of `selector` inside `block`.
    pub fn text_within(
        &self,
        block: &BlockHandle,
        selector: &str,
    ) -> Result<Option<String>, SessionError> {
        Ok(self
            .first_within(block, selector)?
            .and_then(|element| visible_text(element.text())))
    }

    /// Non-blank `attribute` of the first match of `selector` inside `block`.
    pub fn attribute_within(
        &self,
        block: &BlockHandle,
        selector: &str,
        attribute: &str,
    ) -> Result<Option<String>, SessionError> {
        Ok(self
            .first_within(block, selector)?
            .and_then(|element| element.value().attr(attribute))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string))
    }
}
