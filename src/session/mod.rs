//! Rendering sessions.
//!
//! The pipeline never talks to a browser or HTTP client directly. It drives a
//! [`RenderingSession`] obtained from a [`SessionProvider`]: navigate to a URL,
//! count elements, enumerate offer blocks, and read text or attributes inside a
//! block. Three providers ship with the crate:
//!
//! - [`HttpSessionProvider`]: fetches the page with `reqwest` (no script execution)
//! - [`StaticSessionProvider`]: serves in-memory HTML (tests, saved-page replay)
//! - `ChromiumSessionProvider`: drives headless Chromium (`chromium` feature)
//!
//! All of them answer queries from a parsed [`PageSnapshot`].

#[cfg(feature = "chromium")]
mod chromium;
mod http;
mod snapshot;
mod static_page;

use std::sync::Arc;

use crate::error_handling::SessionError;

#[cfg(feature = "chromium")]
pub use chromium::{ChromiumSession, ChromiumSessionProvider};
pub use http::{HttpSession, HttpSessionProvider};
pub use snapshot::PageSnapshot;
pub use static_page::{StaticSession, StaticSessionProvider};

/// Opaque handle to one offer block of the current page.
///
/// Handles are only meaningful within the session (and page) that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHandle {
    selector: Arc<str>,
    index: usize,
}

impl BlockHandle {
    /// Creates the handle for the `index`-th (0-based) match of `selector`.
    ///
    /// Intended for session implementations.
    pub fn new(selector: Arc<str>, index: usize) -> Self {
        Self { selector, index }
    }

    /// Selector the block was enumerated with.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// 0-based enumeration index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based position, as used in log messages.
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

/// A page-automation session positioned on at most one page at a time.
///
/// A session is used by a single search from acquisition until [`release`] and
/// is never shared between concurrent navigations.
///
/// [`release`]: RenderingSession::release
#[allow(async_fn_in_trait)]
pub trait RenderingSession: Sized {
    /// Loads `url`, replacing the current page.
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    /// Number of elements currently matching `selector`.
    async fn count(&mut self, selector: &str) -> Result<usize, SessionError>;

    /// Enumerates the elements matching `selector`, in document order.
    async fn find_blocks(&mut self, selector: &str) -> Result<Vec<BlockHandle>, SessionError>;

    /// Visible text of the first element matching `selector` inside `block`.
    ///
    /// `Ok(None)` means the element is absent or renders no text.
    async fn read_text(
        &mut self,
        block: &BlockHandle,
        selector: &str,
    ) -> Result<Option<String>, SessionError>;

    /// Value of `attribute` on the first element matching `selector` inside `block`.
    ///
    /// `Ok(None)` means the element or the attribute is absent, or the value is blank.
    async fn read_attribute(
        &mut self,
        block: &BlockHandle,
        selector: &str,
        attribute: &str,
    ) -> Result<Option<String>, SessionError>;

    /// Shuts the session down and frees the underlying automation resources.
    async fn release(self) -> Result<(), SessionError>;
}

/// Starts rendering sessions.
#[allow(async_fn_in_trait)]
pub trait SessionProvider {
    /// Session type handed out by this provider.
    type Session: RenderingSession;

    /// Starts a new session.
    ///
    /// `headless` asks for a session without a visible window; providers without
    /// a window ignore it.
    async fn acquire(&self, headless: bool) -> Result<Self::Session, SessionError>;
}
