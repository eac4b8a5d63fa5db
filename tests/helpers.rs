// Shared test helpers: a scripted rendering session and fast configurations.
//
// The mock answers queries by comparing selectors with the default page layout,
// so tests describe offers as plain data instead of HTML.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flight_scan::{
    BlockHandle, Config, PageLayout, RenderingSession, SessionError, SessionProvider,
};

/// Configuration with short readiness polling and no pacing, suitable for tests.
#[allow(dead_code)] // Used by other test files
pub fn fast_config() -> Config {
    Config {
        readiness_timeout: Duration::from_secs(2),
        poll_initial_delay: Duration::from_millis(2),
        poll_max_delay: Duration::from_millis(4),
        max_readiness_polls: 10,
        block_pacing: Duration::ZERO,
        ..Default::default()
    }
}

/// One offer block of a scripted page.
#[derive(Debug, Clone, Default)]
pub struct MockBlock {
    pub departure_time: Option<String>,
    pub booking_action: Option<String>,
    pub price: Option<String>,
}

#[allow(dead_code)] // Used by other test files
impl MockBlock {
    pub fn at(departure_time: &str) -> Self {
        Self {
            departure_time: Some(departure_time.to_string()),
            ..Default::default()
        }
    }

    pub fn without_time() -> Self {
        Self::default()
    }

    pub fn priced(mut self, price: &str) -> Self {
        self.price = Some(price.to_string());
        self
    }

    pub fn booking(mut self, action: &str) -> Self {
        self.booking_action = Some(action.to_string());
        self
    }
}

/// What a scripted session observes on each readiness poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)] // Used by other test files
pub enum Poll {
    /// The readiness element is not on the page yet
    NotReady,
    /// The readiness element is present with this many offer blocks
    Blocks(usize),
}

/// Session provider answering from a script.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    blocks: Vec<MockBlock>,
    polls: Vec<Poll>,
    fail_acquisition: bool,
    fail_navigation: bool,
    fail_release: bool,
    acquisitions: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
    visited: Arc<Mutex<Vec<String>>>,
    headless_requests: Arc<Mutex<Vec<bool>>>,
}

#[allow(dead_code)] // Used by other test files
impl MockProvider {
    /// A page that is immediately ready and shows `blocks`.
    pub fn with_blocks(blocks: Vec<MockBlock>) -> Self {
        Self {
            blocks,
            ..Default::default()
        }
    }

    /// Overrides what the readiness polls observe; the last entry repeats.
    pub fn with_polls(mut self, polls: Vec<Poll>) -> Self {
        self.polls = polls;
        self
    }

    pub fn failing_acquisition() -> Self {
        Self {
            fail_acquisition: true,
            ..Default::default()
        }
    }

    pub fn failing_navigation(mut self) -> Self {
        self.fail_navigation = true;
        self
    }

    pub fn failing_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }

    pub fn headless_requests(&self) -> Vec<bool> {
        self.headless_requests.lock().unwrap().clone()
    }
}

impl SessionProvider for MockProvider {
    type Session = MockSession;

    async fn acquire(&self, headless: bool) -> Result<MockSession, SessionError> {
        self.headless_requests.lock().unwrap().push(headless);
        if self.fail_acquisition {
            return Err(SessionError::AcquisitionFailed(
                "browser binary not found".to_string(),
            ));
        }
        self.acquisitions.fetch_add(1, Ordering::SeqCst);

        let polls = if self.polls.is_empty() {
            vec![Poll::Blocks(self.blocks.len())]
        } else {
            self.polls.clone()
        };
        Ok(MockSession {
            layout: PageLayout::default(),
            blocks: self.blocks.clone(),
            polls: polls.into_iter().collect(),
            current: Poll::NotReady,
            navigated: false,
            fail_navigation: self.fail_navigation,
            fail_release: self.fail_release,
            releases: Arc::clone(&self.releases),
            visited: Arc::clone(&self.visited),
        })
    }
}

/// Session created by [`MockProvider`].
#[derive(Debug)]
pub struct MockSession {
    layout: PageLayout,
    blocks: Vec<MockBlock>,
    polls: VecDeque<Poll>,
    current: Poll,
    navigated: bool,
    fail_navigation: bool,
    fail_release: bool,
    releases: Arc<AtomicUsize>,
    visited: Arc<Mutex<Vec<String>>>,
}

impl MockSession {
    fn block(&self, handle: &BlockHandle) -> Result<&MockBlock, SessionError> {
        if !self.navigated {
            return Err(SessionError::NoPage);
        }
        self.blocks
            .get(handle.index())
            .ok_or(SessionError::StaleBlock(handle.position()))
    }
}

impl RenderingSession for MockSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.visited.lock().unwrap().push(url.to_string());
        if self.fail_navigation {
            return Err(SessionError::NavigationFailed {
                url: url.to_string(),
                reason: "connection reset".to_string(),
            });
        }
        self.navigated = true;
        Ok(())
    }

    async fn count(&mut self, selector: &str) -> Result<usize, SessionError> {
        if !self.navigated {
            return Err(SessionError::NoPage);
        }
        if selector == self.layout.readiness {
            if let Some(next) = self.polls.pop_front() {
                self.current = next;
            }
            return Ok(match self.current {
                Poll::NotReady => 0,
                Poll::Blocks(_) => 1,
            });
        }
        if selector == self.layout.offer_block {
            return Ok(match self.current {
                Poll::NotReady => 0,
                Poll::Blocks(n) => n,
            });
        }
        Ok(0)
    }

    async fn find_blocks(&mut self, selector: &str) -> Result<Vec<BlockHandle>, SessionError> {
        if !self.navigated {
            return Err(SessionError::NoPage);
        }
        let shared: Arc<str> = Arc::from(selector);
        Ok((0..self.blocks.len())
            .map(|i| BlockHandle::new(Arc::clone(&shared), i))
            .collect())
    }

    async fn read_text(
        &mut self,
        block: &BlockHandle,
        selector: &str,
    ) -> Result<Option<String>, SessionError> {
        let block = self.block(block)?;
        if selector == self.layout.departure_time {
            Ok(block.departure_time.clone())
        } else if selector == self.layout.price {
            Ok(block.price.clone())
        } else {
            Ok(None)
        }
    }

    async fn read_attribute(
        &mut self,
        block: &BlockHandle,
        selector: &str,
        attribute: &str,
    ) -> Result<Option<String>, SessionError> {
        let block = self.block(block)?;
        if selector == self.layout.select_button && attribute == self.layout.booking_attribute {
            Ok(block.booking_action.clone())
        } else {
            Ok(None)
        }
    }

    async fn release(self) -> Result<(), SessionError> {
        self.releases.fetch_add(1, Ordering::SeqCst);
        if self.fail_release {
            return Err(SessionError::ReleaseFailed("browser already gone".to_string()));
        }
        Ok(())
    }
}

/// One offer as rendered on the result page: departure time, price, booking action.
#[allow(dead_code)] // Used by other test files
pub type PageOffer<'a> = (Option<&'a str>, Option<&'a str>, Option<&'a str>);

/// Renders a result page with the structure the default page layout expects.
#[allow(dead_code)] // Used by other test files
pub fn result_page(offers: &[PageOffer<'_>]) -> String {
    let blocks: String = offers
        .iter()
        .map(|(time, price, action)| offer_block(*time, *price, *action))
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html><head><title>Results</title></head>
<body>
  <div id="app">
    <section>
      <div class="filters"></div>
      <div class="calendar"></div>
      <div class="summary"></div>
      <div class="results">{blocks}</div>
    </section>
  </div>
</body></html>"#
    )
}

fn offer_block(time: Option<&str>, price: Option<&str>, action: Option<&str>) -> String {
    let time = time.unwrap_or("");
    let price = price
        .map(|p| format!("<span><strong>{p}</strong> تومان</span>"))
        .unwrap_or_default();
    let onclick = action
        .map(|a| format!(r#" onclick="{a}""#))
        .unwrap_or_default();
    format!(
        r#"
<div class="offer">
  <div>
    <div>
      <div>
        <div>
          <div><img src="logo.png"></div>
          <div>
            <div>Mashhad</div>
            <div><div>{time}</div></div>
          </div>
        </div>
      </div>
    </div>
    <div>
      <div>
        <div>
          {price}
          <div></div>
          <div><button{onclick}>Select</button></div>
        </div>
      </div>
    </div>
  </div>
</div>"#
    )
}
