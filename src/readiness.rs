//! Result page readiness.
//!
//! The result list is rendered client-side, so the page is only read once the
//! readiness element exists and the number of offer blocks has stopped changing
//! between two consecutive polls. Polls are spaced by an exponential backoff and
//! the whole wait is bounded by a deadline.

use std::time::Duration;

use log::{debug, info};
use tokio::time::Instant;
use tokio_retry::strategy::ExponentialBackoff;

use crate::config::{Config, READINESS_POLL_GROWTH};
use crate::error_handling::{ExtractionStats, InfoType, SearchError, SessionError};
use crate::session::RenderingSession;

/// When and how long to poll a freshly loaded result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Element whose presence means the result list has rendered
    pub selector: String,
    /// Offer block selector; its match count must settle
    pub block_selector: String,
    /// Deadline for the whole wait
    pub timeout: Duration,
    /// Delay before the second poll
    pub initial_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
    /// Upper bound on the number of polls
    pub max_polls: usize,
}

impl ReadinessPolicy {
    /// Policy built from the readiness settings and layout of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            selector: config.layout.readiness.clone(),
            block_selector: config.layout.offer_block.clone(),
            timeout: config.readiness_timeout,
            initial_delay: config.poll_initial_delay,
            max_delay: config.poll_max_delay,
            max_polls: config.max_readiness_polls,
        }
    }
}

/// Delays between consecutive readiness polls.
///
/// Starts at `initial_delay` (rounded down to a multiple of the growth factor,
/// never below one growth step) and grows geometrically up to `max_delay`.
/// Yields one delay fewer than `max_polls`.
pub fn readiness_strategy(policy: &ReadinessPolicy) -> impl Iterator<Item = Duration> {
    let initial_ms = u64::try_from(policy.initial_delay.as_millis()).unwrap_or(u64::MAX);
    // A zero factor would turn every delay into zero
    let factor = (initial_ms / READINESS_POLL_GROWTH).max(1);
    ExponentialBackoff::from_millis(READINESS_POLL_GROWTH)
        .factor(factor)
        .max_delay(policy.max_delay)
        .take(policy.max_polls.saturating_sub(1))
}

/// Polls the current page until it is ready to be read.
///
/// Returns the settled number of offer blocks. If the readiness element is
/// present but the block count is still changing when the poll budget or the
/// deadline runs out, the last observed count is returned.
///
/// The page is always polled once more when the deadline is reached, so a
/// page that became ready during the last delay is not reported as a timeout.
/// A poll may run up to `max_delay` past the deadline.
///
/// # Errors
///
/// - `SearchError::NavigationTimeout` if the readiness element never appeared
/// - `SearchError::Session` if the session failed to answer a poll
pub async fn wait_for_ready<S: RenderingSession>(
    session: &mut S,
    policy: &ReadinessPolicy,
    stats: &ExtractionStats,
) -> Result<usize, SearchError> {
    let deadline = Instant::now() + policy.timeout;
    let mut delays = readiness_strategy(policy);
    let mut last_count: Option<usize> = None;
    let mut polls = 0usize;

    loop {
        polls += 1;
        stats.increment_info(InfoType::ReadinessPolls);

        let poll_deadline = deadline.max(Instant::now() + policy.max_delay);
        let observed = match tokio::time::timeout_at(poll_deadline, poll_once(session, policy)).await
        {
            Ok(observed) => observed?,
            Err(_) => break,
        };
        match observed {
            Some(count) if last_count == Some(count) => {
                info!(
                    "Result page ready after {} poll(s): {} offer block(s)",
                    polls, count
                );
                return Ok(count);
            }
            Some(count) => debug!("Poll {}: {} offer block(s), waiting to settle", polls, count),
            None => debug!("Poll {}: '{}' not present yet", polls, policy.selector),
        }
        last_count = observed;

        if Instant::now() >= deadline {
            break;
        }
        let Some(delay) = delays.next() else { break };
        tokio::time::sleep_until((Instant::now() + delay).min(deadline)).await;
    }

    match last_count {
        Some(count) => {
            debug!(
                "Offer block count did not settle after {} poll(s); using {}",
                polls, count
            );
            Ok(count)
        }
        None => Err(SearchError::NavigationTimeout {
            selector: policy.selector.clone(),
            timeout: policy.timeout,
        }),
    }
}

/// One poll: `None` while the readiness element is absent, else the block count.
async fn poll_once<S: RenderingSession>(
    session: &mut S,
    policy: &ReadinessPolicy,
) -> Result<Option<usize>, SessionError> {
    if session.count(&policy.selector).await? == 0 {
        return Ok(None);
    }
    session.count(&policy.block_selector).await.map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BlockHandle;
    use std::collections::VecDeque;

    /// Answers readiness polls from a script of `(readiness, blocks)` counts.
    /// The last entry repeats once the script runs out.
    struct ScriptedSession {
        script: VecDeque<(usize, usize)>,
        current: (usize, usize),
        fail: bool,
    }

    impl ScriptedSession {
        fn new(script: &[(usize, usize)]) -> Self {
            Self {
                script: script.iter().copied().collect(),
                current: (0, 0),
                fail: false,
            }
        }
    }

    impl RenderingSession for ScriptedSession {
        async fn navigate(&mut self, _url: &str) -> Result<(), SessionError> {
            Ok(())
        }

        async fn count(&mut self, selector: &str) -> Result<usize, SessionError> {
            if self.fail {
                return Err(SessionError::QueryFailed("renderer crashed".to_string()));
            }
            if selector == "#ready" {
                if let Some(next) = self.script.pop_front() {
                    self.current = next;
                }
                Ok(self.current.0)
            } else {
                Ok(self.current.1)
            }
        }

        async fn find_blocks(&mut self, _selector: &str) -> Result<Vec<BlockHandle>, SessionError> {
            Ok(Vec::new())
        }

        async fn read_text(
            &mut self,
            _block: &BlockHandle,
            _selector: &str,
        ) -> Result<Option<String>, SessionError> {
            Ok(None)
        }

        async fn read_attribute(
            &mut self,
            _block: &BlockHandle,
            _selector: &str,
            _attribute: &str,
        ) -> Result<Option<String>, SessionError> {
            Ok(None)
        }

        async fn release(self) -> Result<(), SessionError> {
            Ok(())
        }
    }

    fn policy(timeout_ms: u64, max_polls: usize) -> ReadinessPolicy {
        ReadinessPolicy {
            selector: "#ready".to_string(),
            block_selector: ".offer".to_string(),
            timeout: Duration::from_millis(timeout_ms),
            initial_delay: Duration::from_millis(2),
            max_delay: Duration::from_millis(4),
            max_polls,
        }
    }

    #[test]
    fn test_strategy_grows_and_caps() {
        let policy = ReadinessPolicy {
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_millis(2_000),
            max_polls: 6,
            ..policy(1_000, 6)
        };
        let delays: Vec<u64> = readiness_strategy(&policy)
            .map(|d| d.as_millis() as u64)
            .collect();
        assert_eq!(delays, vec![250, 500, 1_000, 2_000, 2_000]);
    }

    #[test]
    fn test_strategy_never_yields_zero_delays() {
        for initial_ms in [0, 1] {
            let policy = ReadinessPolicy {
                initial_delay: Duration::from_millis(initial_ms),
                max_delay: Duration::from_millis(50),
                ..policy(1_000, 5)
            };
            let delays: Vec<Duration> = readiness_strategy(&policy).collect();
            assert_eq!(delays.len(), 4);
            assert!(delays.iter().all(|d| !d.is_zero()), "{delays:?}");
        }
    }

    #[test]
    fn test_strategy_single_poll_has_no_delays() {
        assert_eq!(readiness_strategy(&policy(1_000, 1)).count(), 0);
    }

    #[test]
    fn test_policy_from_config() {
        let config = Config::default();
        let policy = ReadinessPolicy::from_config(&config);
        assert_eq!(policy.selector, config.layout.readiness);
        assert_eq!(policy.block_selector, config.layout.offer_block);
        assert_eq!(policy.timeout, config.readiness_timeout);
        assert_eq!(policy.max_polls, config.max_readiness_polls);
    }

    #[tokio::test]
    async fn test_ready_once_block_count_settles() {
        let mut session = ScriptedSession::new(&[(0, 0), (1, 2), (1, 5), (1, 5)]);
        let stats = ExtractionStats::new();
        let count = wait_for_ready(&mut session, &policy(5_000, 20), &stats)
            .await
            .expect("page should become ready");
        assert_eq!(count, 5);
        assert_eq!(stats.get_info_count(InfoType::ReadinessPolls), 4);
    }

    #[tokio::test]
    async fn test_empty_result_list_is_ready() {
        let mut session = ScriptedSession::new(&[(1, 0)]);
        let stats = ExtractionStats::new();
        let count = wait_for_ready(&mut session, &policy(5_000, 20), &stats)
            .await
            .expect("page should become ready");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_missing_readiness_element_times_out() {
        let mut session = ScriptedSession::new(&[(0, 0)]);
        let stats = ExtractionStats::new();
        let result = wait_for_ready(&mut session, &policy(50, 1_000), &stats).await;
        match result {
            Err(SearchError::NavigationTimeout { selector, timeout }) => {
                assert_eq!(selector, "#ready");
                assert_eq!(timeout, Duration::from_millis(50));
            }
            other => panic!("expected NavigationTimeout, got {other:?}"),
        }
        assert!(stats.get_info_count(InfoType::ReadinessPolls) >= 1);
    }

    #[tokio::test]
    async fn test_poll_budget_exhausted_without_readiness() {
        let mut session = ScriptedSession::new(&[(0, 0)]);
        let stats = ExtractionStats::new();
        let result = wait_for_ready(&mut session, &policy(5_000, 3), &stats).await;
        assert!(matches!(result, Err(SearchError::NavigationTimeout { .. })));
        assert_eq!(stats.get_info_count(InfoType::ReadinessPolls), 3);
    }

    #[tokio::test]
    async fn test_unsettled_count_uses_last_observation() {
        let mut session = ScriptedSession::new(&[(1, 1), (1, 2), (1, 3)]);
        let stats = ExtractionStats::new();
        let count = wait_for_ready(&mut session, &policy(5_000, 3), &stats)
            .await
            .expect("readiness element was present");
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_page_ready_during_last_delay_is_polled_at_deadline() {
        let mut session = ScriptedSession::new(&[(0, 0), (1, 1)]);
        let stats = ExtractionStats::new();
        let policy = ReadinessPolicy {
            initial_delay: Duration::from_millis(400),
            max_delay: Duration::from_millis(400),
            ..policy(300, 20)
        };

        let count = wait_for_ready(&mut session, &policy, &stats)
            .await
            .expect("readiness element appeared before the deadline");
        assert_eq!(count, 1);
        assert_eq!(stats.get_info_count(InfoType::ReadinessPolls), 2);
    }

    #[tokio::test]
    async fn test_session_failure_propagates() {
        let mut session = ScriptedSession::new(&[(1, 1)]);
        session.fail = true;
        let stats = ExtractionStats::new();
        let result = wait_for_ready(&mut session, &policy(5_000, 3), &stats).await;
        assert!(matches!(result, Err(SearchError::Session(_))));
    }
}
