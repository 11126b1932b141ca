//! Leaderboard runtime integration.
//!
//! Bridges the sync game loop with the async HTTP client. Requests are
//! spawned on an owned tokio runtime; results come back as
//! [`LeaderboardEvent`]s that the loop drains with [`LeaderboardRuntime::try_recv`].

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::client::{HttpLeaderboard, LeaderboardClient};
use crate::config::LeaderboardConfig;
use crate::entry::{Initials, ScoreEntry};

/// Which call an event answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardOp {
    Fetch,
    Submit,
}

impl LeaderboardOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardOp::Fetch => "fetch",
            LeaderboardOp::Submit => "submit",
        }
    }
}

/// Call requested by the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardRequest {
    Fetch,
    Submit { initials: Initials, score: u32 },
}

impl LeaderboardRequest {
    pub fn op(&self) -> LeaderboardOp {
        match self {
            LeaderboardRequest::Fetch => LeaderboardOp::Fetch,
            LeaderboardRequest::Submit { .. } => LeaderboardOp::Submit,
        }
    }
}

/// Completion delivered to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardEvent {
    Fetched(Vec<ScoreEntry>),
    Submitted(Vec<ScoreEntry>),
    Failed { op: LeaderboardOp, reason: String },
}

/// Run one request to completion, folding errors into a `Failed` event.
pub async fn run_request<C: LeaderboardClient>(
    client: &C,
    request: LeaderboardRequest,
) -> LeaderboardEvent {
    let op = request.op();
    let result = match &request {
        LeaderboardRequest::Fetch => client.fetch_high_scores().await,
        LeaderboardRequest::Submit { initials, score } => {
            client.submit_score(initials, *score).await
        }
    };

    match result {
        Ok(entries) => {
            log::debug!("leaderboard {} returned {} entries", op.as_str(), entries.len());
            match op {
                LeaderboardOp::Fetch => LeaderboardEvent::Fetched(entries),
                LeaderboardOp::Submit => LeaderboardEvent::Submitted(entries),
            }
        }
        Err(err) => {
            log::warn!("leaderboard {} failed: {}", op.as_str(), err);
            LeaderboardEvent::Failed {
                op,
                reason: err.to_string(),
            }
        }
    }
}

/// Running leaderboard bridge.
pub struct LeaderboardRuntime<C = HttpLeaderboard> {
    rt: Runtime,
    client: Arc<C>,
    event_tx: mpsc::UnboundedSender<LeaderboardEvent>,
    event_rx: mpsc::UnboundedReceiver<LeaderboardEvent>,
}

impl LeaderboardRuntime<HttpLeaderboard> {
    /// Start the bridge from environment variables.
    ///
    /// Returns None if `BLOCKFALL_LEADERBOARD_DISABLED` is set or the
    /// client cannot be built.
    pub fn start_from_env() -> Option<Self> {
        Self::start(LeaderboardConfig::from_env())
    }

    pub fn start(config: LeaderboardConfig) -> Option<Self> {
        if config.disabled {
            log::info!("leaderboard disabled (BLOCKFALL_LEADERBOARD_DISABLED)");
            return None;
        }

        let base_url = config.base_url.clone();
        let client = match HttpLeaderboard::new(config) {
            Ok(client) => client,
            Err(err) => {
                log::error!("failed to build leaderboard client: {}", err);
                return None;
            }
        };

        match Self::with_client(client) {
            Ok(runtime) => {
                log::info!("leaderboard at {}", base_url);
                Some(runtime)
            }
            Err(err) => {
                log::error!("failed to create tokio runtime: {}", err);
                None
            }
        }
    }
}

impl<C: LeaderboardClient> LeaderboardRuntime<C> {
    pub fn with_client(client: C) -> std::io::Result<Self> {
        let rt = Runtime::new()?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            rt,
            client: Arc::new(client),
            event_tx,
            event_rx,
        })
    }

    /// Fire a request in the background. The result arrives as an event.
    pub fn request(&self, request: LeaderboardRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.event_tx.clone();
        self.rt.spawn(async move {
            let event = run_request(&*client, request).await;
            let _ = tx.send(event);
        });
    }

    pub fn try_recv(&mut self) -> Option<LeaderboardEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Block until an event arrives or `timeout` elapses.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<LeaderboardEvent> {
        let rx = &mut self.event_rx;
        self.rt
            .block_on(async move { tokio::time::timeout(timeout, rx.recv()).await.ok().flatten() })
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeaderboardError;
    use std::sync::Mutex;

    /// In-memory stand-in for the service
    #[derive(Default)]
    struct FakeLeaderboard {
        entries: Mutex<Vec<ScoreEntry>>,
        offline: bool,
    }

    impl LeaderboardClient for FakeLeaderboard {
        async fn submit_score(
            &self,
            initials: &Initials,
            score: u32,
        ) -> Result<Vec<ScoreEntry>, LeaderboardError> {
            if self.offline {
                return Err(LeaderboardError::Status(503));
            }
            let mut entries = self.entries.lock().unwrap();
            entries.push(ScoreEntry::new(initials.as_str(), score));
            entries.sort_by(|a, b| b.score.cmp(&a.score));
            Ok(entries.clone())
        }

        async fn fetch_high_scores(&self) -> Result<Vec<ScoreEntry>, LeaderboardError> {
            if self.offline {
                return Err(LeaderboardError::Status(503));
            }
            Ok(self.entries.lock().unwrap().clone())
        }
    }

    const WAIT: Duration = Duration::from_secs(2);

    #[test]
    fn test_disabled_config_starts_nothing() {
        let config = LeaderboardConfig {
            disabled: true,
            ..LeaderboardConfig::default()
        };
        assert!(LeaderboardRuntime::start(config).is_none());
    }

    #[test]
    fn test_try_recv_is_empty_without_requests() {
        let mut runtime = LeaderboardRuntime::with_client(FakeLeaderboard::default()).unwrap();
        assert!(runtime.try_recv().is_none());
    }

    #[test]
    fn test_submit_then_fetch() {
        let mut runtime = LeaderboardRuntime::with_client(FakeLeaderboard::default()).unwrap();

        runtime.request(LeaderboardRequest::Submit {
            initials: Initials::parse("abc").unwrap(),
            score: 140,
        });
        assert_eq!(
            runtime.recv_timeout(WAIT),
            Some(LeaderboardEvent::Submitted(vec![ScoreEntry::new("ABC", 140)]))
        );

        runtime.request(LeaderboardRequest::Fetch);
        assert_eq!(
            runtime.recv_timeout(WAIT),
            Some(LeaderboardEvent::Fetched(vec![ScoreEntry::new("ABC", 140)]))
        );
    }

    #[test]
    fn test_failure_becomes_event() {
        let mut runtime = LeaderboardRuntime::with_client(FakeLeaderboard {
            offline: true,
            ..FakeLeaderboard::default()
        })
        .unwrap();

        runtime.request(LeaderboardRequest::Fetch);
        match runtime.recv_timeout(WAIT) {
            Some(LeaderboardEvent::Failed { op, reason }) => {
                assert_eq!(op, LeaderboardOp::Fetch);
                assert_eq!(reason, "server returned HTTP 503");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_run_request_directly() {
        let fake = FakeLeaderboard::default();
        let event = tokio_test::block_on(run_request(
            &fake,
            LeaderboardRequest::Submit {
                initials: Initials::parse("zed").unwrap(),
                score: 40,
            },
        ));
        assert_eq!(event, LeaderboardEvent::Submitted(vec![ScoreEntry::new("ZED", 40)]));
        assert_eq!(LeaderboardRequest::Fetch.op(), LeaderboardOp::Fetch);
    }
}
