//! HTTP client for the high-score service
//!
//! Two calls, both answering with the current top list:
//!
//! - `POST {base}/submit_score` with `{"initials": "ABC", "score": 140}`
//! - `GET {base}/get_high_scores`

use std::future::Future;

use reqwest::Response;

use crate::config::LeaderboardConfig;
use crate::entry::{Initials, ScoreEntry};
use crate::error::LeaderboardError;

/// Async seam between the game and whatever stores high scores.
pub trait LeaderboardClient: Send + Sync + 'static {
    fn submit_score(
        &self,
        initials: &Initials,
        score: u32,
    ) -> impl Future<Output = Result<Vec<ScoreEntry>, LeaderboardError>> + Send;

    fn fetch_high_scores(
        &self,
    ) -> impl Future<Output = Result<Vec<ScoreEntry>, LeaderboardError>> + Send;
}

/// `reqwest`-backed client bound to one base URL
#[derive(Debug, Clone)]
pub struct HttpLeaderboard {
    http: reqwest::Client,
    config: LeaderboardConfig,
}

impl HttpLeaderboard {
    pub fn new(config: LeaderboardConfig) -> Result<Self, LeaderboardError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn read_entries(response: Response) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        let status = response.status();
        if !status.is_success() {
            return Err(LeaderboardError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl LeaderboardClient for HttpLeaderboard {
    async fn submit_score(
        &self,
        initials: &Initials,
        score: u32,
    ) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        let body = ScoreEntry::new(initials.as_str(), score);
        let response = self
            .http
            .post(self.config.endpoint("submit_score"))
            .json(&body)
            .send()
            .await?;
        Self::read_entries(response).await
    }

    async fn fetch_high_scores(&self) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        let response = self
            .http
            .get(self.config.endpoint("get_high_scores"))
            .send()
            .await?;
        Self::read_entries(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_keeps_base_url() {
        let client = HttpLeaderboard::new(LeaderboardConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_millis(100),
            disabled: false,
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_http_error() {
        // Port 9 (discard) is not listening on loopback in test environments.
        let client = HttpLeaderboard::new(LeaderboardConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_millis(500),
            disabled: false,
        })
        .unwrap();
        let err = client.fetch_high_scores().await.unwrap_err();
        assert!(matches!(err, LeaderboardError::Http(_)), "{err:?}");
    }
}
