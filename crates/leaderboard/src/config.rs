//! Client configuration from environment variables

use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:420";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Where and how the game talks to the high-score service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardConfig {
    /// Service root, without a trailing slash
    pub base_url: String,
    pub timeout: Duration,
    pub disabled: bool,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            disabled: false,
        }
    }
}

impl LeaderboardConfig {
    /// Read `BLOCKFALL_LEADERBOARD_URL`, `BLOCKFALL_LEADERBOARD_TIMEOUT_MS`
    /// and `BLOCKFALL_LEADERBOARD_DISABLED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(mut get_env: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let base_url = get_env("BLOCKFALL_LEADERBOARD_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_ms = get_env("BLOCKFALL_LEADERBOARD_TIMEOUT_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let disabled = get_env("BLOCKFALL_LEADERBOARD_DISABLED")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            disabled,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

pub(crate) fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LeaderboardConfig::from_lookup(|_| None);
        assert_eq!(config, LeaderboardConfig::default());
        assert_eq!(config.endpoint("submit_score"), "http://localhost:420/submit_score");
    }

    #[test]
    fn test_overrides() {
        let config = LeaderboardConfig::from_lookup(|k| match k {
            "BLOCKFALL_LEADERBOARD_URL" => Some("https://scores.example.com/api/".to_string()),
            "BLOCKFALL_LEADERBOARD_TIMEOUT_MS" => Some("250".to_string()),
            "BLOCKFALL_LEADERBOARD_DISABLED" => Some("TRUE".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "https://scores.example.com/api");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(config.disabled);
        assert_eq!(
            config.endpoint("/get_high_scores"),
            "https://scores.example.com/api/get_high_scores"
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = LeaderboardConfig::from_lookup(|k| match k {
            "BLOCKFALL_LEADERBOARD_URL" => Some("   ".to_string()),
            "BLOCKFALL_LEADERBOARD_TIMEOUT_MS" => Some("soon".to_string()),
            "BLOCKFALL_LEADERBOARD_DISABLED" => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config, LeaderboardConfig::default());
    }
}
