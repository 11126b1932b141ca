//! Game configuration from environment variables

use std::env;
use std::time::Duration;

use crate::types::{BOARD_COLUMNS, BOARD_ROWS, GRAVITY_INTERVAL_MS};

/// Smallest board that fits every catalog piece in both orientations.
pub const MIN_BOARD_SIDE: u16 = 4;
pub const MAX_BOARD_SIDE: u16 = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: u16,
    pub columns: u16,
    pub gravity: Duration,
    /// Fixed piece sequence when set
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            columns: BOARD_COLUMNS,
            gravity: Duration::from_millis(GRAVITY_INTERVAL_MS),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Read `BLOCKFALL_ROWS`, `BLOCKFALL_COLUMNS`, `BLOCKFALL_GRAVITY_MS`
    /// and `BLOCKFALL_SEED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(mut get_env: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let side = |value: Option<String>, default: u16| {
            value
                .and_then(|s| s.trim().parse::<u16>().ok())
                .filter(|n| (MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(n))
                .unwrap_or(default)
        };

        let rows = side(get_env("BLOCKFALL_ROWS"), BOARD_ROWS);
        let columns = side(get_env("BLOCKFALL_COLUMNS"), BOARD_COLUMNS);

        let gravity_ms = get_env("BLOCKFALL_GRAVITY_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(GRAVITY_INTERVAL_MS);

        let seed = get_env("BLOCKFALL_SEED").and_then(|s| s.trim().parse::<u64>().ok());

        Self {
            rows,
            columns,
            gravity: Duration::from_millis(gravity_ms),
            seed,
        }
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::from_lookup(|_| None);
        assert_eq!(config, GameConfig::default());
        assert_eq!((config.rows, config.columns), (20, 10));
        assert_eq!(config.gravity, Duration::from_millis(500));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = GameConfig::from_lookup(|k| match k {
            "BLOCKFALL_ROWS" => Some("24".to_string()),
            "BLOCKFALL_COLUMNS" => Some(" 12 ".to_string()),
            "BLOCKFALL_GRAVITY_MS" => Some("250".to_string()),
            "BLOCKFALL_SEED" => Some("42".to_string()),
            _ => None,
        });
        assert_eq!((config.rows, config.columns), (24, 12));
        assert_eq!(config.gravity, Duration::from_millis(250));
        assert_eq!(config.resolve_seed(), 42);
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let config = GameConfig::from_lookup(|k| match k {
            "BLOCKFALL_ROWS" => Some("3".to_string()),
            "BLOCKFALL_COLUMNS" => Some("1000".to_string()),
            "BLOCKFALL_GRAVITY_MS" => Some("0".to_string()),
            "BLOCKFALL_SEED" => Some("-1".to_string()),
            _ => None,
        });
        assert_eq!(config, GameConfig::default());
    }
}
