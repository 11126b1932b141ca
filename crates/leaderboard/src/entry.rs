//! Score entries and validated initials

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LeaderboardError;
use crate::types::INITIALS_LEN;

/// One row of the high-score list as the client sees it.
///
/// The service sends more fields (`id`, `timestamp`); they are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub initials: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(initials: impl Into<String>, score: u32) -> Self {
        Self {
            initials: initials.into(),
            score,
        }
    }
}

/// Player initials: trimmed, upper-cased, exactly three characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Initials(String);

impl Initials {
    /// Normalize and validate raw input.
    ///
    /// ```
    /// use blockfall_leaderboard::Initials;
    ///
    /// assert_eq!(Initials::parse(" abc ").unwrap().as_str(), "ABC");
    /// assert!(Initials::parse("ab").is_err());
    /// assert!(Initials::parse("abcd").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, LeaderboardError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.chars().count() != INITIALS_LEN {
            return Err(LeaderboardError::InvalidInitials);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Initials {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Initials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
