//! Client-side view of the high-score list.

use crate::leaderboard::ScoreEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScoresView {
    entries: Vec<ScoreEntry>,
    visible: bool,
    loading: bool,
    last_error: Option<String>,
}

impl HighScoresView {
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Whether the overlay is open
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Flip the overlay; returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn mark_loading(&mut self) {
        self.loading = true;
    }

    pub fn replace(&mut self, entries: Vec<ScoreEntry>) {
        self.entries = entries;
        self.loading = false;
        self.last_error = None;
    }

    /// Keep the stale list and remember why the refresh failed.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.loading = false;
        self.last_error = Some(reason.into());
    }
}
