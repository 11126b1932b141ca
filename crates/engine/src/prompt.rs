//! Initials entry shown after game over.

use crate::leaderboard::Initials;

/// Typed characters beyond this are dropped.
pub const PROMPT_MAX_CHARS: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScorePrompt {
    buffer: String,
    notice: Option<String>,
    submitting: bool,
}

impl ScorePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Last validation or network message for the player
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Append an alphanumeric character, upper-cased. Anything else is ignored.
    pub fn push(&mut self, c: char) {
        if self.submitting || !c.is_alphanumeric() {
            return;
        }
        if self.buffer.chars().count() >= PROMPT_MAX_CHARS {
            return;
        }
        self.buffer.extend(c.to_uppercase());
        self.notice = None;
    }

    pub fn backspace(&mut self) {
        if self.submitting {
            return;
        }
        self.buffer.pop();
        self.notice = None;
    }

    /// Validate the buffer for submission.
    ///
    /// On failure the error message becomes the notice and nothing is sent.
    /// Returns None while a submission is already in flight.
    pub fn submit(&mut self) -> Option<Initials> {
        if self.submitting {
            return None;
        }
        match Initials::parse(&self.buffer) {
            Ok(initials) => {
                self.submitting = true;
                self.notice = Some("Submitting...".to_string());
                Some(initials)
            }
            Err(err) => {
                self.notice = Some(err.to_string());
                None
            }
        }
    }

    /// Show an error and allow another attempt.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.submitting = false;
        self.notice = Some(reason.into());
    }
}
