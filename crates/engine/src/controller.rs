//! Game controller - the single owner of the session.
//!
//! Gravity ticks, player intents, menu keys and leaderboard completions all
//! arrive as [`Command`]s. Anything that needs the network comes back out as
//! a [`LeaderboardRequest`] for the caller to run; the controller itself never
//! blocks.

use crate::core::GameSession;
use crate::dispatch::dispatch_intent;
use crate::leaderboard::{LeaderboardError, LeaderboardEvent, LeaderboardOp, LeaderboardRequest};
use crate::prompt::ScorePrompt;
use crate::scores::HighScoresView;
use crate::types::{Intent, MenuAction};
use crate::GameConfig;

/// Everything that can change game or UI state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Menu(MenuAction),
    /// One gravity step
    Tick,
    Leaderboard(LeaderboardEvent),
}

#[derive(Debug, Clone)]
pub struct Controller {
    config: GameConfig,
    session: GameSession,
    scores: HighScoresView,
    prompt: Option<ScorePrompt>,
    leaderboard_enabled: bool,
    games_started: u32,
    /// Fetches requested but not yet answered
    pending_fetches: u32,
    /// Of those, how many were overtaken by a submit response
    stale_fetches: u32,
}

impl Controller {
    pub fn new(config: GameConfig) -> Self {
        let seed = config.resolve_seed();
        log::info!(
            "board {}x{}, gravity {}ms, seed {}",
            config.columns,
            config.rows,
            config.gravity.as_millis(),
            seed
        );
        let session = GameSession::new(config.rows, config.columns, seed);
        Self {
            config,
            session,
            scores: HighScoresView::default(),
            prompt: None,
            leaderboard_enabled: true,
            games_started: 0,
            pending_fetches: 0,
            stale_fetches: 0,
        }
    }

    /// Turn leaderboard requests on or off (off when no runtime is running).
    pub fn with_leaderboard(mut self, enabled: bool) -> Self {
        self.leaderboard_enabled = enabled;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Mutable session access for pre-filled setups.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn scores(&self) -> &HighScoresView {
        &self.scores
    }

    pub fn prompt(&self) -> Option<&ScorePrompt> {
        self.prompt.as_ref()
    }

    pub fn prompt_open(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    pub fn leaderboard_enabled(&self) -> bool {
        self.leaderboard_enabled
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    /// Spawn the first piece and refresh the high scores.
    pub fn start(&mut self) -> Option<LeaderboardRequest> {
        if self.session.started() {
            return None;
        }
        self.session.start();
        self.games_started += 1;
        log::info!("game {} started", self.games_started);

        if self.session.is_over() {
            return self.on_game_over();
        }
        self.request_fetch()
    }

    pub fn dispatch(&mut self, command: Command) -> Option<LeaderboardRequest> {
        match command {
            Command::Intent(intent) => {
                if self.session.is_over() {
                    return None;
                }
                dispatch_intent(&mut self.session, intent);
                self.after_step()
            }
            Command::Tick => {
                if self.session.is_over() {
                    return None;
                }
                self.session.tick();
                self.after_step()
            }
            Command::Menu(action) => self.handle_menu(action),
            Command::Leaderboard(event) => {
                self.handle_leaderboard(event);
                None
            }
        }
    }

    fn after_step(&mut self) -> Option<LeaderboardRequest> {
        let event = self.session.take_last_event()?;
        if event.lines_cleared > 0 {
            log::info!(
                "cleared {} line(s) for {}, score {}",
                event.lines_cleared,
                event.score_delta,
                self.session.score()
            );
        }
        if event.game_over {
            return self.on_game_over();
        }
        None
    }

    fn on_game_over(&mut self) -> Option<LeaderboardRequest> {
        log::info!(
            "game over: score {}, lines {}",
            self.session.score(),
            self.session.lines()
        );
        self.prompt = Some(ScorePrompt::new());
        self.request_fetch()
    }

    fn request_fetch(&mut self) -> Option<LeaderboardRequest> {
        if !self.leaderboard_enabled {
            return None;
        }
        self.scores.mark_loading();
        self.pending_fetches += 1;
        Some(LeaderboardRequest::Fetch)
    }

    fn handle_menu(&mut self, action: MenuAction) -> Option<LeaderboardRequest> {
        match action {
            MenuAction::NewGame => {
                if !self.session.is_over() {
                    return None;
                }
                self.session.reset();
                self.prompt = None;
                self.start()
            }
            MenuAction::ToggleHighScores => {
                if self.scores.toggle() {
                    self.request_fetch()
                } else {
                    None
                }
            }
            MenuAction::TypeChar(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.push(c);
                }
                None
            }
            MenuAction::Backspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.backspace();
                }
                None
            }
            MenuAction::SubmitScore => self.submit_score(),
            MenuAction::DismissPrompt => {
                self.prompt = None;
                None
            }
        }
    }

    fn submit_score(&mut self) -> Option<LeaderboardRequest> {
        let prompt = self.prompt.as_mut()?;
        let initials = prompt.submit()?;
        if !self.leaderboard_enabled {
            prompt.fail(LeaderboardError::Disabled.to_string());
            return None;
        }

        let score = self.session.score();
        log::info!("submitting {} for {}", score, initials);
        Some(LeaderboardRequest::Submit { initials, score })
    }

    /// Account for a finished fetch. False when a submit response already
    /// delivered a newer list than this fetch can hold.
    fn settle_fetch(&mut self) -> bool {
        self.pending_fetches = self.pending_fetches.saturating_sub(1);
        if self.stale_fetches > 0 {
            self.stale_fetches -= 1;
            log::debug!("dropping fetch result overtaken by a submit");
            return false;
        }
        true
    }

    fn handle_leaderboard(&mut self, event: LeaderboardEvent) {
        match event {
            LeaderboardEvent::Fetched(entries) => {
                if self.settle_fetch() {
                    self.scores.replace(entries);
                }
            }
            LeaderboardEvent::Submitted(entries) => {
                self.stale_fetches = self.pending_fetches;
                self.scores.replace(entries);
                if self.prompt.as_ref().is_some_and(|p| p.is_submitting()) {
                    self.prompt = None;
                }
            }
            LeaderboardEvent::Failed { op, reason } => {
                match op {
                    LeaderboardOp::Submit => {
                        if let Some(prompt) = self.prompt.as_mut() {
                            prompt.fail(reason.clone());
                        }
                    }
                    LeaderboardOp::Fetch => {
                        if !self.settle_fetch() {
                            return;
                        }
                    }
                }
                self.scores.fail(reason);
            }
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
