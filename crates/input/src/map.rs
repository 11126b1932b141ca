//! Key mapping from terminal events to game intents and menu actions.

use crate::types::{Intent, MenuAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the keyboard is currently driving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// A piece is falling
    Playing,
    /// Game over, no prompt open
    GameOver,
    /// Game over, typing initials
    EnteringInitials,
}

/// Result of mapping one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Intent(Intent),
    Menu(MenuAction),
}

/// Map keyboard input to gameplay intents.
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Intent::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Intent::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Intent::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Intent::Rotate),

        _ => None,
    }
}

/// Map keyboard input to menu actions for the given mode.
pub fn handle_menu_key(key: KeyEvent, mode: KeyMode) -> Option<MenuAction> {
    if key.code == KeyCode::Tab {
        return Some(MenuAction::ToggleHighScores);
    }

    match mode {
        KeyMode::Playing => None,
        KeyMode::GameOver => match key.code {
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('r') | KeyCode::Char('R') => {
                Some(MenuAction::NewGame)
            }
            _ => None,
        },
        KeyMode::EnteringInitials => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return None;
            }
            match key.code {
                KeyCode::Enter => Some(MenuAction::SubmitScore),
                KeyCode::Esc => Some(MenuAction::DismissPrompt),
                KeyCode::Backspace => Some(MenuAction::Backspace),
                KeyCode::Char(c) => Some(MenuAction::TypeChar(c)),
                _ => None,
            }
        }
    }
}

/// Map a key press for the current mode. Gameplay keys only apply while playing.
pub fn map_key(key: KeyEvent, mode: KeyMode) -> Option<InputAction> {
    if let Some(action) = handle_menu_key(key, mode) {
        return Some(InputAction::Menu(action));
    }
    match mode {
        KeyMode::Playing => handle_key_event(key).map(InputAction::Intent),
        KeyMode::GameOver | KeyMode::EnteringInitials => None,
    }
}

/// Check if key should quit the game.
///
/// While initials are being typed, `q` is a letter; only Ctrl-C quits.
pub fn should_quit(key: KeyEvent, mode: KeyMode) -> bool {
    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if mode == KeyMode::EnteringInitials {
        return ctrl_c;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) || ctrl_c
}
