//! Controller tests - whole games driven through commands

use blockfall::core::definition;
use blockfall::engine::{Command, Controller, GameConfig};
use blockfall::leaderboard::{LeaderboardEvent, LeaderboardOp, LeaderboardRequest, ScoreEntry};
use blockfall::types::{Color, Intent, MenuAction, PieceKind};

fn controller(seed: u64) -> Controller {
    Controller::new(GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    })
}

/// Tick until the game ends, steering nothing.
fn play_out(controller: &mut Controller) -> Option<LeaderboardRequest> {
    for _ in 0..10_000 {
        let request = controller.dispatch(Command::Tick);
        if controller.is_over() {
            return request;
        }
    }
    panic!("game did not end");
}

fn menu(controller: &mut Controller, action: MenuAction) -> Option<LeaderboardRequest> {
    controller.dispatch(Command::Menu(action))
}

#[test]
fn test_full_game_then_submit() {
    let mut c = controller(3);
    assert_eq!(c.start(), Some(LeaderboardRequest::Fetch));
    c.dispatch(Command::Leaderboard(LeaderboardEvent::Fetched(vec![])));

    assert_eq!(play_out(&mut c), Some(LeaderboardRequest::Fetch));
    assert!(c.prompt_open());

    for ch in "jo".chars() {
        menu(&mut c, MenuAction::TypeChar(ch));
    }
    // Two characters are not enough.
    assert_eq!(menu(&mut c, MenuAction::SubmitScore), None);
    assert_eq!(
        c.prompt().and_then(|p| p.notice()),
        Some("Please enter exactly 3 initials")
    );

    menu(&mut c, MenuAction::TypeChar('e'));
    let score = c.session().score();
    match menu(&mut c, MenuAction::SubmitScore) {
        Some(LeaderboardRequest::Submit { initials, score: sent }) => {
            assert_eq!(initials.as_str(), "JOE");
            assert_eq!(sent, score);
        }
        other => panic!("expected a submit request, got {:?}", other),
    }

    let table = vec![ScoreEntry::new("JOE", score)];
    c.dispatch(Command::Leaderboard(LeaderboardEvent::Submitted(table.clone())));
    assert!(!c.prompt_open());
    assert_eq!(c.scores().entries(), table.as_slice());
}

#[test]
fn test_input_is_ignored_after_game_over() {
    let mut c = controller(5);
    c.start();
    play_out(&mut c);

    let board = c.session().board().clone();
    for intent in Intent::ALL {
        assert_eq!(c.dispatch(Command::Intent(intent)), None);
    }
    assert_eq!(c.dispatch(Command::Tick), None);
    assert_eq!(c.session().board(), &board);
}

#[test]
fn test_line_clear_through_intents() {
    let mut c = controller(8);
    c.start();

    // Bottom row full except columns 4 and 5.
    {
        let board = c.session_mut().board_mut();
        for x in (0..10).filter(|x| *x != 4 && *x != 5) {
            board.set_cell(x, 19, Color::Green);
        }
    }
    c.session_mut().spawn_piece(definition(PieceKind::O));

    for _ in 0..19 {
        c.dispatch(Command::Intent(Intent::SoftDrop));
    }
    assert_eq!(c.session().score(), 40);
    assert_eq!(c.session().lines(), 1);
    assert!(!c.is_over());
}

#[test]
fn test_new_game_after_game_over() {
    let mut c = controller(13);
    c.start();
    play_out(&mut c);
    menu(&mut c, MenuAction::DismissPrompt);

    assert_eq!(
        menu(&mut c, MenuAction::NewGame),
        Some(LeaderboardRequest::Fetch)
    );
    assert!(!c.is_over());
    assert_eq!(c.session().score(), 0);
    assert_eq!(c.session().board().occupied_count(), 0);
    assert_eq!(c.games_started(), 2);
}

#[test]
fn test_offline_leaderboard_keeps_game_playable() {
    let mut c = controller(17);
    c.start();
    c.dispatch(Command::Leaderboard(LeaderboardEvent::Failed {
        op: LeaderboardOp::Fetch,
        reason: "request failed: connection refused".to_string(),
    }));

    assert!(c.scores().last_error().is_some());
    assert!(c.dispatch(Command::Intent(Intent::MoveLeft)).is_none());
    c.dispatch(Command::Tick);
    assert!(!c.is_over());
}

#[test]
fn test_disabled_leaderboard_game_runs_without_requests() {
    let mut c = controller(19).with_leaderboard(false);
    assert_eq!(c.start(), None);
    assert_eq!(play_out(&mut c), None);
    assert!(c.prompt_open());

    for ch in "abc".chars() {
        menu(&mut c, MenuAction::TypeChar(ch));
    }
    assert_eq!(menu(&mut c, MenuAction::SubmitScore), None);
    assert_eq!(
        c.prompt().and_then(|p| p.notice()),
        Some("leaderboard is disabled")
    );
    assert_eq!(menu(&mut c, MenuAction::ToggleHighScores), None);
}
