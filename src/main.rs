//! Terminal Blockfall runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and a framebuffer renderer.
//! Leaderboard calls run in the background; the loop never waits on them.

use std::env;
use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::{Env, Target};

use blockfall::engine::{Command, Controller, GameConfig, GravityTimer};
use blockfall::input::{map_key, should_quit, InputAction, KeyMode, MouseSwipe};
use blockfall::leaderboard::{LeaderboardRequest, LeaderboardRuntime};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::MenuAction;

/// Upper bound on one input wait, so finished leaderboard calls show up
/// between gravity steps.
const MAX_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    init_logging();

    let config = GameConfig::from_env();
    let mut leaderboard = LeaderboardRuntime::start_from_env();
    let mut controller = Controller::new(config).with_leaderboard(leaderboard.is_some());
    log::info!(
        "blockfall starting (leaderboard {})",
        if controller.leaderboard_enabled() { "on" } else { "off" }
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut controller, leaderboard.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    match &result {
        Ok(()) => log::info!(
            "quit after {} game(s), last score {}",
            controller.games_started(),
            controller.session().score()
        ),
        Err(err) => log::error!("terminal loop failed: {:#}", err),
    }
    result
}

/// A full-screen UI cannot share stderr with log output, so logs go to
/// `BLOCKFALL_LOG_PATH` when set. Without it, logging is off unless
/// `RUST_LOG` asks for it.
fn init_logging() {
    let path = env::var("BLOCKFALL_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match path {
        Some(path) => match File::create(&path) {
            Ok(file) => {
                env_logger::Builder::from_env(Env::default().default_filter_or("info"))
                    .target(Target::Pipe(Box::new(file)))
                    .init();
            }
            Err(err) => eprintln!("cannot open log file {path}: {err}"),
        },
        None => {
            if env::var_os("RUST_LOG").is_some() {
                env_logger::init();
            }
        }
    }
}

fn key_mode(controller: &Controller) -> KeyMode {
    if !controller.is_over() {
        KeyMode::Playing
    } else if controller.prompt_open() {
        KeyMode::EnteringInitials
    } else {
        KeyMode::GameOver
    }
}

fn forward(leaderboard: Option<&LeaderboardRuntime>, request: Option<LeaderboardRequest>) {
    if let (Some(runtime), Some(request)) = (leaderboard, request) {
        runtime.request(request);
    }
}

fn run(
    term: &mut TerminalRenderer,
    controller: &mut Controller,
    mut leaderboard: Option<&mut LeaderboardRuntime>,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut swipe = MouseSwipe::default();
    let mut gravity = GravityTimer::new(controller.config().gravity, Instant::now());

    forward(leaderboard.as_deref(), controller.start());

    loop {
        // Leaderboard completions.
        if let Some(runtime) = leaderboard.as_deref_mut() {
            while let Some(event) = runtime.try_recv() {
                controller.dispatch(Command::Leaderboard(event));
            }
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(controller, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next gravity step.
        let timeout = gravity.time_until(Instant::now()).min(MAX_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let mode = key_mode(controller);
                    if should_quit(key, mode) {
                        return Ok(());
                    }

                    let command = match map_key(key, mode) {
                        Some(InputAction::Intent(intent)) => Some(Command::Intent(intent)),
                        Some(InputAction::Menu(action)) => {
                            if action == MenuAction::NewGame {
                                gravity.reset(Instant::now());
                            }
                            Some(Command::Menu(action))
                        }
                        None => None,
                    };
                    if let Some(command) = command {
                        forward(leaderboard.as_deref(), controller.dispatch(command));
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(intent) = swipe.handle_mouse_event(mouse) {
                        forward(
                            leaderboard.as_deref(),
                            controller.dispatch(Command::Intent(intent)),
                        );
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity stops with the game.
        if !controller.is_over() && gravity.fire(Instant::now()) {
            forward(leaderboard.as_deref(), controller.dispatch(Command::Tick));
        }
    }
}
