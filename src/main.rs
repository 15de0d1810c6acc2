//! Terminal runner (default binary).
//!
//! Plays the handset game in a terminal: crossterm for input, the
//! framebuffer renderer for output, and deadline timers standing in for the
//! handset's timer service.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::{info, LevelFilter};

use handset_tetris::core::{Geometry, Preferences, PrefsFile, Renderer, Session};
use handset_tetris::input::{handle_key_event, handle_menu_key, should_quit, MenuCommand};
use handset_tetris::term::{
    FileLogger, FrameBuffer, GameView, HostConfig, TerminalHost, TerminalRenderer, Viewport,
};
use handset_tetris::types::{GameState, MAX_LEVEL};

/// Longest the loop blocks on input when no timer is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = HostConfig::from_env();
    if let Some(path) = &config.log_path {
        FileLogger::open(path, LevelFilter::Debug)?.install()?;
    }

    let seed = config.seed.unwrap_or_else(time_seed);
    info!("[Main] screen {:?}, seed {}", config.screen, seed);

    let prefs = PrefsFile::new(config.prefs_path.clone());
    let (width, height) = config.screen;
    let geometry = Geometry::from_screen(width, height)?;
    let mut host = TerminalHost::new(GameView::new(geometry), Some(prefs));
    let mut session = Session::new(geometry, seed, &mut host)?;
    host.view_mut().set_grid_lines(session.preferences().grid_lines);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut host, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, host: &mut TerminalHost, session: &mut Session) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    session.start_new_game(host);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        host.present(term, Viewport::new(w, h), &mut fb)?;

        let timeout = host.poll_timeout(Instant::now(), IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    handle_key(key, host, session);
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    host.flush_frame();
                }
                _ => {}
            }
        }

        let now = Instant::now();
        while let Some(kind) = host.expire_due(now) {
            session.on_timer(kind, host);
        }
    }
}

fn handle_key(key: KeyEvent, host: &mut TerminalHost, session: &mut Session) {
    if let Some(input) = handle_key_event(key) {
        session.handle_input(input, host);
        return;
    }
    let Some(command) = handle_menu_key(key) else {
        return;
    };

    match command {
        MenuCommand::NewGame => session.start_new_game(host),
        MenuCommand::Continue => {
            session.continue_next_level(host);
        }
        MenuCommand::Back => {
            session.acknowledge(host);
        }
        MenuCommand::ToggleSound => {
            let prefs = Preferences {
                sound_on: !session.preferences().sound_on,
                ..*session.preferences()
            };
            session.set_preferences(prefs, host);
        }
        MenuCommand::ToggleGridLines => {
            let prefs = Preferences {
                grid_lines: !session.preferences().grid_lines,
                ..*session.preferences()
            };
            session.set_preferences(prefs, host);
            host.view_mut().set_grid_lines(prefs.grid_lines);
        }
        MenuCommand::CycleLevel => {
            // Only between games; the new level applies to the next one.
            if matches!(session.state(), GameState::Running | GameState::Paused) {
                return;
            }
            let prefs = Preferences {
                level: session.preferences().level % MAX_LEVEL + 1,
                ..*session.preferences()
            };
            session.set_preferences(prefs, host);
        }
        MenuCommand::ClearScores => {
            if matches!(session.state(), GameState::Running | GameState::Paused) {
                return;
            }
            let mut prefs = *session.preferences();
            prefs.clear_scores();
            session.set_preferences(prefs, host);
        }
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
