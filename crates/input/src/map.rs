//! Key mapping from terminal events to game inputs and menu commands.
//!
//! The handset keypad layout is kept (2 rotate, 4 left, 6 right, 8 drop,
//! 5 pause) next to arrows and the usual letter keys. Letters match either case.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::InputEvent;

/// Commands handled by the host rather than the running game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    NewGame,
    /// Play on from a passed level
    Continue,
    /// Leave a level screen for the report
    Back,
    ToggleSound,
    ToggleGridLines,
    /// Step the start level 1 -> 2 -> 3 -> 1
    CycleLevel,
    /// Forget all best scores
    ClearScores,
}

const GAME_KEYS: &[(KeyCode, InputEvent)] = &[
    (KeyCode::Left, InputEvent::MoveLeft),
    (KeyCode::Char('4'), InputEvent::MoveLeft),
    (KeyCode::Char('h'), InputEvent::MoveLeft),
    (KeyCode::Char('a'), InputEvent::MoveLeft),
    (KeyCode::Right, InputEvent::MoveRight),
    (KeyCode::Char('6'), InputEvent::MoveRight),
    (KeyCode::Char('l'), InputEvent::MoveRight),
    (KeyCode::Char('d'), InputEvent::MoveRight),
    (KeyCode::Up, InputEvent::Rotate),
    (KeyCode::Char('2'), InputEvent::Rotate),
    (KeyCode::Char('k'), InputEvent::Rotate),
    (KeyCode::Char('w'), InputEvent::Rotate),
    (KeyCode::Down, InputEvent::SoftDrop),
    (KeyCode::Char('j'), InputEvent::SoftDrop),
    (KeyCode::Char('s'), InputEvent::SoftDrop),
    (KeyCode::Char(' '), InputEvent::HardDrop),
    (KeyCode::Char('8'), InputEvent::HardDrop),
    (KeyCode::Char('5'), InputEvent::PauseToggle),
    (KeyCode::Char('p'), InputEvent::PauseToggle),
];

const MENU_KEYS: &[(KeyCode, MenuCommand)] = &[
    (KeyCode::Char('r'), MenuCommand::NewGame),
    (KeyCode::Char('n'), MenuCommand::NewGame),
    (KeyCode::Enter, MenuCommand::Continue),
    (KeyCode::Esc, MenuCommand::Back),
    (KeyCode::Backspace, MenuCommand::Back),
    (KeyCode::Char('m'), MenuCommand::ToggleSound),
    (KeyCode::Char('g'), MenuCommand::ToggleGridLines),
    (KeyCode::Char('v'), MenuCommand::CycleLevel),
    (KeyCode::Char('c'), MenuCommand::ClearScores),
];

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(ch) => KeyCode::Char(ch.to_ascii_lowercase()),
        other => other,
    }
}

fn lookup<T: Copy>(table: &[(KeyCode, T)], key: KeyEvent) -> Option<T> {
    let code = normalize(key.code);
    table
        .iter()
        .find_map(|&(bound, value)| (bound == code).then_some(value))
}

/// Map a key press to a game input
pub fn handle_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    lookup(GAME_KEYS, key)
}

/// Map a key press to a host command
pub fn handle_menu_key(key: KeyEvent) -> Option<MenuCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    lookup(MENU_KEYS, key)
}

/// `q` or Ctrl-C
pub fn should_quit(key: KeyEvent) -> bool {
    match normalize(key.code) {
        KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
