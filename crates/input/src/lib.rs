//! Terminal input module.
//!
//! Maps `crossterm` key events into the core's [`crate::types::InputEvent`]s
//! and the host-level [`MenuCommand`]s (new game, level screens, settings).
//! Keys are delivered one press at a time; the core has no key-repeat logic.

pub mod map;

pub use handset_tetris_types as types;

pub use map::{handle_key_event, handle_menu_key, should_quit, MenuCommand};
