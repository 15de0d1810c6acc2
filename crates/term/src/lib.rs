//! Terminal host for the handset game.
//!
//! A small, game-oriented rendering layer: the session draws into a retained
//! [`GameView`], which is composed into a character framebuffer and flushed to
//! the terminal with diffing. No widgets or layout engine.
//!
//! Also provides the rest of what a session needs from its environment:
//! deadline timers, the bell for sound, JSON preferences, environment
//! configuration and a file logger.

pub mod config;
pub mod fb;
pub mod game_view;
pub mod host;
pub mod logger;
pub mod renderer;

pub use handset_tetris_core as core;
pub use handset_tetris_types as types;

pub use config::HostConfig;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Overlay, Viewport};
pub use host::{DeadlineTimers, TerminalHost};
pub use logger::FileLogger;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
