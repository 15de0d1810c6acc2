//! Core game logic - playfield, pieces, line clears and the game lifecycle
//!
//! This crate holds every game rule and no I/O. Drawing, sound, storage and
//! timers are reached through the traits in [`host`], so the same session runs
//! in a terminal, a handset shell or a headless test.
//!
//! # Module Structure
//!
//! - [`grid`]: 12-column occupancy grid with cached per-row masks
//! - [`catalog`]: the seven shapes, their pivots and colors
//! - [`geometry`]: pixel placement of the playfield, launch and preview
//! - [`piece`]: falling pieces and the move/rotate engine
//! - [`clear`]: pinning and full-row removal
//! - [`scoring`]: line points, speed steps and level transitions
//! - [`session`]: the lifecycle state machine
//! - [`host`]: renderer, audio, persistence and timer seams
//! - [`prefs`]: persisted settings and best scores
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every kind is equally likely on every spawn
//! - **Fixed rotation**: one handedness around an axis block, with left, right
//!   and top pushes when the result overshoots the playfield. The square never rotates.
//! - **Scoring**: 10/30/50/100 points for 1-4 rows; every 500 points the level
//!   is passed and gravity speeds up by 50 ms
//!
//! # Example
//!
//! ```
//! use handset_tetris_core::{Geometry, HeadlessHost, Session};
//! use handset_tetris_types::{GameState, InputEvent, TimerKind};
//!
//! let mut host = HeadlessHost::new();
//! let mut session = Session::new(Geometry::cells(20).unwrap(), 12345, &mut host).unwrap();
//! session.start_new_game(&mut host);
//!
//! session.handle_input(InputEvent::MoveRight, &mut host);
//! session.handle_input(InputEvent::HardDrop, &mut host);
//!
//! assert_eq!(session.state(), GameState::Running);
//! assert!(!session.grid().is_empty());
//! assert!(host.timer(TimerKind::Gravity).is_some());
//! ```

pub mod catalog;
pub mod clear;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod piece;
pub mod prefs;
pub mod rng;
pub mod scoring;
pub mod session;

pub use handset_tetris_types as types;

// Re-export commonly used types for convenience
pub use error::{GeometryError, GridError, PrefsError, SessionError};
pub use geometry::Geometry;
pub use grid::{Cell, Grid};
pub use host::{
    Audio, HeadlessHost, Host, Hud, LevelComplete, Paint, Persistence, PieceSlot, Renderer,
    Report, TimerService,
};
pub use piece::{Block, Piece};
pub use prefs::{Preferences, PrefsFile};
pub use rng::SimpleRng;
pub use session::Session;
