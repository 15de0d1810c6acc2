//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the simulation core, the terminal host, and tests alike.
//!
//! # Playfield Dimensions
//!
//! - **Columns**: fixed at 12 (indexed 0-11, left to right)
//! - **Rows**: 16 to 21 depending on the host screen (indexed from the top)
//!
//! # Timing Constants
//!
//! All timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INIT_TIME` | 900 | Gravity interval at the easiest level |
//! | `TIME_SLICE` | 50 | Interval decrement per speed step |
//! | `FLASH_TIME` | 200 | Flash frame period, also the gravity floor |
//! | `OVER_TIME` | 100 | Game-over sweep period |
//!
//! # Examples
//!
//! ```
//! use handset_tetris_types::{PieceKind, InputEvent, GRID_COLS, MAX_LEVEL};
//!
//! let kind = PieceKind::from_index(1).unwrap();
//! assert_eq!(kind, PieceKind::I);
//! assert_eq!(kind.index(), 1);
//! assert!(!PieceKind::O.rotates());
//!
//! assert_eq!(InputEvent::from_str("rotate"), Some(InputEvent::Rotate));
//! assert_eq!(GRID_COLS, 12);
//! assert_eq!(MAX_LEVEL, 3);
//! ```

/// Playfield width in cells (fixed)
pub const GRID_COLS: u16 = 12;

/// Smallest supported playfield height in rows
pub const MIN_GRID_ROWS: u16 = 16;

/// Largest supported playfield height in rows
pub const MAX_GRID_ROWS: u16 = 21;

/// Number of difficulty levels
pub const MAX_LEVEL: u8 = 3;

/// Max number of rows a single piece can complete
pub const MAX_REM_LINES: usize = 4;

/// Number of highlight frames shown on cleared rows
pub const MAX_FLASH_TIMES: u8 = 3;

/// Number of piece kinds in the catalog
pub const MAX_BLOCK_KIND: usize = 7;

/// Gravity interval at level 1, speed 0 (900ms)
pub const INIT_TIME: u32 = 900;

/// Gravity interval decrement per speed step (50ms)
pub const TIME_SLICE: u32 = 50;

/// Flash animation period (200ms); gravity can never be faster than this
pub const FLASH_TIME: u32 = 200;

/// Game-over sweep period (100ms per row)
pub const OVER_TIME: u32 = 100;

/// Score that converts into one speed step
pub const LEVEL_SCORE: u32 = 500;

/// Points per number of rows cleared at once (index = rows)
pub const LINE_SCORES: [u32; 5] = [0, 10, 30, 50, 100];

/// Piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    S,
    I,
    Z,
    J,
    T,
    L,
    O,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; MAX_BLOCK_KIND] = [
        PieceKind::S,
        PieceKind::I,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::T,
        PieceKind::L,
        PieceKind::O,
    ];

    /// Catalog index (0-6)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Look up a kind by catalog index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether rotation input applies to this kind.
    ///
    /// The square is excluded explicitly: its pivot is a corner block, so the
    /// generic rotation formula would move it.
    pub fn rotates(&self) -> bool {
        !matches!(self, PieceKind::O)
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "s" => Some(PieceKind::S),
            "i" => Some(PieceKind::I),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::S => "s",
            PieceKind::I => "i",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::O => "o",
        }
    }
}

/// Engine-level piece actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Down,
    Left,
    Right,
    Rotate,
}

/// Discrete player input events delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    PauseToggle,
}

impl InputEvent {
    /// Parse an input event from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputEvent::MoveLeft),
            "moveright" => Some(InputEvent::MoveRight),
            "rotate" => Some(InputEvent::Rotate),
            "softdrop" => Some(InputEvent::SoftDrop),
            "harddrop" => Some(InputEvent::HardDrop),
            "pause" | "pausetoggle" => Some(InputEvent::PauseToggle),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            InputEvent::MoveLeft => "moveLeft",
            InputEvent::MoveRight => "moveRight",
            InputEvent::Rotate => "rotate",
            InputEvent::SoftDrop => "softDrop",
            InputEvent::HardDrop => "hardDrop",
            InputEvent::PauseToggle => "pauseToggle",
        }
    }
}

/// Session lifecycle states owned by the core.
///
/// Menu, help and settings screens belong to the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Init,
    Running,
    Paused,
    NextLevel,
    LastLevel,
    Over,
    Report,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Init => "init",
            GameState::Running => "running",
            GameState::Paused => "paused",
            GameState::NextLevel => "nextLevel",
            GameState::LastLevel => "lastLevel",
            GameState::Over => "over",
            GameState::Report => "report",
        }
    }
}

/// Audio cues requested by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Place,
    SingleLine,
    MultiLine,
    SpeedUp,
    LevelUp,
    GameOver,
}

/// Logical timers the core asks the host to run.
///
/// At most one timer of each kind is outstanding; starting one replaces the
/// previous timer of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Gravity,
    Flash,
    GameOverClear,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [TimerKind::Gravity, TimerKind::Flash, TimerKind::GameOverClear];

    /// Dense index for table-backed timer services
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Playfield background
pub const COLOR_BACKGROUND: Rgb = Rgb::new(0, 0, 0);

/// Highlight used on even flash frames
pub const COLOR_FLASH: Rgb = Rgb::new(205, 179, 139);

/// Fill used by the game-over sweep
pub const COLOR_SWEEP: Rgb = Rgb::new(0, 0xcf, 0xff);
