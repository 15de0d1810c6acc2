//! Host seams - what the session reports to, and asks of, its environment
//!
//! The session never draws, plays sound, touches storage or owns a clock. It
//! calls into these traits instead, always from inside `on_timer` or
//! `handle_input`, so a host only needs `&mut` access.
//!
//! [`HeadlessHost`] implements all of them in memory. It backs the tests and
//! benches and can drive a session without a screen.

use crate::catalog;
use crate::error::PrefsError;
use crate::piece::Piece;
use crate::prefs::Preferences;
use crate::types::{
    PieceKind, Rgb, SoundEffect, TimerKind, COLOR_BACKGROUND, COLOR_FLASH, COLOR_SWEEP,
};

/// How a cell or piece should be painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Background,
    Block(PieceKind),
    /// Highlight of a row being cleared
    Flash,
    /// Game-over fill
    Sweep,
}

impl Paint {
    pub fn color(self) -> Rgb {
        match self {
            Paint::Background => COLOR_BACKGROUND,
            Paint::Block(kind) => catalog::color(kind),
            Paint::Flash => COLOR_FLASH,
            Paint::Sweep => COLOR_SWEEP,
        }
    }
}

/// Where a piece is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceSlot {
    Falling,
    Preview,
}

/// Status line contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub score: u32,
    pub speed: u32,
    pub level: u8,
}

/// Shown when a level is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelComplete {
    pub level: u8,
    pub total: u32,
    /// No further level follows
    pub last: bool,
}

/// End-of-run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub level: u8,
    pub total: u32,
    pub best: u32,
    pub new_record: bool,
}

pub trait Renderer {
    /// Paint one playfield cell
    fn draw_cell(&mut self, col: i32, row: i32, paint: Paint);

    /// Paint the four blocks of a piece. `Paint::Background` erases it.
    fn draw_piece(&mut self, slot: PieceSlot, piece: &Piece, paint: Paint);

    /// Present everything drawn since the last flush
    fn flush_frame(&mut self);

    fn draw_hud(&mut self, _hud: Hud) {}

    fn prompt_paused(&mut self) {}

    fn show_level_complete(&mut self, _info: &LevelComplete) {}

    fn show_report(&mut self, _report: &Report) {}
}

pub trait Audio {
    fn play_effect(&mut self, effect: SoundEffect);
}

pub trait Persistence {
    fn load_preferences(&mut self) -> Result<Preferences, PrefsError>;

    fn save_preferences(&mut self, prefs: &Preferences) -> Result<(), PrefsError>;
}

/// One-shot timers keyed by kind.
///
/// Starting a kind that is already pending replaces it. When a timer expires
/// the host calls `Session::on_timer` with its kind.
pub trait TimerService {
    fn start_timer(&mut self, kind: TimerKind, interval_ms: u32);

    fn cancel_timer(&mut self, kind: TimerKind);
}

/// Everything a session needs from its environment
pub trait Host: Renderer + Audio + Persistence + TimerService {}

impl<T: Renderer + Audio + Persistence + TimerService> Host for T {}

/// In-memory host that records what the session asked for
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    /// Stored preferences; `None` makes loading fail
    pub stored: Option<Preferences>,
    /// Make every save fail
    pub read_only: bool,
    pub saves: usize,
    pub sounds: Vec<SoundEffect>,
    pub frames: usize,
    pub cell_draws: usize,
    pub last_cell: Option<(i32, i32, Paint)>,
    pub hud: Hud,
    pub pause_prompts: usize,
    pub levels: Vec<LevelComplete>,
    pub reports: Vec<Report>,
    timers: [Option<u32>; TimerKind::ALL.len()],
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(prefs: Preferences) -> Self {
        Self {
            stored: Some(prefs),
            ..Self::default()
        }
    }

    /// Interval of a pending timer
    pub fn timer(&self, kind: TimerKind) -> Option<u32> {
        self.timers[kind.index()]
    }

    /// Remove a pending timer, as if it just expired
    pub fn expire(&mut self, kind: TimerKind) -> Option<u32> {
        self.timers[kind.index()].take()
    }

    pub fn pending_timers(&self) -> impl Iterator<Item = TimerKind> + '_ {
        TimerKind::ALL
            .into_iter()
            .filter(|kind| self.timers[kind.index()].is_some())
    }
}

impl Renderer for HeadlessHost {
    fn draw_cell(&mut self, col: i32, row: i32, paint: Paint) {
        self.cell_draws += 1;
        self.last_cell = Some((col, row, paint));
    }

    fn draw_piece(&mut self, _slot: PieceSlot, _piece: &Piece, _paint: Paint) {}

    fn flush_frame(&mut self) {
        self.frames += 1;
    }

    fn draw_hud(&mut self, hud: Hud) {
        self.hud = hud;
    }

    fn prompt_paused(&mut self) {
        self.pause_prompts += 1;
    }

    fn show_level_complete(&mut self, info: &LevelComplete) {
        self.levels.push(*info);
    }

    fn show_report(&mut self, report: &Report) {
        self.reports.push(*report);
    }
}

impl Audio for HeadlessHost {
    fn play_effect(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }
}

impl Persistence for HeadlessHost {
    fn load_preferences(&mut self) -> Result<Preferences, PrefsError> {
        self.stored.ok_or(PrefsError::Unavailable)
    }

    fn save_preferences(&mut self, prefs: &Preferences) -> Result<(), PrefsError> {
        if self.read_only {
            return Err(PrefsError::Unavailable);
        }
        self.stored = Some(*prefs);
        self.saves += 1;
        Ok(())
    }
}

impl TimerService for HeadlessHost {
    fn start_timer(&mut self, kind: TimerKind, interval_ms: u32) {
        self.timers[kind.index()] = Some(interval_ms);
    }

    fn cancel_timer(&mut self, kind: TimerKind) {
        self.timers[kind.index()] = None;
    }
}
