//! TerminalHost: the session's collaborators for terminal play.
//!
//! Drawing goes to a [`GameView`], timers become monotonic deadlines polled by
//! the main loop, sound is the terminal bell and preferences live in a JSON
//! file.

use std::time::{Duration, Instant};

use anyhow::Result;
use log::debug;

use crate::core::{
    Audio, Hud, LevelComplete, Paint, Persistence, Piece, PieceSlot, Preferences, PrefsError,
    PrefsFile, Renderer, Report, TimerService,
};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;
use crate::types::{SoundEffect, TimerKind};

/// One-shot deadlines, one slot per timer kind
#[derive(Debug, Clone, Default)]
pub struct DeadlineTimers {
    slots: [Option<Instant>; TimerKind::ALL.len()],
}

impl DeadlineTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, kind: TimerKind, interval_ms: u32, now: Instant) {
        self.slots[kind.index()] = Some(now + Duration::from_millis(interval_ms as u64));
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.slots[kind.index()] = None;
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.iter().flatten().min().copied()
    }

    /// Remove and return the earliest timer due at `now`
    pub fn expire_due(&mut self, now: Instant) -> Option<TimerKind> {
        let kind = TimerKind::ALL
            .into_iter()
            .filter(|kind| matches!(self.slots[kind.index()], Some(at) if at <= now))
            .min_by_key(|kind| self.slots[kind.index()])?;
        self.slots[kind.index()] = None;
        Some(kind)
    }
}

pub struct TerminalHost {
    view: GameView,
    timers: DeadlineTimers,
    prefs: Option<PrefsFile>,
    bell_pending: bool,
}

impl TerminalHost {
    pub fn new(view: GameView, prefs: Option<PrefsFile>) -> Self {
        Self {
            view,
            timers: DeadlineTimers::new(),
            prefs,
            bell_pending: false,
        }
    }

    pub fn view(&self) -> &GameView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut GameView {
        &mut self.view
    }

    pub fn timers(&self) -> &DeadlineTimers {
        &self.timers
    }

    /// How long the main loop may block waiting for input
    pub fn poll_timeout(&self, now: Instant, idle: Duration) -> Duration {
        self.timers
            .next_deadline()
            .map(|at| at.saturating_duration_since(now))
            .unwrap_or(idle)
            .min(idle)
    }

    pub fn expire_due(&mut self, now: Instant) -> Option<TimerKind> {
        self.timers.expire_due(now)
    }

    /// Push pending sound and, if a frame was flushed, the picture to the terminal
    pub fn present(
        &mut self,
        term: &mut TerminalRenderer,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> Result<()> {
        if std::mem::take(&mut self.bell_pending) {
            term.bell()?;
        }
        if self.view.take_frame() {
            self.view.render_into(viewport, fb);
            term.draw_swap(fb)?;
        }
        Ok(())
    }
}

impl Renderer for TerminalHost {
    fn draw_cell(&mut self, col: i32, row: i32, paint: Paint) {
        self.view.draw_cell(col, row, paint);
    }

    fn draw_piece(&mut self, slot: PieceSlot, piece: &Piece, paint: Paint) {
        self.view.draw_piece(slot, piece, paint);
    }

    fn flush_frame(&mut self) {
        self.view.flush_frame();
    }

    fn draw_hud(&mut self, hud: Hud) {
        self.view.draw_hud(hud);
    }

    fn prompt_paused(&mut self) {
        self.view.prompt_paused();
    }

    fn show_level_complete(&mut self, info: &LevelComplete) {
        self.view.show_level_complete(info);
    }

    fn show_report(&mut self, report: &Report) {
        self.view.show_report(report);
    }
}

impl Audio for TerminalHost {
    fn play_effect(&mut self, effect: SoundEffect) {
        debug!("[Term] sound {:?}", effect);
        // Placing a piece is too frequent for the bell.
        if effect != SoundEffect::Place {
            self.bell_pending = true;
        }
    }
}

impl Persistence for TerminalHost {
    fn load_preferences(&mut self) -> Result<Preferences, PrefsError> {
        self.prefs.as_ref().ok_or(PrefsError::Unavailable)?.load()
    }

    fn save_preferences(&mut self, prefs: &Preferences) -> Result<(), PrefsError> {
        self.prefs.as_ref().ok_or(PrefsError::Unavailable)?.save(prefs)
    }
}

impl TimerService for TerminalHost {
    fn start_timer(&mut self, kind: TimerKind, interval_ms: u32) {
        self.timers.start(kind, interval_ms, Instant::now());
    }

    fn cancel_timer(&mut self, kind: TimerKind) {
        self.timers.cancel(kind);
    }
}
