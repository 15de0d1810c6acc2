//! Session module - the game lifecycle
//!
//! A [`Session`] owns the grid, the falling and preview pieces, score and the
//! lifecycle state. It has no clock of its own: the host calls
//! [`Session::on_timer`] when a timer it was asked to start expires, and
//! [`Session::handle_input`] for key presses. Every effect (drawing, sound,
//! storage, new timers) goes back out through the [`Host`] passed in.
//!
//! States: `Init -> Running <-> Paused`, `Running -> NextLevel | LastLevel`
//! on a 500-point crossing, `Running -> Over` when a new piece cannot be
//! placed, and `Report` once the run is summarized.

use log::{debug, info, warn};

use crate::catalog;
use crate::clear::{self, ClearedRows};
use crate::error::SessionError;
use crate::geometry::Geometry;
use crate::grid::Grid;
use crate::host::{Host, Hud, LevelComplete, Paint, Persistence, PieceSlot, Report};
use crate::piece::{Block, Piece};
use crate::prefs::Preferences;
use crate::rng::SimpleRng;
use crate::scoring::{LevelOutcome, Progress};
use crate::types::{
    Action, GameState, InputEvent, PieceKind, SoundEffect, TimerKind, FLASH_TIME,
    MAX_FLASH_TIMES, MAX_LEVEL, OVER_TIME,
};

/// One game from start to report
#[derive(Debug, Clone)]
pub struct Session {
    geometry: Geometry,
    grid: Grid,
    rng: SimpleRng,
    falling: Piece,
    next: Piece,
    state: GameState,
    previous_state: GameState,
    prefs: Preferences,
    level: u8,
    progress: Progress,
    /// Highest occupied row; never below the real top of the stack
    topmost: u16,
    /// Rows still flashing after a clear
    cleared: ClearedRows,
    flash_counter: u8,
    /// Next row the game-over sweep paints is `sweep_row - 1`
    sweep_row: i32,
    new_record: bool,
    report: Option<Report>,
}

impl Session {
    /// Allocate a session and load preferences.
    ///
    /// Unreadable preferences fall back to defaults.
    pub fn new<P>(geometry: Geometry, seed: u32, store: &mut P) -> Result<Self, SessionError>
    where
        P: Persistence + ?Sized,
    {
        let grid = Grid::new(geometry.rows())?;
        let prefs = match store.load_preferences() {
            Ok(prefs) => prefs.normalized(),
            Err(err) => {
                warn!("[Session] preferences unavailable, using defaults: {}", err);
                Preferences::default()
            }
        };

        let mut rng = SimpleRng::new(seed);
        let next = Piece::preview(catalog::spawn_random(&mut rng), &geometry);
        let falling = Piece::launch(next.kind, &geometry);

        Ok(Self {
            geometry,
            topmost: grid.rows() - 1,
            grid,
            rng,
            falling,
            next,
            state: GameState::Init,
            previous_state: GameState::Init,
            level: prefs.level,
            progress: Progress::start(prefs.level),
            prefs,
            cleared: ClearedRows::new(),
            flash_counter: 0,
            sweep_row: 0,
            new_record: false,
            report: None,
        })
    }

    /// Session laid out for a handset screen of `width x height` pixels
    pub fn for_screen<P>(width: u16, height: u16, seed: u32, store: &mut P) -> Result<Self, SessionError>
    where
        P: Persistence + ?Sized,
    {
        let geometry = Geometry::from_screen(width, height)?;
        Self::new(geometry, seed, store)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn previous_state(&self) -> GameState {
        self.previous_state
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Points since the last 500-point crossing
    pub fn score(&self) -> u32 {
        self.progress.score
    }

    /// Banked points plus the running score
    pub fn total_score(&self) -> u32 {
        self.progress.total()
    }

    pub fn speed(&self) -> u32 {
        self.progress.speed
    }

    /// Current gravity interval in ms
    pub fn sleep_ms(&self) -> u32 {
        self.progress.sleep_ms
    }

    pub fn topmost_row(&self) -> u16 {
        self.topmost
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn falling(&self) -> &Piece {
        &self.falling
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Original indices of rows still flashing
    pub fn pending_rows(&self) -> &[u16] {
        &self.cleared
    }

    pub fn is_flashing(&self) -> bool {
        !self.cleared.is_empty()
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.progress.score,
            speed: self.progress.speed,
            level: self.level,
        }
    }

    /// Replace the settings and write them out. The start level applies to
    /// the next new game.
    pub fn set_preferences<P>(&mut self, prefs: Preferences, store: &mut P)
    where
        P: Persistence + ?Sized,
    {
        self.prefs = prefs.normalized();
        self.save_preferences(store);
    }

    /// Start over from any state: empty grid, zero score, fresh pieces
    pub fn start_new_game<H: Host + ?Sized>(&mut self, host: &mut H) {
        cancel_all(host);
        self.grid.reset();
        self.level = self.prefs.level;
        self.progress = Progress::start(self.level);
        self.topmost = self.grid.rows() - 1;
        self.cleared.clear();
        self.flash_counter = 0;
        self.sweep_row = 0;
        self.new_record = false;
        self.report = None;
        self.next = Piece::preview(self.random_kind(), &self.geometry);

        info!(
            "[Session] new game at level {} ({} ms gravity)",
            self.level, self.progress.sleep_ms
        );
        self.set_state(GameState::Running);
        self.redraw_field(host);
        host.draw_hud(self.hud());
        self.spawn(host);
    }

    /// A timer the session started has expired
    pub fn on_timer<H: Host + ?Sized>(&mut self, kind: TimerKind, host: &mut H) {
        match (kind, self.state) {
            (TimerKind::Gravity, GameState::Running) if self.accepts_moves() => {
                self.fall(false, host)
            }
            (TimerKind::Flash, GameState::Running) if self.is_flashing() => self.flash_frame(host),
            (TimerKind::GameOverClear, GameState::Over) => self.sweep_step(host),
            _ => debug!(
                "[Session] ignoring {:?} timer in {} state",
                kind,
                self.state.as_str()
            ),
        }
    }

    /// Apply a player input. Returns false when it was ignored or illegal.
    pub fn handle_input<H: Host + ?Sized>(&mut self, event: InputEvent, host: &mut H) -> bool {
        match event {
            InputEvent::PauseToggle => self.toggle_pause(host),
            _ if !self.accepts_moves() => false,
            InputEvent::MoveLeft => self.shift(Action::Left, host),
            InputEvent::MoveRight => self.shift(Action::Right, host),
            InputEvent::Rotate => self.shift(Action::Rotate, host),
            InputEvent::SoftDrop => {
                host.cancel_timer(TimerKind::Gravity);
                self.fall(false, host);
                true
            }
            InputEvent::HardDrop => {
                host.cancel_timer(TimerKind::Gravity);
                self.fall(true, host);
                true
            }
        }
    }

    /// Play on after a level was passed. Gravity keeps the pace it reached.
    pub fn continue_next_level<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.state != GameState::NextLevel {
            return false;
        }
        self.level = (self.level + 1).min(MAX_LEVEL);
        self.set_state(GameState::Running);
        self.redraw_field(host);
        host.draw_hud(self.hud());
        self.spawn(host);
        true
    }

    /// Leave the level screen and show the run report
    pub fn acknowledge<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        match self.state {
            GameState::NextLevel | GameState::LastLevel => {
                self.finish_run(host);
                true
            }
            _ => false,
        }
    }

    fn accepts_moves(&self) -> bool {
        self.state == GameState::Running && !self.falling.pinned && self.cleared.is_empty()
    }

    fn set_state(&mut self, state: GameState) {
        debug!(
            "[Session] {} -> {}",
            self.state.as_str(),
            state.as_str()
        );
        self.previous_state = self.state;
        self.state = state;
    }

    fn random_kind(&mut self) -> PieceKind {
        catalog::spawn_random(&mut self.rng)
    }

    fn play<H: Host + ?Sized>(&self, host: &mut H, effect: SoundEffect) {
        if self.prefs.sound_on {
            host.play_effect(effect);
        }
    }

    fn save_preferences<P: Persistence + ?Sized>(&self, store: &mut P) {
        if let Err(err) = store.save_preferences(&self.prefs) {
            warn!("[Session] could not save preferences: {}", err);
        }
    }

    fn start_gravity<H: Host + ?Sized>(&self, host: &mut H) {
        host.start_timer(TimerKind::Gravity, self.progress.sleep_ms);
    }

    /// Promote the preview to the falling piece
    fn spawn<H: Host + ?Sized>(&mut self, host: &mut H) {
        let kind = self.next.kind;
        self.falling = Piece::launch(kind, &self.geometry);
        if let Some(blocked) = self.falling.first_blocked(&self.grid, &self.geometry) {
            self.game_over(blocked, host);
            return;
        }

        host.draw_piece(PieceSlot::Falling, &self.falling, Paint::Block(kind));
        host.draw_piece(PieceSlot::Preview, &self.next, Paint::Background);
        self.next = Piece::preview(self.random_kind(), &self.geometry);
        host.draw_piece(PieceSlot::Preview, &self.next, Paint::Block(self.next.kind));
        host.flush_frame();

        // A running flash restarts gravity when it ends.
        if self.cleared.is_empty() {
            self.start_gravity(host);
        }
    }

    fn shift<H: Host + ?Sized>(&mut self, action: Action, host: &mut H) -> bool {
        let mut moved = self.falling;
        if !moved.attempt(action, &self.grid, &self.geometry) {
            return false;
        }
        host.draw_piece(PieceSlot::Falling, &self.falling, Paint::Background);
        self.falling = moved;
        host.draw_piece(PieceSlot::Falling, &self.falling, Paint::Block(moved.kind));
        host.flush_frame();
        true
    }

    /// One gravity step, or a full drop when `hard`
    fn fall<H: Host + ?Sized>(&mut self, hard: bool, host: &mut H) {
        let kind = self.falling.kind;
        host.draw_piece(PieceSlot::Falling, &self.falling, Paint::Background);
        if hard {
            self.falling.drop_hard(&self.grid, &self.geometry);
        } else if !self.falling.attempt(Action::Down, &self.grid, &self.geometry) {
            self.falling.pinned = true;
        }
        host.draw_piece(PieceSlot::Falling, &self.falling, Paint::Block(kind));

        // Resting on something after the move pins in the same tick.
        if !self.falling.pinned && self.falling.can_act(Action::Down, &self.grid, &self.geometry) {
            host.flush_frame();
            self.start_gravity(host);
            return;
        }
        self.falling.pinned = true;
        self.settle(host);
    }

    /// Pin the falling piece, clear rows, score, then spawn or change level
    fn settle<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.cancel_timer(TimerKind::Gravity);
        self.topmost = clear::pin_piece(&self.falling, &mut self.grid, &self.geometry, self.topmost);
        let bottom = self.falling.bottom_row(&self.geometry);
        self.cleared = clear::delete_full_rows(&mut self.grid, bottom, self.topmost);

        if self.cleared.is_empty() {
            self.play(host, SoundEffect::Place);
            self.spawn(host);
            return;
        }

        let rows = self.cleared.len();
        debug!("[Session] cleared rows {:?}", self.cleared.as_slice());
        self.topmost = clear::settle_topmost(self.topmost, rows, self.grid.rows());
        let effect = if rows == 1 {
            SoundEffect::SingleLine
        } else {
            SoundEffect::MultiLine
        };
        self.play(host, effect);
        self.flash_counter = 0;
        self.flash_frame(host);

        let outcome = self.progress.add_lines(rows);
        host.draw_hud(self.hud());
        match outcome {
            LevelOutcome::Continue => self.spawn(host),
            LevelOutcome::NextLevel => self.complete_level(false, host),
            LevelOutcome::LastLevel => self.complete_level(true, host),
        }
    }

    /// Highlight on even frames, background on odd ones, then a full refresh
    fn flash_frame<H: Host + ?Sized>(&mut self, host: &mut H) {
        let paint = if self.flash_counter % 2 == 0 {
            Paint::Flash
        } else {
            Paint::Background
        };
        for &row in self.cleared.iter() {
            for col in 0..self.grid.cols() as i32 {
                host.draw_cell(col, row as i32, paint);
            }
        }
        host.flush_frame();

        if self.flash_counter < MAX_FLASH_TIMES {
            self.flash_counter += 1;
            host.start_timer(TimerKind::Flash, FLASH_TIME);
        } else {
            self.finish_flash(host);
            self.start_gravity(host);
        }
    }

    fn finish_flash<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.flash_counter = 0;
        self.cleared.clear();
        self.redraw_field(host);
        host.draw_piece(PieceSlot::Falling, &self.falling, Paint::Block(self.falling.kind));
        host.flush_frame();
    }

    fn complete_level<H: Host + ?Sized>(&mut self, last: bool, host: &mut H) {
        cancel_all(host);
        self.cleared.clear();
        self.flash_counter = 0;
        self.play(host, SoundEffect::SpeedUp);
        self.play(host, SoundEffect::LevelUp);

        let total = if last {
            self.progress.total()
        } else {
            self.progress.banked
        };
        if self.prefs.record(self.level, total) {
            self.new_record = true;
            self.save_preferences(host);
        }

        info!(
            "[Session] level {} passed with {} points (speed {})",
            self.level, total, self.progress.speed
        );
        host.show_level_complete(&LevelComplete {
            level: self.level,
            total,
            last,
        });
        host.flush_frame();
        self.set_state(if last {
            GameState::LastLevel
        } else {
            GameState::NextLevel
        });
    }

    fn toggle_pause<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        match self.state {
            GameState::Running => {
                if self.is_flashing() {
                    self.finish_flash(host);
                }
                cancel_all(host);
                self.set_state(GameState::Paused);
                host.prompt_paused();
                host.flush_frame();
                true
            }
            GameState::Paused => {
                self.set_state(GameState::Running);
                self.redraw_screen(host);
                self.start_gravity(host);
                true
            }
            _ => false,
        }
    }

    /// The freshly launched piece overlaps the stack
    fn game_over<H: Host + ?Sized>(&mut self, blocked: Block, host: &mut H) {
        cancel_all(host);
        self.cleared.clear();
        self.flash_counter = 0;

        // Lift the piece so its blocked row sits above the stack; whatever
        // then falls above the playfield is dropped.
        let lift = blocked.y - self.geometry.top();
        if lift > 0 {
            for block in self.falling.blocks.iter_mut() {
                block.y -= lift;
            }
            let kind = self.falling.kind;
            for (col, row) in self.falling.cells(&self.geometry) {
                if row < 0 {
                    continue;
                }
                if self.grid.set_cell(col, row, kind) {
                    self.topmost = self.topmost.min(row as u16);
                }
                host.draw_cell(col, row, Paint::Block(kind));
            }
        }
        self.falling.pinned = true;
        host.flush_frame();

        self.play(host, SoundEffect::GameOver);
        info!("[Session] game over with {} points", self.progress.total());
        self.set_state(GameState::Over);
        self.sweep_row = self.grid.rows() as i32;
        host.start_timer(TimerKind::GameOverClear, OVER_TIME);
    }

    /// Fill one more row from the bottom, or finish once the top is reached
    fn sweep_step<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.sweep_row <= 0 {
            self.finish_run(host);
            return;
        }
        self.sweep_row -= 1;
        for col in 0..self.grid.cols() as i32 {
            host.draw_cell(col, self.sweep_row, Paint::Sweep);
        }
        host.flush_frame();
        host.start_timer(TimerKind::GameOverClear, OVER_TIME);
    }

    fn finish_run<H: Host + ?Sized>(&mut self, host: &mut H) {
        cancel_all(host);
        let total = self.progress.total();
        if self.prefs.record(self.level, total) {
            self.new_record = true;
            self.save_preferences(host);
        }
        let report = Report {
            level: self.level,
            total,
            best: self.prefs.best(self.level),
            new_record: self.new_record,
        };
        host.show_report(&report);
        host.flush_frame();
        self.report = Some(report);
        self.set_state(GameState::Report);
    }

    fn redraw_field<H: Host + ?Sized>(&self, host: &mut H) {
        for row in 0..self.grid.rows() as i32 {
            for col in 0..self.grid.cols() as i32 {
                let paint = match self.grid.cell(col, row) {
                    Some(Some(kind)) => Paint::Block(kind),
                    _ => Paint::Background,
                };
                host.draw_cell(col, row, paint);
            }
        }
    }

    fn redraw_screen<H: Host + ?Sized>(&self, host: &mut H) {
        self.redraw_field(host);
        host.draw_piece(PieceSlot::Falling, &self.falling, Paint::Block(self.falling.kind));
        host.draw_piece(PieceSlot::Preview, &self.next, Paint::Block(self.next.kind));
        host.draw_hud(self.hud());
        host.flush_frame();
    }
}

fn cancel_all<H: Host + ?Sized>(host: &mut H) {
    for kind in TimerKind::ALL {
        host.cancel_timer(kind);
    }
}
