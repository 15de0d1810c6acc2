//! GameView: the playfield canvas the session draws into.
//!
//! The session paints cells and pieces one at a time, the way a handset
//! draws straight onto its display. GameView keeps that picture as retained
//! state and composes it into a terminal framebuffer on demand.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Geometry, Hud, LevelComplete, Paint, Piece, PieceSlot, Renderer, Report};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Message drawn over the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Paused,
    LevelComplete(LevelComplete),
    Report(Report),
}

/// Retained picture of the playfield, preview and status panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    geometry: Geometry,
    field: Vec<Paint>,
    /// Preview blocks relative to the preview origin, in cells
    preview: Option<(PieceKind, [(i32, i32); 4])>,
    hud: Hud,
    overlay: Option<Overlay>,
    grid_lines: bool,
    frame_pending: bool,
}

impl GameView {
    pub fn new(geometry: Geometry) -> Self {
        let len = geometry.rows() as usize * geometry.cols() as usize;
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            geometry,
            field: vec![Paint::Background; len],
            preview: None,
            hud: Hud::default(),
            overlay: None,
            grid_lines: false,
            frame_pending: true,
        }
    }

    pub fn with_cell_size(mut self, cell_w: u16, cell_h: u16) -> Self {
        self.cell_w = cell_w.max(1);
        self.cell_h = cell_h.max(1);
        self
    }

    /// Draw empty cells as dots
    pub fn set_grid_lines(&mut self, on: bool) {
        if self.grid_lines != on {
            self.grid_lines = on;
            self.frame_pending = true;
        }
    }

    /// True once after every `flush_frame`
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.frame_pending)
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn hud(&self) -> Hud {
        self.hud
    }

    /// Paint last drawn at a playfield cell
    pub fn paint_at(&self, col: i32, row: i32) -> Option<Paint> {
        self.index(col, row).map(|i| self.field[i])
    }

    pub fn preview_kind(&self) -> Option<PieceKind> {
        self.preview.map(|(kind, _)| kind)
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        let (cols, rows) = (self.geometry.cols() as i32, self.geometry.rows() as i32);
        if col < 0 || row < 0 || col >= cols || row >= rows {
            return None;
        }
        Some(row as usize * cols as usize + col as usize)
    }

    /// Render the retained picture into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let cols = self.geometry.cols();
        let rows = self.geometry.rows();
        let board_px_w = cols * self.cell_w;
        let board_px_h = rows * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..rows {
            for col in 0..cols {
                let paint = self.field[row as usize * cols as usize + col as usize];
                let (ch, style) = self.cell_look(paint);
                let px = start_x + 1 + col * self.cell_w;
                let py = start_y + 1 + row * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        self.draw_side_panel(fb, viewport, start_x + frame_w + 2, start_y);

        if let Some(overlay) = self.overlay {
            self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, overlay);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(viewport, &mut fb);
        fb
    }

    fn cell_look(&self, paint: Paint) -> (char, CellStyle) {
        let field_bg = Rgb::new(30, 30, 40);
        match paint {
            Paint::Background if self.grid_lines => (
                '·',
                CellStyle {
                    fg: Rgb::new(90, 90, 100),
                    bg: field_bg,
                    bold: false,
                    dim: true,
                },
            ),
            Paint::Background => (
                ' ',
                CellStyle {
                    bg: field_bg,
                    ..CellStyle::default()
                },
            ),
            Paint::Flash => (
                '▓',
                CellStyle {
                    fg: paint.color(),
                    bg: field_bg,
                    bold: true,
                    dim: false,
                },
            ),
            Paint::Block(_) | Paint::Sweep => (
                '█',
                CellStyle {
                    fg: paint.color(),
                    bg: field_bg,
                    bold: true,
                    dim: false,
                },
            ),
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, viewport: Viewport, panel_x: u16, start_y: u16) {
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            bold: false,
            ..label
        };

        let mut y = start_y;
        for (name, number) in [
            ("SCORE", self.hud.score),
            ("SPEED", self.hud.speed),
            ("LEVEL", self.hud.level as u32),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some((kind, cells)) = self.preview {
            let style = CellStyle {
                fg: Paint::Block(kind).color(),
                ..value
            };
            // Catalog offsets reach one cell left of the origin.
            for (dx, dy) in cells {
                if dx < -1 || dy < 0 {
                    continue;
                }
                let px = panel_x.saturating_add(((dx + 1) as u16) * self.cell_w);
                let py = y.saturating_add((dy as u16) * self.cell_h);
                fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
            }
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        overlay: Overlay,
    ) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let mid_y = start_y.saturating_add(frame_h / 2).saturating_sub(2);
        let line = |fb: &mut FrameBuffer, dy: u16, text: &str, number: Option<u32>| {
            let width = text.chars().count() as u16 + if number.is_some() { 7 } else { 0 };
            let x = start_x.saturating_add(frame_w.saturating_sub(width) / 2);
            let text_w = fb.put_str(x, mid_y + dy, text, style);
            if let Some(n) = number {
                fb.put_u32(x + text_w + 1, mid_y + dy, n, style);
            }
        };

        match overlay {
            Overlay::Paused => {
                line(fb, 0, "PAUSED", None);
                line(fb, 2, "P to resume", None);
            }
            Overlay::LevelComplete(info) if info.last => {
                line(fb, 0, "ALL LEVELS PASSED", None);
                line(fb, 1, "SCORE", Some(info.total));
                line(fb, 3, "ESC for report", None);
            }
            Overlay::LevelComplete(info) => {
                line(fb, 0, "LEVEL PASSED", Some(info.level as u32));
                line(fb, 1, "SCORE", Some(info.total));
                line(fb, 3, "ENTER next level", None);
                line(fb, 4, "ESC for report", None);
            }
            Overlay::Report(report) => {
                line(fb, 0, "GAME REPORT", None);
                line(fb, 1, "SCORE", Some(report.total));
                line(fb, 2, "BEST", Some(report.best));
                if report.new_record {
                    line(fb, 3, "NEW RECORD", None);
                }
                line(fb, 5, "R new game", None);
            }
        }
    }
}

/// Columns reserved right of the playfield
const PANEL_W: u16 = 12;

impl Renderer for GameView {
    fn draw_cell(&mut self, col: i32, row: i32, paint: Paint) {
        if let Some(i) = self.index(col, row) {
            self.field[i] = paint;
        }
    }

    fn draw_piece(&mut self, slot: PieceSlot, piece: &Piece, paint: Paint) {
        match slot {
            PieceSlot::Falling => {
                for (col, row) in piece.cells(&self.geometry) {
                    self.draw_cell(col, row, paint);
                }
                // A live piece means play is on again.
                if paint != Paint::Background {
                    self.overlay = None;
                }
            }
            PieceSlot::Preview => {
                if paint == Paint::Background {
                    self.preview = None;
                    return;
                }
                let (px, py) = self.geometry.preview();
                let side = self.geometry.cell_side();
                let cells = piece
                    .blocks
                    .map(|b| ((b.x - px).div_euclid(side), (b.y - py).div_euclid(side)));
                self.preview = Some((piece.kind, cells));
            }
        }
    }

    fn flush_frame(&mut self) {
        self.frame_pending = true;
    }

    fn draw_hud(&mut self, hud: Hud) {
        self.hud = hud;
    }

    fn prompt_paused(&mut self) {
        self.overlay = Some(Overlay::Paused);
    }

    fn show_level_complete(&mut self, info: &LevelComplete) {
        self.overlay = Some(Overlay::LevelComplete(*info));
    }

    fn show_report(&mut self, report: &Report) {
        self.overlay = Some(Overlay::Report(*report));
    }
}
