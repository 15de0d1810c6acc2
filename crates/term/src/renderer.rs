//! TerminalRenderer: writes framebuffers to the real terminal.
//!
//! Output is encoded into a byte buffer with crossterm commands and written
//! in one go. The first frame, and the first after a size change or
//! [`TerminalRenderer::invalidate`], repaints everything; later frames only
//! rewrite the runs of cells that differ from the previous frame.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer};

const BELL: u8 = 0x07;

pub struct TerminalRenderer {
    out: io::Stdout,
    /// Frame currently on screen
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode plus the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.write_out()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand back the previous frame in its place so the caller
    /// can draw the next one into it.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let mut previous = self.shown.take();
        let reusable = previous
            .as_ref()
            .is_some_and(|prev| (prev.width(), prev.height()) == (fb.width(), fb.height()));

        self.bytes.clear();
        if reusable {
            if let Some(prev) = previous.as_ref() {
                encode_diff_into(prev, fb, &mut self.bytes)?;
            }
        } else {
            encode_full_into(fb, &mut self.bytes)?;
        }
        self.write_out()?;

        let mut shown = previous.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        shown.resize(fb.width(), fb.height());
        std::mem::swap(&mut shown, fb);
        self.shown = Some(shown);
        Ok(())
    }

    pub fn bell(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes.push(BELL);
        self.write_out()
    }

    fn write_out(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Clear the screen and encode every cell of `fb`
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..fb.height() {
        write_run(out, &mut style, 0, y, fb.row(y))?;
    }
    finish(out)
}

/// Encode only the runs of `next` that differ from `prev`.
///
/// Both buffers must have the same size; rows beyond the smaller one are
/// skipped.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for y in 0..next.height().min(prev.height()) {
        let row = next.row(y);
        for (start, end) in changed_runs(prev.row(y), row) {
            write_run(out, &mut style, start as u16, y, &row[start..end])?;
        }
    }
    finish(out)
}

/// Half-open index ranges where two rows differ
fn changed_runs<'a>(old: &'a [Cell], new: &'a [Cell]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let len = old.len().min(new.len());
    let differs = move |i: usize| old[i] != new[i];
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < len && !differs(x) {
            x += 1;
        }
        if x >= len {
            return None;
        }
        let start = x;
        while x < len && differs(x) {
            x += 1;
        }
        Some((start, x))
    })
}

fn write_run(
    out: &mut Vec<u8>,
    current: &mut Option<CellStyle>,
    x: u16,
    y: u16,
    cells: &[Cell],
) -> Result<()> {
    out.queue(cursor::MoveTo(x, y))?;
    for cell in cells {
        if *current != Some(cell.style) {
            queue_style(out, cell.style)?;
            *current = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    let rgb = |c: crate::fb::Rgb| Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    };
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetForegroundColor(rgb(style.fg)))?
        .queue(SetBackgroundColor(rgb(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(text: &str) -> Vec<Cell> {
        text.chars().map(|ch| CellStyle::PLAIN.into_cell(ch)).collect()
    }

    #[test]
    fn test_changed_runs_coalesce() {
        let old = row_of("abcdefg");
        let new = row_of("aXYdeZg");
        let runs: Vec<_> = changed_runs(&old, &new).collect();
        assert_eq!(runs, vec![(1, 3), (5, 6)]);
    }

    #[test]
    fn test_identical_frames_encode_no_cells() {
        let mut fb = FrameBuffer::new(6, 2);
        fb.put_str(0, 0, "SCORE", CellStyle::PLAIN);
        let mut out = Vec::new();
        encode_diff_into(&fb.clone(), &fb, &mut out).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains("SCORE"));
    }

    #[test]
    fn test_full_frame_contains_text() {
        let mut fb = FrameBuffer::new(8, 1);
        fb.put_str(1, 0, "LEVEL", CellStyle::PLAIN);
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("LEVEL"));
    }
}
