//! Geometry module - playfield placement in screen pixels
//!
//! Pieces live in absolute pixel coordinates: a block at `(x, y)` covers the
//! cell `((x - origin_x) / side, (y - origin_y) / side)`. The host supplies
//! the geometry once and it stays fixed for the session.

use crate::error::GeometryError;
use crate::types::{GRID_COLS, MAX_GRID_ROWS, MIN_GRID_ROWS};

/// Pixel frame kept around the playfield border
const BORDER: i32 = 4;

/// Playfield placement and cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    cell_side: i32,
    origin_x: i32,
    origin_y: i32,
    rows: u16,
    cols: u16,
    launch: (i32, i32),
    preview: (i32, i32),
}

impl Geometry {
    /// Playfield at an explicit origin.
    ///
    /// The preview slot sits two cells to the right of the playfield.
    pub fn new(origin_x: i32, origin_y: i32, cell_side: i32, rows: u16) -> Result<Self, GeometryError> {
        Self::validate(cell_side, rows)?;
        let cols = GRID_COLS;
        let width = cell_side * cols as i32;
        let launch_x = origin_x + ((width - cell_side * (cols as i32 % 2)) >> 1);
        Ok(Self {
            cell_side,
            origin_x,
            origin_y,
            rows,
            cols,
            launch: (launch_x, origin_y),
            preview: (origin_x + width + 2 * cell_side, origin_y + cell_side),
        })
    }

    /// Cell-space playfield: side 1 at the origin
    pub fn cells(rows: u16) -> Result<Self, GeometryError> {
        Self::new(0, 0, 1, rows)
    }

    /// Derive the layout from a handset screen size.
    ///
    /// The playfield is 12 cells wide and the preview area takes roughly four
    /// more, so the side length starts at `(w - 4) / 16`; it shrinks when that
    /// leaves fewer than 16 rows. Row count is capped at 21.
    pub fn from_screen(width: u16, height: u16) -> Result<Self, GeometryError> {
        let (w, h) = (width as i32, height as i32);
        if w <= BORDER || h <= BORDER {
            return Err(GeometryError::ScreenTooSmall { width, height });
        }

        let cols = GRID_COLS as i32;
        let mut side = (w - BORDER) / (cols + 4);
        if side > 4 && (h - BORDER) / side < MIN_GRID_ROWS as i32 {
            side = ((h - BORDER) / MIN_GRID_ROWS as i32).max(4);
        }
        if side <= 0 {
            return Err(GeometryError::CellSide);
        }

        let rows = ((h - BORDER) / side).min(MAX_GRID_ROWS as i32);
        Self::validate(side, rows as u16)?;

        let margin_h = (w - BORDER - side * 17) / 3;
        let margin_v = (h - BORDER - rows * side) >> 1;
        let origin_x = margin_h + 2;
        let origin_y = margin_v + 2;

        let mut geometry = Self::new(origin_x, origin_y, side, rows as u16)?;
        geometry.preview = (origin_x + side * cols + margin_h + (side << 1), side);
        Ok(geometry)
    }

    fn validate(cell_side: i32, rows: u16) -> Result<(), GeometryError> {
        if cell_side <= 0 {
            return Err(GeometryError::CellSide);
        }
        if !(MIN_GRID_ROWS..=MAX_GRID_ROWS).contains(&rows) {
            return Err(GeometryError::RowCount {
                rows,
                min: MIN_GRID_ROWS,
                max: MAX_GRID_ROWS,
            });
        }
        Ok(())
    }

    pub fn cell_side(&self) -> i32 {
        self.cell_side
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Where a falling piece's launch origin sits
    pub fn launch(&self) -> (i32, i32) {
        self.launch
    }

    /// Where the preview piece is drawn
    pub fn preview(&self) -> (i32, i32) {
        self.preview
    }

    pub fn left(&self) -> i32 {
        self.origin_x
    }

    pub fn top(&self) -> i32 {
        self.origin_y
    }

    /// First pixel past the right edge
    pub fn right(&self) -> i32 {
        self.origin_x + self.cell_side * self.cols as i32
    }

    /// First pixel past the bottom edge
    pub fn bottom(&self) -> i32 {
        self.origin_y + self.cell_side * self.rows as i32
    }

    /// Column containing pixel x (may be out of range)
    pub fn col_of(&self, x: i32) -> i32 {
        (x - self.origin_x).div_euclid(self.cell_side)
    }

    /// Row containing pixel y (may be out of range)
    pub fn row_of(&self, y: i32) -> i32 {
        (y - self.origin_y).div_euclid(self.cell_side)
    }

    pub fn x_of(&self, col: i32) -> i32 {
        self.origin_x + col * self.cell_side
    }

    pub fn y_of(&self, row: i32) -> i32 {
        self.origin_y + row * self.cell_side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_space_launch_is_column_six() {
        let g = Geometry::cells(20).unwrap();
        assert_eq!(g.launch(), (6, 0));
        assert_eq!(g.right(), 12);
        assert_eq!(g.bottom(), 20);
    }

    #[test]
    fn test_row_count_is_validated() {
        assert_eq!(
            Geometry::cells(15),
            Err(GeometryError::RowCount { rows: 15, min: 16, max: 21 })
        );
        assert!(Geometry::cells(22).is_err());
        assert_eq!(Geometry::new(0, 0, 0, 20), Err(GeometryError::CellSide));
    }

    #[test]
    fn test_pixel_cell_mapping() {
        let g = Geometry::new(2, 5, 10, 21).unwrap();
        assert_eq!(g.col_of(2), 0);
        assert_eq!(g.col_of(11), 0);
        assert_eq!(g.col_of(12), 1);
        assert_eq!(g.col_of(-8), -1);
        assert_eq!(g.row_of(g.y_of(7)), 7);
        assert_eq!(g.x_of(g.col_of(62)), 62);
    }
}
