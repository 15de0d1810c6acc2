//! Grid module - packed occupancy store for the playfield
//!
//! The grid is `rows x 12` cells stored in a flat row-major buffer, plus one
//! bitmask per row caching which columns are occupied. A row is full when its
//! mask equals [`Grid::full_row_mask`], which makes full-row detection O(1).
//!
//! Coordinates: `(col, row)` where col ranges 0..12 (left to right) and row
//! ranges 0..rows (top to bottom). Column `c` maps to mask bit
//! `1 << (cols - 1 - c)`.

use crate::error::GridError;
use crate::types::{PieceKind, GRID_COLS};

/// A single cell: `None` when free, the kind of the piece that filled it otherwise
pub type Cell = Option<PieceKind>;

/// Occupancy grid with per-row masks
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: u16,
    cols: u16,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
    row_masks: Vec<u16>,
    full_mask: u16,
}

impl Grid {
    /// Allocate an empty grid with `rows` rows and the fixed column count.
    ///
    /// Buffers are reserved fallibly so an exhausted allocator is reported
    /// instead of aborting.
    pub fn new(rows: u16) -> Result<Self, GridError> {
        let cols = GRID_COLS;
        let len = rows as usize * cols as usize;
        let alloc_err = || GridError::Allocation { rows, cols };

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| alloc_err())?;
        cells.resize(len, None);

        let mut row_masks = Vec::new();
        row_masks.try_reserve_exact(rows as usize).map_err(|_| alloc_err())?;
        row_masks.resize(rows as usize, 0);

        Ok(Self {
            rows,
            cols,
            cells,
            row_masks,
            full_mask: ((1u32 << cols) - 1) as u16,
        })
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if self.is_out_of_bounds(col, row) {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    #[inline(always)]
    fn bit(&self, col: i32) -> u16 {
        1 << (self.cols as i32 - 1 - col)
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Mask value of a completely filled row
    pub fn full_row_mask(&self) -> u16 {
        self.full_mask
    }

    /// Check if position is outside the playfield
    pub fn is_out_of_bounds(&self, col: i32, row: i32) -> bool {
        row < 0 || row >= self.rows as i32 || col < 0 || col >= self.cols as i32
    }

    /// Get cell at (col, row); `None` if out of bounds
    pub fn cell(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Blocked for movement: out of bounds counts as occupied
    pub fn is_occupied_or_out_of_bounds(&self, col: i32, row: i32) -> bool {
        match self.index(col, row) {
            Some(idx) => self.cells[idx].is_some(),
            None => true,
        }
    }

    /// Occupied inside the playfield; out of bounds counts as free.
    ///
    /// Rotation relies on this and corrects bounds itself afterwards.
    pub fn is_occupied_in_bounds(&self, col: i32, row: i32) -> bool {
        match self.index(col, row) {
            Some(idx) => self.cells[idx].is_some(),
            None => false,
        }
    }

    /// Mark a cell occupied by `kind`. Out of bounds writes are ignored.
    pub fn set_cell(&mut self, col: i32, row: i32, kind: PieceKind) -> bool {
        let Some(idx) = self.index(col, row) else {
            return false;
        };
        self.cells[idx] = Some(kind);
        self.row_masks[row as usize] |= self.bit(col);
        true
    }

    /// Free a cell. Out of bounds writes are ignored.
    pub fn clear_cell(&mut self, col: i32, row: i32) -> bool {
        let Some(idx) = self.index(col, row) else {
            return false;
        };
        self.cells[idx] = None;
        self.row_masks[row as usize] &= !self.bit(col);
        true
    }

    /// Cached occupancy mask of a row (0 when out of range)
    pub fn row_mask(&self, row: i32) -> u16 {
        if row < 0 || row >= self.rows as i32 {
            return 0;
        }
        self.row_masks[row as usize]
    }

    pub fn row_is_full(&self, row: i32) -> bool {
        row >= 0 && row < self.rows as i32 && self.row_masks[row as usize] == self.full_mask
    }

    /// Copy every row in `to_row..=from_row` from the row above it, bottom-up.
    ///
    /// Row 0 has nothing above it and becomes empty when it is part of the
    /// range. Uses `copy_within`, so no allocation happens.
    pub fn shift_rows_down(&mut self, from_row: i32, to_row: i32) {
        let from_row = from_row.min(self.rows as i32 - 1);
        let to_row = to_row.max(0);
        if from_row < to_row {
            return;
        }

        let width = self.cols as usize;
        for row in (to_row..=from_row).rev() {
            let row = row as usize;
            let dst = row * width;
            if row == 0 {
                self.cells[..width].fill(None);
                self.row_masks[0] = 0;
            } else {
                let src = (row - 1) * width;
                self.cells.copy_within(src..src + width, dst);
                self.row_masks[row] = self.row_masks[row - 1];
            }
        }
    }

    /// Clear the entire grid
    pub fn reset(&mut self) {
        self.cells.fill(None);
        self.row_masks.fill(0);
    }

    /// True when no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.row_masks.iter().all(|&m| m == 0)
    }

    /// Read-only view of the flat cell buffer
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mask recomputed from the cells, for consistency checks
    pub fn computed_row_mask(&self, row: i32) -> u16 {
        (0..self.cols as i32)
            .filter(|&col| matches!(self.cell(col, row), Some(Some(_))))
            .fold(0, |mask, col| mask | self.bit(col))
    }
}
