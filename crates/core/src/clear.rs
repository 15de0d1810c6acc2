//! Clear module - pinning pieces and removing full rows
//!
//! Full rows are removed one at a time: each full row is overwritten by
//! shifting everything above it down by one, then the same row index is
//! examined again since it now holds what used to be above. At most four rows
//! are inspected per placement, which covers every row a piece can touch.

use arrayvec::ArrayVec;

use crate::geometry::Geometry;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::MAX_REM_LINES;

/// Rows removed by one placement, in their pre-shift indices (bottom first)
pub type ClearedRows = ArrayVec<u16, MAX_REM_LINES>;

/// Write the piece's cells into the grid.
///
/// Returns the new topmost occupied row.
pub fn pin_piece(piece: &Piece, grid: &mut Grid, geometry: &Geometry, topmost: u16) -> u16 {
    let mut top = topmost as i32;
    for (col, row) in piece.cells(geometry) {
        if grid.set_cell(col, row, piece.kind) {
            top = top.min(row);
        }
    }
    top as u16
}

/// Remove full rows scanning upward from `start_row`.
///
/// `topmost` bounds the shift so empty rows above the stack are not copied.
pub fn delete_full_rows(grid: &mut Grid, start_row: i32, topmost: u16) -> ClearedRows {
    let mut cleared = ClearedRows::new();
    let mut row = start_row.min(grid.rows() as i32 - 1);

    for _ in 0..MAX_REM_LINES {
        if row < 0 {
            break;
        }
        if !grid.row_is_full(row) {
            row -= 1;
            continue;
        }
        // Each earlier removal moved this row down by one.
        let original = row - cleared.len() as i32;
        cleared.push(original as u16);
        grid.shift_rows_down(row, topmost as i32);
    }
    cleared
}

/// Topmost row after `cleared` rows were removed
pub fn settle_topmost(topmost: u16, cleared: usize, rows: u16) -> u16 {
    (topmost as usize + cleared).min(rows as usize - 1) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn fill_row(grid: &mut Grid, row: i32, gap: Option<i32>) {
        for col in 0..grid.cols() as i32 {
            if Some(col) != gap {
                grid.set_cell(col, row, PieceKind::Z);
            }
        }
    }

    #[test]
    fn test_pin_updates_topmost() {
        let mut grid = Grid::new(20).unwrap();
        let g = Geometry::cells(20).unwrap();
        let mut piece = Piece::launch(PieceKind::T, &g);
        piece.drop_hard(&grid, &g);
        let top = pin_piece(&piece, &mut grid, &g, 19);
        assert_eq!(top, 18);
        assert_eq!(grid.cell(6, 18), Some(Some(PieceKind::T)));
        assert_eq!(grid.cell(5, 19), Some(Some(PieceKind::T)));
    }

    #[test]
    fn test_single_row_shifts_stack() {
        let mut grid = Grid::new(20).unwrap();
        fill_row(&mut grid, 19, None);
        grid.set_cell(3, 18, PieceKind::J);

        let cleared = delete_full_rows(&mut grid, 19, 18);
        assert_eq!(cleared.as_slice(), &[19]);
        assert_eq!(grid.cell(3, 19), Some(Some(PieceKind::J)));
        assert_eq!(grid.row_mask(18), 0);
        assert_eq!(settle_topmost(18, cleared.len(), 20), 19);
    }

    #[test]
    fn test_non_contiguous_rows_report_original_indices() {
        let mut grid = Grid::new(20).unwrap();
        fill_row(&mut grid, 19, None);
        fill_row(&mut grid, 18, Some(0));
        fill_row(&mut grid, 17, None);

        let cleared = delete_full_rows(&mut grid, 19, 17);
        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert_eq!(grid.row_mask(19), 0x07ff);
        assert!(grid.row_mask(18) == 0 && grid.row_mask(17) == 0);
    }

    #[test]
    fn test_four_rows_at_once() {
        let mut grid = Grid::new(16).unwrap();
        for row in 12..16 {
            fill_row(&mut grid, row, None);
        }
        let cleared = delete_full_rows(&mut grid, 15, 12);
        assert_eq!(cleared.as_slice(), &[15, 14, 13, 12]);
        assert!(grid.is_empty());
    }
}
