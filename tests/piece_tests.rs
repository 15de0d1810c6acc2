//! Piece tests - movement, rotation pushes and drops

use handset_tetris::core::{Geometry, Grid, Piece};
use handset_tetris::types::{Action, PieceKind};
use proptest::prelude::*;

fn field() -> (Grid, Geometry) {
    (Grid::new(20).unwrap(), Geometry::cells(20).unwrap())
}

fn sorted_cells(piece: &Piece, g: &Geometry) -> Vec<(i32, i32)> {
    let mut cells = piece.cells(g).to_vec();
    cells.sort();
    cells
}

/// I piece turned upright at column 6, rows 2..=5
fn upright_bar(grid: &Grid, g: &Geometry) -> Piece {
    let mut piece = Piece::launch(PieceKind::I, g);
    for _ in 0..3 {
        assert!(piece.attempt(Action::Down, grid, g));
    }
    assert!(piece.attempt(Action::Rotate, grid, g));
    piece
}

#[test]
fn test_every_kind_launches_inside() {
    let (grid, g) = field();
    for kind in PieceKind::ALL {
        let piece = Piece::launch(kind, &g);
        assert_eq!(piece.first_blocked(&grid, &g), None, "{:?} launched blocked", kind);
        let mut cells = sorted_cells(&piece, &g);
        cells.dedup();
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|&(_, row)| row <= 1));
    }
}

#[test]
fn test_falls_nineteen_rows_to_floor() {
    let (grid, g) = field();
    let mut piece = Piece::launch(PieceKind::I, &g);
    for step in 0..19 {
        assert!(piece.attempt(Action::Down, &grid, &g), "down {} failed", step);
    }
    assert!(!piece.attempt(Action::Down, &grid, &g));
    assert_eq!(piece.bottom_row(&g), 19);
    assert!(!piece.pinned);
}

#[test]
fn test_hard_drop_lands_on_stack() {
    let (mut grid, g) = field();
    grid.set_cell(6, 19, PieceKind::O);
    let mut piece = Piece::launch(PieceKind::T, &g);

    assert_eq!(piece.drop_hard(&grid, &g), 17);
    assert!(piece.pinned);
    assert_eq!(sorted_cells(&piece, &g), vec![(5, 18), (6, 17), (6, 18), (7, 18)]);
}

#[test]
fn test_square_never_rotates() {
    let (grid, g) = field();
    let mut piece = Piece::launch(PieceKind::O, &g);
    piece.attempt(Action::Down, &grid, &g);
    let before = piece;
    assert!(!piece.attempt(Action::Rotate, &grid, &g));
    assert_eq!(piece, before);
}

#[test]
fn test_blocked_rotation_leaves_piece_untouched() {
    let (mut grid, g) = field();
    let mut piece = Piece::launch(PieceKind::I, &g);
    for _ in 0..3 {
        piece.attempt(Action::Down, &grid, &g);
    }
    grid.set_cell(6, 5, PieceKind::S);

    let before = piece;
    assert!(!piece.can_act(Action::Rotate, &grid, &g));
    assert!(!piece.attempt(Action::Rotate, &grid, &g));
    assert_eq!(piece, before);
}

#[test]
fn test_rotation_at_left_wall_pushes_right() {
    let (grid, g) = field();
    let mut piece = upright_bar(&grid, &g);
    while piece.attempt(Action::Left, &grid, &g) {}
    assert!(piece.cells(&g).iter().all(|&(col, _)| col == 0));

    assert!(piece.attempt(Action::Rotate, &grid, &g));
    assert_eq!(sorted_cells(&piece, &g), vec![(0, 3), (1, 3), (2, 3), (3, 3)]);
}

#[test]
fn test_rotation_at_right_wall_pushes_left() {
    let (grid, g) = field();
    let mut piece = upright_bar(&grid, &g);
    while piece.attempt(Action::Right, &grid, &g) {}
    assert!(piece.cells(&g).iter().all(|&(col, _)| col == 11));

    assert!(piece.attempt(Action::Rotate, &grid, &g));
    assert_eq!(sorted_cells(&piece, &g), vec![(8, 3), (9, 3), (10, 3), (11, 3)]);
}

#[test]
fn test_failed_wall_push_leaves_piece_untouched() {
    let (mut grid, g) = field();
    let mut piece = upright_bar(&grid, &g);
    while piece.attempt(Action::Left, &grid, &g) {}
    // Free for the raw turn, taken once the bar is pushed back inside.
    grid.set_cell(3, 3, PieceKind::Z);

    let before = piece;
    assert!(!piece.can_act(Action::Rotate, &grid, &g));
    assert!(!piece.attempt(Action::Rotate, &grid, &g));
    assert_eq!(piece, before);

    let mut right = upright_bar(&grid, &g);
    while right.attempt(Action::Right, &grid, &g) {}
    grid.set_cell(8, 3, PieceKind::Z);
    let before = right;
    assert!(!right.attempt(Action::Rotate, &grid, &g));
    assert_eq!(right, before);
}

#[test]
fn test_rotation_at_top_pushes_down() {
    let (grid, g) = field();
    let mut piece = Piece::launch(PieceKind::I, &g);
    assert!(piece.attempt(Action::Rotate, &grid, &g));
    assert_eq!(sorted_cells(&piece, &g), vec![(6, 0), (6, 1), (6, 2), (6, 3)]);
}

#[test]
fn test_scaled_field_moves_by_cell_side() {
    let g = Geometry::new(2, 5, 10, 21).unwrap();
    let grid = Grid::new(21).unwrap();
    let mut piece = Piece::launch(PieceKind::L, &g);
    let x0 = piece.blocks[0].x;
    assert!(piece.attempt(Action::Left, &grid, &g));
    assert_eq!(piece.blocks[0].x, x0 - 10);
    assert_eq!(piece.drop_hard(&grid, &g), 19);
    assert_eq!(piece.bottom_row(&g), 20);
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Down),
        Just(Action::Left),
        Just(Action::Right),
        Just(Action::Rotate),
    ]
}

proptest! {
    #[test]
    fn piece_never_overlaps_or_leaves_field(
        kind in 0usize..7,
        stack in prop::collection::vec((0i32..12, 8i32..20), 0..40),
        actions in prop::collection::vec(action(), 1..120),
    ) {
        let (mut grid, g) = field();
        for (col, row) in stack {
            grid.set_cell(col, row, PieceKind::Z);
        }
        let mut piece = Piece::launch(PieceKind::ALL[kind], &g);

        for act in actions {
            let before = piece;
            if !piece.attempt(act, &grid, &g) {
                prop_assert_eq!(piece, before);
            }
            prop_assert_eq!(piece.first_blocked(&grid, &g), None);
        }
    }
}
