//! Geometry tests - layouts derived from handset screen sizes

use handset_tetris::core::{Geometry, GeometryError, Grid, HeadlessHost, Piece, Session};
use handset_tetris::types::{Action, PieceKind};

#[test]
fn test_176x220_layout() {
    let g = Geometry::from_screen(176, 220).unwrap();
    assert_eq!(g.cell_side(), 10);
    assert_eq!(g.rows(), 21);
    assert_eq!(g.cols(), 12);
    assert_eq!(g.origin(), (2, 5));
    assert_eq!(g.launch(), (62, 5));
    assert_eq!(g.right(), 122);
    assert_eq!(g.bottom(), 215);
}

#[test]
fn test_128x160_layout() {
    let g = Geometry::from_screen(128, 160).unwrap();
    assert_eq!(g.cell_side(), 7);
    assert_eq!(g.rows(), 21);
    assert_eq!(g.origin(), (3, 6));
    assert_eq!(g.col_of(g.launch().0), 6);
}

#[test]
fn test_240x320_layout() {
    let g = Geometry::from_screen(240, 320).unwrap();
    assert_eq!(g.cell_side(), 14);
    assert_eq!(g.rows(), 21);
    assert_eq!(g.origin(), (2, 13));
    assert!(g.bottom() <= 320);
}

#[test]
fn test_landscape_screen_shrinks_cells() {
    let g = Geometry::from_screen(320, 240).unwrap();
    assert_eq!(g.cell_side(), 14);
    assert_eq!(g.rows(), 16);
    assert_eq!(g.origin(), (28, 8));
}

#[test]
fn test_preview_is_right_of_playfield() {
    for (w, h) in [(128, 160), (176, 220), (240, 320)] {
        let g = Geometry::from_screen(w, h).unwrap();
        let preview = Piece::preview(PieceKind::I, &g);
        assert!(preview.blocks.iter().all(|b| b.x >= g.right()), "{}x{}", w, h);
        assert!(g.col_of(g.preview().0) >= g.cols() as i32);
    }
}

#[test]
fn test_rejected_screens() {
    assert_eq!(
        Geometry::from_screen(4, 100),
        Err(GeometryError::ScreenTooSmall { width: 4, height: 100 })
    );
    assert_eq!(Geometry::from_screen(10, 10), Err(GeometryError::CellSide));
    assert_eq!(
        Geometry::from_screen(100, 30),
        Err(GeometryError::RowCount { rows: 6, min: 16, max: 21 })
    );

    let mut host = HeadlessHost::new();
    assert!(Session::for_screen(100, 30, 1, &mut host).is_err());
}

#[test]
fn test_handset_field_plays_the_same() {
    let g = Geometry::from_screen(176, 220).unwrap();
    let grid = Grid::new(g.rows()).unwrap();
    let mut piece = Piece::launch(PieceKind::I, &g);
    let mut downs = 0;
    while piece.attempt(Action::Down, &grid, &g) {
        downs += 1;
    }
    assert_eq!(downs, 20);
    assert_eq!(piece.bottom_row(&g), 20);
}
