use criterion::{black_box, criterion_group, criterion_main, Criterion};
use handset_tetris::core::clear::delete_full_rows;
use handset_tetris::core::{Geometry, Grid, HeadlessHost, Piece, Session};
use handset_tetris::types::{Action, InputEvent, PieceKind, TimerKind};

fn started_session() -> (Session, HeadlessHost) {
    let mut host = HeadlessHost::new();
    let geometry = Geometry::from_screen(176, 220).unwrap();
    let mut session = Session::new(geometry, 12345, &mut host).unwrap();
    session.start_new_game(&mut host);
    (session, host)
}

fn bench_gravity_tick(c: &mut Criterion) {
    let (mut session, mut host) = started_session();

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            if host.expire(TimerKind::Gravity).is_none() {
                session.start_new_game(&mut host);
                return;
            }
            session.on_timer(black_box(TimerKind::Gravity), &mut host);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new(20).unwrap();
            // Fill bottom 4 rows
            for row in 16..20 {
                for col in 0..12 {
                    grid.set_cell(col, row, PieceKind::I);
                }
            }
            delete_full_rows(&mut grid, black_box(19), 16)
        })
    });
}

fn bench_attempt_move(c: &mut Criterion) {
    let grid = Grid::new(20).unwrap();
    let geometry = Geometry::cells(20).unwrap();
    let piece = Piece::launch(PieceKind::T, &geometry);

    c.bench_function("attempt_move", |b| {
        b.iter(|| {
            let mut p = piece;
            p.attempt(black_box(Action::Right), &grid, &geometry)
        })
    });
}

fn bench_attempt_rotate(c: &mut Criterion) {
    let grid = Grid::new(20).unwrap();
    let geometry = Geometry::cells(20).unwrap();
    let mut piece = Piece::launch(PieceKind::L, &geometry);
    piece.attempt(Action::Down, &grid, &geometry);

    c.bench_function("attempt_rotate", |b| {
        b.iter(|| {
            let mut p = piece;
            p.attempt(black_box(Action::Rotate), &grid, &geometry)
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let (mut session, mut host) = started_session();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if !session.handle_input(black_box(InputEvent::HardDrop), &mut host) {
                session.start_new_game(&mut host);
            }
        })
    });
}

criterion_group!(
    benches,
    bench_gravity_tick,
    bench_line_clear,
    bench_attempt_move,
    bench_attempt_rotate,
    bench_hard_drop
);
criterion_main!(benches);
