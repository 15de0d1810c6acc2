//! Piece module - falling pieces and the action engine
//!
//! A [`Piece`] stores its four blocks in absolute pixel coordinates. Every
//! action runs on a copy of the piece; the copy replaces the live piece only
//! when all checks pass, so a rejected action leaves it untouched.
//!
//! Rotation is always the same handedness around the axis block:
//! `x' = xa + ya - y`, `y' = ya + x - xa`. Afterwards the rotated piece is
//! pushed back inside the left, right and top edges if it overshoots, each push
//! re-checked against the grid and the floor.

use log::debug;

use crate::catalog;
use crate::geometry::Geometry;
use crate::grid::Grid;
use crate::types::{Action, PieceKind};

/// One block of a piece, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Block {
    pub x: i32,
    pub y: i32,
}

/// A four-block piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Index of the block the others rotate around
    pub axis: usize,
    /// Set once the piece can no longer fall
    pub pinned: bool,
    pub blocks: [Block; 4],
}

impl Piece {
    /// Build a piece with its catalog offsets scaled from `origin`
    pub fn at(kind: PieceKind, origin: (i32, i32), cell_side: i32) -> Self {
        let def = catalog::shape(kind);
        let mut blocks = [Block::default(); 4];
        for (block, &(dx, dy)) in blocks.iter_mut().zip(def.offsets.iter()) {
            block.x = origin.0 + dx * cell_side;
            block.y = origin.1 + dy * cell_side;
        }
        Self {
            kind,
            axis: def.axis,
            pinned: false,
            blocks,
        }
    }

    /// A piece at the playfield launch position
    pub fn launch(kind: PieceKind, geometry: &Geometry) -> Self {
        Self::at(kind, geometry.launch(), geometry.cell_side())
    }

    /// A piece at the preview position
    pub fn preview(kind: PieceKind, geometry: &Geometry) -> Self {
        Self::at(kind, geometry.preview(), geometry.cell_side())
    }

    /// Grid cells covered by the blocks, as `(col, row)`
    pub fn cells(&self, geometry: &Geometry) -> [(i32, i32); 4] {
        self.blocks
            .map(|b| (geometry.col_of(b.x), geometry.row_of(b.y)))
    }

    /// Row of the lowest block
    pub fn bottom_row(&self, geometry: &Geometry) -> i32 {
        let y = self.blocks.iter().map(|b| b.y).max().unwrap_or(geometry.top());
        geometry.row_of(y)
    }

    /// First block sitting on an occupied or out-of-bounds cell
    pub fn first_blocked(&self, grid: &Grid, geometry: &Geometry) -> Option<Block> {
        self.blocks.iter().copied().find(|b| {
            grid.is_occupied_or_out_of_bounds(geometry.col_of(b.x), geometry.row_of(b.y))
        })
    }

    /// Try an action; commit it only if every check passes
    pub fn attempt(&mut self, action: Action, grid: &Grid, geometry: &Geometry) -> bool {
        let mut candidate = *self;
        if !candidate.apply(action, grid, geometry) {
            return false;
        }
        *self = candidate;
        true
    }

    /// Same checks as [`Piece::attempt`] without committing
    pub fn can_act(&self, action: Action, grid: &Grid, geometry: &Geometry) -> bool {
        let mut candidate = *self;
        candidate.apply(action, grid, geometry)
    }

    /// Fall until blocked, then pin. Returns the number of rows fallen.
    pub fn drop_hard(&mut self, grid: &Grid, geometry: &Geometry) -> u32 {
        let mut rows = 0;
        while self.attempt(Action::Down, grid, geometry) {
            rows += 1;
        }
        self.pinned = true;
        rows
    }

    /// Mutates `self` in place; callers run it on a scratch copy.
    fn apply(&mut self, action: Action, grid: &Grid, geometry: &Geometry) -> bool {
        let side = geometry.cell_side();
        match action {
            Action::Down => self.translate(0, side, |b| {
                grid.is_occupied_or_out_of_bounds(geometry.col_of(b.x), geometry.row_of(b.y))
                    || b.y + side > geometry.bottom()
            }),
            Action::Left => self.translate(-side, 0, |b| {
                grid.is_occupied_or_out_of_bounds(geometry.col_of(b.x), geometry.row_of(b.y))
                    || b.x < geometry.left()
            }),
            Action::Right => self.translate(side, 0, |b| {
                grid.is_occupied_or_out_of_bounds(geometry.col_of(b.x), geometry.row_of(b.y))
                    || b.x + side > geometry.right()
            }),
            Action::Rotate => self.rotate(grid, geometry),
        }
    }

    fn translate(&mut self, dx: i32, dy: i32, blocked: impl Fn(Block) -> bool) -> bool {
        for block in self.blocks.iter_mut() {
            let moved = Block {
                x: block.x + dx,
                y: block.y + dy,
            };
            if blocked(moved) {
                return false;
            }
            *block = moved;
        }
        true
    }

    fn rotate(&mut self, grid: &Grid, geometry: &Geometry) -> bool {
        if !self.kind.rotates() {
            return false;
        }

        let side = geometry.cell_side();
        // Rotation only sees in-bounds occupancy; the edge pushes below
        // bring the piece back inside.
        let blocked = |b: Block| {
            grid.is_occupied_in_bounds(geometry.col_of(b.x), geometry.row_of(b.y))
                || b.y + side > geometry.bottom()
        };

        let axis = self.blocks[self.axis];
        let (mut x_min, mut x_max, mut y_min) = (i32::MAX, i32::MIN, i32::MAX);
        for block in self.blocks.iter_mut() {
            let rotated = Block {
                x: axis.x + axis.y - block.y,
                y: axis.y + block.x - axis.x,
            };
            if blocked(rotated) {
                debug!(
                    "rotate: cell ({}, {}) is blocked",
                    geometry.col_of(rotated.x),
                    geometry.row_of(rotated.y)
                );
                return false;
            }
            *block = rotated;
            x_min = x_min.min(rotated.x);
            x_max = x_max.max(rotated.x);
            y_min = y_min.min(rotated.y);
        }

        if x_min < geometry.left() && !self.translate(geometry.left() - x_min, 0, blocked) {
            debug!("rotate: push right blocked");
            return false;
        }
        if x_max + side > geometry.right() {
            let overshoot = x_max + side - geometry.right();
            if !self.translate(-overshoot, 0, blocked) {
                debug!("rotate: push left blocked");
                return false;
            }
        }
        if y_min < geometry.top() && !self.translate(0, geometry.top() - y_min, blocked) {
            debug!("rotate: push down blocked");
            return false;
        }
        true
    }
}
