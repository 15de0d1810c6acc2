//! Catalog module - the seven piece shapes and their colors
//!
//! Each shape is four `(dx, dy)` cell offsets from the launch origin plus the
//! index of its axis block, the block that stays put while the others rotate
//! around it. Tables are `const` and never mutated.

use crate::rng::SimpleRng;
use crate::types::{PieceKind, Rgb, MAX_BLOCK_KIND};

/// Offset of a single block relative to the launch origin, in cells
pub type BlockOffset = (i32, i32);

/// Static definition of one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub axis: usize,
    pub offsets: [BlockOffset; 4],
}

/// Shapes in catalog order (see [`PieceKind::ALL`])
pub const SHAPES: [ShapeDef; MAX_BLOCK_KIND] = [
    //   # #
    // # #
    ShapeDef {
        axis: 0,
        offsets: [(0, 0), (1, 0), (-1, 1), (0, 1)],
    },
    // # # # #
    ShapeDef {
        axis: 1,
        offsets: [(-1, 0), (0, 0), (1, 0), (2, 0)],
    },
    // # #
    //   # #
    ShapeDef {
        axis: 1,
        offsets: [(0, 0), (1, 0), (1, 1), (2, 1)],
    },
    // #
    // # # #
    ShapeDef {
        axis: 1,
        offsets: [(0, 0), (0, 1), (1, 1), (2, 1)],
    },
    //   #
    // # # #
    ShapeDef {
        axis: 2,
        offsets: [(0, 0), (-1, 1), (0, 1), (1, 1)],
    },
    //     #
    // # # #
    ShapeDef {
        axis: 3,
        offsets: [(1, 0), (-1, 1), (0, 1), (1, 1)],
    },
    // # #
    // # #
    ShapeDef {
        axis: 1,
        offsets: [(0, 0), (1, 0), (0, 1), (1, 1)],
    },
];

/// Block colors in catalog order
pub const COLOR_PALETTE: [Rgb; MAX_BLOCK_KIND] = [
    Rgb::new(0xff, 0x66, 0x40),
    Rgb::new(0xff, 0x1b, 0xf1),
    Rgb::new(0xff, 0x01, 0x58),
    Rgb::new(0xa8, 0xff, 0x02),
    Rgb::new(0x69, 0x00, 0xda),
    Rgb::new(0xf8, 0x7a, 0x00),
    Rgb::new(0x00, 0x16, 0xd9),
];

/// Get the shape definition for a piece kind
pub fn shape(kind: PieceKind) -> &'static ShapeDef {
    &SHAPES[kind.index()]
}

/// Get the block color for a piece kind
pub fn color(kind: PieceKind) -> Rgb {
    COLOR_PALETTE[kind.index()]
}

/// Pick one of the seven kinds uniformly
pub fn spawn_random(rng: &mut SimpleRng) -> PieceKind {
    let index = rng.next_range(MAX_BLOCK_KIND as u32) as usize;
    PieceKind::ALL[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_distinct_blocks() {
        for def in SHAPES.iter() {
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(def.offsets[i], def.offsets[j]);
                }
            }
            assert!(def.axis < 4);
        }
    }

    #[test]
    fn test_spawn_random_covers_all_kinds() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; MAX_BLOCK_KIND];
        for _ in 0..500 {
            seen[spawn_random(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
