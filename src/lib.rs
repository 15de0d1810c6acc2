//! Handset Tetris (workspace facade crate).
//!
//! Re-exports the member crates as `handset_tetris::{core,input,term,types}`;
//! the implementation lives under `crates/`.

pub use handset_tetris_core as core;
pub use handset_tetris_input as input;
pub use handset_tetris_term as term;
pub use handset_tetris_types as types;
