//! Error types for session setup and preference storage.
//!
//! Illegal moves and blocked spawns are ordinary control flow and never show
//! up here.

use std::path::PathBuf;

use thiserror::Error;

/// Grid buffer could not be created.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("cannot allocate grid of {rows}x{cols} cells")]
    Allocation { rows: u16, cols: u16 },
}

/// Playfield geometry rejected at initialization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("screen {width}x{height} is too small for a playfield")]
    ScreenTooSmall { width: u16, height: u16 },
    #[error("playfield must have between {min} and {max} rows, got {rows}")]
    RowCount { rows: u16, min: u16, max: u16 },
    #[error("cell side length must be positive")]
    CellSide,
}

/// A session could not be started.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot start game: {0}")]
    Grid(#[from] GridError),
    #[error("cannot start game: {0}")]
    Geometry(#[from] GeometryError),
}

/// Preference storage failed. Never fatal to a session.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("no preference store configured")]
    Unavailable,
    #[error("preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed preference data: {0}")]
    Format(#[from] serde_json::Error),
}
