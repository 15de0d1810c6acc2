//! Preferences - settings and best scores kept between runs
//!
//! Stored as JSON. A missing or unreadable file is never fatal: the session
//! falls back to [`Preferences::default`] and logs a warning.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::PrefsError;
use crate::types::MAX_LEVEL;

const DIR_NAME: &str = "handset-tetris";
const FILE_NAME: &str = "preferences.json";

/// Persisted player settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Level a new game starts at (1..=3)
    pub level: u8,
    pub sound_on: bool,
    pub grid_lines: bool,
    /// Best score per level
    pub top_scores: [u32; MAX_LEVEL as usize],
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            level: 1,
            sound_on: false,
            grid_lines: false,
            top_scores: [0; MAX_LEVEL as usize],
        }
    }
}

impl Preferences {
    /// Clamp values a hand-edited file could get wrong
    pub fn normalized(mut self) -> Self {
        self.level = self.level.clamp(1, MAX_LEVEL);
        self
    }

    /// Best score stored for `level`
    pub fn best(&self, level: u8) -> u32 {
        self.top_scores[Self::slot(level)]
    }

    /// Store `total` if it beats the best for `level`. Returns true on a new record.
    pub fn record(&mut self, level: u8, total: u32) -> bool {
        let best = &mut self.top_scores[Self::slot(level)];
        if total <= *best {
            return false;
        }
        *best = total;
        true
    }

    /// Forget every best score
    pub fn clear_scores(&mut self) {
        self.top_scores = [0; MAX_LEVEL as usize];
    }

    fn slot(level: u8) -> usize {
        (level.clamp(1, MAX_LEVEL) - 1) as usize
    }
}

/// JSON file holding [`Preferences`]
#[derive(Debug, Clone)]
pub struct PrefsFile {
    path: PathBuf,
}

impl PrefsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME/handset-tetris/preferences.json`, else under `~/.config`
    pub fn default_path() -> PathBuf {
        let base = match std::env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
            _ => std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from(".")),
        };
        base.join(DIR_NAME).join(FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Preferences, PrefsError> {
        let data = fs::read(&self.path).map_err(|source| self.io_error(source))?;
        let prefs: Preferences = serde_json::from_slice(&data)?;
        Ok(prefs.normalized())
    }

    /// Write the file, creating its directory if needed
    pub fn save(&self, prefs: &Preferences) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let data = serde_json::to_vec_pretty(prefs)?;
        fs::write(&self.path, data).map_err(|source| self.io_error(source))
    }

    /// Load, or fall back to defaults with a warning
    pub fn load_or_default(&self) -> Preferences {
        self.load().unwrap_or_else(|err| {
            warn!("[Prefs] using defaults: {}", err);
            Preferences::default()
        })
    }

    fn io_error(&self, source: std::io::Error) -> PrefsError {
        PrefsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.level, 1);
        assert!(!prefs.sound_on);
        assert!(!prefs.grid_lines);
        assert_eq!(prefs.top_scores, [0, 0, 0]);
    }

    #[test]
    fn test_record_only_on_improvement() {
        let mut prefs = Preferences::default();
        assert!(prefs.record(2, 120));
        assert!(!prefs.record(2, 120));
        assert!(!prefs.record(2, 80));
        assert_eq!(prefs.best(2), 120);
        assert_eq!(prefs.best(1), 0);
    }

    #[test]
    fn test_clear_scores_keeps_settings() {
        let mut prefs = Preferences {
            level: 3,
            sound_on: true,
            ..Preferences::default()
        };
        prefs.record(1, 40);
        prefs.record(3, 900);
        prefs.clear_scores();
        assert_eq!(prefs.top_scores, [0, 0, 0]);
        assert_eq!((prefs.level, prefs.sound_on), (3, true));
        assert!(prefs.record(3, 10));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"level": 9, "sound_on": true}"#).unwrap();
        let prefs = prefs.normalized();
        assert_eq!(prefs.level, 3);
        assert!(prefs.sound_on);
        assert_eq!(prefs.top_scores, [0, 0, 0]);
    }

    #[test]
    fn test_file_round_trip_and_missing_file() {
        let dir = std::env::temp_dir().join(format!("handset-tetris-prefs-{}", std::process::id()));
        let file = PrefsFile::new(dir.join("nested").join(FILE_NAME));
        assert!(matches!(file.load(), Err(PrefsError::Io { .. })));
        assert_eq!(file.load_or_default(), Preferences::default());

        let prefs = Preferences {
            level: 2,
            sound_on: true,
            grid_lines: true,
            top_scores: [10, 500, 0],
        };
        file.save(&prefs).unwrap();
        assert_eq!(file.load().unwrap(), prefs);
        let _ = fs::remove_dir_all(&dir);
    }
}
