//! Host configuration read from the environment.

use std::path::PathBuf;

use crate::core::PrefsFile;

/// Handset screen the playfield is laid out for when nothing is configured
pub const DEFAULT_SCREEN: (u16, u16) = (176, 220);

/// Terminal host settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Handset screen size in pixels, used to derive the playfield geometry
    pub screen: (u16, u16),
    /// Fixed RNG seed; time-based when unset
    pub seed: Option<u32>,
    pub prefs_path: PathBuf,
    /// JSON-lines log file; logging is off when unset
    pub log_path: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            screen: DEFAULT_SCREEN,
            seed: None,
            prefs_path: PrefsFile::default_path(),
            log_path: None,
        }
    }
}

impl HostConfig {
    /// Read `HANDSET_TETRIS_*` variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] with an explicit variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let screen = non_empty("HANDSET_TETRIS_SCREEN")
            .and_then(|s| parse_screen(&s))
            .unwrap_or(DEFAULT_SCREEN);

        let seed = non_empty("HANDSET_TETRIS_SEED").and_then(|s| s.parse().ok());

        let prefs_path = non_empty("HANDSET_TETRIS_PREFS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(PrefsFile::default_path);

        let log_path = non_empty("HANDSET_TETRIS_LOG_PATH").map(PathBuf::from);

        Self {
            screen,
            seed,
            prefs_path,
            log_path,
        }
    }
}

/// Parse `WxH`, e.g. `240x320`
pub fn parse_screen(s: &str) -> Option<(u16, u16)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}
