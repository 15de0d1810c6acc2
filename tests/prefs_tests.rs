//! Preferences tests - JSON file storage and record keeping

use std::fs;
use std::path::PathBuf;

use handset_tetris::core::{Geometry, Persistence, Preferences, PrefsError, PrefsFile};
use handset_tetris::term::{GameView, TerminalHost};

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("handset-tetris-{}-{}", name, std::process::id()))
}

#[test]
fn test_file_format_is_plain_json() {
    let dir = scratch_dir("format");
    let file = PrefsFile::new(dir.join("preferences.json"));
    let prefs = Preferences {
        level: 2,
        sound_on: true,
        grid_lines: false,
        top_scores: [40, 0, 1500],
    };
    file.save(&prefs).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&fs::read(file.path()).unwrap()).unwrap();
    assert_eq!(value["level"], 2);
    assert_eq!(value["sound_on"], true);
    assert_eq!(value["top_scores"], serde_json::json!([40, 0, 1500]));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_malformed_file_is_reported() {
    let dir = scratch_dir("malformed");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("preferences.json");
    fs::write(&path, b"{ level: ").unwrap();

    let file = PrefsFile::new(&path);
    assert!(matches!(file.load(), Err(PrefsError::Format(_))));
    assert_eq!(file.load_or_default(), Preferences::default());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_terminal_host_persists_through_file() {
    let dir = scratch_dir("host");
    let file = PrefsFile::new(dir.join("preferences.json"));
    let view = GameView::new(Geometry::cells(20).unwrap());
    let mut host = TerminalHost::new(view, Some(file.clone()));

    assert!(host.load_preferences().is_err());
    let prefs = Preferences {
        grid_lines: true,
        ..Preferences::default()
    };
    host.save_preferences(&prefs).unwrap();
    assert_eq!(host.load_preferences().unwrap(), prefs);
    assert_eq!(file.load().unwrap(), prefs);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_records_are_per_level() {
    let mut prefs = Preferences::default();
    assert!(prefs.record(1, 500));
    assert!(prefs.record(3, 90));
    assert!(!prefs.record(1, 499));
    assert_eq!(prefs.top_scores, [500, 0, 90]);

    // Out of range levels land in the nearest slot.
    assert!(prefs.record(7, 100));
    assert_eq!(prefs.best(3), 100);
}
