//! Integration tests for settings persistence and the console front end
//!
//! Settings are written to a scratch directory under the system temp dir; the console is
//! driven with scripted input and a seeded random opponent so runs are repeatable.

use chessbot::core::{CoreError, Settings};
use chessbot::game::ai::{AiDifficulty, EngineKind, RandomOpponent};
use chessbot::game::types::PieceColor;
use chessbot::ui::Console;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chessbot-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn run_console(settings: Settings, script: &str, seed: u64) -> String {
    let mut output = Vec::new();
    {
        let mut console = Console::new(
            Cursor::new(script.as_bytes().to_vec()),
            &mut output,
            settings,
            Box::new(RandomOpponent::seeded(seed)),
        )
        .unwrap();
        console.run().unwrap();
    }
    String::from_utf8(output).unwrap()
}

// ============================================================================
// Settings Persistence
// ============================================================================

#[test]
fn test_settings_save_and_load_round_trip() {
    //! Values written by `save_to` come back unchanged, and nested directories are created
    let dir = scratch_dir("roundtrip");
    let path = dir.join("nested").join("settings.json");

    let mut settings = Settings {
        human_side: PieceColor::Black,
        strict_annotations: true,
        inactivity_threshold: 150,
        ..Settings::default()
    };
    settings.ai.kind = EngineKind::Random;
    settings.ai.apply_difficulty(AiDifficulty::Hard);

    settings.save_to(&path).unwrap();
    let loaded = Settings::load_from(&path).unwrap();

    assert_eq!(loaded, settings);
    assert_eq!(loaded.ai.strength(), 15);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_settings_file_gives_defaults() {
    let dir = scratch_dir("missing");
    let settings = Settings::load_or_default(Some(&dir.join("settings.json")));
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_corrupt_settings_file_gives_defaults() {
    //! A malformed file is reported by `load_from` but never stops the program
    let dir = scratch_dir("corrupt");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        Settings::load_from(&path),
        Err(CoreError::SettingsSerialization(_))
    ));
    assert_eq!(Settings::load_or_default(Some(&path)), Settings::default());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_invalid_threshold_is_rejected() {
    let dir = scratch_dir("threshold");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    fs::write(&path, r#"{ "inactivity_threshold": 0 }"#).unwrap();

    assert!(matches!(
        Settings::load_from(&path),
        Err(CoreError::InvalidSetting { .. })
    ));
    let _ = fs::remove_dir_all(&dir);
}

// ============================================================================
// Console Sessions
// ============================================================================

#[test]
fn test_console_plays_against_opponent() {
    //! The human's move is recorded, the opponent answers and the history shows both
    let output = run_console(Settings::default(), "e4\nhistory\nquit\n", 5);

    assert!(output.contains("1. e4 "), "history missing: {output}");
    assert!(output.contains("Goodbye."));
}

#[test]
fn test_console_reports_rejections_and_continues() {
    let output = run_console(Settings::default(), "Qh5\nz9\ne4\nquit\n", 5);

    assert!(output.contains("No matching piece"), "output was: {output}");
    assert!(output.contains("Syntax error"), "output was: {output}");
    assert!(output.contains("You played e4"), "output was: {output}");
}

#[test]
fn test_console_with_human_as_black_lets_opponent_open() {
    let settings = Settings {
        human_side: PieceColor::Black,
        ..Settings::default()
    };
    let output = run_console(settings, "history\nquit\n", 9);

    assert!(output.contains("1. "), "opponent should have moved: {output}");
    assert!(!output.contains("(no moves)"));
}

#[test]
fn test_console_custom_start_position() {
    //! Moves typed in an already mated start position are refused with the final status
    let settings = Settings {
        start_position: Some(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3".to_string(),
        ),
        ..Settings::default()
    };
    let output = run_console(settings, "e4\nquit\n", 1);

    assert!(output.contains("wins by checkmate"), "output was: {output}");
    assert!(output.contains("Game is over"), "output was: {output}");
}
