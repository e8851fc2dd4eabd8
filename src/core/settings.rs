//! Settings and their persistence
//!
//! Saves and loads [`Settings`] to/from a JSON file so preferences survive between runs.
//!
//! # File Location
//!
//! `settings.json` in the platform configuration directory, e.g.
//! `~/.config/chessbot/settings.json` on Linux. An explicit path can be passed instead.
//!
//! # Error Handling
//!
//! - [`Settings::load_or_default`] never fails: a missing, unreadable or malformed file
//!   falls back to defaults with a warning
//! - [`Settings::load_from`] and [`Settings::save_to`] return [`CoreError`] for callers that
//!   want to know

use super::error::{CoreError, CoreResult};
use crate::game::ai::{AiConfig, MAX_STRENGTH, MAX_THINK_TIME_SECS};
use crate::game::resources::DEFAULT_INACTIVITY_THRESHOLD;
use crate::game::rules::BoardState;
use crate::game::types::PieceColor;
use crate::game::SessionConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// User preferences for a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Opponent kind, strength, think time and engine path
    pub ai: AiConfig,
    /// Side the human plays; the AI takes the other
    pub human_side: PieceColor,
    /// FEN to start from instead of the standard position
    pub start_position: Option<String>,
    /// Halfmove clock value that draws the game
    pub inactivity_threshold: u32,
    /// Warn when a typed `+`/`#` disagrees with the position
    pub strict_annotations: bool,
    /// Cross-check each move with the engine's move generator
    pub oracle_cross_check: bool,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Start with the opponent switched off; the human moves for both sides
    pub solo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            human_side: PieceColor::White,
            start_position: None,
            inactivity_threshold: DEFAULT_INACTIVITY_THRESHOLD,
            strict_annotations: false,
            oracle_cross_check: false,
            log_level: "info".to_string(),
            solo: false,
        }
    }
}

impl Settings {
    /// Path to `settings.json` in the user's configuration directory
    ///
    /// Falls back to a local `settings.json` if the system config dir cannot be found.
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "chessbot") {
            proj_dirs.config_dir().join(SETTINGS_FILENAME)
        } else {
            PathBuf::from(SETTINGS_FILENAME)
        }
    }

    /// Read and validate settings from `path`
    ///
    /// # Errors
    ///
    /// I/O and JSON errors, or [`CoreError::InvalidSetting`] for an unusable start position
    /// or inactivity threshold.
    pub fn load_from(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings.normalized())
    }

    /// Load settings from `path` (or the default location), falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let settings_path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !settings_path.exists() {
            info!(
                "[SETTINGS] No settings file found at {:?}. Using defaults.",
                settings_path
            );
            return Self::default();
        }

        match Self::load_from(&settings_path) {
            Ok(settings) => {
                info!("[SETTINGS] Loaded settings from {:?}", settings_path);
                settings
            }
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                    settings_path, e
                );
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating the directory if needed
    ///
    /// # Errors
    ///
    /// I/O or serialization failure.
    pub fn save_to(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("[SETTINGS] Saved settings to {:?}", path);
        Ok(())
    }

    /// Save to the default location and return the path written
    ///
    /// # Errors
    ///
    /// I/O or serialization failure.
    pub fn save(&self) -> CoreResult<PathBuf> {
        let path = Self::default_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Check values serde cannot check on its own
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidSetting`] naming the offending field: a zero inactivity
    /// threshold, a think time that is not a finite number of seconds within range, or a
    /// start position that does not load.
    pub fn validate(&self) -> CoreResult<()> {
        if self.inactivity_threshold == 0 {
            return Err(CoreError::InvalidSetting {
                field: "inactivity_threshold".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        let think = self.ai.think_time_secs;
        if !think.is_finite() || !(0.0..=MAX_THINK_TIME_SECS).contains(&think) {
            return Err(CoreError::InvalidSetting {
                field: "ai.think_time_secs".to_string(),
                message: format!("must be between 0 and {MAX_THINK_TIME_SECS} seconds"),
            });
        }
        if let Some(fen) = &self.start_position {
            BoardState::from_fen(fen).map_err(|e| CoreError::InvalidSetting {
                field: "start_position".to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Clamp out-of-range values into range
    pub fn normalized(mut self) -> Self {
        self.ai.strength = self.ai.strength.min(MAX_STRENGTH);
        self
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            inactivity_threshold: self.inactivity_threshold,
            strict_annotations: self.strict_annotations,
            cross_check: self.oracle_cross_check,
        }
    }

    pub fn ai_side(&self) -> PieceColor {
        self.human_side.opposite()
    }
}
