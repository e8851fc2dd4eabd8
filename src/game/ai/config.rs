//! AI opponent configuration
//!
//! Chooses which opponent plays and how strongly. Strength is a single 0-20 scale shared
//! by every opponent:
//!
//! | Opponent | How strength is used                              |
//! |----------|---------------------------------------------------|
//! | builtin  | search depth `1 + strength / 5` plies             |
//! | uci      | sent as the engine's `Skill Level` option         |
//! | random   | ignored                                           |
//!
//! # Difficulty presets
//!
//! | Difficulty | Strength | Time/Move |
//! |------------|----------|-----------|
//! | Easy       | 3        | 0.5s      |
//! | Medium     | 8        | 1.5s      |
//! | Hard       | 15       | 3.0s      |

use super::{EngineOpponent, MoveSuggester, RandomOpponent, UciProcessOpponent};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const MAX_STRENGTH: u8 = 20;
pub const DEFAULT_STRENGTH: u8 = 8;
pub const DEFAULT_THINK_TIME_SECS: f32 = 1.5;
pub const MIN_THINK_TIME_SECS: f32 = 0.05;
pub const MAX_THINK_TIME_SECS: f32 = 300.0;
pub const DEFAULT_UCI_PATH: &str = "stockfish";

/// Bring a think time into `MIN_THINK_TIME_SECS..=MAX_THINK_TIME_SECS`
///
/// NaN and infinities fall back to [`DEFAULT_THINK_TIME_SECS`].
pub fn bounded_think_time(secs: f32) -> f32 {
    if secs.is_finite() {
        secs.clamp(MIN_THINK_TIME_SECS, MAX_THINK_TIME_SECS)
    } else {
        DEFAULT_THINK_TIME_SECS
    }
}

/// Which opponent implementation to use
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Built-in search engine
    #[default]
    Builtin,
    /// External UCI engine process
    Uci,
    /// Random legal moves
    Random,
}

/// Named strength presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AiDifficulty {
    Easy,
    Medium,
    Hard,
}

impl AiDifficulty {
    pub fn strength(self) -> u8 {
        match self {
            AiDifficulty::Easy => 3,
            AiDifficulty::Medium => DEFAULT_STRENGTH,
            AiDifficulty::Hard => 15,
        }
    }

    /// Seconds the opponent may think per move
    pub fn seconds_per_move(self) -> f32 {
        match self {
            AiDifficulty::Easy => 0.5,
            AiDifficulty::Medium => 1.5,
            AiDifficulty::Hard => 3.0,
        }
    }
}

/// Everything needed to build an opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub kind: EngineKind,
    /// 0-20, clamped on use
    pub strength: u8,
    pub think_time_secs: f32,
    /// Engine binary for [`EngineKind::Uci`]; defaults to `stockfish` on the `PATH`
    pub uci_path: Option<PathBuf>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::Builtin,
            strength: DEFAULT_STRENGTH,
            think_time_secs: DEFAULT_THINK_TIME_SECS,
            uci_path: None,
        }
    }
}

impl AiConfig {
    pub fn strength(&self) -> u8 {
        self.strength.min(MAX_STRENGTH)
    }

    pub fn apply_difficulty(&mut self, difficulty: AiDifficulty) {
        self.strength = difficulty.strength();
        self.think_time_secs = difficulty.seconds_per_move();
    }

    /// Think time bounded so a zero, negative or absurd value still gives a usable search
    pub fn think_time_secs(&self) -> f32 {
        bounded_think_time(self.think_time_secs)
    }

    /// Construct the configured opponent
    ///
    /// Building never fails; a UCI engine is only launched on its first request.
    pub fn build(&self) -> Box<dyn MoveSuggester> {
        match self.kind {
            EngineKind::Builtin => Box::new(EngineOpponent::new(self.think_time_secs())),
            EngineKind::Uci => {
                let path = self
                    .uci_path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_UCI_PATH));
                Box::new(UciProcessOpponent::new(path, self.think_time_secs()))
            }
            EngineKind::Random => Box::new(RandomOpponent::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_default() {
        //! Verifies the default opponent is the built-in engine at medium strength
        let config = AiConfig::default();
        assert_eq!(config.kind, EngineKind::Builtin);
        assert_eq!(config.strength(), DEFAULT_STRENGTH);
        assert_eq!(config.build().name(), "builtin");
    }

    #[test]
    fn test_strength_is_clamped() {
        let config = AiConfig {
            strength: 99,
            ..AiConfig::default()
        };
        assert_eq!(config.strength(), MAX_STRENGTH);
    }

    #[test]
    fn test_time_increases_with_difficulty() {
        //! Verifies harder difficulties get more thinking time and strength
        let easy = AiDifficulty::Easy;
        let medium = AiDifficulty::Medium;
        let hard = AiDifficulty::Hard;
        assert!(easy.seconds_per_move() < medium.seconds_per_move());
        assert!(medium.seconds_per_move() < hard.seconds_per_move());
        assert!(easy.strength() < medium.strength() && medium.strength() < hard.strength());

        let mut config = AiConfig::default();
        config.apply_difficulty(hard);
        assert_eq!(config.strength(), 15);
        assert_eq!(config.think_time_secs, 3.0);
    }

    #[test]
    fn test_think_time_is_bounded() {
        let at = |secs| AiConfig {
            think_time_secs: secs,
            ..AiConfig::default()
        };
        assert_eq!(at(0.0).think_time_secs(), MIN_THINK_TIME_SECS);
        assert_eq!(at(1e12).think_time_secs(), MAX_THINK_TIME_SECS);
        assert_eq!(at(f32::INFINITY).think_time_secs(), DEFAULT_THINK_TIME_SECS);
        assert_eq!(at(f32::NAN).think_time_secs(), DEFAULT_THINK_TIME_SECS);
        assert_eq!(at(2.5).think_time_secs(), 2.5);
    }

    #[test]
    fn test_engine_kind_serde_names() {
        assert_eq!(serde_json::to_string(&EngineKind::Uci).unwrap(), "\"uci\"");
        let kind: EngineKind = serde_json::from_str("\"random\"").unwrap();
        assert_eq!(kind, EngineKind::Random);
    }
}
