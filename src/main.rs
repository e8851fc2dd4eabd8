//! chessbot command line entry point
//!
//! Loads settings, applies command line overrides, starts logging and runs the console
//! game on stdin/stdout.

use anyhow::Context;
use chessbot::core::{init_logging, Settings};
use chessbot::game::ai::{AiDifficulty, EngineKind};
use chessbot::game::types::PieceColor;
use chessbot::ui::Console;
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for PieceColor {
    fn from(side: Side) -> Self {
        match side {
            Side::White => PieceColor::White,
            Side::Black => PieceColor::Black,
        }
    }
}

/// Play chess against an AI opponent by typing moves
#[derive(Parser, Debug)]
#[command(name = "chessbot", version, about)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Opponent implementation
    #[arg(long, value_enum)]
    engine: Option<EngineKind>,

    /// Opponent strength, 0-20
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=20))]
    strength: Option<u8>,

    /// Strength and think time preset (applied before --strength/--think-time)
    #[arg(long, value_enum)]
    difficulty: Option<AiDifficulty>,

    /// Seconds the opponent may think per move
    #[arg(long)]
    think_time: Option<f32>,

    /// Path to a UCI engine binary
    #[arg(long)]
    uci_path: Option<PathBuf>,

    /// Side you play
    #[arg(long, value_enum)]
    human_side: Option<Side>,

    /// Start from this FEN instead of the standard position
    #[arg(long)]
    fen: Option<String>,

    /// Warn when a typed +/# disagrees with the position
    #[arg(long)]
    strict_annotations: bool,

    /// Cross-check every move with the engine's move generator
    #[arg(long)]
    cross_check: bool,

    /// Move for both sides yourself; the opponent only answers 'hint'
    #[arg(long)]
    solo: bool,

    /// Log filter when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(engine) = self.engine {
            settings.ai.kind = engine;
        }
        if let Some(difficulty) = self.difficulty {
            settings.ai.apply_difficulty(difficulty);
        }
        if let Some(strength) = self.strength {
            settings.ai.strength = strength;
        }
        if let Some(secs) = self.think_time {
            settings.ai.think_time_secs = secs;
        }
        if let Some(path) = &self.uci_path {
            settings.ai.uci_path = Some(path.clone());
        }
        if let Some(side) = self.human_side {
            settings.human_side = side.into();
        }
        if let Some(fen) = &self.fen {
            settings.start_position = Some(fen.clone());
        }
        if self.strict_annotations {
            settings.strict_annotations = true;
        }
        if self.cross_check {
            settings.oracle_cross_check = true;
        }
        if self.solo {
            settings.solo = true;
        }
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(cli.config.as_deref());
    cli.apply(&mut settings);
    settings.validate().context("invalid settings")?;
    let settings = settings.normalized();

    init_logging(&settings.log_level).context("failed to start logging")?;
    info!(
        "[GAME] Starting: human plays {}, opponent {:?} at strength {}",
        settings.human_side,
        settings.ai.kind,
        settings.ai.strength()
    );

    if cli.save_settings {
        match &cli.config {
            Some(path) => settings.save_to(path)?,
            None => {
                settings.save()?;
            }
        }
    }

    let opponent = settings.ai.build();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), settings, opponent)
        .context("could not set up the game")?;
    console.run().context("console I/O failed")?;
    Ok(())
}
