//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing::Level;

use crate::core::{Result, Tetromino};

/// Environment fallback for `--log-file`.
pub const LOG_FILE_ENV: &str = "BLOCKTRIS_LOG_FILE";

/// blocktris - falling-block puzzle game for the terminal
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// RNG seed (defaults to one derived from the clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Force the first falling piece (O, I, T, L, J, S or Z)
    #[arg(long, value_name = "PIECE")]
    pub first: Option<String>,

    /// Start with sound muted
    #[arg(long)]
    pub muted: bool,

    /// Do not capture the mouse (disables clicks and swipes)
    #[arg(long)]
    pub no_mouse: bool,

    /// Ring the terminal bell for line clears, level ups and game over
    #[arg(long)]
    pub bell: bool,

    /// Release a held key after this long without a repeat (terminals without release events)
    #[arg(long, default_value_t = 150)]
    pub key_release_timeout_ms: u32,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Maximum log level
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub seed: u32,
    pub first: Option<Tetromino>,
    pub muted: bool,
    pub mouse: bool,
    pub bell: bool,
    pub key_release_timeout_ms: u32,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self> {
        let first = args.first.as_deref().map(Tetromino::parse).transpose()?;
        let log_file = args
            .log_file
            .or_else(|| non_empty_path(std::env::var(LOG_FILE_ENV).ok()));

        Ok(Self {
            seed: args.seed.unwrap_or_else(clock_seed),
            first,
            muted: args.muted,
            mouse: !args.no_mouse,
            bell: args.bell,
            key_release_timeout_ms: args.key_release_timeout_ms,
            log_file,
            log_level: args.log_level,
        })
    }
}

fn non_empty_path(raw: Option<String>) -> Option<PathBuf> {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CoreError;
    use crate::types::PieceKind;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("blocktris").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        assert_eq!(args.key_release_timeout_ms, 150);
        assert_eq!(args.log_level, Level::INFO);
        assert!(!args.muted);
        assert!(!args.no_mouse);
    }

    #[test]
    fn explicit_flags_are_resolved() {
        let args = parse(&[
            "--seed",
            "42",
            "--first",
            "T",
            "--muted",
            "--no-mouse",
            "--log-file",
            "/tmp/blocktris.log",
            "--log-level",
            "debug",
        ]);
        let settings = Settings::from_args(args).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.first.map(|p| p.kind()), Some(PieceKind::T));
        assert!(settings.muted);
        assert!(!settings.mouse);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/blocktris.log")));
        assert_eq!(settings.log_level, Level::DEBUG);
    }

    #[test]
    fn unknown_first_piece_is_rejected() {
        let args = parse(&["--first", "X"]);
        assert_eq!(
            Settings::from_args(args).unwrap_err(),
            CoreError::UnknownPieceKind("X".to_string())
        );
    }

    #[test]
    fn blank_env_path_is_ignored() {
        assert_eq!(non_empty_path(None), None);
        assert_eq!(non_empty_path(Some("  ".to_string())), None);
        assert_eq!(
            non_empty_path(Some(" game.log ".to_string())),
            Some(PathBuf::from("game.log"))
        );
    }
}
