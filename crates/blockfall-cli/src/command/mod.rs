use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

use self::{play::PlayArg, scores::ScoresArg};

mod play;
mod scores;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    /// Write logs to this file (the terminal is busy drawing the game)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the high-score table
    Scores(#[clap(flatten)] ScoresArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.log_file.as_ref(), args.verbose)?;

    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Scores(arg) => scores::run(&arg)?,
    }
    Ok(())
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Logging goes to `log_file` only. Without one nothing is recorded, since
/// stdout and stderr belong to the terminal UI.
fn init_logging(log_file: Option<&PathBuf>, verbose: u8) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let level = log_level(verbose);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(LevelFilter::from_level(level))
        .init();

    info!(%level, path = %path.display(), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_default_mode_is_play() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_verbosity_counts() {
        let args = CommandArgs::try_parse_from(["blockfall", "-vv", "play"]).unwrap();
        assert_eq!(log_level(args.verbose), Level::TRACE);
        let args = CommandArgs::try_parse_from(["blockfall", "scores", "-v"]).unwrap();
        assert_eq!(log_level(args.verbose), Level::DEBUG);
    }

    #[test]
    fn test_play_options() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "play",
            "--seed",
            "42",
            "--no-save",
            "--scores-file",
            "/tmp/s.json",
        ])
        .unwrap();
        let Some(Mode::Play(play)) = args.mode else {
            panic!("expected play mode");
        };
        assert_eq!(play.seed, Some(42));
        assert!(play.no_save);
        assert_eq!(play.scores_file, PathBuf::from("/tmp/s.json"));
    }
}
