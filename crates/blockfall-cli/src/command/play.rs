use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{Game, JsonFileScoreStore, MemoryScoreStore, ScoreLedger, ScoreStore};
use tracing::info;

use crate::{tui::Runtime, view::PlayApp};

pub(super) const DEFAULT_SCORES_FILE: &str = "./blockfall-scores.json";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// File the high-score table is read from and saved to
    #[clap(long, default_value = DEFAULT_SCORES_FILE)]
    pub(super) scores_file: PathBuf,
    /// Keep high scores in memory only for this session
    #[clap(long)]
    pub(super) no_save: bool,
    /// Seed for the shape sequence, for reproducible games
    #[clap(long)]
    pub(super) seed: Option<u64>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            scores_file: PathBuf::from(DEFAULT_SCORES_FILE),
            no_save: false,
            seed: None,
        }
    }
}

impl PlayArg {
    fn score_store(&self) -> Box<dyn ScoreStore> {
        if self.no_save {
            Box::new(MemoryScoreStore::new())
        } else {
            Box::new(JsonFileScoreStore::new(&self.scores_file))
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let game = match arg.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    let ledger = ScoreLedger::new(arg.score_store());
    info!(
        seed = ?arg.seed,
        scores_file = %arg.scores_file.display(),
        no_save = arg.no_save,
        "starting game"
    );

    let mut app = PlayApp::new(game, ledger);
    Runtime::new()
        .run(&mut app)
        .context("terminal session failed")?;

    info!("session ended");
    Ok(())
}
