use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use blockfall_engine::{JsonFileScoreStore, ScoreEntry, ScoreLedger};

use super::play::DEFAULT_SCORES_FILE;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    /// File the high-score table is read from
    #[clap(long, default_value = DEFAULT_SCORES_FILE)]
    scores_file: PathBuf,
}

pub(crate) fn run(arg: &ScoresArg) -> anyhow::Result<()> {
    let ledger = ScoreLedger::new(JsonFileScoreStore::new(&arg.scores_file));
    let mut out = io::stdout().lock();
    write_table(&mut out, ledger.scores())?;
    Ok(())
}

fn write_table<W>(out: &mut W, entries: &[ScoreEntry]) -> io::Result<()>
where
    W: io::Write,
{
    if entries.is_empty() {
        writeln!(out, "No scores yet!")?;
        return Ok(());
    }
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(out, "{:>2}. {:<10} {:>7}", rank + 1, entry.name().as_str(), entry.score())?;
    }
    Ok(())
}
