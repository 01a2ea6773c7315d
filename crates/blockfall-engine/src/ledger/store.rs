use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use super::ScoreEntry;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ScoreStoreError {
    #[display("score storage I/O failed: {_0}")]
    Io(io::Error),
    #[display("score data is malformed: {_0}")]
    Format(serde_json::Error),
}

/// Persistence medium for the high-score table.
///
/// The ledger only ever reads the whole table and writes the whole table; how
/// and where it is kept is up to the implementation.
pub trait ScoreStore {
    fn load(&self) -> Result<Vec<ScoreEntry>, ScoreStoreError>;

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), ScoreStoreError>;
}

impl<S> ScoreStore for Box<S>
where
    S: ScoreStore + ?Sized,
{
    fn load(&self) -> Result<Vec<ScoreEntry>, ScoreStoreError> {
        (**self).load()
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), ScoreStoreError> {
        (**self).save(entries)
    }
}

/// Keeps the table in memory only. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    entries: Vec<ScoreEntry>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: Vec<ScoreEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<Vec<ScoreEntry>, ScoreStoreError> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), ScoreStoreError> {
        self.entries = entries.to_vec();
        Ok(())
    }
}

/// Keeps the table as a pretty-printed JSON array of `{"name", "score"}` objects.
///
/// A missing file is an empty table. The parent directory is created on the
/// first save.
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load(&self) -> Result<Vec<ScoreEntry>, ScoreStoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };
        let entries = serde_json::from_reader(BufReader::new(file))?;
        Ok(entries)
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), ScoreStoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
