//! High-score ledger.
//!
//! [`ScoreLedger`] keeps the top [`MAX_HIGH_SCORES`] results in descending
//! order and writes them through a [`ScoreStore`]. Storage problems never reach
//! the caller: a failed load reads as an empty table and a failed save is
//! logged and dropped.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use self::store::*;

mod store;

/// Number of entries kept in the high-score table.
pub const MAX_HIGH_SCORES: usize = 5;

/// Maximum length of a player name, in characters.
pub const MAX_NAME_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlayerNameError {
    #[display("player name is empty")]
    Empty,
    #[display("player name is longer than {MAX_NAME_LEN} characters")]
    TooLong,
}

/// A validated player name: trimmed, non-empty, at most [`MAX_NAME_LEN`] characters.
///
/// ```
/// use blockfall_engine::{PlayerName, PlayerNameError};
///
/// assert_eq!(PlayerName::new("  Ann ").unwrap().as_str(), "Ann");
/// assert_eq!(PlayerName::new("   "), Err(PlayerNameError::Empty));
/// assert_eq!(PlayerName::new("Maximilian!"), Err(PlayerNameError::TooLong));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(name: &str) -> Result<Self, PlayerNameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlayerNameError::Empty);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(PlayerNameError::TooLong);
        }
        Ok(Self(name.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = PlayerNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<PlayerName> for String {
    fn from(value: PlayerName) -> Self {
        value.0
    }
}

/// One row of the high-score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    name: PlayerName,
    score: usize,
}

impl ScoreEntry {
    #[must_use]
    pub fn new(name: PlayerName, score: usize) -> Self {
        Self { name, score }
    }

    #[must_use]
    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }
}

/// The top scores, sorted descending, never more than [`MAX_HIGH_SCORES`].
///
/// Entries with equal scores keep their insertion order, so a newcomer ranks
/// below an existing entry with the same score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    entries: ArrayVec<ScoreEntry, MAX_HIGH_SCORES>,
}

impl HighScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from arbitrary entries: zero scores are dropped, the rest
    /// sorted and truncated.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ScoreEntry>,
    {
        let mut entries = entries
            .into_iter()
            .filter(|e| e.score > 0)
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self {
            entries: entries.into_iter().take(MAX_HIGH_SCORES).collect(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether `score` would earn a place in the table.
    #[must_use]
    pub fn qualifies(&self, score: usize) -> bool {
        score > 0 && self.rank_for(score) < MAX_HIGH_SCORES
    }

    /// Inserts an entry and returns its 0-based rank, or `None` if the score is
    /// zero or too low to make the table.
    pub fn record(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }
        let rank = self.rank_for(entry.score);
        if self.entries.is_full() {
            self.entries.pop();
        }
        self.entries.insert(rank, entry);
        Some(rank)
    }

    fn rank_for(&self, score: usize) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }
}

/// The high-score table bound to a persistent store.
///
/// # Example
///
/// ```
/// use blockfall_engine::{MemoryScoreStore, PlayerName, ScoreLedger};
///
/// let mut ledger = ScoreLedger::new(MemoryScoreStore::new());
/// ledger.save_score(&PlayerName::new("Ann")?, 0);
/// assert!(ledger.scores().is_empty());
///
/// ledger.save_score(&PlayerName::new("Ann")?, 50);
/// assert_eq!(ledger.scores()[0].score(), 50);
/// # Ok::<(), blockfall_engine::PlayerNameError>(())
/// ```
#[derive(Debug)]
pub struct ScoreLedger<S> {
    store: S,
    scores: HighScores,
    /// Entries recorded this session whose save failed. Merged back in on
    /// every reload until a save succeeds.
    unsaved: Vec<ScoreEntry>,
}

impl<S> ScoreLedger<S>
where
    S: ScoreStore,
{
    /// Wraps `store` and reads the current table from it.
    pub fn new(store: S) -> Self {
        let mut ledger = Self {
            store,
            scores: HighScores::new(),
            unsaved: vec![],
        };
        ledger.load_scores();
        ledger
    }

    /// Re-reads the table from the store.
    ///
    /// A store failure is logged and yields an empty table. Entries whose
    /// save failed earlier in the session are merged back in.
    pub fn load_scores(&mut self) -> &[ScoreEntry] {
        self.scores = match self.store.load() {
            Ok(entries) => HighScores::from_entries(entries),
            Err(e) => {
                warn!(error = %e, "could not load high scores");
                HighScores::new()
            }
        };
        for entry in &self.unsaved {
            self.scores.record(entry.clone());
        }
        self.scores.entries()
    }

    /// Cached table, as of the last load or save.
    #[must_use]
    pub fn scores(&self) -> &[ScoreEntry] {
        self.scores.entries()
    }

    #[must_use]
    pub fn qualifies(&self, score: usize) -> bool {
        self.scores.qualifies(score)
    }

    /// Records `score` for `name` and persists the table.
    ///
    /// A zero score is ignored. The table is re-read from the store first so
    /// that entries written elsewhere are not lost. If persisting fails the
    /// entry stays in the cached table for the rest of the session and is
    /// written along with the next save that succeeds.
    pub fn save_score(&mut self, name: &PlayerName, score: usize) {
        if score == 0 {
            debug!(%name, "zero score not recorded");
            return;
        }
        self.load_scores();
        let Some(rank) = self.scores.record(ScoreEntry::new(name.clone(), score)) else {
            debug!(%name, score, "score below the high-score table");
            return;
        };
        info!(%name, score, rank = rank + 1, "high score recorded");
        match self.store.save(self.scores.entries()) {
            Ok(()) => self.unsaved.clear(),
            Err(e) => {
                warn!(error = %e, "could not save high scores");
                self.unsaved.push(ScoreEntry::new(name.clone(), score));
                let table = self.scores.entries();
                self.unsaved.retain(|entry| table.contains(entry));
            }
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: usize) -> ScoreEntry {
        ScoreEntry::new(PlayerName::new(name).unwrap(), score)
    }

    fn scores(ledger: &ScoreLedger<impl ScoreStore>) -> Vec<(&str, usize)> {
        ledger
            .scores()
            .iter()
            .map(|e| (e.name().as_str(), e.score()))
            .collect()
    }

    #[derive(Debug)]
    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self) -> Result<Vec<ScoreEntry>, ScoreStoreError> {
            Err(ScoreStoreError::Io(std::io::Error::other("disk on fire")))
        }

        fn save(&mut self, _entries: &[ScoreEntry]) -> Result<(), ScoreStoreError> {
            Err(ScoreStoreError::Io(std::io::Error::other("disk on fire")))
        }
    }

    #[test]
    fn test_player_name_validation() {
        assert_eq!(PlayerName::new("Ann").unwrap().as_str(), "Ann");
        assert_eq!(PlayerName::new("\t Bo \n").unwrap().as_str(), "Bo");
        assert_eq!(PlayerName::new(""), Err(PlayerNameError::Empty));
        assert_eq!(PlayerName::new("  "), Err(PlayerNameError::Empty));
        assert!(PlayerName::new("abcdefghij").is_ok());
        assert_eq!(PlayerName::new("abcdefghijk"), Err(PlayerNameError::TooLong));
        // Length counts characters, not bytes.
        assert!(PlayerName::new("éééééééééé").is_ok());
    }

    #[test]
    fn test_high_scores_sorted_and_capped() {
        let mut table = HighScores::new();
        for (i, score) in [30, 10, 50, 20, 40, 60, 5].into_iter().enumerate() {
            table.record(entry(&format!("p{i}"), score));
            assert!(table.len() <= MAX_HIGH_SCORES);
            assert!(table.entries().windows(2).all(|w| w[0].score() >= w[1].score()));
        }
        let scores = table.entries().iter().map(ScoreEntry::score).collect::<Vec<_>>();
        assert_eq!(scores, [60, 50, 40, 30, 20]);
    }

    #[test]
    fn test_high_scores_ties_rank_below_existing() {
        let mut table = HighScores::new();
        table.record(entry("first", 20));
        assert_eq!(table.record(entry("second", 20)), Some(1));
        assert_eq!(table.entries()[0].name().as_str(), "first");
    }

    #[test]
    fn test_high_scores_rejects_low_and_zero() {
        let mut table = HighScores::from_entries((1..=5).map(|i| entry("p", i * 10)));
        assert!(!table.qualifies(10));
        assert_eq!(table.record(entry("low", 10)), None);
        assert_eq!(table.record(entry("zero", 0)), None);
        assert!(table.qualifies(11));
        assert_eq!(table.record(entry("new", 11)), Some(4));
        assert_eq!(table.entries()[4].name().as_str(), "new");
    }

    #[test]
    fn test_from_entries_normalizes() {
        let table = HighScores::from_entries(
            [5, 0, 70, 30, 10, 90, 20]
                .into_iter()
                .map(|s| entry("p", s)),
        );
        let scores = table.entries().iter().map(ScoreEntry::score).collect::<Vec<_>>();
        assert_eq!(scores, [90, 70, 30, 20, 10]);
    }

    #[test]
    fn test_save_zero_score_is_ignored() {
        let mut ledger = ScoreLedger::new(MemoryScoreStore::new());
        ledger.save_score(&PlayerName::new("Ann").unwrap(), 0);
        assert!(ledger.scores().is_empty());
        assert!(ledger.store().entries().is_empty());
    }

    #[test]
    fn test_save_on_empty_ledger() {
        let mut ledger = ScoreLedger::new(MemoryScoreStore::new());
        ledger.save_score(&PlayerName::new("Ann").unwrap(), 50);
        assert_eq!(scores(&ledger), [("Ann", 50)]);
        assert_eq!(ledger.store().entries(), [entry("Ann", 50)]);
    }

    #[test]
    fn test_save_keeps_top_five() {
        let mut ledger = ScoreLedger::new(MemoryScoreStore::new());
        for (name, score) in [("a", 10), ("b", 60), ("c", 30), ("d", 20), ("e", 50), ("f", 40)] {
            ledger.save_score(&PlayerName::new(name).unwrap(), score);
        }
        assert_eq!(
            scores(&ledger),
            [("b", 60), ("e", 50), ("f", 40), ("c", 30), ("d", 20)]
        );
        assert_eq!(ledger.store().entries().len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_save_rereads_store() {
        let store = MemoryScoreStore::with_entries(vec![entry("old", 70)]);
        let mut ledger = ScoreLedger::new(store);
        assert_eq!(scores(&ledger), [("old", 70)]);

        ledger.save_score(&PlayerName::new("new").unwrap(), 80);
        assert_eq!(scores(&ledger), [("new", 80), ("old", 70)]);
    }

    #[test]
    fn test_load_normalizes_store_contents() {
        let store = MemoryScoreStore::with_entries(
            [1, 2, 3, 4, 5, 6, 7].into_iter().map(|s| entry("p", s)).collect(),
        );
        let ledger = ScoreLedger::new(store);
        let scores = ledger.scores().iter().map(ScoreEntry::score).collect::<Vec<_>>();
        assert_eq!(scores, [7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_broken_store_degrades_to_empty() {
        let mut ledger = ScoreLedger::new(BrokenStore);
        assert!(ledger.scores().is_empty());
        assert!(ledger.load_scores().is_empty());

        ledger.save_score(&PlayerName::new("Ann").unwrap(), 50);
        assert_eq!(scores(&ledger), [("Ann", 50)]);
    }

    /// Loads fine but refuses to save until `fail_saves` is cleared.
    #[derive(Debug, Default)]
    struct ReadOnlyStore {
        entries: Vec<ScoreEntry>,
        fail_saves: bool,
    }

    impl ScoreStore for ReadOnlyStore {
        fn load(&self) -> Result<Vec<ScoreEntry>, ScoreStoreError> {
            Ok(self.entries.clone())
        }

        fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), ScoreStoreError> {
            if self.fail_saves {
                return Err(ScoreStoreError::Io(std::io::Error::other("read-only")));
            }
            self.entries = entries.to_vec();
            Ok(())
        }
    }

    #[test]
    fn test_failed_saves_kept_for_session() {
        let mut ledger = ScoreLedger::new(ReadOnlyStore {
            fail_saves: true,
            ..ReadOnlyStore::default()
        });
        ledger.save_score(&PlayerName::new("Ann").unwrap(), 50);
        ledger.save_score(&PlayerName::new("Bo").unwrap(), 20);
        assert_eq!(scores(&ledger), [("Ann", 50), ("Bo", 20)]);

        // An explicit reload still shows them.
        ledger.load_scores();
        assert_eq!(scores(&ledger), [("Ann", 50), ("Bo", 20)]);
        assert!(ledger.store().entries.is_empty());
    }

    #[test]
    fn test_unsaved_entries_persisted_by_next_good_save() {
        let mut ledger = ScoreLedger::new(ReadOnlyStore {
            entries: vec![entry("old", 30)],
            fail_saves: true,
        });
        ledger.save_score(&PlayerName::new("Ann").unwrap(), 50);
        assert_eq!(scores(&ledger), [("Ann", 50), ("old", 30)]);

        ledger.store.fail_saves = false;
        ledger.save_score(&PlayerName::new("Bo").unwrap(), 20);
        assert_eq!(scores(&ledger), [("Ann", 50), ("old", 30), ("Bo", 20)]);
        assert_eq!(
            ledger.store().entries,
            [entry("Ann", 50), entry("old", 30), entry("Bo", 20)]
        );
        assert!(ledger.unsaved.is_empty());

        // Nothing is recorded twice once the store has it.
        ledger.load_scores();
        assert_eq!(scores(&ledger), [("Ann", 50), ("old", 30), ("Bo", 20)]);
    }

    #[test]
    fn test_entry_json_format() {
        let json = serde_json::to_string(&entry("Ann", 50)).unwrap();
        assert_eq!(json, r#"{"name":"Ann","score":50}"#);

        assert!(serde_json::from_str::<ScoreEntry>(r#"{"name":"","score":5}"#).is_err());
        assert!(serde_json::from_str::<ScoreEntry>(r#"{"name":"Bo","score":-1}"#).is_err());
    }
}
