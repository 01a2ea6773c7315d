use std::time::Duration;

/// Points awarded per cleared row.
pub const SCORE_PER_ROW: usize = 5;

/// Score needed to advance one level.
pub const POINTS_PER_LEVEL: usize = 100;

const BASE_GRAVITY_MILLIS: u64 = 1000;
const GRAVITY_STEP_MILLIS: u64 = 50;
const MIN_GRAVITY_MILLIS: u64 = 100;

/// Returns the time between gravity ticks at `level`.
///
/// `max(100, 1000 - (level - 1) * 50)` milliseconds: one second at level 1,
/// bottoming out at 100 ms from level 19 on.
///
/// ```
/// use std::time::Duration;
/// use blockfall_engine::gravity_interval;
///
/// assert_eq!(gravity_interval(1), Duration::from_millis(1000));
/// assert_eq!(gravity_interval(3), Duration::from_millis(900));
/// assert_eq!(gravity_interval(40), Duration::from_millis(100));
/// ```
#[must_use]
pub fn gravity_interval(level: usize) -> Duration {
    let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
    let millis = BASE_GRAVITY_MILLIS
        .saturating_sub(steps.saturating_mul(GRAVITY_STEP_MILLIS))
        .max(MIN_GRAVITY_MILLIS);
    Duration::from_millis(millis)
}

/// Score, cleared rows and lock count for one round.
///
/// The level is not stored: it is derived from the score on every read, so
/// score and level can never disagree.
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_lock(2);
///
/// assert_eq!(stats.score(), 10);
/// assert_eq!(stats.lines_cleared(), 2);
/// assert_eq!(stats.level(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    lines_cleared: usize,
    locked_pieces: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            lines_cleared: 0,
            locked_pieces: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    /// `floor(score / 100) + 1`.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.score / POINTS_PER_LEVEL + 1
    }

    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        gravity_interval(self.level())
    }

    /// Accounts for one locked piece that cleared `cleared_rows` rows.
    pub const fn record_lock(&mut self, cleared_rows: usize) {
        self.locked_pieces += 1;
        self.lines_cleared += cleared_rows;
        self.score += cleared_rows * SCORE_PER_ROW;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.lines_cleared(), 0);
        assert_eq!(stats.locked_pieces(), 0);
        assert_eq!(stats.level(), 1);
    }

    #[test]
    fn test_level_curve() {
        let mut stats = GameStats::new();
        for _ in 0..19 {
            stats.record_lock(1);
        }
        assert_eq!(stats.score(), 95);
        assert_eq!(stats.level(), 1);

        stats.record_lock(1);
        assert_eq!(stats.score(), 100);
        assert_eq!(stats.level(), 2);

        stats.record_lock(4);
        assert_eq!(stats.score(), 120);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.lines_cleared(), 24);
        assert_eq!(stats.locked_pieces(), 21);
    }

    #[test]
    fn test_lock_without_clear() {
        let mut stats = GameStats::new();
        stats.record_lock(0);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.locked_pieces(), 1);
    }

    #[test]
    fn test_gravity_interval() {
        assert_eq!(gravity_interval(0), Duration::from_millis(1000));
        assert_eq!(gravity_interval(1), Duration::from_millis(1000));
        assert_eq!(gravity_interval(2), Duration::from_millis(950));
        assert_eq!(gravity_interval(18), Duration::from_millis(150));
        assert_eq!(gravity_interval(19), Duration::from_millis(100));
        assert_eq!(gravity_interval(20), Duration::from_millis(100));
        assert_eq!(gravity_interval(usize::MAX), Duration::from_millis(100));
    }
}
