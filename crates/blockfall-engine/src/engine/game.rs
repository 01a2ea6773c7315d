use std::{mem, time::Duration};

use rand::{SeedableRng as _, rngs::StdRng};
use tracing::{debug, info};

use crate::{
    core::{Board, Piece, random_shape},
    ledger::{PlayerName, ScoreLedger, ScoreStore},
};

use super::{
    controller::{Direction, PieceController},
    stats::GameStats,
};

/// Lifecycle phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, derive_more::Display)]
pub enum Phase {
    Running,
    Paused,
    Over,
}

/// What a single [`Game::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Advance {
    /// The round is not running; nothing changed.
    Idle,
    /// The active piece moved down one row.
    Descended,
    /// The active piece locked and the next piece took its place.
    Locked { cleared_rows: usize },
    /// The active piece was blocked before leaving the top row. The round is over.
    ToppedOut,
}

/// Read-only snapshot of a round, handed to the host for rendering.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    controller: PieceController,
    next_piece: Piece,
    stats: GameStats,
    phase: Phase,
}

impl GameState {
    fn new(rng: &mut StdRng) -> Self {
        let active = Piece::new(random_shape(rng));
        let next_piece = Piece::new(random_shape(rng));
        Self {
            board: Board::EMPTY,
            controller: PieceController::new(active),
            next_piece,
            stats: GameStats::new(),
            phase: Phase::Running,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        self.controller.piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.stats.lines_cleared()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

/// The round engine.
///
/// Drives one round from spawn to top-out: gravity ticks, player input,
/// locking, line clears, scoring and the `Running`/`Paused`/`Over` phase
/// machine. The engine never schedules anything itself; the host calls
/// [`advance`](Self::advance) at the cadence given by
/// [`gravity_interval`](Self::gravity_interval).
///
/// The engine is single-threaded and not reentrant: every call runs to
/// completion before the next one is made.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Advance, Game, Phase};
///
/// let mut game = Game::with_seed(42);
/// game.move_left();
/// game.rotate();
///
/// let mut outcome = game.advance();
/// while outcome.is_descended() {
///     outcome = game.advance();
/// }
/// assert!(matches!(outcome, Advance::Locked { .. }));
/// assert_eq!(game.state().phase(), Phase::Running);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    rng: StdRng,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Starts a round with shapes drawn from an OS-seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Starts a round with a fixed shape sequence, for tests and local replays.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Starts a running round on a prepared board with prior stats.
    ///
    /// Shapes are drawn exactly as for [`with_seed`](Self::with_seed), so the
    /// active and next piece match a fresh game with the same seed.
    #[must_use]
    pub fn from_snapshot(seed: u64, board: Board, stats: GameStats) -> Self {
        let mut game = Self::with_seed(seed);
        game.state.board = board;
        game.state.stats = stats;
        game
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let state = GameState::new(&mut rng);
        Self { state, rng }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Time the host should wait between two [`advance`](Self::advance) calls.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        self.state.stats.gravity_interval()
    }

    /// Applies one gravity step.
    ///
    /// Moves the active piece down if it can. If it cannot, the piece either
    /// locks (when it has left the top row) or the round ends without
    /// touching the board.
    pub fn advance(&mut self) -> Advance {
        if !self.state.phase.is_running() {
            return Advance::Idle;
        }

        let state = &mut self.state;
        if state.controller.soft_drop(&state.board) {
            return Advance::Descended;
        }

        if state.controller.piece().position().y < 1 {
            state.phase = Phase::Over;
            info!(
                score = state.stats.score(),
                lines = state.stats.lines_cleared(),
                "game over"
            );
            return Advance::ToppedOut;
        }

        let cleared_rows = self.lock_active_piece();
        Advance::Locked { cleared_rows }
    }

    /// Player soft drop. Same as a gravity tick.
    pub fn soft_drop(&mut self) -> Advance {
        self.advance()
    }

    pub fn move_left(&mut self) -> bool {
        self.move_horizontal(Direction::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_horizontal(Direction::Right)
    }

    /// Moves the active piece one column. Ignored outside `Running` or when blocked.
    pub fn move_horizontal(&mut self, direction: Direction) -> bool {
        if !self.state.phase.is_running() {
            return false;
        }
        let state = &mut self.state;
        state.controller.move_horizontal(&state.board, direction)
    }

    /// Rotates the active piece clockwise with wall kick. Ignored outside
    /// `Running` or when no kick position fits.
    pub fn rotate(&mut self) -> bool {
        if !self.state.phase.is_running() {
            return false;
        }
        let state = &mut self.state;
        state.controller.rotate(&state.board)
    }

    /// Switches between `Running` and `Paused`. No effect once the round is over.
    pub fn toggle_pause(&mut self) {
        let phase = match self.state.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Over => Phase::Over,
        };
        if phase != self.state.phase {
            debug!(from = %self.state.phase, to = %phase, "phase changed");
        }
        self.state.phase = phase;
    }

    /// Throws the current round away and starts a fresh one.
    pub fn restart(&mut self) {
        self.state = GameState::new(&mut self.rng);
        debug!("round restarted");
    }

    /// Records the finished round's score under `name` and starts a new round.
    ///
    /// Only valid once the round is over; returns `false` and does nothing
    /// otherwise. A zero score is not recorded, but the round still restarts.
    pub fn submit_score<S>(&mut self, ledger: &mut ScoreLedger<S>, name: &PlayerName) -> bool
    where
        S: ScoreStore,
    {
        if !self.state.phase.is_over() {
            return false;
        }
        ledger.save_score(name, self.state.stats.score());
        self.restart();
        true
    }

    fn lock_active_piece(&mut self) -> usize {
        let state = &mut self.state;
        let piece = *state.controller.piece();
        state.board.lock(&piece);
        let cleared_rows = state.board.clear_full_rows();

        let level_before = state.stats.level();
        state.stats.record_lock(cleared_rows);
        debug!(
            shape = %piece.kind(),
            x = piece.position().x,
            y = piece.position().y,
            cleared_rows,
            score = state.stats.score(),
            "piece locked"
        );
        if state.stats.level() != level_before {
            info!(level = state.stats.level(), "level up");
        }

        let upcoming = Piece::new(random_shape(&mut self.rng));
        let next = mem::replace(&mut state.next_piece, upcoming);
        state.controller = PieceController::new(next);
        cleared_rows
    }
}
