//! Round logic built on top of the [`core`](crate::core) data structures.
//!
//! - [`PieceController`] - moves, drops and rotates the active piece against the board
//! - [`GameStats`] - score, cleared rows, derived level and gravity interval
//! - [`Game`] - the round engine: tick, lock, clear, score, spawn, top-out
//! - [`GameState`] - read-only view of a round for the host
//!
//! # Round Flow
//!
//! 1. [`Game::new`] spawns an active piece and previews the next one
//! 2. The host calls [`Game::advance`] every [`Game::gravity_interval`] and
//!    forwards input ([`Game::move_left`], [`Game::move_right`], [`Game::rotate`],
//!    [`Game::soft_drop`], [`Game::toggle_pause`])
//! 3. A piece that cannot descend locks, full rows are cleared (5 points each)
//!    and the next piece takes over
//! 4. A piece that cannot descend before leaving the top row ends the round
//! 5. [`Game::submit_score`] or [`Game::restart`] starts over
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Game, Phase};
//!
//! let mut game = Game::with_seed(7);
//! while game.state().phase() == Phase::Running {
//!     game.advance();
//! }
//! assert_eq!(game.state().phase(), Phase::Over);
//! ```

pub use self::{controller::*, game::*, stats::*};

mod controller;
mod game;
mod stats;
