//! Falling-block puzzle engine.
//!
//! A pure, single-threaded game-state engine: shape catalog, board, collision,
//! piece movement with wall kick, line clears, scoring and the round's phase
//! machine, plus the high-score ledger contract. Rendering, input and timers
//! belong to the host.

pub use self::{core::*, engine::*, ledger::*};

pub mod core;
pub mod engine;
pub mod ledger;
