pub use self::{board::*, collision::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod collision;
pub(crate) mod piece;
pub(crate) mod shape;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;
