use crate::core::{Board, Piece};

/// Horizontal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub const fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Owns the active piece and applies player and gravity movement to it.
///
/// Every operation consults the board before changing anything. A blocked
/// move leaves the piece exactly where it was and reports `false`; that is a
/// normal outcome, not an error.
#[derive(Debug, Clone)]
pub struct PieceController {
    piece: Piece,
}

impl PieceController {
    #[must_use]
    pub fn new(piece: Piece) -> Self {
        Self { piece }
    }

    #[must_use]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn move_horizontal(&mut self, board: &Board, direction: Direction) -> bool {
        self.apply(self.piece.try_shift(board, direction.dx(), 0))
    }

    pub fn soft_drop(&mut self, board: &Board) -> bool {
        self.apply(self.piece.try_shift(board, 0, 1))
    }

    pub fn rotate(&mut self, board: &Board) -> bool {
        self.apply(self.piece.kicked_rotation(board))
    }

    #[must_use]
    pub fn can_descend(&self, board: &Board) -> bool {
        self.piece.try_shift(board, 0, 1).is_some()
    }

    fn apply(&mut self, piece: Option<Piece>) -> bool {
        let Some(piece) = piece else {
            return false;
        };
        self.piece = piece;
        true
    }
}
