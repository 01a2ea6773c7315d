use super::{
    BOARD_WIDTH,
    board::Board,
    collision::collides,
    shape::{Color, Shape, ShapeKind, ShapeMatrix},
};

/// Top-left offset of a piece's matrix in board coordinates.
///
/// Signed: a piece may sit above row 0, and a matrix with empty margins may
/// hang past the left wall while its occupied cells stay on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Where every new piece appears: centered-left on the top row.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN: Self = Self::new((BOARD_WIDTH / 2) as i32 - 1, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn shifted(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Converts a local matrix cell into absolute board coordinates.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub(crate) fn translate(self, dx: usize, dy: usize) -> (i32, i32) {
        // Local offsets are bounded by MAX_SHAPE_SIZE.
        (self.x + dx as i32, self.y + dy as i32)
    }
}

/// The falling piece: a private copy of a catalog shape plus its placement.
///
/// `Piece` is a plain value. Movement and rotation return new pieces and leave
/// the original untouched; the catalog entry it was created from is never
/// mutated.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, Position, ShapeKind};
///
/// let board = Board::EMPTY;
/// let piece = Piece::new(ShapeKind::T.shape());
/// assert_eq!(piece.position(), Position::SPAWN);
///
/// let moved = piece.try_shift(&board, 1, 0).unwrap();
/// assert_eq!(moved.position(), Position::new(5, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    color: Color,
    matrix: ShapeMatrix,
    position: Position,
}

impl Piece {
    /// Creates a piece at the spawn position in the shape's catalog orientation.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            kind: shape.kind,
            color: shape.color,
            matrix: shape.matrix,
            position: Position::SPAWN,
        }
    }

    #[must_use]
    pub fn with_position(self, position: Position) -> Self {
        Self { position, ..self }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Iterates over the absolute board coordinates covered by the piece.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix
            .occupied_cells()
            .map(|(dx, dy)| self.position.translate(dx, dy))
    }

    #[must_use]
    pub fn collides(&self, board: &Board) -> bool {
        collides(&self.matrix, board, self.position)
    }

    /// Returns the piece moved by `(dx, dy)` without any collision check.
    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        self.with_position(self.position.shifted(dx, dy))
    }

    /// Returns the piece moved by `(dx, dy)`, or `None` if it would collide.
    #[must_use]
    pub fn try_shift(&self, board: &Board, dx: i32, dy: i32) -> Option<Self> {
        let moved = self.shifted(dx, dy);
        (!moved.collides(board)).then_some(moved)
    }

    /// Returns the piece rotated 90° clockwise in place, without any check.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            matrix: self.matrix.rotated_clockwise(),
            ..*self
        }
    }

    /// Rotates clockwise with a minimal wall kick.
    ///
    /// Tries the rotated matrix at the current position, then one column to the
    /// right, then one column to the left. Returns `None` if all three collide.
    ///
    /// Only horizontal offsets are tried; there is no per-shape kick table.
    #[must_use]
    pub fn kicked_rotation(&self, board: &Board) -> Option<Self> {
        let rotated = self.rotated();
        [0, 1, -1]
            .into_iter()
            .find_map(|dx| rotated.try_shift(board, dx, 0))
    }
}
