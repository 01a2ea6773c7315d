use super::{BOARD_HEIGHT, BOARD_WIDTH, board::Board, piece::Position, shape::ShapeMatrix};

/// Tests whether `shape` placed with its top-left corner at `offset` overlaps
/// the board edges or an already locked cell.
///
/// Cells below the bottom row or beyond the side walls collide. Cells above
/// row 0 never collide, so pieces can spawn and move while partly hidden
/// above the visible board.
///
/// ```
/// use blockfall_engine::{Board, Position, ShapeKind, collides};
///
/// let board = Board::EMPTY;
/// let matrix = ShapeKind::O.matrix();
/// assert!(!collides(&matrix, &board, Position::new(0, -1)));
/// assert!(collides(&matrix, &board, Position::new(-1, 0)));
/// assert!(collides(&matrix, &board, Position::new(0, 19)));
/// ```
#[must_use]
pub fn collides(shape: &ShapeMatrix, board: &Board, offset: Position) -> bool {
    shape.occupied_cells().any(|(dx, dy)| {
        let (x, y) = offset.translate(dx, dy);
        is_blocked(board, x, y)
    })
}

fn is_blocked(board: &Board, x: i32, y: i32) -> bool {
    let Ok(x) = usize::try_from(x) else {
        // Left of column 0.
        return true;
    };
    if x >= BOARD_WIDTH {
        return true;
    }
    let Ok(y) = usize::try_from(y) else {
        // Above the board: free.
        return false;
    };
    if y >= BOARD_HEIGHT {
        return true;
    }
    board.cell(x, y).is_some_and(|c| c.is_filled())
}
