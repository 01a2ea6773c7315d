use super::{BOARD_HEIGHT, BOARD_WIDTH, piece::Piece, shape::Color};

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Locked block, colored after the piece that left it.
    Filled(Color),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

/// One board row. The width is part of the type, so no row can ever be short.
pub type Row = [Cell; BOARD_WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; BOARD_WIDTH];

/// The grid of locked cells.
///
/// Row 0 is the top of the visible board and `BOARD_HEIGHT - 1` the bottom.
/// Both dimensions are fixed at compile time.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, BOARD_HEIGHT};
///
/// let board = Board::EMPTY;
/// assert!(!board.is_row_full(BOARD_HEIGHT - 1));
/// assert_eq!(board.occupied_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    #[must_use]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Overwrites the cell at `(x, y)`. Coordinates outside the grid are ignored.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Returns whether every cell of row `y` is filled.
    ///
    /// Rows outside the grid are never full.
    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|c| c.is_filled()))
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|c| c.is_filled())
            .count()
    }

    /// Writes the piece's cells into the board with the piece's color.
    ///
    /// The caller must have checked that the piece does not collide. Cells that
    /// are still above the top edge have nowhere to go and are dropped.
    pub fn lock(&mut self, piece: &Piece) {
        let cell = Cell::Filled(piece.color());
        for (x, y) in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            self.set_cell(x, y, cell);
        }
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows above a removed row shift down and the same number of empty rows
    /// is inserted at the top, so the board keeps exactly `BOARD_HEIGHT` rows.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{piece::Position, shape::ShapeKind};

    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..BOARD_WIDTH {
            board.set_cell(x, y, Cell::Filled(RED));
        }
    }

    #[test]
    fn test_empty_board() {
        let board = Board::empty();
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
        for row in board.rows() {
            assert_eq!(row.len(), BOARD_WIDTH);
            assert!(row.iter().all(|c| c.is_empty()));
        }
    }

    #[test]
    fn test_cell_out_of_range() {
        let board = Board::empty();
        assert_eq!(board.cell(BOARD_WIDTH, 0), None);
        assert_eq!(board.cell(0, BOARD_HEIGHT), None);
        assert_eq!(board.cell(0, 0), Some(Cell::Empty));
    }

    #[test]
    fn test_is_row_full() {
        let mut board = Board::empty();
        for x in 0..BOARD_WIDTH - 1 {
            board.set_cell(x, 5, Cell::Filled(RED));
        }
        assert!(!board.is_row_full(5));
        board.set_cell(BOARD_WIDTH - 1, 5, Cell::Filled(RED));
        assert!(board.is_row_full(5));
        assert!(!board.is_row_full(BOARD_HEIGHT));
    }

    #[test]
    fn test_lock_writes_piece_color() {
        let mut board = Board::empty();
        let piece = Piece::new(ShapeKind::T.shape()).with_position(Position::new(3, 10));
        board.lock(&piece);

        for (x, y) in piece.occupied_positions() {
            let cell = board.cell(x.try_into().unwrap(), y.try_into().unwrap());
            assert_eq!(cell, Some(Cell::Filled(ShapeKind::T.color())));
        }
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_lock_skips_cells_above_top() {
        let mut board = Board::empty();
        // Vertical I-shape with its top two cells above row 0.
        let piece = Piece::new(ShapeKind::I.shape()).with_position(Position::new(0, -2));
        board.lock(&piece);
        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.cell(1, 0), Some(Cell::Filled(ShapeKind::I.color())));
        assert_eq!(board.cell(1, 1), Some(Cell::Filled(ShapeKind::I.color())));
    }

    #[test]
    fn test_clear_full_rows_bottom() {
        let mut board = Board::empty();
        fill_row(&mut board, BOARD_HEIGHT - 1);
        board.set_cell(0, BOARD_HEIGHT - 2, Cell::Filled(RED));

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
        // The partial row above slid down into the cleared slot.
        assert_eq!(board.cell(0, BOARD_HEIGHT - 1), Some(Cell::Filled(RED)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_clear_full_rows_non_adjacent() {
        let mut board = Board::empty();
        fill_row(&mut board, 19);
        fill_row(&mut board, 17);
        board.set_cell(4, 18, Cell::Filled(RED));
        board.set_cell(6, 16, Cell::Filled(RED));

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.cell(4, 19), Some(Cell::Filled(RED)));
        assert_eq!(board.cell(6, 18), Some(Cell::Filled(RED)));
        assert_eq!(board.occupied_count(), 2);
        assert!(board.rows().take(18).flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_clear_full_rows_none() {
        let mut board = Board::empty();
        board.set_cell(0, 19, Cell::Filled(RED));
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_full_rows_all() {
        let mut board = Board::empty();
        for y in 0..BOARD_HEIGHT {
            fill_row(&mut board, y);
        }
        assert_eq!(board.clear_full_rows(), BOARD_HEIGHT);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_clear_preserves_cells_outside_cleared_rows() {
        let mut board = Board::empty();
        fill_row(&mut board, 19);
        fill_row(&mut board, 12);
        for (x, y) in [(0, 3), (9, 8), (5, 15), (2, 18)] {
            board.set_cell(x, y, Cell::Filled(RED));
        }
        let outside = board.occupied_count() - 2 * BOARD_WIDTH;

        let removed = board.clear_full_rows();
        assert_eq!(removed, 2);
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
        assert_eq!(board.occupied_count(), outside);
    }
}
