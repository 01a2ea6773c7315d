use blockfall_engine::{Cell, MAX_SHAPE_SIZE, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::CellDisplay;

/// Preview of a single piece, trimmed to the rows and columns it occupies.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece(self, piece: Piece) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        MAX_SHAPE_SIZE as u16 * CellDisplay::WIDTH
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        MAX_SHAPE_SIZE as u16 * CellDisplay::HEIGHT
            + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Matrix rows and columns that hold at least one cell.
fn trimmed_grid(piece: &Piece) -> (Vec<usize>, Vec<usize>) {
    let matrix = piece.matrix();
    (
        matrix.occupied_rows().collect(),
        matrix.occupied_columns().collect(),
    )
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let (rows, columns) = trimmed_grid(&piece);
        let piece_area = area.centered(
            Constraint::Length(columns.len() as u16 * CellDisplay::WIDTH),
            Constraint::Length(rows.len() as u16 * CellDisplay::HEIGHT),
        );

        let horizontal = Layout::horizontal(
            columns
                .iter()
                .map(|_| Constraint::Length(CellDisplay::WIDTH)),
        )
        .flex(Flex::Center);
        let vertical =
            Layout::vertical(rows.iter().map(|_| Constraint::Length(CellDisplay::HEIGHT)));

        let filled = CellDisplay::from_cell(Cell::Filled(piece.color()), false);
        let empty = CellDisplay::from_cell(Cell::Empty, false);
        for (&y, grid_row) in rows.iter().zip(piece_area.layout_vec(&vertical)) {
            for (&x, grid_cell) in columns.iter().zip(grid_row.layout_vec(&horizontal)) {
                if piece.matrix().is_occupied(x, y) {
                    Widget::render(&filled, grid_cell, buf);
                } else {
                    Widget::render(&empty, grid_cell, buf);
                }
            }
        }
    }
}
