use std::iter;

use blockfall_engine::GameStats;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

/// Score, level and cleared lines of the current round.
pub struct StatsDisplay<'a> {
    stats: &'a GameStats,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(stats: &'a GameStats) -> Self {
        Self { stats, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

type Value = fn(&GameStats) -> String;

const ROWS: &[(&str, Value)] = &[
    ("SCORE:", |stats| stats.score().to_string()),
    ("LEVEL:", |stats| stats.level().to_string()),
    ("LINES:", |stats| stats.lines_cleared().to_string()),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let row_areas = area.layout_vec(&Layout::vertical(
            ROWS.iter().map(|_| Constraint::Length(1)),
        ));
        for ((label, value), area) in iter::zip(ROWS, row_areas) {
            let [label_area, value_area] =
                area.layout(&Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]));
            Line::styled(*label, style::DEFAULT)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value(self.stats), style::DEFAULT)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
