use blockfall_engine::{MAX_HIGH_SCORES, ScoreEntry};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

/// The persisted high-score table, best first.
pub struct HighScoreDisplay<'a> {
    entries: &'a [ScoreEntry],
    block: Option<BlockWidget<'a>>,
}

impl<'a> HighScoreDisplay<'a> {
    pub fn new(entries: &'a [ScoreEntry]) -> Self {
        Self {
            entries,
            block: None,
        }
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
        MAX_HIGH_SCORES as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for HighScoreDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        if self.entries.is_empty() {
            Line::styled("No scores yet!", style::DIM)
                .centered()
                .render(area, buf);
            return;
        }

        let row_areas = area.layout_vec(&Layout::vertical(
            self.entries.iter().map(|_| Constraint::Length(1)),
        ));
        for (rank, (entry, area)) in self.entries.iter().zip(row_areas).enumerate() {
            let [name_area, score_area] =
                area.layout(&Layout::horizontal([Constraint::Fill(1), Constraint::Length(7)]));
            Line::styled(format!("{}. {}", rank + 1, entry.name()), style::DEFAULT)
                .left_aligned()
                .render(name_area, buf);
            Line::styled(entry.score().to_string(), style::HIGHLIGHT)
                .right_aligned()
                .render(score_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PlayerName;

    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_empty_table_message() {
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        HighScoreDisplay::new(&[]).render(area, &mut buf);
        assert!(row_text(&buf, 0).contains("No scores yet!"));
    }

    #[test]
    fn test_entries_ranked() {
        let entries = [
            ScoreEntry::new(PlayerName::new("Ann").unwrap(), 120),
            ScoreEntry::new(PlayerName::new("Bo").unwrap(), 45),
        ];
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        HighScoreDisplay::new(&entries).render(area, &mut buf);

        let first = row_text(&buf, 0);
        assert!(first.starts_with("1. Ann"));
        assert!(first.trim_end().ends_with("120"));
        assert!(row_text(&buf, 1).starts_with("2. Bo"));
        assert!(row_text(&buf, 2).trim().is_empty());
    }
}
