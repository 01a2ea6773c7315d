use blockfall_engine::MAX_NAME_LEN;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block as BlockWidget, Clear, Padding, Widget},
};

use super::style;

/// Modal shown when a round ends: final score, whether it makes the
/// high-score table, the name being typed, and what Enter and Esc do.
#[derive(Debug)]
pub struct GameOverDialog<'a> {
    score: usize,
    name: &'a str,
    qualifies: bool,
    can_save: bool,
}

impl<'a> GameOverDialog<'a> {
    /// `qualifies` tells whether `score` would enter the high-score table.
    pub fn new(score: usize, name: &'a str, qualifies: bool) -> Self {
        Self {
            score,
            name,
            qualifies,
            can_save: qualifies && !name.trim().is_empty(),
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width() -> u16 {
        // "Name: " plus the longest name plus the cursor, inside border and padding.
        (MAX_NAME_LEN as u16 + 7).max(24) + 4
    }

    pub fn height() -> u16 {
        8
    }
}

impl Widget for GameOverDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = BlockWidget::bordered()
            .title(Line::from(" GAME OVER ").centered())
            .padding(Padding::horizontal(1))
            .border_style(style::GAME_OVER)
            .style(style::DEFAULT);
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);

        let [score_area, rank_area, name_area, _, save_area, again_area] =
            inner.layout(&Layout::vertical([Constraint::Length(1); 6]));

        Line::from(vec![
            Span::styled("Your Score: ", style::DEFAULT),
            Span::styled(self.score.to_string(), style::HIGHLIGHT),
        ])
        .centered()
        .render(score_area, buf);

        let (rank_text, rank_style) = if self.qualifies {
            ("New high score!", style::HIGHLIGHT)
        } else {
            ("Not a high score", style::DIM)
        };
        Line::styled(rank_text, rank_style)
            .centered()
            .render(rank_area, buf);

        Line::from(vec![
            Span::styled("Name: ", style::DEFAULT),
            Span::styled(self.name, style::HIGHLIGHT),
            Span::styled("_", style::DIM),
        ])
        .render(name_area, buf);

        let save_style = if self.can_save {
            style::DEFAULT
        } else {
            style::DIM
        };
        Line::styled("Enter: Save Score", save_style)
            .centered()
            .render(save_area, buf);
        Line::styled("Esc: Play Again", style::DEFAULT)
            .centered()
            .render(again_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_dialog_contents() {
        let area = Rect::new(0, 0, GameOverDialog::width(), GameOverDialog::height());
        let mut buf = Buffer::empty(area);
        GameOverDialog::new(135, "Ann", true).render(area, &mut buf);

        let text = text(&buf);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Your Score: 135"));
        assert!(text.contains("New high score!"));
        assert!(text.contains("Name: Ann_"));
        assert!(text.contains("Enter: Save Score"));
        assert!(text.contains("Esc: Play Again"));
    }

    #[test]
    fn test_blank_name_cannot_save() {
        assert!(!GameOverDialog::new(10, "   ", true).can_save);
        assert!(GameOverDialog::new(10, " x ", true).can_save);
    }

    #[test]
    fn test_score_outside_table() {
        let dialog = GameOverDialog::new(0, "Ann", false);
        assert!(!dialog.can_save);

        let area = Rect::new(0, 0, GameOverDialog::width(), GameOverDialog::height());
        let mut buf = Buffer::empty(area);
        dialog.render(area, &mut buf);
        assert!(text(&buf).contains("Not a high score"));
    }
}
