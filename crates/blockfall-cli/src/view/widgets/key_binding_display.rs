use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use super::color;

pub type KeyBinding<'a> = (&'a str, &'a str);

/// One key binding per line: the key on the left, what it does on the right.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self {
            bindings,
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
        self.bindings.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

const KEY_STYLE: Style = Style::new().fg(color::CYAN);
const DESCRIPTION_STYLE: Style = Style::new().fg(color::WHITE);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        for (&(key, desc), y) in self.bindings.iter().zip(area.top()..area.bottom()) {
            let line = Line::from(vec![
                Span::styled(format!("{key:<6}"), KEY_STYLE),
                Span::styled(desc, DESCRIPTION_STYLE),
            ]);
            line.render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}
