use blockfall_engine::{Advance, Game, Phase, ScoreLedger, ScoreStore};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tracing::debug;

use crate::{
    tui::{App, Runtime},
    view::{
        name_input::NameInput,
        widgets::{
            BoardDisplay, GameOverDialog, HighScoreDisplay, KeyBinding, KeyBindingDisplay,
            PieceDisplay, StatsDisplay, color, style,
        },
    },
};

const CONTROLS: &[KeyBinding] = &[
    ("←/→", "Move"),
    ("↑", "Rotate"),
    ("↓", "Soft drop"),
    ("P", "Pause"),
    ("Q", "Quit"),
];

/// The play screen: one [`Game`] plus the high-score table it submits to.
#[derive(Debug)]
pub struct PlayApp<S> {
    game: Game,
    ledger: ScoreLedger<S>,
    name_input: NameInput,
    is_exiting: bool,
}

impl<S> PlayApp<S>
where
    S: ScoreStore,
{
    pub fn new(game: Game, ledger: ScoreLedger<S>) -> Self {
        Self {
            game,
            ledger,
            name_input: NameInput::default(),
            is_exiting: false,
        }
    }

    /// Gravity runs only while the round is running, at the level's speed.
    fn sync_gravity(&self, runtime: &mut Runtime) {
        let state = self.game.state();
        let interval = state
            .phase()
            .is_running()
            .then(|| self.game.gravity_interval());
        runtime.set_gravity_interval(interval);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.is_exiting = true;
            return;
        }
        match self.game.state().phase() {
            Phase::Running | Phase::Paused => self.handle_play_key(key.code),
            Phase::Over => self.handle_dialog_key(key.code),
        }
    }

    fn handle_play_key(&mut self, code: KeyCode) {
        let is_running = self.game.state().phase().is_running();
        match code {
            KeyCode::Left if is_running => _ = self.game.move_left(),
            KeyCode::Right if is_running => _ = self.game.move_right(),
            KeyCode::Up if is_running => _ = self.game.rotate(),
            KeyCode::Down if is_running => {
                let advance = self.game.soft_drop();
                self.on_advance(advance);
            }
            KeyCode::Char('p' | 'P') => self.game.toggle_pause(),
            KeyCode::Char('q' | 'Q') => self.is_exiting = true,
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.name_input.push(c),
            KeyCode::Backspace => self.name_input.backspace(),
            KeyCode::Enter => {
                // A blank name keeps the dialog open.
                if let Ok(name) = self.name_input.player_name() {
                    self.game.submit_score(&mut self.ledger, &name);
                    self.name_input.clear();
                }
            }
            KeyCode::Esc => {
                self.game.restart();
                self.name_input.clear();
            }
            _ => {}
        }
    }

    fn on_advance(&self, advance: Advance) {
        match advance {
            Advance::ToppedOut => {
                let score = self.game.state().score();
                let qualifies = self.ledger.qualifies(score);
                debug!(score, qualifies, "showing game-over dialog");
            }
            Advance::Locked { cleared_rows } if cleared_rows > 0 => {
                debug!(cleared_rows, "rows cleared");
            }
            Advance::Idle | Advance::Descended | Advance::Locked { .. } => {}
        }
    }

    fn render_screen(&self, area: Rect, buf: &mut Buffer) {
        let state = self.game.state();
        let border_style = match state.phase() {
            Phase::Running => color::WHITE,
            Phase::Paused => color::YELLOW,
            Phase::Over => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let board = BoardDisplay::new(state.board())
            .active_piece(*state.active_piece())
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let next = PieceDisplay::new()
            .piece(*state.next_piece())
            .block(panel("NEXT"));
        let stats = StatsDisplay::new(state.stats()).block(panel("STATS"));
        let controls = KeyBindingDisplay::new(CONTROLS).block(panel("CONTROLS"));
        let high_scores = HighScoreDisplay::new(self.ledger.scores()).block(panel("HIGH SCORES"));

        let side_width = [
            next.width(),
            stats.width(),
            controls.width(),
            high_scores.width(),
        ]
        .into_iter()
        .max()
        .unwrap_or_default();

        let [board_column, side_column] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(side_width),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(board_column);
        let [stats_area, next_area, controls_area, high_scores_area] = Layout::vertical([
            Constraint::Length(stats.height()),
            Constraint::Length(next.height()),
            Constraint::Length(controls.height()),
            Constraint::Length(high_scores.height()),
        ])
        .areas(side_column);

        let board_width = board.width();
        board.render(board_area, buf);
        stats.render(stats_area, buf);
        next.render(next_area, buf);
        controls.render(controls_area, buf);
        high_scores.render(high_scores_area, buf);

        match state.phase() {
            Phase::Running => {}
            Phase::Paused => {
                let area = board_area.centered(
                    Constraint::Length(board_width),
                    Constraint::Length(3),
                );
                let block = Block::new().style(style::PAUSED);
                let inner = block.inner(area);
                Clear.render(area, buf);
                block.render(area, buf);
                Text::styled("PAUSED", style::PAUSED)
                    .centered()
                    .render(inner.centered_vertically(Constraint::Length(1)), buf);
            }
            Phase::Over => {
                let area = area.centered(
                    Constraint::Length(GameOverDialog::width()),
                    Constraint::Length(GameOverDialog::height()),
                );
                let qualifies = self.ledger.qualifies(state.score());
                GameOverDialog::new(state.score(), self.name_input.as_str(), qualifies)
                    .render(area, buf);
            }
        }
    }
}

impl<S> App for PlayApp<S>
where
    S: ScoreStore,
{
    fn init(&mut self, runtime: &mut Runtime) {
        self.sync_gravity(runtime);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key);
        }
        self.sync_gravity(runtime);
    }

    fn draw(&self, frame: &mut Frame) {
        self.render_screen(frame.area(), frame.buffer_mut());
    }

    fn on_gravity(&mut self, runtime: &mut Runtime) {
        let advance = self.game.advance();
        self.on_advance(advance);
        self.sync_gravity(runtime);
    }
}
