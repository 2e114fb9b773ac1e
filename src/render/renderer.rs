use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Game, GameStatus, Position, Round};
use crate::metrics::GameMetrics;

/// Frames each food glyph stays on screen before swapping
const FOOD_BLINK_FRAMES: u64 = 15;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, game: &Game, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(game, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = chunks[1];

        match (game.status(), game.round()) {
            (GameStatus::Intro, _) | (_, None) => {
                let intro = self.render_intro(game);
                frame.render_widget(intro, centered(game_area, 44, 9));
            }
            (GameStatus::GameOver, Some(_)) => {
                let game_over = self.render_game_over(game, metrics);
                frame.render_widget(game_over, centered(game_area, 44, 9));
            }
            (status, Some(round)) => {
                let grid = self.render_grid(game, round);
                frame.render_widget(grid, game_area);

                if status == GameStatus::Paused {
                    let banner_area = centered(game_area, 30, 5);
                    frame.render_widget(Clear, banner_area);
                    frame.render_widget(self.render_paused(), banner_area);
                }
            }
        }

        let controls = self.render_controls(game.status());
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, game: &Game, round: &Round) -> Paragraph<'_> {
        let config = game.config();
        let width = config.cell_width as usize;
        let food_glyph = if (game.animation_frame() / FOOD_BLINK_FRAMES) % 2 == 0 {
            "●"
        } else {
            "○"
        };

        let mut lines = Vec::with_capacity(config.grid_height);

        for y in 0..config.grid_height {
            let mut spans = Vec::with_capacity(config.grid_width);

            for x in 0..config.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let (glyph, style) = if pos == round.snake.head() {
                    (
                        "■",
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if round.snake.collides_with_body(pos) {
                    ("□", Style::default().fg(Color::Green))
                } else if pos == round.food.position {
                    (
                        food_glyph,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    (".", Style::default().fg(Color::DarkGray))
                };

                spans.push(Span::styled(format!("{:<width$}", glyph), style));
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, game: &Game, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(game.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("x{:.2}", game.speed_multiplier()), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_intro(&self, game: &Game) -> Paragraph<'_> {
        let config = game.config();
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "{}x{} grid, edges wrap around",
                config.grid_width, config.grid_height
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_paused(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Space to resume",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, game: &Game, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    game.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  (best {})", metrics.high_score),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, status: GameStatus) -> Paragraph<'_> {
        let toggle = match status {
            GameStatus::Intro => " to start | ",
            GameStatus::Playing => " to pause | ",
            GameStatus::Paused => " to resume | ",
            GameStatus::GameOver => " to restart | ",
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(toggle),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` box in the middle of `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, GameConfig};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(game: &Game) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, game, &metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_intro_banner() {
        let game = Game::with_seed(GameConfig::small(), 3);
        let screen = draw(&game);
        assert!(screen.contains("S N A K E"));
        assert!(screen.contains("to start"));
    }

    #[test]
    fn test_playing_shows_snake() {
        let mut game = Game::with_seed(GameConfig::small(), 3);
        game.apply(Action::Toggle);
        let screen = draw(&game);
        assert!(screen.contains("■"));
        assert!(screen.contains("□"));
        assert!(screen.contains("●"));
    }

    #[test]
    fn test_paused_banner() {
        let mut game = Game::with_seed(GameConfig::small(), 3);
        game.apply(Action::Toggle);
        game.apply(Action::Toggle);
        let screen = draw(&game);
        assert!(screen.contains("PAUSED"));
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 20, 6);
        let inner = centered(area, 44, 9);
        assert_eq!(inner.width, 20);
        assert_eq!(inner.height, 6);

        let small = centered(Rect::new(0, 0, 40, 20), 10, 4);
        assert_eq!(small, Rect::new(15, 8, 10, 4));
    }
}
