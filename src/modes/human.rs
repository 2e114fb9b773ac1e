use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Game, GameConfig, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Frame pacing of the terminal loop (~60 FPS); the game's own timer decides
/// when the snake moves
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct HumanMode {
    game: Game,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        config.validate().context("Invalid game config")?;

        let game = match seed {
            Some(seed) => Game::with_seed(config, seed),
            None => Game::new(config),
        };

        Ok(Self {
            game,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(FRAME_INTERVAL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Advance and draw one frame
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    self.on_frame(now - last_frame);
                    last_frame = now;

                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(action) => {
                    let was_live = self.game.status().is_live();
                    self.game.apply(action);
                    if !was_live && self.game.status() == GameStatus::Playing {
                        self.metrics.on_round_start();
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn on_frame(&mut self, delta: Duration) {
        self.metrics
            .record_frame(delta, self.game.status() == GameStatus::Playing);

        if let Some(step) = self.game.update(delta)
            && step.died
        {
            self.metrics.on_game_over(self.game.score());
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::small(), Some(9)).unwrap();
        assert_eq!(mode.game.status(), GameStatus::Intro);
        assert_eq!(mode.game.score(), 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_space_starts_and_pauses() {
        let mut mode = HumanMode::new(GameConfig::small(), Some(9)).unwrap();

        mode.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(mode.game.status(), GameStatus::Playing);

        mode.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(mode.game.status(), GameStatus::Paused);
    }

    #[test]
    fn test_paused_frames_keep_clock_still() {
        let mut mode = HumanMode::new(GameConfig::small(), Some(9)).unwrap();
        mode.handle_event(key(KeyCode::Enter));

        mode.on_frame(Duration::from_millis(50));
        assert_eq!(mode.metrics.play_time, Duration::from_millis(50));

        mode.handle_event(key(KeyCode::Char('p')));
        mode.on_frame(Duration::from_secs(3));
        assert_eq!(mode.metrics.play_time, Duration::from_millis(50));
    }

    #[test]
    fn test_frames_advance_snake_without_ending_round() {
        let mut mode = HumanMode::new(GameConfig::small(), Some(9)).unwrap();
        mode.handle_event(key(KeyCode::Char(' ')));
        let start = mode.game.round().unwrap().snake.head();

        // A three-cell snake running straight cannot hit itself
        let delay = mode.game.tick_delay();
        mode.on_frame(delay);
        assert_ne!(mode.game.round().unwrap().snake.head(), start);

        for _ in 0..9 {
            mode.on_frame(delay);
        }
        assert_eq!(mode.metrics.rounds_played, 0);
        assert_eq!(mode.game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_rejects_unplayable_config() {
        let flat = GameConfig {
            grid_height: 0,
            ..GameConfig::small()
        };
        assert!(HumanMode::new(flat, Some(9)).is_err());
        assert!(HumanMode::new(GameConfig::new(usize::MAX, 10), None).is_err());
    }

    #[test]
    fn test_quit_key() {
        let mut mode = HumanMode::new(GameConfig::small(), Some(9)).unwrap();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut mode = HumanMode::new(GameConfig::small(), Some(9)).unwrap();
        let mut release = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        mode.handle_event(Event::Key(release));
        assert_eq!(mode.game.status(), GameStatus::Intro);
    }
}
