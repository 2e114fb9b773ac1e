use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{Food, GameStatus, Position, Snake},
    timer::Timer,
};

/// What happened during one simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the snake ran into itself this tick
    pub died: bool,
}

/// Snake and food of the round being played
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub snake: Snake,
    pub food: Food,
}

/// The game: status machine, simulation timer and the current round
pub struct Game {
    config: GameConfig,
    status: GameStatus,
    round: Option<Round>,
    timer: Timer,
    score: usize,
    /// Cosmetic frame counter, advanced every frame while playing
    animation_frame: u64,
    rng: StdRng,
}

impl Game {
    /// Create a game at the intro screen
    ///
    /// `config` must have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a game whose food and start positions are reproducible
    ///
    /// `config` must have passed [`GameConfig::validate`].
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let timer = Timer::new(config.initial_tick_delay());
        Self {
            config,
            status: GameStatus::Intro,
            round: None,
            timer,
            score: 0,
            animation_frame: 0,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Snake and food, once the first round started
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn animation_frame(&self) -> u64 {
        self.animation_frame
    }

    /// Current delay between simulation ticks
    pub fn tick_delay(&self) -> Duration {
        self.timer.delay()
    }

    /// Ticks per second relative to the starting pace
    pub fn speed_multiplier(&self) -> f64 {
        self.timer.base_delay().as_secs_f64() / self.timer.delay().as_secs_f64()
    }

    /// Handle a player command
    pub fn apply(&mut self, action: Action) {
        match (action, self.status) {
            (Action::Move(direction), GameStatus::Playing) => self.turn(direction),
            (Action::Move(_), _) => {}
            (Action::Toggle | Action::Restart, GameStatus::Intro | GameStatus::GameOver) => {
                self.start_round()
            }
            (Action::Toggle, GameStatus::Playing) => {
                info!("Paused with score {}", self.score);
                self.status = GameStatus::Paused;
            }
            (Action::Toggle, GameStatus::Paused) => {
                info!("Resumed");
                self.status = GameStatus::Playing;
            }
            (Action::Restart, GameStatus::Playing | GameStatus::Paused) => {}
        }
    }

    fn turn(&mut self, direction: Direction) {
        if let Some(round) = self.round.as_mut()
            && round.snake.set_direction(direction)
        {
            debug!("Turned {:?}", direction);
        }
    }

    /// Throw away the current round and begin a fresh one
    pub fn start_round(&mut self) {
        let snake = self.spawn_snake();
        let food = match Food::spawn(
            &snake,
            self.config.grid_width,
            self.config.grid_height,
            &mut self.rng,
        ) {
            Some(food) => food,
            None => {
                warn!("No free cell for food at round start");
                Food::new(Position::new(-1, -1))
            }
        };

        info!(
            "Round started: head {:?}, food {:?}",
            snake.head(),
            food.position
        );

        self.round = Some(Round { snake, food });
        self.timer.reset();
        self.score = 0;
        self.animation_frame = 0;
        self.status = GameStatus::Playing;
    }

    /// Random head cell facing right, with room for the body to its left
    fn spawn_snake(&mut self) -> Snake {
        let length = self.config.initial_snake_length.max(1);
        let min_x = (length - 1).min(self.config.grid_width.saturating_sub(1));
        let x = self.rng.gen_range(min_x..self.config.grid_width) as i32;
        let y = self.rng.gen_range(0..self.config.grid_height) as i32;
        Snake::new(Position::new(x, y), Direction::Right, length)
    }

    /// Advance the game by one frame of `delta` elapsed time
    ///
    /// Returns the tick outcome when the timer fired.
    pub fn update(&mut self, delta: Duration) -> Option<StepInfo> {
        if self.status != GameStatus::Playing {
            return None;
        }

        self.animation_frame = self.animation_frame.wrapping_add(1);

        if !self.timer.tick(delta) {
            return None;
        }

        let info = self.run_tick()?;
        if info.died {
            info!("Game over with score {}", self.score);
            self.status = GameStatus::GameOver;
        }
        Some(info)
    }

    fn run_tick(&mut self) -> Option<StepInfo> {
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let round = self.round.as_mut()?;

        round.snake.step();
        round.snake.wrap_at_borders(width, height);
        round.snake.check_self_collision();

        let ate_food = round.snake.consumes(&round.food);
        if ate_food {
            if !round.food.relocate(&round.snake, width, height, &mut self.rng) {
                warn!("Grid is full, food stays at {:?}", round.food.position);
            }
            round.snake.grow();
            self.timer.speed_up(self.config.speed_up_factor);
            info!(
                "Ate food, length {}, next food {:?}, tick delay {:?}",
                round.snake.len(),
                round.food.position,
                self.timer.delay()
            );
        }

        self.score = round
            .snake
            .len()
            .saturating_sub(self.config.initial_snake_length);

        Some(StepInfo {
            ate_food,
            died: round.snake.is_dead(),
        })
    }
}
