use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Largest grid side; keeps every cell coordinate well inside `i32`
pub const MAX_GRID_SIDE: usize = 500;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Terminal columns used to draw one cell
    pub cell_width: u16,
    /// Initial length of the snake, head included
    pub initial_snake_length: usize,
    /// Delay between simulation ticks at the start of a round, in milliseconds
    pub initial_tick_delay_ms: u64,
    /// Multiplier applied to the tick delay each time food is eaten
    pub speed_up_factor: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            cell_width: 2,
            initial_snake_length: 6,
            initial_tick_delay_ms: 200,
            speed_up_factor: 0.95,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid with a short snake, for testing
    pub fn small() -> Self {
        Self {
            initial_snake_length: 3,
            ..Self::new(10, 10)
        }
    }

    pub fn initial_tick_delay(&self) -> Duration {
        Duration::from_millis(self.initial_tick_delay_ms)
    }

    /// Check that all values are in playable ranges
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= 5 && self.grid_height >= 5,
            "grid must be at least 5x5, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= MAX_GRID_SIDE && self.grid_height <= MAX_GRID_SIDE,
            "grid must be at most {}x{}, got {}x{}",
            MAX_GRID_SIDE,
            MAX_GRID_SIDE,
            self.grid_width,
            self.grid_height
        );
        ensure!(
            (1..=self.grid_width).contains(&self.initial_snake_length),
            "initial_snake_length must be between 1 and the grid width ({}), got {}",
            self.grid_width,
            self.initial_snake_length
        );
        ensure!(self.cell_width >= 1, "cell_width must be at least 1");
        ensure!(
            self.initial_tick_delay_ms > 0,
            "initial_tick_delay_ms must be positive"
        );
        ensure!(
            self.speed_up_factor > 0.0 && self.speed_up_factor <= 1.0,
            "speed_up_factor must be in (0, 1], got {}",
            self.speed_up_factor
        );
        Ok(())
    }

    /// Load a configuration from a JSON file and validate it
    ///
    /// Missing fields fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }
}
