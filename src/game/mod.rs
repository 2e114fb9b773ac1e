//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The front end drives it by calling [`Game::update`] once per frame.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;
pub mod timer;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{Game, Round, StepInfo};
pub use state::{Food, GameStatus, Position, Snake};
pub use timer::Timer;
