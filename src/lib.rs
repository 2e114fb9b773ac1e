//! Snake - a grid snake arcade game for the terminal
//!
//! This library provides:
//! - Core game logic: snake movement, food, timer and status machine (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive frame loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
