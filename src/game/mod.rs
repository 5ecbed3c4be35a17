//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The driver feeds it direction requests and ticks; it answers with state and events.

pub mod clock;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod input_buffer;
pub mod state;

// Re-export commonly used types
pub use clock::TickClock;
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, GameEvent, StepInfo, StepResult};
pub use food::FoodPlacer;
pub use input_buffer::DirectionBuffer;
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
