//! Heart Snake - the classic grid snake game for the terminal
//!
//! This library provides:
//! - Core game logic: state, tick update, food placement, input buffering (game module)
//! - Durable high score (storage module)
//! - Key, swipe and control-pad input translation (input module)
//! - TUI rendering (render module)
//! - The interactive frame loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
