use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{direction::Direction, state::Position};

/// Largest grid side; two terminal columns per cell must still fit in a `u16`
pub const MAX_GRID_SIZE: usize = 255;

/// Configuration for the game
///
/// Every field has a default, so a JSON file only needs to name the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,

    /// Cell of the single starting segment
    pub initial_head: Position,
    /// Where the first food appears
    pub initial_food: Position,
    /// Heading at the start of every game
    pub initial_direction: Direction,

    /// Points awarded per food
    pub score_increment: u32,
    /// Tick interval at the start of every game
    pub initial_tick_interval_ms: u64,
    /// The tick interval never drops below this
    pub min_tick_interval_ms: u64,
    /// How much faster the game gets with every food eaten
    pub speed_step_ms: u64,

    /// Random draws before food placement falls back to enumerating free cells
    pub max_food_attempts: u32,
    /// Minimum drag distance, in terminal cells, for a swipe to count
    pub swipe_threshold: u16,
    /// Render cadence of the frame loop
    pub frame_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
            initial_head: Position::new(10, 10),
            initial_food: Position::new(15, 15),
            initial_direction: Direction::Right,
            score_increment: 10,
            initial_tick_interval_ms: 100,
            min_tick_interval_ms: 60,
            speed_step_ms: 2,
            max_food_attempts: 1024,
            swipe_threshold: 2,
            frame_interval_ms: 16,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    ///
    /// The starting cells keep their default offsets when they fit, and are
    /// pulled inside the grid otherwise.
    pub fn new(width: usize, height: usize) -> Self {
        Self::default().with_grid(width, height)
    }

    /// Create a small grid for testing
    #[cfg(test)]
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Resize the grid, clamping the starting cells into it
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self.clamp_head();
        self.clamp_food();
        self
    }

    /// Parse a JSON configuration.
    ///
    /// Starting cells the document leaves out are pulled inside its grid;
    /// ones it names are kept as given and checked by [`GameConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).context("Failed to parse game config")?;
        let has_head = value.get("initial_head").is_some();
        let has_food = value.get("initial_food").is_some();

        let mut config: GameConfig =
            serde_json::from_value(value).context("Failed to deserialize game config")?;
        if !has_head {
            config.clamp_head();
        }
        if !has_food {
            config.clamp_food();
        }

        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_json_str(&json)
    }

    fn clamp_head(&mut self) {
        if !self.contains(self.initial_head) {
            self.initial_head = Position::new(
                (self.grid_width / 2) as i32,
                (self.grid_height / 2) as i32,
            );
        }
    }

    /// Next to the head when the current food cell does not fit
    fn clamp_food(&mut self) {
        if self.contains(self.initial_food) && self.initial_food != self.initial_head {
            return;
        }
        let head = self.initial_head;
        let x = if ((head.x + 1) as usize) < self.grid_width {
            head.x + 1
        } else {
            head.x - 1
        };
        self.initial_food = Position::new(x, head.y);
    }

    fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.grid_width
            && (pos.y as usize) < self.grid_height
    }

    /// Validate configuration parameters
    ///
    /// Returns `Err` with a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(format!(
                "grid must be at least 2x2, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.grid_width > MAX_GRID_SIZE || self.grid_height > MAX_GRID_SIZE {
            return Err(format!(
                "grid must be at most {}x{}, got {}x{}",
                MAX_GRID_SIZE, MAX_GRID_SIZE, self.grid_width, self.grid_height
            ));
        }

        if !self.contains(self.initial_head) {
            return Err(format!(
                "initial_head {:?} is outside the {}x{} grid",
                self.initial_head, self.grid_width, self.grid_height
            ));
        }

        if !self.contains(self.initial_food) {
            return Err(format!(
                "initial_food {:?} is outside the {}x{} grid",
                self.initial_food, self.grid_width, self.grid_height
            ));
        }

        if self.initial_food == self.initial_head {
            return Err("initial_food must not overlap initial_head".to_string());
        }

        if self.initial_tick_interval_ms == 0 {
            return Err("initial_tick_interval_ms must be positive".to_string());
        }

        if self.min_tick_interval_ms > self.initial_tick_interval_ms {
            return Err(format!(
                "min_tick_interval_ms ({}) must not exceed initial_tick_interval_ms ({})",
                self.min_tick_interval_ms, self.initial_tick_interval_ms
            ));
        }

        if self.max_food_attempts == 0 {
            return Err("max_food_attempts must be positive".to_string());
        }

        if self.frame_interval_ms == 0 {
            return Err("frame_interval_ms must be positive".to_string());
        }

        Ok(())
    }
}
