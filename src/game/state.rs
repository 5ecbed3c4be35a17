use serde::{Deserialize, Serialize};

use super::{direction::Direction, input_buffer::DirectionBuffer};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction committed on the last tick
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Create a snake from explicit segments, head first
    #[cfg(test)]
    pub fn from_body(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs at least a head");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// True if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front of the snake
    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Drop the last segment
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// True when no two segments share a cell
    #[cfg(test)]
    pub fn has_distinct_cells(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.body.len());
        self.body.iter().all(|pos| seen.insert(*pos))
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver(CollisionType),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub input: DirectionBuffer,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub tick_interval_ms: u64,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        food: Position,
        grid_width: usize,
        grid_height: usize,
        tick_interval_ms: u64,
    ) -> Self {
        Self {
            input: DirectionBuffer::new(snake.direction),
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            tick_interval_ms,
            status: GameStatus::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn collision(&self) -> Option<CollisionType> {
        match self.status {
            GameStatus::Running => None,
            GameStatus::GameOver(collision) => Some(collision),
        }
    }

    /// Direction the snake moved in on the last tick
    pub fn active_direction(&self) -> Direction {
        self.snake.direction
    }

    /// Direction the snake will take on the next tick
    pub fn pending_direction(&self) -> Direction {
        self.input.pending()
    }

    /// Buffer a direction change for the next tick.
    ///
    /// Reversals are rejected, and so is everything while the game is over.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        self.input.request(direction, self.snake.direction)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }
}
