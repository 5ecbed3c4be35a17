use rand::Rng;
use rand::seq::IteratorRandom;

use super::state::{Position, Snake};

/// Picks a free cell for the next food.
///
/// Draws uniform cells and rejects those under the snake. After
/// `max_attempts` misses it enumerates the free cells and picks one of them,
/// which keeps placement bounded when the snake covers most of the grid.
pub struct FoodPlacer {
    max_attempts: u32,
}

impl FoodPlacer {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Returns `None` only when the snake covers every cell
    pub fn place<R: Rng>(
        &self,
        rng: &mut R,
        snake: &Snake,
        grid_width: usize,
        grid_height: usize,
    ) -> Option<Position> {
        if grid_width == 0 || grid_height == 0 {
            return None;
        }

        for _ in 0..self.max_attempts {
            let x = rng.gen_range(0..grid_width) as i32;
            let y = rng.gen_range(0..grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        (0..grid_height)
            .flat_map(|y| (0..grid_width).map(move |x| Position::new(x as i32, y as i32)))
            .filter(|pos| !snake.occupies(*pos))
            .choose(rng)
    }
}
