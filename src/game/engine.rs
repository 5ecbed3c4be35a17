use super::{
    config::GameConfig,
    food::FoodPlacer,
    state::{CollisionType, GameState, GameStatus, Position, Snake},
};
use rand::Rng;
use rand::rngs::ThreadRng;

/// Something that happened during a step, for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The snake advanced without eating
    Moved { head: Position },
    /// The snake ate; `new_food` is `None` only when the grid is full
    FoodEaten {
        at: Position,
        new_food: Option<Position>,
    },
    ScoreChanged { score: u32 },
    SpeedChanged { tick_interval_ms: u64 },
    GameOver {
        collision: CollisionType,
        final_score: u32,
    },
}

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn frozen() -> Self {
        Self {
            terminated: true,
            events: Vec::new(),
            info: StepInfo {
                ate_food: false,
                collision_type: None,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    food_placer: FoodPlacer,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine that draws food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            food_placer: FoodPlacer::new(config.max_food_attempts),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to its canonical initial state
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.initial_head, self.config.initial_direction, 1);

        GameState::new(
            snake,
            self.config.initial_food,
            self.config.grid_width,
            self.config.grid_height,
            self.config.initial_tick_interval_ms,
        )
    }

    /// Execute one step of the game
    ///
    /// A finished game is left untouched.
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_running() {
            return StepResult::frozen();
        }

        // Commit the buffered direction
        state.snake.direction = state.input.pending();

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        state.steps += 1;

        // Checked against the full body before the tail moves, so chasing the
        // tail is fatal too
        if let Some(collision) = self.check_collision(state, new_head) {
            state.status = GameStatus::GameOver(collision);

            return StepResult {
                terminated: true,
                events: vec![GameEvent::GameOver {
                    collision,
                    final_score: state.score,
                }],
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision),
                },
            };
        }

        state.snake.push_head(new_head);

        let ate_food = new_head == state.food;
        let mut events = Vec::new();

        if ate_food {
            state.score += self.config.score_increment;

            let new_food = self.food_placer.place(
                &mut self.rng,
                &state.snake,
                state.grid_width,
                state.grid_height,
            );
            if let Some(food) = new_food {
                state.food = food;
            }

            events.push(GameEvent::FoodEaten {
                at: new_head,
                new_food,
            });
            events.push(GameEvent::ScoreChanged { score: state.score });

            let faster = state
                .tick_interval_ms
                .saturating_sub(self.config.speed_step_ms)
                .max(self.config.min_tick_interval_ms);
            if faster != state.tick_interval_ms {
                state.tick_interval_ms = faster;
                events.push(GameEvent::SpeedChanged {
                    tick_interval_ms: faster,
                });
            }
        } else {
            state.snake.pop_tail();
            events.push(GameEvent::Moved { head: new_head });
        }

        StepResult {
            terminated: false,
            events,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        // Check wall collision
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // Check self-collision
        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(config: GameConfig) -> GameEngine<StdRng> {
        GameEngine::with_rng(config, StdRng::seed_from_u64(42))
    }

    fn state_with(body: Vec<Position>, direction: Direction, food: Position) -> GameState {
        GameState::new(Snake::from_body(body, direction), food, 30, 30, 100)
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::new(GameConfig::default());
        let state = engine.reset();

        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.food, Position::new(15, 15));
        assert_eq!(state.active_direction(), Direction::Right);
        assert_eq!(state.pending_direction(), Direction::Right);
        assert_eq!(state.tick_interval_ms, 100);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert!(!result.info.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.body, vec![Position::new(11, 10)]);
        assert_eq!(
            result.events,
            vec![GameEvent::Moved {
                head: Position::new(11, 10)
            }]
        );
    }

    #[test]
    fn test_pending_direction_committed_on_tick() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();

        assert!(state.request_direction(Direction::Up));
        assert_eq!(state.active_direction(), Direction::Right);

        engine.step(&mut state);

        assert_eq!(state.active_direction(), Direction::Up);
        assert_eq!(state.snake.head(), Position::new(10, 9));
    }

    #[test]
    fn test_eating_food_scenario() {
        let mut engine = seeded(GameConfig::default());
        let mut state = state_with(vec![Position::new(5, 5)], Direction::Down, Position::new(5, 6));

        let result = engine.step(&mut state);

        assert!(result.info.ate_food);
        assert_eq!(
            state.snake.body,
            vec![Position::new(5, 6), Position::new(5, 5)]
        );
        assert_eq!(state.score, 10);
        assert_ne!(state.food, Position::new(5, 6));
        assert!(!state.snake.occupies(state.food));
        assert_eq!(state.tick_interval_ms, 98);
        assert_eq!(
            result.events,
            vec![
                GameEvent::FoodEaten {
                    at: Position::new(5, 6),
                    new_food: Some(state.food),
                },
                GameEvent::ScoreChanged { score: 10 },
                GameEvent::SpeedChanged {
                    tick_interval_ms: 98
                },
            ]
        );
    }

    #[test]
    fn test_filling_the_grid_leaves_no_food() {
        let mut engine = seeded(GameConfig::new(3, 3));
        // Serpentine over every cell but (2, 2)
        let body = vec![
            Position::new(2, 1),
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(0, 2),
            Position::new(0, 1),
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
        ];
        let mut state = GameState::new(
            Snake::from_body(body, Direction::Right),
            Position::new(2, 2),
            3,
            3,
            100,
        );
        assert!(state.request_direction(Direction::Down));

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert!(result.info.ate_food);
        assert_eq!(state.snake.len(), 9);
        assert!(state.snake.has_distinct_cells());
        assert_eq!(state.score, 10);
        // Nowhere left to put it, so the eaten food is kept
        assert_eq!(state.food, Position::new(2, 2));
        assert_eq!(
            result.events,
            vec![
                GameEvent::FoodEaten {
                    at: Position::new(2, 2),
                    new_food: None,
                },
                GameEvent::ScoreChanged { score: 10 },
                GameEvent::SpeedChanged {
                    tick_interval_ms: 98
                },
            ]
        );

        // Every next cell is a wall or the body
        let result = engine.step(&mut state);
        assert!(result.terminated);
        assert_eq!(state.status, GameStatus::GameOver(CollisionType::Wall));
        assert_eq!(
            result.events,
            vec![GameEvent::GameOver {
                collision: CollisionType::Wall,
                final_score: 10,
            }]
        );
    }

    #[test]
    fn test_speed_floors_at_minimum() {
        let mut engine = seeded(GameConfig::default());
        let mut state = state_with(vec![Position::new(5, 5)], Direction::Down, Position::new(5, 6));
        state.tick_interval_ms = 61;

        let result = engine.step(&mut state);
        assert_eq!(state.tick_interval_ms, 60);
        assert!(result.events.contains(&GameEvent::SpeedChanged {
            tick_interval_ms: 60
        }));

        // Already at the floor: no speed event
        state.food = state.snake.head().moved_in_direction(Direction::Down);
        let result = engine.step(&mut state);
        assert!(result.info.ate_food);
        assert_eq!(state.tick_interval_ms, 60);
        assert!(
            !result
                .events
                .iter()
                .any(|event| matches!(event, GameEvent::SpeedChanged { .. }))
        );
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = seeded(GameConfig::default());
        let mut state = state_with(
            vec![Position::new(0, 5), Position::new(1, 5)],
            Direction::Left,
            Position::new(8, 8),
        );
        let before = state.clone();

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert!(!state.is_running());
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.status, GameStatus::GameOver(CollisionType::Wall));
        // Frozen in place
        assert_eq!(state.snake, before.snake);
        assert_eq!(state.food, before.food);
        assert_eq!(state.score, before.score);
    }

    #[test]
    fn test_wall_collision_on_far_edges() {
        let mut engine = seeded(GameConfig::default());

        let mut state = state_with(vec![Position::new(29, 3)], Direction::Right, Position::new(8, 8));
        assert_eq!(
            engine.step(&mut state).info.collision_type,
            Some(CollisionType::Wall)
        );

        let mut state = state_with(vec![Position::new(3, 29)], Direction::Down, Position::new(8, 8));
        assert_eq!(
            engine.step(&mut state).info.collision_type,
            Some(CollisionType::Wall)
        );

        let mut state = state_with(vec![Position::new(3, 0)], Direction::Up, Position::new(8, 8));
        assert_eq!(
            engine.step(&mut state).info.collision_type,
            Some(CollisionType::Wall)
        );
    }

    #[test]
    fn test_self_collision() {
        let mut engine = seeded(GameConfig::small());

        // Snake at (5, 5) going Right with length 5
        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10, 100);

        // Right: (6,5), (5,5), (4,5), (3,5), (2,5)
        engine.step(&mut state);
        // Down: (6,6), (6,5), (5,5), (4,5), (3,5)
        state.request_direction(Direction::Down);
        engine.step(&mut state);
        // Left: (5,6), (6,6), (6,5), (5,5), (4,5)
        state.request_direction(Direction::Left);
        engine.step(&mut state);
        // Up: (5,5) - this should collide with body at (5,5)!
        state.request_direction(Direction::Up);
        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
        assert_eq!(
            result.events,
            vec![GameEvent::GameOver {
                collision: CollisionType::SelfCollision,
                final_score: 0,
            }]
        );
    }

    #[test]
    fn test_tail_chase_is_fatal() {
        let mut engine = seeded(GameConfig::default());
        let mut state = state_with(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
            ],
            Direction::Up,
            Position::new(20, 20),
        );

        // (6, 5) is the tail, which would be vacated this tick
        assert!(state.request_direction(Direction::Right));
        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_single_segment_cannot_self_collide() {
        let mut engine = seeded(GameConfig::default());
        let mut state = state_with(vec![Position::new(5, 5)], Direction::Right, Position::new(20, 20));

        for direction in [Direction::Down, Direction::Left, Direction::Up, Direction::Right] {
            state.request_direction(direction);
            let result = engine.step(&mut state);
            assert!(!result.terminated);
        }
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_reversal_request_is_ignored() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();

        // Try to turn 180 degrees (should be ignored)
        assert!(!state.request_direction(Direction::Left));
        engine.step(&mut state);

        assert_eq!(state.active_direction(), Direction::Right);
        assert_eq!(state.snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        state.status = GameStatus::GameOver(CollisionType::Wall);
        let before = state.clone();

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert!(result.events.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_restart_restores_initial_state() {
        let mut engine = seeded(GameConfig::default());
        let mut state = state_with(vec![Position::new(0, 5)], Direction::Left, Position::new(8, 8));
        state.score = 70;
        state.tick_interval_ms = 86;
        engine.step(&mut state);
        assert!(!state.is_running());

        let state = engine.reset();

        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.tick_interval_ms, 100);
    }

    #[test]
    fn test_invariants_hold_over_random_play() {
        let mut engine = seeded(GameConfig::small());
        let mut steering = StdRng::seed_from_u64(5);

        for _ in 0..50 {
            let mut state = engine.reset();
            while state.is_running() {
                let len_before = state.snake.len();
                let score_before = state.score;

                let direction = Direction::ALL[steering.gen_range(0..4)];
                state.request_direction(direction);
                let result = engine.step(&mut state);

                assert!(state.snake.has_distinct_cells());
                if result.terminated {
                    break;
                }
                assert!(!state.snake.occupies(state.food));
                if result.info.ate_food {
                    assert_eq!(state.snake.len(), len_before + 1);
                    assert_eq!(state.score, score_before + 10);
                } else {
                    assert_eq!(state.snake.len(), len_before);
                    assert_eq!(state.score, score_before);
                }
            }
        }
    }

    #[test]
    fn test_step_is_deterministic_for_a_seed() {
        let play = || {
            let mut engine = seeded(GameConfig::small());
            let mut state = engine.reset();
            let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];
            for i in 0..40 {
                state.request_direction(turns[(i / 3) % 4]);
                engine.step(&mut state);
            }
            state
        };

        assert_eq!(play(), play());
    }
}
