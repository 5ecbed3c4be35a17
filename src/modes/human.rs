use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{CollisionType, GameEngine, GameEvent, GameState, TickClock};
use crate::input::{InputAction, InputHandler};
use crate::metrics::GameMetrics;
use crate::render::{ControlPad, Renderer};
use crate::storage::{HighScoreKeeper, HighScoreStore};

/// Interactive play in the terminal.
///
/// Owns the one `GameState`. A frame timer drives everything: each frame
/// asks the [`TickClock`] whether the current tick interval has elapsed,
/// applies at most one step, then redraws. Input only ever touches the
/// pending direction, or replaces the state on restart.
pub struct HumanMode<S: HighScoreStore, R: Rng> {
    engine: GameEngine<R>,
    state: GameState,
    clock: TickClock,
    metrics: GameMetrics,
    high_scores: HighScoreKeeper<S>,
    renderer: Renderer,
    input_handler: InputHandler,
    control_pad: ControlPad,
    should_quit: bool,
}

impl<S: HighScoreStore, R: Rng> HumanMode<S, R> {
    pub fn new(mut engine: GameEngine<R>, high_score_store: S) -> Self {
        let state = engine.reset();
        let high_scores = HighScoreKeeper::open(high_score_store);
        let swipe_threshold = engine.config().swipe_threshold;

        Self {
            engine,
            state,
            clock: TickClock::new(Instant::now()),
            metrics: GameMetrics::new(high_scores.best()),
            high_scores,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(swipe_threshold),
            control_pad: ControlPad::new(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal; a failure past raw mode must not leave it behind
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = undo_on_error(setup_terminal, restore_terminal)?;

        tracing::info!(
            grid_width = self.state.grid_width,
            grid_height = self.state.grid_height,
            high_score = self.high_scores.best(),
            "game started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let frame_interval = Duration::from_millis(self.engine.config().frame_interval_ms);
        let mut frame_timer = interval(frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(&event),
                        Some(Err(error)) => {
                            return Err(error).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Frame: maybe tick, always draw
                _ = frame_timer.tick() => {
                    self.on_frame(Instant::now());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, &mut self.control_pad);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                tracing::info!(games_played = self.metrics.games_played, "quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        let action = self.input_handler.handle_event(event, &self.control_pad);
        self.apply_action(action, Instant::now());
    }

    fn apply_action(&mut self, action: InputAction, now: Instant) {
        match action {
            InputAction::Steer(direction) => {
                if !self.state.request_direction(direction) {
                    tracing::trace!(
                        ?direction,
                        pending = ?self.state.pending_direction(),
                        "direction request ignored"
                    );
                }
            }
            InputAction::Restart => self.reset_game(now),
            InputAction::Quit => self.should_quit = true,
            InputAction::None => {}
        }
    }

    /// Per-frame work: apply a tick if one is due.
    ///
    /// The HUD timer stops with the game.
    fn on_frame(&mut self, now: Instant) {
        if !self.state.is_running() {
            return;
        }

        self.metrics.update();

        let tick_interval = Duration::from_millis(self.state.tick_interval_ms);
        if self.clock.should_tick(now, tick_interval) {
            self.update_game();
        }
    }

    fn update_game(&mut self) {
        let result = self.engine.step(&mut self.state);

        for event in result.events {
            match event {
                GameEvent::Moved { .. } => {}
                GameEvent::FoodEaten { at, new_food } => {
                    tracing::debug!(?at, ?new_food, length = self.state.snake.len(), "food eaten");
                }
                GameEvent::ScoreChanged { score } => {
                    tracing::debug!(score, "score changed");
                }
                GameEvent::SpeedChanged { tick_interval_ms } => {
                    tracing::debug!(tick_interval_ms, "speed changed");
                }
                GameEvent::GameOver {
                    collision,
                    final_score,
                } => self.on_game_over(collision, final_score),
            }
        }
    }

    fn on_game_over(&mut self, collision: CollisionType, final_score: u32) {
        tracing::info!(final_score, ?collision, steps = self.state.steps, "game over");

        self.metrics.on_game_over(final_score);

        match self.high_scores.submit(final_score) {
            Ok(true) => tracing::info!(high_score = final_score, "new high score"),
            Ok(false) => {}
            Err(error) => tracing::warn!(?error, "failed to persist high score"),
        }
    }

    fn reset_game(&mut self, now: Instant) {
        self.state = self.engine.reset();
        self.clock.reset(now);
        self.metrics.on_game_start();
        tracing::info!("game restarted");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Best-effort undo of a partial [`setup_terminal`]
fn restore_terminal() {
    if let Err(error) = disable_raw_mode() {
        tracing::warn!(?error, "failed to disable raw mode");
    }
    if let Err(error) = execute!(stderr(), LeaveAlternateScreen, DisableMouseCapture, Show) {
        tracing::warn!(?error, "failed to leave alternate screen");
    }
}

/// Run `setup`, calling `undo` before handing back its error
fn undo_on_error<T>(setup: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| undo())
}
