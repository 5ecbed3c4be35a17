use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::swipe::SwipeTracker;
use crate::game::Direction;
use crate::render::{ControlButton, ControlPad};

/// What the player asked for, whatever device it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Steer(Direction),
    Restart,
    Quit,
    None,
}

impl From<ControlButton> for InputAction {
    fn from(button: ControlButton) -> Self {
        match button {
            ControlButton::Steer(direction) => InputAction::Steer(direction),
            ControlButton::Restart => InputAction::Restart,
        }
    }
}

/// Translates keys, mouse swipes and control-pad clicks into [`InputAction`]s
pub struct InputHandler {
    swipe: SwipeTracker,
}

impl InputHandler {
    pub fn new(swipe_threshold: u16) -> Self {
        Self {
            swipe: SwipeTracker::new(swipe_threshold),
        }
    }

    pub fn handle_event(&mut self, event: &Event, pad: &ControlPad) -> InputAction {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(*key),
            Event::Mouse(mouse) => self.handle_mouse_event(*mouse, pad),
            Event::FocusLost => {
                self.swipe.cancel();
                InputAction::None
            }
            _ => InputAction::None,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => InputAction::Steer(Direction::Up),
            KeyCode::Down => InputAction::Steer(Direction::Down),
            KeyCode::Left => InputAction::Steer(Direction::Left),
            KeyCode::Right => InputAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => InputAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => InputAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => InputAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => InputAction::Steer(Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Restart,

            _ => InputAction::None,
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent, pad: &ControlPad) -> InputAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // A press on a button is a click, not the start of a swipe
                if let Some(button) = pad.hit(mouse.column, mouse.row) {
                    self.swipe.cancel();
                    return button.into();
                }
                self.swipe.begin(mouse.column, mouse.row);
                InputAction::None
            }
            MouseEventKind::Up(MouseButton::Left) => self
                .swipe
                .finish(mouse.column, mouse.row)
                .map(InputAction::Steer)
                .unwrap_or(InputAction::None),
            _ => InputAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(2)
    }
}
