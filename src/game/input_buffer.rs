use super::direction::Direction;

/// Holds the direction the snake will take on the next tick.
///
/// Every input source (keys, swipes, on-screen buttons) funnels into
/// [`DirectionBuffer::request`]. Requests are checked against the direction
/// committed on the last tick, not against the previous request, so changing
/// axis twice between ticks cannot sneak a reversal through. There is no
/// queue: the last accepted request wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionBuffer {
    pending: Direction,
}

impl DirectionBuffer {
    pub fn new(initial: Direction) -> Self {
        Self { pending: initial }
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    /// Try to steer towards `requested` while the snake moves in `active`.
    ///
    /// Returns whether the request was accepted.
    pub fn request(&mut self, requested: Direction, active: Direction) -> bool {
        if requested.is_opposite(active) {
            return false;
        }
        self.pending = requested;
        true
    }
}
