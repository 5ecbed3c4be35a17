use crate::game::Direction;

/// Turn a drag displacement into a direction.
///
/// Drags shorter than `threshold` on both axes are ignored. Otherwise the
/// dominant axis wins, with ties going to the vertical axis.
pub fn classify_swipe(dx: i32, dy: i32, threshold: i32) -> Option<Direction> {
    if dx.abs() < threshold && dy.abs() < threshold {
        return None;
    }

    if dx.abs() > dy.abs() {
        Direction::from_delta(dx.signum(), 0)
    } else {
        Direction::from_delta(0, dy.signum())
    }
}

/// Tracks a mouse drag from press to release
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
    threshold: u16,
}

impl SwipeTracker {
    pub fn new(threshold: u16) -> Self {
        Self {
            start: None,
            threshold,
        }
    }

    pub fn begin(&mut self, column: u16, row: u16) {
        self.start = Some((column, row));
    }

    /// Complete the gesture; yields a direction if it was a real swipe
    pub fn finish(&mut self, column: u16, row: u16) -> Option<Direction> {
        let (start_column, start_row) = self.start.take()?;
        let dx = i32::from(column) - i32::from(start_column);
        let dy = i32::from(row) - i32::from(start_row);
        classify_swipe(dx, dy, i32::from(self.threshold))
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}
