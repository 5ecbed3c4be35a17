use ratatui::layout::Rect;

use crate::game::Direction;

/// A clickable on-screen control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    Steer(Direction),
    Restart,
}

impl ControlButton {
    pub fn label(&self) -> &'static str {
        match self {
            ControlButton::Steer(direction) => direction.arrow(),
            ControlButton::Restart => "Restart",
        }
    }
}

/// Screen areas of the control buttons from the most recent frame.
///
/// The renderer rebuilds it every frame; the input handler hit-tests mouse
/// clicks against it.
#[derive(Debug, Clone, Default)]
pub struct ControlPad {
    buttons: Vec<(Rect, ControlButton)>,
}

impl ControlPad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.buttons.clear();
    }

    pub fn register(&mut self, area: Rect, button: ControlButton) {
        self.buttons.push((area, button));
    }

    /// Button under the given terminal cell, if any
    pub fn hit(&self, column: u16, row: u16) -> Option<ControlButton> {
        self.buttons
            .iter()
            .find(|(area, _)| {
                column >= area.x
                    && column < area.x.saturating_add(area.width)
                    && row >= area.y
                    && row < area.y.saturating_add(area.height)
            })
            .map(|(_, button)| *button)
    }

    #[cfg(test)]
    pub fn buttons(&self) -> impl Iterator<Item = &(Rect, ControlButton)> {
        self.buttons.iter()
    }
}
