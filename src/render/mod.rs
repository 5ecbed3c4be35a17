pub mod controls;
pub mod renderer;

pub use controls::{ControlButton, ControlPad};
pub use renderer::Renderer;
