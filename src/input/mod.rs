//! Input handling: platform-agnostic pointer events and the processor that
//! turns them into orbit camera motion and cursor feedback.

/// Platform-agnostic input events.
pub mod event;
/// Applies events to the camera.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::{CursorState, InputProcessor};
