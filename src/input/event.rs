/// Platform-agnostic pointer events.
///
/// Native windows and the web canvas both translate their raw events into
/// these and feed them to an [`InputProcessor`](super::InputProcessor).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute surface position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Pointer button pressed.
    PointerDown {
        /// Which button changed.
        button: MouseButton,
    },
    /// Pointer button released.
    PointerUp {
        /// Which button changed.
        button: MouseButton,
    },
    /// Wheel scrolled by `notches` detents (positive = zoom in).
    Scroll {
        /// Detents, fractional for trackpads.
        notches: f32,
    },
    /// Pointer left the surface.
    PointerLeft,
    /// The platform cancelled the pointer (touch interrupted, focus lost).
    PointerCancelled,
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Map a DOM `PointerEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}
