//! Applies pointer events to the orbit camera.
//!
//! The `InputProcessor` owns the transient pointer state (last position,
//! held buttons, modifier keys) and reports the cursor feedback the host
//! should show.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::camera::OrbitCamera;

/// Wheel units per detent, matching DOM `deltaMode = 0` line scrolling.
pub const WHEEL_UNITS_PER_NOTCH: f32 = 120.0;

/// Cursor feedback shown over the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    /// Idle over the surface: the model can be grabbed.
    #[default]
    Grab,
    /// A pointer button is held.
    Grabbing,
}

impl CursorState {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

#[cfg(feature = "viewer")]
impl From<CursorState> for winit::window::CursorIcon {
    fn from(state: CursorState) -> Self {
        match state {
            CursorState::Grab => Self::Grab,
            CursorState::Grabbing => Self::Grabbing,
        }
    }
}

/// What a drag currently does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Orbit,
    Pan,
}

/// Converts pointer events into orbit camera motion.
#[derive(Debug, Default)]
pub struct InputProcessor {
    last_pos: Option<Vec2>,
    drag: Option<DragMode>,
    shift_pressed: bool,
    cursor: CursorState,
}

impl InputProcessor {
    /// Processor with no button held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor feedback for the current pointer state.
    #[must_use]
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Apply one event. Returns the new cursor state when it changed.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        camera: &mut OrbitCamera,
    ) -> Option<CursorState> {
        let before = self.cursor;
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(Vec2::new(x, y), camera),
            InputEvent::PointerDown { button } => {
                self.drag = Some(if button == MouseButton::Right || self.shift_pressed {
                    DragMode::Pan
                } else {
                    DragMode::Orbit
                });
                self.cursor = CursorState::Grabbing;
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerCancelled => self.release(),
            InputEvent::PointerLeft => {
                self.release();
                self.last_pos = None;
            }
            InputEvent::Scroll { notches } => camera.zoom(notches * WHEEL_UNITS_PER_NOTCH),
            InputEvent::ModifiersChanged { shift } => self.shift_pressed = shift,
        }
        (self.cursor != before).then_some(self.cursor)
    }

    fn release(&mut self) {
        self.drag = None;
        self.cursor = CursorState::Grab;
    }

    fn handle_cursor_moved(&mut self, pos: Vec2, camera: &mut OrbitCamera) {
        let delta = self.last_pos.map_or(Vec2::ZERO, |last| pos - last);
        self.last_pos = Some(pos);
        match self.drag {
            Some(DragMode::Orbit) => camera.rotate(delta),
            Some(DragMode::Pan) => {
                if !camera.pan(delta) {
                    log::debug!("pan ignored: panning disabled");
                }
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    fn attached_camera() -> OrbitCamera {
        let mut camera = OrbitCamera::from_options(&CameraOptions::default(), 1.0);
        camera.attach_control();
        camera
    }

    #[test]
    fn cursor_feedback_follows_pointer() {
        let mut camera = attached_camera();
        let mut input = InputProcessor::new();
        assert_eq!(input.cursor(), CursorState::Grab);

        let down = InputEvent::PointerDown { button: MouseButton::Left };
        assert_eq!(input.handle_event(down, &mut camera), Some(CursorState::Grabbing));
        assert_eq!(input.handle_event(down, &mut camera), None);
        assert_eq!(
            input.handle_event(InputEvent::PointerUp { button: MouseButton::Left }, &mut camera),
            Some(CursorState::Grab)
        );

        let _ = input.handle_event(down, &mut camera);
        assert_eq!(
            input.handle_event(InputEvent::PointerLeft, &mut camera),
            Some(CursorState::Grab)
        );

        let _ = input.handle_event(down, &mut camera);
        assert_eq!(
            input.handle_event(InputEvent::PointerCancelled, &mut camera),
            Some(CursorState::Grab)
        );
        assert!(!input.is_dragging());
    }

    #[test]
    fn drag_orbits_camera() {
        let mut camera = attached_camera();
        let mut input = InputProcessor::new();
        let alpha = camera.alpha;

        let _ = input.handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 }, &mut camera);
        let _ = input.handle_event(InputEvent::PointerDown { button: MouseButton::Left }, &mut camera);
        let _ = input.handle_event(InputEvent::CursorMoved { x: 110.0, y: 10.0 }, &mut camera);
        camera.update();
        assert!(camera.alpha < alpha);
    }

    #[test]
    fn hover_without_button_does_nothing() {
        let mut camera = attached_camera();
        let mut input = InputProcessor::new();
        let alpha = camera.alpha;
        let _ = input.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 }, &mut camera);
        let _ = input.handle_event(InputEvent::CursorMoved { x: 300.0, y: 0.0 }, &mut camera);
        camera.update();
        assert_eq!(camera.alpha, alpha);
    }

    #[test]
    fn pan_is_ignored_with_default_sensibility() {
        let mut camera = attached_camera();
        let mut input = InputProcessor::new();
        let _ = input.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 }, &mut camera);
        let _ = input.handle_event(InputEvent::PointerDown { button: MouseButton::Right }, &mut camera);
        let _ = input.handle_event(InputEvent::CursorMoved { x: 50.0, y: 50.0 }, &mut camera);
        camera.update();
        assert_eq!(camera.target, glam::Vec3::ZERO);
    }

    #[test]
    fn scroll_zooms_in() {
        let mut camera = attached_camera();
        let mut input = InputProcessor::new();
        let radius = camera.radius;
        let _ = input.handle_event(InputEvent::Scroll { notches: 1.0 }, &mut camera);
        camera.update();
        assert!(camera.radius < radius);
    }
}
