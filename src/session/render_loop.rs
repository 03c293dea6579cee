use crate::util::frame_timing::FrameTiming;

/// Recurring per-frame task owned by a session.
///
/// The host drives the actual cadence (winit redraws, browser animation
/// frames); the loop decides whether a tick should render.
#[derive(Debug)]
pub struct RenderLoop {
    running: bool,
    timing: FrameTiming,
}

impl RenderLoop {
    /// Stopped loop with an optional FPS cap (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            running: false,
            timing: FrameTiming::new(target_fps),
        }
    }

    /// Start ticking.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop ticking. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether this tick should render.
    #[must_use]
    pub fn tick(&self) -> bool {
        self.running && self.timing.should_render()
    }

    /// Record a rendered frame.
    pub fn frame_done(&mut self) {
        let _ = self.timing.end_frame();
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.timing.frame_count()
    }
}
