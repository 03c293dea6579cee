use web_time::{Duration, Instant};

/// Frame pacing for the render loop: optional FPS cap, smoothed FPS and a
/// running frame count.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration derived from the target
    min_frame_duration: Duration,
    last_frame: Instant,
    /// Exponential moving average of the instantaneous FPS
    smoothed_fps: f32,
    /// Weight of each new sample (0.0-1.0)
    smoothing: f32,
    frames: u64,
}

impl FrameTiming {
    /// Create a frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Whether enough time has passed since the last frame to render again.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Record a rendered frame. Returns the time since the previous one.
    pub fn end_frame(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frames += 1;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed
    }

    /// Smoothed FPS.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames recorded since creation.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
    }

    #[test]
    fn capped_waits_for_interval() {
        let mut timing = FrameTiming::new(1);
        let _ = timing.end_frame();
        assert!(!timing.should_render());
        assert_eq!(timing.frame_count(), 1);
    }

    #[test]
    fn fps_stays_positive() {
        let mut timing = FrameTiming::new(0);
        for _ in 0..5 {
            let _ = timing.end_frame();
        }
        assert!(timing.fps() > 0.0);
        assert_eq!(timing.frame_count(), 5);
    }
}
