use std::f32::consts::PI;

use glam::{Mat4, Vec2, Vec3};

use crate::options::CameraOptions;
use crate::scene::Aabb;

/// Offsets below this are treated as settled.
const INERTIA_EPSILON: f32 = 0.001;

/// Orbit ("arc-rotate") camera.
///
/// The eye sits on a sphere of `radius` around `target`, placed by azimuth
/// `alpha` (around +Y) and polar angle `beta` (from +Y). Pointer input
/// accumulates inertial offsets that [`update`](Self::update) applies once
/// per frame before clamping to the configured limits.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Azimuth in radians.
    pub alpha: f32,
    /// Polar angle in radians.
    pub beta: f32,
    /// Distance from eye to target.
    pub radius: f32,
    /// Orbit center.
    pub target: Vec3,
    /// Minimum radius.
    pub lower_radius_limit: f32,
    /// Maximum radius.
    pub upper_radius_limit: f32,
    /// Minimum polar angle.
    pub lower_beta_limit: f32,
    /// Maximum polar angle.
    pub upper_beta_limit: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Fraction of the radius zoomed per wheel unit.
    pub wheel_delta_percentage: f32,
    /// Pixels of drag per radian.
    pub angular_sensibility: f32,
    /// Pan sensitivity; zero disables panning.
    pub panning_sensibility: f32,
    /// Per-frame decay of inertial offsets.
    pub inertia: f32,
    /// Radius multiplier applied by [`zoom_on`](Self::zoom_on).
    pub zoom_on_factor: f32,
    inertial_alpha_offset: f32,
    inertial_beta_offset: f32,
    inertial_radius_offset: f32,
    attached: bool,
}

impl OrbitCamera {
    /// Camera in its initial pose from options, aimed at the origin.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        let mut camera = Self {
            alpha: options.alpha_deg.to_radians(),
            beta: options.beta_deg.to_radians(),
            radius: options.radius,
            target: Vec3::ZERO,
            lower_radius_limit: options.lower_radius_limit,
            upper_radius_limit: options.upper_radius_limit,
            lower_beta_limit: 0.01,
            upper_beta_limit: PI - 0.01,
            fovy: options.fovy,
            aspect,
            znear: options.znear,
            zfar: options.zfar,
            wheel_delta_percentage: options.wheel_delta_percentage,
            angular_sensibility: options.angular_sensibility,
            panning_sensibility: options.panning_sensibility,
            inertia: options.inertia,
            zoom_on_factor: 1.0,
            inertial_alpha_offset: 0.0,
            inertial_beta_offset: 0.0,
            inertial_radius_offset: 0.0,
            attached: false,
        };
        camera.check_limits();
        camera
    }

    // -- Input control --

    /// Start accepting pointer input.
    pub fn attach_control(&mut self) {
        self.attached = true;
    }

    /// Stop accepting pointer input and drop pending motion.
    pub fn detach_control(&mut self) {
        self.attached = false;
        self.stop_motion();
    }

    /// Whether pointer input is applied.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Queue an orbit by a pointer drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        if !self.attached || self.angular_sensibility <= 0.0 {
            return;
        }
        self.inertial_alpha_offset -= delta.x / self.angular_sensibility;
        self.inertial_beta_offset -= delta.y / self.angular_sensibility;
    }

    /// Queue a zoom by `wheel_delta` wheel units (120 per detent, positive
    /// zooms in). The step is a percentage of the current radius.
    pub fn zoom(&mut self, wheel_delta: f32) {
        if !self.attached || wheel_delta == 0.0 {
            return;
        }
        let pct = self.wheel_delta_percentage;
        let raw = wheel_delta * 0.01 * pct * self.radius;
        let delta = if wheel_delta > 0.0 {
            raw / (1.0 + pct)
        } else {
            raw * (1.0 + pct)
        };
        self.inertial_radius_offset += delta;
    }

    /// Pan the target by a pointer drag of `delta` pixels. Returns `false`
    /// when panning is disabled.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        if !self.attached || self.panning_sensibility == 0.0 {
            return false;
        }
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        self.target += (right * -delta.x + up * delta.y)
            / self.panning_sensibility;
        true
    }

    /// Apply and decay inertial offsets, then clamp to limits. Call once per
    /// frame.
    pub fn update(&mut self) {
        let moving = self.inertial_alpha_offset != 0.0
            || self.inertial_beta_offset != 0.0
            || self.inertial_radius_offset != 0.0;
        if moving {
            self.alpha += self.inertial_alpha_offset;
            self.beta += self.inertial_beta_offset;
            self.radius -= self.inertial_radius_offset;

            let decay = self.inertia.max(0.0);
            self.inertial_alpha_offset *= decay;
            self.inertial_beta_offset *= decay;
            self.inertial_radius_offset *= decay;
            for offset in [
                &mut self.inertial_alpha_offset,
                &mut self.inertial_beta_offset,
                &mut self.inertial_radius_offset,
            ] {
                if offset.abs() < INERTIA_EPSILON {
                    *offset = 0.0;
                }
            }
        }
        self.check_limits();
    }

    /// Drop any pending inertial motion.
    pub fn stop_motion(&mut self) {
        self.inertial_alpha_offset = 0.0;
        self.inertial_beta_offset = 0.0;
        self.inertial_radius_offset = 0.0;
    }

    /// Clamp beta and radius into their limits.
    ///
    /// Limits are applied as `max(lower)` then `min(upper)`, so a
    /// misconfigured lower > upper pins to the upper limit instead of
    /// panicking.
    pub fn check_limits(&mut self) {
        self.beta = self
            .beta
            .max(self.lower_beta_limit)
            .min(self.upper_beta_limit);
        self.radius = self
            .radius
            .max(self.lower_radius_limit)
            .min(self.upper_radius_limit);
    }

    // -- Pose --

    /// Set the orbit center.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Set the orbit radius (clamped).
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.check_limits();
    }

    /// Center on `bounds` and back off to its diagonal times
    /// `zoom_on_factor`. Unless `keep_far_plane`, the far plane is reset to
    /// twice the diagonal.
    pub fn zoom_on(&mut self, bounds: &Aabb, keep_far_plane: bool) {
        self.target = bounds.center();
        let distance = bounds.diagonal();
        if distance <= 0.0 {
            return;
        }
        if !keep_far_plane {
            self.zfar = distance * 2.0;
        }
        self.radius = distance * self.zoom_on_factor;
        self.check_limits();
    }

    /// Update the aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Eye position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let sin_b = match self.beta.sin() {
            s if s == 0.0 => 0.0001,
            s => s,
        };
        self.target
            + self.radius
                * Vec3::new(
                    self.alpha.cos() * sin_b,
                    self.beta.cos(),
                    self.alpha.sin() * sin_b,
                )
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Perspective projection with a [0, 1] depth range.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached() -> OrbitCamera {
        let mut cam = OrbitCamera::from_options(&CameraOptions::default(), 1.5);
        cam.attach_control();
        cam
    }

    #[test]
    fn initial_pose_from_defaults() {
        let cam = OrbitCamera::from_options(&CameraOptions::default(), 1.0);
        assert!((cam.alpha + PI / 2.0).abs() < 1e-6);
        assert!((cam.beta - PI / 2.5).abs() < 1e-6);
        assert_eq!(cam.radius, 10.0);
        assert_eq!(cam.target, Vec3::ZERO);
        assert!((cam.position().length() - 10.0).abs() < 1e-4);
        // alpha = -90 degrees puts the eye on the -Z side
        assert!(cam.position().z < 0.0);
        assert!(cam.position().x.abs() < 1e-4);
        assert!(!cam.is_attached());
    }

    #[test]
    fn input_ignored_while_detached() {
        let mut cam = OrbitCamera::from_options(&CameraOptions::default(), 1.0);
        let before = cam.clone();
        cam.rotate(Vec2::new(300.0, 0.0));
        cam.zoom(120.0);
        cam.update();
        assert_eq!(cam, before);
    }

    #[test]
    fn rotate_moves_alpha_with_inertia() {
        let mut cam = attached();
        cam.inertia = 0.0;
        let alpha = cam.alpha;
        cam.rotate(Vec2::new(100.0, 0.0));
        cam.update();
        assert!((cam.alpha - (alpha - 0.1)).abs() < 1e-6);
        cam.update();
        assert!((cam.alpha - (alpha - 0.1)).abs() < 1e-6);
    }

    #[test]
    fn inertia_keeps_moving_then_settles() {
        let mut cam = attached();
        let alpha = cam.alpha;
        cam.rotate(Vec2::new(100.0, 0.0));
        cam.update();
        let after_one = cam.alpha;
        cam.update();
        assert!(cam.alpha < after_one);
        for _ in 0..200 {
            cam.update();
        }
        let settled = cam.alpha;
        cam.update();
        assert_eq!(cam.alpha, settled);
        // geometric series: 0.1 / (1 - 0.9) = 1.0 minus the cut-off tail
        assert!((alpha - settled - 1.0).abs() < 0.02);
    }

    #[test]
    fn beta_is_clamped() {
        let mut cam = attached();
        cam.inertia = 0.0;
        cam.rotate(Vec2::new(0.0, 100_000.0));
        cam.update();
        assert!((cam.beta - 0.01).abs() < 1e-6);
        cam.rotate(Vec2::new(0.0, -100_000.0));
        cam.update();
        assert!((cam.beta - (PI - 0.01)).abs() < 1e-6);
    }

    #[test]
    fn zoom_in_shrinks_radius_within_limits() {
        let mut cam = attached();
        cam.inertia = 0.0;
        cam.zoom(120.0);
        cam.update();
        assert!(cam.radius < 10.0);

        cam.lower_radius_limit = 9.99;
        for _ in 0..50 {
            cam.zoom(1200.0);
            cam.update();
        }
        assert_eq!(cam.radius, 9.99);
    }

    #[test]
    fn pan_disabled_at_zero_sensibility() {
        let mut cam = attached();
        assert!(!cam.pan(Vec2::new(50.0, 50.0)));
        assert_eq!(cam.target, Vec3::ZERO);

        cam.panning_sensibility = 50.0;
        assert!(cam.pan(Vec2::new(50.0, 0.0)));
        assert_ne!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn zoom_on_centers_and_resets_far_plane() {
        let mut cam = attached();
        let bounds = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0));
        cam.zoom_on(&bounds, false);
        assert_eq!(cam.target, Vec3::splat(2.0));
        let diag = 12.0_f32.sqrt();
        assert!((cam.radius - diag).abs() < 1e-5);
        assert!((cam.zfar - diag * 2.0).abs() < 1e-5);

        let mut keep = attached();
        keep.zoom_on(&bounds, true);
        assert_eq!(keep.zfar, CameraOptions::default().zfar);
    }

    #[test]
    fn inverted_limits_do_not_panic() {
        let mut cam = attached();
        cam.lower_radius_limit = 50.0;
        cam.upper_radius_limit = 5.0;
        cam.check_limits();
        assert_eq!(cam.radius, 5.0);
    }
}
