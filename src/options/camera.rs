use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Orbit camera initial pose, limits and input sensitivities.
pub struct CameraOptions {
    /// Initial azimuth in degrees (rotation around the vertical axis).
    #[schemars(title = "Azimuth", range(min = -180.0, max = 180.0), extend("step" = 1.0))]
    pub alpha_deg: f32,
    /// Initial polar angle in degrees, measured from the +Y axis.
    #[schemars(title = "Polar Angle", range(min = 1.0, max = 179.0), extend("step" = 1.0))]
    pub beta_deg: f32,
    /// Initial orbit radius.
    #[schemars(skip)]
    pub radius: f32,
    /// Minimum orbit radius.
    #[schemars(skip)]
    pub lower_radius_limit: f32,
    /// Maximum orbit radius.
    #[schemars(skip)]
    pub upper_radius_limit: f32,
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Fraction of the current radius zoomed per wheel unit.
    #[schemars(title = "Zoom Speed", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub wheel_delta_percentage: f32,
    /// Pixels of drag per radian of orbit. Larger is slower.
    #[schemars(title = "Rotate Sensibility", range(min = 100.0, max = 5000.0), extend("step" = 50.0))]
    pub angular_sensibility: f32,
    /// Pan sensitivity. Zero disables panning.
    #[schemars(skip)]
    pub panning_sensibility: f32,
    /// Per-frame decay of orbit/zoom motion (0 = no inertia).
    #[schemars(title = "Inertia", range(min = 0.0, max = 0.95), extend("step" = 0.05))]
    pub inertia: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            alpha_deg: -90.0,
            beta_deg: 72.0,
            radius: 10.0,
            lower_radius_limit: 0.1,
            upper_radius_limit: 1000.0,
            fovy: 45.8,
            znear: 1.0,
            zfar: 10_000.0,
            wheel_delta_percentage: 0.01,
            angular_sensibility: 1000.0,
            panning_sensibility: 0.0,
            inertia: 0.9,
        }
    }
}
