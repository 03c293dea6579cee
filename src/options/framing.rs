use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Framing", inline)]
#[serde(default)]
/// Parameters of the load-time normalization pass.
pub struct FramingOptions {
    /// World-space length the model's largest axis is scaled to.
    #[schemars(title = "Target Size", range(min = 1.0, max = 100.0), extend("step" = 1.0))]
    pub target_size: f32,
    /// Orbit radius as a multiple of the normalized largest dimension.
    #[schemars(title = "Radius Factor", range(min = 0.5, max = 5.0), extend("step" = 0.1))]
    pub radius_factor: f32,
    /// Smallest orbit radius the framing will choose.
    #[schemars(skip)]
    pub min_radius: f32,
    /// Radius used when nothing renderable was loaded.
    #[schemars(skip)]
    pub fallback_radius: f32,
    /// Lower radius limit and near plane after framing.
    #[schemars(skip)]
    pub near_limit: f32,
    /// Upper radius limit is at least `radius * upper_limit_factor`.
    #[schemars(skip)]
    pub upper_limit_factor: f32,
    /// Upper radius limit is at least `radius + upper_limit_padding`.
    #[schemars(skip)]
    pub upper_limit_padding: f32,
    /// Far plane as a multiple of the upper radius limit.
    #[schemars(skip)]
    pub far_factor: f32,
    /// Run the camera's auto-framing after the radius is set.
    #[schemars(title = "Auto Frame")]
    pub auto_frame: bool,
}

impl Default for FramingOptions {
    fn default() -> Self {
        Self {
            target_size: 10.0,
            radius_factor: 1.5,
            min_radius: 3.0,
            fallback_radius: 10.0,
            near_limit: 0.01,
            upper_limit_factor: 4.0,
            upper_limit_padding: 5.0,
            far_factor: 5.0,
            auto_frame: true,
        }
    }
}
