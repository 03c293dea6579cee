use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// The two scene lights: a hemispheric sky light and a directional key
/// light.
pub struct LightingOptions {
    /// Hemispheric light intensity.
    #[schemars(title = "Sky Light", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub hemispheric_intensity: f32,
    /// Direction the hemispheric light faces (the "up" of the sky).
    #[schemars(skip)]
    pub hemispheric_direction: [f32; 3],
    /// Ground color blended in for normals facing away from the sky.
    #[schemars(skip)]
    pub ground_color: [f32; 3],
    /// Directional light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub directional_intensity: f32,
    /// Direction the directional light travels.
    #[schemars(skip)]
    pub directional_direction: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            hemispheric_intensity: 1.0,
            hemispheric_direction: [0.0, 1.0, 0.0],
            ground_color: [0.0, 0.0, 0.0],
            directional_intensity: 0.5,
            directional_direction: [-1.0, -1.0, -1.0],
        }
    }
}
