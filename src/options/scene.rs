use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Background and fallback material colors.
pub struct SceneOptions {
    /// Clear color (RGBA, linear).
    #[schemars(skip)]
    pub clear_color: [f32; 4],
    /// Diffuse color assigned to meshes that arrive without a material.
    #[schemars(skip)]
    pub default_material_color: [f32; 3],
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.05, 0.05, 0.08, 1.0],
            default_material_color: [0.8, 0.8, 0.8],
        }
    }
}
