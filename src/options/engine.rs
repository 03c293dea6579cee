use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Engine", inline)]
#[serde(default)]
/// Render backend configuration requested at activation.
pub struct EngineOptions {
    /// Keep the presented frame readable (screenshots, pixel reads).
    #[schemars(skip)]
    pub preserve_drawing_buffer: bool,
    /// Request a stencil channel alongside depth.
    #[schemars(skip)]
    pub stencil: bool,
    /// Frame-rate cap for the render loop (0 = unlimited).
    #[schemars(title = "FPS Limit", range(min = 0, max = 240))]
    pub target_fps: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            preserve_drawing_buffer: true,
            stencil: true,
            target_fps: 0,
        }
    }
}
