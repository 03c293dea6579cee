//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (scene colors, camera pose and limits, lighting,
//! framing constants, render backend flags) are consolidated here. Options
//! serialize to/from TOML so a viewer can be launched with a preset file.

mod camera;
mod engine;
mod framing;
mod lighting;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use engine::EngineOptions;
pub use framing::FramingOptions;
pub use lighting::LightingOptions;
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Background and fallback material colors.
    #[schemars(skip)]
    pub scene: SceneOptions,
    /// Orbit camera pose, limits and sensitivities.
    pub camera: CameraOptions,
    /// Hemispheric and directional light parameters.
    pub lighting: LightingOptions,
    /// Normalization pass constants.
    pub framing: FramingOptions,
    /// Render backend flags.
    pub engine: EngineOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        toml::from_str(&content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Fails if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
upper_radius_limit = 250.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.upper_radius_limit, 250.0);
        // Everything else should be default
        assert_eq!(opts.camera.lower_radius_limit, 0.1);
        assert_eq!(opts.camera.panning_sensibility, 0.0);
        assert_eq!(opts.framing.target_size, 10.0);
        assert_eq!(opts.lighting.directional_intensity, 0.5);
    }

    #[test]
    fn defaults_match_viewer_setup() {
        let opts = Options::default();
        assert_eq!(opts.camera.alpha_deg, -90.0);
        assert_eq!(opts.camera.beta_deg, 72.0);
        assert_eq!(opts.camera.radius, 10.0);
        assert_eq!(opts.camera.wheel_delta_percentage, 0.01);
        assert_eq!(opts.lighting.hemispheric_direction, [0.0, 1.0, 0.0]);
        assert_eq!(opts.lighting.directional_direction, [-1.0, -1.0, -1.0]);
        assert_eq!(opts.scene.default_material_color, [0.8, 0.8, 0.8]);
        assert!(opts.engine.preserve_drawing_buffer);
        assert!(opts.engine.stencil);
    }

    #[test]
    fn save_then_load_preset() {
        let dir = std::env::temp_dir()
            .join(format!("orbitview-presets-{}", std::process::id()));
        let path = dir.join("close_up.toml");
        let mut opts = Options::default();
        opts.framing.radius_factor = 1.1;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["close_up".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("framing"));
        assert!(props.contains_key("engine"));
        assert!(!props.contains_key("scene"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("alpha_deg").is_some());
        assert!(camera.get("panning_sensibility").is_none());
    }
}
