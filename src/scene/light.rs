use glam::Vec3;

use crate::options::LightingOptions;

/// Kind of light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Sky/ground light: full intensity on surfaces facing `direction`,
    /// ground color on surfaces facing away.
    Hemispheric,
    /// Parallel rays travelling along `direction`.
    Directional,
}

/// A light owned by the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Debug name.
    pub name: String,
    /// Kind of light.
    pub kind: LightKind,
    /// Unit direction (see [`LightKind`] for its meaning).
    pub direction: Vec3,
    /// Scalar intensity.
    pub intensity: f32,
    /// Color lit surfaces facing away from a hemispheric light receive.
    pub ground_color: Vec3,
}

impl Light {
    /// Hemispheric light facing `up`.
    #[must_use]
    pub fn hemispheric(name: &str, up: Vec3, intensity: f32) -> Self {
        Self {
            name: name.to_owned(),
            kind: LightKind::Hemispheric,
            direction: up.try_normalize().unwrap_or(Vec3::Y),
            intensity,
            ground_color: Vec3::ZERO,
        }
    }

    /// Directional light travelling along `direction`.
    #[must_use]
    pub fn directional(name: &str, direction: Vec3, intensity: f32) -> Self {
        Self {
            name: name.to_owned(),
            kind: LightKind::Directional,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Y),
            intensity,
            ground_color: Vec3::ZERO,
        }
    }

    /// Set the ground color (builder form).
    #[must_use]
    pub fn with_ground_color(mut self, color: Vec3) -> Self {
        self.ground_color = color;
        self
    }

    /// The viewer's two-light rig from options.
    #[must_use]
    pub fn rig(options: &LightingOptions) -> [Self; 2] {
        [
            Self::hemispheric(
                "sky",
                Vec3::from_array(options.hemispheric_direction),
                options.hemispheric_intensity,
            )
            .with_ground_color(Vec3::from_array(options.ground_color)),
            Self::directional(
                "key",
                Vec3::from_array(options.directional_direction),
                options.directional_intensity,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rig() {
        let [sky, key] = Light::rig(&LightingOptions::default());
        assert_eq!(sky.kind, LightKind::Hemispheric);
        assert_eq!(sky.direction, Vec3::Y);
        assert_eq!(sky.intensity, 1.0);
        assert_eq!(key.kind, LightKind::Directional);
        assert!((key.direction - Vec3::splat(-1.0).normalize()).length() < 1e-6);
        assert_eq!(key.intensity, 0.5);
    }
}
