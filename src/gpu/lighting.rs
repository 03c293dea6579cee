use wgpu::util::DeviceExt;

use super::pipeline_helpers;
use crate::scene::{Light, LightKind};

/// Scene lights packed for the mesh shader.
/// NOTE: Must match the WGSL `Lights` struct layout exactly (48 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Hemispheric light "up" direction (normalized)
    pub sky_dir: [f32; 3],
    /// Hemispheric light intensity
    pub sky_intensity: f32,
    /// Color received by surfaces facing away from the sky
    pub ground_color: [f32; 3],
    pub(crate) _pad0: f32,
    /// Direction the directional light travels (normalized)
    pub key_dir: [f32; 3],
    /// Directional light intensity
    pub key_intensity: f32,
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self {
            sky_dir: [0.0, 1.0, 0.0],
            sky_intensity: 0.0,
            ground_color: [0.0; 3],
            _pad0: 0.0,
            key_dir: [0.0, -1.0, 0.0],
            key_intensity: 0.0,
        }
    }
}

impl LightingUniform {
    /// Pack the first hemispheric and the first directional light. Missing
    /// lights contribute nothing.
    #[must_use]
    pub fn from_lights(lights: &[Light]) -> Self {
        let mut uniform = Self::default();
        if let Some(sky) = lights.iter().find(|l| l.kind == LightKind::Hemispheric) {
            uniform.sky_dir = sky.direction.to_array();
            uniform.sky_intensity = sky.intensity;
            uniform.ground_color = sky.ground_color.to_array();
        }
        if let Some(key) = lights.iter().find(|l| l.kind == LightKind::Directional) {
            uniform.key_dir = key.direction.to_array();
            uniform.key_intensity = key.intensity;
        }
        uniform
    }
}

/// Lighting uniform buffer and its bind group.
pub struct Lighting {
    /// CPU copy of the uniform.
    pub uniform: LightingUniform,
    buffer: wgpu::Buffer,
    /// Bind group layout (group 1 of the mesh pipeline).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over the uniform buffer.
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Create the buffer with all lights off.
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = LightingUniform::default();

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lighting Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = pipeline_helpers::uniform_layout(
            device,
            "Lighting Bind Group Layout",
            wgpu::ShaderStages::FRAGMENT,
        );
        let bind_group = pipeline_helpers::uniform_bind_group(
            device,
            "Lighting Bind Group",
            &layout,
            &buffer,
        );

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Upload `lights` if they differ from what is on the GPU.
    pub fn update(&mut self, queue: &wgpu::Queue, lights: &[Light]) {
        let uniform = LightingUniform::from_lights(lights);
        if uniform != self.uniform {
            self.uniform = uniform;
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LightingOptions;

    #[test]
    fn uniform_is_48_bytes() {
        assert_eq!(size_of::<LightingUniform>(), 48);
    }

    #[test]
    fn packs_default_rig() {
        let uniform = LightingUniform::from_lights(&Light::rig(&LightingOptions::default()));
        assert_eq!(uniform.sky_dir, [0.0, 1.0, 0.0]);
        assert_eq!(uniform.sky_intensity, 1.0);
        assert_eq!(uniform.key_intensity, 0.5);
        assert!(uniform.key_dir.iter().all(|c| *c < 0.0));
    }

    #[test]
    fn no_lights_is_dark() {
        let uniform = LightingUniform::from_lights(&[]);
        assert_eq!(uniform.sky_intensity, 0.0);
        assert_eq!(uniform.key_intensity, 0.0);
    }
}
