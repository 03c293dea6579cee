//! Lit mesh renderer.
//!
//! Keeps one vertex/index buffer pair and one model uniform per drawn
//! mesh. Geometry is re-uploaded only when the scene generation changes;
//! camera and lights are rewritten every frame.

use glam::Mat4;
use wgpu::util::DeviceExt;

use super::lighting::Lighting;
use super::pipeline_helpers;
use super::render_context::RenderContext;
use crate::camera::core::CameraUniform;
use crate::camera::OrbitCamera;
use crate::scene::{Mesh, Scene};

/// Interleaved vertex as consumed by `mesh.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Node-local position.
    pub position: [f32; 3],
    /// Node-local normal.
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-mesh uniform: world transform, normal matrix and material color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Node world matrix.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the world matrix.
    pub normal_matrix: [[f32; 4]; 4],
    /// Material RGBA.
    pub color: [f32; 4],
}

impl ModelUniform {
    /// Uniform for a mesh at `world`. Unmaterialed meshes draw with
    /// `fallback` color.
    #[must_use]
    pub fn new(world: Mat4, mesh: &Mesh, fallback: [f32; 3]) -> Self {
        let (rgb, alpha) = mesh
            .material
            .as_ref()
            .map_or((fallback, 1.0), |m| (m.base_color, m.alpha));
        let normal_matrix = if world.determinant().abs() > f32::EPSILON {
            world.inverse().transpose()
        } else {
            Mat4::IDENTITY
        };
        Self {
            model: world.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            color: [rgb[0], rgb[1], rgb[2], alpha],
        }
    }
}

/// Interleave positions and normals.
#[must_use]
pub fn interleave(mesh: &Mesh) -> Vec<MeshVertex> {
    mesh.positions
        .iter()
        .zip(mesh.normals.iter().chain(std::iter::repeat(&glam::Vec3::Y)))
        .map(|(p, n)| MeshVertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect()
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    _uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    double_sided: bool,
}

/// Draws every enabled, visible mesh of a [`Scene`].
pub struct MeshRenderer {
    culled_pipeline: wgpu::RenderPipeline,
    double_sided_pipeline: wgpu::RenderPipeline,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    lighting: Lighting,
    model_layout: wgpu::BindGroupLayout,
    meshes: Vec<GpuMesh>,
    uploaded_generation: Option<u64>,
    fallback_color: [f32; 3],
}

impl MeshRenderer {
    /// Build pipelines for the context's surface and depth formats.
    #[must_use]
    pub fn new(context: &RenderContext, fallback_color: [f32; 3]) -> Self {
        let device = &context.device;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../assets/shaders/mesh.wgsl").into(),
            ),
        });

        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_layout = pipeline_helpers::uniform_layout(
            device,
            "Camera Bind Group Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let camera_bind_group = pipeline_helpers::uniform_bind_group(
            device,
            "Camera Bind Group",
            &camera_layout,
            &camera_buffer,
        );

        let lighting = Lighting::new(device);
        let model_layout = pipeline_helpers::uniform_layout(
            device,
            "Model Bind Group Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let layouts = [&camera_layout, &lighting.layout, &model_layout];

        let pipeline = |label, cull| {
            pipeline_helpers::create_mesh_pipeline(
                device,
                label,
                &shader,
                context.format(),
                context.depth_format(),
                cull,
                &layouts,
                MeshVertex::layout(),
            )
        };
        let culled_pipeline = pipeline("Mesh Pipeline", Some(wgpu::Face::Back));
        let double_sided_pipeline = pipeline("Double-Sided Mesh Pipeline", None);

        Self {
            culled_pipeline,
            double_sided_pipeline,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            lighting,
            model_layout,
            meshes: Vec::new(),
            uploaded_generation: None,
            fallback_color,
        }
    }

    /// Re-upload geometry if the scene changed since the last upload.
    pub fn sync(&mut self, device: &wgpu::Device, scene: &Scene) {
        if self.uploaded_generation == Some(scene.generation()) {
            return;
        }
        self.meshes.clear();
        for (id, node) in scene.graph().iter() {
            let Some(mesh) = node.mesh.as_ref() else {
                continue;
            };
            if !mesh.is_drawn() || mesh.indices.is_empty() {
                continue;
            }
            let vertices = interleave(mesh);
            let label = format!("{} ({id:?})", node.name);
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&label),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&label),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            let uniform = ModelUniform::new(node.world(), mesh, self.fallback_color);
            let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&label),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM,
            });
            let bind_group = pipeline_helpers::uniform_bind_group(
                device,
                &label,
                &self.model_layout,
                &uniform_buffer,
            );
            self.meshes.push(GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as u32,
                _uniform_buffer: uniform_buffer,
                bind_group,
                double_sided: mesh.material.as_ref().is_some_and(|m| m.double_sided),
            });
        }
        self.uploaded_generation = Some(scene.generation());
        log::debug!(
            "uploaded {} meshes (scene generation {})",
            self.meshes.len(),
            scene.generation()
        );
    }

    /// Write per-frame camera and light uniforms.
    pub fn prepare(&mut self, queue: &wgpu::Queue, scene: &Scene, camera: &OrbitCamera) {
        self.camera_uniform.update_view_proj(camera);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
        self.lighting.update(queue, scene.lights());
    }

    /// Record draw calls into `render_pass`.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.lighting.bind_group, &[]);
        for mesh in &self.meshes {
            render_pass.set_pipeline(if mesh.double_sided {
                &self.double_sided_pipeline
            } else {
                &self.culled_pipeline
            });
            render_pass.set_bind_group(2, &mesh.bind_group, &[]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    /// Number of meshes currently on the GPU.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Drop all GPU geometry.
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.uploaded_generation = None;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::Material;

    #[test]
    fn vertex_and_uniform_sizes() {
        assert_eq!(size_of::<MeshVertex>(), 24);
        assert_eq!(size_of::<ModelUniform>(), 144);
    }

    #[test]
    fn interleave_pairs_positions_with_normals() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            Vec::new(),
            vec![0, 1, 2],
        );
        let vertices = interleave(&mesh);
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert!((Vec3::from(vertices[0].normal) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn model_uniform_uses_material_or_fallback() {
        let mesh = Mesh::new(vec![Vec3::ZERO], Vec::new(), Vec::new());
        let plain = ModelUniform::new(Mat4::IDENTITY, &mesh, [0.8; 3]);
        assert_eq!(plain.color, [0.8, 0.8, 0.8, 1.0]);

        let mut red = Material::solid("red", [1.0, 0.0, 0.0]);
        red.alpha = 0.5;
        let tinted = ModelUniform::new(
            Mat4::from_scale(Vec3::splat(2.0)),
            &mesh.clone().with_material(red),
            [0.8; 3],
        );
        assert_eq!(tinted.color, [1.0, 0.0, 0.0, 0.5]);
        assert!((tinted.normal_matrix[0][0] - 0.5).abs() < 1e-6);
    }
}
