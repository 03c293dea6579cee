use glam::Vec3;

use super::aabb::Aabb;

/// Flat-shaded surface description attached to a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name as authored, or a generated one.
    pub name: String,
    /// Linear diffuse color.
    pub base_color: [f32; 3],
    /// Opacity (1.0 = opaque).
    pub alpha: f32,
    /// Render both faces.
    pub double_sided: bool,
}

impl Material {
    /// Opaque single-color material.
    #[must_use]
    pub fn solid(name: impl Into<String>, base_color: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            base_color,
            alpha: 1.0,
            double_sided: false,
        }
    }
}

/// Capability interface over a loaded mesh, independent of how the format
/// reader represented it.
pub trait RenderableMesh {
    /// Number of vertices. Meshes with zero vertices are never framed.
    fn vertex_count(&self) -> usize;
    /// Whether a material was assigned.
    fn has_material(&self) -> bool;
    /// Enable or disable the mesh for rendering.
    fn set_enabled(&mut self, enabled: bool);
    /// Show or hide the mesh.
    fn set_visible(&mut self, visible: bool);
    /// Replace the mesh's material.
    fn set_material(&mut self, material: Material);
}

/// Indexed triangle mesh in node-local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals (same length as `positions`).
    pub normals: Vec<Vec3>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
    /// Assigned material, if any.
    pub material: Option<Material>,
    /// Participates in rendering.
    pub enabled: bool,
    /// Drawn when enabled.
    pub visible: bool,
}

impl Mesh {
    /// Build a mesh from positions and triangle indices. Normals are
    /// generated when `normals` is empty or mismatched.
    #[must_use]
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let mut mesh = Self {
            positions,
            normals,
            indices,
            material: None,
            enabled: true,
            visible: true,
        };
        if mesh.normals.len() != mesh.positions.len() {
            mesh.recompute_normals();
        }
        mesh
    }

    /// Set the material (builder form).
    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Bounds in node-local space, `None` for an empty mesh.
    #[must_use]
    pub fn local_bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Whether the renderer should draw this mesh.
    #[must_use]
    pub fn is_drawn(&self) -> bool {
        self.enabled && self.visible && !self.positions.is_empty()
    }

    /// Area-weighted smooth vertex normals.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (Some(pa), Some(pb), Some(pc)) = (
                self.positions.get(a),
                self.positions.get(b),
                self.positions.get(c),
            ) else {
                continue;
            };
            let face = (*pb - *pa).cross(*pc - *pa);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        self.normals = normals
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
            .collect();
    }
}

impl RenderableMesh for Mesh {
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn has_material(&self) -> bool {
        self.material.is_some()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_material(&mut self, material: Material) {
        self.material = Some(material);
    }
}
