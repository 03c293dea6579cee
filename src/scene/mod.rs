//! Scene state: a transform hierarchy of meshes, the light rig, and the
//! background color.
//!
//! The scene is the only thing the renderer reads. Every mutation through
//! [`Scene::graph_mut`] bumps a generation counter so the renderer can tell
//! when its GPU copies are stale.

mod aabb;
mod asset;
mod graph;
mod light;
mod mesh;

pub use aabb::Aabb;
pub use asset::{AssetContainer, AssetNode};
pub use graph::{Node, NodeId, SceneGraph};
pub use light::{Light, LightKind};
pub use mesh::{Material, Mesh, RenderableMesh};

/// The scene owned by a viewer session.
#[derive(Debug, Clone)]
pub struct Scene {
    graph: SceneGraph,
    lights: Vec<Light>,
    /// Background clear color (RGBA).
    pub clear_color: [f32; 4],
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
    disposed: bool,
}

impl Scene {
    /// Create an empty scene with the given background.
    #[must_use]
    pub fn new(clear_color: [f32; 4]) -> Self {
        Self {
            graph: SceneGraph::new(),
            lights: Vec::new(),
            clear_color,
            generation: 0,
            rendered_generation: 0,
            disposed: false,
        }
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Read-only access to the transform hierarchy.
    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Mutable access to the transform hierarchy. Marks the scene dirty.
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        self.invalidate();
        &mut self.graph
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.invalidate();
        self.lights.push(light);
    }

    /// Lights in insertion order.
    #[must_use]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Current generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether scene data changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Record that the renderer consumed the current generation.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Release all nodes and lights. The scene stays usable but empty.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.graph.clear();
        self.lights.clear();
        self.disposed = true;
        self.invalidate();
    }

    /// Whether [`dispose`](Self::dispose) ran.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;

    #[test]
    fn mutation_marks_dirty_until_rendered() {
        let mut scene = Scene::new([0.0, 0.0, 0.0, 1.0]);
        assert!(!scene.is_dirty());
        let _ = scene.graph_mut().add_node("n", Mat4::IDENTITY, None, None);
        assert!(scene.is_dirty());
        scene.mark_rendered();
        assert!(!scene.is_dirty());
        scene.add_light(Light::hemispheric("sky", Vec3::Y, 1.0));
        assert!(scene.is_dirty());
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut scene = Scene::new([0.0; 4]);
        scene.add_light(Light::hemispheric("sky", Vec3::Y, 1.0));
        scene.dispose();
        let generation = scene.generation();
        scene.dispose();
        assert!(scene.is_disposed());
        assert!(scene.lights().is_empty());
        assert_eq!(scene.generation(), generation);
    }
}
