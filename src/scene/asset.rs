use glam::Mat4;

use super::graph::NodeId;
use super::mesh::Mesh;
use super::Scene;

/// One node as produced by a format reader.
#[derive(Debug, Clone)]
pub struct AssetNode {
    /// Node name as authored.
    pub name: String,
    /// Transform relative to `parent`.
    pub local: Mat4,
    /// Index of the parent inside the same container.
    pub parent: Option<usize>,
    /// Mesh carried by the node.
    pub mesh: Option<Mesh>,
}

/// Everything a reader produced for one model resource, ready to be
/// merged into a [`Scene`].
#[derive(Debug, Clone, Default)]
pub struct AssetContainer {
    /// Locator the container was loaded from.
    pub source: String,
    nodes: Vec<AssetNode>,
}

impl AssetContainer {
    /// Empty container for `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
        }
    }

    /// Append a node and return its container index. A parent index that
    /// does not refer to an earlier node is dropped.
    pub fn push(&mut self, mut node: AssetNode) -> usize {
        let index = self.nodes.len();
        node.parent = node.parent.filter(|p| *p < index);
        self.nodes.push(node);
        index
    }

    /// Append a root node carrying `mesh`.
    pub fn push_mesh(&mut self, name: impl Into<String>, mesh: Mesh) -> usize {
        self.push(AssetNode {
            name: name.into(),
            local: Mat4::IDENTITY,
            parent: None,
            mesh: Some(mesh),
        })
    }

    /// Nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[AssetNode] {
        &self.nodes
    }

    /// Number of nodes that carry a mesh.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.mesh.is_some()).count()
    }

    /// Total vertices across all meshes.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(|n| n.mesh.as_ref())
            .map(|m| m.positions.len())
            .sum()
    }

    /// Move every node into `scene`, keeping the container's hierarchy.
    /// Returns the scene handles of the nodes that carry meshes.
    pub fn add_all_to_scene(self, scene: &mut Scene) -> Vec<NodeId> {
        let graph = scene.graph_mut();
        let mut mapped: Vec<NodeId> = Vec::with_capacity(self.nodes.len());
        let mut mesh_nodes = Vec::new();
        for node in self.nodes {
            let parent = node.parent.and_then(|p| mapped.get(p).copied());
            let has_mesh = node.mesh.is_some();
            let id = graph.add_node(node.name, node.local, parent, node.mesh);
            if has_mesh {
                mesh_nodes.push(id);
            }
            mapped.push(id);
        }
        mesh_nodes
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn merge_keeps_hierarchy() {
        let mut container = AssetContainer::new("test.gltf");
        let root = container.push(AssetNode {
            name: "root".into(),
            local: Mat4::from_translation(Vec3::X),
            parent: None,
            mesh: None,
        });
        let _child = container.push(AssetNode {
            name: "child".into(),
            local: Mat4::IDENTITY,
            parent: Some(root),
            mesh: Some(Mesh::new(vec![Vec3::ZERO], Vec::new(), Vec::new())),
        });
        assert_eq!(container.mesh_count(), 1);
        assert_eq!(container.vertex_count(), 1);

        let mut scene = Scene::new([0.0; 4]);
        let meshes = container.add_all_to_scene(&mut scene);
        assert_eq!(meshes.len(), 1);
        let node = scene.graph().node(meshes[0]).unwrap();
        assert!(node.parent().is_some());
        assert_eq!(node.world().transform_point3(Vec3::ZERO), Vec3::X);
    }

    #[test]
    fn forward_parent_reference_is_dropped() {
        let mut container = AssetContainer::new("x");
        let idx = container.push(AssetNode {
            name: "orphan".into(),
            local: Mat4::IDENTITY,
            parent: Some(5),
            mesh: None,
        });
        assert_eq!(container.nodes()[idx].parent, None);
    }
}
