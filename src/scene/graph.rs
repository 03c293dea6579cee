use glam::Mat4;

use super::aabb::Aabb;
use super::mesh::Mesh;

/// Stable handle to a node in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Slot index inside the graph.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A transform node, optionally carrying a mesh.
#[derive(Debug, Clone)]
pub struct Node {
    /// Debug name.
    pub name: String,
    /// Transform relative to the parent (or world, for roots).
    pub local: Mat4,
    /// Mesh drawn with this node's world transform.
    pub mesh: Option<Mesh>,
    world: Mat4,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// World transform as of the last [`SceneGraph::update_world_matrices`].
    #[must_use]
    pub fn world(&self) -> Mat4 {
        self.world
    }

    /// Parent node, `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-backed transform hierarchy.
///
/// World matrices are cached and refreshed explicitly with
/// [`update_world_matrices`](Self::update_world_matrices); every structural
/// mutation in this type refreshes them itself.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Option<Node>>,
}

impl SceneGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Whether the graph holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a node under `parent` (or as a root).
    ///
    /// An unknown parent handle inserts the node as a root.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        local: Mat4,
        parent: Option<NodeId>,
        mesh: Option<Mesh>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = parent.filter(|p| self.node(*p).is_some());
        let parent_world = parent
            .and_then(|p| self.node(p))
            .map_or(Mat4::IDENTITY, Node::world);
        self.nodes.push(Some(Node {
            name: name.into(),
            local,
            mesh,
            world: parent_world * local,
            parent,
            children: Vec::new(),
        }));
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.push(id);
        }
        id
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Look up a node mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Replace a node's local transform and refresh world matrices.
    pub fn set_local(&mut self, id: NodeId, local: Mat4) {
        if let Some(node) = self.node_mut(id) {
            node.local = local;
            self.update_world_matrices();
        }
    }

    /// Live root nodes.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(id, _)| id)
    }

    /// All live nodes with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i as u32), n)))
    }

    /// Handles of every node that carries a mesh.
    #[must_use]
    pub fn mesh_nodes(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, n)| n.mesh.is_some())
            .map(|(id, _)| id)
            .collect()
    }

    /// `id` and every node below it, depth-first.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Move `child` under `new_parent` (or to the root level).
    ///
    /// With `preserve_world` the child's local transform is rewritten so its
    /// world transform is unchanged. Returns `false` (and does nothing) when
    /// either handle is dead or the move would create a cycle.
    pub fn set_parent(
        &mut self,
        child: NodeId,
        new_parent: Option<NodeId>,
        preserve_world: bool,
    ) -> bool {
        if self.node(child).is_none() {
            return false;
        }
        if let Some(p) = new_parent {
            if self.node(p).is_none() || self.descendants(child).contains(&p)
            {
                return false;
            }
        }

        self.update_world_matrices();
        let child_world = self.node(child).map_or(Mat4::IDENTITY, Node::world);
        let parent_world = new_parent
            .and_then(|p| self.node(p))
            .map_or(Mat4::IDENTITY, Node::world);

        let old_parent = self.node(child).and_then(Node::parent);
        if let Some(old) = old_parent.and_then(|p| self.node_mut(p)) {
            old.children.retain(|c| *c != child);
        }
        if let Some(p) = new_parent.and_then(|p| self.node_mut(p)) {
            p.children.push(child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = new_parent;
            if preserve_world {
                node.local = parent_world.inverse() * child_world;
            }
        }
        self.update_world_matrices();
        true
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Recompute every cached world matrix from the roots down.
    pub fn update_world_matrices(&mut self) {
        let roots: Vec<NodeId> = self.roots().collect();
        let mut stack: Vec<(NodeId, Mat4)> =
            roots.into_iter().map(|r| (r, Mat4::IDENTITY)).collect();
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.node_mut(id) else {
                continue;
            };
            node.world = parent_world * node.local;
            let world = node.world;
            stack.extend(node.children.iter().map(|c| (*c, world)));
        }
    }

    /// World-space bounds of the meshes in `id`'s subtree that pass
    /// `include`. Each mesh contributes its local box transformed by its
    /// world matrix.
    #[must_use]
    pub fn hierarchy_bounds(
        &self,
        id: NodeId,
        include: impl Fn(NodeId, &Mesh) -> bool,
    ) -> Option<Aabb> {
        self.bounds_of(self.descendants(id), include)
    }

    /// World-space bounds of the given nodes' meshes that pass `include`.
    #[must_use]
    pub fn bounds_of(
        &self,
        ids: impl IntoIterator<Item = NodeId>,
        include: impl Fn(NodeId, &Mesh) -> bool,
    ) -> Option<Aabb> {
        ids.into_iter()
            .filter_map(|id| {
                let node = self.node(id)?;
                let mesh = node.mesh.as_ref().filter(|m| include(id, m))?;
                Some(mesh.local_bounds()?.transformed(&node.world))
            })
            .reduce(Aabb::union)
    }
}
