//! Scene graph
//!
//! Nodes form a forest. The scene keeps two derived values current for every
//! node so that readers never walk the hierarchy:
//! - the world matrix (refreshed for a subtree whenever it is re-parented or
//!   re-transformed through the scene)
//! - the effective pickable flag (a node is pickable only if it and every
//!   ancestor are)

mod node;
mod transform;

use std::collections::HashMap;

use glam::{Mat4, Vec3};

pub use node::{Node, NodeId};
pub use transform::Transform;

/// Scene graph errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("Attaching would create a cycle")]
    WouldCreateCycle,
    #[error("Node is already attached to a parent: {0}")]
    AlreadyAttached(NodeId),
}

/// Node hierarchy with cached world transforms
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    roots: Vec<NodeId>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root nodes in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable access to a node.
    ///
    /// Transform edits made through this handle are not reflected in world
    /// matrices; use [`Scene::set_transform`] to move nodes.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Add a node as a new root
    pub fn add(&mut self, mut node: Node) -> NodeId {
        let id = node.id;
        node.parent = None;
        node.children.clear();
        node.effective_pickable = node.pickable;
        node.world = node.transform.matrix();
        self.roots.push(id);
        self.nodes.insert(id, node);
        id
    }

    /// Add a node directly under `parent`
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        let id = self.add(node);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Attach a root node as the last child of `parent`
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        let existing_parent = self
            .nodes
            .get(&child)
            .ok_or(SceneError::NodeNotFound(child))?
            .parent;
        if existing_parent.is_some() {
            return Err(SceneError::AlreadyAttached(child));
        }
        if parent == child || self.ancestors(parent).any(|id| id == child) {
            return Err(SceneError::WouldCreateCycle);
        }

        self.roots.retain(|&id| id != child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        self.refresh_subtree(child);
        Ok(())
    }

    /// Detach a node from its parent; it becomes a root
    pub fn detach(&mut self, child: NodeId) -> Result<(), SceneError> {
        let parent = self
            .nodes
            .get(&child)
            .ok_or(SceneError::NodeNotFound(child))?
            .parent;
        let Some(parent) = parent else {
            return Ok(());
        };

        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|&id| id != child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
        self.roots.push(child);
        self.refresh_subtree(child);
        Ok(())
    }

    /// Remove a node and its whole subtree, returning the removed node
    pub fn remove(&mut self, id: NodeId) -> Result<Node, SceneError> {
        if !self.contains(id) {
            return Err(SceneError::NodeNotFound(id));
        }
        self.detach(id)?;
        self.roots.retain(|&root| root != id);

        let subtree = self.traverse(id);
        let mut removed = None;
        for node_id in subtree {
            let node = self.nodes.remove(&node_id);
            if node_id == id {
                removed = node;
            }
        }
        removed.ok_or(SceneError::NodeNotFound(id))
    }

    /// Iterate over the ancestors of a node, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.get(&id).and_then(|n| n.parent), move |current| {
            self.nodes.get(current).and_then(|n| n.parent)
        })
    }

    /// Depth-first pre-order traversal of a subtree (children in insertion order)
    pub fn traverse(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            order.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    /// Change a node's own pickable flag and propagate it to the subtree
    pub fn set_pickable(&mut self, id: NodeId, pickable: bool) -> Result<(), SceneError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(SceneError::NodeNotFound(id))?;
        node.pickable = pickable;
        self.refresh_subtree(id);
        Ok(())
    }

    /// Effective pickability; unknown nodes are never pickable
    pub fn is_pickable(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.effective_pickable)
    }

    /// Replace a node's local transform and refresh its subtree
    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> Result<(), SceneError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(SceneError::NodeNotFound(id))?;
        node.transform = transform;
        self.refresh_subtree(id);
        Ok(())
    }

    /// Cached world matrix of a node
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.nodes.get(&id).map(|n| n.world)
    }

    /// World-space position of a node's origin
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.w_axis.truncate())
    }

    /// World matrix of a node's parent (identity for roots)
    pub fn parent_world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let node = self.nodes.get(&id)?;
        Some(
            node.parent
                .and_then(|p| self.world_matrix(p))
                .unwrap_or(Mat4::IDENTITY),
        )
    }

    /// Recompute derived state for `id` and its descendants
    fn refresh_subtree(&mut self, id: NodeId) {
        let (parent_world, parent_pickable) = match self.nodes.get(&id).and_then(|n| n.parent) {
            Some(parent) => self
                .nodes
                .get(&parent)
                .map(|p| (p.world, p.effective_pickable))
                .unwrap_or((Mat4::IDENTITY, true)),
            None => (Mat4::IDENTITY, true),
        };

        let mut stack = vec![(id, parent_world, parent_pickable)];
        while let Some((current, parent_world, parent_pickable)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(&current) else {
                continue;
            };
            node.world = parent_world * node.transform.matrix();
            node.effective_pickable = parent_pickable && node.pickable;
            let (world, pickable) = (node.world, node.effective_pickable);
            stack.extend(node.children.iter().map(|&c| (c, world, pickable)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn chain() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let a = scene.add(Node::new("a").with_transform(Transform::from_translation(Vec3::X)));
        let b = scene
            .add_child(a, Node::new("b").with_transform(Transform::from_translation(Vec3::Y)))
            .unwrap();
        let c = scene
            .add_child(b, Node::new("c").with_transform(Transform::from_translation(Vec3::Z)))
            .unwrap();
        (scene, a, b, c)
    }

    #[test]
    fn test_world_transforms_compose() {
        let (scene, _, _, c) = chain();
        assert_eq!(scene.world_position(c), Some(Vec3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_set_transform_refreshes_descendants() {
        let (mut scene, a, _, c) = chain();
        scene
            .set_transform(
                a,
                Transform {
                    translation: Vec3::ZERO,
                    rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
                    scale: Vec3::ONE,
                },
            )
            .unwrap();
        // Y then Z under a 90 degree roll: Y maps to -X
        let p = scene.world_position(c).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(-1.0, 0.0, 1.0), 1e-5));
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let (scene, a, b, c) = chain();
        let ancestors: Vec<_> = scene.ancestors(c).collect();
        assert_eq!(ancestors, vec![b, a]);
        assert_eq!(scene.ancestors(a).count(), 0);
    }

    #[test]
    fn test_attach_rejects_cycle() {
        let (mut scene, a, _, c) = chain();
        scene.detach(a).unwrap();
        assert_eq!(scene.attach(c, a), Err(SceneError::WouldCreateCycle));
        assert_eq!(scene.attach(a, a), Err(SceneError::WouldCreateCycle));
    }

    #[test]
    fn test_attach_rejects_attached_child() {
        let (mut scene, a, _, c) = chain();
        assert_eq!(scene.attach(a, c), Err(SceneError::AlreadyAttached(c)));
    }

    #[test]
    fn test_non_pickable_propagates_to_descendants() {
        let (mut scene, a, b, c) = chain();
        assert!(scene.is_pickable(c));

        scene.set_pickable(b, false).unwrap();
        assert!(scene.is_pickable(a));
        assert!(!scene.is_pickable(b));
        assert!(!scene.is_pickable(c));

        scene.set_pickable(b, true).unwrap();
        assert!(scene.is_pickable(c));
    }

    #[test]
    fn test_attach_under_non_pickable_parent() {
        let mut scene = Scene::new();
        let decoration = scene.add(Node::new("decoration").non_pickable());
        let child = scene.add_child(decoration, Node::new("child")).unwrap();
        assert!(!scene.is_pickable(child));

        scene.detach(child).unwrap();
        assert!(scene.is_pickable(child));
        assert!(scene.roots().contains(&child));
    }

    #[test]
    fn test_remove_drops_subtree() {
        let (mut scene, a, b, c) = chain();
        let removed = scene.remove(b).unwrap();
        assert_eq!(removed.name, "b");
        assert!(!scene.contains(b));
        assert!(!scene.contains(c));
        assert!(scene.get(a).unwrap().children().is_empty());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_traverse_preorder() {
        let mut scene = Scene::new();
        let root = scene.add(Node::new("root"));
        let first = scene.add_child(root, Node::new("first")).unwrap();
        let nested = scene.add_child(first, Node::new("nested")).unwrap();
        let second = scene.add_child(root, Node::new("second")).unwrap();
        assert_eq!(scene.traverse(root), vec![root, first, nested, second]);
    }
}
