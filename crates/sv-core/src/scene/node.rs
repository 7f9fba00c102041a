//! Scene node definition

use glam::Mat4;
use uuid::Uuid;

use super::Transform;
use crate::shape::Shape;

/// Identifier of a node inside a [`super::Scene`]
pub type NodeId = Uuid;

/// A node in the scene hierarchy
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Transform relative to the parent (or the world for roots)
    pub transform: Transform,
    /// Geometry, if the node draws anything
    pub shape: Option<Shape>,
    /// Material color (RGBA)
    pub color: [f32; 4],
    pub visible: bool,
    /// Pickability requested for this node alone
    pub(super) pickable: bool,
    /// Pickability after folding in every ancestor (kept up to date by the scene)
    pub(super) effective_pickable: bool,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) world: Mat4,
}

impl Node {
    /// Create an empty, visible, pickable node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transform: Transform::IDENTITY,
            shape: None,
            color: [1.0; 4],
            visible: true,
            pickable: true,
            effective_pickable: true,
            parent: None,
            children: Vec::new(),
            world: Mat4::IDENTITY,
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Exclude this node and everything below it from picking
    pub fn non_pickable(mut self) -> Self {
        self.pickable = false;
        self.effective_pickable = false;
        self
    }

    /// Parent node, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Cached world matrix (valid after the scene refreshed transforms)
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// Whether the node may be returned by a pick (own flag and all ancestors)
    pub fn is_pickable(&self) -> bool {
        self.effective_pickable
    }
}
