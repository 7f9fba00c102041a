//! User-created pickable objects

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::OBJECT_GROUP_NAME;
use crate::scene::{Node, NodeId, Scene, SceneError};
use crate::shape::{Shape, ShapeKind};

/// Dimensions used when creating objects of each kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObjectDefaults {
    /// Sphere radius
    pub sphere_radius: f32,
    /// Box edge length
    pub box_size: f32,
    /// Cone base radius
    pub cone_radius: f32,
    /// Cone height
    pub cone_height: f32,
    /// Cylinder radius
    pub cylinder_radius: f32,
    /// Cylinder height
    pub cylinder_height: f32,
}

impl Default for ObjectDefaults {
    fn default() -> Self {
        Self {
            sphere_radius: 2.0,
            box_size: 3.0,
            cone_radius: 2.0,
            cone_height: 6.0,
            cylinder_radius: 2.0,
            cylinder_height: 4.0,
        }
    }
}

impl ObjectDefaults {
    /// Shape for a new object of the given kind
    pub fn shape(&self, kind: ShapeKind) -> Shape {
        match kind {
            ShapeKind::Sphere => Shape::Sphere {
                radius: self.sphere_radius,
            },
            ShapeKind::Box => Shape::Box {
                size: Vec3::splat(self.box_size),
            },
            ShapeKind::Cone => Shape::Cone {
                radius: self.cone_radius,
                height: self.cone_height,
            },
            ShapeKind::Cylinder => Shape::Cylinder {
                radius: self.cylinder_radius,
                height: self.cylinder_height,
            },
        }
    }
}

/// Owns the group node and the ordered list of pickable objects.
///
/// Objects are never destroyed, so the `"Object {n}"` names handed out here
/// stay unique for the registry's lifetime.
#[derive(Debug, Clone)]
pub struct ObjectRegistry {
    group: NodeId,
    objects: Vec<NodeId>,
    defaults: ObjectDefaults,
}

impl ObjectRegistry {
    /// Create the owning group node in `scene`
    pub fn new(scene: &mut Scene, defaults: ObjectDefaults) -> Self {
        let group = scene.add(Node::new(OBJECT_GROUP_NAME));
        Self {
            group,
            objects: Vec::new(),
            defaults,
        }
    }

    /// Group node every object is attached to
    pub fn group(&self) -> NodeId {
        self.group
    }

    /// Objects in creation order (the pick candidates)
    pub fn objects(&self) -> &[NodeId] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Create a new object at the group origin
    pub fn add_object(
        &mut self,
        scene: &mut Scene,
        kind: ShapeKind,
        color: [f32; 4],
    ) -> Result<NodeId, SceneError> {
        let name = format!("Object {}", self.objects.len() + 1);
        let node = Node::new(name.clone())
            .with_shape(self.defaults.shape(kind))
            .with_color(color);
        let id = scene.add_child(self.group, node)?;
        self.objects.push(id);
        tracing::debug!("Added {} as {}", kind, name);
        Ok(id)
    }

    /// Look up an object by its display name
    pub fn find_by_name(&self, scene: &Scene, name: &str) -> Option<NodeId> {
        self.objects
            .iter()
            .copied()
            .find(|&id| scene.get(id).is_some_and(|n| n.name == name))
    }

    /// Display names in creation order
    pub fn names<'a>(&'a self, scene: &'a Scene) -> impl Iterator<Item = &'a str> + 'a {
        self.objects
            .iter()
            .filter_map(|&id| scene.get(id).map(|n| n.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_OBJECT_COLOR;

    #[test]
    fn test_objects_are_named_sequentially() {
        let mut scene = Scene::new();
        let mut registry = ObjectRegistry::new(&mut scene, ObjectDefaults::default());

        let a = registry
            .add_object(&mut scene, ShapeKind::Sphere, DEFAULT_OBJECT_COLOR)
            .unwrap();
        let b = registry
            .add_object(&mut scene, ShapeKind::Cone, DEFAULT_OBJECT_COLOR)
            .unwrap();

        assert_eq!(scene.get(a).unwrap().name, "Object 1");
        assert_eq!(scene.get(b).unwrap().name, "Object 2");
        assert_eq!(registry.find_by_name(&scene, "Object 2"), Some(b));
        assert_eq!(registry.find_by_name(&scene, "Object 3"), None);
        assert_eq!(
            registry.names(&scene).collect::<Vec<_>>(),
            vec!["Object 1", "Object 2"]
        );
    }

    #[test]
    fn test_objects_belong_to_group() {
        let mut scene = Scene::new();
        let mut registry = ObjectRegistry::new(&mut scene, ObjectDefaults::default());
        let id = registry
            .add_object(&mut scene, ShapeKind::Box, [1.0, 0.0, 0.0, 1.0])
            .unwrap();

        let node = scene.get(id).unwrap();
        assert_eq!(node.parent(), Some(registry.group()));
        assert_eq!(node.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(
            node.shape,
            Some(Shape::Box {
                size: Vec3::splat(3.0)
            })
        );
        assert_eq!(scene.world_position(id), Some(Vec3::ZERO));
    }
}
