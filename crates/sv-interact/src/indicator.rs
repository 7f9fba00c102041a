//! Axis triads used as the selection indicator and the gizmo axis helper

use glam::Vec3;
use sv_core::{Node, NodeId, Scene, SceneError, Shape};

/// X, Y and Z axis colors (RGBA)
pub const AXIS_COLORS: [[f32; 4]; 3] = [
    [1.0, 0.294, 0.294, 1.0],
    [0.294, 1.0, 0.392, 1.0],
    [0.294, 0.588, 1.0, 1.0],
];

/// Attach a non-pickable triad of colored axis lines under `parent`.
///
/// Returns the triad's root node; removing it removes the lines too.
pub fn attach_axis_triad(
    scene: &mut Scene,
    parent: NodeId,
    name: &str,
    length: f32,
) -> Result<NodeId, SceneError> {
    let root = scene.add_child(parent, Node::new(name).non_pickable())?;
    let axes = [("x", Vec3::X), ("y", Vec3::Y), ("z", Vec3::Z)];
    for ((label, axis), color) in axes.into_iter().zip(AXIS_COLORS) {
        scene.add_child(
            root,
            Node::new(format!("{name}_{label}"))
                .with_shape(Shape::Line { end: axis * length })
                .with_color(color),
        )?;
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triad_is_not_pickable() {
        let mut scene = Scene::new();
        let parent = scene.add(Node::new("parent"));
        let triad = attach_axis_triad(&mut scene, parent, "axes", 2.0).unwrap();

        let nodes = scene.traverse(triad);
        assert_eq!(nodes.len(), 4);
        assert!(nodes.iter().all(|&id| !scene.is_pickable(id)));
        assert!(scene.is_pickable(parent));
        assert_eq!(scene.get(triad).unwrap().parent(), Some(parent));
    }
}
