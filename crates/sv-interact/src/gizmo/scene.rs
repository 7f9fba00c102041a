//! Gizmo sub-scene construction

use glam::Vec3;
use sv_core::{GizmoConfig, Node, NodeId, Scene, SceneError, Shape, Transform};

use super::targets::SnapFace;
use crate::indicator::attach_axis_triad;

const CUBE_COLOR: [f32; 4] = [0.75, 0.75, 0.78, 1.0];
const RING_COLOR: [f32; 4] = [0.63, 0.63, 0.67, 1.0];
const HANDLE_COLOR: [f32; 4] = [1.0, 0.71, 0.24, 1.0];
const RING_SEGMENTS: usize = 64;
const FACE_THICKNESS: f32 = 0.02;
const FACE_INSET: f32 = 0.9;

/// Nodes of the gizmo sub-scene the gizmo needs to reach directly
#[derive(Debug, Clone, Copy)]
pub(super) struct GizmoNodes {
    pub cube: NodeId,
    pub handle: NodeId,
}

/// Point on the handle ring: `(radius, 0, 0)` rotated by `angle` about +Y
pub(super) fn ring_point(radius: f32, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(radius * cos, 0.0, -radius * sin)
}

/// Build the cube, face plates, axis helper, ring and drag handle
pub(super) fn build(scene: &mut Scene, config: &GizmoConfig) -> Result<GizmoNodes, SceneError> {
    let half = config.cube_size * 0.5;

    let cube = scene.add(
        Node::new("gizmo_cube")
            .with_shape(Shape::Box {
                size: Vec3::splat(config.cube_size),
            })
            .with_color(CUBE_COLOR),
    );

    let plates = scene.add_child(cube, Node::new("gizmo_faces").non_pickable())?;
    for face in SnapFace::ALL {
        let normal = face.normal();
        // Thin along the face normal, slightly smaller than the cube across it
        let size = Vec3::select(
            normal.abs().cmpgt(Vec3::splat(0.5)),
            Vec3::splat(FACE_THICKNESS),
            Vec3::splat(config.cube_size * FACE_INSET),
        );
        scene.add_child(
            plates,
            Node::new(format!("gizmo_face_{}", face.label().to_lowercase()))
                .with_shape(Shape::Box { size })
                .with_color(face.color())
                .with_transform(Transform::from_translation(
                    normal * (half + FACE_THICKNESS * 0.5),
                )),
        )?;
    }

    if config.show_axes {
        attach_axis_triad(scene, cube, "gizmo_axes", config.cube_size)?;
    }

    let ring = scene.add(Node::new("gizmo_ring").non_pickable());
    for i in 0..RING_SEGMENTS {
        let a0 = i as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
        let a1 = (i + 1) as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
        let start = ring_point(config.ring_radius, a0);
        let end = ring_point(config.ring_radius, a1);
        scene.add_child(
            ring,
            Node::new(format!("gizmo_ring_{i}"))
                .with_shape(Shape::Line { end: end - start })
                .with_color(RING_COLOR)
                .with_transform(Transform::from_translation(start)),
        )?;
    }

    let handle = scene.add(
        Node::new("gizmo_handle")
            .with_shape(Shape::Sphere {
                radius: config.handle_radius,
            })
            .with_color(HANDLE_COLOR)
            .with_transform(Transform::from_translation(ring_point(
                config.ring_radius,
                0.0,
            ))),
    );

    Ok(GizmoNodes { cube, handle })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_cube_and_handle_are_pickable() {
        let mut scene = Scene::new();
        let nodes = build(&mut scene, &GizmoConfig::default()).unwrap();

        let pickable: Vec<NodeId> = scene
            .roots()
            .iter()
            .flat_map(|&root| scene.traverse(root))
            .filter(|&id| scene.is_pickable(id))
            .collect();
        assert_eq!(pickable, vec![nodes.cube, nodes.handle]);
    }

    #[test]
    fn test_face_plates_sit_on_cube_faces() {
        let mut scene = Scene::new();
        let config = GizmoConfig::default();
        let nodes = build(&mut scene, &config).unwrap();

        let plates = scene.get(nodes.cube).unwrap().children()[0];
        let children = scene.get(plates).unwrap().children();
        for (&plate, face) in children.iter().zip(SnapFace::ALL) {
            let position = scene.world_position(plate).unwrap();
            assert!(position.dot(face.normal()) > config.cube_size * 0.5);
            let Some(Shape::Box { size }) = scene.get(plate).unwrap().shape else {
                panic!("face plate must be a box");
            };
            assert!((size.dot(face.normal().abs()) - FACE_THICKNESS).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ring_point() {
        assert!(ring_point(2.0, 0.0).abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6));
        let quarter = ring_point(2.0, std::f32::consts::FRAC_PI_2);
        assert!(quarter.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-6));
        let rotated = glam::Quat::from_rotation_y(0.7) * Vec3::new(2.0, 0.0, 0.0);
        assert!(ring_point(2.0, 0.7).abs_diff_eq(rotated, 1e-6));
    }
}
