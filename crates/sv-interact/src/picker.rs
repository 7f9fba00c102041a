//! Ray-based picking
//!
//! A pick walks every candidate's subtree, intersects the world ray with each
//! pickable shape in local space and keeps the nearest hit. Pickability is the
//! node's cached effective flag, so decorations parented under non-pickable
//! nodes are skipped without walking their ancestors.

use glam::{Vec2, Vec3};
use sv_core::{NodeId, Scene};
use sv_renderer::{Camera, Ray, ray_shape_intersection};

/// A ray hit on a pickable node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Candidate whose subtree contains the hit node
    pub object: NodeId,
    /// Node whose shape was hit
    pub node: NodeId,
    /// Distance from the ray origin along the ray
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Outward surface normal in the hit node's local space
    pub local_normal: Vec3,
}

/// World ray through a pointer position given in viewport pixels
pub fn pick_ray(camera: &Camera, pointer: Vec2, viewport: Vec2) -> Ray {
    camera.screen_to_ray(pointer.x, pointer.y, viewport.x, viewport.y)
}

/// Nearest pickable hit under the pointer, if any
pub fn pick(
    scene: &Scene,
    camera: &Camera,
    pointer: Vec2,
    viewport: Vec2,
    candidates: &[NodeId],
) -> Option<PickHit> {
    let ray = pick_ray(camera, pointer, viewport);
    pick_all(scene, &ray, candidates).into_iter().next()
}

/// Every pickable hit along `ray`, nearest first.
///
/// Hits at equal distance keep candidate order, then subtree pre-order.
pub fn pick_all(scene: &Scene, ray: &Ray, candidates: &[NodeId]) -> Vec<PickHit> {
    let direction_length = ray.direction.length();
    let mut hits = Vec::new();

    for &candidate in candidates {
        for id in scene.traverse(candidate) {
            if !scene.is_pickable(id) {
                continue;
            }
            let Some(node) = scene.get(id) else {
                continue;
            };
            let Some(shape) = node.shape.as_ref().filter(|s| s.is_solid()) else {
                continue;
            };

            let world = node.world_matrix();
            if world.determinant().abs() <= f32::EPSILON {
                continue;
            }
            let local_ray = ray.transformed(&world.inverse());

            if let Some(hit) = ray_shape_intersection(&local_ray, shape) {
                hits.push(PickHit {
                    object: candidate,
                    node: id,
                    distance: hit.t * direction_length,
                    point: ray.at(hit.t),
                    local_normal: hit.normal,
                });
            }
        }
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sv_core::{CameraConfig, Node, Shape, Transform};

    fn camera() -> Camera {
        Camera::new(&CameraConfig::default(), 1.0)
    }

    fn sphere(scene: &mut Scene, name: &str, at: Vec3) -> NodeId {
        scene.add(
            Node::new(name)
                .with_shape(Shape::Sphere { radius: 1.0 })
                .with_transform(Transform::from_translation(at)),
        )
    }

    const VIEWPORT: Vec2 = Vec2::new(400.0, 400.0);
    const CENTER: Vec2 = Vec2::new(200.0, 200.0);

    #[test]
    fn test_pick_nearest_of_overlapping() {
        let mut scene = Scene::new();
        let far = sphere(&mut scene, "far", Vec3::new(0.0, 0.0, -5.0));
        let near = sphere(&mut scene, "near", Vec3::new(0.0, 0.0, 5.0));

        let hit = pick(&scene, &camera(), CENTER, VIEWPORT, &[far, near]).unwrap();
        assert_eq!(hit.object, near);
        assert_relative_eq!(hit.distance, 9.0, epsilon = 1e-3);
        assert!(hit.point.abs_diff_eq(Vec3::new(0.0, 0.0, 6.0), 1e-3));
    }

    #[test]
    fn test_pick_outside_silhouette_returns_none() {
        let mut scene = Scene::new();
        let a = sphere(&mut scene, "a", Vec3::ZERO);
        let corners = [
            Vec2::ZERO,
            Vec2::new(400.0, 0.0),
            Vec2::new(0.0, 400.0),
            VIEWPORT,
            Vec2::new(200.0, 10.0),
        ];
        for corner in corners {
            assert!(pick(&scene, &camera(), corner, VIEWPORT, &[a]).is_none());
        }
    }

    #[test]
    fn test_non_candidates_are_ignored() {
        let mut scene = Scene::new();
        let candidate = sphere(&mut scene, "candidate", Vec3::new(0.0, 0.0, -5.0));
        sphere(&mut scene, "other", Vec3::ZERO);

        let hit = pick(&scene, &camera(), CENTER, VIEWPORT, &[candidate]).unwrap();
        assert_eq!(hit.object, candidate);
    }

    #[test]
    fn test_hits_descend_into_children() {
        let mut scene = Scene::new();
        let group = scene.add(Node::new("group"));
        let child = scene
            .add_child(
                group,
                Node::new("child")
                    .with_shape(Shape::Box {
                        size: Vec3::splat(2.0),
                    })
                    .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 2.0))),
            )
            .unwrap();

        let hit = pick(&scene, &camera(), CENTER, VIEWPORT, &[group]).unwrap();
        assert_eq!(hit.object, group);
        assert_eq!(hit.node, child);
        assert_eq!(hit.local_normal, Vec3::Z);
    }

    #[test]
    fn test_non_pickable_ancestor_excludes_hit() {
        let mut scene = Scene::new();
        let target = sphere(&mut scene, "target", Vec3::ZERO);
        let decoration = scene
            .add_child(target, Node::new("decoration").non_pickable())
            .unwrap();
        scene
            .add_child(
                decoration,
                Node::new("marker")
                    .with_shape(Shape::Box {
                        size: Vec3::splat(1.0),
                    })
                    .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 4.0))),
            )
            .unwrap();

        let hits = pick_all(
            &scene,
            &pick_ray(&camera(), CENTER, VIEWPORT),
            &[target],
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, target);
    }

    #[test]
    fn test_equal_distance_keeps_candidate_order() {
        let mut scene = Scene::new();
        let first = sphere(&mut scene, "first", Vec3::ZERO);
        let second = sphere(&mut scene, "second", Vec3::ZERO);

        let hit = pick(&scene, &camera(), CENTER, VIEWPORT, &[first, second]).unwrap();
        assert_eq!(hit.object, first);
        let hit = pick(&scene, &camera(), CENTER, VIEWPORT, &[second, first]).unwrap();
        assert_eq!(hit.object, second);
    }
}
