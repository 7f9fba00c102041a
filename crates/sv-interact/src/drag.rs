//! Plane-constrained dragging of the selected object
//!
//! A session starts when a press hits an object and ends on the next release,
//! wherever it happens. While a session is active the orbit controls are
//! disabled so the drag is the only writer of the object's transform.

use glam::Vec3;
use sv_core::{DragConfig, NodeId, Scene, SceneError};
use sv_renderer::{Camera, OrbitControls, Plane, Ray};

/// State captured when a drag begins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Object being dragged
    pub object: NodeId,
    /// Constraint plane through the object's world position
    pub plane: Plane,
    /// Index of the world axis the plane is perpendicular to
    pub axis: usize,
    /// World coordinate along `axis`, fixed for the whole session
    pub held: f32,
}

/// World axis the drag plane is perpendicular to: the one the camera looks
/// along the most. Ties prefer Z, then Y, then X.
pub fn drag_plane_normal(camera_forward: Vec3) -> (usize, Vec3) {
    let f = camera_forward.abs();
    if f.z >= f.x && f.z >= f.y {
        (2, Vec3::Z)
    } else if f.y >= f.x {
        (1, Vec3::Y)
    } else {
        (0, Vec3::X)
    }
}

/// Owns the optional drag session
#[derive(Debug, Clone, Default)]
pub struct DragController {
    session: Option<DragSession>,
    parallel_epsilon: f32,
}

impl DragController {
    pub fn new(config: &DragConfig) -> Self {
        Self {
            session: None,
            parallel_epsilon: config.parallel_epsilon,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start dragging `object` and disable the orbit controls.
    ///
    /// A session already in progress is replaced.
    pub fn begin(
        &mut self,
        scene: &Scene,
        object: NodeId,
        camera: &Camera,
        controls: &mut OrbitControls,
    ) -> Result<DragSession, SceneError> {
        let position = scene
            .world_position(object)
            .ok_or(SceneError::NodeNotFound(object))?;
        let (axis, normal) = drag_plane_normal(camera.forward());

        let session = DragSession {
            object,
            plane: Plane::from_point_normal(position, normal),
            axis,
            held: position[axis],
        };
        self.session = Some(session);
        controls.enabled = false;
        tracing::debug!("Drag started on axis {} at {:?}", axis, position);
        Ok(session)
    }

    /// Move the dragged object to where `ray` meets the drag plane.
    ///
    /// Returns whether the object moved. A ray parallel to the plane, or one
    /// pointing away from it, leaves the object where it is.
    pub fn drag(&mut self, scene: &mut Scene, ray: &Ray) -> Result<bool, SceneError> {
        let Some(session) = self.session else {
            return Ok(false);
        };
        let Some(mut target) = session.plane.intersect_ray(ray, self.parallel_epsilon) else {
            return Ok(false);
        };
        target[session.axis] = session.held;

        let parent_world = scene
            .parent_world_matrix(session.object)
            .ok_or(SceneError::NodeNotFound(session.object))?;
        let local = parent_world.inverse().transform_point3(target);

        let mut transform = scene
            .get(session.object)
            .ok_or(SceneError::NodeNotFound(session.object))?
            .transform;
        transform.translation = local;
        scene.set_transform(session.object, transform)?;
        Ok(true)
    }

    /// End any session and re-enable the orbit controls.
    ///
    /// Returns whether a session was active.
    pub fn end(&mut self, controls: &mut OrbitControls) -> bool {
        controls.enabled = true;
        let ended = self.session.take().is_some();
        if ended {
            tracing::debug!("Drag ended");
        }
        ended
    }
}
