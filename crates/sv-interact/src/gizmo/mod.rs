//! Orientation gizmo
//!
//! A small cube view drawn in its own square surface. While idle its camera
//! follows the main camera's viewing direction. Dragging the ring handle or
//! snapping to a face or arrow target rotates the cube and drives the main
//! camera by the same rotation about the orbit pivot.
//!
//! ```text
//!            press handle            release
//!   Idle ──────────────────▶ RingDragging ──────▶ Idle
//!    │
//!    │ press face / arrow      progress reaches 1
//!    └──────────────────▶ Animating ────────────▶ Idle
//! ```
//!
//! The main camera is only written in `RingDragging` and `Animating`; idle
//! sync only reads it. Callers must not hold the main rig's lock while calling
//! into the gizmo.

mod scene;
mod targets;

pub use targets::{ArrowControl, SnapFace, SnapTarget};

use std::time::{Duration, Instant};

use glam::{Quat, Vec2, Vec3};
use sv_core::{FaceLabels, GizmoConfig, Scene, SceneError, Transform};
use sv_renderer::{Camera, CameraPose, DrawList, Projector, SharedCameraRig};

use crate::animation::SnapScheduler;
use crate::picker::pick;
use scene::{GizmoNodes, ring_point};

/// Distance of arrow buttons from the surface edge, in pixels
pub const ARROW_INSET: f32 = 14.0;

/// Interaction mode of the gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoMode {
    #[default]
    Idle,
    RingDragging,
    Animating,
}

/// What a press on the gizmo surface landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoTarget {
    /// The ring drag handle
    Handle,
    /// A cube face or arrow control
    Snap(SnapTarget),
}

/// Everything needed to paint the gizmo surface for one frame
#[derive(Debug, Clone, Default)]
pub struct GizmoFrame {
    /// Projected cube, plates, axes, ring and handle
    pub draw_list: DrawList,
    /// Labels of faces turned towards the gizmo camera, at their screen centers
    pub labels: Vec<(SnapFace, Vec2)>,
    /// Arrow buttons and their centers
    pub arrows: Vec<(ArrowControl, Vec2)>,
}

/// Cube view that mirrors and drives the main camera
#[derive(Debug)]
pub struct OrientationGizmo {
    config: GizmoConfig,
    scene: Scene,
    nodes: GizmoNodes,
    camera: Camera,
    camera_distance: f32,
    orientation: Quat,
    handle_angle: f32,
    mode: GizmoMode,
    last_pointer_x: f32,
    scheduler: SnapScheduler,
    camera_from: Option<CameraPose>,
    main: Option<SharedCameraRig>,
    projector: Projector,
}

impl OrientationGizmo {
    /// Build the gizmo scene.
    ///
    /// Without a main rig the gizmo still rotates its own cube but never moves
    /// a camera outside itself.
    pub fn new(config: &GizmoConfig, main: Option<SharedCameraRig>) -> Result<Self, SceneError> {
        let mut scene = Scene::new();
        let nodes = scene::build(&mut scene, config)?;

        let position = Vec3::from_array(config.camera_position);
        let camera = Camera {
            position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: config.fov_degrees.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        };

        if main.is_none() {
            tracing::info!("Orientation gizmo running without a main camera");
        }

        Ok(Self {
            config: config.clone(),
            scene,
            nodes,
            camera,
            camera_distance: position.length(),
            orientation: Quat::IDENTITY,
            handle_angle: 0.0,
            mode: GizmoMode::Idle,
            last_pointer_x: 0.0,
            scheduler: SnapScheduler::new(Duration::from_millis(config.snap_duration_ms)),
            camera_from: None,
            main,
            projector: Projector::new(),
        })
    }

    pub fn config(&self) -> &GizmoConfig {
        &self.config
    }

    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    /// Current cube orientation
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Gizmo camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Gizmo sub-scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Angle of the drag handle on its ring, in radians
    pub fn handle_angle(&self) -> f32 {
        self.handle_angle
    }

    /// Side of the square gizmo surface in pixels
    pub fn size(&self) -> f32 {
        self.config.size
    }

    pub fn has_main_camera(&self) -> bool {
        self.main.is_some()
    }

    /// Find what lies under a pointer position on the gizmo surface
    pub fn hit_test(&self, pointer: Vec2) -> Option<GizmoTarget> {
        if self.config.show_arrows {
            let arrow = ArrowControl::ALL.into_iter().find(|arrow| {
                pointer.distance(arrow.position(self.config.size, ARROW_INSET))
                    <= self.config.arrow_hit_radius
            });
            if let Some(arrow) = arrow {
                return Some(GizmoTarget::Snap(SnapTarget::Arrow(arrow)));
            }
        }

        let hit = pick(
            &self.scene,
            &self.camera,
            pointer,
            Vec2::splat(self.config.size),
            &[self.nodes.handle, self.nodes.cube],
        )?;

        if hit.node == self.nodes.handle {
            Some(GizmoTarget::Handle)
        } else {
            let face = SnapFace::from_local_normal(hit.local_normal);
            Some(GizmoTarget::Snap(SnapTarget::Face(face)))
        }
    }

    /// Handle a press at `pointer` (gizmo surface pixels).
    ///
    /// Returns what was hit, whether or not it changed the mode.
    pub fn pointer_pressed(&mut self, pointer: Vec2, now: Instant) -> Option<GizmoTarget> {
        let target = self.hit_test(pointer)?;
        match target {
            GizmoTarget::Handle => {
                if self.mode == GizmoMode::Idle {
                    self.mode = GizmoMode::RingDragging;
                    self.last_pointer_x = pointer.x;
                    tracing::debug!("Ring drag started");
                }
            }
            GizmoTarget::Snap(snap) => {
                self.snap_to(snap, now);
            }
        }
        Some(target)
    }

    /// Handle pointer motion; only a ring drag reacts to it
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        if self.mode != GizmoMode::RingDragging {
            return;
        }
        let dx = pointer.x - self.last_pointer_x;
        self.last_pointer_x = pointer.x;
        if dx == 0.0 {
            return;
        }

        let angle = dx * self.config.ring_sensitivity;
        self.handle_angle += angle;
        self.place_handle();

        let rotation = Quat::from_rotation_y(angle);
        self.set_orientation((rotation * self.orientation).normalize());
        if let Some(main) = &self.main {
            main.lock().rotate(rotation);
        }
    }

    /// Handle a release anywhere; ends a ring drag
    pub fn pointer_released(&mut self) -> bool {
        if self.mode != GizmoMode::RingDragging {
            return false;
        }
        self.mode = GizmoMode::Idle;
        tracing::debug!("Ring drag ended");
        true
    }

    /// Start a snap towards `target`.
    ///
    /// Returns false when the request was dropped because a snap is running
    /// or a ring drag is in progress.
    pub fn snap_to(&mut self, target: SnapTarget, now: Instant) -> bool {
        if self.mode == GizmoMode::RingDragging {
            return false;
        }
        let step = self.config.arrow_step_degrees.to_radians();
        let goal = target.orientation(self.orientation, step);
        if self.scheduler.request(self.orientation, goal, now).is_none() {
            return false;
        }

        self.camera_from = self.main.as_ref().map(|main| main.lock().pose());
        self.mode = GizmoMode::Animating;
        tracing::debug!("Snapping to {:?}", target);
        true
    }

    /// Per-frame tick: advance a running snap, or follow the main camera when idle
    pub fn update(&mut self, now: Instant) {
        match self.mode {
            GizmoMode::Animating => self.advance_snap(now),
            GizmoMode::Idle => self.sync_from_main(),
            GizmoMode::RingDragging => {}
        }
    }

    /// Project the gizmo scene for painting
    pub fn render(&mut self) -> GizmoFrame {
        let size = self.config.size;
        let draw_list = self
            .projector
            .project(&self.scene, &self.camera, Vec2::splat(size));

        let labels = match self.config.labels {
            FaceLabels::Hidden => Vec::new(),
            FaceLabels::Text => self.visible_faces(),
        };

        let arrows = if self.config.show_arrows {
            ArrowControl::ALL
                .into_iter()
                .map(|arrow| (arrow, arrow.position(size, ARROW_INSET)))
                .collect()
        } else {
            Vec::new()
        };

        GizmoFrame {
            draw_list,
            labels,
            arrows,
        }
    }

    fn advance_snap(&mut self, now: Instant) {
        let Some(frame) = self.scheduler.tick(now) else {
            self.mode = GizmoMode::Idle;
            return;
        };

        self.set_orientation(frame.orientation);
        if let (Some(main), Some(from)) = (&self.main, self.camera_from) {
            main.lock().apply_rotation(from, frame.rotation);
        }

        if frame.finished {
            self.mode = GizmoMode::Idle;
            self.camera_from = None;
        }
    }

    /// Point the gizmo camera along the main camera's view, at a fixed distance
    fn sync_from_main(&mut self) {
        let Some(main) = &self.main else {
            return;
        };
        let (offset, up) = {
            let rig = main.lock();
            (rig.camera.position - rig.camera.target, rig.camera.up)
        };
        let direction = offset.normalize_or_zero();
        if direction == Vec3::ZERO {
            return;
        }
        self.camera.position = direction * self.camera_distance;
        self.camera.up = up;
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
        if let Err(e) = self
            .scene
            .set_transform(self.nodes.cube, Transform::from_rotation(orientation))
        {
            tracing::warn!("Failed to rotate gizmo cube: {}", e);
        }
    }

    fn place_handle(&mut self) {
        let position = ring_point(self.config.ring_radius, self.handle_angle);
        if let Err(e) = self
            .scene
            .set_transform(self.nodes.handle, Transform::from_translation(position))
        {
            tracing::warn!("Failed to move gizmo handle: {}", e);
        }
    }

    fn visible_faces(&self) -> Vec<(SnapFace, Vec2)> {
        let size = self.config.size;
        let half = self.config.cube_size * 0.5;
        SnapFace::ALL
            .into_iter()
            .filter_map(|face| {
                let normal = self.orientation * face.normal();
                let center = normal * half;
                if normal.dot(self.camera.position - center) <= 0.0 {
                    return None;
                }
                let (screen, _) = self.camera.world_to_screen(center, size, size)?;
                Some((face, screen))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tests::angle;
    use sv_core::CameraConfig;
    use sv_renderer::CameraRig;

    fn main_rig(position: Vec3) -> SharedCameraRig {
        let mut rig = CameraRig::new(&CameraConfig::default(), 1.0);
        rig.camera.position = position;
        rig.controls.update(&mut rig.camera);
        rig.shared()
    }

    fn gizmo(main: Option<SharedCameraRig>) -> OrientationGizmo {
        OrientationGizmo::new(&GizmoConfig::default(), main).unwrap()
    }

    fn screen_of(gizmo: &OrientationGizmo, point: Vec3) -> Vec2 {
        let size = gizmo.size();
        gizmo.camera().world_to_screen(point, size, size).unwrap().0
    }

    #[test]
    fn test_idle_follows_main_camera() {
        let main = main_rig(Vec3::new(0.0, 5.0, 15.0));
        let mut gizmo = gizmo(Some(main.clone()));
        let distance = gizmo.camera().position.length();
        let t0 = Instant::now();

        for step in 0..5 {
            {
                let mut rig = main.lock();
                let CameraRig { camera, controls } = &mut *rig;
                controls.orbit(camera, 37.0, -11.0 * step as f32);
            }
            let before = main.lock().camera.clone();
            gizmo.update(t0 + Duration::from_millis(16 * step));

            // Idle sync reads the main camera only
            assert_eq!(main.lock().camera, before);
            assert!(angle(gizmo.camera().orientation(), before.orientation()) < 1e-4);
            assert!((gizmo.camera().position.length() - distance).abs() < 1e-4);
        }
    }

    #[test]
    fn test_top_face_scenario() {
        let main = main_rig(Vec3::new(0.0, 5.0, 15.0));
        let mut gizmo = gizmo(Some(main.clone()));
        let t0 = Instant::now();
        gizmo.update(t0);

        let top = screen_of(&gizmo, Vec3::new(0.0, 0.51, 0.0));
        assert_eq!(
            gizmo.pointer_pressed(top, t0),
            Some(GizmoTarget::Snap(SnapTarget::Face(SnapFace::Top)))
        );
        assert_eq!(gizmo.mode(), GizmoMode::Animating);

        let start_offset = Vec3::new(0.0, 5.0, 15.0);
        let mut last = f32::INFINITY;
        for ms in [10, 30, 50, 80] {
            gizmo.update(t0 + Duration::from_millis(ms));
            let remaining = angle(gizmo.orientation(), SnapFace::Top.orientation());
            assert!(remaining <= last + 1e-5);
            last = remaining;

            // Camera carries the same cumulative rotation as the cube
            let rotation = gizmo.orientation();
            let rig = main.lock();
            assert!(
                rig.camera
                    .position
                    .abs_diff_eq(rotation * start_offset, 1e-3)
            );
            assert_eq!(rig.camera.target, Vec3::ZERO);
        }

        gizmo.update(t0 + Duration::from_millis(100));
        assert_eq!(gizmo.mode(), GizmoMode::Idle);
        assert!(angle(gizmo.orientation(), SnapFace::Top.orientation()) < 1e-4);

        let rig = main.lock();
        assert!(
            rig.camera
                .position
                .abs_diff_eq(Vec3::new(0.0, 15.0, -5.0), 1e-3)
        );
        assert!(rig.camera.up.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-4));
    }

    #[test]
    fn test_second_snap_while_animating_is_dropped() {
        let main = main_rig(Vec3::new(0.0, 0.0, 15.0));
        let mut gizmo = gizmo(Some(main));
        let t0 = Instant::now();

        assert!(gizmo.snap_to(SnapTarget::Face(SnapFace::Top), t0));
        gizmo.update(t0 + Duration::from_millis(20));
        assert!(!gizmo.snap_to(
            SnapTarget::Face(SnapFace::Right),
            t0 + Duration::from_millis(30)
        ));
        gizmo.update(t0 + Duration::from_millis(150));

        assert_eq!(gizmo.mode(), GizmoMode::Idle);
        assert!(angle(gizmo.orientation(), SnapFace::Top.orientation()) < 1e-4);
    }

    #[test]
    fn test_ring_drag_rotates_cube_and_camera() {
        let main = main_rig(Vec3::new(0.0, 0.0, 15.0));
        let mut gizmo = gizmo(Some(main.clone()));
        let t0 = Instant::now();

        let handle = screen_of(&gizmo, Vec3::new(1.2, 0.0, 0.0));
        assert_eq!(gizmo.pointer_pressed(handle, t0), Some(GizmoTarget::Handle));
        assert_eq!(gizmo.mode(), GizmoMode::RingDragging);

        gizmo.pointer_moved(handle + Vec2::new(20.0, 3.0));
        let expected = Quat::from_rotation_y(0.2);
        assert!(angle(gizmo.orientation(), expected) < 1e-5);
        assert!((gizmo.handle_angle() - 0.2).abs() < 1e-6);

        // Ticks during the drag leave both cameras alone
        let gizmo_camera = gizmo.camera().clone();
        gizmo.update(t0 + Duration::from_millis(16));
        assert_eq!(gizmo.camera(), &gizmo_camera);

        {
            let rig = main.lock();
            assert!(
                rig.camera
                    .position
                    .abs_diff_eq(expected * Vec3::new(0.0, 0.0, 15.0), 1e-4)
            );
            assert!((rig.camera.distance() - 15.0).abs() < 1e-4);
        }

        assert!(gizmo.pointer_released());
        assert_eq!(gizmo.mode(), GizmoMode::Idle);
        assert!(!gizmo.pointer_released());
    }

    #[test]
    fn test_without_main_camera() {
        let mut gizmo = gizmo(None);
        assert!(!gizmo.has_main_camera());
        let t0 = Instant::now();

        assert!(gizmo.snap_to(SnapTarget::Face(SnapFace::Right), t0));
        gizmo.update(t0 + Duration::from_millis(200));
        assert!(angle(gizmo.orientation(), SnapFace::Right.orientation()) < 1e-4);

        let handle = screen_of(&gizmo, Vec3::new(1.2, 0.0, 0.0));
        assert_eq!(gizmo.pointer_pressed(handle, t0), Some(GizmoTarget::Handle));
        gizmo.pointer_moved(handle + Vec2::new(-10.0, 0.0));
        let expected = Quat::from_rotation_y(-0.1) * SnapFace::Right.orientation();
        assert!(angle(gizmo.orientation(), expected) < 1e-5);
    }

    #[test]
    fn test_arrow_press_rotates_by_step() {
        let mut gizmo = gizmo(None);
        let t0 = Instant::now();
        let up = ArrowControl::Up.position(gizmo.size(), ARROW_INSET);

        assert_eq!(
            gizmo.pointer_pressed(up, t0),
            Some(GizmoTarget::Snap(SnapTarget::Arrow(ArrowControl::Up)))
        );
        gizmo.update(t0 + Duration::from_millis(100));
        let expected = Quat::from_rotation_x(-45f32.to_radians());
        assert!(angle(gizmo.orientation(), expected) < 1e-4);
    }

    #[test]
    fn test_press_on_empty_space() {
        let mut gizmo = gizmo(None);
        let corner = Vec2::new(gizmo.size() - 2.0, gizmo.size() - 2.0);
        assert_eq!(gizmo.pointer_pressed(corner, Instant::now()), None);
        assert_eq!(gizmo.mode(), GizmoMode::Idle);
    }

    #[test]
    fn test_render_lists_visible_faces() {
        let mut gizmo = gizmo(None);
        let frame = gizmo.render();

        assert!(!frame.draw_list.is_empty());
        assert!(frame.draw_list.lines().count() > 0);
        let mut faces: Vec<SnapFace> = frame.labels.iter().map(|(face, _)| *face).collect();
        faces.sort_by_key(|face| face.label());
        assert_eq!(faces, vec![SnapFace::Front, SnapFace::Right, SnapFace::Top]);
        assert_eq!(frame.arrows.len(), ArrowControl::ALL.len());
    }
}
