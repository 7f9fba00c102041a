//! Orbit controls and the shared camera rig
//!
//! The orbit controls own the pivot (`target`). Anything that moves the camera
//! from outside, such as the orientation gizmo, writes the camera pose and then
//! calls [`OrbitControls::update`] so the controls re-derive their state from it.

use std::sync::Arc;

use glam::{Quat, Vec3};
use parking_lot::Mutex;
use sv_core::CameraConfig;

use crate::camera::Camera;

/// Main camera plus the controls that drive it
pub type SharedCameraRig = Arc<Mutex<CameraRig>>;

/// Minimum angle kept between the view direction and the up vector while orbiting
const MIN_POLAR_ANGLE: f32 = 0.01;

/// Mouse-driven orbit, pan and zoom around a pivot
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    /// When false every input method is a no-op
    pub enabled: bool,
    /// Orbit pivot
    pub target: Vec3,
    /// Radians per pixel
    pub orbit_sensitivity: f32,
    /// Pan distance per pixel, relative to the camera distance
    pub pan_sensitivity: f32,
    /// Zoom factor per scroll unit
    pub zoom_sensitivity: f32,
    /// Closest allowed camera distance
    pub min_distance: f32,
    /// Farthest allowed camera distance
    pub max_distance: f32,
    distance: f32,
}

impl OrbitControls {
    /// Create controls orbiting the camera's current target
    pub fn new(config: &CameraConfig, camera: &Camera) -> Self {
        Self {
            enabled: true,
            target: camera.target,
            orbit_sensitivity: config.orbit_sensitivity,
            pan_sensitivity: config.pan_sensitivity,
            zoom_sensitivity: config.zoom_sensitivity,
            min_distance: 0.1,
            max_distance: 10000.0,
            distance: camera.distance(),
        }
    }

    /// Distance from the pivot as of the last update
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Rotate the camera around the pivot by a pointer delta in pixels
    pub fn orbit(&mut self, camera: &mut Camera, delta_x: f32, delta_y: f32) {
        if !self.enabled {
            return;
        }
        let up = camera.up.normalize();
        let offset = camera.position - self.target;
        let right = offset.cross(up).normalize_or_zero();

        let yaw = Quat::from_axis_angle(up, -delta_x * self.orbit_sensitivity);
        let mut offset = yaw * offset;

        if right != Vec3::ZERO {
            let pitch = Quat::from_axis_angle(yaw * right, -delta_y * self.orbit_sensitivity);
            let pitched = pitch * offset;
            if pitched.angle_between(up) > MIN_POLAR_ANGLE
                && pitched.angle_between(-up) > MIN_POLAR_ANGLE
            {
                offset = pitched;
            }
        }

        camera.position = self.target + offset;
        self.update(camera);
    }

    /// Translate camera and pivot in the view plane
    pub fn pan(&mut self, camera: &mut Camera, delta_x: f32, delta_y: f32) {
        if !self.enabled {
            return;
        }
        let forward = camera.forward();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * self.pan_sensitivity;
        let shift = right * (-delta_x * scale) + up * (delta_y * scale);
        self.target += shift;
        camera.position += shift;
        self.update(camera);
    }

    /// Move the camera towards (positive delta) or away from the pivot
    pub fn zoom(&mut self, camera: &mut Camera, delta: f32) {
        if !self.enabled {
            return;
        }
        let distance = (self.distance * (1.0 - delta * self.zoom_sensitivity))
            .clamp(self.min_distance, self.max_distance);
        let direction = (camera.position - self.target).normalize_or_zero();
        if direction == Vec3::ZERO {
            return;
        }
        camera.position = self.target + direction * distance;
        self.update(camera);
    }

    /// Re-aim the camera at the pivot and refresh cached state from its pose
    pub fn update(&mut self, camera: &mut Camera) {
        camera.target = self.target;
        self.distance = camera.distance();
    }
}

/// Camera position and up vector relative to the orbit pivot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// `camera.position - pivot`
    pub offset: Vec3,
    /// Camera up vector
    pub up: Vec3,
}

/// The main camera together with its orbit controls
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    /// Main camera
    pub camera: Camera,
    /// Orbit controls driving the camera
    pub controls: OrbitControls,
}

impl CameraRig {
    /// Create the rig from configured camera defaults
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let camera = Camera::new(config, aspect);
        let controls = OrbitControls::new(config, &camera);
        Self { camera, controls }
    }

    /// Wrap the rig for sharing between the viewport and the gizmo
    pub fn shared(self) -> SharedCameraRig {
        Arc::new(Mutex::new(self))
    }

    /// Current pose relative to the pivot
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            offset: self.camera.position - self.controls.target,
            up: self.camera.up,
        }
    }

    /// Place the camera at `rotation` applied to `from` about the pivot, then update the controls
    pub fn apply_rotation(&mut self, from: CameraPose, rotation: Quat) {
        self.camera.position = self.controls.target + rotation * from.offset;
        self.camera.up = rotation * from.up;
        self.controls.update(&mut self.camera);
    }

    /// Rotate the current pose about the pivot
    pub fn rotate(&mut self, rotation: Quat) {
        self.apply_rotation(self.pose(), rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rig() -> CameraRig {
        CameraRig::new(&CameraConfig::default(), 1.0)
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut rig = rig();
        let CameraRig { camera, controls } = &mut rig;
        controls.orbit(camera, 120.0, 40.0);

        assert_relative_eq!(camera.distance(), 15.0, epsilon = 1e-4);
        assert!(camera.position.x.abs() > 1.0);
        assert_eq!(camera.target, controls.target);
    }

    #[test]
    fn test_disabled_controls_ignore_input() {
        let mut rig = rig();
        let before = rig.camera.clone();
        let CameraRig { camera, controls } = &mut rig;
        controls.enabled = false;
        controls.orbit(camera, 100.0, 100.0);
        controls.pan(camera, 10.0, 10.0);
        controls.zoom(camera, 1.0);
        assert_eq!(rig.camera, before);
    }

    #[test]
    fn test_pitch_stops_short_of_pole() {
        let mut rig = rig();
        let CameraRig { camera, controls } = &mut rig;
        for _ in 0..100 {
            controls.orbit(camera, 0.0, 100.0);
        }
        assert!(camera.forward().angle_between(camera.up).abs() > MIN_POLAR_ANGLE * 0.5);
        assert!(camera.position.is_finite());
    }

    #[test]
    fn test_zoom_and_pan() {
        let mut rig = rig();
        let CameraRig { camera, controls } = &mut rig;
        controls.zoom(camera, 1.0);
        assert_relative_eq!(controls.distance(), 13.5, epsilon = 1e-4);

        controls.pan(camera, -100.0, 0.0);
        assert!(controls.target.x > 0.0);
        assert_relative_eq!(camera.distance(), 13.5, epsilon = 1e-4);
    }

    #[test]
    fn test_rotate_about_pivot() {
        let mut rig = rig();
        rig.controls.target = Vec3::new(1.0, 0.0, 0.0);
        rig.camera.position = Vec3::new(1.0, 0.0, 10.0);
        rig.controls.update(&mut rig.camera);

        rig.rotate(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(
            rig.camera
                .position
                .abs_diff_eq(Vec3::new(11.0, 0.0, 0.0), 1e-4)
        );
        assert_eq!(rig.camera.target, rig.controls.target);
        assert_relative_eq!(rig.controls.distance(), 10.0, epsilon = 1e-4);
    }
}
