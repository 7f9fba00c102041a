//! Perspective camera for the 3D viewport

use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
use sv_core::CameraConfig;

use crate::collision::Ray;

/// Perspective camera looking at `target`
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up vector hint (need not be orthogonal to the view direction)
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a camera from configured defaults, looking at the origin
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: Vec3::from_array(config.position),
            target: Vec3::ZERO,
            up: Vec3::from_array(config.up),
            fov: config.fov_degrees.to_radians(),
            aspect,
            near: config.near_plane,
            far: config.far_plane,
        }
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Distance from the eye to the target
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Camera-to-world rotation (the camera looks down its local -Z)
    pub fn orientation(&self) -> Quat {
        let back = -self.forward();
        let right = self.up.cross(back).normalize();
        let up = back.cross(right);
        Quat::from_mat3(&Mat3::from_cols(right, up, back)).normalize()
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined projection * view
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Convert screen coordinates to a world-space ray from the camera position
    /// through the pixel.
    ///
    /// The viewport must have a positive area.
    pub fn screen_to_ray(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> Ray {
        // Convert to normalized device coordinates
        let ndc_x = (2.0 * screen_x / screen_width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / screen_height);

        let inv_view_proj = self.view_projection().inverse();

        // glam's right-handed perspective maps depth to [0, 1]; the near plane
        // point only fixes the direction
        let near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let near_world = near.truncate() / near.w;

        Ray::new(self.position, (near_world - self.position).normalize())
    }

    /// Project a world point to screen coordinates.
    ///
    /// Returns the pixel position and the view-space depth, or `None` when the
    /// point is behind the camera.
    pub fn world_to_screen(
        &self,
        point: Vec3,
        screen_width: f32,
        screen_height: f32,
    ) -> Option<(Vec2, f32)> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * screen_width,
            (1.0 - ndc.y) * 0.5 * screen_height,
        );
        Some((screen, clip.w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(&CameraConfig::default(), 1.0)
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = camera();
        let ray = camera.screen_to_ray(50.0, 50.0, 100.0, 100.0);
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn test_ray_parameter_is_distance_from_camera() {
        let mut camera = camera();
        camera.position = Vec3::new(0.0, 5.0, 15.0);
        let point = Vec3::new(0.5, 1.0, 2.0);
        let (screen, _) = camera.world_to_screen(point, 200.0, 100.0).unwrap();

        let ray = camera.screen_to_ray(screen.x, screen.y, 200.0, 100.0);
        let distance = camera.position.distance(point);
        assert!(ray.at(distance).abs_diff_eq(point, 1e-3));
    }

    #[test]
    fn test_screen_roundtrip() {
        let mut camera = camera();
        camera.position = Vec3::new(4.0, 5.0, 15.0);
        let point = Vec3::new(1.0, -0.5, 2.0);

        let (screen, depth) = camera.world_to_screen(point, 640.0, 480.0).unwrap();
        assert!(depth > 0.0);

        let ray = camera.screen_to_ray(screen.x, screen.y, 640.0, 480.0);
        let to_point = (point - ray.origin).normalize();
        assert!(to_point.abs_diff_eq(ray.direction, 1e-4));
    }

    #[test]
    fn test_point_behind_camera_is_not_projected() {
        let camera = camera();
        assert!(
            camera
                .world_to_screen(Vec3::new(0.0, 0.0, 30.0), 100.0, 100.0)
                .is_none()
        );
    }

    #[test]
    fn test_orientation_of_default_camera_is_identity() {
        let camera = camera();
        assert!(camera.orientation().abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn test_orientation_maps_local_forward() {
        let mut camera = camera();
        camera.position = Vec3::new(0.0, 5.0, 15.0);
        let forward = camera.orientation() * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(camera.forward(), 1e-5));
    }
}
