//! Bounding box and plane primitives.

use glam::Vec3;

use crate::collision::Ray;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner of the bounding box.
    pub min: Vec3,
    /// Maximum corner of the bounding box.
    pub max: Vec3,
}

impl BoundingBox {
    /// Creates a new bounding box from min and max points.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a bounding box from a center point and half-extents.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Slab test against a ray.
    ///
    /// Returns the ray parameter of the entry point and the outward normal of
    /// the face that was entered. Rays starting inside the box report no hit.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir.abs() < f32::EPSILON {
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }

            let t0 = (self.min[axis] - origin) / dir;
            let t1 = (self.max[axis] - origin) / dir;
            let (near, far, sign) = if t0 < t1 { (t0, t1, -1.0) } else { (t1, t0, 1.0) };

            if near > t_enter {
                t_enter = near;
                normal = Vec3::ZERO;
                normal[axis] = sign;
            }
            t_exit = t_exit.min(far);
            if t_enter > t_exit {
                return None;
            }
        }

        (t_enter >= 0.0).then_some((t_enter, normal))
    }
}

/// Infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// A point on the plane.
    pub point: Vec3,
    /// Unit normal.
    pub normal: Vec3,
}

impl Plane {
    /// Creates a plane from a point on it and its normal.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Intersect a ray with the plane.
    ///
    /// Returns `None` when the ray is parallel to the plane (`|n·d| < epsilon`)
    /// or the plane lies behind the ray origin.
    pub fn intersect_ray(&self, ray: &Ray, epsilon: f32) -> Option<Vec3> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < epsilon {
            return None;
        }

        let t = self.normal.dot(self.point - ray.origin) / denom;
        if t < 0.0 {
            return None;
        }

        Some(ray.at(t))
    }
}
