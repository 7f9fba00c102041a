//! Ray casting against node shapes
//!
//! Intersection tests run in a shape's local space. A world ray brought into
//! local space with [`Ray::transformed`] keeps an unnormalized direction, so the
//! returned ray parameter `t` is valid for the world ray as well.

use glam::{Mat4, Vec3};
use sv_core::Shape;

use crate::bounds::BoundingBox;

/// Half-line `origin + t * direction` for `t >= 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Direction (unit length for world rays)
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Apply an affine transform without renormalizing the direction
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}

/// Closest surface hit in the shape's local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter of the hit
    pub t: f32,
    /// Outward surface normal (unit length, local space)
    pub normal: Vec3,
}

/// Intersect a local-space ray with a shape.
///
/// Lines have no surface and are never hit.
pub fn ray_shape_intersection(ray: &Ray, shape: &Shape) -> Option<RayHit> {
    match *shape {
        Shape::Sphere { radius } => ray_sphere_intersection(ray, radius),
        Shape::Box { size } => BoundingBox::from_center_half_extents(Vec3::ZERO, size * 0.5)
            .ray_intersection(ray)
            .map(|(t, normal)| RayHit { t, normal }),
        Shape::Cylinder { radius, height } => ray_capped_cylinder_intersection(ray, radius, height),
        Shape::Cone { radius, height } => ray_cone_intersection(ray, radius, height),
        Shape::Line { .. } => None,
    }
}

/// Ray against a sphere centered at the origin
pub fn ray_sphere_intersection(ray: &Ray, radius: f32) -> Option<RayHit> {
    let a = ray.direction.length_squared();
    let b = 2.0 * ray.origin.dot(ray.direction);
    let c = ray.origin.length_squared() - radius * radius;

    let t = smallest_non_negative_root(a, b, c)?;
    Some(RayHit {
        t,
        normal: ray.at(t).normalize(),
    })
}

/// Ray-cylinder intersection test.
///
/// Tests the side of a finite cylinder defined by its axis endpoints and
/// radius. Caps are not included.
///
/// The ray and axis are projected into the plane perpendicular to the axis
/// and the resulting 2D quadratic is solved:
/// ```text
/// P(t) = ray_origin + t * ray_dir
/// |P(t) - axis_projection(P(t))| = radius
/// ```
/// The hit is kept only when it lies between `cylinder_start` and
/// `cylinder_end`. Rays parallel to the axis never hit the side.
pub fn ray_cylinder_intersection(
    ray: &Ray,
    cylinder_start: Vec3,
    cylinder_end: Vec3,
    radius: f32,
) -> Option<f32> {
    let cylinder_axis = (cylinder_end - cylinder_start).normalize();
    let cylinder_length = (cylinder_end - cylinder_start).length();

    let offset = ray.origin - cylinder_start;
    let d = ray.direction - cylinder_axis * ray.direction.dot(cylinder_axis);
    let o = offset - cylinder_axis * offset.dot(cylinder_axis);

    let a = d.dot(d);
    let b = 2.0 * d.dot(o);
    let c = o.dot(o) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if a < f32::EPSILON || discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if t < 0.0 {
        return None;
    }

    let projection = (ray.at(t) - cylinder_start).dot(cylinder_axis);
    if projection < 0.0 || projection > cylinder_length {
        return None;
    }

    Some(t)
}

/// Ray against a Y-aligned cylinder with both end caps
pub fn ray_capped_cylinder_intersection(ray: &Ray, radius: f32, height: f32) -> Option<RayHit> {
    let half = height * 0.5;
    let side = ray_cylinder_intersection(
        ray,
        Vec3::new(0.0, -half, 0.0),
        Vec3::new(0.0, half, 0.0),
        radius,
    )
    .map(|t| {
        let p = ray.at(t);
        RayHit {
            t,
            normal: Vec3::new(p.x, 0.0, p.z).normalize(),
        }
    });

    let top = ray_disc_intersection(ray, half, radius, Vec3::Y);
    let bottom = ray_disc_intersection(ray, -half, radius, Vec3::NEG_Y);

    nearest([side, top, bottom])
}

/// Ray against a Y-aligned cone with its base at `-height / 2` and apex at `+height / 2`
pub fn ray_cone_intersection(ray: &Ray, radius: f32, height: f32) -> Option<RayHit> {
    let half = height * 0.5;
    let slope = radius / height;
    let k2 = slope * slope;

    // Side: x^2 + z^2 = slope^2 * (apex_y - y)^2
    let (o, d) = (ray.origin, ray.direction);
    let apex_offset = half - o.y;
    let a = d.x * d.x + d.z * d.z - k2 * d.y * d.y;
    let b = 2.0 * (o.x * d.x + o.z * d.z + k2 * apex_offset * d.y);
    let c = o.x * o.x + o.z * o.z - k2 * apex_offset * apex_offset;

    let side = quadratic_roots(a, b, c)
        .into_iter()
        .flatten()
        .filter(|&t| t >= 0.0)
        .find(|&t| {
            let y = ray.at(t).y;
            (-half..=half).contains(&y)
        })
        .map(|t| {
            let p = ray.at(t);
            let rho = (p.x * p.x + p.z * p.z).sqrt();
            let normal = if rho > f32::EPSILON {
                Vec3::new(p.x / rho, slope, p.z / rho).normalize()
            } else {
                Vec3::Y
            };
            RayHit { t, normal }
        });

    let base = ray_disc_intersection(ray, -half, radius, Vec3::NEG_Y);

    nearest([side, base])
}

/// Ray against a horizontal disc at height `y`
fn ray_disc_intersection(ray: &Ray, y: f32, radius: f32, normal: Vec3) -> Option<RayHit> {
    if ray.direction.y.abs() < f32::EPSILON {
        return None;
    }
    let t = (y - ray.origin.y) / ray.direction.y;
    if t < 0.0 {
        return None;
    }
    let p = ray.at(t);
    (p.x * p.x + p.z * p.z <= radius * radius).then_some(RayHit { t, normal })
}

/// Real roots of `a t^2 + b t + c = 0` in ascending order
fn quadratic_roots(a: f32, b: f32, c: f32) -> [Option<f32>; 2] {
    if a.abs() < f32::EPSILON {
        if b.abs() < f32::EPSILON {
            return [None, None];
        }
        return [Some(-c / b), None];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return [None, None];
    }
    let sqrt = discriminant.sqrt();
    let t0 = (-b - sqrt) / (2.0 * a);
    let t1 = (-b + sqrt) / (2.0 * a);
    [Some(t0.min(t1)), Some(t0.max(t1))]
}

fn smallest_non_negative_root(a: f32, b: f32, c: f32) -> Option<f32> {
    quadratic_roots(a, b, c)
        .into_iter()
        .flatten()
        .find(|&t| t >= 0.0)
}

fn nearest<const N: usize>(hits: [Option<RayHit>; N]) -> Option<RayHit> {
    hits.into_iter()
        .flatten()
        .min_by(|a, b| a.t.total_cmp(&b.t))
}
