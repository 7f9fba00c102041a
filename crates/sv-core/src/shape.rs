//! Analytic shapes attached to scene nodes
//!
//! Every shape is centered on its node's local origin. Round shapes are
//! aligned with the local Y axis; a cone's apex points towards +Y.

use glam::Vec3;

use crate::primitive::{
    MeshData, generate_box_mesh, generate_cone_mesh, generate_cylinder_mesh, generate_sphere_mesh,
};

/// Geometry of a scene node in local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Sphere centered at the origin
    Sphere { radius: f32 },
    /// Box centered at the origin with full extents `size`
    Box { size: Vec3 },
    /// Capped cylinder along Y with total `height`
    Cylinder { radius: f32, height: f32 },
    /// Cone along Y, base at `-height / 2`, apex at `+height / 2`
    Cone { radius: f32, height: f32 },
    /// Line segment from the origin to `end` (decorations only)
    Line { end: Vec3 },
}

impl Shape {
    /// Build the triangle mesh used to draw this shape.
    ///
    /// Lines have no surface and return `None`.
    pub fn mesh(&self) -> Option<MeshData> {
        match *self {
            Shape::Sphere { radius } => Some(generate_sphere_mesh(radius)),
            Shape::Box { size } => Some(generate_box_mesh(size.to_array())),
            Shape::Cylinder { radius, height } => Some(generate_cylinder_mesh(radius, height)),
            Shape::Cone { radius, height } => Some(generate_cone_mesh(radius, height)),
            Shape::Line { .. } => None,
        }
    }

    /// Whether the shape has a surface a ray can hit
    pub fn is_solid(&self) -> bool {
        !matches!(self, Shape::Line { .. })
    }
}

/// Kinds of shapes a user can add from the property panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    #[default]
    Sphere,
    Box,
    Cone,
    Cylinder,
}

impl ShapeKind {
    /// All kinds, in panel order
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Sphere,
        ShapeKind::Box,
        ShapeKind::Cone,
        ShapeKind::Cylinder,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Box => "Box",
            ShapeKind::Cone => "Cone",
            ShapeKind::Cylinder => "Cylinder",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
