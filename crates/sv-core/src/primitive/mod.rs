//! Primitive mesh generation for object shapes
//!
//! Generates vertices, normals, and indices for the drawable shapes:
//! - Box (rectangular prism)
//! - Sphere (latitude rings)
//! - Cylinder (with end caps)
//! - Cone (with base cap)
//!
//! Round shapes are built around the Y axis.

mod box_mesh;
mod cone;
mod cylinder;
mod sphere;

pub use box_mesh::generate_box_mesh;
pub use cone::{generate_cone_mesh, generate_cone_mesh_with_segments};
pub use cylinder::{generate_cylinder_mesh, generate_cylinder_mesh_with_segments};
pub use sphere::{generate_sphere_mesh, generate_sphere_mesh_with_segments};

/// Mesh data: vertices, normals, and triangle indices
pub type MeshData = (Vec<[f32; 3]>, Vec<[f32; 3]>, Vec<u32>);

/// Push a ring of `segments + 1` vertices at height `y` (first and last coincide)
fn push_ring(
    vertices: &mut Vec<[f32; 3]>,
    normals: &mut Vec<[f32; 3]>,
    radius: f32,
    y: f32,
    segments: u32,
    normal: impl Fn(f32, f32) -> [f32; 3],
) {
    for i in 0..=segments {
        let theta = (i as f32 / segments as f32) * std::f32::consts::TAU;
        let (sin, cos) = theta.sin_cos();
        vertices.push([radius * cos, y, radius * sin]);
        normals.push(normal(cos, sin));
    }
}

/// Join two rings pushed by [`push_ring`] with a band of quads, `lower` below `upper`
fn stitch_rings(indices: &mut Vec<u32>, lower: u32, upper: u32, segments: u32) {
    for i in 0..segments {
        indices.extend_from_slice(&[lower + i, upper + i, lower + i + 1]);
        indices.extend_from_slice(&[lower + i + 1, upper + i, upper + i + 1]);
    }
}

/// Push a flat disc cap at height `y` facing `±Y`
fn push_cap(
    vertices: &mut Vec<[f32; 3]>,
    normals: &mut Vec<[f32; 3]>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    facing_up: bool,
) {
    let ny = if facing_up { 1.0 } else { -1.0 };
    let center = vertices.len() as u32;
    vertices.push([0.0, y, 0.0]);
    normals.push([0.0, ny, 0.0]);

    let rim = vertices.len() as u32;
    push_ring(vertices, normals, radius, y, segments, |_, _| [0.0, ny, 0.0]);

    for i in 0..segments {
        if facing_up {
            indices.extend_from_slice(&[center, rim + i + 1, rim + i]);
        } else {
            indices.extend_from_slice(&[center, rim + i, rim + i + 1]);
        }
    }
}
