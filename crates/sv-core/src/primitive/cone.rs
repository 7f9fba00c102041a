//! Cone mesh generation (with base cap)

use super::{MeshData, push_cap, push_ring};

/// Generate a cone mesh along the Y axis, apex up
pub fn generate_cone_mesh(radius: f32, height: f32) -> MeshData {
    use crate::constants::CYLINDER_SEGMENTS;
    generate_cone_mesh_with_segments(radius, height, CYLINDER_SEGMENTS)
}

/// Generate a cone mesh with custom segment count
pub fn generate_cone_mesh_with_segments(radius: f32, height: f32, segments: u32) -> MeshData {
    let half = height / 2.0;
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    // Slanted side normal: radial component scaled by height, Y by radius
    let slant = (height * height + radius * radius).sqrt().max(f32::EPSILON);
    let (ny, nr) = (radius / slant, height / slant);
    let side_normal = move |cos: f32, sin: f32| [cos * nr, ny, sin * nr];

    let base = vertices.len() as u32;
    push_ring(&mut vertices, &mut normals, radius, -half, segments, side_normal);
    // Apex ring: one vertex per segment so each side triangle keeps its own normal
    let apex = vertices.len() as u32;
    push_ring(&mut vertices, &mut normals, 0.0, half, segments, side_normal);

    for i in 0..segments {
        indices.extend_from_slice(&[base + i, apex + i, base + i + 1]);
    }

    push_cap(&mut vertices, &mut normals, &mut indices, radius, -half, segments, false);

    (vertices, normals, indices)
}
