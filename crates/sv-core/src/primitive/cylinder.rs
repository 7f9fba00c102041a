//! Cylinder mesh generation (with end caps)

use super::{MeshData, push_cap, push_ring, stitch_rings};

/// Generate a capped cylinder centered on the origin along the Y axis
pub fn generate_cylinder_mesh(radius: f32, height: f32) -> MeshData {
    use crate::constants::CYLINDER_SEGMENTS;
    generate_cylinder_mesh_with_segments(radius, height, CYLINDER_SEGMENTS)
}

/// Generate a cylinder mesh with custom segment count
pub fn generate_cylinder_mesh_with_segments(radius: f32, height: f32, segments: u32) -> MeshData {
    let half = height / 2.0;
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    let side_normal = |cos: f32, sin: f32| [cos, 0.0, sin];
    let bottom = vertices.len() as u32;
    push_ring(&mut vertices, &mut normals, radius, -half, segments, side_normal);
    let top = vertices.len() as u32;
    push_ring(&mut vertices, &mut normals, radius, half, segments, side_normal);

    stitch_rings(&mut indices, bottom, top, segments);

    push_cap(&mut vertices, &mut normals, &mut indices, radius, half, segments, true);
    push_cap(&mut vertices, &mut normals, &mut indices, radius, -half, segments, false);

    (vertices, normals, indices)
}
