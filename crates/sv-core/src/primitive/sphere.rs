//! Sphere mesh generation

use std::f32::consts::PI;

use super::{MeshData, push_ring, stitch_rings};

/// Generate a sphere mesh with poles on the Y axis
pub fn generate_sphere_mesh(radius: f32) -> MeshData {
    use crate::constants::{SPHERE_LAT_SEGMENTS, SPHERE_LON_SEGMENTS};
    generate_sphere_mesh_with_segments(radius, SPHERE_LAT_SEGMENTS, SPHERE_LON_SEGMENTS)
}

/// Generate a sphere as stacked latitude rings, south pole first
pub fn generate_sphere_mesh_with_segments(
    radius: f32,
    lat_segments: u32,
    lon_segments: u32,
) -> MeshData {
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for band in 0..=lat_segments {
        let elevation = (band as f32 / lat_segments as f32 - 0.5) * PI;
        let (y, ring) = elevation.sin_cos();
        push_ring(
            &mut vertices,
            &mut normals,
            radius * ring,
            radius * y,
            lon_segments,
            |cos, sin| [ring * cos, y, ring * sin],
        );
    }

    let stride = lon_segments + 1;
    for band in 0..lat_segments {
        stitch_rings(&mut indices, band * stride, (band + 1) * stride, lon_segments);
    }

    (vertices, normals, indices)
}
