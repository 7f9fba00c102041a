//! Box (rectangular prism) mesh generation

use super::MeshData;

/// Generate a box mesh with the given dimensions
///
/// # Arguments
/// * `size` - [width (x), height (y), depth (z)]
///
/// # Returns
/// (vertices, normals, indices) - 24 vertices (4 per face), 12 triangles
pub fn generate_box_mesh(size: [f32; 3]) -> MeshData {
    let [hx, hy, hz] = size.map(|s| s / 2.0);

    let mut vertices = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    let mut add_face = |corners: [[f32; 3]; 4], normal: [f32; 3]| {
        let base = vertices.len() as u32;
        for corner in corners {
            vertices.push(corner);
            normals.push(normal);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    };

    // +X / -X
    add_face(
        [[hx, -hy, hz], [hx, -hy, -hz], [hx, hy, -hz], [hx, hy, hz]],
        [1.0, 0.0, 0.0],
    );
    add_face(
        [[-hx, -hy, -hz], [-hx, -hy, hz], [-hx, hy, hz], [-hx, hy, -hz]],
        [-1.0, 0.0, 0.0],
    );

    // +Y (top) / -Y (bottom)
    add_face(
        [[-hx, hy, hz], [hx, hy, hz], [hx, hy, -hz], [-hx, hy, -hz]],
        [0.0, 1.0, 0.0],
    );
    add_face(
        [[-hx, -hy, -hz], [hx, -hy, -hz], [hx, -hy, hz], [-hx, -hy, hz]],
        [0.0, -1.0, 0.0],
    );

    // +Z (front) / -Z (back)
    add_face(
        [[-hx, -hy, hz], [hx, -hy, hz], [hx, hy, hz], [-hx, hy, hz]],
        [0.0, 0.0, 1.0],
    );
    add_face(
        [[hx, -hy, -hz], [-hx, -hy, -hz], [-hx, hy, -hz], [hx, hy, -hz]],
        [0.0, 0.0, -1.0],
    );

    (vertices, normals, indices)
}
