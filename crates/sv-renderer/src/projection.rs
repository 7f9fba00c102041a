//! CPU projection of a scene into a screen-space draw list
//!
//! Meshes are transformed, back-face culled by their vertex normals, flat
//! shaded with a headlight and sorted far-to-near so a 2D painter can fill
//! them in order. Line shapes are drawn after every triangle.

use std::collections::HashMap;

use glam::{Mat3, Vec2, Vec3};
use sv_core::{MeshData, NodeId, Scene, Shape};

use crate::camera::Camera;

const AMBIENT: f32 = 0.35;
const DIFFUSE: f32 = 0.65;

/// Filled triangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTriangle {
    /// Corners relative to the viewport's top-left
    pub points: [Vec2; 3],
    /// Shaded RGBA color
    pub color: [f32; 4],
    /// Distance from the eye to the centroid
    pub depth: f32,
    /// Node the triangle belongs to
    pub node: NodeId,
}

/// Line segment in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLine {
    /// Start point
    pub from: Vec2,
    /// End point
    pub to: Vec2,
    /// RGBA color
    pub color: [f32; 4],
    /// Node the line belongs to
    pub node: NodeId,
}

/// One primitive in paint order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawItem {
    /// Filled triangle
    Triangle(ScreenTriangle),
    /// Line segment
    Line(ScreenLine),
}

/// Primitives in back-to-front paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    /// Items to paint in order
    pub items: Vec<DrawItem>,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over triangles only
    pub fn triangles(&self) -> impl Iterator<Item = &ScreenTriangle> {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Triangle(t) => Some(t),
            DrawItem::Line(_) => None,
        })
    }

    /// Iterate over lines only
    pub fn lines(&self) -> impl Iterator<Item = &ScreenLine> {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Line(l) => Some(l),
            DrawItem::Triangle(_) => None,
        })
    }
}

/// Projects scenes and caches generated meshes per node
#[derive(Debug, Default)]
pub struct Projector {
    meshes: HashMap<NodeId, (Shape, MeshData)>,
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget meshes of nodes that no longer exist
    pub fn prune(&mut self, scene: &Scene) {
        self.meshes.retain(|id, _| scene.contains(*id));
    }

    /// Project every visible node of `scene` into a viewport of `size` pixels.
    ///
    /// Invisible nodes hide their whole subtree.
    pub fn project(&mut self, scene: &Scene, camera: &Camera, size: Vec2) -> DrawList {
        let mut triangles = Vec::new();
        let mut lines = Vec::new();
        let light = -camera.forward();

        let mut stack: Vec<NodeId> = scene.roots().iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = scene.get(id) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            stack.extend(node.children().iter().rev().copied());

            match node.shape {
                Some(Shape::Line { end }) => {
                    let world = node.world_matrix();
                    let from = camera.world_to_screen(world.w_axis.truncate(), size.x, size.y);
                    let to = camera.world_to_screen(world.transform_point3(end), size.x, size.y);
                    if let (Some((from, _)), Some((to, _))) = (from, to) {
                        lines.push(ScreenLine {
                            from,
                            to,
                            color: node.color,
                            node: id,
                        });
                    }
                }
                Some(shape) => {
                    let mesh = self.mesh_for(id, shape);
                    let Some((vertices, normals, indices)) = mesh else {
                        continue;
                    };
                    let world = node.world_matrix();
                    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();

                    for tri in indices.chunks_exact(3) {
                        let corners = [tri[0], tri[1], tri[2]].map(|i| {
                            world.transform_point3(Vec3::from_array(vertices[i as usize]))
                        });
                        let normal = [tri[0], tri[1], tri[2]]
                            .iter()
                            .map(|&i| Vec3::from_array(normals[i as usize]))
                            .sum::<Vec3>();
                        let normal = (normal_matrix * normal).normalize_or_zero();
                        let centroid = (corners[0] + corners[1] + corners[2]) / 3.0;

                        if normal.dot(camera.position - centroid) <= 0.0 {
                            continue;
                        }

                        let mut points = [Vec2::ZERO; 3];
                        let mut visible = true;
                        for (point, corner) in points.iter_mut().zip(corners) {
                            match camera.world_to_screen(corner, size.x, size.y) {
                                Some((screen, depth)) if depth >= camera.near => *point = screen,
                                _ => {
                                    visible = false;
                                    break;
                                }
                            }
                        }
                        if !visible {
                            continue;
                        }

                        let intensity = AMBIENT + DIFFUSE * normal.dot(light).max(0.0);
                        let [r, g, b, a] = node.color;
                        triangles.push(ScreenTriangle {
                            points,
                            color: [r * intensity, g * intensity, b * intensity, a],
                            depth: camera.position.distance(centroid),
                            node: id,
                        });
                    }
                }
                None => {}
            }
        }

        triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        let items = triangles
            .into_iter()
            .map(DrawItem::Triangle)
            .chain(lines.into_iter().map(DrawItem::Line))
            .collect();
        DrawList { items }
    }

    fn mesh_for(&mut self, id: NodeId, shape: Shape) -> Option<&MeshData> {
        let stale = self
            .meshes
            .get(&id)
            .is_none_or(|(cached, _)| *cached != shape);
        if stale {
            let mesh = shape.mesh()?;
            self.meshes.insert(id, (shape, mesh));
        }
        self.meshes.get(&id).map(|(_, mesh)| mesh)
    }
}
