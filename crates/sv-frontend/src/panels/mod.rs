//! UI panels

mod properties;
mod viewport;

pub use properties::PropertiesPanel;
pub use viewport::ViewportPanel;

use sv_renderer::DrawList;

use crate::state::ViewerState;
use crate::theme::palette;

/// Panel trait for the viewer's UI regions
pub trait Panel {
    /// Panel name for headings and logs
    fn name(&self) -> &str;

    /// Draw the panel UI
    fn ui(&mut self, ui: &mut egui::Ui, state: &mut ViewerState);
}

/// Width of projected line shapes in points
const LINE_WIDTH: f32 = 2.0;

/// Paint a projected draw list with its top-left corner at `origin`.
///
/// Triangles go into one mesh in list order (far to near); lines are drawn
/// after all triangles.
pub(crate) fn paint_draw_list(painter: &egui::Painter, origin: egui::Pos2, list: &DrawList) {
    let to_pos = |p: glam::Vec2| origin + egui::vec2(p.x, p.y);

    let mut mesh = egui::Mesh::default();
    for triangle in list.triangles() {
        let color = palette::scene_color(triangle.color);
        let base = mesh.vertices.len() as u32;
        for point in triangle.points {
            mesh.colored_vertex(to_pos(point), color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    if !mesh.is_empty() {
        painter.add(egui::Shape::mesh(mesh));
    }

    for line in list.lines() {
        painter.line_segment(
            [to_pos(line.from), to_pos(line.to)],
            egui::Stroke::new(LINE_WIDTH, palette::scene_color(line.color)),
        );
    }
}
