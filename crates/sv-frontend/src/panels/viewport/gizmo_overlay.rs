//! Orientation gizmo overlay in the top-right corner of the viewport

use std::time::Instant;

use sv_interact::{GizmoTarget, OrientationGizmo, SnapTarget};

use crate::panels::paint_draw_list;
use crate::theme::palette;

/// Gap between the gizmo surface and the viewport edges
const GIZMO_MARGIN: f32 = 10.0;

/// Square gizmo surface anchored to the top-right corner of `viewport`
pub fn gizmo_rect(viewport: egui::Rect, size: f32) -> egui::Rect {
    let min = egui::pos2(
        viewport.right() - GIZMO_MARGIN - size,
        viewport.top() + GIZMO_MARGIN,
    );
    egui::Rect::from_min_size(min, egui::vec2(size, size))
}

/// Pointer position relative to the top-left corner of `rect`
pub fn to_local(pos: egui::Pos2, rect: egui::Rect) -> glam::Vec2 {
    let local = pos - rect.min;
    glam::Vec2::new(local.x, local.y)
}

/// Forward a press on the gizmo surface
pub fn press_gizmo(gizmo: &mut OrientationGizmo, pointer: glam::Vec2, now: Instant) {
    match gizmo.pointer_pressed(pointer, now) {
        Some(target) => tracing::debug!("Gizmo press on {:?}", target),
        None => tracing::debug!("Gizmo press missed"),
    }
}

/// Paint the gizmo sub-scene, face labels and arrow buttons
pub fn render_gizmo(
    painter: &egui::Painter,
    rect: egui::Rect,
    gizmo: &mut OrientationGizmo,
    hover: Option<egui::Pos2>,
) {
    let painter = painter.with_clip_rect(rect);
    painter.rect_filled(rect, 6.0, palette::overlay_bg(140));
    painter.rect_stroke(rect, 6.0, egui::Stroke::new(1.0, palette::BORDER_SUBTLE));

    let frame = gizmo.render();
    paint_draw_list(&painter, rect.min, &frame.draw_list);

    for (face, center) in &frame.labels {
        painter.text(
            rect.min + egui::vec2(center.x, center.y),
            egui::Align2::CENTER_CENTER,
            face.label(),
            egui::FontId::proportional(10.0),
            palette::GIZMO_LABEL,
        );
    }

    let hovered = hover
        .filter(|pos| rect.contains(*pos))
        .and_then(|pos| gizmo.hit_test(to_local(pos, rect)));
    let radius = gizmo.config().arrow_hit_radius;
    for (arrow, center) in &frame.arrows {
        let center = rect.min + egui::vec2(center.x, center.y);
        let fill = if hovered == Some(GizmoTarget::Snap(SnapTarget::Arrow(*arrow))) {
            palette::GIZMO_BUTTON_HOVER
        } else {
            palette::GIZMO_BUTTON
        };
        painter.circle_filled(center, radius, fill);
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            arrow.glyph(),
            egui::FontId::proportional(radius * 1.2),
            palette::TEXT_PRIMARY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gizmo_rect_in_top_right_corner() {
        let viewport = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(800.0, 600.0));
        let rect = gizmo_rect(viewport, 150.0);
        assert_eq!(rect.right(), 890.0);
        assert_eq!(rect.top(), 60.0);
        assert_eq!(rect.width(), 150.0);
        assert_eq!(rect.height(), 150.0);
        assert_eq!(
            to_local(egui::pos2(745.0, 75.0), rect),
            glam::Vec2::new(5.0, 15.0)
        );
    }
}
