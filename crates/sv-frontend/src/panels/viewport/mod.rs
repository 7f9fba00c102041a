//! Main 3D viewport panel

mod gizmo_overlay;

use std::time::Instant;

use sv_renderer::{CameraRig, Projector};

use crate::panels::{Panel, paint_draw_list};
use crate::state::{ViewerState, held_keys};
use crate::theme::palette;

use gizmo_overlay::{gizmo_rect, press_gizmo, render_gizmo, to_local};

/// Scroll delta to zoom delta
const ZOOM_SCALE: f32 = 0.01;

/// Main viewport: picks and drags objects, orbits the camera and hosts the gizmo
pub struct ViewportPanel {
    projector: Projector,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            projector: Projector::new(),
        }
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ViewportPanel {
    fn name(&self) -> &str {
        "3D Viewport"
    }

    fn ui(&mut self, ui: &mut egui::Ui, state: &mut ViewerState) {
        let available_size = ui.available_size();
        if available_size.x <= 0.0 || available_size.y <= 0.0 {
            return;
        }

        let (response, painter) =
            ui.allocate_painter(available_size, egui::Sense::click_and_drag());
        let rect = response.rect;
        let viewport = glam::Vec2::new(rect.width(), rect.height());

        // Registered after the canvas so it wins hit testing over the corner
        let gizmo_area = gizmo_rect(rect, state.gizmo.size());
        let gizmo_response = ui.interact(
            gizmo_area,
            response.id.with("orientation_gizmo"),
            egui::Sense::click_and_drag(),
        );

        let now = Instant::now();
        let (pressed, moving, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.is_moving(),
                i.pointer.latest_pos(),
            )
        });

        state
            .rig
            .lock()
            .camera
            .update_aspect(viewport.x / viewport.y);

        // Press: gizmo surface first, then the main canvas
        if let Some(pos) = pointer.filter(|_| pressed) {
            if gizmo_response.hovered() {
                press_gizmo(&mut state.gizmo, to_local(pos, gizmo_area), now);
            } else if response.hovered() {
                let mut rig = state.rig.lock();
                state.interaction.pointer_pressed(
                    &mut state.scene,
                    &state.registry,
                    &mut rig,
                    to_local(pos, rect),
                    viewport,
                    &mut state.properties,
                );
            }
        }

        // Moves are forwarded even outside the canvas so sessions keep tracking
        if let Some(pos) = pointer.filter(|_| moving) {
            state.gizmo.pointer_moved(to_local(pos, gizmo_area));
            let camera = state.rig.lock().camera.clone();
            state
                .interaction
                .pointer_moved(&mut state.scene, &camera, to_local(pos, rect), viewport);
        }

        if state.camera_input_enabled() {
            let delta = response.drag_delta();
            let mut rig = state.rig.lock();
            let CameraRig { camera, controls } = &mut *rig;
            if response.dragged_by(egui::PointerButton::Primary) {
                controls.orbit(camera, delta.x, delta.y);
            } else if response.dragged_by(egui::PointerButton::Secondary)
                || response.dragged_by(egui::PointerButton::Middle)
            {
                controls.pan(camera, delta.x, delta.y);
            }

            if response.hovered() {
                let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
                if scroll_delta != 0.0 {
                    controls.zoom(camera, scroll_delta * ZOOM_SCALE);
                }
            }
        }

        if !ui.ctx().wants_keyboard_input() {
            let held = ui.input(held_keys);
            state.apply_keys(&held);
        }

        // Animation steps land before this frame's projection
        state.gizmo.update(now);

        let camera = state.rig.lock().camera.clone();
        self.projector.prune(&state.scene);
        let draw_list = self.projector.project(&state.scene, &camera, viewport);

        painter.rect_filled(rect, 0.0, palette::BG_BASE);
        paint_draw_list(&painter, rect.min, &draw_list);
        painter.text(
            rect.left_bottom() + egui::vec2(10.0, -10.0),
            egui::Align2::LEFT_BOTTOM,
            format!("Selected: {}", state.properties.selected_name),
            egui::FontId::proportional(12.0),
            palette::TEXT_SECONDARY,
        );

        render_gizmo(&painter, gizmo_area, &mut state.gizmo, pointer);
    }
}
