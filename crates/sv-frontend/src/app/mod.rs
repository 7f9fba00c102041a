//! Main application module

use sv_core::{SceneError, ViewerConfig};

use crate::panels::{Panel, PropertiesPanel, ViewportPanel};
use crate::state::ViewerState;
use crate::theme::{apply_theme, palette};

/// Main application
pub struct ShapeviewApp {
    state: ViewerState,
    properties: PropertiesPanel,
    viewport: ViewportPanel,
}

impl ShapeviewApp {
    /// Create the app with one selected sphere in the scene
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Result<Self, SceneError> {
        apply_theme(&cc.egui_ctx);

        let state = ViewerState::new(config)?;
        tracing::info!("Viewer ready with {} object(s)", state.registry.len());

        Ok(Self {
            state,
            properties: PropertiesPanel::new(),
            viewport: ViewportPanel::new(),
        })
    }
}

/// End drag sessions on a release anywhere in the window
fn handle_release(ctx: &egui::Context, state: &mut ViewerState) -> bool {
    if !ctx.input(|i| i.pointer.any_released()) {
        return false;
    }
    state.pointer_released()
}

impl eframe::App for ShapeviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("properties_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.properties.ui(ui, &mut self.state);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(palette::BG_BASE))
            .show(ctx, |ui| {
                self.viewport.ui(ui, &mut self.state);
            });

        // After the panels so a press and release in one frame still ends the session
        handle_release(ctx, &mut self.state);

        // Idle sync, snaps and held keys advance every frame
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn frame(ctx: &egui::Context, events: Vec<egui::Event>, state: &mut ViewerState) -> bool {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut ended = false;
        let _ = ctx.run(input, |ctx| ended = handle_release(ctx, state));
        ended
    }

    fn press_center(state: &mut ViewerState) {
        let mut rig = state.rig.lock();
        state.interaction.pointer_pressed(
            &mut state.scene,
            &state.registry,
            &mut rig,
            Vec2::new(200.0, 200.0),
            Vec2::new(400.0, 400.0),
            &mut state.properties,
        );
    }

    #[test]
    fn test_release_outside_canvas_ends_drag() {
        let mut state = ViewerState::new(ViewerConfig::default()).unwrap();
        press_center(&mut state);
        assert!(state.interaction.is_dragging());
        assert!(!state.rig.lock().controls.enabled);
        assert!(!state.camera_input_enabled());

        let ctx = egui::Context::default();
        // No release this frame: the session stays open
        assert!(!frame(&ctx, Vec::new(), &mut state));
        assert!(state.interaction.is_dragging());

        let outside = egui::pos2(-40.0, 2000.0);
        let release = vec![
            egui::Event::PointerMoved(outside),
            egui::Event::PointerButton {
                pos: outside,
                button: egui::PointerButton::Primary,
                pressed: false,
                modifiers: egui::Modifiers::default(),
            },
        ];
        assert!(frame(&ctx, release, &mut state));
        assert!(!state.interaction.is_dragging());
        assert!(state.rig.lock().controls.enabled);
        assert!(state.camera_input_enabled());
    }
}
