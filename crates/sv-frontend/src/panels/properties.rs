//! Properties panel: new-object settings, color and the object selector

use sv_core::{ShapeKind, color_to_hex};

use crate::panels::Panel;
use crate::state::ViewerState;
use crate::theme::palette;

/// Side panel for creating, selecting and recoloring objects
#[derive(Debug, Default)]
pub struct PropertiesPanel;

impl PropertiesPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for PropertiesPanel {
    fn name(&self) -> &str {
        "Properties"
    }

    fn ui(&mut self, ui: &mut egui::Ui, state: &mut ViewerState) {
        ui.heading(self.name());
        ui.separator();

        egui::Grid::new("properties_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Shape");
                egui::ComboBox::from_id_salt("shape_kind")
                    .selected_text(state.properties.shape_kind.label())
                    .show_ui(ui, |ui| {
                        for kind in ShapeKind::ALL {
                            ui.selectable_value(
                                &mut state.properties.shape_kind,
                                kind,
                                kind.label(),
                            );
                        }
                    });
                ui.end_row();

                ui.label("Color");
                ui.horizontal(|ui| {
                    let mut color = state.properties.color;
                    if ui.color_edit_button_rgba_unmultiplied(&mut color).changed() {
                        state.set_color(color);
                    }
                    ui.label(
                        egui::RichText::new(color_to_hex(state.properties.color))
                            .monospace()
                            .color(palette::TEXT_SECONDARY),
                    );
                });
                ui.end_row();

                ui.label("Object");
                let mut chosen = None;
                egui::ComboBox::from_id_salt("object_selector")
                    .selected_text(state.properties.selected_name.as_str())
                    .show_ui(ui, |ui| {
                        for name in state.selector_names() {
                            let current = name == state.properties.selected_name;
                            if ui.selectable_label(current, name.as_str()).clicked() && !current {
                                chosen = Some(name);
                            }
                        }
                    });
                if let Some(name) = chosen {
                    state.select_by_name(&name);
                }
                ui.end_row();
            });

        ui.add_space(8.0);
        if ui.button("Add object").clicked() {
            state.add_object();
        }

        ui.add_space(16.0);
        ui.separator();
        ui.label(
            egui::RichText::new(
                "Drag objects to move them\n\
                 Arrows, Space, Shift: move selection\n\
                 W/S A/D Q/E: rotate selection\n\
                 G/B H/F N/V: rotate all objects",
            )
            .small()
            .color(palette::TEXT_SECONDARY),
        );
    }
}
