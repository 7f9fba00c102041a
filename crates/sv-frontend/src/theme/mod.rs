//! Theme module for UI styling

pub mod palette;

use egui::{Rounding, Stroke, Visuals};

/// Apply the dark viewer theme to the egui context
pub fn apply_theme(ctx: &egui::Context) {
    ctx.set_visuals(visuals());
}

fn visuals() -> Visuals {
    let mut v = Visuals::dark();

    v.panel_fill = palette::BG_PANEL;
    v.window_fill = palette::BG_ELEVATED;
    v.extreme_bg_color = palette::BG_BASE;
    v.faint_bg_color = palette::BG_INPUT;

    v.selection.bg_fill = palette::ACCENT_SUBTLE;
    v.selection.stroke = Stroke::new(1.0, palette::ACCENT_PRIMARY);
    v.hyperlink_color = palette::ACCENT_PRIMARY;
    v.override_text_color = Some(palette::TEXT_PRIMARY);

    v.widgets.noninteractive.bg_fill = palette::BG_INPUT;
    v.widgets.noninteractive.weak_bg_fill = palette::BG_PANEL;
    v.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette::BORDER_SUBTLE);
    v.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette::TEXT_SECONDARY);

    v.widgets.inactive.bg_fill = palette::BG_INPUT;
    v.widgets.inactive.weak_bg_fill = palette::BG_PANEL;
    v.widgets.inactive.bg_stroke = Stroke::new(1.0, palette::BORDER_SUBTLE);
    v.widgets.inactive.fg_stroke = Stroke::new(1.0, palette::TEXT_PRIMARY);

    v.widgets.hovered.bg_fill = palette::BG_HOVER;
    v.widgets.hovered.weak_bg_fill = palette::BG_HOVER;
    v.widgets.hovered.bg_stroke = Stroke::new(1.0, palette::BORDER_NORMAL);
    v.widgets.hovered.fg_stroke = Stroke::new(1.5, palette::TEXT_PRIMARY);

    v.widgets.active.bg_fill = palette::ACCENT_PRIMARY;
    v.widgets.active.weak_bg_fill = palette::BG_HOVER;
    v.widgets.active.bg_stroke = Stroke::new(1.0, palette::ACCENT_HOVER);
    v.widgets.active.fg_stroke = Stroke::new(2.0, palette::TEXT_PRIMARY);

    for widget in [
        &mut v.widgets.noninteractive,
        &mut v.widgets.inactive,
        &mut v.widgets.hovered,
        &mut v.widgets.active,
        &mut v.widgets.open,
    ] {
        widget.rounding = Rounding::same(4.0);
    }
    v.window_rounding = Rounding::same(6.0);

    v
}
