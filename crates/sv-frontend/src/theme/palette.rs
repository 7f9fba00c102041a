//! Color palette for the UI theme

use egui::Color32;

// =============================================================================
// Background hierarchy (dark to light)
// =============================================================================

/// Base viewport background
pub const BG_BASE: Color32 = Color32::from_rgb(24, 24, 28);
/// Panel background
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 35);
/// Elevated surfaces (overlays, popups)
pub const BG_ELEVATED: Color32 = Color32::from_rgb(38, 38, 44);
/// Input field background
pub const BG_INPUT: Color32 = Color32::from_rgb(45, 45, 52);
/// Hover state background
pub const BG_HOVER: Color32 = Color32::from_rgb(55, 55, 65);

// =============================================================================
// Borders
// =============================================================================

/// Subtle panel boundary
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 50, 58);
/// Normal divider line
pub const BORDER_NORMAL: Color32 = Color32::from_rgb(65, 65, 75);

// =============================================================================
// Text hierarchy
// =============================================================================

/// Primary text color
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 230, 235);
/// Secondary text (labels)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 170);

// =============================================================================
// Accent colors (blue)
// =============================================================================

/// Primary accent (selection, active)
pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(66, 150, 250);
/// Accent hover state
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(90, 170, 255);
/// Subtle accent for selection background
pub const ACCENT_SUBTLE: Color32 = Color32::from_rgba_premultiplied(66, 150, 250, 30);

// =============================================================================
// Gizmo overlay
// =============================================================================

/// Arrow button fill
pub const GIZMO_BUTTON: Color32 = Color32::from_rgb(55, 55, 65);
/// Arrow button fill while hovered
pub const GIZMO_BUTTON_HOVER: Color32 = Color32::from_rgb(66, 150, 250);
/// Face label text
pub const GIZMO_LABEL: Color32 = Color32::from_rgb(245, 245, 250);

/// Overlay background with custom alpha
pub fn overlay_bg(alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(38, 38, 44, alpha)
}

/// Convert a scene RGBA color in `0.0..=1.0` to an egui color
pub fn scene_color(color: [f32; 4]) -> Color32 {
    let [r, g, b, a] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_color_clamps() {
        assert_eq!(scene_color([1.0, 0.0, 0.5, 1.0]), Color32::from_rgb(255, 0, 128));
        assert_eq!(scene_color([2.0, -1.0, 0.0, 1.0]), Color32::from_rgb(255, 0, 0));
    }
}
