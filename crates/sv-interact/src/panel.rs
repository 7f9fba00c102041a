//! Property panel seam
//!
//! The panel supplies the shape kind and color for new objects and receives
//! every selection change. Selection code calls [`PropertyPanel::show_selection`]
//! followed by [`PropertyPanel::refresh`] before returning, so anything that
//! reads the panel right after an interaction sees the new selection.

use sv_core::ShapeKind;

/// Name and color of the selected object, as shown by the panel
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionInfo {
    pub name: String,
    pub color: [f32; 4],
}

/// Observer of selection changes and source of new-object settings
pub trait PropertyPanel {
    /// Shape kind chosen for the next created object
    fn shape_kind(&self) -> ShapeKind;

    /// Color chosen for the next created object
    fn color(&self) -> [f32; 4];

    /// Receive the new selection; `None` means nothing is selected
    fn show_selection(&mut self, selection: Option<&SelectionInfo>);

    /// Bring displayed values in line with the last pushed selection
    fn refresh(&mut self);
}
