//! Shapeview Interaction
//!
//! Pointer and keyboard handling for the main view and the orientation gizmo:
//! - Picker: pointer ray to nearest pickable node
//! - Selection: single-slot selection with an axis indicator, published to the
//!   property panel
//! - DragController: plane-constrained translation of the selected object
//! - OrientationGizmo: cube view that follows and drives the main camera
//! - SnapScheduler: eased quaternion snaps shared by every gizmo target
//!
//! Entry points take explicit [`std::time::Instant`] values so the frame loop
//! (or a test) decides what "now" is.

pub mod animation;
pub mod drag;
pub mod gizmo;
pub mod indicator;
pub mod keyboard;
pub mod panel;
pub mod picker;
pub mod selection;
pub mod viewport;

pub use animation::{SnapAnimation, SnapFrame, SnapScheduler, ease_out_cubic};
pub use drag::{DragController, DragSession, drag_plane_normal};
pub use gizmo::{
    ArrowControl, GizmoFrame, GizmoMode, GizmoTarget, OrientationGizmo, SnapFace, SnapTarget,
};
pub use keyboard::{KeyboardMover, MovementKey};
pub use panel::{PropertyPanel, SelectionInfo};
pub use picker::{PickHit, pick, pick_all, pick_ray};
pub use selection::{Selection, SelectionState};
pub use viewport::ViewportInteraction;
