//! Shapeview Frontend
//!
//! egui application hosting the main view, the property panel and the
//! orientation gizmo overlay.

pub mod app;
pub mod panels;
pub mod state;
pub mod theme;

pub use app::ShapeviewApp;
pub use state::{PropertyState, ViewerState};
