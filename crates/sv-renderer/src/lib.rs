//! Shapeview Renderer
//!
//! Camera model, ray casting and CPU projection of a [`sv_core::Scene`]
//! into screen-space draw lists that any 2D painter can fill.
//!
//! # Module Structure
//!
//! ```text
//! sv-renderer/
//! ├── bounds.rs      # BoundingBox and Plane
//! ├── camera.rs      # Perspective camera and pointer-to-ray conversion
//! ├── collision.rs   # Ray type and ray/shape intersection tests
//! ├── controls.rs    # Orbit controls and the shared camera rig
//! └── projection.rs  # Scene to screen-space draw list
//! ```

pub mod bounds;
pub mod camera;
pub mod collision;
pub mod controls;
pub mod projection;

pub use bounds::{BoundingBox, Plane};
pub use camera::Camera;
pub use collision::{Ray, RayHit, ray_shape_intersection};
pub use controls::{CameraPose, CameraRig, OrbitControls, SharedCameraRig};
pub use projection::{DrawItem, DrawList, Projector, ScreenLine, ScreenTriangle};
