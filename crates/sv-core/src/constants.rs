//! Global constants for sv-core

/// Default number of segments for cylinder and cone mesh generation
pub const CYLINDER_SEGMENTS: u32 = 32;

/// Default number of latitude segments for sphere mesh generation
pub const SPHERE_LAT_SEGMENTS: u32 = 16;

/// Default number of longitude segments for sphere mesh generation
pub const SPHERE_LON_SEGMENTS: u32 = 32;

/// Default color for new objects (#0088ff, RGBA)
pub const DEFAULT_OBJECT_COLOR: [f32; 4] = [0.0, 0.533, 1.0, 1.0];

/// Name of the group node that owns every created object
pub const OBJECT_GROUP_NAME: &str = "objects";

/// Label published to observers when nothing is selected
pub const NO_SELECTION_LABEL: &str = "None";

/// Convert an RGBA color to a `#rrggbb` hex string
pub fn color_to_hex(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(color[0]),
        channel(color[1]),
        channel(color[2])
    )
}
