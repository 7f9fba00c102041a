//! Snap targets and their orientations
//!
//! Faces and arrow controls both resolve to a target orientation through
//! [`SnapTarget::orientation`], so every snap runs through the same animation.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec2, Vec3};

/// A face of the gizmo cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapFace {
    Front,
    Back,
    Top,
    Bottom,
    Right,
    Left,
}

impl SnapFace {
    pub const ALL: [SnapFace; 6] = [
        SnapFace::Front,
        SnapFace::Back,
        SnapFace::Top,
        SnapFace::Bottom,
        SnapFace::Right,
        SnapFace::Left,
    ];

    /// Canonical cube orientation for this face's view
    pub fn orientation(&self) -> Quat {
        match self {
            SnapFace::Front => Quat::IDENTITY,
            SnapFace::Back => Quat::from_rotation_y(PI),
            SnapFace::Top => Quat::from_rotation_x(-FRAC_PI_2),
            SnapFace::Bottom => Quat::from_rotation_x(FRAC_PI_2),
            SnapFace::Right => Quat::from_rotation_y(FRAC_PI_2),
            SnapFace::Left => Quat::from_rotation_y(-FRAC_PI_2),
        }
    }

    /// Outward normal in cube-local space
    pub fn normal(&self) -> Vec3 {
        match self {
            SnapFace::Front => Vec3::Z,
            SnapFace::Back => Vec3::NEG_Z,
            SnapFace::Top => Vec3::Y,
            SnapFace::Bottom => Vec3::NEG_Y,
            SnapFace::Right => Vec3::X,
            SnapFace::Left => Vec3::NEG_X,
        }
    }

    /// Face whose normal is closest to a cube-local direction
    pub fn from_local_normal(normal: Vec3) -> Self {
        let a = normal.abs();
        if a.x >= a.y && a.x >= a.z {
            if normal.x >= 0.0 { SnapFace::Right } else { SnapFace::Left }
        } else if a.y >= a.z {
            if normal.y >= 0.0 { SnapFace::Top } else { SnapFace::Bottom }
        } else if normal.z >= 0.0 {
            SnapFace::Front
        } else {
            SnapFace::Back
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SnapFace::Front => "FRONT",
            SnapFace::Back => "BACK",
            SnapFace::Top => "TOP",
            SnapFace::Bottom => "BOTTOM",
            SnapFace::Right => "RIGHT",
            SnapFace::Left => "LEFT",
        }
    }

    /// Face color (RGBA)
    pub fn color(&self) -> [f32; 4] {
        match self {
            SnapFace::Front | SnapFace::Back => [0.36, 0.52, 0.86, 1.0],
            SnapFace::Top | SnapFace::Bottom => [0.40, 0.74, 0.48, 1.0],
            SnapFace::Right | SnapFace::Left => [0.86, 0.42, 0.40, 1.0],
        }
    }
}

/// Screen-space arrow buttons around the gizmo surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowControl {
    Up,
    Down,
    Left,
    Right,
    RollLeft,
    RollRight,
}

impl ArrowControl {
    pub const ALL: [ArrowControl; 6] = [
        ArrowControl::Up,
        ArrowControl::Down,
        ArrowControl::Left,
        ArrowControl::Right,
        ArrowControl::RollLeft,
        ArrowControl::RollRight,
    ];

    /// Incremental rotation for one press, `step` in radians
    pub fn rotation(&self, step: f32) -> Quat {
        match self {
            ArrowControl::Up => Quat::from_rotation_x(-step),
            ArrowControl::Down => Quat::from_rotation_x(step),
            ArrowControl::Left => Quat::from_rotation_y(-step),
            ArrowControl::Right => Quat::from_rotation_y(step),
            ArrowControl::RollLeft => Quat::from_rotation_z(step),
            ArrowControl::RollRight => Quat::from_rotation_z(-step),
        }
    }

    /// Button center on a square surface of side `size`
    pub fn position(&self, size: f32, inset: f32) -> Vec2 {
        let mid = size * 0.5;
        let far = size - inset;
        match self {
            ArrowControl::Up => Vec2::new(mid, inset),
            ArrowControl::Down => Vec2::new(mid, far),
            ArrowControl::Left => Vec2::new(inset, mid),
            ArrowControl::Right => Vec2::new(far, mid),
            ArrowControl::RollLeft => Vec2::new(inset, inset),
            ArrowControl::RollRight => Vec2::new(far, inset),
        }
    }

    /// Glyph drawn on the button
    pub fn glyph(&self) -> &'static str {
        match self {
            ArrowControl::Up => "▲",
            ArrowControl::Down => "▼",
            ArrowControl::Left => "◀",
            ArrowControl::Right => "▶",
            ArrowControl::RollLeft => "↺",
            ArrowControl::RollRight => "↻",
        }
    }
}

/// Anything a press can snap to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapTarget {
    Face(SnapFace),
    Arrow(ArrowControl),
}

impl SnapTarget {
    /// Target orientation given the cube's current orientation.
    ///
    /// Faces are absolute; arrows rotate the current orientation by `step`
    /// radians about a world axis.
    pub fn orientation(&self, current: Quat, step: f32) -> Quat {
        match self {
            SnapTarget::Face(face) => face.orientation(),
            SnapTarget::Arrow(arrow) => (arrow.rotation(step) * current).normalize(),
        }
    }
}
