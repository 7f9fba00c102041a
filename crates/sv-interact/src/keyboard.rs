//! Held-key movement of the selected object and the object group

use glam::Vec3;
use sv_core::{KeyboardConfig, NodeId, Scene, SceneError};

/// Keys that move or rotate something while held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Shift,
    W,
    S,
    A,
    D,
    Q,
    E,
    G,
    B,
    H,
    F,
    N,
    V,
}

/// What one key does on each tick
enum KeyEffect {
    /// Translate the selected object along a world axis (in units of move speed)
    Move(Vec3),
    /// Rotate the selected object about one of its local axes
    Rotate(Vec3, f32),
    /// Rotate the object group about one of its local axes
    RotateGroup(Vec3, f32),
}

impl MovementKey {
    fn effect(self) -> KeyEffect {
        use KeyEffect::*;
        match self {
            MovementKey::ArrowLeft => Move(Vec3::NEG_X),
            MovementKey::ArrowRight => Move(Vec3::X),
            MovementKey::ArrowUp => Move(Vec3::NEG_Z),
            MovementKey::ArrowDown => Move(Vec3::Z),
            MovementKey::Space => Move(Vec3::Y),
            MovementKey::Shift => Move(Vec3::NEG_Y),
            MovementKey::W => Rotate(Vec3::X, -1.0),
            MovementKey::S => Rotate(Vec3::X, 1.0),
            MovementKey::A => Rotate(Vec3::Y, -1.0),
            MovementKey::D => Rotate(Vec3::Y, 1.0),
            MovementKey::Q => Rotate(Vec3::Z, -1.0),
            MovementKey::E => Rotate(Vec3::Z, 1.0),
            MovementKey::G => RotateGroup(Vec3::Y, -1.0),
            MovementKey::B => RotateGroup(Vec3::Y, 1.0),
            MovementKey::H => RotateGroup(Vec3::X, -1.0),
            MovementKey::F => RotateGroup(Vec3::X, 1.0),
            MovementKey::N => RotateGroup(Vec3::Z, -1.0),
            MovementKey::V => RotateGroup(Vec3::Z, 1.0),
        }
    }
}

/// Applies held keys once per tick
#[derive(Debug, Clone)]
pub struct KeyboardMover {
    config: KeyboardConfig,
}

impl KeyboardMover {
    pub fn new(config: &KeyboardConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Apply every held key for one tick.
    ///
    /// Object keys do nothing without a selection; group keys always apply.
    /// Returns whether anything moved.
    pub fn apply(
        &self,
        scene: &mut Scene,
        selected: Option<NodeId>,
        group: NodeId,
        held: impl IntoIterator<Item = MovementKey>,
    ) -> Result<bool, SceneError> {
        let mut object_transform = match selected {
            Some(id) => Some(scene.get(id).ok_or(SceneError::NodeNotFound(id))?.transform),
            None => None,
        };
        let mut group_transform = scene
            .get(group)
            .ok_or(SceneError::NodeNotFound(group))?
            .transform;
        let (mut object_changed, mut group_changed) = (false, false);

        for key in held {
            match (key.effect(), object_transform.as_mut()) {
                (KeyEffect::Move(direction), Some(transform)) => {
                    transform.translation += direction * self.config.move_speed;
                    object_changed = true;
                }
                (KeyEffect::Rotate(axis, sign), Some(transform)) => {
                    transform.rotate_local(axis, sign * self.config.rotation_speed);
                    object_changed = true;
                }
                (KeyEffect::RotateGroup(axis, sign), _) => {
                    group_transform.rotate_local(axis, sign * self.config.rotation_speed);
                    group_changed = true;
                }
                (_, None) => {}
            }
        }

        if let (Some(id), Some(transform)) = (selected, object_transform) {
            if object_changed {
                scene.set_transform(id, transform)?;
            }
        }
        if group_changed {
            scene.set_transform(group, group_transform)?;
        }
        Ok(object_changed || group_changed)
    }
}
