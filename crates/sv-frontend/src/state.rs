//! Application state
//!
//! [`ViewerState`] owns the scene, the object registry, the shared camera rig,
//! the orientation gizmo and the main-view interaction. [`PropertyState`] is
//! the property panel's model and the [`PropertyPanel`] the interaction layer
//! publishes selection changes to.

use sv_core::{
    NO_SELECTION_LABEL, NodeId, ObjectRegistry, Scene, SceneError, ShapeKind, ViewerConfig,
};
use sv_interact::{
    GizmoMode, MovementKey, OrientationGizmo, PropertyPanel, SelectionInfo, SelectionState,
    ViewportInteraction,
};
use sv_renderer::{CameraRig, SharedCameraRig};

/// Values shown and edited by the property panel
#[derive(Debug, Clone)]
pub struct PropertyState {
    /// Shape kind for the next created object
    pub shape_kind: ShapeKind,
    /// Color for the next created object, and of the selection when there is one
    pub color: [f32; 4],
    /// Name shown in the object selector
    pub selected_name: String,
    /// Last pushed selection, applied on refresh
    selection: Option<SelectionInfo>,
}

impl PropertyState {
    pub fn new(color: [f32; 4]) -> Self {
        Self {
            shape_kind: ShapeKind::Sphere,
            color,
            selected_name: NO_SELECTION_LABEL.to_string(),
            selection: None,
        }
    }

    /// Last selection pushed by the interaction layer
    pub fn selection(&self) -> Option<&SelectionInfo> {
        self.selection.as_ref()
    }
}

impl PropertyPanel for PropertyState {
    fn shape_kind(&self) -> ShapeKind {
        self.shape_kind
    }

    fn color(&self) -> [f32; 4] {
        self.color
    }

    fn show_selection(&mut self, selection: Option<&SelectionInfo>) {
        self.selection = selection.cloned();
    }

    fn refresh(&mut self) {
        match &self.selection {
            Some(info) => {
                self.selected_name = info.name.clone();
                self.color = info.color;
            }
            None => self.selected_name = NO_SELECTION_LABEL.to_string(),
        }
    }
}

/// Everything the panels read and mutate
pub struct ViewerState {
    pub config: ViewerConfig,
    pub scene: Scene,
    pub registry: ObjectRegistry,
    pub rig: SharedCameraRig,
    pub gizmo: OrientationGizmo,
    pub interaction: ViewportInteraction,
    pub properties: PropertyState,
}

impl ViewerState {
    /// Build the scene with one selected sphere and link the gizmo to the main camera
    pub fn new(config: ViewerConfig) -> Result<Self, SceneError> {
        let mut scene = Scene::new();
        let mut registry = ObjectRegistry::new(&mut scene, config.objects.clone());
        let rig = CameraRig::new(&config.camera, 1.0).shared();
        let gizmo = OrientationGizmo::new(&config.gizmo, Some(rig.clone()))?;
        let mut interaction = ViewportInteraction::new(&config);
        let mut properties = PropertyState::new(config.default_color);

        let sphere = registry.add_object(&mut scene, ShapeKind::Sphere, properties.color)?;
        interaction.select(&mut scene, sphere, &mut properties);

        Ok(Self {
            config,
            scene,
            registry,
            rig,
            gizmo,
            interaction,
            properties,
        })
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.interaction.state().object()
    }

    /// Create an object from the panel's shape kind and color
    pub fn add_object(&mut self) -> Option<NodeId> {
        match self
            .interaction
            .add_object(&mut self.scene, &mut self.registry, &self.properties)
        {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Failed to add object: {}", e);
                None
            }
        }
    }

    /// Select from the object selector; [`NO_SELECTION_LABEL`] clears
    pub fn select_by_name(&mut self, name: &str) -> SelectionState {
        self.interaction.select_by_name(
            &mut self.scene,
            &self.registry,
            name,
            &mut self.properties,
        )
    }

    /// Panel color edit: becomes the next object's color and recolors the selection
    pub fn set_color(&mut self, color: [f32; 4]) {
        self.properties.color = color;
        self.interaction.set_selected_color(&mut self.scene, color);
    }

    /// Whether ambient orbit, pan and zoom may move the main camera.
    ///
    /// An object drag or a gizmo ring drag or snap owns the camera until it ends.
    pub fn camera_input_enabled(&self) -> bool {
        !self.interaction.is_dragging() && self.gizmo.mode() == GizmoMode::Idle
    }

    /// Release anywhere in the window: ends an object drag and a ring drag
    pub fn pointer_released(&mut self) -> bool {
        let object_drag = {
            let mut rig = self.rig.lock();
            self.interaction.pointer_released(&mut rig.controls)
        };
        if object_drag {
            tracing::debug!("Object drag released");
        }
        let ring_drag = self.gizmo.pointer_released();
        object_drag || ring_drag
    }

    /// Apply held movement keys for one tick
    pub fn apply_keys(&mut self, held: &[MovementKey]) {
        if held.is_empty() {
            return;
        }
        if let Err(e) = self
            .interaction
            .apply_keys(&mut self.scene, &self.registry, held.iter().copied())
        {
            tracing::warn!("Keyboard movement failed: {}", e);
        }
    }

    /// Display names for the object selector, starting with [`NO_SELECTION_LABEL`]
    pub fn selector_names(&self) -> Vec<String> {
        std::iter::once(NO_SELECTION_LABEL)
            .chain(self.registry.names(&self.scene))
            .map(str::to_string)
            .collect()
    }
}

/// Keyboard bindings for held-key movement
const KEY_BINDINGS: [(egui::Key, MovementKey); 17] = [
    (egui::Key::ArrowLeft, MovementKey::ArrowLeft),
    (egui::Key::ArrowRight, MovementKey::ArrowRight),
    (egui::Key::ArrowUp, MovementKey::ArrowUp),
    (egui::Key::ArrowDown, MovementKey::ArrowDown),
    (egui::Key::Space, MovementKey::Space),
    (egui::Key::W, MovementKey::W),
    (egui::Key::S, MovementKey::S),
    (egui::Key::A, MovementKey::A),
    (egui::Key::D, MovementKey::D),
    (egui::Key::Q, MovementKey::Q),
    (egui::Key::E, MovementKey::E),
    (egui::Key::G, MovementKey::G),
    (egui::Key::B, MovementKey::B),
    (egui::Key::H, MovementKey::H),
    (egui::Key::F, MovementKey::F),
    (egui::Key::N, MovementKey::N),
    (egui::Key::V, MovementKey::V),
];

/// Movement keys currently held down
pub fn held_keys(input: &egui::InputState) -> Vec<MovementKey> {
    // Shift is a modifier in egui, not a key
    let shift = input.modifiers.shift.then_some(MovementKey::Shift);
    KEY_BINDINGS
        .iter()
        .filter(|(key, _)| input.key_down(*key))
        .map(|&(_, movement)| movement)
        .chain(shift)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::time::{Duration, Instant};
    use sv_interact::{SnapFace, SnapTarget};

    #[test]
    fn test_startup_selects_sphere() {
        let state = ViewerState::new(ViewerConfig::default()).unwrap();
        assert_eq!(state.registry.len(), 1);
        assert_eq!(state.selected(), Some(state.registry.objects()[0]));
        assert_eq!(state.properties.selected_name, "Object 1");
        assert!(state.gizmo.has_main_camera());
        assert_eq!(state.selector_names(), vec!["None", "Object 1"]);
    }

    #[test]
    fn test_refresh_applies_pushed_selection() {
        let mut panel = PropertyState::new([0.0, 0.0, 1.0, 1.0]);
        panel.show_selection(Some(&SelectionInfo {
            name: "Object 3".into(),
            color: [1.0, 0.0, 0.0, 1.0],
        }));
        // Displayed values only change on refresh
        assert_eq!(panel.selected_name, NO_SELECTION_LABEL);
        panel.refresh();
        assert_eq!(panel.selected_name, "Object 3");
        assert_eq!(panel.color, [1.0, 0.0, 0.0, 1.0]);

        panel.show_selection(None);
        panel.refresh();
        assert_eq!(panel.selected_name, NO_SELECTION_LABEL);
        assert_eq!(panel.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_add_object_and_select_by_name() {
        let mut state = ViewerState::new(ViewerConfig::default()).unwrap();
        state.properties.shape_kind = ShapeKind::Cone;
        let cone = state.add_object().unwrap();
        assert_eq!(state.registry.objects()[1], cone);
        assert_eq!(state.selected(), Some(state.registry.objects()[0]));
        assert_eq!(state.properties.selected_name, "Object 1");
        assert!(state.selector_names().iter().any(|n| n == "Object 2"));

        assert_eq!(state.select_by_name("Object 2"), SelectionState::Selected(cone));
        assert_eq!(state.select_by_name(NO_SELECTION_LABEL), SelectionState::Unselected);
        assert_eq!(state.properties.selected_name, NO_SELECTION_LABEL);

        let first = state.registry.objects()[0];
        assert_eq!(state.select_by_name("Object 1"), SelectionState::Selected(first));
    }

    #[test]
    fn test_color_edit_recolors_selection() {
        let mut state = ViewerState::new(ViewerConfig::default()).unwrap();
        let sphere = state.registry.objects()[0];
        state.set_color([0.2, 0.8, 0.2, 1.0]);
        assert_eq!(state.scene.get(sphere).unwrap().color, [0.2, 0.8, 0.2, 1.0]);

        state.select_by_name(NO_SELECTION_LABEL);
        state.set_color([1.0, 1.0, 0.0, 1.0]);
        assert_eq!(state.scene.get(sphere).unwrap().color, [0.2, 0.8, 0.2, 1.0]);
        assert_eq!(state.properties.color, [1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_keys_move_selection() {
        let mut state = ViewerState::new(ViewerConfig::default()).unwrap();
        let sphere = state.registry.objects()[0];
        state.apply_keys(&[MovementKey::Space]);
        let position = state.scene.world_position(sphere).unwrap();
        assert!(position.abs_diff_eq(Vec3::new(0.0, 0.1, 0.0), 1e-6));
    }

    #[test]
    fn test_camera_input_waits_for_idle_gizmo() {
        let mut state = ViewerState::new(ViewerConfig::default()).unwrap();
        assert!(state.camera_input_enabled());

        let t0 = Instant::now();
        assert!(state.gizmo.snap_to(SnapTarget::Face(SnapFace::Top), t0));
        assert_eq!(state.gizmo.mode(), GizmoMode::Animating);
        assert!(!state.camera_input_enabled());

        state.gizmo.update(t0 + Duration::from_millis(50));
        assert!(!state.camera_input_enabled());

        state.gizmo.update(t0 + Duration::from_secs(1));
        assert_eq!(state.gizmo.mode(), GizmoMode::Idle);
        assert!(state.camera_input_enabled());
    }
}
