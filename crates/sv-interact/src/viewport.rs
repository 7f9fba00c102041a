//! Main view interaction
//!
//! Ties picking, selection, dragging and keyboard movement together for the
//! main canvas. Every entry point that can change the selection returns the
//! resulting [`SelectionState`] so callers never read it from shared state.

use glam::Vec2;
use sv_core::{NodeId, ObjectRegistry, Scene, SceneError, ViewerConfig, NO_SELECTION_LABEL};
use sv_renderer::{Camera, CameraRig, OrbitControls};

use crate::drag::DragController;
use crate::keyboard::{KeyboardMover, MovementKey};
use crate::panel::PropertyPanel;
use crate::picker::{pick, pick_ray};
use crate::selection::{Selection, SelectionState};

/// Selection, drag session and keyboard movement for the main view
#[derive(Debug, Clone)]
pub struct ViewportInteraction {
    selection: Selection,
    drag: DragController,
    keyboard: KeyboardMover,
}

impl ViewportInteraction {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            selection: Selection::new(),
            drag: DragController::new(&config.drag),
            keyboard: KeyboardMover::new(&config.keyboard),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Press on the main canvas: select what is under the pointer and start
    /// dragging it, or clear the selection on a miss
    pub fn pointer_pressed(
        &mut self,
        scene: &mut Scene,
        registry: &ObjectRegistry,
        rig: &mut CameraRig,
        pointer: Vec2,
        viewport: Vec2,
        panel: &mut dyn PropertyPanel,
    ) -> SelectionState {
        let Some(hit) = pick(scene, &rig.camera, pointer, viewport, registry.objects()) else {
            tracing::debug!("Pick missed");
            return self.selection.clear(scene, panel);
        };
        if let Some(node) = scene.get(hit.object) {
            tracing::debug!("Pick hit {} at distance {:.3}", node.name, hit.distance);
        }

        if let Err(e) = self.selection.select(scene, hit.object, panel) {
            tracing::warn!("Failed to select picked object: {}", e);
            return self.selection.clear(scene, panel);
        }
        if let Err(e) = self
            .drag
            .begin(scene, hit.object, &rig.camera, &mut rig.controls)
        {
            tracing::warn!("Failed to start drag: {}", e);
        }
        self.selection.state()
    }

    /// Pointer motion over the main canvas; returns whether the dragged object moved
    pub fn pointer_moved(
        &mut self,
        scene: &mut Scene,
        camera: &Camera,
        pointer: Vec2,
        viewport: Vec2,
    ) -> bool {
        if !self.drag.is_active() {
            return false;
        }
        let ray = pick_ray(camera, pointer, viewport);
        match self.drag.drag(scene, &ray) {
            Ok(moved) => moved,
            Err(e) => {
                tracing::warn!("Drag update failed: {}", e);
                false
            }
        }
    }

    /// Release anywhere in the window: ends the drag and re-enables orbiting
    pub fn pointer_released(&mut self, controls: &mut OrbitControls) -> bool {
        self.drag.end(controls)
    }

    /// Select an object by display name; [`NO_SELECTION_LABEL`] or an unknown
    /// name clears the selection
    pub fn select_by_name(
        &mut self,
        scene: &mut Scene,
        registry: &ObjectRegistry,
        name: &str,
        panel: &mut dyn PropertyPanel,
    ) -> SelectionState {
        let found = (name != NO_SELECTION_LABEL)
            .then(|| registry.find_by_name(scene, name))
            .flatten();
        match found {
            Some(id) => self.select(scene, id, panel),
            None => self.selection.clear(scene, panel),
        }
    }

    /// Select a known object directly
    pub fn select(
        &mut self,
        scene: &mut Scene,
        id: NodeId,
        panel: &mut dyn PropertyPanel,
    ) -> SelectionState {
        match self.selection.select(scene, id, panel) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Failed to select object: {}", e);
                self.selection.clear(scene, panel)
            }
        }
    }

    /// Create an object with the panel's shape kind and color; the current
    /// selection is left as it is
    pub fn add_object(
        &self,
        scene: &mut Scene,
        registry: &mut ObjectRegistry,
        panel: &dyn PropertyPanel,
    ) -> Result<NodeId, SceneError> {
        registry.add_object(scene, panel.shape_kind(), panel.color())
    }

    /// Recolor the selected object; returns false when nothing is selected
    pub fn set_selected_color(&self, scene: &mut Scene, color: [f32; 4]) -> bool {
        let Some(node) = self.selection.selected().and_then(|id| scene.get_mut(id)) else {
            return false;
        };
        node.color = color;
        true
    }

    /// Apply held movement keys for one tick
    pub fn apply_keys(
        &self,
        scene: &mut Scene,
        registry: &ObjectRegistry,
        held: impl IntoIterator<Item = MovementKey>,
    ) -> Result<bool, SceneError> {
        self.keyboard
            .apply(scene, self.selection.selected(), registry.group(), held)
    }
}
