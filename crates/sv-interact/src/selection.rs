//! Single-object selection
//!
//! The selection owns the one indicator (an axis triad) that may exist at a
//! time. Every transition moves or removes the indicator and publishes the new
//! state to the property panel before returning.

use sv_core::{NodeId, Scene, SceneError};

use crate::indicator::attach_axis_triad;
use crate::panel::{PropertyPanel, SelectionInfo};

/// Length of the indicator's axis lines
pub const INDICATOR_AXIS_LENGTH: f32 = 5.0;

/// Name given to the indicator's root node
pub const INDICATOR_NAME: &str = "selection_indicator";

/// Selection state returned from every interaction entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(NodeId),
}

impl SelectionState {
    /// Selected object, if any
    pub fn object(&self) -> Option<NodeId> {
        match *self {
            SelectionState::Selected(id) => Some(id),
            SelectionState::Unselected => None,
        }
    }
}

/// Selection slot and its indicator
#[derive(Debug, Clone, Default)]
pub struct Selection {
    state: SelectionState,
    indicator: Option<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Currently selected object
    pub fn selected(&self) -> Option<NodeId> {
        self.state.object()
    }

    /// Root node of the live indicator
    pub fn indicator(&self) -> Option<NodeId> {
        self.indicator
    }

    /// Select `object`, moving the indicator onto it.
    ///
    /// Re-selecting the current object replaces its indicator with a fresh one.
    pub fn select(
        &mut self,
        scene: &mut Scene,
        object: NodeId,
        panel: &mut dyn PropertyPanel,
    ) -> Result<SelectionState, SceneError> {
        let info = scene
            .get(object)
            .map(|node| SelectionInfo {
                name: node.name.clone(),
                color: node.color,
            })
            .ok_or(SceneError::NodeNotFound(object))?;

        self.remove_indicator(scene);
        let indicator =
            attach_axis_triad(scene, object, INDICATOR_NAME, INDICATOR_AXIS_LENGTH)?;
        self.indicator = Some(indicator);
        self.state = SelectionState::Selected(object);

        tracing::debug!("Selected {}", info.name);
        panel.show_selection(Some(&info));
        panel.refresh();
        Ok(self.state)
    }

    /// Clear the selection and remove the indicator
    pub fn clear(&mut self, scene: &mut Scene, panel: &mut dyn PropertyPanel) -> SelectionState {
        self.remove_indicator(scene);
        if self.state != SelectionState::Unselected {
            tracing::debug!("Selection cleared");
        }
        self.state = SelectionState::Unselected;

        panel.show_selection(None);
        panel.refresh();
        self.state
    }

    fn remove_indicator(&mut self, scene: &mut Scene) {
        if let Some(indicator) = self.indicator.take() {
            if let Err(e) = scene.remove(indicator) {
                tracing::warn!("Indicator already gone: {}", e);
            }
        }
    }
}
