//! One-shot model placement

use crate::ar::reticle::Reticle;
use glam::{Mat4, Quat, Vec3};

/// Load state of the model asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSlot {
    Loading,
    Loaded,
    /// Loading failed; the model can never be placed
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    Unplaced,
    Placed,
}

/// Result of a select (tap) event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectOutcome {
    /// The model was anchored at this position
    Placed(Vec3),
    AlreadyPlaced,
    /// No surface under the reticle this frame
    NoSurface,
    /// The model is still loading or failed to load
    ModelUnavailable,
}

/// The placeable model's pose and visibility
#[derive(Debug, Clone, PartialEq)]
pub struct EngineModel {
    pub position: Vec3,
    /// Rotation about the vertical axis, in radians
    pub yaw: f32,
    pub scale: f32,
    pub visible: bool,
}

impl EngineModel {
    pub fn new(scale: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            scale,
            visible: false,
        }
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.yaw),
            self.position,
        )
    }
}

/// Placement state machine.
///
/// `Unplaced -> Placed` is the only transition and it never reverses.
#[derive(Debug, Clone)]
pub struct Placement {
    state: PlacementState,
    slot: ModelSlot,
    model: EngineModel,
}

impl Placement {
    pub fn new(model_scale: f32) -> Self {
        Self {
            state: PlacementState::Unplaced,
            slot: ModelSlot::Loading,
            model: EngineModel::new(model_scale),
        }
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn is_placed(&self) -> bool {
        self.state == PlacementState::Placed
    }

    pub fn slot(&self) -> ModelSlot {
        self.slot
    }

    pub fn model(&self) -> &EngineModel {
        &self.model
    }

    /// Record the outcome of the asset load. Only the first outcome counts.
    pub fn set_model_loaded(&mut self, loaded: bool) {
        if self.slot != ModelSlot::Loading {
            log::warn!("Model load reported twice; keeping {:?}", self.slot);
            return;
        }
        self.slot = if loaded {
            ModelSlot::Loaded
        } else {
            ModelSlot::Failed
        };
    }

    pub fn select(&mut self, reticle: &Reticle) -> SelectOutcome {
        if self.is_placed() {
            return SelectOutcome::AlreadyPlaced;
        }
        if self.slot != ModelSlot::Loaded {
            return SelectOutcome::ModelUnavailable;
        }
        if !reticle.is_visible() {
            return SelectOutcome::NoSurface;
        }

        self.model.position = reticle.position();
        self.model.visible = true;
        self.state = PlacementState::Placed;
        log::info!("Model placed at {:?}", self.model.position);
        SelectOutcome::Placed(self.model.position)
    }

    /// Add yaw to the placed model; ignored before placement
    pub fn rotate(&mut self, radians: f32) -> bool {
        if !self.is_placed() {
            return false;
        }
        self.model.yaw += radians;
        true
    }
}
