//! App driver: applies interaction state to the scene and overlay

use crate::ar::{
    ActiveSession, FrameUpdate, HitTestFrame, InteractionState, SelectOutcome, SessionRequest,
    SourceTicket, TouchPoint,
};
use crate::asset_loader::install_model;
use crate::overlay::{Overlay, OverlayMessage};
use crate::three_d::{bootstrap_scene, ArScene, Scene3D};
use crate::viewport::{fit_to_viewport, RenderSurface, Viewport};
use arplace_core::{AppConfig, Error, Result};

/// Owns the interaction state, the scene and the overlay.
///
/// Every event from the platform goes through here so that the reticle and
/// model nodes always mirror the state machine.
pub struct ArApp<S, O: Overlay> {
    config: AppConfig,
    state: InteractionState<S>,
    ar_scene: ArScene,
    overlay: O,
    viewport: Viewport,
}

impl<S, O: Overlay> ArApp<S, O> {
    pub fn new(config: AppConfig, overlay: O, viewport: Viewport) -> Self {
        let ar_scene = bootstrap_scene(&config, viewport.aspect_ratio().unwrap_or(1.0));
        let state = InteractionState::new(&config);
        Self {
            config,
            state,
            ar_scene,
            overlay,
            viewport,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &InteractionState<S> {
        &self.state
    }

    pub fn scene(&self) -> &Scene3D {
        &self.ar_scene.scene
    }

    pub fn reticle_node(&self) -> usize {
        self.ar_scene.reticle
    }

    pub fn model_node(&self) -> usize {
        self.ar_scene.model
    }

    /// The scene graph as JSON, for the host that draws it.
    ///
    /// Node indices are stable, so after this the host only needs the
    /// per-frame transforms of the reticle and model nodes.
    pub fn scene_json(&self) -> Result<String> {
        serde_json::to_string(&self.ar_scene.scene).map_err(|e| Error::Other(e.into()))
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn show(&mut self, message: OverlayMessage) {
        let text = message.text(&self.config.overlay).to_string();
        self.overlay.set_text(&text);
    }

    /// Start a session request after the platform answered the support
    /// query. Unsupported devices get the static message once.
    pub fn request_session(&mut self, supported: bool) -> Result<SessionRequest> {
        let was_unsupported = self.state.session().state() == crate::ar::SessionState::Unsupported;
        let result = self.state.request_session(supported);
        if let Err(Error::Unsupported) = &result {
            if !was_unsupported {
                self.show(OverlayMessage::Unsupported);
            }
        }
        result
    }

    pub fn on_session_started(&mut self, granted_features: &[String]) -> Result<ActiveSession> {
        let session = self.state.session_started(granted_features)?;
        self.sync_reticle();
        Ok(session)
    }

    pub fn on_session_failed(&mut self, reason: impl Into<String>) -> Error {
        let err = self.state.session_failed(reason);
        log::error!("{}", err);
        self.show(OverlayMessage::SessionFailed);
        err
    }

    /// The session ended. The page owns the drawing buffer again, so the
    /// surface is refit to the last known viewport.
    pub fn on_session_ended(&mut self, surface: &mut dyn RenderSurface) {
        self.state.session_ended();
        self.sync_reticle();
        fit_to_viewport(&mut self.ar_scene.scene.camera, Some(surface), self.viewport);
    }

    pub fn on_frame<F>(&mut self, frame: &F) -> FrameUpdate
    where
        F: HitTestFrame<Source = S>,
    {
        let update = self.state.frame(frame);
        self.sync_reticle();
        update
    }

    pub fn on_hit_test_source(&mut self, ticket: &SourceTicket, result: Result<S>) -> bool {
        self.state.hit_test_source_resolved(ticket, result)
    }

    /// Outcome of the one asset load
    pub fn on_model_loaded(&mut self, result: Result<Scene3D>) {
        let installed = result.and_then(|model| {
            install_model(&mut self.ar_scene.scene, self.ar_scene.model, model)
        });
        match installed {
            Ok(()) => {
                self.state.model_loaded(true);
                self.sync_model();
            }
            Err(e) => {
                log::error!("{}", e);
                self.state.model_loaded(false);
                self.show(OverlayMessage::LoadFailed);
            }
        }
    }

    pub fn on_select(&mut self) -> SelectOutcome {
        let outcome = self.state.select();
        if let SelectOutcome::Placed(_) = outcome {
            self.sync_model();
            self.show(OverlayMessage::Placed);
        }
        outcome
    }

    pub fn on_touch_start(&mut self, touches: &[TouchPoint]) {
        self.state.touch_start(touches);
    }

    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) -> f32 {
        let radians = self.state.touch_move(touches);
        if radians != 0.0 {
            self.sync_model();
        }
        radians
    }

    pub fn on_touch_end(&mut self, remaining: &[TouchPoint]) {
        self.state.touch_end(remaining);
    }

    /// Window resize. While a session is presenting the XR runtime owns the
    /// drawing buffer, so only the camera follows.
    pub fn on_resize(&mut self, viewport: Viewport, surface: &mut dyn RenderSurface) {
        self.viewport = viewport;
        let presenting = self.state.session().active().is_some();
        let surface = if presenting { None } else { Some(surface) };
        fit_to_viewport(&mut self.ar_scene.scene.camera, surface, viewport);
    }

    fn sync_reticle(&mut self) {
        let reticle = self.state.reticle();
        let (visible, transform) = (reticle.is_visible(), reticle.transform());
        if let Some(node) = self.ar_scene.scene.node_mut(self.ar_scene.reticle) {
            node.visible = visible;
            node.transform = transform;
        }
    }

    fn sync_model(&mut self) {
        let model = self.state.placement().model();
        let (visible, transform) = (model.visible, model.transform());
        if let Some(node) = self.ar_scene.scene.node_mut(self.ar_scene.model) {
            node.visible = visible;
            node.transform = transform;
        }
    }
}
