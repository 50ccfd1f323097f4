//! Interaction state for one page: session, hit testing, placement, gestures

use crate::ar::gesture::{GestureController, TouchPoint};
use crate::ar::hit_test::{HitTestFrame, HitTester, SourceTicket};
use crate::ar::placement::{Placement, SelectOutcome};
use crate::ar::reticle::Reticle;
use crate::ar::session::{ActiveSession, SessionManager, SessionRequest};
use arplace_core::{AppConfig, Error, Result};

/// What a frame changed
#[derive(Debug, Clone)]
pub struct FrameUpdate {
    /// Set on the first frame of a session: start the source request chain
    pub source_request: Option<SourceTicket>,
    pub reticle_visible: bool,
}

/// All mutable interaction state, owned by whoever drives the frame loop.
///
/// `S` is the platform's hit-test source handle.
pub struct InteractionState<S> {
    session: SessionManager,
    hit_tester: HitTester<S>,
    reticle: Reticle,
    placement: Placement,
    gestures: GestureController,
}

impl<S> InteractionState<S> {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            session: SessionManager::new(config.session.clone()),
            hit_tester: HitTester::new(),
            reticle: Reticle::new(),
            placement: Placement::new(config.model.scale),
            gestures: GestureController::new(config.interaction.rotation_sensitivity),
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn hit_tester(&self) -> &HitTester<S> {
        &self.hit_tester
    }

    pub fn reticle(&self) -> &Reticle {
        &self.reticle
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn request_session(&mut self, supported: bool) -> Result<SessionRequest> {
        self.session.request(supported)
    }

    pub fn session_started(&mut self, granted_features: &[String]) -> Result<ActiveSession> {
        let session = self.session.on_started(granted_features)?;
        self.hit_tester.reset();
        self.reticle.hide();
        Ok(session)
    }

    pub fn session_failed(&mut self, reason: impl Into<String>) -> Error {
        self.session.on_start_failed(reason)
    }

    pub fn session_ended(&mut self) {
        if self.session.on_ended().is_some() {
            self.hit_tester.reset();
            self.reticle.hide();
        }
    }

    /// Per-frame update. Outside an active session this is a no-op.
    pub fn frame<F>(&mut self, frame: &F) -> FrameUpdate
    where
        F: HitTestFrame<Source = S>,
    {
        let source_request = match self.session.active() {
            Some(session) => self.hit_tester.poll(session),
            None => {
                return FrameUpdate {
                    source_request: None,
                    reticle_visible: self.reticle.is_visible(),
                }
            }
        };

        if let Some(source) = self.hit_tester.source() {
            let results = frame.hit_test_results(source);
            self.reticle.update(&results);
        }

        FrameUpdate {
            source_request,
            reticle_visible: self.reticle.is_visible(),
        }
    }

    /// Returns `false` when the completion was stale and dropped
    pub fn hit_test_source_resolved(&mut self, ticket: &SourceTicket, result: Result<S>) -> bool {
        self.hit_tester.resolve(ticket, result)
    }

    pub fn model_loaded(&mut self, loaded: bool) {
        self.placement.set_model_loaded(loaded);
    }

    pub fn select(&mut self) -> SelectOutcome {
        let outcome = self.placement.select(&self.reticle);
        if !matches!(outcome, SelectOutcome::Placed(_)) {
            log::debug!("Select ignored: {:?}", outcome);
        }
        outcome
    }

    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        self.gestures.touch_start(touches);
    }

    /// Returns the yaw applied to the model in radians
    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> f32 {
        let radians = self.gestures.touch_move(touches, self.placement.is_placed());
        if radians != 0.0 && self.placement.rotate(radians) {
            radians
        } else {
            0.0
        }
    }

    pub fn touch_end(&mut self, remaining: &[TouchPoint]) {
        self.gestures.touch_end(remaining);
    }
}
