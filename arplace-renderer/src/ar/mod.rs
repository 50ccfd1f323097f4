//! AR placement for WebXR
//!
//! This module holds the interaction state machine: session lifecycle,
//! hit-test source acquisition, the surface reticle, one-shot placement
//! and drag rotation. Nothing in here touches the browser; the `web`
//! module feeds it events.

pub mod gesture;
pub mod hit_test;
pub mod interaction;
pub mod placement;
pub mod reticle;
pub mod session;

pub use gesture::{GestureController, TouchPoint};
pub use hit_test::{HitTestFrame, HitTestResult, HitTestSourceState, HitTester, SourceTicket};
pub use interaction::{FrameUpdate, InteractionState};
pub use placement::{EngineModel, ModelSlot, Placement, PlacementState, SelectOutcome};
pub use reticle::Reticle;
pub use session::{
    ActiveSession, ReferenceSpaceType, SessionId, SessionManager, SessionRequest, SessionState,
};
