//! Hit-test source acquisition

use crate::ar::session::{ActiveSession, SessionId};
use arplace_core::{CancellationToken, Pose, Result};

/// One hit-test result for the current frame.
///
/// `pose` is `None` when the runtime could not express the hit in the
/// session's reference space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestResult {
    pub pose: Option<Pose>,
}

impl HitTestResult {
    pub fn new(pose: Pose) -> Self {
        Self { pose: Some(pose) }
    }

    pub fn without_pose() -> Self {
        Self { pose: None }
    }
}

/// Per-frame access to hit-test results for a given source
pub trait HitTestFrame {
    type Source;

    /// Results for `source` in this frame, nearest first
    fn hit_test_results(&self, source: &Self::Source) -> Vec<HitTestResult>;
}

/// Handle for an outstanding hit-test source request.
///
/// The binding carries it through the async chain and hands it back with
/// the outcome.
#[derive(Debug, Clone)]
pub struct SourceTicket {
    session: SessionId,
    token: CancellationToken,
}

impl SourceTicket {
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// The session this ticket belongs to has ended
    pub fn is_stale(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Source acquisition state; requested at most once per session
#[derive(Debug)]
pub enum HitTestSourceState<S> {
    NotRequested,
    Requested(SourceTicket),
    Ready(S),
}

/// Tracks the hit-test source of the current session
pub struct HitTester<S> {
    state: HitTestSourceState<S>,
}

impl<S> HitTester<S> {
    pub fn new() -> Self {
        Self {
            state: HitTestSourceState::NotRequested,
        }
    }

    pub fn state(&self) -> &HitTestSourceState<S> {
        &self.state
    }

    pub fn source(&self) -> Option<&S> {
        match &self.state {
            HitTestSourceState::Ready(source) => Some(source),
            _ => None,
        }
    }

    /// Called every frame. Returns a ticket the first time only; the
    /// request is marked in flight before the caller starts any async work.
    pub fn poll(&mut self, session: &ActiveSession) -> Option<SourceTicket> {
        if !matches!(self.state, HitTestSourceState::NotRequested) {
            return None;
        }

        let ticket = SourceTicket {
            session: session.id,
            token: session.token.clone(),
        };
        self.state = HitTestSourceState::Requested(ticket.clone());
        log::debug!("Hit-test source requested for session {}", session.id.get());
        Some(ticket)
    }

    /// Deliver the outcome of a source request.
    ///
    /// Returns `false` when the completion is stale (its session ended or a
    /// newer request superseded it) and was dropped. A failed request is
    /// logged and leaves the state `Requested`, so no second request is made
    /// for this session.
    pub fn resolve(&mut self, ticket: &SourceTicket, result: Result<S>) -> bool {
        if ticket.is_stale() {
            log::debug!(
                "Dropping hit-test source for ended session {}",
                ticket.session.get()
            );
            return false;
        }

        match &self.state {
            HitTestSourceState::Requested(pending) if pending.session == ticket.session => {}
            _ => return false,
        }

        match result {
            Ok(source) => {
                self.state = HitTestSourceState::Ready(source);
                log::info!("Hit-test source ready");
            }
            Err(e) => log::error!("{}", e),
        }
        true
    }

    /// Forget any source; the next session requests a fresh one
    pub fn reset(&mut self) {
        self.state = HitTestSourceState::NotRequested;
    }
}

impl<S> Default for HitTester<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ar::session::SessionManager;
    use arplace_core::config::SessionConfig;
    use arplace_core::Error;

    fn active_session(sessions: &mut SessionManager) -> ActiveSession {
        sessions.request(true).unwrap();
        sessions.on_started(&[]).unwrap()
    }

    #[test]
    fn test_requested_once() {
        let mut sessions = SessionManager::new(SessionConfig::default());
        let session = active_session(&mut sessions);
        let mut tester: HitTester<u32> = HitTester::new();

        assert!(tester.poll(&session).is_some());
        for _ in 0..100 {
            assert!(tester.poll(&session).is_none());
        }
        assert!(matches!(tester.state(), HitTestSourceState::Requested(_)));
    }

    #[test]
    fn test_resolve_makes_source_ready() {
        let mut sessions = SessionManager::new(SessionConfig::default());
        let session = active_session(&mut sessions);
        let mut tester = HitTester::new();

        let ticket = tester.poll(&session).unwrap();
        assert!(tester.resolve(&ticket, Ok(7u32)));
        assert_eq!(tester.source(), Some(&7));
        assert!(tester.poll(&session).is_none());
    }

    #[test]
    fn test_failure_is_not_retried() {
        let mut sessions = SessionManager::new(SessionConfig::default());
        let session = active_session(&mut sessions);
        let mut tester: HitTester<u32> = HitTester::new();

        let ticket = tester.poll(&session).unwrap();
        assert!(tester.resolve(&ticket, Err(Error::HitTestSource("denied".into()))));
        assert!(tester.source().is_none());
        assert!(tester.poll(&session).is_none());
    }

    #[test]
    fn test_stale_completion_is_inert() {
        let mut sessions = SessionManager::new(SessionConfig::default());
        let first = active_session(&mut sessions);
        let mut tester = HitTester::new();
        let old_ticket = tester.poll(&first).unwrap();

        sessions.on_ended();
        tester.reset();
        let second = active_session(&mut sessions);
        let new_ticket = tester.poll(&second).unwrap();

        assert!(!tester.resolve(&old_ticket, Ok(1u32)));
        assert!(tester.source().is_none());

        assert!(tester.resolve(&new_ticket, Ok(2u32)));
        assert_eq!(tester.source(), Some(&2));
    }
}
