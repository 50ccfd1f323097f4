//! AR session lifecycle

use arplace_core::config::SessionConfig;
use arplace_core::{CancellationToken, Error, Result};

/// Session mode requested from the XR runtime
pub const IMMERSIVE_AR: &str = "immersive-ar";

/// AR session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session requested yet
    Idle,
    /// Waiting for the runtime to grant the session
    Requesting,
    /// Session active
    Active,
    /// Session ended; a new one may be requested
    Ended,
    /// The device or browser cannot run immersive AR
    Unsupported,
    /// The runtime rejected the session request
    Failed,
}

/// Reference space the session reports poses in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSpaceType {
    Viewer,
    Local,
    LocalFloor,
}

impl ReferenceSpaceType {
    /// WebXR name of the reference space
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceSpaceType::Viewer => "viewer",
            ReferenceSpaceType::Local => "local",
            ReferenceSpaceType::LocalFloor => "local-floor",
        }
    }
}

/// Identifies one session within the page's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// What the binding should ask the XR runtime for
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRequest {
    pub mode: &'static str,
    pub required_features: Vec<String>,
    pub optional_features: Vec<String>,
    /// Pass the overlay root element as the DOM overlay
    pub dom_overlay: bool,
}

/// A granted session
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub id: SessionId,
    pub reference_space: ReferenceSpaceType,
    /// Cancelled when the session ends
    pub token: CancellationToken,
}

/// Session manager
pub struct SessionManager {
    state: SessionState,
    config: SessionConfig,
    active: Option<ActiveSession>,
    next_id: u64,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: SessionState::Idle,
            config,
            active: None,
            next_id: 1,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    /// Begin a session request.
    ///
    /// `supported` is the runtime's answer to the immersive-ar support
    /// query. A negative answer is final.
    pub fn request(&mut self, supported: bool) -> Result<SessionRequest> {
        match self.state {
            SessionState::Requesting | SessionState::Active => return Err(Error::SessionBusy),
            SessionState::Unsupported => return Err(Error::Unsupported),
            SessionState::Failed => {
                return Err(Error::SessionStart("a previous start attempt failed".to_string()))
            }
            SessionState::Idle | SessionState::Ended => {}
        }

        if !supported {
            log::warn!("Immersive AR is not supported");
            self.state = SessionState::Unsupported;
            return Err(Error::Unsupported);
        }

        self.state = SessionState::Requesting;
        log::info!("Requesting {} session", IMMERSIVE_AR);

        Ok(SessionRequest {
            mode: IMMERSIVE_AR,
            required_features: self.config.required_features.clone(),
            optional_features: self.config.optional_features.clone(),
            dom_overlay: self.config.wants_dom_overlay(),
        })
    }

    /// The runtime granted the session.
    ///
    /// `granted_features` lists the features the session actually enabled;
    /// it decides between a floor-anchored and a plain local reference space.
    pub fn on_started(&mut self, granted_features: &[String]) -> Result<ActiveSession> {
        if self.state != SessionState::Requesting {
            return Err(Error::SessionStart(format!(
                "session granted while {:?}",
                self.state
            )));
        }

        let floor_granted = granted_features.iter().any(|f| f == "local-floor");
        let reference_space = if self.config.prefer_floor_reference && floor_granted {
            ReferenceSpaceType::LocalFloor
        } else {
            ReferenceSpaceType::Local
        };

        let session = ActiveSession {
            id: SessionId(self.next_id),
            reference_space,
            token: CancellationToken::new(),
        };
        self.next_id += 1;
        self.active = Some(session.clone());
        self.state = SessionState::Active;

        log::info!(
            "AR session {} started ({} reference space)",
            session.id.get(),
            reference_space.as_str()
        );
        Ok(session)
    }

    /// The runtime rejected the request
    pub fn on_start_failed(&mut self, reason: impl Into<String>) -> Error {
        self.state = SessionState::Failed;
        Error::SessionStart(reason.into())
    }

    /// The session ended. Async work started for it becomes inert.
    pub fn on_ended(&mut self) -> Option<SessionId> {
        let ended = self.active.take()?;
        ended.token.cancel();
        self.state = SessionState::Ended;
        log::info!("AR session {} ended", ended.id.get());
        Some(ended.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(SessionConfig::default())
    }

    #[test]
    fn test_request_carries_features() {
        let mut sessions = manager();
        let request = sessions.request(true).unwrap();

        assert_eq!(request.mode, "immersive-ar");
        assert_eq!(request.required_features, vec!["hit-test"]);
        assert_eq!(request.optional_features, vec!["local-floor", "dom-overlay"]);
        assert!(request.dom_overlay);
        assert_eq!(sessions.state(), SessionState::Requesting);
    }

    #[test]
    fn test_unsupported_is_final() {
        let mut sessions = manager();
        assert!(matches!(sessions.request(false), Err(Error::Unsupported)));
        assert_eq!(sessions.state(), SessionState::Unsupported);
        assert!(matches!(sessions.request(true), Err(Error::Unsupported)));
    }

    #[test]
    fn test_double_request_is_busy() {
        let mut sessions = manager();
        sessions.request(true).unwrap();
        assert!(matches!(sessions.request(true), Err(Error::SessionBusy)));

        sessions.on_started(&[]).unwrap();
        assert!(matches!(sessions.request(true), Err(Error::SessionBusy)));
    }

    #[test]
    fn test_reference_space_selection() {
        let mut sessions = manager();
        sessions.request(true).unwrap();
        let session = sessions.on_started(&["hit-test".to_string()]).unwrap();
        assert_eq!(session.reference_space, ReferenceSpaceType::Local);
        sessions.on_ended();

        sessions.request(true).unwrap();
        let session = sessions
            .on_started(&["hit-test".to_string(), "local-floor".to_string()])
            .unwrap();
        assert_eq!(session.reference_space, ReferenceSpaceType::LocalFloor);
    }

    #[test]
    fn test_floor_not_preferred() {
        let mut sessions = SessionManager::new(SessionConfig {
            prefer_floor_reference: false,
            ..SessionConfig::default()
        });
        sessions.request(true).unwrap();
        let session = sessions.on_started(&["local-floor".to_string()]).unwrap();
        assert_eq!(session.reference_space, ReferenceSpaceType::Local);
    }

    #[test]
    fn test_start_without_request_fails() {
        let mut sessions = manager();
        assert!(matches!(sessions.on_started(&[]), Err(Error::SessionStart(_))));
    }

    #[test]
    fn test_start_failure_is_terminal() {
        let mut sessions = manager();
        sessions.request(true).unwrap();
        let err = sessions.on_start_failed("NotAllowedError");
        assert!(matches!(err, Error::SessionStart(_)));
        assert_eq!(sessions.state(), SessionState::Failed);
        assert!(sessions.request(true).is_err());
    }

    #[test]
    fn test_end_cancels_token_and_allows_new_session() {
        let mut sessions = manager();
        sessions.request(true).unwrap();
        let first = sessions.on_started(&[]).unwrap();

        assert_eq!(sessions.on_ended(), Some(first.id));
        assert!(first.token.is_cancelled());
        assert_eq!(sessions.state(), SessionState::Ended);
        assert!(sessions.active().is_none());
        assert_eq!(sessions.on_ended(), None);

        sessions.request(true).unwrap();
        let second = sessions.on_started(&[]).unwrap();
        assert_ne!(first.id, second.id);
        assert!(!second.token.is_cancelled());
    }
}
