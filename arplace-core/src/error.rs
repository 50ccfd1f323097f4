//! Error types for arplace

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Immersive AR is not supported on this device")]
    Unsupported,

    #[error("AR session could not be started: {0}")]
    SessionStart(String),

    #[error("An AR session is already active or being requested")]
    SessionBusy,

    #[error("Hit-test source request failed: {0}")]
    HitTestSource(String),

    #[error("Model could not be loaded: {0}")]
    AssetLoad(String),

    #[error("Invalid pose matrix: expected 16 finite values, got {0}")]
    InvalidPose(usize),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
