//! Core types for arplace
//!
//! This crate provides the building blocks shared by the placement
//! state machine and the browser binding:
//! - Error types
//! - Application configuration
//! - Pose representation for AR hit results
//! - Session-scoped cancellation tokens

pub mod cancel;
pub mod config;
pub mod error;
pub mod pose;

pub use cancel::CancellationToken;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use pose::Pose;
