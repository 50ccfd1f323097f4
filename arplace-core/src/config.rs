//! Application configuration
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! is enough to start the app.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model asset settings
    pub model: ModelConfig,
    /// Gesture settings
    pub interaction: InteractionConfig,
    /// WebXR session request settings
    pub session: SessionConfig,
    /// Camera projection settings
    pub camera: CameraConfig,
    /// Reticle geometry
    pub reticle: ReticleConfig,
    /// DOM overlay ids and messages
    pub overlay: OverlayConfig,
}

impl AppConfig {
    /// Parse a configuration from JSON; missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        log::debug!("Configuration loaded (model '{}')", config.model.url);
        Ok(config)
    }
}

/// The model to place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Relative URL (browser) or path (native) of the binary glTF file
    pub url: String,
    /// Uniform scale applied once the model is loaded
    pub scale: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            url: "engine.glb".to_string(),
            scale: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Radians of yaw per pixel of horizontal drag
    pub rotation_sensitivity: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            rotation_sensitivity: 0.01,
        }
    }
}

/// Features requested from the XR runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Features the session cannot start without
    pub required_features: Vec<String>,
    /// Features used when granted
    pub optional_features: Vec<String>,
    /// Use a floor-anchored reference space when the runtime grants one
    pub prefer_floor_reference: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            required_features: vec!["hit-test".to_string()],
            optional_features: vec!["local-floor".to_string(), "dom-overlay".to_string()],
            prefer_floor_reference: true,
        }
    }
}

impl SessionConfig {
    /// Whether the DOM overlay feature is requested at all
    pub fn wants_dom_overlay(&self) -> bool {
        self.required_features
            .iter()
            .chain(self.optional_features.iter())
            .any(|f| f == "dom-overlay")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 70.0,
            near: 0.01,
            far: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReticleConfig {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub segments: u32,
}

impl Default for ReticleConfig {
    fn default() -> Self {
        Self {
            inner_radius: 0.15,
            outer_radius: 0.2,
            segments: 32,
        }
    }
}

/// Overlay element ids and the static copy shown at each checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Element passed to the XR runtime as the DOM overlay root
    pub root_element_id: String,
    /// Element whose text is updated at checkpoints
    pub text_element_id: String,
    /// Button that starts the AR session
    pub button_element_id: String,
    pub unsupported_message: String,
    pub session_failed_message: String,
    pub load_failed_message: String,
    pub placed_message: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            root_element_id: "overlay".to_string(),
            text_element_id: "info".to_string(),
            button_element_id: "ar-button".to_string(),
            unsupported_message: "WebXR AR is not supported in this browser.".to_string(),
            session_failed_message: "Failed to start the AR session.".to_string(),
            load_failed_message: "Failed to load the 3D model.".to_string(),
            placed_message: "Drag with one finger to rotate the model.".to_string(),
        }
    }
}
