//! Perspective camera
//!
//! While an XR session runs the runtime supplies per-view matrices; this
//! camera covers the inline view and keeps the aspect ratio in sync with the
//! window.

use arplace_core::config::CameraConfig;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Camera projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CameraType {
    /// Perspective projection (3D depth)
    Perspective {
        /// Vertical field of view in radians
        fov: f32,
        /// Near clipping plane
        near: f32,
        /// Far clipping plane
        far: f32,
    },
}

/// 3D camera for viewing the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera3D {
    /// Camera position in world space
    pub position: Vec3,
    /// Target position the camera is looking at
    pub target: Vec3,
    /// Up vector (usually Y-axis)
    pub up: Vec3,
    /// Type of projection
    pub projection: CameraType,
    /// Aspect ratio (width / height)
    pub aspect_ratio: f32,
}

impl Camera3D {
    /// Create a new perspective camera
    pub fn new_perspective(position: Vec3, target: Vec3, fov: f32, aspect_ratio: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            projection: CameraType::Perspective {
                fov,
                near: 0.1,
                far: 1000.0,
            },
            aspect_ratio,
        }
    }

    /// Camera at the origin looking down -Z, as the XR viewer starts out
    pub fn from_config(config: &CameraConfig, aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            projection: CameraType::Perspective {
                fov: config.fov_degrees.to_radians(),
                near: config.near,
                far: config.far,
            },
            aspect_ratio,
        }
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            CameraType::Perspective { fov, near, far } => {
                Mat4::perspective_rh(fov, self.aspect_ratio, near, far)
            }
        }
    }

    /// Update aspect ratio (e.g., when window resizes)
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}
