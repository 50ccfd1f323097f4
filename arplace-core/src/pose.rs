//! Rigid poses reported by the XR runtime

use crate::error::{Error, Result};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// A pose in the session's reference space.
///
/// WebXR hands transforms over as 16 floats in column-major order, which is
/// also glam's layout, so the matrix is stored as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    matrix: Mat4,
}

impl Pose {
    /// Build a pose from a column-major matrix slice.
    ///
    /// The slice must hold exactly 16 finite values.
    pub fn from_column_major(values: &[f32]) -> Result<Self> {
        if values.len() != 16 || values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidPose(values.len()));
        }
        Ok(Self {
            matrix: Mat4::from_cols_slice(values),
        })
    }

    /// Pose with only a translation component
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            matrix: Mat4::from_translation(position),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Position component of the pose
    pub fn translation(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }
}

impl From<Pose> for Mat4 {
    fn from(pose: Pose) -> Self {
        pose.matrix
    }
}
