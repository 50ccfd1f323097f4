//! Surface reticle

use crate::ar::hit_test::HitTestResult;
use glam::{Mat4, Vec3};

/// Marks the surface point a tap would place the model on
#[derive(Debug, Clone)]
pub struct Reticle {
    visible: bool,
    transform: Mat4,
}

impl Reticle {
    pub fn new() -> Self {
        Self {
            visible: false,
            transform: Mat4::IDENTITY,
        }
    }

    /// Apply this frame's hit results.
    ///
    /// Only the first (nearest) result counts. Its pose replaces the
    /// transform outright. Without a usable pose the reticle hides and keeps
    /// its previous transform.
    pub fn update(&mut self, results: &[HitTestResult]) -> bool {
        match results.first().and_then(|hit| hit.pose) {
            Some(pose) => {
                self.visible = true;
                self.transform = pose.matrix();
            }
            None => self.visible = false,
        }
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }
}

impl Default for Reticle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arplace_core::Pose;

    #[test]
    fn test_first_result_wins() {
        let mut reticle = Reticle::new();
        let near = Pose::from_translation(Vec3::new(0.0, -1.0, -1.0));
        let far = Pose::from_translation(Vec3::new(0.0, -1.0, -4.0));

        assert!(reticle.update(&[HitTestResult::new(near), HitTestResult::new(far)]));
        assert_eq!(reticle.transform(), near.matrix());
    }

    #[test]
    fn test_no_results_hides_but_keeps_transform() {
        let mut reticle = Reticle::new();
        let pose = Pose::from_translation(Vec3::new(1.0, 0.0, -2.0));
        reticle.update(&[HitTestResult::new(pose)]);

        assert!(!reticle.update(&[]));
        assert!(!reticle.is_visible());
        assert_eq!(reticle.position(), Vec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn test_missing_pose_hides() {
        let mut reticle = Reticle::new();
        let pose = Pose::from_translation(Vec3::new(0.0, 0.0, -1.0));
        let later = Pose::from_translation(Vec3::new(0.0, 0.0, -3.0));

        reticle.update(&[HitTestResult::new(pose)]);
        assert!(!reticle.update(&[HitTestResult::without_pose(), HitTestResult::new(later)]));
        assert_eq!(reticle.transform(), pose.matrix());
    }
}
