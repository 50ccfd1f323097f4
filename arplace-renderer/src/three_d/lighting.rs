//! Lighting for the AR scene

use crate::primitives::Color;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Types of lights supported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LightType {
    /// Hemisphere light - sky color from above, ground color from below
    Hemisphere {
        sky_color: Color,
        ground_color: Color,
        intensity: f32,
    },
    /// Directional light - parallel rays (like the sun)
    Directional {
        /// Direction the light is pointing
        direction: Vec3,
        /// Light color
        color: Color,
        /// Intensity
        intensity: f32,
    },
}

/// A light source in the 3D scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Light {
    /// Unique identifier
    pub id: String,
    /// Type of light
    pub light_type: LightType,
    /// Whether the light is enabled
    pub enabled: bool,
}

impl Light {
    pub fn new_hemisphere(id: String, sky_color: Color, ground_color: Color, intensity: f32) -> Self {
        Self {
            id,
            light_type: LightType::Hemisphere {
                sky_color,
                ground_color,
                intensity,
            },
            enabled: true,
        }
    }

    /// Create a new directional light (sun-like)
    pub fn new_directional(id: String, direction: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            id,
            light_type: LightType::Directional {
                direction: direction.normalize(),
                color,
                intensity,
            },
            enabled: true,
        }
    }
}

/// Lighting used for placed models: soft sky fill plus a key light from
/// above and in front of the viewer.
pub fn ar_lighting() -> Vec<Light> {
    vec![
        Light::new_hemisphere(
            "sky".to_string(),
            Color::white(),
            Color::from_rgb_u32(0xbbbbff),
            1.0,
        ),
        Light::new_directional(
            "key".to_string(),
            Vec3::new(-0.5, -1.0, -0.25),
            Color::white(),
            1.0,
        ),
    ]
}
