//! Material system for 3D objects

use crate::primitives::Color;
use serde::{Deserialize, Serialize};

/// Types of materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaterialType {
    /// Basic unlit material
    Unlit {
        /// Base color
        color: Color,
    },
    /// Physically-based rendering material
    PBR {
        /// Base color
        base_color: Color,
        /// Metallic factor (0.0 = dielectric, 1.0 = metal)
        metallic: f32,
        /// Roughness factor (0.0 = smooth, 1.0 = rough)
        roughness: f32,
        /// Emissive color (for glowing materials)
        emissive: Color,
    },
}

/// A material defines how a surface looks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material3D {
    /// Material name
    pub name: String,
    /// Material type
    pub material_type: MaterialType,
    /// Opacity (1.0 = opaque)
    pub opacity: f32,
    /// Double-sided rendering
    pub double_sided: bool,
}

impl Material3D {
    /// Create a new unlit material
    pub fn new_unlit(name: String, color: Color) -> Self {
        Self {
            name,
            material_type: MaterialType::Unlit { color },
            opacity: 1.0,
            double_sided: false,
        }
    }

    /// Create a new PBR material
    pub fn new_pbr(name: String, base_color: Color, metallic: f32, roughness: f32) -> Self {
        Self {
            name,
            material_type: MaterialType::PBR {
                base_color,
                metallic,
                roughness,
                emissive: Color::black(),
            },
            opacity: 1.0,
            double_sided: false,
        }
    }
}

impl Default for Material3D {
    fn default() -> Self {
        Self::new_pbr(
            "Default".to_string(),
            Color::new(0.8, 0.8, 0.8, 1.0),
            0.0,
            0.5,
        )
    }
}
