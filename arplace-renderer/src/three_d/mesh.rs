//! 3D mesh representation

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A 3D vertex with position, normal, and texture coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex3D {
    /// Position in 3D space
    pub position: Vec3,
    /// Surface normal
    pub normal: Vec3,
    /// Texture coordinates
    pub tex_coords: Vec2,
    /// Vertex color (optional)
    pub color: Option<[f32; 4]>,
}

impl Vertex3D {
    /// Create a new vertex
    pub fn new(position: Vec3, normal: Vec3, tex_coords: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coords,
            color: None,
        }
    }

    /// Create a vertex with color
    pub fn with_color(position: Vec3, normal: Vec3, tex_coords: Vec2, color: [f32; 4]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
            color: Some(color),
        }
    }
}

/// A 3D mesh containing vertices and indices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh3D {
    /// Mesh name
    pub name: String,
    /// Vertex data
    pub vertices: Vec<Vertex3D>,
    /// Index data (triangles)
    pub indices: Vec<u32>,
    /// Material index
    pub material_index: Option<usize>,
}

impl Mesh3D {
    /// Create a new mesh
    pub fn new(name: String) -> Self {
        Self {
            name,
            vertices: Vec::new(),
            indices: Vec::new(),
            material_index: None,
        }
    }

    /// Create a flat ring lying in the XZ plane, facing +Y.
    ///
    /// Used for the placement reticle: a hit pose's Y axis is the surface
    /// normal, so the ring sits flush on the detected surface.
    pub fn create_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let mut vertices = Vec::with_capacity(((segments + 1) * 2) as usize);
        let mut indices = Vec::with_capacity((segments * 6) as usize);

        for segment in 0..=segments {
            let t = segment as f32 / segments as f32;
            let theta = 2.0 * std::f32::consts::PI * t;
            let (sin, cos) = theta.sin_cos();

            vertices.push(Vertex3D::new(
                Vec3::new(cos * inner_radius, 0.0, sin * inner_radius),
                Vec3::Y,
                Vec2::new(t, 0.0),
            ));
            vertices.push(Vertex3D::new(
                Vec3::new(cos * outer_radius, 0.0, sin * outer_radius),
                Vec3::Y,
                Vec2::new(t, 1.0),
            ));
        }

        for segment in 0..segments {
            let inner = segment * 2;
            let outer = inner + 1;
            let next_inner = inner + 2;
            let next_outer = inner + 3;

            // Counter-clockwise when seen from +Y
            indices.extend_from_slice(&[inner, next_inner, outer]);
            indices.extend_from_slice(&[outer, next_inner, next_outer]);
        }

        Self {
            name: "Reticle".to_string(),
            vertices,
            indices,
            material_index: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_geometry() {
        let ring = Mesh3D::create_ring(0.15, 0.2, 32);
        assert_eq!(ring.vertices.len(), 66);
        assert_eq!(ring.indices.len(), 32 * 6);
        assert!(ring.indices.iter().all(|&i| (i as usize) < ring.vertices.len()));

        assert!(ring.vertices.iter().all(|v| v.position.y == 0.0));
        let max_x = ring.vertices.iter().map(|v| v.position.x).fold(f32::MIN, f32::max);
        assert!((max_x - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_ring_radii() {
        let ring = Mesh3D::create_ring(0.15, 0.2, 16);
        for (i, vertex) in ring.vertices.iter().enumerate() {
            let radius = vertex.position.length();
            let expected = if i % 2 == 0 { 0.15 } else { 0.2 };
            assert!((radius - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_ring_clamps_segments() {
        let ring = Mesh3D::create_ring(0.1, 0.2, 1);
        assert_eq!(ring.indices.len(), 3 * 6);
    }
}
