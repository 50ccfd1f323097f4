//! 3D scene description for the AR view
//!
//! This module provides model loading, the camera, lighting and the scene
//! graph that the placement logic drives. Drawing is left to the host.

pub mod bootstrap;
pub mod camera;
pub mod gltf_loader;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod scene3d;

pub use bootstrap::{bootstrap_scene, ArScene};
pub use camera::{Camera3D, CameraType};
pub use lighting::{Light, LightType};
pub use material::{Material3D, MaterialType};
pub use mesh::{Mesh3D, Vertex3D};
pub use scene3d::{Node3D, Scene3D};
