//! Initial AR scene: camera, lights, reticle and the (empty) model anchor

use crate::primitives::Color;
use crate::three_d::lighting::ar_lighting;
use crate::three_d::{Camera3D, Material3D, Mesh3D, Node3D, Scene3D};
use arplace_core::AppConfig;

pub const RETICLE_NODE: &str = "reticle";
pub const MODEL_NODE: &str = "engine_model";

/// The bootstrapped scene plus indices of the nodes the app drives
#[derive(Debug, Clone)]
pub struct ArScene {
    pub scene: Scene3D,
    pub reticle: usize,
    pub model: usize,
}

/// Build the scene that exists before any session starts.
///
/// The reticle and the model anchor both start hidden. The reticle's
/// transform is written directly from hit poses every frame.
pub fn bootstrap_scene(config: &AppConfig, aspect_ratio: f32) -> ArScene {
    let mut scene = Scene3D::new("AR Placement".to_string());
    scene.camera = Camera3D::from_config(&config.camera, aspect_ratio);
    for light in ar_lighting() {
        scene.add_light(light);
    }

    let reticle_material =
        scene.add_material(Material3D::new_unlit("Reticle".to_string(), Color::white()));
    let mut ring = Mesh3D::create_ring(
        config.reticle.inner_radius,
        config.reticle.outer_radius,
        config.reticle.segments,
    );
    ring.material_index = Some(reticle_material);
    let ring_mesh = scene.add_mesh(ring);

    let mut reticle = Node3D::new(RETICLE_NODE.to_string());
    reticle.mesh_index = Some(ring_mesh);
    reticle.visible = false;
    let reticle = scene.add_node(reticle);

    let mut model = Node3D::new(MODEL_NODE.to_string());
    model.visible = false;
    let model = scene.add_node(model);

    log::debug!("Scene bootstrapped with {} lights", scene.lights.len());

    ArScene {
        scene,
        reticle,
        model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::three_d::CameraType;

    #[test]
    fn test_bootstrap_defaults() {
        let config = AppConfig::default();
        let ar = bootstrap_scene(&config, 0.5);

        assert_eq!(ar.scene.lights.len(), 2);
        assert!(!ar.scene.nodes[ar.reticle].visible);
        assert!(!ar.scene.nodes[ar.model].visible);
        assert_eq!(ar.scene.node_index(RETICLE_NODE), Some(ar.reticle));
        assert_eq!(ar.scene.node_index(MODEL_NODE), Some(ar.model));
        assert_eq!(ar.scene.camera.aspect_ratio, 0.5);

        match ar.scene.camera.projection {
            CameraType::Perspective { fov, near, far } => {
                assert!((fov - 70f32.to_radians()).abs() < 1e-6);
                assert_eq!(near, 0.01);
                assert_eq!(far, 20.0);
            }
        }
    }
}
