//! Model asset loading
//!
//! Decoding is shared; only the byte source differs between the browser
//! (`fetch`, see `web::fetch`) and native builds (the filesystem).

use crate::three_d::gltf_loader;
use crate::three_d::Scene3D;
use arplace_core::{Error, Result};

/// Decode a binary glTF model
pub fn decode_model(name: &str, bytes: &[u8]) -> Result<Scene3D> {
    gltf_loader::load_glb(name, bytes).map_err(|e| Error::AssetLoad(format!("{:#}", e)))
}

/// Load a model from disk
#[cfg(not(target_arch = "wasm32"))]
pub fn load_model_file<P: AsRef<std::path::Path>>(path: P) -> Result<Scene3D> {
    let path = path.as_ref();
    log::info!("Loading model from {}", path.display());
    gltf_loader::load_gltf(path).map_err(|e| Error::AssetLoad(format!("{:#}", e)))
}

/// Attach a decoded model under `anchor` and hide it until placement
pub fn install_model(scene: &mut Scene3D, anchor: usize, model: Scene3D) -> Result<()> {
    let name = model.name.clone();
    scene
        .attach_scene(anchor, model)
        .ok_or_else(|| Error::AssetLoad(format!("no anchor node {} for model '{}'", anchor, name)))?;
    if let Some(node) = scene.node_mut(anchor) {
        node.visible = false;
    }
    log::info!("Model '{}' loaded", name);
    Ok(())
}
