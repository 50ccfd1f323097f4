//! Fetching the model asset

use crate::asset_loader::decode_model;
use crate::three_d::Scene3D;
use crate::web::dom::{js_error, window};
use arplace_core::{Error, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

async fn fetch_bytes(url: &str) -> std::result::Result<Vec<u8>, JsValue> {
    let response: Response = JsFuture::from(window()?.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "HTTP {} for {}",
            response.status(),
            url
        )));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Fetch and decode the binary glTF at `url`
pub async fn fetch_model(url: &str) -> Result<Scene3D> {
    log::info!("Fetching model {}", url);
    let bytes = fetch_bytes(url)
        .await
        .map_err(|e| Error::AssetLoad(js_error(&e)))?;
    decode_model(url, &bytes)
}
