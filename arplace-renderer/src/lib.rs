//! arplace renderer - place a 3D model on a real-world surface with WebXR
//!
//! This crate owns the scene description and the interaction state machine
//! (session lifecycle, hit testing, placement, drag rotation). The `web`
//! module binds it to the browser's WebXR and DOM APIs; drawing the scene is
//! left to the host page.

pub mod app;
pub mod ar;
pub mod asset_loader;
pub mod overlay;
pub mod primitives;
pub mod three_d;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::ArApp;
pub use ar::{InteractionState, SelectOutcome, TouchPoint};
pub use overlay::{LogOverlay, Overlay, OverlayMessage};
pub use primitives::Color;
pub use three_d::{Camera3D, Light, Material3D, Mesh3D, Scene3D};
pub use viewport::{RenderSurface, Viewport};

/// Initialize logging for WebAssembly targets
#[cfg(target_arch = "wasm32")]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    // A second call (e.g. a page re-running the entry point) is harmless
    console_log::init_with_level(log::Level::Info).ok();
}

/// Initialize logging for native builds; honours `RUST_LOG`
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(cfg!(test))
        .try_init()
        .ok();
}
