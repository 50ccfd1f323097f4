//! Window resize handling

use crate::three_d::Camera3D;

/// Window size in CSS pixels plus the device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// `None` for a zero-height window
    pub fn aspect_ratio(&self) -> Option<f32> {
        (self.height > 0).then(|| self.width as f32 / self.height as f32)
    }

    /// Drawing buffer size in device pixels
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio.max(1.0);
        (
            (self.width as f32 * ratio).round() as u32,
            (self.height as f32 * ratio).round() as u32,
        )
    }
}

/// Something that can be resized to fill the window (the canvas)
pub trait RenderSurface {
    fn set_size(&mut self, viewport: &Viewport);
}

/// Fit the camera and surface to `viewport`.
///
/// Safe to call repeatedly with the same viewport.
pub fn fit_to_viewport(camera: &mut Camera3D, surface: Option<&mut dyn RenderSurface>, viewport: Viewport) {
    match viewport.aspect_ratio() {
        Some(aspect) => camera.set_aspect_ratio(aspect),
        None => log::debug!("Ignoring zero-height viewport"),
    }
    if let Some(surface) = surface {
        surface.set_size(&viewport);
    }
}
