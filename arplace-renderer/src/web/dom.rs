//! DOM plumbing: overlay text, canvas sizing, touch and resize listeners

use crate::ar::TouchPoint;
use crate::overlay::Overlay;
use crate::viewport::{RenderSurface, Viewport};
use arplace_core::AppConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, TouchEvent, TouchList, Window};

/// Inline JSON configuration, if the page provides one
pub const CONFIG_ELEMENT_ID: &str = "arplace-config";

/// Get the window object
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// Render a JS error value for logs and error messages
pub fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Read the inline configuration, falling back to defaults
pub fn load_config(document: &Document) -> AppConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return AppConfig::default();
    };

    match AppConfig::from_json_str(&json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring inline configuration: {}", e);
            AppConfig::default()
        }
    }
}

/// Current window size and pixel ratio
pub fn current_viewport(window: &Window) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    Viewport::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
        window.device_pixel_ratio() as f32,
    )
}

/// Overlay backed by a DOM element's text content
pub struct DomOverlay {
    element: Option<Element>,
}

impl DomOverlay {
    pub fn new(document: &Document, element_id: &str) -> Self {
        let element = document.get_element_by_id(element_id);
        if element.is_none() {
            log::warn!("Overlay text element '{}' not found", element_id);
        }
        Self { element }
    }
}

impl Overlay for DomOverlay {
    fn set_text(&mut self, text: &str) {
        match &self.element {
            Some(element) => element.set_text_content(Some(text)),
            None => log::info!("overlay: {}", text),
        }
    }
}

/// The page canvas, filling the window
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    /// Create a canvas and attach it to the document body
    pub fn create(document: &Document) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&canvas)?;
        Ok(Self { canvas })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl RenderSurface for CanvasSurface {
    fn set_size(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.drawing_buffer_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let style = self.canvas.style();
        let sized = style
            .set_property("width", &format!("{}px", viewport.width))
            .and_then(|_| style.set_property("height", &format!("{}px", viewport.height)));
        if let Err(e) = sized {
            log::warn!("Could not size canvas: {}", js_error(&e));
        }
    }
}

/// Collect a touch list into plain touch points
pub fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|touch| {
            TouchPoint::new(
                touch.identifier(),
                touch.client_x() as f32,
                touch.client_y() as f32,
            )
        })
        .collect()
}

/// Register a touch listener that receives the event's current touches
pub fn on_touch<F>(target: &Element, event_name: &str, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(Vec<TouchPoint>) + 'static,
{
    let closure = Closure::wrap(Box::new(move |event: TouchEvent| {
        handler(touch_points(&event.touches()));
    }) as Box<dyn FnMut(_)>);

    target.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Register a window resize listener
pub fn on_resize<F>(window: &Window, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(Viewport) + 'static,
{
    let resize_window = window.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        handler(current_viewport(&resize_window));
    }) as Box<dyn FnMut(_)>);

    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
