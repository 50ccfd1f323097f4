//! WebXR calls: support query, session request, reference spaces, hit-test
//! sources and the per-frame adapter

use crate::ar::{HitTestFrame, HitTestResult, ReferenceSpaceType, SessionRequest};
use crate::web::dom::js_error;
use arplace_core::{Error, Pose, Result};
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Element, Navigator, XrFrame, XrHitTestOptionsInit, XrHitTestResult, XrHitTestSource,
    XrReferenceSpace, XrReferenceSpaceType, XrRenderStateInit, XrSession, XrSessionInit,
    XrSessionMode, XrSystem, XrWebGlLayer,
};

fn set(target: &Object, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| Error::SessionStart(js_error(&e)))
}

fn string_array(values: &[String]) -> Array {
    values.iter().map(|v| JsValue::from_str(v)).collect()
}

/// `navigator.xr`, when the browser exposes WebXR at all
pub fn xr_system(navigator: &Navigator) -> Option<XrSystem> {
    let xr = Reflect::get(navigator, &JsValue::from_str("xr")).ok()?;
    if xr.is_undefined() || xr.is_null() {
        return None;
    }
    Some(xr.unchecked_into())
}

/// Ask the runtime whether immersive AR sessions are available
pub async fn is_ar_supported(xr: Option<&XrSystem>) -> bool {
    let Some(xr) = xr else {
        return false;
    };
    match JsFuture::from(xr.is_session_supported(XrSessionMode::ImmersiveAr)).await {
        Ok(supported) => supported.as_bool().unwrap_or(false),
        Err(e) => {
            log::warn!("isSessionSupported failed: {}", js_error(&e));
            false
        }
    }
}

/// Request the session described by `request`
pub async fn request_session(
    xr: &XrSystem,
    request: &SessionRequest,
    overlay_root: Option<&Element>,
) -> Result<XrSession> {
    let init = Object::new();
    set(&init, "requiredFeatures", &string_array(&request.required_features))?;
    set(&init, "optionalFeatures", &string_array(&request.optional_features))?;
    if let (true, Some(root)) = (request.dom_overlay, overlay_root) {
        let overlay = Object::new();
        set(&overlay, "root", root)?;
        set(&init, "domOverlay", &overlay)?;
    }
    let init: XrSessionInit = init.unchecked_into();

    let session = JsFuture::from(xr.request_session_with_options(XrSessionMode::ImmersiveAr, &init))
        .await
        .map_err(|e| Error::SessionStart(js_error(&e)))?;
    Ok(session.unchecked_into())
}

/// Features the runtime actually enabled, where the browser reports them
pub fn enabled_features(session: &XrSession) -> Vec<String> {
    Reflect::get(session, &JsValue::from_str("enabledFeatures"))
        .ok()
        .filter(|value| Array::is_array(value))
        .map(|value| {
            Array::from(&value)
                .iter()
                .filter_map(|feature| feature.as_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Attach a WebGL layer so the session produces frames
pub async fn attach_base_layer(
    session: &XrSession,
    gl: &web_sys::WebGl2RenderingContext,
) -> Result<XrWebGlLayer> {
    JsFuture::from(gl.make_xr_compatible())
        .await
        .map_err(|e| Error::SessionStart(js_error(&e)))?;
    let layer = XrWebGlLayer::new_with_web_gl2_rendering_context(session, gl)
        .map_err(|e| Error::SessionStart(js_error(&e)))?;

    let state = Object::new();
    set(&state, "baseLayer", &layer)?;
    let state: XrRenderStateInit = state.unchecked_into();
    session.update_render_state_with_state(&state);
    Ok(layer)
}

fn web_space_type(space: ReferenceSpaceType) -> XrReferenceSpaceType {
    match space {
        ReferenceSpaceType::Viewer => XrReferenceSpaceType::Viewer,
        ReferenceSpaceType::Local => XrReferenceSpaceType::Local,
        ReferenceSpaceType::LocalFloor => XrReferenceSpaceType::LocalFloor,
    }
}

pub async fn reference_space(
    session: &XrSession,
    space: ReferenceSpaceType,
) -> std::result::Result<XrReferenceSpace, JsValue> {
    let value = JsFuture::from(session.request_reference_space(web_space_type(space))).await?;
    Ok(value.unchecked_into())
}

/// Viewer space, then a hit-test source casting from it
pub async fn hit_test_source(session: &XrSession) -> Result<XrHitTestSource> {
    let viewer = reference_space(session, ReferenceSpaceType::Viewer)
        .await
        .map_err(|e| Error::HitTestSource(js_error(&e)))?;

    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("space"), &viewer)
        .map_err(|e| Error::HitTestSource(js_error(&e)))?;
    let options: XrHitTestOptionsInit = options.unchecked_into();

    let source = JsFuture::from(session.request_hit_test_source(&options))
        .await
        .map_err(|e| Error::HitTestSource(js_error(&e)))?;
    Ok(source.unchecked_into())
}

/// Hit-test view of one XR frame, resolved against the session's space
pub struct WebXrFrame<'a> {
    pub frame: &'a XrFrame,
    pub space: &'a XrReferenceSpace,
}

impl HitTestFrame for WebXrFrame<'_> {
    type Source = XrHitTestSource;

    fn hit_test_results(&self, source: &XrHitTestSource) -> Vec<HitTestResult> {
        self.frame
            .get_hit_test_results(source)
            .iter()
            .map(|value| {
                let result: XrHitTestResult = value.unchecked_into();
                let pose = result
                    .get_pose(self.space)
                    .and_then(|pose| Pose::from_column_major(&pose.transform().matrix()).ok());
                match pose {
                    Some(pose) => HitTestResult::new(pose),
                    None => HitTestResult::without_pose(),
                }
            })
            .collect()
    }
}
