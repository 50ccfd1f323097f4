//! Browser binding
//!
//! Wires the app driver to the page: the AR button, WebXR session events,
//! the XR animation-frame loop, touch and resize listeners, and the model
//! fetch. The host page draws the scene from the render callback.

pub mod dom;
pub mod fetch;
pub mod xr;

use crate::app::ArApp;
use crate::ar::{ActiveSession, ModelSlot, ReferenceSpaceType};
use crate::viewport::Viewport;
use dom::{js_error, CanvasSurface, DomOverlay};
use js_sys::{Float32Array, Function, Object, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, WebGl2RenderingContext, XrFrame, XrHitTestSource, XrReferenceSpace, XrSession,
    XrSystem, XrWebGlLayer,
};

type WebApp = ArApp<XrHitTestSource, DomOverlay>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64, XrFrame)>>>>;

struct WebContext {
    app: RefCell<WebApp>,
    surface: RefCell<CanvasSurface>,
    gl: WebGl2RenderingContext,
    xr: Option<XrSystem>,
    overlay_root: Option<Element>,
    render_callback: RefCell<Option<Function>>,
}

/// AR placement running in the page
#[wasm_bindgen]
pub struct ArPlacement {
    ctx: Rc<WebContext>,
}

#[wasm_bindgen]
impl ArPlacement {
    /// Bootstrap the scene, start loading the model and wire the page
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ArPlacement, JsValue> {
        crate::init_wasm();

        let window = dom::window()?;
        let document = dom::document()?;
        let config = dom::load_config(&document);

        let mut surface = CanvasSurface::create(&document)?;
        let gl = surface
            .canvas()
            .get_context("webgl2")?
            .ok_or_else(|| JsValue::from_str("Failed to get WebGL2 context"))?
            .dyn_into::<WebGl2RenderingContext>()?;

        let viewport = dom::current_viewport(&window);
        let overlay = DomOverlay::new(&document, &config.overlay.text_element_id);
        let overlay_root = document.get_element_by_id(&config.overlay.root_element_id);
        let button = document.get_element_by_id(&config.overlay.button_element_id);
        let model_url = config.model.url.clone();

        let mut app = WebApp::new(config, overlay, viewport);
        app.on_resize(viewport, &mut surface);

        let ctx = Rc::new(WebContext {
            app: RefCell::new(app),
            surface: RefCell::new(surface),
            gl,
            xr: xr::xr_system(&window.navigator()),
            overlay_root,
            render_callback: RefCell::new(None),
        });

        load_model(ctx.clone(), model_url);
        check_support(ctx.clone(), button.clone());
        install_listeners(&ctx, &window, button.as_ref())?;

        log::info!("AR placement initialized");
        Ok(ArPlacement { ctx })
    }

    /// Called every XR frame with `(frame, referenceSpace, state)` after the
    /// placement state is updated. `state` carries, for the reticle and the
    /// model anchor, the node index in `sceneJson()`, visibility and the
    /// column-major world matrix.
    #[wasm_bindgen(js_name = setRenderCallback)]
    pub fn set_render_callback(&self, callback: Function) {
        *self.ctx.render_callback.borrow_mut() = Some(callback);
    }

    /// The scene graph as JSON (nodes, meshes, materials, lights, camera),
    /// or `undefined` until the model has loaded
    #[wasm_bindgen(js_name = sceneJson)]
    pub fn scene_json(&self) -> Result<Option<String>, JsValue> {
        let app = self.ctx.app.borrow();
        if app.state().placement().slot() != ModelSlot::Loaded {
            return Ok(None);
        }
        app.scene_json()
            .map(Some)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Projection for drawing the inline (non-XR) view
    #[wasm_bindgen(js_name = projectionMatrix)]
    pub fn projection_matrix(&self) -> Float32Array {
        let matrix = self.ctx.app.borrow().scene().camera.projection_matrix().to_cols_array();
        Float32Array::from(&matrix[..])
    }

    #[wasm_bindgen(js_name = isPlaced)]
    pub fn is_placed(&self) -> bool {
        self.ctx.app.borrow().state().placement().is_placed()
    }

    /// Start an AR session; the same as pressing the AR button
    #[wasm_bindgen(js_name = startSession)]
    pub fn start_session(&self) {
        spawn_local(start_session(self.ctx.clone()));
    }
}

fn load_model(ctx: Rc<WebContext>, url: String) {
    spawn_local(async move {
        let result = fetch::fetch_model(&url).await;
        ctx.app.borrow_mut().on_model_loaded(result);
    });
}

/// Report unsupported browsers up front and disable the button
fn check_support(ctx: Rc<WebContext>, button: Option<Element>) {
    spawn_local(async move {
        if xr::is_ar_supported(ctx.xr.as_ref()).await {
            return;
        }
        if let Err(e) = ctx.app.borrow_mut().request_session(false) {
            log::warn!("{}", e);
        }
        if let Some(button) = button {
            if let Err(e) = button.set_attribute("disabled", "") {
                log::warn!("Could not disable AR button: {}", js_error(&e));
            }
        }
    });
}

fn install_listeners(
    ctx: &Rc<WebContext>,
    window: &web_sys::Window,
    button: Option<&Element>,
) -> Result<(), JsValue> {
    if let Some(button) = button {
        let click_ctx = ctx.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            spawn_local(start_session(click_ctx.clone()));
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let resize_ctx = ctx.clone();
    dom::on_resize(window, move |viewport: Viewport| {
        let mut surface = resize_ctx.surface.borrow_mut();
        resize_ctx.app.borrow_mut().on_resize(viewport, &mut *surface);
    })?;

    // Touches land on the DOM overlay while the session is presenting
    let touch_target: Element = match &ctx.overlay_root {
        Some(root) => root.clone(),
        None => ctx.surface.borrow().canvas().clone().into(),
    };
    let start_ctx = ctx.clone();
    dom::on_touch(&touch_target, "touchstart", move |touches| {
        start_ctx.app.borrow_mut().on_touch_start(&touches);
    })?;
    let move_ctx = ctx.clone();
    dom::on_touch(&touch_target, "touchmove", move |touches| {
        move_ctx.app.borrow_mut().on_touch_move(&touches);
    })?;
    let end_ctx = ctx.clone();
    dom::on_touch(&touch_target, "touchend", move |remaining| {
        end_ctx.app.borrow_mut().on_touch_end(&remaining);
    })?;

    Ok(())
}

async fn start_session(ctx: Rc<WebContext>) {
    let supported = xr::is_ar_supported(ctx.xr.as_ref()).await;
    let request = match ctx.app.borrow_mut().request_session(supported) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("{}", e);
            return;
        }
    };
    let Some(xr_system) = ctx.xr.as_ref() else {
        return;
    };

    let session = match xr::request_session(xr_system, &request, ctx.overlay_root.as_ref()).await {
        Ok(session) => session,
        Err(e) => {
            ctx.app.borrow_mut().on_session_failed(e.to_string());
            return;
        }
    };

    let layer = match xr::attach_base_layer(&session, &ctx.gl).await {
        Ok(layer) => layer,
        Err(e) => {
            ctx.app.borrow_mut().on_session_failed(e.to_string());
            end_quietly(&session);
            return;
        }
    };

    let granted = xr::enabled_features(&session);
    let active = match ctx.app.borrow_mut().on_session_started(&granted) {
        Ok(active) => active,
        Err(e) => {
            log::error!("{}", e);
            end_quietly(&session);
            return;
        }
    };

    let space = match xr::reference_space(&session, active.reference_space).await {
        Ok(space) => space,
        Err(_) if active.reference_space == ReferenceSpaceType::LocalFloor => {
            log::warn!("local-floor unavailable; falling back to local");
            match xr::reference_space(&session, ReferenceSpaceType::Local).await {
                Ok(space) => space,
                Err(e) => {
                    log::error!("No reference space: {}", js_error(&e));
                    abandon(&ctx, &session);
                    return;
                }
            }
        }
        Err(e) => {
            log::error!("No reference space: {}", js_error(&e));
            abandon(&ctx, &session);
            return;
        }
    };

    let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
    if let Err(e) = install_session_listeners(&ctx, &session, frame_callback.clone()) {
        log::error!("Could not listen to session events: {}", js_error(&e));
        abandon(&ctx, &session);
        return;
    }
    run_frame_loop(ctx, session, active, space, layer, frame_callback);
}

fn end_quietly(session: &XrSession) {
    // The session may already be gone; the promise outcome is irrelevant
    let _ = session.end();
}

/// End a started session before its `end` listener is installed
fn abandon(ctx: &WebContext, session: &XrSession) {
    end_session(ctx);
    end_quietly(session);
}

fn end_session(ctx: &WebContext) {
    let mut surface = ctx.surface.borrow_mut();
    ctx.app.borrow_mut().on_session_ended(&mut *surface);
}

fn install_session_listeners(
    ctx: &Rc<WebContext>,
    session: &XrSession,
    frame_callback: FrameCallback,
) -> Result<(), JsValue> {
    let select_ctx = ctx.clone();
    let on_select = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        select_ctx.app.borrow_mut().on_select();
    }) as Box<dyn FnMut(_)>);
    session.add_event_listener_with_callback("select", on_select.as_ref().unchecked_ref())?;
    on_select.forget();

    let end_ctx = ctx.clone();
    let on_end = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        end_session(&end_ctx);
        frame_callback.borrow_mut().take();
    }) as Box<dyn FnMut(_)>);
    session.add_event_listener_with_callback("end", on_end.as_ref().unchecked_ref())?;
    on_end.forget();

    Ok(())
}

fn run_frame_loop(
    ctx: Rc<WebContext>,
    session: XrSession,
    active: ActiveSession,
    space: XrReferenceSpace,
    layer: XrWebGlLayer,
    frame_callback: FrameCallback,
) {
    let next = frame_callback.clone();
    let loop_session = session.clone();

    *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_time: f64, frame: XrFrame| {
        if active.token.is_cancelled() {
            return;
        }
        render_frame(&ctx, &loop_session, &active, &space, &layer, &frame);
        if let Some(callback) = next.borrow().as_ref() {
            loop_session.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64, XrFrame)>));

    if let Some(callback) = frame_callback.borrow().as_ref() {
        session.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

fn render_frame(
    ctx: &Rc<WebContext>,
    session: &XrSession,
    active: &ActiveSession,
    space: &XrReferenceSpace,
    layer: &XrWebGlLayer,
    frame: &XrFrame,
) {
    let update = ctx.app.borrow_mut().on_frame(&xr::WebXrFrame { frame, space });

    if let Some(ticket) = update.source_request {
        let source_ctx = ctx.clone();
        let source_session = session.clone();
        spawn_local(async move {
            let result = xr::hit_test_source(&source_session).await;
            source_ctx.app.borrow_mut().on_hit_test_source(&ticket, result);
        });
    }

    let gl = &ctx.gl;
    gl.bind_framebuffer(WebGl2RenderingContext::FRAMEBUFFER, layer.framebuffer().as_ref());
    gl.clear_color(0.0, 0.0, 0.0, 0.0);
    gl.clear(WebGl2RenderingContext::COLOR_BUFFER_BIT | WebGl2RenderingContext::DEPTH_BUFFER_BIT);

    let callback = ctx.render_callback.borrow().clone();
    if let Some(callback) = callback {
        match frame_state(ctx) {
            Ok(state) => {
                if let Err(e) = callback.call3(&JsValue::NULL, frame, space, &state) {
                    log::error!("Render callback failed in session {}: {}", active.id.get(), js_error(&e));
                }
            }
            Err(e) => log::error!("Could not build frame state: {}", js_error(&e)),
        }
    }
}

fn frame_state(ctx: &WebContext) -> Result<JsValue, JsValue> {
    let app = ctx.app.borrow();
    let scene = app.scene();
    let state = Object::new();

    for (key, node) in [("reticle", app.reticle_node()), ("model", app.model_node())] {
        let entry = Object::new();
        Reflect::set(&entry, &"node".into(), &(node as u32).into())?;
        let matrix = scene.world_transform(node).to_cols_array();
        Reflect::set(&entry, &"visible".into(), &scene.is_visible(node).into())?;
        Reflect::set(&entry, &"matrix".into(), &Float32Array::from(&matrix[..]))?;
        Reflect::set(&state, &key.into(), &entry)?;
    }
    Reflect::set(
        &state,
        &"placed".into(),
        &app.state().placement().is_placed().into(),
    )?;
    Reflect::set(
        &state,
        &"modelLoaded".into(),
        &(app.state().placement().slot() == ModelSlot::Loaded).into(),
    )?;

    Ok(state.into())
}
