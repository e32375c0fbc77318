//! Browser bindings
//!
//! `DemoHandle` is driven by the host page (it calls `tick` from its own
//! requestAnimationFrame loop). `mount` wires the DOM listeners and the frame
//! loop itself and hands back a `DemoMount` to tear them down again.

use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::rc::Rc;
use std::sync::Once;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use crate::config::DemoConfig;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::renderer::{Presented, RenderState};

static INIT_LOGGING: Once = Once::new();

fn init_logging() {
    INIT_LOGGING.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"vecmath-demo: a logger was already installed".into());
        }
    });
}

fn js_error(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// CSS size times device pixel ratio, never zero
fn physical_size(css_width: f32, css_height: f32, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let scale = |css: f32| ((css.max(1.0) as f64 * dpr).round() as u32).max(1);
    (scale(css_width), scale(css_height))
}

async fn create_render_state(
    canvas: &HtmlCanvasElement,
    width: u32,
    height: u32,
) -> Result<RenderState, EngineError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });

    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| EngineError::SurfaceUnavailable(e.to_string()))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| EngineError::SurfaceUnavailable(format!("adapter: {e}")))?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    RenderState::new(surface, &adapter, width, height).await
}

/// A started demo bound to one canvas
#[wasm_bindgen]
pub struct DemoHandle {
    engine: Engine<RenderState>,
    canvas: HtmlCanvasElement,
}

#[wasm_bindgen]
impl DemoHandle {
    /// Acquire the GPU surface for `canvas` and start the engine.
    ///
    /// `config_json` overrides any subset of the defaults. Fails (and leaves
    /// nothing running) on bad config or when no adapter/device is available.
    pub async fn start(
        canvas: HtmlCanvasElement,
        config_json: Option<String>,
    ) -> Result<DemoHandle, JsValue> {
        init_logging();

        let config = DemoConfig::from_host(config_json.as_deref()).map_err(js_error)?;

        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let css_width = (canvas.client_width() as f32).max(1.0);
        let css_height = (canvas.client_height() as f32).max(1.0);
        let (width, height) = physical_size(css_width, css_height, dpr);
        canvas.set_width(width);
        canvas.set_height(height);

        let render_state = create_render_state(&canvas, width, height)
            .await
            .map_err(js_error)?;
        let engine =
            Engine::start(render_state, config, css_width, css_height).map_err(js_error)?;

        Ok(Self { engine, canvas })
    }

    /// Run one frame. Returns false when the frame was skipped by the surface.
    pub fn tick(&mut self, now_ms: f64) -> Result<bool, JsValue> {
        self.engine
            .tick(now_ms)
            .map(|presented| presented == Presented::Shown)
            .map_err(js_error)
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// Returns true for movement keys so the host can suppress scrolling
    pub fn key_down(&mut self, code: &str) -> bool {
        self.engine.input_mut().key_down(code)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.engine.input_mut().key_up(code)
    }

    /// Pointer position in canvas CSS pixels
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.engine.input_mut().pointer_moved(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.engine.input_mut().pointer_left();
    }

    /// Window lost focus; release every held key
    pub fn blur(&mut self) {
        self.engine.input_mut().release_all();
    }

    pub fn resize(&mut self, css_width: f32, css_height: f32, dpr: f64) {
        if css_width <= 0.0 || css_height <= 0.0 {
            return;
        }
        let (width, height) = physical_size(css_width, css_height, dpr);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.engine.resize(css_width, css_height, width, height);
    }

    /// Last frame's readouts as `{ key: text }`
    pub fn readouts(&self) -> Result<js_sys::Object, JsValue> {
        let out = js_sys::Object::new();
        for readout in self.engine.readouts() {
            js_sys::Reflect::set(
                &out,
                &JsValue::from_str(readout.key),
                &JsValue::from_str(&readout.text),
            )?;
        }
        Ok(out)
    }

    /// Player position in canvas CSS pixels, `[x, y]`
    pub fn player_screen_position(&self) -> Vec<f32> {
        let p = self.engine.player_on_screen();
        vec![p.x, p.y]
    }
}

impl DemoHandle {
    /// Copy readouts into elements marked `data-readout="<key>"`
    fn write_readouts(&self, document: &Document) {
        for readout in self.engine.readouts() {
            let selector = format!("[data-readout=\"{}\"]", readout.key);
            if let Some(el) = document.query_selector(&selector).ok().flatten() {
                el.set_text_content(Some(&readout.text));
            }
        }
    }
}

type Listener = (EventTarget, &'static str, Closure<dyn FnMut(Event)>);
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn listen(
    listeners: &mut Vec<Listener>,
    target: &EventTarget,
    kind: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    listeners.push((target.clone(), kind, closure));
    Ok(())
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or_else(|| js_error("no window"))?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

/// A self-driving demo; `unmount` removes everything `mount` installed
#[wasm_bindgen]
pub struct DemoMount {
    handle: Rc<RefCell<DemoHandle>>,
    listeners: Vec<Listener>,
    frame: FrameCallback,
    frame_id: Rc<Cell<Option<i32>>>,
}

#[wasm_bindgen]
impl DemoMount {
    pub fn unmount(&mut self) {
        if let Some(id) = self.frame_id.take()
            && let Some(window) = web_sys::window()
        {
            let _ = window.cancel_animation_frame(id);
        }
        // Breaks the callback's reference to itself
        self.frame.borrow_mut().take();

        let had_listeners = !self.listeners.is_empty();
        for (target, kind, closure) in self.listeners.drain(..) {
            let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        self.handle.borrow_mut().stop();

        if had_listeners {
            log::info!("Demo unmounted");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.borrow().is_running()
    }

    pub fn readouts(&self) -> Result<js_sys::Object, JsValue> {
        self.handle.borrow().readouts()
    }
}

impl Drop for DemoMount {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Start a demo on the canvas with id `canvas_id` and drive it from
/// requestAnimationFrame until unmounted or the surface is lost.
#[wasm_bindgen]
pub async fn mount(canvas_id: String, config_json: Option<String>) -> Result<DemoMount, JsValue> {
    init_logging();

    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
    let document = window.document().ok_or_else(|| js_error("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(&canvas_id)
        .ok_or_else(|| js_error(format!("no element #{canvas_id}")))?
        .dyn_into()
        .map_err(|_| js_error(format!("#{canvas_id} is not a canvas")))?;

    let handle = Rc::new(RefCell::new(
        DemoHandle::start(canvas.clone(), config_json).await?,
    ));

    let mut listeners = Vec::new();

    // Keyboard (window level so the canvas doesn't need focus)
    {
        let handle = handle.clone();
        listen(&mut listeners, &window, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>()
                && handle.borrow_mut().key_down(&event.code())
            {
                event.prevent_default();
            }
        })?;
    }
    {
        let handle = handle.clone();
        listen(&mut listeners, &window, "keyup", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                handle.borrow_mut().key_up(&event.code());
            }
        })?;
    }
    {
        let handle = handle.clone();
        listen(&mut listeners, &window, "blur", move |_event| {
            handle.borrow_mut().blur();
        })?;
    }

    // Pointer
    {
        let handle = handle.clone();
        listen(&mut listeners, &canvas, "pointermove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                handle
                    .borrow_mut()
                    .pointer_moved(event.offset_x() as f32, event.offset_y() as f32);
            }
        })?;
    }
    {
        let handle = handle.clone();
        listen(&mut listeners, &canvas, "pointerleave", move |_event| {
            handle.borrow_mut().pointer_left();
        })?;
    }

    // Resize
    {
        let handle = handle.clone();
        let canvas = canvas.clone();
        listen(&mut listeners, &window, "resize", move |_event| {
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            handle.borrow_mut().resize(
                canvas.client_width() as f32,
                canvas.client_height() as f32,
                dpr,
            );
        })?;
    }

    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let frame_id = Rc::new(Cell::new(None));
    {
        let handle = handle.clone();
        let next = frame.clone();
        let frame_id = frame_id.clone();
        *frame.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
            frame_id.set(None);
            {
                let mut h = handle.borrow_mut();
                if let Err(e) = h.engine.tick(now_ms) {
                    if e.is_fatal() {
                        log::error!("Demo loop ended: {e}");
                    }
                    return;
                }
                h.write_readouts(&document);
            }
            if let Some(callback) = next.borrow().as_ref() {
                match request_frame(callback) {
                    Ok(id) => frame_id.set(Some(id)),
                    Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
                }
            }
        }));
    }

    // Built before the first request so a failure below still unmounts
    let mount = DemoMount {
        handle,
        listeners,
        frame,
        frame_id,
    };
    let requested = mount.frame.borrow().as_ref().map(request_frame);
    if let Some(id) = requested.transpose()? {
        mount.frame_id.set(Some(id));
    }

    log::info!("Demo mounted on #{canvas_id}");
    Ok(mount)
}
