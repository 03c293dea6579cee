//! Browser host for a viewer session.
//!
//! The viewer sizes the canvas backing store and follows window resizes
//! itself. The page owns the animation-frame loop and the pointer
//! listeners, and forwards them to a [`WebViewer`]:
//!
//! ```js
//! const viewer = await WebViewer.create(canvas, "models/duck.glb");
//! canvas.onpointerdown = (e) => { canvas.style.cursor = viewer.pointer_down(e.button) ?? canvas.style.cursor; };
//! requestAnimationFrame(function tick() { viewer.frame(); requestAnimationFrame(tick); });
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlCanvasElement, Request, RequestInit, RequestMode, Response};

use crate::error::ViewerError;
use crate::gpu::WgpuBackend;
use crate::input::{CursorState, InputEvent, MouseButton};
use crate::loader::{self, ModelLocator};
use crate::options::Options;
use crate::session::{EngineConfig, ViewerSession};
use crate::util::physical_size;

#[wasm_bindgen(start)]
fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"orbitview: logger already installed".into());
    }
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

async fn fetch_model(url: &str) -> Result<Vec<u8>, JsValue> {
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_mode(RequestMode::Cors);
    let request = Request::new_with_str_and_init(url, &init)?;

    let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(js_err(format!("HTTP {} for {url}", response.status())));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

type SharedSession = Rc<RefCell<ViewerSession<WgpuBackend>>>;

fn spawn_load(session: &SharedSession) {
    let url = session.borrow().locator().to_string();
    let session = Rc::clone(session);
    spawn_local(async move {
        let result = match fetch_model(&url).await {
            Ok(bytes) => {
                log::info!("Fetched {url} ({} bytes)", bytes.len());
                let locator = ModelLocator::new(url);
                loader::parse(&locator, &bytes)
            }
            Err(e) => Err(ViewerError::Fetch(format!("{url}: {}", js_message(&e)))),
        };
        session.borrow_mut().complete_load(result);
    });
}

/// Size the backing store from the canvas client size and device pixel
/// ratio. Returns the new size in physical pixels.
fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32) {
    let ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
    let (width, height) = physical_size(
        f64::from(canvas.client_width()),
        f64::from(canvas.client_height()),
        ratio,
    );
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height)
}

fn listen_for_resize(
    session: &SharedSession,
    canvas: &HtmlCanvasElement,
) -> Result<Closure<dyn FnMut(web_sys::Event)>, JsValue> {
    let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
    let session = Rc::downgrade(session);
    let canvas = canvas.clone();
    let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        let Some(session) = session.upgrade() else {
            return;
        };
        let (width, height) = fit_canvas(&canvas);
        session.borrow_mut().handle_resize(width, height);
    });
    window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())?;
    Ok(listener)
}

fn style_canvas(canvas: &HtmlCanvasElement) {
    let style = canvas.style();
    for (prop, value) in [
        ("width", "100%"),
        ("height", "100%"),
        ("touch-action", "none"),
        ("cursor", CursorState::default().css()),
    ] {
        if style.set_property(prop, value).is_err() {
            log::warn!("could not set canvas style {prop}");
        }
    }
}

/// A viewer session mounted on a canvas.
#[wasm_bindgen]
pub struct WebViewer {
    session: SharedSession,
    resize_listener: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

#[wasm_bindgen]
impl WebViewer {
    /// Mount a viewer on `canvas` for `locator` and start fetching the
    /// model. `options_toml` may hold a partial options preset.
    ///
    /// # Errors
    ///
    /// Rejects if the options do not parse, no GPU surface is available or
    /// the window resize listener cannot be registered.
    pub async fn create(
        canvas: HtmlCanvasElement,
        locator: String,
        options_toml: Option<String>,
    ) -> Result<WebViewer, JsValue> {
        let options: Options = match options_toml {
            Some(text) => toml::from_str(&text).map_err(js_err)?,
            None => Options::default(),
        };
        style_canvas(&canvas);
        let size = fit_canvas(&canvas);

        let config = EngineConfig::from(&options.engine);
        let backend = WgpuBackend::new(
            wgpu::SurfaceTarget::Canvas(canvas.clone()),
            size,
            &config,
            options.scene.default_material_color,
        )
        .await
        .map_err(js_err)?;

        let session = ViewerSession::activate_deferred(
            ModelLocator::new(locator),
            options,
            move |_| Ok(backend),
        );
        let session = Rc::new(RefCell::new(session));
        if !session.borrow().is_active() {
            return Ok(Self {
                session,
                resize_listener: None,
            });
        }
        let resize_listener = match listen_for_resize(&session, &canvas) {
            Ok(listener) => listener,
            Err(e) => {
                session.borrow_mut().deactivate();
                return Err(e);
            }
        };
        spawn_load(&session);
        Ok(Self {
            session,
            resize_listener: Some(resize_listener),
        })
    }

    /// The locator this viewer was mounted with.
    pub fn locator(&self) -> String {
        self.session.borrow().locator().to_string()
    }

    /// Whether a model has been loaded and framed.
    pub fn is_loaded(&self) -> bool {
        self.session.borrow().pivot().is_some()
    }

    /// Draw one frame. Returns whether anything was rendered.
    pub fn frame(&mut self) -> bool {
        self.session.borrow_mut().frame()
    }

    /// The canvas backing store changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.session
            .borrow_mut()
            .handle_resize(width.max(1), height.max(1));
    }

    fn input(&mut self, event: InputEvent) -> Option<String> {
        self.session
            .borrow_mut()
            .handle_input(event)
            .map(|cursor| cursor.css().to_owned())
    }

    /// `pointermove`. Returns a CSS cursor when it changed.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<String> {
        self.input(InputEvent::CursorMoved { x, y })
    }

    /// `pointerdown` with the DOM button code.
    pub fn pointer_down(&mut self, button: i16) -> Option<String> {
        self.input(InputEvent::PointerDown {
            button: MouseButton::from_dom(button),
        })
    }

    /// `pointerup` with the DOM button code.
    pub fn pointer_up(&mut self, button: i16) -> Option<String> {
        self.input(InputEvent::PointerUp {
            button: MouseButton::from_dom(button),
        })
    }

    /// `pointerleave`.
    pub fn pointer_leave(&mut self) -> Option<String> {
        self.input(InputEvent::PointerLeft)
    }

    /// `pointercancel`.
    pub fn pointer_cancel(&mut self) -> Option<String> {
        self.input(InputEvent::PointerCancelled)
    }

    /// `wheel`, with `delta_y` in DOM pixels (negative zooms in).
    pub fn wheel(&mut self, delta_y: f32) {
        let _ = self.input(InputEvent::Scroll {
            notches: -delta_y / crate::input::processor::WHEEL_UNITS_PER_NOTCH,
        });
    }

    /// Shift key state.
    pub fn set_shift(&mut self, shift: bool) {
        let _ = self.input(InputEvent::ModifiersChanged { shift });
    }

    /// Tear the viewer down. Safe to call more than once.
    pub fn deactivate(&mut self) {
        self.unlisten();
        self.session.borrow_mut().deactivate();
    }
}

impl WebViewer {
    fn unlisten(&mut self) {
        let Some(listener) = self.resize_listener.take() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        if window
            .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("could not remove window resize listener");
        }
    }
}

impl Drop for WebViewer {
    fn drop(&mut self) {
        self.unlisten();
    }
}
