//! Standalone model viewer window backed by winit.
//!
//! ```no_run
//! # use orbitview::Viewer;
//! Viewer::builder()
//!     .with_locator("assets/models/duck.glb")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorIcon, Window, WindowId},
};

use crate::{
    error::ViewerError, gpu::WgpuBackend, options::Options, InputEvent,
    ModelLocator, MouseButton, ViewerSession,
};

/// Pixel-delta scroll distance treated as one wheel notch.
const PIXELS_PER_NOTCH: f32 = 100.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    locator: Option<ModelLocator>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            locator: None,
            options: None,
            title: "orbitview".into(),
        }
    }

    /// Set the model to load (path, `file://` or `http(s)://` URL).
    #[must_use]
    pub fn with_locator(mut self, locator: impl Into<ModelLocator>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            locator: self.locator,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays one model.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    locator: Option<ModelLocator>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Viewer`] if no locator was given or the event
    /// loop fails.
    pub fn run(self) -> Result<(), ViewerError> {
        let locator = self
            .locator
            .ok_or_else(|| ViewerError::Viewer("no model locator given".into()))?;
        let event_loop =
            EventLoop::new().map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            session: None,
            locator,
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    session: Option<ViewerSession<WgpuBackend>>,
    locator: ModelLocator,
    options: Options,
    title: String,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn forward(&mut self, event: InputEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(cursor) = session.handle_input(event) {
            if let Some(window) = &self.window {
                window.set_cursor(CursorIcon::from(cursor));
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        window.set_cursor(CursorIcon::Grab);

        let size = viewport_size(window.inner_size());
        let surface_window = Arc::clone(&window);
        let fallback = self.options.scene.default_material_color;
        let session = ViewerSession::activate(
            self.locator.clone(),
            self.options.clone(),
            move |config| {
                pollster::block_on(WgpuBackend::new(
                    surface_window,
                    size,
                    config,
                    fallback,
                ))
            },
        );
        if !session.is_active() {
            log::error!("Viewer could not start; closing window");
            event_loop.exit();
            return;
        }

        window.request_redraw();
        self.window = Some(window);
        self.session = Some(session);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(mut session) = self.session.take() {
                let stats = session.render_loop();
                log::info!(
                    "closing after {} frames ({:.1} fps)",
                    stats.frame_count(),
                    stats.fps()
                );
                session.deactivate();
            }
            event_loop.exit();
            return;
        }

        if self.window.is_none() || self.session.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(session) = &mut self.session {
                    session.handle_resize(vp_w, vp_h);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let inner = self.window.as_ref().map(|w| w.inner_size());
                if let (Some(session), Some(inner)) = (&mut self.session, inner) {
                    let (vp_w, vp_h) = viewport_size(inner);
                    session.handle_resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(session) = &mut self.session {
                    let _ = session.frame();
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let button = MouseButton::from(button);
                self.forward(match state {
                    ElementState::Pressed => InputEvent::PointerDown { button },
                    ElementState::Released => InputEvent::PointerUp { button },
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.forward(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::CursorLeft { .. } => {
                self.forward(InputEvent::PointerLeft);
            }

            WindowEvent::Focused(false) => {
                self.forward(InputEvent::PointerCancelled);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 / PIXELS_PER_NOTCH
                    }
                };
                self.forward(InputEvent::Scroll { notches });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.forward(InputEvent::ModifiersChanged {
                    shift: modifiers.state().shift_key(),
                });
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut session) = self.session.take() {
            session.deactivate();
        }
    }
}
