use super::mesh_renderer::MeshRenderer;
use super::render_context::RenderContext;
use crate::camera::OrbitCamera;
use crate::error::ViewerError;
use crate::scene::Scene;
use crate::session::{EngineConfig, RenderBackend};

/// wgpu-backed [`RenderBackend`]: a surface plus the lit mesh renderer.
pub struct WgpuBackend {
    context: RenderContext,
    renderer: MeshRenderer,
    disposed: bool,
}

impl WgpuBackend {
    /// Acquire a GPU surface for `window`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Gpu`] if no adapter, device or compatible
    /// surface configuration is available.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        engine: &EngineConfig,
        fallback_color: [f32; 3],
    ) -> Result<Self, ViewerError> {
        let context = RenderContext::new(window, size, engine).await?;
        Ok(Self::from_context(context, fallback_color))
    }

    /// Wrap an existing context.
    #[must_use]
    pub fn from_context(context: RenderContext, fallback_color: [f32; 3]) -> Self {
        let renderer = MeshRenderer::new(&context, fallback_color);
        Self {
            context,
            renderer,
            disposed: false,
        }
    }

    fn encode(&self, target: &wgpu::TextureView, scene: &Scene) -> wgpu::CommandEncoder {
        let [r, g, b, a] = scene.clear_color.map(f64::from);
        let depth_ops = Some(wgpu::Operations {
            load: wgpu::LoadOp::Clear(1.0),
            store: wgpu::StoreOp::Store,
        });
        let stencil_ops = self
            .context
            .depth_format()
            .has_stencil_aspect()
            .then_some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(0),
                store: wgpu::StoreOp::Store,
            });

        let mut encoder = self.context.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Mesh Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.context.depth_view(),
                    depth_ops,
                    stencil_ops,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.renderer.draw(&mut pass);
        }
        encoder
    }
}

impl RenderBackend for WgpuBackend {
    fn size(&self) -> (u32, u32) {
        self.context.size()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if !self.disposed {
            self.context.resize(width, height);
        }
    }

    fn render(&mut self, scene: &Scene, camera: &OrbitCamera) -> Result<(), ViewerError> {
        if self.disposed {
            return Err(ViewerError::Disposed);
        }
        self.renderer.sync(&self.context.device, scene);
        self.renderer.prepare(&self.context.queue, scene, camera);

        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = self.context.size();
                self.context.resize(width, height);
                log::debug!("surface reconfigured, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(ViewerError::Render(e.to_string())),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self.encode(&view, scene);
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.renderer.clear();
        self.context.surface = None;
        log::debug!("GPU resources released");
    }
}
