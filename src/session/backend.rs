use crate::camera::OrbitCamera;
use crate::error::ViewerError;
use crate::options::EngineOptions;
use crate::scene::Scene;

/// Flags a session requests when acquiring its render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Keep presented frames readable after presentation.
    pub preserve_drawing_buffer: bool,
    /// Allocate a stencil channel with the depth buffer.
    pub stencil: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preserve_drawing_buffer: true,
            stencil: true,
        }
    }
}

impl From<&EngineOptions> for EngineConfig {
    fn from(options: &EngineOptions) -> Self {
        Self {
            preserve_drawing_buffer: options.preserve_drawing_buffer,
            stencil: options.stencil,
        }
    }
}

/// The render surface a session draws into.
///
/// Implemented by the wgpu renderer; sessions are generic over it so the
/// lifecycle can run without a GPU.
pub trait RenderBackend {
    /// Current surface size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the surface.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame of `scene` as seen by `camera`.
    ///
    /// # Errors
    ///
    /// Backend-specific failures; the session logs them and keeps running.
    fn render(&mut self, scene: &Scene, camera: &OrbitCamera) -> Result<(), ViewerError>;

    /// Release all GPU resources. Called at most once.
    fn dispose(&mut self);
}
