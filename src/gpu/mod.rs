//! GPU rendering on wgpu.
//!
//! Provides device/surface initialization, the lighting uniform, the lit
//! mesh renderer and the [`WgpuBackend`] that sessions draw through.

/// [`RenderBackend`](crate::session::RenderBackend) implementation.
pub mod backend;
/// GPU lighting uniform and bind group.
pub mod lighting;
/// Per-mesh buffers and draw calls.
pub mod mesh_renderer;
/// Shared wgpu boilerplate for pipelines and uniform bind groups.
pub mod pipeline_helpers;
/// wgpu device, surface, queue and depth target initialization.
pub mod render_context;

pub use backend::WgpuBackend;
