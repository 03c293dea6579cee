//! Camera system for 3D scene viewing.
//!
//! Provides an orbit camera with limits, inertia and auto-framing, plus the
//! GPU uniform the renderer uploads each frame.

/// GPU camera uniform.
pub mod core;
/// Orbit camera state, input response and framing.
pub mod orbit;

pub use orbit::OrbitCamera;
