// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Auto-framing orbit viewer for glTF, GLB, OBJ and STL models, built on
//! wgpu.
//!
//! A model is loaded from a path or URL, merged into the scene, scaled to a
//! fixed size around the origin and framed by an orbit camera.
//!
//! # Key entry points
//!
//! - [`session::ViewerSession`] - one mounted viewer: activate, resize,
//!   render and deactivate
//! - [`loader`] - locator resolution, format detection and the three
//!   model parsers
//! - [`framing`] - the normalize-and-frame pass applied to every load
//! - [`options::Options`] - runtime configuration with TOML presets
//! - `Viewer` - a ready-made winit window (feature `viewer`)
//!
//! # Architecture
//!
//! Natively the session loads the model on a background thread and picks
//! the result up on the next [`session::ViewerSession::frame`]. On wasm32
//! the page fetches the bytes and hands them to the session. Rendering is
//! behind the [`session::RenderBackend`] trait; [`gpu::WgpuBackend`] is the
//! wgpu implementation.

pub mod camera;
pub mod error;
pub mod framing;
pub mod gpu;
pub mod input;
pub mod loader;
pub mod options;
pub mod scene;
pub mod session;
pub mod util;
#[cfg(feature = "viewer")]
mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use camera::OrbitCamera;
pub use error::ViewerError;
pub use input::{CursorState, InputEvent, MouseButton};
pub use loader::{ModelFormat, ModelLocator};
pub use options::Options;
pub use session::{LoadOutcome, RenderBackend, SessionId, ViewerSession};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
