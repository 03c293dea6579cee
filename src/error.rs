//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the orbitview crate.
#[derive(Debug)]
pub enum ViewerError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Failed to obtain the bytes behind a model locator.
    Fetch(String),
    /// Neither the locator extension nor the payload identified a known
    /// model format.
    UnsupportedFormat(String),
    /// A format reader rejected the model payload.
    Parse {
        /// Human-readable format name.
        format: &'static str,
        /// Reader diagnostic.
        message: String,
    },
    /// The loaded asset container holds no meshes at all.
    EmptyAsset,
    /// The normalization pass could not size the model.
    Framing(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Frame acquisition or submission failure.
    Render(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// The session was torn down before the operation could complete.
    Disposed,
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Fetch(msg) => write!(f, "fetch error: {msg}"),
            Self::UnsupportedFormat(locator) => {
                write!(f, "unsupported model format: {locator}")
            }
            Self::Parse { format, message } => {
                write!(f, "{format} parse error: {message}")
            }
            Self::EmptyAsset => write!(f, "asset container holds no meshes"),
            Self::Framing(msg) => write!(f, "framing error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Render(msg) => write!(f, "render error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Disposed => write!(f, "session already disposed"),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for ViewerError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
