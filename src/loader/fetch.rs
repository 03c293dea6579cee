//! Byte acquisition for model locators.

use super::locator::{LocatorKind, ModelLocator};
use crate::error::ViewerError;

/// Largest HTTP body accepted for a model.
#[cfg(feature = "net")]
const MAX_DOWNLOAD_BYTES: u64 = 512 * 1024 * 1024;

/// Read the bytes behind `locator`, blocking the calling thread.
///
/// # Errors
///
/// [`ViewerError::Fetch`] if the file or URL cannot be read.
pub fn fetch_bytes(locator: &ModelLocator) -> Result<Vec<u8>, ViewerError> {
    match locator.kind() {
        LocatorKind::File(path) => std::fs::read(&path)
            .map_err(|e| ViewerError::Fetch(format!("{}: {e}", path.display()))),
        LocatorKind::Http(url) => fetch_http(url),
    }
}

#[cfg(feature = "net")]
fn fetch_http(url: &str) -> Result<Vec<u8>, ViewerError> {
    log::info!("Downloading {url}");
    let mut response = ureq::get(url)
        .call()
        .map_err(|e| ViewerError::Fetch(format!("{url}: {e}")))?;
    response
        .body_mut()
        .with_config()
        .limit(MAX_DOWNLOAD_BYTES)
        .read_to_vec()
        .map_err(|e| ViewerError::Fetch(format!("{url}: {e}")))
}

#[cfg(not(feature = "net"))]
fn fetch_http(url: &str) -> Result<Vec<u8>, ViewerError> {
    Err(ViewerError::Fetch(format!(
        "{url}: HTTP support not compiled in (enable the `net` feature)"
    )))
}
