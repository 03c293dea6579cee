//! Model loading: locator classification, byte acquisition, format
//! detection and the glTF/OBJ/STL readers that turn bytes into an
//! [`AssetContainer`].

mod fetch;
mod format;
mod gltf;
mod locator;
mod obj;
mod stl;

use std::path::PathBuf;

pub use fetch::fetch_bytes;
pub use format::ModelFormat;
pub use locator::{LocatorKind, ModelLocator};

use crate::error::ViewerError;
use crate::scene::AssetContainer;

/// Fetch and parse the model behind `locator`, blocking the calling
/// thread. Native sessions run this on the loader thread.
///
/// # Errors
///
/// Any [`fetch_bytes`] or [`parse`] error.
pub fn load(locator: &ModelLocator) -> Result<AssetContainer, ViewerError> {
    let bytes = fetch_bytes(locator)?;
    log::info!("Fetched {} ({} bytes)", locator, bytes.len());
    parse(locator, &bytes)
}

/// Parse already-fetched bytes for `locator`.
///
/// Sibling resources (external glTF buffers, OBJ material libraries) are
/// resolved only for local files.
///
/// # Errors
///
/// [`ViewerError::UnsupportedFormat`] if the format cannot be identified,
/// [`ViewerError::Parse`] if the reader rejects the payload and
/// [`ViewerError::EmptyAsset`] if it holds no meshes.
pub fn parse(locator: &ModelLocator, bytes: &[u8]) -> Result<AssetContainer, ViewerError> {
    let format = ModelFormat::detect(locator, bytes)
        .ok_or_else(|| ViewerError::UnsupportedFormat(locator.to_string()))?;
    let base = sibling_base(locator);
    let source = locator.as_str();

    let container = match format {
        ModelFormat::Gltf | ModelFormat::Glb => gltf::parse(source, bytes, base.as_deref(), format)?,
        ModelFormat::Obj => obj::parse(source, bytes, base.as_deref())?,
        ModelFormat::Stl => stl::parse(source, bytes)?,
    };

    if container.mesh_count() == 0 {
        return Err(ViewerError::EmptyAsset);
    }
    log::info!(
        "Parsed {} as {}: {} meshes, {} vertices",
        locator,
        format.name(),
        container.mesh_count(),
        container.vertex_count()
    );
    Ok(container)
}

fn sibling_base(locator: &ModelLocator) -> Option<PathBuf> {
    match locator.kind() {
        LocatorKind::File(path) => path
            .parent()
            .map(|p| if p.as_os_str().is_empty() { PathBuf::from(".") } else { p.to_path_buf() }),
        LocatorKind::Http(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_payload_is_unsupported() {
        let loc = ModelLocator::new("https://x.test/model.bin");
        assert!(matches!(
            parse(&loc, b"\x00\x01\x02"),
            Err(ViewerError::UnsupportedFormat(ref s)) if s.contains("model.bin")
        ));
    }

    #[test]
    fn dispatches_on_extension() {
        let loc = ModelLocator::new("https://x.test/tri.obj?v=3");
        let container = parse(&loc, b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(container.source, "https://x.test/tri.obj?v=3");
        assert_eq!(container.vertex_count(), 3);
    }

    #[test]
    fn sniffs_extensionless_stl() {
        let loc = ModelLocator::new("https://x.test/download");
        let stl = "solid s\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid s\n";
        let container = parse(&loc, stl.as_bytes()).unwrap();
        assert_eq!(container.mesh_count(), 1);
    }

    #[test]
    fn container_without_meshes_is_empty_asset() {
        let loc = ModelLocator::new("empty.gltf");
        let json = br#"{"asset":{"version":"2.0"},"scenes":[{"nodes":[0]}],"nodes":[{"name":"lonely"}]}"#;
        assert!(matches!(parse(&loc, json), Err(ViewerError::EmptyAsset)));
    }

    #[test]
    fn loads_local_file_end_to_end() {
        let path = std::env::temp_dir().join(format!("orbitview_load_{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 2 0 0\nv 0 4 2\nf 1 2 3\n").unwrap();
        let container = load(&ModelLocator::new(path.display().to_string())).unwrap();
        assert_eq!(container.vertex_count(), 3);
        let _ = std::fs::remove_file(&path);
    }
}
