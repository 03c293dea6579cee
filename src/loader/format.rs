use super::locator::ModelLocator;

/// Model file formats the viewer can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    /// glTF 2.0 JSON (`.gltf`).
    Gltf,
    /// glTF 2.0 binary container (`.glb`).
    Glb,
    /// Wavefront OBJ (`.obj`).
    Obj,
    /// Stereolithography, binary or ASCII (`.stl`).
    Stl,
}

impl ModelFormat {
    /// Human-readable name for diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Gltf => "glTF",
            Self::Glb => "GLB",
            Self::Obj => "OBJ",
            Self::Stl => "STL",
        }
    }

    /// Format implied by a lower-cased file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "gltf" => Some(Self::Gltf),
            "glb" => Some(Self::Glb),
            "obj" => Some(Self::Obj),
            "stl" => Some(Self::Stl),
            _ => None,
        }
    }

    /// Guess the format from the payload itself.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"glTF") {
            return Some(Self::Glb);
        }
        if is_binary_stl(bytes) {
            return Some(Self::Stl);
        }

        let head = &bytes[..bytes.len().min(4096)];
        let text = String::from_utf8_lossy(head);
        let trimmed = text.trim_start();
        if trimmed.starts_with('{') && trimmed.contains("\"asset\"") {
            return Some(Self::Gltf);
        }
        if trimmed.starts_with("solid") && trimmed.contains("facet") {
            return Some(Self::Stl);
        }
        if text.lines().any(|l| l.trim_start().starts_with("v ")) {
            return Some(Self::Obj);
        }
        None
    }

    /// Format for `locator`: its extension if recognized, else sniffed from
    /// `bytes`.
    #[must_use]
    pub fn detect(locator: &ModelLocator, bytes: &[u8]) -> Option<Self> {
        locator
            .extension()
            .as_deref()
            .and_then(Self::from_extension)
            .or_else(|| Self::sniff(bytes))
    }
}

/// Binary STL: 80-byte header, little-endian triangle count, then 50 bytes
/// per triangle.
fn is_binary_stl(bytes: &[u8]) -> bool {
    let Some(count) = bytes.get(80..84) else {
        return false;
    };
    let count = u32::from_le_bytes([count[0], count[1], count[2], count[3]]);
    u64::from(count) * 50 + 84 == bytes.len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_stl(triangles: u32) -> Vec<u8> {
        let mut bytes = vec![0u8; 80];
        bytes.extend_from_slice(&triangles.to_le_bytes());
        bytes.resize(84 + 50 * triangles as usize, 0);
        bytes
    }

    #[test]
    fn extension_wins_over_payload() {
        let loc = ModelLocator::new("https://x.test/part.stl?dl=1");
        assert_eq!(
            ModelFormat::detect(&loc, b"glTF...."),
            Some(ModelFormat::Stl)
        );
    }

    #[test]
    fn sniffs_each_format() {
        assert_eq!(ModelFormat::sniff(b"glTF\x02\0\0\0"), Some(ModelFormat::Glb));
        assert_eq!(
            ModelFormat::sniff(br#"  {"asset": {"version": "2.0"}}"#),
            Some(ModelFormat::Gltf)
        );
        assert_eq!(
            ModelFormat::sniff(b"solid cube\n facet normal 0 0 1\n"),
            Some(ModelFormat::Stl)
        );
        assert_eq!(ModelFormat::sniff(&binary_stl(2)), Some(ModelFormat::Stl));
        assert_eq!(
            ModelFormat::sniff(b"# exported\nv 0 0 0\nv 1 0 0\n"),
            Some(ModelFormat::Obj)
        );
        assert_eq!(ModelFormat::sniff(b"hello world"), None);
    }

    #[test]
    fn huge_triangle_count_is_not_binary_stl() {
        let mut bytes = vec![0u8; 80];
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 50]);
        assert!(!is_binary_stl(&bytes));
        assert_eq!(ModelFormat::sniff(&bytes), None);
    }

    #[test]
    fn binary_stl_with_solid_header() {
        let mut bytes = binary_stl(1);
        bytes[..5].copy_from_slice(b"solid");
        assert_eq!(ModelFormat::sniff(&bytes), Some(ModelFormat::Stl));
    }

    #[test]
    fn unknown_extension_falls_back_to_sniffing() {
        let loc = ModelLocator::new("blob:model.bin");
        assert_eq!(
            ModelFormat::detect(&loc, b"v 1 2 3\n"),
            Some(ModelFormat::Obj)
        );
    }
}
