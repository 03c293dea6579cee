//! STL reader (binary and ASCII).

use std::io::Cursor;

use glam::Vec3;

use crate::error::ViewerError;
use crate::scene::{AssetContainer, Mesh};

/// Parse an STL payload into a single flat-shaded mesh. STL carries no
/// material, so the mesh is left unmaterialed.
pub(crate) fn parse(source: &str, bytes: &[u8]) -> Result<AssetContainer, ViewerError> {
    let mut reader = Cursor::new(bytes);
    let indexed = stl_io::read_stl(&mut reader).map_err(|e| ViewerError::Parse {
        format: "STL",
        message: e.to_string(),
    })?;

    let vertex = |i: usize| {
        indexed
            .vertices
            .get(i)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    };

    let mut positions = Vec::with_capacity(indexed.faces.len() * 3);
    let mut normals = Vec::with_capacity(indexed.faces.len() * 3);
    for face in &indexed.faces {
        let [Some(a), Some(b), Some(c)] = face.vertices.map(vertex) else {
            log::debug!("STL {source}: skipping face with out-of-range vertex");
            continue;
        };
        let stored = Vec3::new(face.normal[0], face.normal[1], face.normal[2]);
        let normal = if stored.length_squared() > f32::EPSILON {
            stored.normalize()
        } else {
            (b - a).cross(c - a).try_normalize().unwrap_or(Vec3::Y)
        };
        positions.extend_from_slice(&[a, b, c]);
        normals.extend_from_slice(&[normal; 3]);
    }

    let indices = (0..positions.len() as u32).collect();
    let mut container = AssetContainer::new(source);
    let name = source
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("stl");
    let _ = container.push_mesh(name, Mesh::new(positions, normals, indices));
    log::debug!(
        "STL {source}: {} triangles",
        indexed.faces.len()
    );
    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII: &str = "solid tri
facet normal 0 0 0
  outer loop
    vertex 0 0 0
    vertex 2 0 0
    vertex 0 4 0
  endloop
endfacet
endsolid tri
";

    fn binary(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
        let mut bytes = vec![0u8; 80];
        bytes.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for tri in triangles {
            bytes.extend_from_slice(&[0u8; 12]);
            for v in tri {
                for c in v {
                    bytes.extend_from_slice(&c.to_le_bytes());
                }
            }
            bytes.extend_from_slice(&[0u8; 2]);
        }
        bytes
    }

    #[test]
    fn ascii_triangle_gets_computed_normal() {
        let container = parse("models/tri.stl", ASCII.as_bytes()).unwrap();
        assert_eq!(container.nodes()[0].name, "tri.stl");
        let mesh = container.nodes()[0].mesh.as_ref().unwrap();
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert!((mesh.normals[0] - Vec3::Z).length() < 1e-6);
        assert!(mesh.material.is_none());
    }

    #[test]
    fn binary_faces_unrolled() {
        let bytes = binary(&[
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        ]);
        let container = parse("quad.stl", &bytes).unwrap();
        let mesh = container.nodes()[0].mesh.as_ref().unwrap();
        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.indices.len(), 6);
        let bounds = mesh.local_bounds().unwrap();
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn truncated_binary_is_rejected() {
        let mut bytes = binary(&[[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        bytes.truncate(100);
        assert!(matches!(
            parse("bad.stl", &bytes),
            Err(ViewerError::Parse { format: "STL", .. })
        ));
    }
}
