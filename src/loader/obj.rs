//! Wavefront OBJ reader.

use std::io::Cursor;
use std::path::Path;

use glam::Vec3;

use crate::error::ViewerError;
use crate::scene::{AssetContainer, Material, Mesh};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

fn parse_error(e: &tobj::LoadError) -> ViewerError {
    ViewerError::Parse {
        format: "OBJ",
        message: e.to_string(),
    }
}

/// Parse OBJ text. Material libraries next to a local file are read from
/// `base`; without one, meshes come back unmaterialed.
pub(crate) fn parse(
    source: &str,
    bytes: &[u8],
    base: Option<&Path>,
) -> Result<AssetContainer, ViewerError> {
    let mut reader = Cursor::new(bytes);
    let (models, materials) = tobj::load_obj_buf(&mut reader, &load_options(), |mtl| {
        base.map_or(Err(tobj::LoadError::OpenFileFailed), |dir| {
            tobj::load_mtl(dir.join(mtl))
        })
    })
    .map_err(|e| parse_error(&e))?;

    let materials = materials.unwrap_or_else(|e| {
        log::warn!("OBJ {source}: material library unavailable ({e})");
        Vec::new()
    });

    let mut container = AssetContainer::new(source);
    for model in models {
        let mesh = &model.mesh;
        let positions: Vec<Vec3> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();
        let normals: Vec<Vec3> = mesh
            .normals
            .chunks_exact(3)
            .map(|n| Vec3::new(n[0], n[1], n[2]))
            .collect();

        let mut out = Mesh::new(positions, normals, mesh.indices.clone());
        out.material = mesh
            .material_id
            .and_then(|id| materials.get(id))
            .map(convert_material);
        let name = if model.name.is_empty() {
            "object".to_owned()
        } else {
            model.name
        };
        let _ = container.push_mesh(name, out);
    }
    log::debug!("OBJ {source}: {} meshes", container.mesh_count());
    Ok(container)
}

fn convert_material(m: &tobj::Material) -> Material {
    Material {
        name: m.name.clone(),
        base_color: m.diffuse.unwrap_or([0.8, 0.8, 0.8]),
        alpha: m.dissolve.unwrap_or(1.0),
        double_sided: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "# unit quad
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn triangulates_faces() {
        let container = parse("quad.obj", QUAD.as_bytes(), None).unwrap();
        assert_eq!(container.mesh_count(), 1);
        let node = &container.nodes()[0];
        assert_eq!(node.name, "quad");
        let mesh = node.mesh.as_ref().unwrap();
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.normals.len(), 4);
        assert!(mesh.material.is_none());
    }

    #[test]
    fn splits_objects() {
        let text = "o a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no b\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n";
        let container = parse("two.obj", text.as_bytes(), None).unwrap();
        assert_eq!(container.mesh_count(), 2);
        assert_eq!(container.vertex_count(), 6);
    }

    #[test]
    fn missing_material_library_is_not_fatal() {
        let text = format!("mtllib missing.mtl\nusemtl red\n{QUAD}");
        let container = parse("quad.obj", text.as_bytes(), None).unwrap();
        assert_eq!(container.mesh_count(), 1);
    }

    #[test]
    fn reads_sibling_material_library() {
        let dir = std::env::temp_dir().join(format!("orbitview_obj_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("red.mtl"), "newmtl red\nKd 1 0 0\nd 0.25\n").unwrap();

        let text = format!("mtllib red.mtl\n{QUAD}").replace("f 1", "usemtl red\nf 1");
        let container = parse("quad.obj", text.as_bytes(), Some(&dir)).unwrap();
        let material = container.nodes()[0]
            .mesh
            .as_ref()
            .and_then(|m| m.material.clone())
            .unwrap();
        assert_eq!(material.name, "red");
        assert_eq!(material.base_color, [1.0, 0.0, 0.0]);
        assert!((material.alpha - 0.25).abs() < 1e-6);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
