//! glTF 2.0 reader (JSON and binary containers).

use std::path::Path;

use glam::{Mat4, Vec3};
use gltf::mesh::Mode;

use super::format::ModelFormat;
use crate::error::ViewerError;
use crate::scene::{AssetContainer, AssetNode, Material, Mesh};

fn parse_error(format: ModelFormat, e: &gltf::Error) -> ViewerError {
    ViewerError::Parse {
        format: format.name(),
        message: e.to_string(),
    }
}

/// Parse a glTF/GLB payload. `base` is the directory used to resolve
/// external buffer URIs; payloads fetched over HTTP must be self-contained.
pub(crate) fn parse(
    source: &str,
    bytes: &[u8],
    base: Option<&Path>,
    format: ModelFormat,
) -> Result<AssetContainer, ViewerError> {
    let gltf::Gltf { document, blob } =
        gltf::Gltf::from_slice(bytes).map_err(|e| parse_error(format, &e))?;
    let buffers =
        gltf::import_buffers(&document, base, blob).map_err(|e| parse_error(format, &e))?;

    let mut container = AssetContainer::new(source);
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next());
    match scene {
        Some(scene) => {
            for node in scene.nodes() {
                push_node(&mut container, &node, None, &buffers);
            }
        }
        // Scene-less documents still carry meshes.
        None => {
            for mesh in document.meshes() {
                for (i, primitive) in mesh.primitives().enumerate() {
                    if let Some(m) = read_primitive(&primitive, &buffers) {
                        let _ = container.push_mesh(primitive_name(&mesh, i), m);
                    }
                }
            }
        }
    }
    log::debug!(
        "glTF {source}: {} nodes, {} meshes",
        container.nodes().len(),
        container.mesh_count()
    );
    Ok(container)
}

fn primitive_name(mesh: &gltf::Mesh<'_>, index: usize) -> String {
    let base = mesh
        .name()
        .map_or_else(|| format!("mesh{}", mesh.index()), str::to_owned);
    format!("{base}.primitive{index}")
}

fn push_node(
    container: &mut AssetContainer,
    node: &gltf::Node<'_>,
    parent: Option<usize>,
    buffers: &[gltf::buffer::Data],
) {
    let name = node
        .name()
        .map_or_else(|| format!("node{}", node.index()), str::to_owned);
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());

    let mut meshes: Vec<(String, Mesh)> = Vec::new();
    if let Some(mesh) = node.mesh() {
        for (i, primitive) in mesh.primitives().enumerate() {
            if let Some(m) = read_primitive(&primitive, buffers) {
                meshes.push((primitive_name(&mesh, i), m));
            }
        }
    }

    // A single primitive lives on the node itself; several become children.
    let own_mesh = if meshes.len() == 1 {
        meshes.pop().map(|(_, m)| m)
    } else {
        None
    };
    let index = container.push(AssetNode {
        name,
        local,
        parent,
        mesh: own_mesh,
    });
    for (child_name, mesh) in meshes {
        let _ = container.push(AssetNode {
            name: child_name,
            local: Mat4::IDENTITY,
            parent: Some(index),
            mesh: Some(mesh),
        });
    }

    for child in node.children() {
        push_node(container, &child, Some(index), buffers);
    }
}

fn read_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
) -> Option<Mesh> {
    let mode = primitive.mode();
    if matches!(
        mode,
        Mode::Points | Mode::Lines | Mode::LineLoop | Mode::LineStrip
    ) {
        log::debug!("skipping non-triangle primitive ({mode:?})");
        return None;
    }

    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
    let positions: Vec<Vec3> = reader.read_positions()?.map(Vec3::from).collect();
    let normals: Vec<Vec3> = reader
        .read_normals()
        .map(|n| n.map(Vec3::from).collect())
        .unwrap_or_default();
    let raw_indices: Vec<u32> = reader.read_indices().map_or_else(
        || (0..positions.len() as u32).collect(),
        |i| i.into_u32().collect(),
    );
    let indices = match mode {
        Mode::TriangleStrip => strip_to_list(&raw_indices),
        Mode::TriangleFan => fan_to_list(&raw_indices),
        _ => raw_indices,
    };

    let mut mesh = Mesh::new(positions, normals, indices);
    let material = primitive.material();
    if let Some(index) = material.index() {
        let [r, g, b, a] = material.pbr_metallic_roughness().base_color_factor();
        mesh.material = Some(Material {
            name: material
                .name()
                .map_or_else(|| format!("material{index}"), str::to_owned),
            base_color: [r, g, b],
            alpha: a,
            double_sided: material.double_sided(),
        });
    }
    Some(mesh)
}

fn strip_to_list(strip: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(strip.len().saturating_sub(2) * 3);
    for (i, w) in strip.windows(3).enumerate() {
        if i % 2 == 0 {
            out.extend_from_slice(&[w[0], w[1], w[2]]);
        } else {
            out.extend_from_slice(&[w[1], w[0], w[2]]);
        }
    }
    out
}

fn fan_to_list(fan: &[u32]) -> Vec<u32> {
    let Some((&hub, rest)) = fan.split_first() else {
        return Vec::new();
    };
    rest.windows(2)
        .flat_map(|w| [hub, w[0], w[1]])
        .collect()
}
