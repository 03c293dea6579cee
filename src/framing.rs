//! Load-time normalization: scale a freshly loaded model so its largest
//! axis spans a fixed size, re-center it on the origin, and size the orbit
//! camera around the result.
//!
//! Models arrive at arbitrary scale and origin. Rather than touching each
//! mesh's transform, every renderable mesh is re-parented under a single
//! pivot node (keeping its world transform) and the pivot alone carries
//! the uniform scale and translation.

use std::collections::HashSet;

use glam::{DVec3, Mat4, Quat, Vec3};

use crate::camera::OrbitCamera;
use crate::error::ViewerError;
use crate::options::FramingOptions;
use crate::scene::{Aabb, NodeId, RenderableMesh, Scene};

/// Name given to the synthetic pivot node.
pub const PIVOT_NAME: &str = "__model_pivot__";

/// Numbers produced by a successful framing.
#[derive(Debug, Clone, PartialEq)]
pub struct FramingReport {
    /// The pivot that now parents every renderable mesh.
    pub pivot: NodeId,
    /// Uniform scale applied to the pivot.
    pub scale: f32,
    /// Translation applied to the pivot.
    pub pivot_position: Vec3,
    /// World bounds before scaling.
    pub source_bounds: Aabb,
    /// World bounds after scaling and re-centering.
    pub framed_bounds: Aabb,
    /// Orbit radius derived from the framed bounds.
    pub radius: f32,
    /// Upper radius limit set on the camera.
    pub upper_radius_limit: f32,
    /// Far plane set on the camera.
    pub far: f32,
}

/// How the normalization pass ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FramingOutcome {
    /// The model was scaled, centered and framed.
    Framed(FramingReport),
    /// Every renderable mesh collapses to a single point; no scaling.
    Degenerate {
        /// The pivot the meshes were grouped under.
        pivot: NodeId,
    },
    /// Nothing renderable was loaded; the camera fell back to defaults.
    Empty,
}

/// The subset of `candidates` whose meshes have at least one vertex.
#[must_use]
pub fn renderable_meshes(scene: &Scene, candidates: &[NodeId]) -> Vec<NodeId> {
    candidates
        .iter()
        .copied()
        .filter(|id| {
            scene
                .graph()
                .node(*id)
                .and_then(|n| n.mesh.as_ref())
                .is_some_and(|m| m.vertex_count() > 0)
        })
        .collect()
}

/// Center and largest extent of `bounds`, computed in f64 so boxes near
/// the f32 range limit still get a finite size.
fn measure(bounds: &Aabb) -> Result<(DVec3, f64), ViewerError> {
    let min = bounds.min.as_dvec3();
    let max = bounds.max.as_dvec3();
    if !min.is_finite() || !max.is_finite() {
        return Err(ViewerError::Framing(format!(
            "non-finite model bounds {bounds:?}"
        )));
    }
    let center = (min + max) * 0.5;
    let max_dimension = (max - min).max_element();
    if !center.as_vec3().is_finite() {
        return Err(ViewerError::Framing(format!(
            "model center {center} outside f32 range"
        )));
    }
    Ok((center, max_dimension))
}

/// Run the normalization pass over `renderable` (see
/// [`renderable_meshes`]).
///
/// # Errors
///
/// Returns [`ViewerError::Framing`] when the meshes have no usable bounds
/// (for example non-finite vertex positions). The scene and camera are
/// left untouched in that case.
pub fn normalize(
    scene: &mut Scene,
    camera: &mut OrbitCamera,
    renderable: &[NodeId],
    options: &FramingOptions,
) -> Result<FramingOutcome, ViewerError> {
    if renderable.is_empty() {
        log::warn!(
            "no renderable meshes; using default framing (radius {})",
            options.fallback_radius
        );
        camera.set_target(Vec3::ZERO);
        camera.set_radius(options.fallback_radius);
        return Ok(FramingOutcome::Empty);
    }

    let graph = scene.graph_mut();
    graph.update_world_matrices();
    let source_bounds = graph
        .bounds_of(renderable.iter().copied(), |_, _| true)
        .ok_or_else(|| {
            ViewerError::Framing("renderable meshes have no bounds".into())
        })?;
    let (center, max_dimension) = measure(&source_bounds)?;
    let scale = if max_dimension > 0.0 {
        let scale = (f64::from(options.target_size) / max_dimension) as f32;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ViewerError::Framing(format!(
                "cannot scale extent {max_dimension} to {}",
                options.target_size
            )));
        }
        Some(scale)
    } else {
        None
    };

    // No pivot exists for rejected bounds.
    let pivot = graph.add_node(PIVOT_NAME, Mat4::IDENTITY, None, None);
    for &id in renderable {
        if !graph.set_parent(id, Some(pivot), true) {
            log::debug!("skipping stale mesh node {id:?}");
        }
    }
    graph.update_world_matrices();
    let members: HashSet<NodeId> = renderable.iter().copied().collect();

    let Some(scale) = scale else {
        log::info!("model collapses to a point at {center}; skipping scale");
        camera.set_target(Vec3::ZERO);
        camera.set_radius(options.fallback_radius);
        return Ok(FramingOutcome::Degenerate { pivot });
    };

    let pivot_position = -(center * f64::from(scale)).as_vec3();
    let max_dimension = max_dimension as f32;
    graph.set_local(
        pivot,
        Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            Quat::IDENTITY,
            pivot_position,
        ),
    );
    let framed_bounds = graph
        .hierarchy_bounds(pivot, |id, _| members.contains(&id))
        .unwrap_or(source_bounds);

    let radius = (framed_bounds.max_dimension() * options.radius_factor)
        .max(options.min_radius);
    let upper_radius_limit = (radius * options.upper_limit_factor)
        .max(radius + options.upper_limit_padding);
    let far = upper_radius_limit * options.far_factor;

    camera.lower_radius_limit = options.near_limit;
    camera.upper_radius_limit = upper_radius_limit;
    camera.znear = options.near_limit;
    camera.zfar = far;

    camera.set_target(Vec3::ZERO);
    camera.set_radius(radius);
    if options.auto_frame {
        camera.zoom_on(&framed_bounds, false);
        // zoom_on rewrites the far plane
        camera.zfar = far;
    }

    log::info!(
        "framed model: max dimension {max_dimension:.4} -> {:.4} \
         (scale {scale:.4}), radius {radius:.3}",
        framed_bounds.max_dimension()
    );

    Ok(FramingOutcome::Framed(FramingReport {
        pivot,
        scale,
        pivot_position,
        source_bounds,
        framed_bounds,
        radius,
        upper_radius_limit,
        far,
    }))
}
