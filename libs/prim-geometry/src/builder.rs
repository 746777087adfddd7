//! # Geometry Builder
//!
//! Turns a prim shape and its face materials into renderer-ready triangle
//! batches.
//!
//! ## Pipeline
//!
//! ```text
//! PrimShape → PrimMesh (extruded) → finite check → Submesh per material run
//! ```
//!
//! A build either succeeds as a whole or yields nothing; no partial
//! geometry is returned.

use config::constants::MesherConfig;
use glam::{Vec2, Vec3};
use prim_mesher::{PrimMesh, ViewerFace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::material::{Color, FaceMaterials, UvTransform};
use crate::shape::{PathKind, PrimShape};
use crate::uv::transform_uv;

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// One vertex of a render batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub color: [f32; 4],
}

/// A triangle list drawn with one material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submesh {
    pub material: String,
    pub vertices: Vec<RenderVertex>,
    pub indices: Vec<u32>,
}

impl Submesh {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            ..Self::default()
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_face(&mut self, face: &ViewerFace, color: Color, transform: &UvTransform) {
        for i in 0..3 {
            let uv = transform_uv(face.uv[i], transform);
            self.indices.push(self.vertices.len() as u32);
            self.vertices.push(RenderVertex {
                position: face.v[i].as_vec3(),
                normal: face.n[i].as_vec3(),
                uv: Vec2::new(uv.u as f32, uv.v as f32),
                color: color.to_array(),
            });
        }
    }
}

/// Render batches of one prim, in face order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimGeometry {
    pub submeshes: Vec<Submesh>,
}

impl PrimGeometry {
    pub fn is_empty(&self) -> bool {
        self.submeshes.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(Submesh::triangle_count).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.vertices.len()).sum()
    }

    /// The batch for `material`: the last one if it matches, else a new one.
    fn submesh_for(&mut self, material: String) -> &mut Submesh {
        match self.submeshes.last() {
            Some(last) if last.material == material => {}
            _ => self.submeshes.push(Submesh::new(material)),
        }
        let last = self.submeshes.len() - 1;
        &mut self.submeshes[last]
    }
}

// =============================================================================
// BUILD
// =============================================================================

/// Decodes and extrudes a prim shape.
///
/// # Errors
///
/// Any profile or extrusion failure.
///
/// # Examples
/// ```
/// use config::constants::MesherConfig;
/// use prim_geometry::{build_prim_mesh, PrimShape};
///
/// let mesh = build_prim_mesh(&PrimShape::cube(), &MesherConfig::default()).unwrap();
/// assert_eq!(mesh.viewer_faces.len(), 12);
/// ```
pub fn build_prim_mesh(shape: &PrimShape, config: &MesherConfig) -> GeometryResult<PrimMesh> {
    let mut mesh = shape.prim_mesh(config);
    match shape.path_kind() {
        PathKind::Straight => mesh.extrude_linear()?,
        PathKind::Circular => mesh.extrude_circular()?,
    }
    Ok(mesh)
}

/// Rejects faces with a NaN or infinite vertex position.
///
/// # Errors
///
/// `NonFiniteCoordinate` naming the first offending face.
pub fn check_viewer_faces(faces: &[ViewerFace]) -> GeometryResult<()> {
    match faces
        .iter()
        .position(|f| !f.v.iter().all(|c| c.is_finite()))
    {
        Some(face) => Err(GeometryError::NonFiniteCoordinate { face }),
        None => Ok(()),
    }
}

/// Builds the render batches of a prim.
///
/// Consecutive faces sharing a material go into one [`Submesh`]; faces
/// whose colour alpha is at or below the configured cut-off are skipped.
///
/// # Errors
///
/// An invalid `config`, a mesher failure, or a non-finite vertex. Nothing
/// is returned for a failed build.
pub fn create_prim_geometry(
    shape: &PrimShape,
    materials: &FaceMaterials,
    config: &MesherConfig,
) -> GeometryResult<PrimGeometry> {
    config.validate()?;
    let mesh = build_prim_mesh(shape, config)?;
    check_viewer_faces(&mesh.viewer_faces)?;

    let mut geometry = PrimGeometry::default();
    let mut skipped = 0;
    for face in &mesh.viewer_faces {
        let facet = face.prim_face_number;
        let color = materials.color(facet);
        if color.a <= config.alpha_cutoff {
            skipped += 1;
            continue;
        }

        let material = materials.material_name(facet, color);
        let transform = materials.uv_transform(facet);
        geometry
            .submesh_for(material)
            .push_face(face, color, &transform);
    }

    if skipped > 0 {
        log::debug!("skipped {skipped} transparent prim faces");
    }
    log::debug!(
        "prim geometry: {} triangles in {} submeshes",
        geometry.triangle_count(),
        geometry.submeshes.len()
    );
    Ok(geometry)
}

/// Builds a prim's geometry, logging and discarding any failure.
pub fn build_geometry_logged(
    shape: &PrimShape,
    materials: &FaceMaterials,
    config: &MesherConfig,
) -> Option<PrimGeometry> {
    match create_prim_geometry(shape, materials, config) {
        Ok(geometry) => Some(geometry),
        Err(err) => {
            log::error!("Skipping prim geometry creation: {err}");
            None
        }
    }
}

/// Builds many prims in parallel. Results keep the input order.
pub fn build_many(
    prims: &[(PrimShape, FaceMaterials)],
    config: &MesherConfig,
) -> Vec<GeometryResult<PrimGeometry>> {
    let results: Vec<_> = prims
        .par_iter()
        .map(|(shape, materials)| create_prim_geometry(shape, materials, config))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    log::debug!("built {} prims, {failed} failed", results.len());
    results
}

#[cfg(test)]
mod tests;
