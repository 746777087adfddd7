//! # Prim Geometry
//!
//! Geometry-build driver for parametric prims. Converts stored shape
//! parameters and per-face materials into renderer-ready triangle batches.
//!
//! ## Architecture
//!
//! ```text
//! PrimShape + FaceMaterials → prim-mesher (PrimMesh) → PrimGeometry (Submesh per material)
//! ```
//!
//! All geometry is computed in `f64` by the mesher; vertices are narrowed
//! to `f32` here, at the renderer boundary.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::MesherConfig;
//! use prim_geometry::{create_prim_geometry, FaceMaterials, PrimShape};
//!
//! let geometry = create_prim_geometry(
//!     &PrimShape::cylinder(),
//!     &FaceMaterials::default(),
//!     &MesherConfig::default(),
//! )?;
//! assert_eq!(geometry.submeshes.len(), 1);
//! # Ok::<(), prim_geometry::GeometryError>(())
//! ```

pub mod builder;
pub mod error;
pub mod material;
pub mod shape;
pub mod uv;

pub use builder::{
    build_geometry_logged, build_many, build_prim_mesh, check_viewer_faces,
    create_prim_geometry, PrimGeometry, RenderVertex, Submesh,
};
pub use error::{GeometryError, GeometryResult};
pub use material::{Color, FaceMaterials, MaterialOverride, UvOverride, UvTransform};
pub use shape::{HollowShape, PathKind, PrimShape, ProfileShape};
pub use uv::transform_uv;
