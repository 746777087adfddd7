//! # Prim Mesher
//!
//! Parametric primitive mesh generation. A prim is a 2D profile swept along
//! a path; the same small parameter set describes boxes, cylinders, prisms,
//! tori, tubes and rings.
//!
//! ## Architecture
//!
//! ```text
//! AngleList (ring samples) → Profile (cross-section) → PrimMesh (extrusion)
//! ```
//!
//! ## Algorithms
//!
//! - **Angle lists**: exact tables for 3, 4 and 24 sides, stepped sampling
//!   otherwise, with cut ends moved onto the polygon edges
//! - **Profiles**: fan or stitched caps, hollows, cut faces, facet numbering
//! - **Extrusion**: linear (box, cylinder, prism) and circular (torus, tube,
//!   ring) sweeps with taper, twist, shear, skew and radius offset
//!
//! ## Usage
//!
//! ```rust
//! use prim_mesher::PrimMesh;
//!
//! let mut cylinder = PrimMesh::new(24, 0.0, 1.0, 0.0, 24);
//! cylinder.extrude_linear()?;
//! assert_eq!(cylinder.num_prim_faces, 3);
//! # Ok::<(), prim_mesher::MesherError>(())
//! ```

pub mod angle_list;
pub mod error;
pub mod extrude;
pub mod face;
pub mod math;
pub mod profile;

pub use angle_list::AngleList;
pub use error::{MesherError, MesherResult};
pub use extrude::PrimMesh;
pub use face::{Face, ViewerFace};
pub use math::{Coord, Quat, UvCoord};
pub use profile::{EdgeKind, Profile, SideEdge, TOP_FACE_NUMBER};
