//! # Config Crate
//!
//! Centralized configuration constants for the primitive mesh pipeline.
//! All magic numbers and tuned parameters of the prim mesher live here so
//! that the extrusion code reads declaratively and the legacy values stay
//! in one place.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_STEPS_PER_REVOLUTION, MAX_HOLLOW, approx_zero};
//!
//! let requested_hollow: f64 = 1.5;
//! let hollow = requested_hollow.min(MAX_HOLLOW);
//! assert_eq!(hollow, 0.99);
//!
//! assert_eq!(DEFAULT_STEPS_PER_REVOLUTION, 24);
//! assert!(approx_zero(1e-11));
//! ```
//!
//! ## Contents
//!
//! - Angle-table sizes, clamp limits and step heuristics for the extruders
//! - Hollow corrections and default path parameters of the prim encoding
//! - Render cut-offs and material suffixes used by the geometry driver
//! - [`constants::MesherConfig`], the runtime knobs a caller may change

pub mod constants;

#[cfg(test)]
mod tests;
