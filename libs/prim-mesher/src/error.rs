//! # Mesher Errors
//!
//! Error types for profile construction and extrusion.
//!
//! ## Error Policy
//!
//! - Parameters are validated once, at the bottom layer (angle sampling)
//! - Failures surface as explicit errors, never as partial profiles

use thiserror::Error;

/// Errors that can occur while generating a primitive mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MesherError {
    /// A profile ring was requested with no sides.
    #[error("number of sides not greater than zero: {sides}")]
    InvalidSides { sides: i32 },

    /// The stop angle does not lie after the start angle.
    #[error("stop angle {stop} not greater than start angle {start}")]
    InvalidAngleRange { start: f64, stop: f64 },

    /// A circular path cannot be sampled with the given step count.
    #[error("steps per revolution must be positive: {steps}")]
    InvalidStepsPerRevolution { steps: i32 },

    /// A path parameter is NaN or infinite.
    #[error("path parameter {name} is not finite: {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    /// A face lookup referenced a face that does not exist.
    #[error("face index {index} out of range (face count: {count})")]
    FaceIndexOutOfRange { index: usize, count: usize },
}

/// Result type alias for mesher operations.
pub type MesherResult<T> = Result<T, MesherError>;
