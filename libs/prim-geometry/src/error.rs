//! # Geometry Errors
//!
//! Error types for the geometry-build driver.

use config::constants::ConfigError;
use prim_mesher::MesherError;
use thiserror::Error;

/// Errors that abandon a prim's geometry build.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Profile construction or extrusion failed.
    #[error("Mesher error: {0}")]
    Mesher(#[from] MesherError),

    /// A generated face has a NaN or infinite vertex.
    #[error("NaN or infinite coordinate in face {face}")]
    NonFiniteCoordinate { face: usize },

    /// The build configuration is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Result type alias for geometry builds.
pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesher_error_converts() {
        let err: GeometryError = MesherError::InvalidSides { sides: 0 }.into();
        assert!(matches!(err, GeometryError::Mesher(_)));
        assert!(err.to_string().contains("sides"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: GeometryError = ConfigError::InvalidStepsPerRevolution(0).into();
        assert!(err.to_string().contains("steps_per_revolution"));
    }

    #[test]
    fn test_non_finite_names_face() {
        let err = GeometryError::NonFiniteCoordinate { face: 42 };
        assert!(err.to_string().contains("42"));
    }
}
