//! # Configuration Constants
//!
//! Centralized constants for the prim mesher. Every tuned literal used by
//! the profile builder, the two extrusion algorithms and the geometry
//! driver is defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Profile**: Side counts, scale factors, clamp limits
//! - **Path**: Extrusion defaults and step-count heuristics
//! - **Hollow**: Per-shape hollow corrections
//! - **Rendering**: Alpha cut-off and material variations

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Magnitude below which a vector or quaternion is treated as zero when
/// normalizing.
///
/// Normalizing a shorter vector yields the zero vector (or the identity
/// quaternion) instead of NaN.
pub const NORMALIZE_THRESHOLD: f64 = 1e-7;

/// Length below which a profile edge is considered degenerate.
///
/// The closing edge of a full ring joins two coincident vertices (angle 0
/// and angle 1); side strips are never generated for such edges.
pub const DEGENERATE_EDGE_LENGTH: f64 = 1e-6;

/// Tolerance used when walking two rings of different density by angle.
pub const RING_STITCH_TOLERANCE: f64 = 1e-6;

// =============================================================================
// PROFILE CONSTANTS
// =============================================================================

/// Minimum number of sides of a profile ring.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_SIDES;
///
/// let requested = 1;
/// assert_eq!(requested.max(MIN_SIDES), 3);
/// ```
pub const MIN_SIDES: usize = 3;

/// Side count at and above which a profile is treated as curved.
///
/// Rings with fewer sides are flat faceted and use analytic edge normals.
pub const CURVED_MIN_SIDES: usize = 5;

/// Side count of the circle profile.
pub const CIRCLE_SIDES: usize = 24;

/// Scale applied to unit-circle samples so a profile spans one unit.
pub const PROFILE_SCALE: f64 = 0.5;

/// Scale applied to square profiles.
///
/// Square vertices sit on the corners, `sqrt(2)` further from the centre
/// than the side midpoints.
pub const SQUARE_PROFILE_SCALE: f64 = 0.707;

/// Smallest allowed profile end (fraction of a turn).
pub const MIN_PROFILE_END: f64 = 0.02;

/// Smallest allowed span between profile start and end.
pub const MIN_PROFILE_SPAN: f64 = 0.02;

/// Largest hollow fraction.
pub const MAX_HOLLOW: f64 = 0.99;

/// Hollow fractions at or below this value produce a solid profile.
pub const MIN_HOLLOW: f64 = 0.001;

// =============================================================================
// PATH CONSTANTS
// =============================================================================

/// Default number of path steps per revolution for circular extrusion.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_STEPS_PER_REVOLUTION;
///
/// let step_size = std::f64::consts::TAU / DEFAULT_STEPS_PER_REVOLUTION as f64;
/// assert!(step_size > 0.26 && step_size < 0.27);
/// ```
pub const DEFAULT_STEPS_PER_REVOLUTION: i32 = 24;

/// Default hole size along X for circular paths (`pathScaleX` of 1).
pub const DEFAULT_HOLE_SIZE_X: f64 = 1.0;

/// Default hole size along Y for circular paths.
pub const DEFAULT_HOLE_SIZE_Y: f64 = 0.25;

/// Smallest span between path cut begin and end.
pub const MIN_PATH_SPAN: f64 = 0.02;

/// Smallest number of revolutions of a circular path.
pub const MIN_REVOLUTIONS: f64 = 1.0;

/// Largest number of revolutions of a circular path, the top of the stored
/// prim encoding's range.
pub const MAX_REVOLUTIONS: f64 = 4.0;

/// Distance from the path end, as a fraction of one path step, within which
/// a layer snaps onto the end.
pub const END_LAYER_TOLERANCE: f64 = 0.01;

/// Total twist (radians) above which extra steps are added.
pub const TWIST_STEP_THRESHOLD: f64 = 0.01;

/// Extra linear steps per radian of total twist.
pub const LINEAR_TWIST_STEPS_PER_RADIAN: f64 = 3.66;

/// Cap on the extra linear steps added for twist.
pub const MAX_TWIST_STEPS: usize = 256;

/// Taper magnitude above which prisms get extra vertical resolution.
pub const PRISM_TAPER_THRESHOLD: f64 = 0.01;

/// Linear steps per unit of path length for tapered prisms.
pub const PRISM_TAPER_STEPS: f64 = 4.5;

/// Total twist, in multiples of pi, above which circular steps double.
pub const CIRCULAR_TWIST_DOUBLE_FIRST: f64 = 1.5;

/// Total twist, in multiples of pi, above which circular steps double again.
pub const CIRCULAR_TWIST_DOUBLE_SECOND: f64 = 3.0;

/// Taper magnitude below which circular paths ignore taper.
pub const CIRCULAR_TAPER_THRESHOLD: f64 = 0.01;

/// Radius offset above which the circular path shrinks along its length.
pub const RADIUS_OFFSET_THRESHOLD: f64 = 0.001;

/// Fraction of the Y top shear subtracted from the circular path angles.
pub const TOP_SHEAR_Y_ANGLE_FACTOR: f64 = 0.9;

// =============================================================================
// HOLLOW CORRECTIONS
// =============================================================================

/// Largest hollow of a shape whose hollow ring is a different polygon.
pub const MAX_MIXED_HOLLOW: f64 = 0.7;

/// Hollow correction for a square hole in a prism, or a non-square hole in
/// a box.
pub const HOLLOW_SQUARE_CORRECTION: f64 = 0.707;

/// Hollow correction for a round or triangular hole in a prism.
pub const HOLLOW_PRISM_CORRECTION: f64 = 0.5;

/// Hollow correction for a square hole in a linear cylinder.
pub const HOLLOW_CYLINDER_SQUARE_CORRECTION: f64 = 1.414;

// =============================================================================
// RENDERING CONSTANTS
// =============================================================================

/// Faces whose colour alpha is at or below this value are not emitted.
pub const TRANSPARENT_ALPHA_CUTOFF: f32 = 0.11;

/// Default colour when a prim carries none (opaque white).
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Material name used when a material override cannot be honoured.
pub const FALLBACK_MATERIAL: &str = "LitTextured";

/// Material-type bit marking a face as fullbright (unlit).
pub const MATERIAL_TYPE_FULLBRIGHT: u8 = 0x20;

/// Material variation bit for fullbright faces.
pub const VARIATION_FULLBRIGHT: usize = 1;

/// Material variation of opaque vertex-coloured faces.
pub const VARIATION_VERTEX_COLOR: usize = 6;

/// Material variation of translucent vertex-coloured faces.
pub const VARIATION_VERTEX_COLOR_ALPHA: usize = 8;

/// Material name suffix per variation, indexed by variation number.
///
/// # Example
///
/// ```rust
/// use config::constants::{MATERIAL_SUFFIXES, VARIATION_FULLBRIGHT, VARIATION_VERTEX_COLOR};
///
/// assert_eq!(MATERIAL_SUFFIXES[VARIATION_VERTEX_COLOR | VARIATION_FULLBRIGHT], "fbvcol");
/// ```
pub const MATERIAL_SUFFIXES: [&str; 10] = [
    "",
    "fb",
    "add",
    "fbadd",
    "alpha",
    "fbalpha",
    "vcol",
    "fbvcol",
    "vcolalpha",
    "fbvcolalpha",
];

// =============================================================================
// RUNTIME CONFIGURATION
// =============================================================================

/// Tunable settings of a geometry build.
///
/// # Examples
/// ```
/// use config::constants::MesherConfig;
/// let config = MesherConfig::default();
/// assert_eq!(config.steps_per_revolution, 24);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MesherConfig {
    /// Path steps per revolution for circular extrusion.
    pub steps_per_revolution: i32,
    /// Faces with alpha at or below this value are skipped.
    pub alpha_cutoff: f32,
}

impl MesherConfig {
    /// Builds a configuration, validating both values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::MesherConfig;
    /// let cfg = MesherConfig::new(12, 0.11).expect("valid config");
    /// assert_eq!(cfg.steps_per_revolution, 12);
    /// assert!(MesherConfig::new(0, 0.11).is_err());
    /// ```
    pub fn new(steps_per_revolution: i32, alpha_cutoff: f32) -> Result<Self, ConfigError> {
        let config = Self {
            steps_per_revolution,
            alpha_cutoff,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks a configuration whose fields were set directly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps_per_revolution < 1 {
            return Err(ConfigError::InvalidStepsPerRevolution(
                self.steps_per_revolution,
            ));
        }
        if !(0.0..=1.0).contains(&self.alpha_cutoff) {
            return Err(ConfigError::InvalidAlphaCutoff(self.alpha_cutoff));
        }
        Ok(())
    }
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            alpha_cutoff: TRANSPARENT_ALPHA_CUTOFF,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when the circular path would have no steps.
    InvalidStepsPerRevolution(i32),
    /// Raised when the alpha cut-off lies outside `[0, 1]`.
    InvalidAlphaCutoff(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidStepsPerRevolution(value) => {
                write!(f, "steps_per_revolution must be >= 1: {value}")
            }
            ConfigError::InvalidAlphaCutoff(value) => {
                write!(f, "alpha_cutoff must lie in [0, 1]: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

#[cfg(test)]
mod tests;
