//! # Prim Shapes
//!
//! Stored prim shape parameters and their decoding into an unextruded
//! [`PrimMesh`].
//!
//! Parameters follow the prim storage conventions: `profile_end` and
//! `path_end` are measured back from the end (0 means uncut), path scales
//! lie in `0..2` and twists are in turns.

use config::constants::{MesherConfig, CIRCLE_SIDES, MIN_SIDES};
use prim_mesher::PrimMesh;
use serde::{Deserialize, Serialize};

/// Bits of `profile_curve` holding the profile shape.
pub const PROFILE_SHAPE_MASK: u8 = 0x07;

/// Bits of `profile_curve` holding the hollow shape.
pub const HOLLOW_SHAPE_MASK: u8 = 0xf0;

/// `path_curve` value of a straight path.
pub const PATH_CURVE_LINE: u8 = 0x10;

/// `path_curve` value of a circular path.
pub const PATH_CURVE_CIRCLE: u8 = 0x20;

const SQUARE_SIDES: i32 = 4;

// =============================================================================
// SHAPE CODES
// =============================================================================

/// Outer profile polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileShape {
    Circle,
    Square,
    IsometricTriangle,
    EquilateralTriangle,
    RightTriangle,
    /// Half of a circle; swept around a circular path it makes a sphere.
    HalfCircle,
    Unknown(u8),
}

impl ProfileShape {
    /// Decodes the low bits of a profile curve byte.
    pub fn from_curve(profile_curve: u8) -> Self {
        match profile_curve & PROFILE_SHAPE_MASK {
            0 => Self::Circle,
            1 => Self::Square,
            2 => Self::IsometricTriangle,
            3 => Self::EquilateralTriangle,
            4 => Self::RightTriangle,
            5 => Self::HalfCircle,
            other => Self::Unknown(other),
        }
    }

    /// Side count of the outer ring. Unsupported shapes render as squares.
    pub fn sides(self) -> i32 {
        match self {
            Self::Circle | Self::HalfCircle => CIRCLE_SIDES as i32,
            Self::EquilateralTriangle => MIN_SIDES as i32,
            _ => SQUARE_SIDES,
        }
    }
}

/// Hollow ring polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HollowShape {
    /// Same polygon as the outer ring.
    Same,
    Circle,
    Square,
    Triangle,
    Unknown(u8),
}

impl HollowShape {
    /// Decodes the high bits of a profile curve byte.
    pub fn from_curve(profile_curve: u8) -> Self {
        match profile_curve & HOLLOW_SHAPE_MASK {
            0x00 => Self::Same,
            0x10 => Self::Circle,
            0x20 => Self::Square,
            0x30 => Self::Triangle,
            other => Self::Unknown(other),
        }
    }

    /// Side count of the hollow ring of a profile with `profile_sides`.
    pub fn sides(self, profile_sides: i32) -> i32 {
        match self {
            Self::Circle => CIRCLE_SIDES as i32,
            Self::Square => SQUARE_SIDES,
            Self::Triangle => MIN_SIDES as i32,
            Self::Same | Self::Unknown(_) => profile_sides,
        }
    }
}

/// Which extrusion a path curve selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Straight,
    Circular,
}

impl PathKind {
    pub fn from_curve(path_curve: u8) -> Self {
        if path_curve == PATH_CURVE_LINE {
            Self::Straight
        } else {
            Self::Circular
        }
    }
}

// =============================================================================
// PRIM SHAPE
// =============================================================================

/// Decoded shape parameters of one prim.
///
/// # Examples
/// ```
/// use prim_geometry::{PathKind, PrimShape};
/// let torus = PrimShape::torus();
/// assert_eq!(torus.path_kind(), PathKind::Circular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimShape {
    pub profile_curve: u8,
    pub path_curve: u8,

    pub profile_begin: f64,
    pub profile_end: f64,
    pub profile_hollow: f64,

    pub path_begin: f64,
    pub path_end: f64,
    pub path_scale_x: f64,
    pub path_scale_y: f64,
    pub path_shear_x: f64,
    pub path_shear_y: f64,
    /// Twist at the path start, in turns.
    pub path_twist_begin: f64,
    /// Twist at the path end, in turns.
    pub path_twist: f64,
    pub path_taper_x: f64,
    pub path_taper_y: f64,
    pub path_radius_offset: f64,
    pub path_revolutions: f64,
    pub path_skew: f64,
}

impl Default for PrimShape {
    /// An uncut unit box.
    fn default() -> Self {
        Self {
            profile_curve: 1,
            path_curve: PATH_CURVE_LINE,
            profile_begin: 0.0,
            profile_end: 0.0,
            profile_hollow: 0.0,
            path_begin: 0.0,
            path_end: 0.0,
            path_scale_x: 1.0,
            path_scale_y: 1.0,
            path_shear_x: 0.0,
            path_shear_y: 0.0,
            path_twist_begin: 0.0,
            path_twist: 0.0,
            path_taper_x: 0.0,
            path_taper_y: 0.0,
            path_radius_offset: 0.0,
            path_revolutions: 1.0,
            path_skew: 0.0,
        }
    }
}

impl PrimShape {
    pub fn cube() -> Self {
        Self::default()
    }

    pub fn cylinder() -> Self {
        Self {
            profile_curve: 0,
            ..Self::default()
        }
    }

    pub fn prism() -> Self {
        Self {
            profile_curve: 3,
            ..Self::default()
        }
    }

    pub fn sphere() -> Self {
        Self {
            profile_curve: 5,
            path_curve: PATH_CURVE_CIRCLE,
            ..Self::default()
        }
    }

    /// Circle swept around a circular path with a quarter-size hole.
    pub fn torus() -> Self {
        Self {
            profile_curve: 0,
            path_curve: PATH_CURVE_CIRCLE,
            path_scale_y: 1.75,
            ..Self::default()
        }
    }

    pub fn tube() -> Self {
        Self {
            profile_curve: 1,
            ..Self::torus()
        }
    }

    pub fn ring() -> Self {
        Self {
            profile_curve: 3,
            ..Self::torus()
        }
    }

    pub fn profile_shape(&self) -> ProfileShape {
        ProfileShape::from_curve(self.profile_curve)
    }

    pub fn hollow_shape(&self) -> HollowShape {
        HollowShape::from_curve(self.profile_curve)
    }

    pub fn path_kind(&self) -> PathKind {
        PathKind::from_curve(self.path_curve)
    }

    /// Builds the unextruded mesh these parameters describe.
    ///
    /// Straight paths turn path scale into taper; circular paths turn it
    /// into hole size.
    ///
    /// # Examples
    /// ```
    /// use config::constants::MesherConfig;
    /// use prim_geometry::PrimShape;
    ///
    /// let mesh = PrimShape::sphere().prim_mesh(&MesherConfig::default());
    /// assert_eq!(mesh.sides, 24);
    /// assert_eq!(mesh.profile_start, 0.5);
    /// ```
    pub fn prim_mesh(&self, config: &MesherConfig) -> PrimMesh {
        let profile = self.profile_shape();
        let sides = profile.sides();
        let hollow_sides = self.hollow_shape().sides(sides);

        let mut profile_begin = self.profile_begin;
        let mut profile_end = 1.0 - self.profile_end;
        if profile == ProfileShape::HalfCircle {
            profile_begin = 0.5 * profile_begin + 0.5;
            profile_end = 0.5 * profile_end + 0.5;
        }

        let mut mesh = PrimMesh::new(
            sides,
            profile_begin,
            profile_end,
            self.profile_hollow,
            hollow_sides,
        );
        mesh.top_shear_x = self.path_shear_x;
        mesh.top_shear_y = self.path_shear_y;
        mesh.path_cut_begin = self.path_begin;
        mesh.path_cut_end = 1.0 - self.path_end;
        mesh.steps_per_revolution = config.steps_per_revolution;

        match self.path_kind() {
            PathKind::Straight => {
                mesh.twist_begin = self.path_twist_begin * 180.0;
                mesh.twist_end = self.path_twist * 180.0;
                mesh.taper_x = self.path_scale_x - 1.0;
                mesh.taper_y = self.path_scale_y - 1.0;
            }
            PathKind::Circular => {
                mesh.hole_size_x = 2.0 - self.path_scale_x;
                mesh.hole_size_y = 2.0 - self.path_scale_y;
                mesh.radius = self.path_radius_offset;
                mesh.revolutions = self.path_revolutions;
                mesh.skew = self.path_skew;
                mesh.twist_begin = self.path_twist_begin * 360.0;
                mesh.twist_end = self.path_twist * 360.0;
                mesh.taper_x = self.path_taper_x;
                mesh.taper_y = self.path_taper_y;
            }
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_shape_sides() {
        assert_eq!(ProfileShape::from_curve(0).sides(), 24);
        assert_eq!(ProfileShape::from_curve(1).sides(), 4);
        assert_eq!(ProfileShape::from_curve(3).sides(), 3);
        assert_eq!(ProfileShape::from_curve(5).sides(), 24);
        // Isometric and right triangles fall back to squares.
        assert_eq!(ProfileShape::from_curve(2).sides(), 4);
        assert_eq!(ProfileShape::from_curve(7), ProfileShape::Unknown(7));
        assert_eq!(ProfileShape::from_curve(7).sides(), 4);
    }

    #[test]
    fn test_hollow_shape_uses_high_bits() {
        assert_eq!(HollowShape::from_curve(0x01), HollowShape::Same);
        assert_eq!(HollowShape::from_curve(0x11), HollowShape::Circle);
        assert_eq!(HollowShape::from_curve(0x23).sides(3), 4);
        assert_eq!(HollowShape::from_curve(0x30).sides(24), 3);
        assert_eq!(HollowShape::from_curve(0x03).sides(3), 3);
    }

    #[test]
    fn test_path_kind() {
        assert_eq!(PathKind::from_curve(PATH_CURVE_LINE), PathKind::Straight);
        assert_eq!(PathKind::from_curve(PATH_CURVE_CIRCLE), PathKind::Circular);
        assert_eq!(PathKind::from_curve(0x80), PathKind::Circular);
    }

    #[test]
    fn test_straight_path_decodes_taper_and_twist() {
        let shape = PrimShape {
            path_scale_x: 0.5,
            path_scale_y: 1.5,
            path_twist_begin: -0.5,
            path_twist: 1.0,
            path_end: 0.25,
            profile_end: 0.5,
            ..PrimShape::cube()
        };
        let mesh = shape.prim_mesh(&MesherConfig::default());
        assert_eq!(mesh.taper_x, -0.5);
        assert_eq!(mesh.taper_y, 0.5);
        assert_eq!(mesh.twist_begin, -90.0);
        assert_eq!(mesh.twist_end, 180.0);
        assert_eq!(mesh.path_cut_end, 0.75);
        assert_eq!(mesh.profile_end, 0.5);
        assert!(mesh.has_profile_cut());
    }

    #[test]
    fn test_circular_path_decodes_hole_and_twist() {
        let shape = PrimShape {
            path_twist: 0.5,
            path_radius_offset: 0.2,
            path_revolutions: 2.0,
            path_skew: 0.1,
            path_taper_x: 0.3,
            ..PrimShape::torus()
        };
        let config = MesherConfig::new(12, 0.11).unwrap();
        let mesh = shape.prim_mesh(&config);
        assert_eq!(mesh.hole_size_x, 1.0);
        assert_eq!(mesh.hole_size_y, 0.25);
        assert_eq!(mesh.twist_end, 180.0);
        assert_eq!(mesh.radius, 0.2);
        assert_eq!(mesh.revolutions, 2.0);
        assert_eq!(mesh.skew, 0.1);
        assert_eq!(mesh.taper_x, 0.3);
        assert_eq!(mesh.steps_per_revolution, 12);
    }

    #[test]
    fn test_half_circle_remaps_profile_cut() {
        let shape = PrimShape {
            profile_begin: 0.2,
            profile_end: 0.2,
            ..PrimShape::sphere()
        };
        let mesh = shape.prim_mesh(&MesherConfig::default());
        assert!((mesh.profile_start - 0.6).abs() < 1e-12);
        assert!((mesh.profile_end - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_hollow_shape_reaches_mesh() {
        let shape = PrimShape {
            profile_curve: 0x21,
            profile_hollow: 0.5,
            ..PrimShape::cube()
        };
        let mesh = shape.prim_mesh(&MesherConfig::default());
        assert_eq!(mesh.sides, 4);
        assert_eq!(mesh.hollow_sides, 4);
        assert!(mesh.has_hollow());
    }
}
