//! Thin wrappers around `glam` shared across mesher modules.
//!
//! Positions and normals are `glam::DVec3`, rotations `glam::DQuat`. The
//! helpers add the thresholded normalization the prim encoding relies on:
//! near-zero vectors normalize to zero instead of NaN.

use config::constants::NORMALIZE_THRESHOLD;
use serde::{Deserialize, Serialize};

pub use glam::DQuat as Quat;
pub use glam::DVec3 as Coord;

/// The +Z axis, about which profiles are twisted.
pub const Z_AXIS: Coord = Coord::new(0.0, 0.0, 1.0);

/// The +X axis, about which circular path layers are oriented.
pub const X_AXIS: Coord = Coord::new(1.0, 0.0, 0.0);

/// Normalizes a vector, returning zero when its length is negligible.
///
/// # Examples
/// ```
/// use prim_mesher::math::{normalize, Coord};
/// assert_eq!(normalize(Coord::new(0.0, 3.0, 4.0)), Coord::new(0.0, 0.6, 0.8));
/// assert_eq!(normalize(Coord::ZERO), Coord::ZERO);
/// ```
pub fn normalize(c: Coord) -> Coord {
    let mag = c.length();
    if mag > NORMALIZE_THRESHOLD {
        c / mag
    } else {
        Coord::ZERO
    }
}

/// Normalizes a quaternion, falling back to the identity when its length
/// is negligible.
pub fn normalize_quat(q: Quat) -> Quat {
    let mag = q.length();
    if mag > NORMALIZE_THRESHOLD {
        let inv = 1.0 / mag;
        Quat::from_xyzw(q.x * inv, q.y * inv, q.z * inv, q.w * inv)
    } else {
        Quat::IDENTITY
    }
}

/// Builds a rotation of `angle` radians about `axis`.
///
/// The axis does not need to be normalized. The result is renormalized to
/// guard against drift.
///
/// # Examples
/// ```
/// use prim_mesher::math::{quat_from_axis_angle, rotate, Coord, Z_AXIS};
/// let q = quat_from_axis_angle(Z_AXIS * 2.0, std::f64::consts::FRAC_PI_2);
/// let r = rotate(Coord::X, q);
/// assert!((r - Coord::Y).length() < 1e-12);
/// ```
pub fn quat_from_axis_angle(axis: Coord, angle: f64) -> Quat {
    let axis = normalize(axis);
    let (s, c) = (angle * 0.5).sin_cos();
    normalize_quat(Quat::from_xyzw(axis.x * s, axis.y * s, axis.z * s, c))
}

/// Rotates a vector by a quaternion.
#[inline]
pub fn rotate(c: Coord, q: Quat) -> Coord {
    q * c
}

/// Normal of the triangle `(c1, c2, c3)` following its winding.
///
/// Degenerate triangles yield the zero vector.
pub fn surface_normal(c1: Coord, c2: Coord, c3: Coord) -> Coord {
    let edge1 = c2 - c1;
    let edge2 = c3 - c1;
    normalize(edge1.cross(edge2))
}

/// A texture coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UvCoord {
    pub u: f64,
    pub v: f64,
}

impl UvCoord {
    /// Creates a texture coordinate.
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Mirrors both axes, matching the renderer's texture origin.
    ///
    /// # Examples
    /// ```
    /// use prim_mesher::math::UvCoord;
    /// assert_eq!(UvCoord::new(0.25, 1.0).flip(), UvCoord::new(0.75, 0.0));
    /// ```
    pub fn flip(self) -> Self {
        Self::new(1.0 - self.u, 1.0 - self.v)
    }
}
