//! # Texture Coordinates
//!
//! Applies a face's texture placement to generated UVs.

use glam::DVec2;
use prim_mesher::UvCoord;

use crate::material::UvTransform;

/// Rotates, repeats and offsets a UV about the texture centre.
///
/// Rotation turns the texture by `transform.rotation`, so UVs turn the
/// other way. V offsets move the texture up.
///
/// # Examples
/// ```
/// use prim_geometry::{transform_uv, UvTransform};
/// use prim_mesher::UvCoord;
///
/// let shifted = UvTransform { offset_u: 0.25, ..UvTransform::default() };
/// let uv = transform_uv(UvCoord::new(0.5, 0.5), &shifted);
/// assert_eq!(uv, UvCoord::new(0.75, 0.5));
/// ```
pub fn transform_uv(uv: UvCoord, transform: &UvTransform) -> UvCoord {
    let half = DVec2::splat(0.5);
    let centered = DVec2::new(uv.u, uv.v) - half;
    let (sin, cos) = (-transform.rotation).sin_cos();

    let rotated = DVec2::new(
        centered.y * sin + centered.x * cos,
        -centered.x * sin + centered.y * cos,
    );
    let repeated = rotated * DVec2::new(transform.repeat_u, transform.repeat_v);
    let moved = repeated + DVec2::new(transform.offset_u, -transform.offset_v) + half;

    UvCoord::new(moved.x, moved.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_transform() {
        let uv = transform_uv(UvCoord::new(0.2, 0.9), &UvTransform::default());
        assert_relative_eq!(uv.u, 0.2, epsilon = 1e-12);
        assert_relative_eq!(uv.v, 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_repeat_scales_about_center() {
        let transform = UvTransform {
            repeat_u: 2.0,
            repeat_v: 3.0,
            ..UvTransform::default()
        };
        let uv = transform_uv(UvCoord::new(1.0, 1.0), &transform);
        assert_relative_eq!(uv.u, 1.5, epsilon = 1e-12);
        assert_relative_eq!(uv.v, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_v_offset_is_inverted() {
        let transform = UvTransform {
            offset_v: 0.25,
            ..UvTransform::default()
        };
        let uv = transform_uv(UvCoord::new(0.5, 0.5), &transform);
        assert_relative_eq!(uv.v, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_turn() {
        let transform = UvTransform {
            rotation: FRAC_PI_2,
            ..UvTransform::default()
        };
        // (0.5, 0) from the centre turns to (0, 0.5).
        let uv = transform_uv(UvCoord::new(1.0, 0.5), &transform);
        assert_relative_eq!(uv.u, 0.5, epsilon = 1e-12);
        assert_relative_eq!(uv.v, 1.0, epsilon = 1e-12);
    }
}
