//! # Angle List
//!
//! Angular sample points for one profile ring, clipped to a start/stop
//! angle.
//!
//! ## Sampling
//!
//! Triangles, squares and 24-gons read exact unit-circle points from
//! `const` tables and interpolate the two ends onto the requested angles.
//! Any other side count steps around the circle with live trigonometry and
//! pulls the ends onto the requested rays by chord intersection.
//!
//! Every [`Angle::angle`] is a fraction of a full turn, whatever the side
//! count.

use std::f64::consts::{FRAC_1_SQRT_2, TAU};

use config::constants::{approx_equal, approx_zero, EPSILON};

use crate::error::{MesherError, MesherResult};
use crate::math::Coord;

/// A sample on the unit circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    /// Position along the ring as a fraction of a full turn.
    pub angle: f64,
    pub x: f64,
    pub y: f64,
}

impl Angle {
    pub const fn new(angle: f64, x: f64, y: f64) -> Self {
        Self { angle, x, y }
    }
}

// =============================================================================
// EXACT TABLES
// =============================================================================

const SIN_60: f64 = 0.866_025_403_784_438_6;

/// Equilateral triangle, closed (last entry repeats the first).
pub const ANGLES_3: [Angle; 4] = [
    Angle::new(0.0, 1.0, 0.0),
    Angle::new(1.0 / 3.0, -0.5, SIN_60),
    Angle::new(2.0 / 3.0, -0.5, -SIN_60),
    Angle::new(1.0, 1.0, 0.0),
];

/// Outward normals of the triangle edges starting at each `ANGLES_3` entry.
pub const NORMALS_3: [Coord; 4] = [
    Coord::new(0.5, SIN_60, 0.0),
    Coord::new(-1.0, 0.0, 0.0),
    Coord::new(0.5, -SIN_60, 0.0),
    Coord::new(0.5, SIN_60, 0.0),
];

/// Square standing on a corner, closed.
pub const ANGLES_4: [Angle; 5] = [
    Angle::new(0.0, 1.0, 0.0),
    Angle::new(0.25, 0.0, 1.0),
    Angle::new(0.5, -1.0, 0.0),
    Angle::new(0.75, 0.0, -1.0),
    Angle::new(1.0, 1.0, 0.0),
];

/// Outward normals of the square edges starting at each `ANGLES_4` entry.
pub const NORMALS_4: [Coord; 5] = [
    Coord::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0),
    Coord::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0),
    Coord::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0),
    Coord::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0),
    Coord::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0),
];

/// 24-gon approximating a circle, closed.
pub const ANGLES_24: [Angle; 25] = [
    Angle::new(0.0, 1.0, 0.0),
    Angle::new(1.0 / 24.0, 0.965_925_826_289_068_3, 0.258_819_045_102_520_74),
    Angle::new(2.0 / 24.0, SIN_60, 0.5),
    Angle::new(3.0 / 24.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Angle::new(4.0 / 24.0, 0.5, SIN_60),
    Angle::new(5.0 / 24.0, 0.258_819_045_102_520_96, 0.965_925_826_289_068_2),
    Angle::new(6.0 / 24.0, 0.0, 1.0),
    Angle::new(7.0 / 24.0, -0.258_819_045_102_520_63, 0.965_925_826_289_068_3),
    Angle::new(8.0 / 24.0, -0.5, SIN_60),
    Angle::new(9.0 / 24.0, -FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Angle::new(10.0 / 24.0, -SIN_60, 0.5),
    Angle::new(11.0 / 24.0, -0.965_925_826_289_068_2, 0.258_819_045_102_521),
    Angle::new(12.0 / 24.0, -1.0, 0.0),
    Angle::new(13.0 / 24.0, -0.965_925_826_289_068_4, -0.258_819_045_102_520_35),
    Angle::new(14.0 / 24.0, -SIN_60, -0.5),
    Angle::new(15.0 / 24.0, -FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    Angle::new(16.0 / 24.0, -0.5, -SIN_60),
    Angle::new(17.0 / 24.0, -0.258_819_045_102_521_5, -0.965_925_826_289_068_1),
    Angle::new(18.0 / 24.0, 0.0, -1.0),
    Angle::new(19.0 / 24.0, 0.258_819_045_102_520_3, -0.965_925_826_289_068_4),
    Angle::new(20.0 / 24.0, 0.5, -SIN_60),
    Angle::new(21.0 / 24.0, FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    Angle::new(22.0 / 24.0, SIN_60, -0.5),
    Angle::new(23.0 / 24.0, 0.965_925_826_289_068_1, -0.258_819_045_102_521_57),
    Angle::new(1.0, 1.0, 0.0),
];

// =============================================================================
// ANGLE LIST
// =============================================================================

/// Ascending ring samples between a start and a stop angle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AngleList {
    pub angles: Vec<Angle>,
    /// Edge normals, one per sample; only filled for 3 and 4 sides.
    pub normals: Vec<Coord>,
}

impl AngleList {
    /// Samples a `sides`-gon between `start_angle` and `stop_angle`
    /// (radians, `0..=2π`).
    ///
    /// The first and last samples land exactly on the requested angles.
    ///
    /// # Errors
    ///
    /// `InvalidSides` if `sides < 1`, `InvalidAngleRange` if
    /// `stop_angle <= start_angle`.
    ///
    /// # Examples
    /// ```
    /// use prim_mesher::AngleList;
    /// let list = AngleList::make_angles(4, 0.0, std::f64::consts::TAU).unwrap();
    /// assert_eq!(list.angles.len(), 5);
    /// assert_eq!(list.normals.len(), 5);
    /// ```
    pub fn make_angles(sides: i32, start_angle: f64, stop_angle: f64) -> MesherResult<Self> {
        if sides < 1 {
            return Err(MesherError::InvalidSides { sides });
        }
        if stop_angle <= start_angle {
            return Err(MesherError::InvalidAngleRange {
                start: start_angle,
                stop: stop_angle,
            });
        }

        let list = match sides {
            3 => Self::from_table(&ANGLES_3, Some(&NORMALS_3), start_angle, stop_angle),
            4 => Self::from_table(&ANGLES_4, Some(&NORMALS_4), start_angle, stop_angle),
            24 => Self::from_table(&ANGLES_24, None, start_angle, stop_angle),
            _ => Self::stepped(sides as usize, start_angle, stop_angle),
        };
        Ok(list)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    fn from_table(
        table: &[Angle],
        normals: Option<&[Coord]>,
        start_angle: f64,
        stop_angle: f64,
    ) -> Self {
        let sides = table.len() - 1;
        let start = start_angle / TAU;
        let stop = stop_angle / TAU;

        let start_index = ((start * sides as f64) as usize).min(sides - 1);
        let mut end_index = if stop < 1.0 {
            ((stop * sides as f64) as usize + 1).min(sides)
        } else {
            sides
        };
        if end_index == start_index {
            end_index += 1;
        }

        let mut angles = table[start_index..=end_index].to_vec();
        let mut edge_normals = normals
            .map(|n| n[start_index..=end_index].to_vec())
            .unwrap_or_default();

        if start > 0.0 {
            angles[0] = interpolate_points(start, &angles[0], &angles[1]);
        }

        if stop < 1.0 {
            let last = angles.len() - 1;
            angles[last] = interpolate_points(stop, &angles[last - 1], &angles[last]);

            // A stop on a table entry would repeat the previous sample.
            if angles.len() > 2 && approx_equal(angles[last].angle, angles[last - 1].angle) {
                angles.pop();
                edge_normals.pop();
            }
        }

        Self {
            angles,
            normals: edge_normals,
        }
    }

    fn stepped(sides: usize, start_angle: f64, stop_angle: f64) -> Self {
        let step_size = TAU / sides as f64;

        let mut step = (start_angle / step_size) as usize;
        let mut angle = step_size * step as f64;

        let mut stop_test = stop_angle;
        if stop_angle < TAU {
            stop_test = step_size * ((stop_angle / step_size) as usize + 1) as f64;
            if stop_test < stop_angle {
                stop_test += step_size;
            }
            stop_test = stop_test.min(TAU);
        }

        let mut samples: Vec<(f64, f64, f64)> = Vec::with_capacity(sides + 1);
        while angle <= stop_test + EPSILON {
            samples.push((angle, angle.cos(), angle.sin()));
            step += 1;
            angle = step_size * step as f64;
        }

        if samples.len() >= 2 && start_angle > samples[0].0 {
            let (_, x1, y1) = samples[0];
            let (_, x2, y2) = samples[1];
            if let Some((x, y)) =
                intersection(x1, y1, x2, y2, 0.0, 0.0, start_angle.cos(), start_angle.sin())
            {
                samples[0] = (start_angle, x, y);
            }
        }

        let last = samples.len() - 1;
        if last >= 1 && stop_angle < samples[last].0 {
            let (_, x1, y1) = samples[last - 1];
            let (_, x2, y2) = samples[last];
            if let Some((x, y)) =
                intersection(x1, y1, x2, y2, 0.0, 0.0, stop_angle.cos(), stop_angle.sin())
            {
                samples[last] = (stop_angle, x, y);
            }
        }

        let angles = samples
            .into_iter()
            .map(|(radians, x, y)| Angle::new(radians / TAU, x, y))
            .collect();

        Self {
            angles,
            normals: Vec::new(),
        }
    }
}

/// Linear interpolation between two samples at turn fraction `at`.
fn interpolate_points(at: f64, p1: &Angle, p2: &Angle) -> Angle {
    let m = (at - p1.angle) / (p2.angle - p1.angle);
    Angle::new(at, p1.x + m * (p2.x - p1.x), p1.y + m * (p2.y - p1.y))
}

/// Intersects the line through `(x1, y1)`-`(x2, y2)` with the line through
/// `(x3, y3)`-`(x4, y4)`.
///
/// Returns `None` for parallel or nearly parallel lines.
///
/// # Examples
/// ```
/// use prim_mesher::angle_list::intersection;
/// let hit = intersection(0.0, 1.0, 2.0, 1.0, 0.0, 0.0, 1.0, 1.0);
/// assert_eq!(hit, Some((1.0, 1.0)));
/// assert_eq!(intersection(0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0), None);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn intersection(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
    x4: f64,
    y4: f64,
) -> Option<(f64, f64)> {
    let denom = (y4 - y3) * (x2 - x1) - (x4 - x3) * (y2 - y1);
    if approx_zero(denom) {
        return None;
    }
    let ua = ((x4 - x3) * (y1 - y3) - (y4 - y3) * (x1 - x3)) / denom;
    Some((x1 + ua * (x2 - x1), y1 + ua * (y2 - y1)))
}
