//! # Circular Extrusion
//!
//! Sweeps the profile around the X axis, used for tori, tubes and rings.
//!
//! The path is sampled at fixed angular steps; the first and last layers
//! land exactly on the path cut angles. Top shear Y is folded into the
//! start/end angles and the sine of the path radius, which approximates
//! its effect on both.

use std::f64::consts::{PI, TAU};

use config::constants::{
    CIRCULAR_TAPER_THRESHOLD, CIRCULAR_TWIST_DOUBLE_FIRST, CIRCULAR_TWIST_DOUBLE_SECOND,
    END_LAYER_TOLERANCE, HOLLOW_PRISM_CORRECTION, HOLLOW_SQUARE_CORRECTION, MAX_MIXED_HOLLOW,
    RADIUS_OFFSET_THRESHOLD, TOP_SHEAR_Y_ANGLE_FACTOR, TWIST_STEP_THRESHOLD,
};

use super::{FlatShading, PrimMesh, StripParams};
use crate::error::{MesherError, MesherResult};
use crate::math::{self, Coord};
use crate::profile::{Profile, TOP_FACE_NUMBER};

impl PrimMesh {
    /// Extrudes the profile along a circular path.
    ///
    /// Replaces any previous extrusion.
    ///
    /// # Errors
    ///
    /// `InvalidStepsPerRevolution` when `steps_per_revolution < 1`,
    /// `NonFiniteParameter` for a NaN or infinite path parameter, or any
    /// profile construction failure.
    pub fn extrude_circular(&mut self) -> MesherResult<()> {
        if self.steps_per_revolution < 1 {
            return Err(MesherError::InvalidStepsPerRevolution {
                steps: self.steps_per_revolution,
            });
        }

        self.reset();
        self.prepare_path()?;

        let twist_begin = self.twist_begin / 360.0 * TAU;
        let twist_end = self.twist_end / 360.0 * TAU;
        let twist_total = twist_end - twist_begin;
        let steps_per_revolution = self.circular_steps_per_revolution(twist_total);
        log::trace!("circular extrusion: {steps_per_revolution} steps/rev, twist {twist_total:.3}");

        let y_path_scale = self.hole_size_y * 0.5;
        let path_length = self.path_cut_end - self.path_cut_begin;
        let total_skew = self.skew * 2.0 * path_length;
        let skew_start = self.path_cut_begin * 2.0 * self.skew - self.skew;
        let x_shear_factor = self.top_shear_x * (0.25 + 0.5 * (0.5 - self.hole_size_y));
        let y_shear_compensation = 1.0 + self.top_shear_y.abs() * 0.25;

        let shear_angle = self.top_shear_y * TOP_SHEAR_Y_ANGLE_FACTOR;
        let start_angle = TAU * self.path_cut_begin * self.revolutions - shear_angle;
        let end_angle = TAU * self.path_cut_end * self.revolutions - shear_angle;
        let step_size = TAU / steps_per_revolution as f64;
        // Bounds the walk below; the end-angle test normally stops it first.
        let max_layer = ((end_angle - start_angle) / step_size).ceil() as usize + 2;

        let need_end_faces = self.path_cut_begin != 0.0
            || self.path_cut_end != 1.0
            || self.taper_x != 0.0
            || self.taper_y != 0.0
            || self.skew != 0.0
            || twist_total != 0.0
            || self.radius != 0.0;

        let mut profile = Profile::new(
            self.sides,
            self.profile_start,
            self.profile_end,
            self.circular_hollow(),
            self.hollow_sides,
            need_end_faces,
        )?;
        self.num_prim_faces = profile.num_prim_faces;
        self.cut_face_numbers = profile.cut_face_numbers();

        let initial_rot = if self.sides == 4 { 0.25 * PI } else { PI };
        profile.add_rot(math::quat_from_axis_angle(math::Z_AXIS, initial_rot));
        profile.make_face_uvs();

        let edges = profile.side_edges();
        let mut last_cut_normals = [Coord::ZERO; 2];
        let mut last_v = 1.0;
        let mut prev_base = 0;

        let mut step = (start_angle / step_size).trunc() as i64;
        let mut angle = start_angle;
        let mut first = true;
        let mut layer_index = 0;

        loop {
            let last = angle >= end_angle || layer_index >= max_layer;
            let mut layer = profile.clone();

            let percent = angle / (TAU * self.revolutions);
            let percent_of_angles = (angle - start_angle) / (end_angle - start_angle);

            let x_scale =
                (1.0 - self.skew.abs()) * self.hole_size_x * circular_taper(self.taper_x, percent);
            let y_scale = self.hole_size_y * circular_taper(self.taper_y, percent);
            if x_scale != 1.0 || y_scale != 1.0 {
                layer.scale(x_scale, y_scale);
            }

            let radius_scale = if self.radius > RADIUS_OFFSET_THRESHOLD {
                1.0 - self.radius * percent
            } else if self.radius < -RADIUS_OFFSET_THRESHOLD {
                1.0 + self.radius * (1.0 - percent)
            } else {
                1.0
            };

            let twist = twist_begin + twist_total * percent;
            let x_offset =
                0.5 * (skew_start + total_skew * percent_of_angles) + angle.sin() * x_shear_factor;
            let y_offset =
                y_shear_compensation * angle.cos() * (0.5 - y_path_scale) * radius_scale;
            let z_offset = (angle + self.top_shear_y).sin() * (0.5 - y_path_scale) * radius_scale;

            if twist_total != 0.0 || twist_begin != 0.0 {
                layer.add_rot(math::quat_from_axis_angle(math::Z_AXIS, twist));
            }
            layer.add_rot(math::quat_from_axis_angle(
                math::X_AXIS,
                angle + self.top_shear_y,
            ));
            layer.add_pos(Coord::new(x_offset, y_offset, z_offset));

            if first {
                layer.flip_normals();
                if need_end_faces {
                    self.add_cap(&layer, TOP_FACE_NUMBER, false);
                }
            }

            let base = self.append_layer(&layer, first || last);
            let v_now = 1.0 - percent;

            if !first {
                let strips = StripParams {
                    base,
                    prev_base,
                    v_now,
                    v_last: last_v,
                    last_cut_normals,
                    sides: self.sides,
                    hollow_sides: self.hollow_sides,
                    flat_shading: FlatShading::EdgeNormal,
                };
                self.add_side_strips(&layer, &edges, &strips);
            }

            last_cut_normals = [layer.cut_normal1, layer.cut_normal2];
            last_v = v_now;
            prev_base = base;

            if last {
                if need_end_faces {
                    self.add_cap(&layer, layer.bottom_face_number, false);
                }
                break;
            }

            step += 1;
            angle = step_size * step as f64;
            if angle > end_angle - step_size * END_LAYER_TOLERANCE {
                angle = end_angle;
            }
            first = false;
            layer_index += 1;
        }

        Ok(())
    }

    /// Angular resolution, doubled once or twice for heavily twisted paths.
    fn circular_steps_per_revolution(&self, twist_total: f64) -> usize {
        let mut steps = self.steps_per_revolution.max(1) as usize;
        let twist_abs = twist_total.abs();
        if twist_abs > TWIST_STEP_THRESHOLD {
            if twist_abs > PI * CIRCULAR_TWIST_DOUBLE_FIRST {
                steps *= 2;
            }
            if twist_abs > PI * CIRCULAR_TWIST_DOUBLE_SECOND {
                steps *= 2;
            }
        }
        steps
    }

    /// Hollow size corrected so the hollow ring matches the outer shape.
    fn circular_hollow(&self) -> f64 {
        let hollow = self.hollow;
        match (self.sides, self.hollow_sides) {
            (3, 4) => hollow.min(MAX_MIXED_HOLLOW) * HOLLOW_SQUARE_CORRECTION,
            (3, _) => hollow * HOLLOW_PRISM_CORRECTION,
            (4, hollow_sides) if hollow_sides != 4 => hollow * HOLLOW_SQUARE_CORRECTION,
            (sides, 4) if sides > 4 => hollow.min(MAX_MIXED_HOLLOW) / MAX_MIXED_HOLLOW,
            _ => hollow,
        }
    }
}

/// Profile scale from a taper at `percent` of the path; small tapers are
/// ignored.
fn circular_taper(taper: f64, percent: f64) -> f64 {
    if taper > CIRCULAR_TAPER_THRESHOLD {
        1.0 - percent * taper
    } else if taper < -CIRCULAR_TAPER_THRESHOLD {
        1.0 + (1.0 - percent) * taper
    } else {
        1.0
    }
}
