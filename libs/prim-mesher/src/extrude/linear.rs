//! # Linear Extrusion
//!
//! Sweeps the profile up the Z axis from `z = -0.5` to `z = 0.5`, used for
//! boxes, cylinders and prisms.
//!
//! Step count starts at one layer pair and grows with twist (so twisted
//! sides do not cut through each other) and, for prisms, with taper.

use std::f64::consts::{PI, TAU};

use config::constants::{
    HOLLOW_CYLINDER_SQUARE_CORRECTION, HOLLOW_PRISM_CORRECTION, HOLLOW_SQUARE_CORRECTION,
    LINEAR_TWIST_STEPS_PER_RADIAN, MAX_MIXED_HOLLOW, MAX_TWIST_STEPS, PRISM_TAPER_STEPS,
    PRISM_TAPER_THRESHOLD, TWIST_STEP_THRESHOLD,
};

use super::{linear_taper, FlatShading, PrimMesh, StripParams};
use crate::error::MesherResult;
use crate::math::{self, Coord};
use crate::profile::{Profile, TOP_FACE_NUMBER};

impl PrimMesh {
    /// Extrudes the profile along a straight path.
    ///
    /// Replaces any previous extrusion.
    ///
    /// # Errors
    ///
    /// `NonFiniteParameter` for a NaN or infinite path parameter, or any
    /// profile construction failure.
    ///
    /// # Examples
    /// ```
    /// use prim_mesher::PrimMesh;
    /// let mut cube = PrimMesh::new(4, 0.0, 1.0, 0.0, 4);
    /// cube.extrude_linear().unwrap();
    /// assert_eq!(cube.viewer_faces.len(), 12);
    /// ```
    pub fn extrude_linear(&mut self) -> MesherResult<()> {
        self.reset();
        self.prepare_path()?;

        let length = self.path_cut_end - self.path_cut_begin;
        let twist_begin = self.twist_begin / 360.0 * TAU;
        let twist_end = self.twist_end / 360.0 * TAU;
        let twist_total = twist_end - twist_begin;
        let steps = self.linear_steps(length, twist_total);
        let step_size = length / steps as f64;
        log::trace!("linear extrusion: {steps} steps, twist {twist_total:.3} rad");

        let mut profile = Profile::new(
            self.sides,
            self.profile_start,
            self.profile_end,
            self.linear_hollow(),
            self.hollow_sides,
            true,
        )?;
        self.num_prim_faces = profile.num_prim_faces;
        self.cut_face_numbers = profile.cut_face_numbers();

        if self.sides == 4 {
            profile.add_rot(math::quat_from_axis_angle(math::Z_AXIS, 1.25 * PI));
            profile.make_face_uvs();
        }

        let edges = profile.side_edges();
        let mut last_cut_normals = [Coord::ZERO; 2];
        let mut last_v = 1.0;
        let mut prev_base = 0;

        for step in 0..=steps {
            let percent = self.path_cut_begin + step as f64 * step_size;
            let mut layer = profile.clone();

            let x_scale = linear_taper(self.taper_x, percent);
            let y_scale = linear_taper(self.taper_y, percent);
            if x_scale != 1.0 || y_scale != 1.0 {
                layer.scale(x_scale, y_scale);
            }

            let twist = twist_begin + twist_total * percent;
            if twist != 0.0 {
                layer.add_rot(math::quat_from_axis_angle(math::Z_AXIS, twist));
            }

            let fraction = step as f64 / steps as f64;
            layer.add_pos(Coord::new(
                self.top_shear_x * fraction,
                self.top_shear_y * fraction,
                -0.5 + percent,
            ));

            if step == 0 {
                layer.flip_normals();
                self.add_cap(&layer, layer.bottom_face_number, true);
            }

            let base = self.append_layer(&layer, step == 0 || step == steps);
            let v_now = 1.0 - percent;

            if step > 0 {
                let strips = StripParams {
                    base,
                    prev_base,
                    v_now,
                    v_last: last_v,
                    last_cut_normals,
                    sides: self.sides,
                    hollow_sides: self.hollow_sides,
                    flat_shading: FlatShading::SurfaceNormal,
                };
                self.add_side_strips(&layer, &edges, &strips);
            }

            if step == steps {
                self.add_cap(&layer, TOP_FACE_NUMBER, true);
            }

            last_cut_normals = [layer.cut_normal1, layer.cut_normal2];
            last_v = v_now;
            prev_base = base;
        }

        Ok(())
    }

    /// Number of layer pairs along a straight path.
    fn linear_steps(&self, length: f64, twist_total: f64) -> usize {
        let mut steps = 1;

        // Prisms taper unevenly, add vertical resolution.
        if self.sides == 3
            && (self.taper_x.abs() > PRISM_TAPER_THRESHOLD
                || self.taper_y.abs() > PRISM_TAPER_THRESHOLD)
        {
            steps = ((steps as f64 * PRISM_TAPER_STEPS * length) as usize).max(1);
        }

        let twist_abs = twist_total.abs();
        if twist_abs > TWIST_STEP_THRESHOLD {
            let extra = ((twist_abs * LINEAR_TWIST_STEPS_PER_RADIAN) as usize).min(MAX_TWIST_STEPS);
            steps = steps.saturating_add(extra);
        }

        steps
    }

    /// Hollow size corrected so the hollow ring matches the outer shape.
    fn linear_hollow(&self) -> f64 {
        let hollow = self.hollow;
        match (self.sides, self.hollow_sides) {
            (3, 4) => hollow.min(MAX_MIXED_HOLLOW) * HOLLOW_SQUARE_CORRECTION,
            (3, _) => hollow * HOLLOW_PRISM_CORRECTION,
            (4, hollow_sides) if hollow_sides != 4 => hollow * HOLLOW_SQUARE_CORRECTION,
            (24, 4) => hollow * HOLLOW_CYLINDER_SQUARE_CORRECTION,
            _ => hollow,
        }
    }
}
