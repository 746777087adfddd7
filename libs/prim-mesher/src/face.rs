//! Indexed and denormalized triangles.

use serde::{Deserialize, Serialize};

use crate::math::{self, Coord, Quat, UvCoord};

/// A triangle referencing shared vertex, normal and UV buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Face {
    pub v: [usize; 3],
    pub n: [usize; 3],
    pub uv: [usize; 3],
    /// Facet id, used only for grouping faces by material.
    pub prim_face: usize,
}

impl Face {
    /// Creates a face whose normal and UV indices follow its vertices.
    pub const fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self {
            v: [v1, v2, v3],
            n: [v1, v2, v3],
            uv: [v1, v2, v3],
            prim_face: 0,
        }
    }

    /// Shifts every vertex index by `offset`.
    pub(crate) fn offset_vertices(&mut self, offset: usize) {
        for i in &mut self.v {
            *i += offset;
        }
    }

    /// Shifts every normal index by `offset`.
    pub(crate) fn offset_normals(&mut self, offset: usize) {
        for i in &mut self.n {
            *i += offset;
        }
    }

    /// Reverses the winding.
    pub(crate) fn flip(&mut self) {
        self.v.swap(0, 2);
        self.n.swap(0, 2);
        self.uv.swap(0, 2);
    }
}

/// A self-contained triangle ready for rendering.
///
/// Positions, normals and UVs are stored inline so flat and smooth facets
/// can share one vertex stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerFace {
    pub v: [Coord; 3],
    pub n: [Coord; 3],
    pub uv: [UvCoord; 3],
    pub prim_face_number: usize,
}

impl ViewerFace {
    /// Creates an empty face on the given facet.
    pub fn new(prim_face_number: usize) -> Self {
        Self {
            prim_face_number,
            ..Self::default()
        }
    }

    /// Scales positions componentwise.
    pub fn scale(&mut self, x: f64, y: f64, z: f64) {
        let m = Coord::new(x, y, z);
        for v in &mut self.v {
            *v *= m;
        }
    }

    /// Rotates positions and normals.
    pub fn add_rot(&mut self, q: Quat) {
        for v in &mut self.v {
            *v = math::rotate(*v, q);
        }
        for n in &mut self.n {
            *n = math::rotate(*n, q);
        }
    }

    /// Translates positions.
    pub fn add_pos(&mut self, offset: Coord) {
        for v in &mut self.v {
            *v += offset;
        }
    }

    /// Sets all three normals to the flat surface normal.
    pub fn calc_surface_normal(&mut self) {
        let normal = math::surface_normal(self.v[0], self.v[1], self.v[2]);
        self.n = [normal; 3];
    }

    /// Twice the triangle area.
    pub fn doubled_area(&self) -> f64 {
        (self.v[1] - self.v[0]).cross(self.v[2] - self.v[0]).length()
    }

    /// True when every position and normal is finite.
    pub fn is_finite(&self) -> bool {
        self.v.iter().chain(self.n.iter()).all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> ViewerFace {
        let mut face = ViewerFace::new(3);
        face.v = [Coord::ZERO, Coord::X, Coord::Y];
        face
    }

    #[test]
    fn test_calc_surface_normal() {
        let mut face = unit_triangle();
        face.calc_surface_normal();
        assert_eq!(face.n, [Coord::Z; 3]);
        assert_eq!(face.prim_face_number, 3);
    }

    #[test]
    fn test_scale_and_area() {
        let mut face = unit_triangle();
        assert_relative_eq!(face.doubled_area(), 1.0);
        face.scale(2.0, 3.0, 1.0);
        assert_relative_eq!(face.doubled_area(), 6.0);
    }

    #[test]
    fn test_add_rot_rotates_normals() {
        let mut face = unit_triangle();
        face.calc_surface_normal();
        face.add_rot(math::quat_from_axis_angle(math::X_AXIS, std::f64::consts::PI));
        assert_relative_eq!(face.n[0].z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_detection() {
        let mut face = unit_triangle();
        assert!(face.is_finite());
        face.v[1].x = f64::NAN;
        assert!(!face.is_finite());
    }

    #[test]
    fn test_face_flip_swaps_outer_indices() {
        let mut face = Face::new(1, 2, 3);
        face.flip();
        assert_eq!(face.v, [3, 2, 1]);
        face.offset_vertices(10);
        assert_eq!(face.v, [13, 12, 11]);
        assert_eq!(face.n, [3, 2, 1]);
    }
}
