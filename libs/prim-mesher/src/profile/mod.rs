//! # Profile
//!
//! One cross-section slice of a prim: an outer ring, an optional hollow
//! ring and an optional cut opening part of the circumference.
//!
//! ## Vertex layout
//!
//! - Hollow: outer ring, then the hollow ring in reverse order.
//! - Solid with a cut or more than four sides: centre vertex at index 0,
//!   then the outer ring.
//! - Solid triangle or square without a cut: the outer ring only.
//!
//! Rings are closed: a full-turn ring repeats its first point as its last.

mod numbering;


pub use numbering::TOP_FACE_NUMBER;

use std::f64::consts::TAU;

use config::constants::{
    CURVED_MIN_SIDES, DEGENERATE_EDGE_LENGTH, PROFILE_SCALE, SQUARE_PROFILE_SCALE,
};

use crate::angle_list::AngleList;
use crate::error::MesherResult;
use crate::face::Face;
use crate::math::{self, Coord, Quat, UvCoord};
use numbering::{number_facets, RingLayout};

/// Which part of the profile boundary a side strip sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Outer,
    Hollow,
    /// Cut face at the start of the profile arc.
    Cut1,
    /// Cut face at the end of the profile arc.
    Cut2,
}

/// A profile boundary edge that becomes a side strip when extruded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideEdge {
    pub from: usize,
    pub to: usize,
    pub kind: EdgeKind,
}

/// A cross-section of a prim.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub coords: Vec<Coord>,
    /// Cap triangles, empty unless built with `create_faces`.
    pub faces: Vec<Face>,
    pub vertex_normals: Vec<Coord>,
    /// U texture coordinate along the ring, per vertex.
    pub us: Vec<f64>,
    /// Planar cap texture coordinates, per vertex.
    pub face_uvs: Vec<UvCoord>,
    /// Facet id of the side strip starting at each vertex.
    pub face_numbers: Vec<usize>,
    pub face_normal: Coord,
    pub cut_normal1: Coord,
    pub cut_normal2: Coord,
    /// Outer ring vertices. A centre vertex, when present, sits before
    /// them at index 0, so the ring starts at [`Profile::outer_start`] and
    /// `coords.len()` is one more than the two ring counts.
    pub num_outer_verts: usize,
    /// Hollow ring vertices, stored after the outer ring.
    pub num_hollow_verts: usize,
    pub bottom_face_number: usize,
    pub num_prim_faces: usize,
    pub has_center: bool,
    pub has_hollow: bool,
    pub has_profile_cut: bool,
}

impl Profile {
    /// Builds a profile.
    ///
    /// `profile_start` and `profile_end` are fractions of a turn;
    /// `hollow` is the hollow ring's radius relative to the outer ring.
    ///
    /// # Errors
    ///
    /// Propagates ring sampling failures: a side count below one or
    /// `profile_end <= profile_start`.
    ///
    /// # Examples
    /// ```
    /// use prim_mesher::Profile;
    /// let square = Profile::new(4, 0.0, 1.0, 0.0, 4, true).unwrap();
    /// assert_eq!(square.coords.len(), 5);
    /// assert_eq!(square.faces.len(), 2);
    /// ```
    pub fn new(
        sides: i32,
        profile_start: f64,
        profile_end: f64,
        hollow: f64,
        hollow_sides: i32,
        create_faces: bool,
    ) -> MesherResult<Self> {
        let curved_min = CURVED_MIN_SIDES as i32;
        let has_hollow = hollow > 0.0;
        let has_profile_cut = profile_start > 0.0 || profile_end < 1.0;
        let scale = if sides == 4 {
            SQUARE_PROFILE_SCALE
        } else {
            PROFILE_SCALE
        };

        let start_angle = profile_start * TAU;
        let stop_angle = profile_end * TAU;

        let angles = AngleList::make_angles(sides, start_angle, stop_angle)?;
        let hollow_angles = match (has_hollow, hollow_sides == sides) {
            (false, _) => AngleList::default(),
            (true, true) => angles.clone(),
            (true, false) => AngleList::make_angles(hollow_sides, start_angle, stop_angle)?,
        };

        let num_outer_verts = angles.len();
        let num_hollow_verts = hollow_angles.len();
        let simple_face = sides < curved_min && !has_hollow && !has_profile_cut;
        let has_center = !has_hollow && !simple_face;

        let capacity = num_outer_verts + num_hollow_verts + usize::from(has_center);
        let mut profile = Self {
            coords: Vec::with_capacity(capacity),
            vertex_normals: Vec::with_capacity(capacity),
            us: Vec::with_capacity(capacity),
            face_normal: math::Z_AXIS,
            num_outer_verts,
            num_hollow_verts,
            has_center,
            has_hollow,
            has_profile_cut,
            ..Self::default()
        };

        if has_center {
            profile.push_vertex(Coord::ZERO, math::Z_AXIS, 0.0);
        }

        for (i, angle) in angles.angles.iter().enumerate() {
            let position = Coord::new(angle.x * scale, angle.y * scale, 0.0);
            profile.push_vertex(position, ring_normal(&angles, i), angle.angle);
        }

        // Hollow ring faces inward and runs backwards.
        for (i, angle) in hollow_angles.angles.iter().enumerate().rev() {
            let position = Coord::new(angle.x * scale * hollow, angle.y * scale * hollow, 0.0);
            profile.push_vertex(position, -ring_normal(&hollow_angles, i), angle.angle * hollow);
        }

        if create_faces {
            profile.faces = if has_hollow {
                stitch_rings(&angles, &hollow_angles)
            } else if simple_face {
                match sides {
                    3 => vec![Face::new(0, 1, 2)],
                    4 => vec![Face::new(0, 1, 2), Face::new(0, 2, 3)],
                    _ => Vec::new(),
                }
            } else {
                (1..num_outer_verts).map(|i| Face::new(0, i, i + 1)).collect()
            };
        }

        if has_profile_cut {
            profile.calc_cut_normals();
        }

        profile.make_face_uvs();

        let numbers = number_facets(&RingLayout {
            has_center,
            has_cut: has_profile_cut,
            num_outer_verts,
            num_hollow_verts,
            sides,
            hollow_sides,
        });
        profile.face_numbers = numbers.face_numbers;
        profile.bottom_face_number = numbers.bottom_face_number;
        profile.num_prim_faces = numbers.num_prim_faces;

        Ok(profile)
    }

    fn push_vertex(&mut self, position: Coord, normal: Coord, u: f64) {
        self.coords.push(position);
        self.vertex_normals.push(normal);
        self.us.push(u);
    }

    /// Outward normals of the two cut faces, perpendicular to the lines
    /// where the cut meets the profile plane.
    fn calc_cut_normals(&mut self) {
        let last = self.coords.len() - 1;
        let (line1, line2) = if self.has_hollow {
            let last_outer = self.num_outer_verts - 1;
            (
                self.coords[0] - self.coords[last],
                self.coords[last_outer + 1] - self.coords[last_outer],
            )
        } else {
            (
                self.coords[1] - self.coords[0],
                self.coords[0] - self.coords[last],
            )
        };
        self.cut_normal1 = math::normalize(Coord::new(line1.y, -line1.x, 0.0));
        self.cut_normal2 = math::normalize(Coord::new(line2.y, -line2.x, 0.0));
    }

    /// Index of the first outer ring vertex.
    pub fn outer_start(&self) -> usize {
        usize::from(self.has_center)
    }

    /// Recomputes the planar cap texture coordinates from the positions.
    pub fn make_face_uvs(&mut self) {
        self.face_uvs = self
            .coords
            .iter()
            .map(|c| UvCoord::new(1.0 - (0.5 + c.x), 1.0 - (0.5 - c.y)))
            .collect();
    }

    /// Boundary edges swept into side strips, in vertex order.
    ///
    /// Zero-length ring edges are left out.
    pub fn side_edges(&self) -> Vec<SideEdge> {
        let outer_start = self.outer_start();
        let outer_end = outer_start + self.num_outer_verts;
        let total = self.coords.len();
        let mut edges = Vec::with_capacity(total + 2);

        let ring_edge = |edges: &mut Vec<SideEdge>, from: usize, kind: EdgeKind| {
            let to = from + 1;
            if (self.coords[to] - self.coords[from]).length() >= DEGENERATE_EDGE_LENGTH {
                edges.push(SideEdge { from, to, kind });
            }
        };

        if self.has_profile_cut && self.has_center {
            edges.push(SideEdge {
                from: 0,
                to: outer_start,
                kind: EdgeKind::Cut1,
            });
        }

        for from in outer_start..outer_end.saturating_sub(1) {
            ring_edge(&mut edges, from, EdgeKind::Outer);
        }

        if self.has_profile_cut && outer_end > 0 {
            let to = if self.has_hollow { outer_end } else { 0 };
            edges.push(SideEdge {
                from: outer_end - 1,
                to,
                kind: EdgeKind::Cut2,
            });
        }

        for from in outer_end..total.saturating_sub(1) {
            ring_edge(&mut edges, from, EdgeKind::Hollow);
        }

        if self.has_profile_cut && self.has_hollow {
            edges.push(SideEdge {
                from: total - 1,
                to: 0,
                kind: EdgeKind::Cut1,
            });
        }

        edges
    }

    /// Facet ids of the two cut faces, when the profile is cut.
    pub fn cut_face_numbers(&self) -> Option<[usize; 2]> {
        if !self.has_profile_cut {
            return None;
        }
        let edges = self.side_edges();
        let find = |kind| {
            edges
                .iter()
                .find(|e| e.kind == kind)
                .map(|e| self.face_numbers[e.from])
        };
        Some([find(EdgeKind::Cut1)?, find(EdgeKind::Cut2)?])
    }

    // =========================================================================
    // TRANSFORMS
    // =========================================================================

    /// Translates every vertex.
    pub fn add_pos(&mut self, offset: Coord) {
        for c in &mut self.coords {
            *c += offset;
        }
    }

    /// Rotates vertices and every normal.
    pub fn add_rot(&mut self, q: Quat) {
        for c in &mut self.coords {
            *c = math::rotate(*c, q);
        }
        for n in &mut self.vertex_normals {
            *n = math::rotate(*n, q);
        }
        self.face_normal = math::rotate(self.face_normal, q);
        self.cut_normal1 = math::rotate(self.cut_normal1, q);
        self.cut_normal2 = math::rotate(self.cut_normal2, q);
    }

    /// Scales vertices in the profile plane.
    pub fn scale(&mut self, x: f64, y: f64) {
        for c in &mut self.coords {
            c.x *= x;
            c.y *= y;
        }
    }

    /// Turns the cap to face the other way.
    ///
    /// Reverses face winding, negates the face normal and the centre
    /// normal and mirrors cap V. Ring vertex normals are untouched.
    pub fn flip_normals(&mut self) {
        for face in &mut self.faces {
            face.flip();
        }
        if self.has_center {
            if let Some(center) = self.vertex_normals.first_mut() {
                center.z = -center.z;
            }
        }
        self.face_normal = -self.face_normal;
        for uv in &mut self.face_uvs {
            uv.v = 1.0 - uv.v;
        }
    }

    /// Offsets cap face vertex indices, as when appending to a mesh.
    pub fn add_value_to_face_vertex_indices(&mut self, offset: usize) {
        for face in &mut self.faces {
            face.offset_vertices(offset);
        }
    }

    /// Offsets cap face normal indices, as when appending to a mesh.
    pub fn add_value_to_face_normal_indices(&mut self, offset: usize) {
        for face in &mut self.faces {
            face.offset_normals(offset);
        }
    }
}

/// Normal of ring sample `i`: the table edge normal for flat rings, the
/// radial direction otherwise.
fn ring_normal(list: &AngleList, i: usize) -> Coord {
    let angle = list.angles[i];
    list.normals
        .get(i)
        .copied()
        .unwrap_or_else(|| Coord::new(angle.x, angle.y, 0.0))
}

/// Triangulates the annulus between the outer ring and the reversed
/// hollow ring that follows it.
fn stitch_rings(outer: &AngleList, hollow: &AngleList) -> Vec<Face> {
    use config::constants::RING_STITCH_TOLERANCE;

    let num_outer = outer.len();
    let num_hollow = hollow.len();
    let total = num_outer + num_hollow;
    let mut faces = Vec::with_capacity(num_outer + num_hollow);

    if num_outer == num_hollow {
        for c in 0..num_outer.saturating_sub(1) {
            faces.push(Face::new(c, c + 1, total - c - 1));
            faces.push(Face::new(c + 1, total - c - 2, total - c - 1));
        }
        return faces;
    }

    // Greedy walk: advance whichever ring's next sample is due first.
    if num_outer < num_hollow {
        let mut j = 0;
        let max_j = num_outer - 1;
        for i in 0..num_hollow - 1 {
            let h = hollow.angles[i].angle;
            if j < max_j {
                let ahead = outer.angles[j + 1].angle - h;
                let behind = h - outer.angles[j].angle;
                if ahead < behind + RING_STITCH_TOLERANCE {
                    faces.push(Face::new(total - i - 1, j, j + 1));
                    j += 1;
                }
            }
            faces.push(Face::new(j, total - i - 2, total - i - 1));
        }
        while j < max_j {
            faces.push(Face::new(num_outer, j, j + 1));
            j += 1;
        }
    } else {
        let mut j = 0;
        let max_j = num_hollow - 1;
        for i in 0..num_outer - 1 {
            let o = outer.angles[i].angle;
            if j < max_j {
                let ahead = hollow.angles[j + 1].angle - o;
                let behind = o - hollow.angles[j].angle;
                if ahead < behind + RING_STITCH_TOLERANCE {
                    faces.push(Face::new(i, total - j - 2, total - j - 1));
                    j += 1;
                }
            }
            faces.push(Face::new(total - j - 1, i, i + 1));
        }
        while j < max_j {
            faces.push(Face::new(num_outer - 1, total - j - 2, total - j - 1));
            j += 1;
        }
    }

    faces
}
