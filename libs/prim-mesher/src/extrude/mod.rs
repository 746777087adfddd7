//! # Extrusion Engine
//!
//! Sweeps a [`Profile`] along a path to build a closed prim mesh:
//! - **extrude_linear**: straight path (box, cylinder, prism)
//! - **extrude_circular**: circular path (torus, tube, ring)
//!
//! Each path step copies the base profile, deforms it (taper, twist, path
//! position) and appends it as a layer. Side strips join consecutive
//! layers; the first and last layers become the end caps.

mod circular;
mod linear;


use config::constants::{
    CURVED_MIN_SIDES, DEFAULT_HOLE_SIZE_X, DEFAULT_HOLE_SIZE_Y, DEFAULT_STEPS_PER_REVOLUTION,
    MAX_HOLLOW, MAX_REVOLUTIONS, MIN_HOLLOW, MIN_PATH_SPAN, MIN_PROFILE_END, MIN_PROFILE_SPAN,
    MIN_REVOLUTIONS, MIN_SIDES,
};

use crate::error::{MesherError, MesherResult};
use crate::face::{Face, ViewerFace};
use crate::math::{self, Coord, Quat, UvCoord};
use crate::profile::{EdgeKind, Profile, SideEdge};

/// A prim mesh and the parameters it is extruded from.
///
/// Profile parameters are clamped once by [`PrimMesh::new`]; path
/// parameters are public and clamped when an extrusion starts.
#[derive(Debug, Clone)]
pub struct PrimMesh {
    pub coords: Vec<Coord>,
    pub normals: Vec<Coord>,
    pub faces: Vec<Face>,
    pub viewer_faces: Vec<ViewerFace>,

    pub sides: i32,
    pub hollow_sides: i32,
    pub profile_start: f64,
    pub profile_end: f64,
    pub hollow: f64,

    /// Twist at the path start, in degrees.
    pub twist_begin: f64,
    /// Twist at the path end, in degrees.
    pub twist_end: f64,
    pub top_shear_x: f64,
    pub top_shear_y: f64,
    pub path_cut_begin: f64,
    pub path_cut_end: f64,
    pub hole_size_x: f64,
    pub hole_size_y: f64,
    pub taper_x: f64,
    pub taper_y: f64,
    pub radius: f64,
    pub revolutions: f64,
    pub skew: f64,
    pub steps_per_revolution: i32,

    /// Number of facet ids used by the last extrusion.
    pub num_prim_faces: usize,
    /// Facet ids of the two profile cut faces of the last extrusion.
    pub cut_face_numbers: Option<[usize; 2]>,

    has_profile_cut: bool,
    has_hollow: bool,
    normals_processed: bool,
}

impl PrimMesh {
    /// Creates an empty mesh with clamped profile parameters and default
    /// path parameters.
    ///
    /// # Examples
    /// ```
    /// use prim_mesher::PrimMesh;
    /// let mesh = PrimMesh::new(2, 0.0, 1.0, 1.5, 4);
    /// assert_eq!(mesh.sides, 3);
    /// assert_eq!(mesh.hollow, 0.99);
    /// assert!(mesh.has_hollow());
    /// ```
    pub fn new(
        sides: i32,
        profile_start: f64,
        profile_end: f64,
        hollow: f64,
        hollow_sides: i32,
    ) -> Self {
        let min_sides = MIN_SIDES as i32;
        let sides = sides.max(min_sides);
        let hollow_sides = hollow_sides.max(min_sides);

        let profile_start = profile_start.max(0.0);
        let profile_end = profile_end.min(1.0).max(MIN_PROFILE_END);
        let profile_start = if profile_start >= profile_end {
            profile_end - MIN_PROFILE_SPAN
        } else {
            profile_start
        };

        let hollow = if hollow.is_nan() {
            0.0
        } else {
            hollow.clamp(0.0, MAX_HOLLOW)
        };
        let hollow = if hollow <= MIN_HOLLOW { 0.0 } else { hollow };

        Self {
            coords: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
            viewer_faces: Vec::new(),
            sides,
            hollow_sides,
            profile_start,
            profile_end,
            hollow,
            twist_begin: 0.0,
            twist_end: 0.0,
            top_shear_x: 0.0,
            top_shear_y: 0.0,
            path_cut_begin: 0.0,
            path_cut_end: 1.0,
            hole_size_x: DEFAULT_HOLE_SIZE_X,
            hole_size_y: DEFAULT_HOLE_SIZE_Y,
            taper_x: 0.0,
            taper_y: 0.0,
            radius: 0.0,
            revolutions: 1.0,
            skew: 0.0,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            num_prim_faces: 0,
            cut_face_numbers: None,
            has_profile_cut: profile_start > 0.0 || profile_end < 1.0,
            has_hollow: hollow > 0.0,
            normals_processed: false,
        }
    }

    /// True when part of the profile circumference is cut away.
    pub fn has_profile_cut(&self) -> bool {
        self.has_profile_cut
    }

    pub fn has_hollow(&self) -> bool {
        self.has_hollow
    }

    // =========================================================================
    // EXTRUSION SUPPORT
    // =========================================================================

    /// Drops any previous extrusion.
    fn reset(&mut self) {
        self.coords.clear();
        self.normals.clear();
        self.faces.clear();
        self.viewer_faces.clear();
        self.normals_processed = false;
    }

    /// Rejects non-finite path parameters, then clamps the path cut and
    /// revolutions into their usable ranges.
    fn prepare_path(&mut self) -> MesherResult<()> {
        let params = [
            ("twist_begin", self.twist_begin),
            ("twist_end", self.twist_end),
            ("top_shear_x", self.top_shear_x),
            ("top_shear_y", self.top_shear_y),
            ("path_cut_begin", self.path_cut_begin),
            ("path_cut_end", self.path_cut_end),
            ("hole_size_x", self.hole_size_x),
            ("hole_size_y", self.hole_size_y),
            ("taper_x", self.taper_x),
            ("taper_y", self.taper_y),
            ("radius", self.radius),
            ("revolutions", self.revolutions),
            ("skew", self.skew),
        ];
        if let Some(&(name, value)) = params.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MesherError::NonFiniteParameter { name, value });
        }

        let begin = self.path_cut_begin.clamp(0.0, 1.0 - MIN_PATH_SPAN);
        self.path_cut_begin = begin;
        self.path_cut_end = self.path_cut_end.min(1.0).max(begin + MIN_PATH_SPAN);
        self.revolutions = self.revolutions.clamp(MIN_REVOLUTIONS, MAX_REVOLUTIONS);
        Ok(())
    }

    /// Appends a layer's vertices and normals, and its cap faces when
    /// `with_faces` is set. Returns the index of the layer's first vertex.
    fn append_layer(&mut self, layer: &Profile, with_faces: bool) -> usize {
        let vertex_base = self.coords.len();
        let normal_base = self.normals.len();

        self.coords.extend_from_slice(&layer.coords);
        self.normals.extend_from_slice(&layer.vertex_normals);

        if with_faces {
            self.faces.extend(layer.faces.iter().map(|face| {
                let mut face = *face;
                face.offset_vertices(vertex_base);
                face.offset_normals(normal_base);
                face
            }));
        }

        vertex_base
    }

    /// Emits a layer's cap triangles as viewer faces.
    fn add_cap(&mut self, layer: &Profile, prim_face_number: usize, flip_uvs: bool) {
        let normal = layer.face_normal;
        self.viewer_faces.extend(layer.faces.iter().map(|face| {
            let uv = face.v.map(|i| {
                let uv = layer.face_uvs[i];
                if flip_uvs {
                    uv.flip()
                } else {
                    uv
                }
            });
            ViewerFace {
                v: face.v.map(|i| layer.coords[i]),
                n: [normal; 3],
                uv,
                prim_face_number,
            }
        }));
    }

    /// Joins the layer at `strips.base` to the one at `strips.prev_base`.
    fn add_side_strips(&mut self, layer: &Profile, edges: &[SideEdge], strips: &StripParams) {
        for edge in edges {
            let c_from = strips.base + edge.from;
            let c_to = strips.base + edge.to;
            let p_from = strips.prev_base + edge.from;
            let p_to = strips.prev_base + edge.to;
            let prim_face = layer.face_numbers[edge.from];

            let mut face1 = Face::new(c_from, p_from, p_to);
            let mut face2 = Face::new(c_from, p_to, c_to);
            face1.prim_face = prim_face;
            face2.prim_face = prim_face;
            self.faces.push(face1);
            self.faces.push(face2);

            let (u1, u2) = strip_us(layer, edge, strips.sides);
            let v_now = strips.v_now;
            let v_last = strips.v_last;

            let mut vf1 = ViewerFace::new(prim_face);
            vf1.v = [self.coords[c_from], self.coords[p_from], self.coords[p_to]];
            vf1.uv = [
                UvCoord::new(u1, v_now),
                UvCoord::new(u1, v_last),
                UvCoord::new(u2, v_last),
            ];

            let mut vf2 = ViewerFace::new(prim_face);
            vf2.v = [self.coords[c_from], self.coords[p_to], self.coords[c_to]];
            vf2.uv = [
                UvCoord::new(u1, v_now),
                UvCoord::new(u2, v_last),
                UvCoord::new(u2, v_now),
            ];

            let flat = match edge.kind {
                EdgeKind::Outer => is_flat(strips.sides),
                EdgeKind::Hollow => is_flat(strips.hollow_sides),
                EdgeKind::Cut1 | EdgeKind::Cut2 => false,
            };

            match edge.kind {
                EdgeKind::Cut1 | EdgeKind::Cut2 => {
                    let (now, last) = if edge.kind == EdgeKind::Cut1 {
                        (layer.cut_normal1, strips.last_cut_normals[0])
                    } else {
                        (layer.cut_normal2, strips.last_cut_normals[1])
                    };
                    vf1.n = [now, last, last];
                    vf2.n = [now, last, now];
                }
                _ if flat => match strips.flat_shading {
                    FlatShading::SurfaceNormal => {
                        vf1.calc_surface_normal();
                        vf2.calc_surface_normal();
                    }
                    FlatShading::EdgeNormal => {
                        // Ring normals are stored at the vertex that starts
                        // the edge in angle order; the hollow ring runs
                        // backwards.
                        let (c, p) = if edge.kind == EdgeKind::Hollow {
                            (c_to, p_to)
                        } else {
                            (c_from, p_from)
                        };
                        let (nc, np) = (self.normals[c], self.normals[p]);
                        vf1.n = [nc, np, np];
                        vf2.n = [nc, np, nc];
                    }
                },
                _ => {
                    vf1.n = [
                        self.normals[c_from],
                        self.normals[p_from],
                        self.normals[p_to],
                    ];
                    vf2.n = [self.normals[c_from], self.normals[p_to], self.normals[c_to]];
                }
            }

            self.viewer_faces.push(vf1);
            self.viewer_faces.push(vf2);
        }
    }

    // =========================================================================
    // NORMALS
    // =========================================================================

    /// Flat normal of an indexed face.
    ///
    /// # Errors
    ///
    /// `FaceIndexOutOfRange` when `face_index` does not name a face.
    pub fn surface_normal(&self, face_index: usize) -> MesherResult<Coord> {
        let face = self
            .faces
            .get(face_index)
            .ok_or(MesherError::FaceIndexOutOfRange {
                index: face_index,
                count: self.faces.len(),
            })?;
        let [a, b, c] = face.v.map(|i| self.coords[i]);
        Ok(math::surface_normal(a, b, c))
    }

    /// Replaces the normals with one flat normal per indexed face.
    ///
    /// Runs once per extrusion; later calls leave the normals as they are.
    pub fn calc_normals(&mut self) -> MesherResult<()> {
        if self.normals_processed {
            return Ok(());
        }

        let normals = (0..self.faces.len())
            .map(|i| self.surface_normal(i))
            .collect::<MesherResult<Vec<_>>>()?;

        for (i, face) in self.faces.iter_mut().enumerate() {
            face.n = [i; 3];
        }
        self.normals = normals;
        self.normals_processed = true;
        Ok(())
    }

    // =========================================================================
    // WHOLE-MESH TRANSFORMS
    // =========================================================================

    /// Translates every vertex.
    pub fn add_pos(&mut self, offset: Coord) {
        for c in &mut self.coords {
            *c += offset;
        }
        for face in &mut self.viewer_faces {
            face.add_pos(offset);
        }
    }

    /// Rotates vertices, normals and viewer faces.
    pub fn add_rot(&mut self, q: Quat) {
        for c in &mut self.coords {
            *c = math::rotate(*c, q);
        }
        for n in &mut self.normals {
            *n = math::rotate(*n, q);
        }
        for face in &mut self.viewer_faces {
            face.add_rot(q);
        }
    }

    /// Scales vertices and viewer faces componentwise.
    pub fn scale(&mut self, x: f64, y: f64, z: f64) {
        let m = Coord::new(x, y, z);
        for c in &mut self.coords {
            *c *= m;
        }
        for face in &mut self.viewer_faces {
            face.scale(x, y, z);
        }
    }
}

/// How flat-sided strips get their normals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlatShading {
    /// Normal of each generated triangle.
    SurfaceNormal,
    /// The profile's analytic edge normal, carried through the layer
    /// transform.
    EdgeNormal,
}

/// Per-step inputs of [`PrimMesh::add_side_strips`].
#[derive(Debug, Clone, Copy)]
struct StripParams {
    base: usize,
    prev_base: usize,
    v_now: f64,
    v_last: f64,
    last_cut_normals: [Coord; 2],
    sides: i32,
    hollow_sides: i32,
    flat_shading: FlatShading,
}

/// U range of a side strip.
///
/// Cut strips span the whole texture; flat outer sides each span it once.
fn strip_us(layer: &Profile, edge: &SideEdge, sides: i32) -> (f64, f64) {
    match edge.kind {
        EdgeKind::Cut1 | EdgeKind::Cut2 => (0.0, 1.0),
        EdgeKind::Outer if is_flat(sides) => {
            let mut u1 = layer.us[edge.from] * f64::from(sides);
            let mut u2 = layer.us[edge.to] * f64::from(sides);
            let whole = u1.trunc();
            u1 -= whole;
            u2 -= whole;
            if u2 < 0.1 {
                u2 = 1.0;
            }
            (u1, u2)
        }
        _ => (layer.us[edge.from], layer.us[edge.to]),
    }
}

/// Triangles and squares have flat sides; more sides approximate a curve.
fn is_flat(sides: i32) -> bool {
    sides < CURVED_MIN_SIDES as i32
}

/// Profile scale from a taper at `percent` of the path.
fn linear_taper(taper: f64, percent: f64) -> f64 {
    if taper > 0.0 {
        1.0 - percent * taper
    } else if taper < 0.0 {
        1.0 + (1.0 - percent) * taper
    } else {
        1.0
    }
}
