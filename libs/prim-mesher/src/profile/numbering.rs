//! # Facet Numbering
//!
//! Assigns the legacy prim face number of every side strip. Each profile
//! vertex carries the number of the strip that starts at it.
//!
//! Numbering runs in two stages:
//! 1. Definite ids in ring order: outer ring, hollow ring, bottom cap.
//!    Cut strips only reserve an open slot.
//! 2. Open slots take the next free ids in vertex order.
//!
//! Facet 0 is always the top cap.

use config::constants::CURVED_MIN_SIDES;

/// Id of the top cap facet.
pub const TOP_FACE_NUMBER: usize = 0;

/// Shape of a profile ring layout, as far as numbering is concerned.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RingLayout {
    pub has_center: bool,
    pub has_cut: bool,
    pub num_outer_verts: usize,
    pub num_hollow_verts: usize,
    pub sides: i32,
    pub hollow_sides: i32,
}

/// Result of numbering a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FacetNumbers {
    pub face_numbers: Vec<usize>,
    pub bottom_face_number: usize,
    pub num_prim_faces: usize,
}

/// Two-stage facet id builder.
#[derive(Debug)]
pub(crate) struct FaceNumbering {
    slots: Vec<Option<usize>>,
    next: usize,
}

impl FaceNumbering {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next: TOP_FACE_NUMBER + 1,
        }
    }

    fn take(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }

    fn assign(&mut self, id: usize) {
        self.slots.push(Some(id));
    }

    fn open(&mut self) {
        self.slots.push(None);
    }

    /// Numbers one ring of `count` vertices.
    ///
    /// Flat rings give every edge its own id, curved rings share one. The
    /// last vertex starts no ring edge; it gets an open slot when a cut
    /// strip starts there.
    fn ring(&mut self, count: usize, flat: bool, cut_after: bool) {
        if count == 0 {
            return;
        }

        let shared = self.next;
        let mut last_id = shared;
        for _ in 0..count - 1 {
            last_id = if flat { self.take() } else { shared };
            self.assign(last_id);
        }
        if !flat {
            self.next += 1;
        }

        if cut_after {
            self.open();
        } else {
            self.assign(last_id);
        }
    }

    /// Stage two: fills open slots in vertex order.
    fn finish(mut self, bottom_face_number: usize) -> FacetNumbers {
        let mut face_numbers = Vec::with_capacity(self.slots.len());
        let slots = std::mem::take(&mut self.slots);
        for slot in slots {
            let id = match slot {
                Some(id) => id,
                None => self.take(),
            };
            face_numbers.push(id);
        }

        FacetNumbers {
            face_numbers,
            bottom_face_number,
            num_prim_faces: self.next,
        }
    }
}

/// Numbers every strip of a ring layout.
pub(crate) fn number_facets(layout: &RingLayout) -> FacetNumbers {
    let curved_min = CURVED_MIN_SIDES as i32;
    let mut numbering = FaceNumbering::new();

    if layout.has_center {
        if layout.has_cut {
            numbering.open();
        } else {
            numbering.assign(numbering.next);
        }
    }

    numbering.ring(
        layout.num_outer_verts,
        layout.sides < curved_min,
        layout.has_cut,
    );
    numbering.ring(
        layout.num_hollow_verts,
        layout.hollow_sides < curved_min,
        layout.has_cut,
    );

    let bottom = numbering.take();
    numbering.finish(bottom)
}
