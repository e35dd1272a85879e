//! Half-edge and face records.
//!
//! Every triangle owns a closed ring of three half-edges. A half-edge runs
//! from its **tail** vertex to its **head** vertex, knows the **next**
//! half-edge around its face, the **face** it bounds, and optionally its
//! **twin**: the reversed half-edge of the same undirected edge on the
//! neighbouring face.
//!
//! # Storage
//!
//! Half-edges live in a [`HalfEdgeArena`] and are addressed by
//! [`HalfEdgeId`]. Faces and vertices only store ids into the arena, so the
//! structure has no ownership cycles. The ring of face `i` occupies arena
//! slots `3i..3i + 3` in ring order.
//!
//! # Boundary Handling
//!
//! Unlike a closed half-edge mesh, no boundary half-edges are synthesized.
//! An edge that belongs to a single triangle is represented by one
//! half-edge whose `twin` is `None`.

use super::index::{FaceId, HalfEdgeId, VertexId};

/// A directed edge bounding exactly one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// The vertex this half-edge leaves.
    pub tail: VertexId,

    /// The vertex this half-edge points to.
    pub head: VertexId,

    /// The next half-edge around the face.
    pub next: HalfEdgeId,

    /// The face this half-edge bounds.
    pub face: FaceId,

    /// The reversed half-edge on the adjacent face, if any.
    pub twin: Option<HalfEdgeId>,
}

impl HalfEdge {
    /// Whether this half-edge has no twin (lies on the mesh boundary).
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.twin.is_none()
    }
}

/// A triangular face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Position of the triangle in the source index buffer.
    pub index: FaceId,

    /// The first half-edge of this face's ring.
    pub edge: HalfEdgeId,
}

/// Owning storage for all half-edges of a DCEL.
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeArena {
    halfedges: Vec<HalfEdge>,
}

impl HalfEdgeArena {
    /// Create an arena sized for `num_faces` triangles.
    pub fn with_capacity(num_faces: usize) -> Self {
        Self {
            halfedges: Vec::with_capacity(num_faces * 3),
        }
    }

    /// The three half-edge records of face `face` over `(v0, v1, v2)`.
    ///
    /// The ring is `(v2 -> v0), (v0 -> v1), (v1 -> v2)`, each linked to the
    /// following one, with no twins. Starting at the edge into `v0` makes
    /// the ring's head vertices come out as `v0, v1, v2`. This only computes
    /// the records; use [`create_ring`](Self::create_ring) to store them.
    pub fn ring_records(face: FaceId, [v0, v1, v2]: [VertexId; 3]) -> [HalfEdge; 3] {
        let he = |slot: usize| HalfEdgeId::ring_slot(face, slot);
        let record = |tail, head, next| HalfEdge {
            tail,
            head,
            next,
            face,
            twin: None,
        };
        [
            record(v2, v0, he(1)),
            record(v0, v1, he(2)),
            record(v1, v2, he(0)),
        ]
    }

    /// Create the closed ring of face `face` over `(v0, v1, v2)`.
    ///
    /// Faces must be created in index order, so that face `i`'s ring lands
    /// at slots `3i..3i + 3`.
    pub fn create_ring(&mut self, face: FaceId, vertices: [VertexId; 3]) -> Face {
        debug_assert_eq!(
            self.halfedges.len(),
            face.index() * 3,
            "rings must be created in face order"
        );
        self.halfedges
            .extend_from_slice(&Self::ring_records(face, vertices));
        Face {
            index: face,
            edge: HalfEdgeId::ring_slot(face, 0),
        }
    }

    /// Assemble an arena from rings that were computed out of order, e.g.
    /// on a thread pool. `rings[i]` must be the ring of face `i`.
    pub fn from_rings(rings: Vec<[HalfEdge; 3]>) -> (Self, Vec<Face>) {
        let faces = (0..rings.len())
            .map(|i| {
                let index = FaceId::new(i);
                Face {
                    index,
                    edge: HalfEdgeId::ring_slot(index, 0),
                }
            })
            .collect();
        let halfedges = rings.into_iter().flatten().collect();
        (Self { halfedges }, faces)
    }

    /// Number of stored half-edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.halfedges.len()
    }

    /// Whether the arena is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.halfedges.is_empty()
    }

    /// Get a half-edge by id.
    #[inline]
    pub fn get(&self, he: HalfEdgeId) -> &HalfEdge {
        &self.halfedges[he.index()]
    }

    /// The vertex `he` points to.
    #[inline]
    pub fn head(&self, he: HalfEdgeId) -> VertexId {
        self.get(he).head
    }

    /// The vertex `he` leaves.
    #[inline]
    pub fn tail(&self, he: HalfEdgeId) -> VertexId {
        self.get(he).tail
    }

    /// The next half-edge around `he`'s face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.get(he).next
    }

    /// The twin of `he`, if resolved.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        self.get(he).twin
    }

    /// The face `he` bounds.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId) -> FaceId {
        self.get(he).face
    }

    /// Link `a` and `b` as mutual twins.
    ///
    /// Both sides must be twin-less; twin resolution never relinks a pair.
    #[inline]
    pub fn set_twin(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        debug_assert!(self.twin(a).is_none() && self.twin(b).is_none());
        self.halfedges[a.index()].twin = Some(b);
        self.halfedges[b.index()].twin = Some(a);
    }

    /// Iterate over all half-edges with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (HalfEdgeId, &HalfEdge)> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId::new(i), he))
    }

    /// Iterate over the ring starting at `start`.
    pub fn ring(&self, start: HalfEdgeId) -> FaceHalfEdgeIter<'_> {
        FaceHalfEdgeIter {
            arena: self,
            start,
            current: start,
            done: false,
        }
    }
}

/// Iterator over the half-edges of a face ring, in ring order.
pub struct FaceHalfEdgeIter<'a> {
    arena: &'a HalfEdgeArena,
    start: HalfEdgeId,
    current: HalfEdgeId,
    done: bool,
}

impl<'a> Iterator for FaceHalfEdgeIter<'a> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.arena.next(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn test_create_ring_links_cycle() {
        let mut arena = HalfEdgeArena::with_capacity(1);
        let face = arena.create_ring(FaceId::new(0), [v(0), v(1), v(2)]);

        assert_eq!(arena.len(), 3);
        assert_eq!(face.edge, HalfEdgeId::new(0));

        let ring: Vec<_> = arena.ring(face.edge).collect();
        assert_eq!(ring.len(), 3);
        let edges: Vec<_> = ring
            .iter()
            .map(|&he| (arena.tail(he), arena.head(he)))
            .collect();
        assert_eq!(edges, vec![(v(2), v(0)), (v(0), v(1)), (v(1), v(2))]);

        let heads: Vec<_> = arena.ring(face.edge).map(|he| arena.head(he)).collect();
        assert_eq!(heads, vec![v(0), v(1), v(2)]);

        for he in ring {
            assert_eq!(arena.face_of(he), face.index);
            assert!(arena.get(he).is_boundary());
        }
    }

    #[test]
    fn test_ring_closes_after_three_steps() {
        let mut arena = HalfEdgeArena::default();
        arena.create_ring(FaceId::new(0), [v(0), v(1), v(2)]);
        let face = arena.create_ring(FaceId::new(1), [v(2), v(1), v(3)]);

        let start = face.edge;
        let third = arena.next(arena.next(arena.next(start)));
        assert_eq!(third, start);
        assert_eq!(start, HalfEdgeId::new(3));
    }

    #[test]
    fn test_set_twin_is_symmetric() {
        let mut arena = HalfEdgeArena::default();
        arena.create_ring(FaceId::new(0), [v(0), v(1), v(2)]);
        arena.create_ring(FaceId::new(1), [v(1), v(0), v(3)]);

        // 0 -> 1 on face 0 and 1 -> 0 on face 1, both in ring slot 1.
        let a = HalfEdgeId::new(1);
        let b = HalfEdgeId::new(4);
        arena.set_twin(a, b);

        assert_eq!(arena.twin(a), Some(b));
        assert_eq!(arena.twin(b), Some(a));
        assert_eq!(arena.head(a), arena.tail(b));
        assert_eq!(arena.tail(a), arena.head(b));
    }

    #[test]
    fn test_from_rings_matches_sequential() {
        let tris = [[v(0), v(1), v(2)], [v(2), v(1), v(3)]];

        let mut sequential = HalfEdgeArena::default();
        let seq_faces: Vec<_> = tris
            .iter()
            .enumerate()
            .map(|(i, &t)| sequential.create_ring(FaceId::new(i), t))
            .collect();

        let rings = tris
            .iter()
            .enumerate()
            .map(|(i, &t)| HalfEdgeArena::ring_records(FaceId::new(i), t))
            .collect();
        let (assembled, faces) = HalfEdgeArena::from_rings(rings);

        assert_eq!(faces, seq_faces);
        assert!(assembled
            .iter()
            .zip(sequential.iter())
            .all(|((_, a), (_, b))| a == b));
    }
}
