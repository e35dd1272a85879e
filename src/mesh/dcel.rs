//! The built DCEL and its query surface.

use nalgebra::{Point3, Vector3};

use super::builder::{self, BuildOptions, BuildStats};
use super::halfedge::{Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeArena};
use super::index::{FaceId, HalfEdgeId, VertexId};
use super::vertex::{Vertex, VertexRegistry};
use crate::error::{DcelError, Result};

/// A doubly connected edge list over a triangle mesh.
///
/// Owns the vertex registry, the half-edge arena and the faces. A `Dcel` is
/// only handed out fully built: every twin that can be resolved has been,
/// and the structure is read-only from then on.
#[derive(Debug, Clone)]
pub struct Dcel {
    pub(crate) vertices: VertexRegistry,
    pub(crate) halfedges: HalfEdgeArena,
    pub(crate) faces: Vec<Face>,
    pub(crate) stats: BuildStats,
}

impl Dcel {
    /// Build from a position buffer and a flat triangle index buffer.
    pub fn new(positions: &[Point3<f64>], indices: &[usize]) -> Result<Self> {
        builder::build_from_indices(positions, indices)
    }

    /// Build from a flat triangle index buffer with explicit options.
    pub fn with_options(
        positions: &[Point3<f64>],
        indices: &[usize],
        options: &BuildOptions,
    ) -> Result<Self> {
        builder::build_from_indices_with_options(positions, indices, options)
    }

    /// Build from positions and grouped triangles.
    pub fn from_triangles(positions: &[Point3<f64>], triangles: &[[usize; 3]]) -> Result<Self> {
        builder::build_from_triangles(positions, triangles)
    }

    // ==================== Accessors ====================

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of half-edges (always three per face).
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Number of undirected edges: twin pairs plus twin-less half-edges.
    pub fn num_edges(&self) -> usize {
        self.stats.twins_linked + self.stats.boundary_halfedges
    }

    /// Counters gathered during construction.
    #[inline]
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Get a vertex by id.
    #[inline]
    pub fn vertex(&self, v: VertexId) -> &Vertex {
        self.vertices.get(v)
    }

    /// Get a face by id.
    #[inline]
    pub fn face(&self, f: FaceId) -> &Face {
        &self.faces[f.index()]
    }

    /// Get a face by id, or `None` if out of range.
    #[inline]
    pub fn try_face(&self, f: FaceId) -> Option<&Face> {
        self.faces.get(f.index())
    }

    /// Get a half-edge by id.
    #[inline]
    pub fn halfedge(&self, he: HalfEdgeId) -> &HalfEdge {
        self.halfedges.get(he)
    }

    /// The position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Half-edges touching `v`, in discovery order.
    #[inline]
    pub fn incident_edges(&self, v: VertexId) -> &[HalfEdgeId] {
        self.vertex(v).incident_edges()
    }

    // ==================== Topology ====================

    /// The vertex `he` points to.
    #[inline]
    pub fn head(&self, he: HalfEdgeId) -> VertexId {
        self.halfedges.head(he)
    }

    /// The vertex `he` leaves.
    #[inline]
    pub fn tail(&self, he: HalfEdgeId) -> VertexId {
        self.halfedges.tail(he)
    }

    /// The next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.halfedges.next(he)
    }

    /// The reversed half-edge on the adjacent face, if any.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        self.halfedges.twin(he)
    }

    /// The face `he` bounds.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId) -> FaceId {
        self.halfedges.face_of(he)
    }

    /// Iterate over the half-edges of a face, in ring order.
    pub fn face_halfedges(&self, f: FaceId) -> FaceHalfEdgeIter<'_> {
        self.halfedges.ring(self.face(f).edge)
    }

    /// Call `visit` on each half-edge of a face, in ring order.
    pub fn for_edges<F>(&self, f: FaceId, mut visit: F)
    where
        F: FnMut(HalfEdgeId, &HalfEdge),
    {
        for he in self.face_halfedges(f) {
            visit(he, self.halfedge(he));
        }
    }

    /// The ring of `f` as an array.
    fn ring(&self, f: FaceId) -> [HalfEdgeId; 3] {
        let e0 = self.face(f).edge;
        let e1 = self.next(e0);
        [e0, e1, self.next(e1)]
    }

    /// The faces across each edge of `f`, in ring order.
    ///
    /// A boundary edge has no neighbour and yields `None`.
    pub fn adjacent_faces(&self, f: FaceId) -> [Option<FaceId>; 3] {
        self.ring(f)
            .map(|he| self.twin(he).map(|twin| self.face_of(twin)))
    }

    /// The faces across each edge of `f`, failing on a boundary edge.
    pub fn adjacent_faces_strict(&self, f: FaceId) -> Result<[FaceId; 3]> {
        let ring = self.ring(f);
        let mut adjacent = [f; 3];
        for (slot, he) in adjacent.iter_mut().zip(ring) {
            let twin = self
                .twin(he)
                .ok_or(DcelError::BoundaryEdge { face: f, halfedge: he })?;
            *slot = self.face_of(twin);
        }
        Ok(adjacent)
    }

    /// The head vertex of each half-edge of `f`, in ring order.
    ///
    /// The ring starts at the edge into the triangle's first vertex, so for
    /// a triangle `(a, b, c)` this is `[a, b, c]`.
    pub fn face_vertices(&self, f: FaceId) -> [VertexId; 3] {
        self.ring(f).map(|he| self.head(he))
    }

    /// Whether every half-edge has a twin.
    pub fn is_closed(&self) -> bool {
        self.stats.boundary_halfedges == 0
    }

    /// Number of half-edges without a twin.
    pub fn count_untwinned_halfedges(&self) -> usize {
        self.boundary_halfedges().count()
    }

    /// Iterate over half-edges without a twin.
    pub fn boundary_halfedges(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.halfedges
            .iter()
            .filter(|(_, he)| he.is_boundary())
            .map(|(id, _)| id)
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices.iter()
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all faces.
    pub fn faces(&self) -> impl Iterator<Item = &Face> + '_ {
        self.faces.iter()
    }

    /// Iterate over all half-edges with their IDs.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId, &HalfEdge)> + '_ {
        self.halfedges.iter()
    }

    // ==================== Geometry ====================

    /// Positions of a face's vertices in source winding order.
    pub fn face_positions(&self, f: FaceId) -> [Point3<f64>; 3] {
        self.face_vertices(f).map(|v| *self.position(v))
    }

    /// Unit normal of a face (right-handed with respect to its winding).
    pub fn face_normal(&self, f: FaceId) -> Vector3<f64> {
        let [p0, p1, p2] = self.face_positions(f);
        (p1 - p0).cross(&(p2 - p0)).normalize()
    }

    /// Centroid of a face.
    pub fn face_centroid(&self, f: FaceId) -> Point3<f64> {
        let [p0, p1, p2] = self.face_positions(f);
        Point3::from((p0.coords + p1.coords + p2.coords) / 3.0)
    }

    // ==================== Validation ====================

    /// Check ring closure, face back-references, index stability and twin
    /// symmetry.
    pub fn is_valid(&self) -> bool {
        for (i, face) in self.faces.iter().enumerate() {
            if face.index.index() != i {
                return false;
            }
            let [e0, e1, e2] = self.ring(face.index);
            if self.next(e2) != e0 {
                return false;
            }
            if [e0, e1, e2].iter().any(|&he| self.face_of(he) != face.index) {
                return false;
            }
            if self.head(e0) != self.tail(e1)
                || self.head(e1) != self.tail(e2)
                || self.head(e2) != self.tail(e0)
            {
                return false;
            }
        }

        for (vid, v) in self.vertices() {
            if v.index != vid {
                return false;
            }
        }

        for (id, he) in self.halfedges() {
            if let Some(twin) = he.twin {
                let t = self.halfedge(twin);
                if t.twin != Some(id) || he.head != t.tail || he.tail != t.head {
                    return false;
                }
            }
        }

        true
    }

    /// Convert back to a face-vertex representation.
    pub fn to_face_vertex(&self) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        let positions = self.vertices().map(|(_, v)| v.position).collect();
        let triangles = self
            .face_ids()
            .map(|f| self.face_vertices(f).map(VertexId::index))
            .collect();
        (positions, triangles)
    }
}
