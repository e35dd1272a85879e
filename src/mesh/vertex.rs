//! Vertex records and the vertex registry.

use nalgebra::Point3;

use super::index::{HalfEdgeId, VertexId};

/// A mesh vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// The 3D position, copied from the source buffer.
    pub position: Point3<f64>,

    /// Position of this vertex in the source buffer.
    pub index: VertexId,

    /// Half-edges whose head or tail is this vertex, in discovery order.
    ///
    /// Filled during twin resolution; read-only once the DCEL is built.
    pub(crate) incident: Vec<HalfEdgeId>,
}

impl Vertex {
    /// Create a vertex with no incident half-edges.
    pub fn new(index: VertexId, position: Point3<f64>) -> Self {
        Self {
            position,
            index,
            incident: Vec::new(),
        }
    }

    /// Half-edges touching this vertex, in the order they were discovered.
    #[inline]
    pub fn incident_edges(&self) -> &[HalfEdgeId] {
        &self.incident
    }

    /// Whether no half-edge touches this vertex.
    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.incident.is_empty()
    }
}

/// Owning storage for all vertices, indexed by source buffer position.
#[derive(Debug, Clone, Default)]
pub struct VertexRegistry {
    vertices: Vec<Vertex>,
}

impl VertexRegistry {
    /// Build one vertex per position; vertex `i` comes from `positions[i]`.
    pub fn from_positions(positions: &[Point3<f64>]) -> Self {
        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| Vertex::new(VertexId::new(i), p))
            .collect();
        Self { vertices }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the registry holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get a vertex by id.
    #[inline]
    pub fn get(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.index()]
    }

    /// Record that `he` touches `v`.
    #[inline]
    pub(crate) fn push_incident(&mut self, v: VertexId, he: HalfEdgeId) {
        self.vertices[v.index()].incident.push(he);
    }

    /// Iterate over all vertices with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }
}
