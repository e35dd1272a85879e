//! Error types for DCEL construction and queries.

use thiserror::Error;

use crate::mesh::{FaceId, HalfEdgeId, VertexId};

/// Result type alias using [`DcelError`].
pub type Result<T> = std::result::Result<T, DcelError>;

/// Errors that can occur while building or querying a DCEL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DcelError {
    /// A flat index buffer whose length is not a multiple of three.
    #[error("index buffer length {len} is not a multiple of 3")]
    MalformedIndexBuffer {
        /// Length of the offending buffer.
        len: usize,
    },

    /// A triangle references a vertex outside the position buffer.
    #[error("face {face} references invalid vertex index {vertex} (vertex count {num_vertices})")]
    InvalidVertexIndex {
        /// The triangle index.
        face: usize,
        /// The out-of-range vertex index.
        vertex: usize,
        /// Number of vertices in the position buffer.
        num_vertices: usize,
    },

    /// A triangle repeats a vertex.
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The triangle index.
        face: usize,
    },

    /// More than one half-edge matched as the reverse of a directed edge.
    #[error("edge ({tail}, {head}) has more than one reverse half-edge")]
    NonManifoldEdge {
        /// Tail vertex of the half-edge being matched.
        tail: VertexId,
        /// Head vertex of the half-edge being matched.
        head: VertexId,
    },

    /// The mesh has more vertices or half-edges than 32-bit ids can address.
    #[error("too many {kind}: {count} exceeds the 32-bit id range")]
    TooManyElements {
        /// Which element overflowed: `"vertices"` or `"half-edges"`.
        kind: &'static str,
        /// The requested count.
        count: usize,
    },

    /// An adjacency query crossed an edge with no twin.
    #[error("face {face} has boundary half-edge {halfedge:?} with no adjacent face")]
    BoundaryEdge {
        /// The queried face.
        face: FaceId,
        /// The twin-less half-edge.
        halfedge: HalfEdgeId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_defect() {
        let err = DcelError::InvalidVertexIndex {
            face: 2,
            vertex: 9,
            num_vertices: 4,
        };
        assert_eq!(
            err.to_string(),
            "face 2 references invalid vertex index 9 (vertex count 4)"
        );

        let err = DcelError::NonManifoldEdge {
            tail: VertexId::new(1),
            head: VertexId::new(3),
        };
        assert_eq!(err.to_string(), "edge (1, 3) has more than one reverse half-edge");

        let err = DcelError::TooManyElements {
            kind: "half-edges",
            count: 12,
        };
        assert_eq!(err.to_string(), "too many half-edges: 12 exceeds the 32-bit id range");
    }
}
