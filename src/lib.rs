//! # dcel
//!
//! Doubly connected edge lists (half-edge structures) built from indexed
//! triangle meshes.
//!
//! Given a position buffer and a triangle index buffer, [`Dcel`](mesh::Dcel)
//! creates one face per triangle with a closed ring of three half-edges, then
//! links every half-edge to its reversed twin on the neighbouring triangle.
//! Afterwards, face adjacency and boundary traversal are O(1) lookups instead
//! of searches through the raw triangle list.
//!
//! ## Features
//!
//! - **Arena storage**: half-edges, faces and vertices addressed by type-safe
//!   indices, with no reference cycles
//! - **Explicit boundaries**: boundary edges have no twin and adjacency
//!   queries return `None` for them
//! - **Non-manifold policy**: lenient first-match twinning, or rejection
//! - **Parallel ring construction** on the rayon thread pool
//!
//! ## Quick Start
//!
//! ```
//! use dcel::prelude::*;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//! let indices = [
//!     0, 2, 1, // bottom
//!     0, 1, 3, // front
//!     1, 2, 3, // right
//!     2, 0, 3, // left
//! ];
//!
//! let dcel = Dcel::new(&positions, &indices).unwrap();
//! assert!(dcel.is_closed());
//!
//! let f = FaceId::new(0);
//! let neighbours = dcel.adjacent_faces_strict(f).unwrap();
//! assert_eq!(neighbours, [FaceId::new(1), FaceId::new(3), FaceId::new(2)]);
//! assert_eq!(dcel.face_vertices(f), [0, 2, 1].map(VertexId::new));
//! ```
//!
//! ## Options
//!
//! ```
//! use dcel::prelude::*;
//! use nalgebra::Point3;
//!
//! let positions = vec![Point3::origin(); 3];
//! let options = BuildOptions::default()
//!     .with_non_manifold(NonManifoldPolicy::Reject)
//!     .with_reject_degenerate(true)
//!     .sequential();
//!
//! let err = Dcel::with_options(&positions, &[0, 1, 1], &options).unwrap_err();
//! assert_eq!(err, DcelError::DegenerateFace { face: 0 });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mesh;
pub mod progress;

/// Prelude module for convenient imports.
///
/// ```
/// use dcel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{DcelError, Result};
    pub use crate::mesh::{
        build_from_indices, build_from_triangles, BuildOptions, Dcel, Face, FaceId, HalfEdge,
        HalfEdgeId, NonManifoldPolicy, Vertex, VertexId,
    };
    pub use crate::progress::{BuildStage, Progress};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_index_stability() {
        let positions: Vec<_> = (0..6).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let triangles = vec![[0, 1, 2], [3, 4, 5], [1, 3, 5]];
        let dcel = Dcel::from_triangles(&positions, &triangles).unwrap();

        for (i, face) in dcel.faces().enumerate() {
            assert_eq!(face.index.index(), i);
        }
        for (i, (_, vertex)) in dcel.vertices().enumerate() {
            assert_eq!(vertex.index.index(), i);
        }
    }
}
