//! Core DCEL data structures.
//!
//! This module provides the doubly connected edge list built from an
//! indexed triangle mesh, and the records it is made of.
//!
//! # Overview
//!
//! The primary type is [`Dcel`]. It owns a [`VertexRegistry`] (one
//! [`Vertex`] per source position), a [`HalfEdgeArena`] (three
//! [`HalfEdge`]s per triangle) and one [`Face`] per triangle. Each half-edge
//! is linked to the next half-edge of its face and, when the neighbouring
//! triangle exists, to its reversed **twin** on that triangle.
//!
//! # Index Types
//!
//! Records are identified by type-safe index wrappers:
//! - [`VertexId`] - position in the source vertex buffer
//! - [`HalfEdgeId`] - slot in the half-edge arena
//! - [`FaceId`] - position of the triangle in the source index buffer
//!
//! # Construction
//!
//! ```
//! use dcel::mesh::{Dcel, FaceId};
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let dcel = Dcel::new(&positions, &[0, 1, 2, 0, 2, 3]).unwrap();
//!
//! // Only the diagonal is shared.
//! assert_eq!(
//!     dcel.adjacent_faces(FaceId::new(0)),
//!     [Some(FaceId::new(1)), None, None]
//! );
//! ```

mod builder;
mod dcel;
mod halfedge;
mod index;
mod vertex;

pub use builder::{
    build_from_indices, build_from_indices_with_options, build_from_triangles,
    build_with_options, BuildOptions, BuildStats, NonManifoldPolicy, MAX_ELEMENTS,
};
pub use dcel::Dcel;
pub use halfedge::{Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeArena};
pub use index::{FaceId, HalfEdgeId, VertexId};
pub use vertex::{Vertex, VertexRegistry};
