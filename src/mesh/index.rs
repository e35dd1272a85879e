//! Index types for DCEL records.
//!
//! Vertices, half-edges and faces live in flat arenas and are addressed by
//! these type-safe wrappers. A [`VertexId`] always equals the vertex's
//! position in the source buffer, and a [`FaceId`] always equals the
//! triangle's position in the source index buffer.
//!
//! Ids are 32 bits wide, so a DCEL holds at most
//! [`MAX_ELEMENTS`](super::MAX_ELEMENTS) vertices and as many half-edges.

use std::fmt::{self, Debug, Display};

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(u32);

/// A type-safe half-edge index into the half-edge arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId(u32);

/// A type-safe face index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId(u32);

macro_rules! impl_id {
    ($name:ident, $tag:literal) => {
        impl $name {
            /// Create an id from a raw arena position.
            ///
            /// # Panics
            /// Panics in debug builds if `index` does not fit in 32 bits.
            /// The builders reject larger meshes up front with
            /// [`DcelError::TooManyElements`](crate::error::DcelError::TooManyElements).
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(
                    index <= u32::MAX as usize,
                    "{} index {} exceeds u32",
                    $tag,
                    index
                );
                Self(index as u32)
            }

            /// The raw arena position.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $tag, self.0)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> usize {
                id.index()
            }
        }
    };
}

impl_id!(VertexId, "V");
impl_id!(HalfEdgeId, "HE");
impl_id!(FaceId, "F");

impl HalfEdgeId {
    /// The `slot`-th half-edge (0, 1 or 2) of a face's ring.
    ///
    /// Rings are laid out contiguously: face `i` owns arena slots
    /// `3i`, `3i + 1` and `3i + 2` in ring order.
    #[inline]
    pub(crate) fn ring_slot(face: FaceId, slot: usize) -> Self {
        debug_assert!(slot < 3);
        Self::new(face.index() * 3 + slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_index() {
        let v = VertexId::new(42);
        assert_eq!(v.index(), 42);
        assert_eq!(usize::from(v), 42);
        assert_eq!(VertexId::from(42), v);
    }

    #[test]
    fn test_debug_and_display() {
        assert_eq!(format!("{:?}", FaceId::new(7)), "F(7)");
        assert_eq!(format!("{:?}", HalfEdgeId::new(3)), "HE(3)");
        assert_eq!(format!("{}", VertexId::new(9)), "9");
    }

    #[test]
    fn test_ring_slots_are_contiguous() {
        let f = FaceId::new(4);
        assert_eq!(HalfEdgeId::ring_slot(f, 0).index(), 12);
        assert_eq!(HalfEdgeId::ring_slot(f, 1).index(), 13);
        assert_eq!(HalfEdgeId::ring_slot(f, 2).index(), 14);
    }
}
