//! Arena slot handles.
//!
//! Vertices, edges and half-edges live in dense vectors owned by the
//! [`Taxonomy`](super::Taxonomy); these newtypes are their indices. They are only
//! meaningful for the taxonomy that produced them.

use serde::{Deserialize, Serialize};

/// External concept identifier supplied by the loader (SNOMED-CT ids exceed `i32`).
pub type ConceptId = u64;

macro_rules! slot_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Builds a handle from a raw slot index.
            ///
            /// `idx` must come from an arena of the taxonomy, whose build phase
            /// never grows past `u32::MAX` slots.
            #[inline(always)]
            #[allow(clippy::cast_possible_truncation)]
            pub fn from_index(idx: usize) -> Self {
                debug_assert!(u32::try_from(idx).is_ok(), "slot index {idx} exceeds u32::MAX");
                Self(idx as u32)
            }

            /// Builds a handle from a raw slot index, or `None` if it does not fit in 32 bits.
            #[inline]
            pub fn try_from_index(idx: usize) -> Option<Self> {
                u32::try_from(idx).ok().map(Self)
            }

            /// Returns the raw 0-based slot index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

slot_handle!(
    /// Slot of a [`Vertex`](super::Vertex) in its taxonomy.
    VertexId
);
slot_handle!(
    /// Slot of a non-oriented [`Edge`](super::Edge).
    EdgeId
);
slot_handle!(
    /// Slot of an oriented [`HalfEdge`](super::HalfEdge).
    ///
    /// Half-edges are allocated in pairs: `2e` is the direct (child → parent)
    /// arc of edge `e` and `2e + 1` its inverse, so the opposite is `h ^ 1`.
    HalfEdgeId
);

impl HalfEdgeId {
    /// The opposite half-edge of the same edge.
    #[inline(always)]
    pub fn opposite(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// The edge owning this half-edge.
    #[inline(always)]
    pub fn edge(self) -> EdgeId {
        EdgeId(self.0 >> 1)
    }
}

impl EdgeId {
    /// The child → parent half-edge.
    #[inline(always)]
    pub fn direct(self) -> HalfEdgeId {
        HalfEdgeId(self.0 << 1)
    }

    /// The parent → child half-edge.
    #[inline(always)]
    pub fn inverse(self) -> HalfEdgeId {
        HalfEdgeId((self.0 << 1) | 1)
    }
}
