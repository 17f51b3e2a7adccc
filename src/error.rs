//! Error type shared by taxonomy construction and structural query failures.
//!
//! "No common ancestor" and "unreachable" are **not** errors: the former is
//! reported as `None` by [`Taxonomy::lcs`](crate::Taxonomy::lcs) and
//! [`Taxonomy::mica`](crate::Taxonomy::mica), the latter as
//! [`UNREACHABLE_DISTANCE`](crate::UNREACHABLE_DISTANCE).

use crate::measures::MeasureKind;
use crate::taxonomy::ConceptId;

/// Failures raised while building or querying a [`Taxonomy`](crate::Taxonomy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyError {
    /// A vertex with this concept id was already inserted.
    DuplicateVertex(ConceptId),
    /// `vertex` names a parent that has not been inserted yet.
    UnknownParent {
        /// The vertex being inserted.
        vertex: ConceptId,
        /// The missing parent.
        parent: ConceptId,
    },
    /// No vertex carries this concept id.
    UnknownVertex(ConceptId),
    /// A slot does not belong to this taxonomy, or the arenas are full.
    InvalidSlot(usize),
    /// Structural mutation was attempted after `compute_cached_attributes`.
    Frozen,
    /// Indexing was requested on a taxonomy without vertices.
    EmptyTaxonomy,
    /// A query needs cached attributes that have not been computed.
    NotIndexed,
    /// The master vertex list cannot be cleared.
    LockedList,
    /// No constructor is registered for this measure.
    UnregisteredMeasure(MeasureKind),
}

impl core::fmt::Display for TaxonomyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DuplicateVertex(id) => write!(f, "the taxonomy already contains a vertex with id {id}"),
            Self::UnknownParent { vertex, parent } => {
                write!(f, "vertex {vertex} references unknown parent {parent}")
            }
            Self::UnknownVertex(id) => write!(f, "no vertex with id {id}"),
            Self::InvalidSlot(slot) => write!(f, "slot {slot} is out of range"),
            Self::Frozen => f.write_str("the taxonomy is frozen after computing cached attributes"),
            Self::EmptyTaxonomy => f.write_str("the taxonomy has no vertices"),
            Self::NotIndexed => f.write_str("cached attributes have not been computed"),
            Self::LockedList => f.write_str("the list is locked and cannot be cleared"),
            Self::UnregisteredMeasure(kind) => write!(f, "no constructor registered for measure {kind:?}"),
        }
    }
}

impl std::error::Error for TaxonomyError {}
