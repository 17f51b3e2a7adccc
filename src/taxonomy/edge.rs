//! Non-oriented edges and their oriented half-edges.
//!
//! The layout follows a structure-of-arrays edge store: an [`Edge`] holds the
//! annotations shared by both directions (weight, conditional probability) and
//! each [`HalfEdge`] holds the hot traversal data (target, orientation, next arc
//! in the source vertex's ring).

use serde::{Deserialize, Serialize};

use super::ids::{HalfEdgeId, VertexId};

/// Orientation of a half-edge relative to the "is-a" relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrientedEdgeType {
    /// The arc points from a concept to its parent.
    SubClassOf,
    /// The arc points from a concept to its child.
    SuperClassOf,
}

/// An oriented arc. Every half-edge belongs to exactly one [`Edge`].
#[derive(Debug, Clone)]
pub struct HalfEdge {
    pub(crate) target: VertexId,
    pub(crate) kind: OrientedEdgeType,
    pub(crate) weight: f64,
    /// Next outgoing arc of the same source vertex; the ring is circular.
    pub(crate) next: HalfEdgeId,
}

impl HalfEdge {
    pub(crate) fn new(target: VertexId, kind: OrientedEdgeType, id: HalfEdgeId) -> Self {
        Self {
            target,
            kind,
            weight: 1.0,
            next: id,
        }
    }

    /// The vertex this arc points to.
    #[inline]
    pub fn target(&self) -> VertexId {
        self.target
    }

    /// Parent-pointing or child-pointing.
    #[inline]
    pub fn kind(&self) -> OrientedEdgeType {
        self.kind
    }

    /// Whether the arc points to a parent.
    #[inline]
    pub fn is_subclass_of(&self) -> bool {
        self.kind == OrientedEdgeType::SubClassOf
    }

    /// Oriented weight used by asymmetric shortest paths.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Next outgoing arc in the source vertex's ring.
    #[inline]
    pub fn next(&self) -> HalfEdgeId {
        self.next
    }
}

/// A non-oriented "is-a" edge owning a direct/inverse half-edge pair.
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) child: VertexId,
    pub(crate) parent: VertexId,
    pub(crate) weight: f64,
    pub(crate) cond_probability: f64,
}

impl Edge {
    pub(crate) fn new(child: VertexId, parent: VertexId) -> Self {
        Self {
            child,
            parent,
            weight: 1.0,
            cond_probability: 0.0,
        }
    }

    /// The more specific endpoint.
    #[inline]
    pub fn child(&self) -> VertexId {
        self.child
    }

    /// The more general endpoint.
    #[inline]
    pub fn parent(&self) -> VertexId {
        self.parent
    }

    /// Weight used by weighted shortest paths; defaults to 1.0.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// P(child | parent), populated by conditional-probability IC models.
    #[inline]
    pub fn cond_probability(&self) -> f64 {
        self.cond_probability
    }
}
