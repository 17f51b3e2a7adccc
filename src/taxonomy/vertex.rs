//! Concept records.
//!
//! A [`Vertex`] carries its identity, annotations (IC, probability, a label and an opaque client tag) and the
//! attributes cached once by the indexer. It holds no per-query scratch: distances
//! and visited marks live in caller-owned buffers so a frozen taxonomy can be
//! queried from many threads.

use std::any::Any;
use std::sync::Arc;

use super::ids::{ConceptId, HalfEdgeId};

/// Opaque client value attached to a vertex.
pub type UserTag = Arc<dyn Any + Send + Sync>;

/// A concept of the taxonomy.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub(crate) id: ConceptId,
    pub(crate) first_out: Option<HalfEdgeId>,
    pub(crate) last_out: Option<HalfEdgeId>,
    pub(crate) parent_count: u32,
    pub(crate) child_count: u32,
    pub(crate) ic: f64,
    pub(crate) probability: f64,
    pub(crate) tag: Option<String>,
    pub(crate) user_tag: Option<UserTag>,
    pub(crate) cache: CachedAttributes,
}

/// Attributes computed once by `compute_cached_attributes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CachedAttributes {
    pub(crate) depth_min: u32,
    pub(crate) depth_max: u32,
    pub(crate) hyponyms: u32,
    pub(crate) subsumed_leaves: u32,
    pub(crate) ancestors: u32,
}

impl Vertex {
    pub(crate) fn new(id: ConceptId) -> Self {
        Self {
            id,
            first_out: None,
            last_out: None,
            parent_count: 0,
            child_count: 0,
            ic: 0.0,
            probability: 0.0,
            tag: None,
            user_tag: None,
            cache: CachedAttributes::default(),
        }
    }

    /// The loader-supplied concept id.
    #[inline]
    pub fn id(&self) -> ConceptId {
        self.id
    }

    /// Information content assigned by an IC model (0.0 until annotated).
    #[inline]
    pub fn ic(&self) -> f64 {
        self.ic
    }

    /// Probability assigned by an IC model (0.0 until annotated).
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Optional label such as a GO accession or a WordNet lemma.
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Client value of type `T`, if one was attached with that type.
    pub fn user_tag<T: Any>(&self) -> Option<&T> {
        self.user_tag.as_deref().and_then(|tag| tag.downcast_ref())
    }

    /// First arc of the outgoing ring, `None` for an isolated root.
    #[inline]
    pub fn first_out(&self) -> Option<HalfEdgeId> {
        self.first_out
    }

    /// Number of direct parents.
    #[inline]
    pub fn parent_count(&self) -> usize {
        self.parent_count as usize
    }

    /// Number of direct children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.child_count as usize
    }

    /// A root has no parents.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_count == 0
    }

    /// A leaf has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.child_count == 0
    }

    /// Length of the shortest ascending path to a root (roots: 0).
    #[inline]
    pub fn depth_min(&self) -> u32 {
        self.cache.depth_min
    }

    /// Length of the longest ascending path to a root (roots: 0).
    #[inline]
    pub fn depth_max(&self) -> u32 {
        self.cache.depth_max
    }

    /// `depth_min() + 1`.
    #[inline]
    pub fn depth_min_base1(&self) -> u32 {
        self.cache.depth_min + 1
    }

    /// `depth_max() + 1`.
    #[inline]
    pub fn depth_max_base1(&self) -> u32 {
        self.cache.depth_max + 1
    }

    /// Number of descendants, excluding the vertex itself.
    #[inline]
    pub fn hyponym_count(&self) -> usize {
        self.cache.hyponyms as usize
    }

    /// Number of leaf descendants, excluding the vertex itself.
    #[inline]
    pub fn subsumed_leaf_count(&self) -> usize {
        self.cache.subsumed_leaves as usize
    }

    /// Number of leaf descendants, counting the vertex when it is a leaf.
    #[inline]
    pub fn inclusive_subsumed_leaf_count(&self) -> usize {
        self.subsumed_leaf_count() + usize::from(self.is_leaf())
    }

    /// Number of ancestors, excluding the vertex itself.
    #[inline]
    pub fn ancestor_count(&self) -> usize {
        self.cache.ancestors as usize
    }
}
