//! `VertexList`: an ordered, slot-indexed view over taxonomy vertices.
//!
//! Lists keep insertion order (ancestor traversals return vertices in discovery
//! order) and a hash index for O(1) membership, which is what the set algebra of
//! feature-based and groupwise measures needs.
//!
//! Query results are transient ("unlocked") lists owned by the caller. The
//! taxonomy's master list is "locked": [`clear`](VertexList::clear) refuses it.

use std::collections::HashSet;

use crate::error::TaxonomyError;
use crate::taxonomy::{ConceptId, Taxonomy, VertexId};

/// An ordered set of vertices.
#[derive(Debug, Clone, Default)]
pub struct VertexList {
    items: Vec<VertexId>,
    members: HashSet<VertexId>,
    locked: bool,
}

impl VertexList {
    /// Creates an empty, unlocked list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty, unlocked list with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
            locked: false,
        }
    }

    pub(crate) fn locked_with_capacity(capacity: usize) -> Self {
        Self {
            locked: true,
            ..Self::with_capacity(capacity)
        }
    }

    /// Whether this is a taxonomy master list.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Membership test.
    #[inline]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.members.contains(&vertex)
    }

    /// The vertex at `index` in list order.
    #[inline]
    pub fn get(&self, index: usize) -> Option<VertexId> {
        self.items.get(index).copied()
    }

    /// Position of `vertex` in list order.
    pub fn index_of(&self, vertex: VertexId) -> Option<usize> {
        if self.contains(vertex) {
            self.items.iter().position(|&v| v == vertex)
        } else {
            None
        }
    }

    /// Vertices in list order.
    #[inline]
    pub fn as_slice(&self) -> &[VertexId] {
        &self.items
    }

    /// Iterates vertices in list order.
    #[inline]
    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, VertexId>> {
        self.items.iter().copied()
    }

    /// Appends `vertex`. Returns `false` if it was already present.
    pub fn insert(&mut self, vertex: VertexId) -> bool {
        if self.members.insert(vertex) {
            self.items.push(vertex);
            true
        } else {
            false
        }
    }

    /// Removes `vertex`, preserving the order of the others.
    pub fn remove(&mut self, vertex: VertexId) -> bool {
        if self.members.remove(&vertex) {
            self.items.retain(|&v| v != vertex);
            true
        } else {
            false
        }
    }

    /// Keeps only the vertices for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(VertexId) -> bool) {
        let members = &mut self.members;
        self.items.retain(|&v| {
            let kept = keep(v);
            if !kept {
                members.remove(&v);
            }
            kept
        });
    }

    /// Releases the list's storage.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::LockedList`] for a taxonomy master list.
    pub fn clear(&mut self) -> Result<(), TaxonomyError> {
        if self.locked {
            return Err(TaxonomyError::LockedList);
        }
        self.items = Vec::new();
        self.members = HashSet::new();
        Ok(())
    }

    pub(crate) fn release(&mut self) {
        self.items = Vec::new();
        self.members = HashSet::new();
    }

    // --- Set algebra ---

    /// Vertices of `self` followed by the vertices of `other` not in `self`.
    pub fn union(&self, other: &VertexList) -> VertexList {
        let mut out = VertexList::with_capacity(self.len() + other.len());
        for v in self.iter().chain(other.iter()) {
            out.insert(v);
        }
        out
    }

    /// Vertices of `self` that are also in `other`, in `self` order.
    pub fn intersection(&self, other: &VertexList) -> VertexList {
        self.iter().filter(|&v| other.contains(v)).collect()
    }

    /// Vertices of `self` that are not in `other`, in `self` order.
    pub fn difference(&self, other: &VertexList) -> VertexList {
        self.iter().filter(|&v| !other.contains(v)).collect()
    }

    /// `|self ∪ other|` without materialising the union.
    pub fn union_count(&self, other: &VertexList) -> usize {
        self.len() + other.difference_count(self)
    }

    /// `|self ∩ other|` without materialising the intersection.
    pub fn intersection_count(&self, other: &VertexList) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().filter(|&v| large.contains(v)).count()
    }

    /// `|self \ other|` without materialising the difference.
    pub fn difference_count(&self, other: &VertexList) -> usize {
        self.iter().filter(|&v| !other.contains(v)).count()
    }

    // --- Aggregates over taxonomy attributes ---

    /// Highest IC value in the list, floored at 0.
    pub fn greatest_ic(&self, taxonomy: &Taxonomy) -> f64 {
        self.iter()
            .map(|v| taxonomy.vertex(v).ic())
            .fold(0.0, f64::max)
    }

    /// IC values in list order.
    pub fn ic_values(&self, taxonomy: &Taxonomy) -> Vec<f64> {
        self.iter().map(|v| taxonomy.vertex(v).ic()).collect()
    }

    /// Minimum depths in list order.
    pub fn depth_min_values(&self, taxonomy: &Taxonomy) -> Vec<u32> {
        self.iter().map(|v| taxonomy.vertex(v).depth_min()).collect()
    }

    /// Largest minimum depth in the list (0 for an empty list).
    pub fn greatest_depth_min(&self, taxonomy: &Taxonomy) -> u32 {
        self.iter()
            .map(|v| taxonomy.vertex(v).depth_min())
            .max()
            .unwrap_or(0)
    }

    /// Largest maximum depth in the list, never below 1.
    pub fn greatest_depth_max(&self, taxonomy: &Taxonomy) -> u32 {
        self.iter()
            .map(|v| taxonomy.vertex(v).depth_max())
            .fold(1, u32::max)
    }

    /// `greatest_depth_min() + 1`.
    pub fn greatest_depth_min_base1(&self, taxonomy: &Taxonomy) -> u32 {
        self.greatest_depth_min(taxonomy) + 1
    }

    /// Root vertices of the list, in list order.
    pub fn roots(&self, taxonomy: &Taxonomy) -> VertexList {
        self.iter().filter(|&v| taxonomy.vertex(v).is_root()).collect()
    }

    /// Leaf vertices of the list, in list order.
    pub fn leaves(&self, taxonomy: &Taxonomy) -> VertexList {
        self.iter().filter(|&v| taxonomy.vertex(v).is_leaf()).collect()
    }

    /// Number of leaf vertices in the list.
    pub fn leaf_count(&self, taxonomy: &Taxonomy) -> usize {
        self.iter().filter(|&v| taxonomy.vertex(v).is_leaf()).count()
    }

    /// Concept ids in list order.
    pub fn concept_ids(&self, taxonomy: &Taxonomy) -> Vec<ConceptId> {
        self.iter().map(|v| taxonomy.vertex(v).id()).collect()
    }
}

impl FromIterator<VertexId> for VertexList {
    fn from_iter<I: IntoIterator<Item = VertexId>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = VertexList::with_capacity(iter.size_hint().0);
        for v in iter {
            list.insert(v);
        }
        list
    }
}

impl Extend<VertexId> for VertexList {
    fn extend<I: IntoIterator<Item = VertexId>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<'a> IntoIterator for &'a VertexList {
    type Item = VertexId;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, VertexId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for VertexList {
    /// Two lists are equal when they hold the same vertices in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for VertexList {}
