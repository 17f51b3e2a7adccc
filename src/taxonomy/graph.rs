//! The taxonomy store: vertex, edge and half-edge arenas plus the build phase.
//!
//! Vertices are appended root-first: [`Taxonomy::add_vertex`] only accepts
//! parents that already exist, so the master list is a topological order by
//! construction and the graph cannot contain a cycle. After
//! [`Taxonomy::compute_cached_attributes`] the structure is frozen; only
//! annotations (IC, probability, weights, tags) may still change.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_vertex` | \(O(p)\) | `p` parents, O(1) ring append per arc |
//! | `vertex_by_concept` | \(O(1)\) | hash index on concept id |
//! | `out_arcs` | \(O(\deg)\) | walks the circular outgoing ring |

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::edge::{Edge, HalfEdge, OrientedEdgeType};
use super::ids::{ConceptId, EdgeId, HalfEdgeId, VertexId};
use super::vertex::{UserTag, Vertex};
use crate::collections::VertexList;
use crate::error::TaxonomyError;

/// An "is-a" taxonomy: a rooted, possibly multi-parent DAG of concepts.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) master: VertexList,
    pub(crate) by_concept: HashMap<ConceptId, VertexId>,
    pub(crate) indexed: bool,
}

/// Summary counters of an indexed taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyStats {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of non-oriented edges.
    pub edges: usize,
    /// Number of vertices without parents.
    pub roots: usize,
    /// Number of vertices without children.
    pub leaves: usize,
    /// Largest minimum depth.
    pub max_depth_min: u32,
    /// Largest maximum depth.
    pub max_depth_max: u32,
}

impl Taxonomy {
    /// Creates an empty taxonomy.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty taxonomy sized for `expected_vertices` concepts.
    pub fn with_capacity(expected_vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(expected_vertices),
            edges: Vec::with_capacity(expected_vertices),
            half_edges: Vec::with_capacity(2 * expected_vertices),
            master: VertexList::locked_with_capacity(expected_vertices),
            by_concept: HashMap::with_capacity(expected_vertices),
            indexed: false,
        }
    }

    /// Inserts a concept below the given parents.
    ///
    /// Every parent must already be present, which keeps the master list in
    /// root-first order. An empty `parents` slice inserts a root.
    ///
    /// # Errors
    /// - [`TaxonomyError::Frozen`] after cached attributes were computed.
    /// - [`TaxonomyError::DuplicateVertex`] if `id` is already present.
    /// - [`TaxonomyError::UnknownParent`] if a parent id is missing.
    /// - [`TaxonomyError::InvalidSlot`] if the arenas cannot address another vertex or arc.
    pub fn add_vertex(&mut self, id: ConceptId, parents: &[ConceptId]) -> Result<VertexId, TaxonomyError> {
        if self.indexed {
            return Err(TaxonomyError::Frozen);
        }
        if self.by_concept.contains_key(&id) {
            return Err(TaxonomyError::DuplicateVertex(id));
        }

        // Resolve every parent before touching the arenas so a failure leaves no trace.
        let mut parent_slots = Vec::with_capacity(parents.len());
        for &parent in parents {
            let slot = self
                .by_concept
                .get(&parent)
                .copied()
                .ok_or(TaxonomyError::UnknownParent { vertex: id, parent })?;
            if !parent_slots.contains(&slot) {
                parent_slots.push(slot);
            }
        }

        let vertex = next_slot(self.vertices.len(), VertexId::try_from_index)?;
        // The last half-edge of the new pairs bounds every edge slot too.
        let last_arc = self.half_edges.len() + 2 * parent_slots.len();
        next_slot(last_arc.saturating_sub(1), HalfEdgeId::try_from_index)?;
        self.vertices.push(Vertex::new(id));

        for parent in parent_slots {
            let edge = EdgeId::from_index(self.edges.len());
            self.edges.push(Edge::new(vertex, parent));

            let up = edge.direct();
            let down = edge.inverse();
            debug_assert_eq!(up.index(), self.half_edges.len());
            self.half_edges.push(HalfEdge::new(parent, OrientedEdgeType::SubClassOf, up));
            self.half_edges.push(HalfEdge::new(vertex, OrientedEdgeType::SuperClassOf, down));

            self.append_arc(vertex, up);
            self.append_arc(parent, down);
            self.vertices[vertex.index()].parent_count += 1;
            self.vertices[parent.index()].child_count += 1;
        }

        self.master.insert(vertex);
        self.by_concept.insert(id, vertex);
        Ok(vertex)
    }

    /// Links `arc` at the end of `source`'s circular outgoing ring.
    fn append_arc(&mut self, source: VertexId, arc: HalfEdgeId) {
        let v = &mut self.vertices[source.index()];
        match (v.first_out, v.last_out) {
            (Some(first), Some(last)) => {
                self.half_edges[arc.index()].next = first;
                self.half_edges[last.index()].next = arc;
                v.last_out = Some(arc);
            }
            _ => {
                // A single arc closes the ring on itself.
                self.half_edges[arc.index()].next = arc;
                v.first_out = Some(arc);
                v.last_out = Some(arc);
            }
        }
    }

    /// Releases every vertex, edge and half-edge; the taxonomy can be rebuilt afterwards.
    pub fn clear(&mut self) {
        self.vertices = Vec::new();
        self.edges = Vec::new();
        self.half_edges = Vec::new();
        self.master.release();
        self.by_concept = HashMap::new();
        self.indexed = false;
    }

    // --- Structure accessors ---

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of non-oriented edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the taxonomy has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether cached attributes have been computed (the structure is frozen).
    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// The vertex stored in `slot`.
    ///
    /// # Panics
    /// Panics if `slot` does not belong to this taxonomy.
    #[inline]
    pub fn vertex(&self, slot: VertexId) -> &Vertex {
        &self.vertices[slot.index()]
    }

    /// The vertex stored in `slot`, or an error for a foreign slot.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::InvalidSlot`] when `slot` is out of range.
    #[inline]
    pub fn try_vertex(&self, slot: VertexId) -> Result<&Vertex, TaxonomyError> {
        self.vertices
            .get(slot.index())
            .ok_or(TaxonomyError::InvalidSlot(slot.index()))
    }

    /// Looks up a vertex by its concept id.
    #[inline]
    pub fn vertex_by_concept(&self, id: ConceptId) -> Option<VertexId> {
        self.by_concept.get(&id).copied()
    }

    /// Looks up a vertex by its concept id.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::UnknownVertex`] if no vertex carries `id`.
    pub fn require_concept(&self, id: ConceptId) -> Result<VertexId, TaxonomyError> {
        self.vertex_by_concept(id).ok_or(TaxonomyError::UnknownVertex(id))
    }

    /// The locked master list, in root-first insertion order.
    #[inline]
    pub fn vertex_list(&self) -> &VertexList {
        &self.master
    }

    /// Iterates every vertex slot in root-first order.
    pub fn vertex_ids(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(VertexId::from_index)
    }

    /// The edge stored in `slot`.
    #[inline]
    pub fn edge(&self, slot: EdgeId) -> &Edge {
        &self.edges[slot.index()]
    }

    /// Iterates `(slot, edge)` pairs in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId::from_index(i), e))
    }

    /// The half-edge stored in `slot`.
    #[inline]
    pub fn half_edge(&self, slot: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[slot.index()]
    }

    /// The vertex a half-edge leaves from.
    #[inline]
    pub fn half_edge_source(&self, slot: HalfEdgeId) -> VertexId {
        self.half_edges[slot.opposite().index()].target
    }

    /// Walks the outgoing ring of `vertex` starting at its first arc.
    pub fn out_arcs(&self, vertex: VertexId) -> OutArcs<'_> {
        let first = self.vertices[vertex.index()].first_out;
        OutArcs {
            half_edges: &self.half_edges,
            first,
            cursor: first,
        }
    }

    /// The arc leaving `vertex` towards `target`, if they are adjacent.
    pub fn incident_edge(&self, vertex: VertexId, target: VertexId) -> Option<HalfEdgeId> {
        self.out_arcs(vertex)
            .find(|&(_, arc)| arc.target == target)
            .map(|(id, _)| id)
    }

    // --- Annotations (allowed after indexing) ---

    /// Assigns the information content of `vertex`.
    #[inline]
    pub fn set_ic_value(&mut self, vertex: VertexId, ic: f64) {
        self.vertices[vertex.index()].ic = ic;
    }

    /// Information content of `vertex`.
    #[inline]
    pub fn ic_value(&self, vertex: VertexId) -> f64 {
        self.vertices[vertex.index()].ic
    }

    /// Assigns the probability of `vertex`.
    #[inline]
    pub fn set_probability(&mut self, vertex: VertexId, probability: f64) {
        self.vertices[vertex.index()].probability = probability;
    }

    /// Attaches a label to `vertex`.
    pub fn set_tag(&mut self, vertex: VertexId, tag: impl Into<String>) {
        self.vertices[vertex.index()].tag = Some(tag.into());
    }

    /// Attaches an opaque client value to `vertex`, replacing any previous one.
    pub fn set_user_tag<T: Any + Send + Sync>(&mut self, vertex: VertexId, tag: T) {
        self.vertices[vertex.index()].user_tag = Some(Arc::new(tag));
    }

    /// Removes and returns the client value of `vertex`.
    pub fn take_user_tag(&mut self, vertex: VertexId) -> Option<UserTag> {
        self.vertices[vertex.index()].user_tag.take()
    }

    /// Sets the non-oriented weight of `edge`.
    #[inline]
    pub fn set_edge_weight(&mut self, edge: EdgeId, weight: f64) {
        self.edges[edge.index()].weight = weight;
    }

    /// Sets the conditional probability carried by `edge`.
    #[inline]
    pub fn set_edge_cond_probability(&mut self, edge: EdgeId, probability: f64) {
        self.edges[edge.index()].cond_probability = probability;
    }

    /// Sets the oriented weight of one half-edge.
    #[inline]
    pub fn set_half_edge_weight(&mut self, arc: HalfEdgeId, weight: f64) {
        self.half_edges[arc.index()].weight = weight;
    }

    /// Sum of the probabilities of every leaf.
    pub fn sum_leaf_probability(&self) -> f64 {
        self.vertices
            .iter()
            .filter(|v| v.is_leaf())
            .map(Vertex::probability)
            .sum()
    }

    /// Root vertices in root-first order.
    pub fn roots(&self) -> VertexList {
        self.master.roots(self)
    }

    /// Leaf vertices in root-first order.
    pub fn leaves(&self) -> VertexList {
        self.master.leaves(self)
    }

    /// Summary counters. Depth columns are 0 until the taxonomy is indexed.
    pub fn stats(&self) -> TaxonomyStats {
        TaxonomyStats {
            vertices: self.vertex_count(),
            edges: self.edge_count(),
            roots: self.vertices.iter().filter(|v| v.is_root()).count(),
            leaves: self.vertices.iter().filter(|v| v.is_leaf()).count(),
            max_depth_min: self.vertices.iter().map(Vertex::depth_min).max().unwrap_or(0),
            max_depth_max: self.vertices.iter().map(Vertex::depth_max).max().unwrap_or(0),
        }
    }
}

/// Checked handle for the slot at `len`, the next free arena position.
fn next_slot<H>(len: usize, make: impl FnOnce(usize) -> Option<H>) -> Result<H, TaxonomyError> {
    make(len).ok_or(TaxonomyError::InvalidSlot(len))
}

/// Iterator over the outgoing ring of one vertex, yielding `(slot, arc)`.
#[derive(Debug, Clone)]
pub struct OutArcs<'a> {
    half_edges: &'a [HalfEdge],
    first: Option<HalfEdgeId>,
    cursor: Option<HalfEdgeId>,
}

impl<'a> Iterator for OutArcs<'a> {
    type Item = (HalfEdgeId, &'a HalfEdge);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let arc = &self.half_edges[id.index()];
        self.cursor = if Some(arc.next) == self.first {
            None
        } else {
            Some(arc.next)
        };
        Some((id, arc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Taxonomy {
        // 1 -> {2, 3} -> 4
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.add_vertex(3, &[1]).unwrap();
        t.add_vertex(4, &[2, 3]).unwrap();
        t
    }

    #[test]
    fn add_vertex_wires_both_half_edges() {
        let t = diamond();
        assert_eq!(t.vertex_count(), 4);
        assert_eq!(t.edge_count(), 4);

        let bottom = t.vertex_by_concept(4).unwrap();
        let ups: Vec<_> = t
            .out_arcs(bottom)
            .filter(|(_, a)| a.is_subclass_of())
            .map(|(_, a)| t.vertex(a.target()).id())
            .collect();
        assert_eq!(ups, vec![2, 3]);

        let root = t.vertex_by_concept(1).unwrap();
        let downs: Vec<_> = t.out_arcs(root).map(|(_, a)| t.vertex(a.target()).id()).collect();
        assert_eq!(downs, vec![2, 3]);

        for (id, _) in t.out_arcs(root) {
            assert_eq!(t.half_edge_source(id), root);
            assert_eq!(t.half_edge(id).kind(), OrientedEdgeType::SuperClassOf);
        }
    }

    #[test]
    fn duplicate_and_unknown_parent_are_rejected() {
        let mut t = diamond();
        assert_eq!(t.add_vertex(2, &[1]), Err(TaxonomyError::DuplicateVertex(2)));
        assert_eq!(
            t.add_vertex(9, &[1, 42]),
            Err(TaxonomyError::UnknownParent { vertex: 9, parent: 42 })
        );
        // The failed insertion left no partial state behind.
        assert_eq!(t.vertex_count(), 4);
        assert_eq!(t.edge_count(), 4);
        assert!(t.vertex_by_concept(9).is_none());
    }

    #[test]
    fn repeated_parent_creates_one_edge() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        let c = t.add_vertex(2, &[1, 1]).unwrap();
        assert_eq!(t.edge_count(), 1);
        assert_eq!(t.vertex(c).parent_count(), 1);
    }

    #[test]
    fn roots_leaves_and_flags() {
        let t = diamond();
        assert_eq!(t.roots().concept_ids(&t), vec![1]);
        assert_eq!(t.leaves().concept_ids(&t), vec![4]);
        let root = t.vertex_by_concept(1).unwrap();
        assert!(t.vertex(root).is_root());
        assert!(!t.vertex(root).is_leaf());
        assert!(t.vertex(root).first_out().is_some());
    }

    #[test]
    fn isolated_root_has_empty_ring() {
        let mut t = Taxonomy::new();
        let lonely = t.add_vertex(10, &[]).unwrap();
        assert_eq!(t.out_arcs(lonely).count(), 0);
        assert!(t.vertex(lonely).is_root());
        assert!(t.vertex(lonely).is_leaf());
    }

    #[test]
    fn incident_edge_and_annotations() {
        let mut t = diamond();
        let a = t.vertex_by_concept(2).unwrap();
        let b = t.vertex_by_concept(4).unwrap();
        let arc = t.incident_edge(a, b).unwrap();
        assert_eq!(t.half_edge(arc).target(), b);
        assert!(t.incident_edge(t.vertex_by_concept(2).unwrap(), t.vertex_by_concept(3).unwrap()).is_none());

        t.set_edge_weight(arc.edge(), 2.5);
        t.set_edge_cond_probability(arc.edge(), 0.5);
        t.set_half_edge_weight(arc, 0.25);
        assert_eq!(t.edge(arc.edge()).weight(), 2.5);
        assert_eq!(t.edge(arc.edge()).cond_probability(), 0.5);
        assert_eq!(t.half_edge(arc).weight(), 0.25);
        assert_eq!(t.half_edge(arc.opposite()).weight(), 1.0);

        t.set_probability(b, 0.4);
        t.set_tag(b, "bottom");
        assert_eq!(t.sum_leaf_probability(), 0.4);
        assert_eq!(t.vertex(b).tag(), Some("bottom"));
    }

    #[test]
    fn user_tags_are_typed_and_opaque() {
        #[derive(Debug, PartialEq)]
        struct Synset {
            offset: u32,
        }

        let mut t = diamond();
        let b = t.vertex_by_concept(4).unwrap();
        t.set_user_tag(b, Synset { offset: 2_084_071 });
        assert_eq!(t.vertex(b).user_tag::<Synset>(), Some(&Synset { offset: 2_084_071 }));
        assert_eq!(t.vertex(b).user_tag::<String>(), None);

        // Clones share the attached value.
        let copy = t.clone();
        assert_eq!(copy.vertex(b).user_tag::<Synset>().map(|s| s.offset), Some(2_084_071));

        assert!(t.take_user_tag(b).is_some());
        assert!(t.vertex(b).user_tag::<Synset>().is_none());
        assert!(t.vertex(t.vertex_by_concept(1).unwrap()).user_tag::<Synset>().is_none());
    }

    #[test]
    fn arena_slots_past_u32_are_rejected() {
        let widest = u32::MAX as usize;
        assert!(next_slot(widest, VertexId::try_from_index).is_ok());
        assert_eq!(
            next_slot(widest + 1, VertexId::try_from_index),
            Err(TaxonomyError::InvalidSlot(widest + 1))
        );
        assert_eq!(
            next_slot(widest + 1, HalfEdgeId::try_from_index),
            Err(TaxonomyError::InvalidSlot(widest + 1))
        );
    }

    #[test]
    fn clear_releases_everything() {
        let mut t = diamond();
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.edge_count(), 0);
        assert!(t.vertex_list().is_empty());
        assert!(t.vertex_list().is_locked());
        t.add_vertex(1, &[]).unwrap();
        assert_eq!(t.vertex_count(), 1);
    }
}
