//! Ancestor and descendant queries, MICA and LCS.
//!
//! Every query recomputes its set from the arcs; nothing is memoised between
//! calls. Results are unlocked [`VertexList`]s owned by the caller, in breadth-first
//! discovery order with the query vertex first when `inclusive` is set.

use std::collections::VecDeque;

use super::access::visited::VisitedSet;
use super::edge::OrientedEdgeType;
use super::graph::Taxonomy;
use super::ids::VertexId;
use crate::collections::VertexList;
use crate::config::DepthMode;
use crate::error::TaxonomyError;

impl Taxonomy {
    /// Ancestors of `vertex` in breadth-first order.
    pub fn ancestors(&self, vertex: VertexId, inclusive: bool) -> VertexList {
        self.collect_reachable(vertex, OrientedEdgeType::SubClassOf, inclusive)
    }

    /// Descendants of `vertex` in breadth-first order.
    pub fn hyponyms(&self, vertex: VertexId, inclusive: bool) -> VertexList {
        self.collect_reachable(vertex, OrientedEdgeType::SuperClassOf, inclusive)
    }

    /// Leaf descendants of `vertex`; with `inclusive`, a leaf subsumes itself.
    pub fn subsumed_leaves(&self, vertex: VertexId, inclusive: bool) -> VertexList {
        let mut leaves = self.hyponyms(vertex, inclusive);
        leaves.retain(|v| self.vertex(v).is_leaf());
        leaves
    }

    /// Direct parents in ring order.
    pub fn parents(&self, vertex: VertexId) -> VertexList {
        self.adjacent(vertex, Some(OrientedEdgeType::SubClassOf))
    }

    /// Direct children in ring order.
    pub fn children(&self, vertex: VertexId) -> VertexList {
        self.adjacent(vertex, Some(OrientedEdgeType::SuperClassOf))
    }

    /// Parents and children in ring order.
    pub fn neighbours(&self, vertex: VertexId) -> VertexList {
        self.adjacent(vertex, None)
    }

    fn adjacent(&self, vertex: VertexId, kind: Option<OrientedEdgeType>) -> VertexList {
        self.out_arcs(vertex)
            .filter(|(_, arc)| kind.map_or(true, |k| arc.kind == k))
            .map(|(_, arc)| arc.target)
            .collect()
    }

    fn collect_reachable(&self, start: VertexId, direction: OrientedEdgeType, inclusive: bool) -> VertexList {
        let mut out = VertexList::new();
        out.insert(start);
        let mut cursor = 0;
        while let Some(current) = out.get(cursor) {
            cursor += 1;
            for (_, arc) in self.out_arcs(current) {
                if arc.kind == direction {
                    out.insert(arc.target);
                }
            }
        }
        if !inclusive {
            out.remove(start);
        }
        out
    }

    /// Marks `start` and all its ancestors in `region`. Returns how many vertices
    /// were newly marked.
    pub(crate) fn mark_ancestors(
        &self,
        start: VertexId,
        region: &mut VisitedSet,
        queue: &mut VecDeque<VertexId>,
    ) -> usize {
        queue.clear();
        if !region.try_visit(start.index()) {
            return 0;
        }
        queue.push_back(start);
        let mut marked = 1;
        while let Some(current) = queue.pop_front() {
            for (_, arc) in self.out_arcs(current) {
                if arc.is_subclass_of() && region.try_visit(arc.target.index()) {
                    marked += 1;
                    queue.push_back(arc.target);
                }
            }
        }
        marked
    }

    /// Most Informative Common Ancestor: the common inclusive ancestor with the
    /// highest IC.
    ///
    /// Ties keep the first candidate in the breadth-first order of `left`'s
    /// ancestors. Returns `None` when the two vertices share no ancestor.
    pub fn mica(&self, left: VertexId, right: VertexId) -> Option<VertexId> {
        let right_ancestors = self.ancestors(right, true);
        let mut best: Option<(VertexId, f64)> = None;
        for candidate in &self.ancestors(left, true) {
            if !right_ancestors.contains(candidate) {
                continue;
            }
            let ic = self.vertex(candidate).ic();
            if best.map_or(true, |(_, top)| ic > top) {
                best = Some((candidate, ic));
            }
        }
        best.map(|(v, _)| v)
    }

    /// Lowest Common Subsumer: the common inclusive ancestor with the greatest depth.
    ///
    /// `mode` selects minimum or maximum depth. Several ancestors may share the
    /// maximal depth on multi-parent taxonomies; the one with the lowest vertex
    /// slot wins, so the answer does not depend on argument order.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::NotIndexed`] before
    /// [`compute_cached_attributes`](Self::compute_cached_attributes).
    pub fn lcs(&self, left: VertexId, right: VertexId, mode: DepthMode) -> Result<Option<VertexId>, TaxonomyError> {
        self.ensure_indexed()?;
        let right_ancestors = self.ancestors(right, true);
        let mut best: Option<(VertexId, u32)> = None;
        for candidate in &self.ancestors(left, true) {
            if !right_ancestors.contains(candidate) {
                continue;
            }
            let v = self.vertex(candidate);
            let depth = match mode {
                DepthMode::Min => v.depth_min(),
                DepthMode::Max => v.depth_max(),
            };
            let better = match best {
                None => true,
                Some((slot, top)) => depth > top || (depth == top && candidate < slot),
            };
            if better {
                best = Some((candidate, depth));
            }
        }
        Ok(best.map(|(v, _)| v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root(1) -> a(2) -> b(3); root -> c(4); a -> d(5)
    fn five_node() -> Taxonomy {
        let mut t = Taxonomy::new();
        for (id, parents, ic) in [
            (1, &[][..], 0.0),
            (2, &[1][..], 0.3),
            (3, &[2][..], 0.6),
            (4, &[1][..], 0.2),
            (5, &[2][..], 0.5),
        ] {
            let v = t.add_vertex(id, parents).unwrap();
            t.set_ic_value(v, ic);
        }
        t.compute_cached_attributes().unwrap();
        t
    }

    fn v(t: &Taxonomy, id: u64) -> VertexId {
        t.vertex_by_concept(id).unwrap()
    }

    #[test]
    fn ancestors_inclusive_and_exclusive() {
        let t = five_node();
        let b = v(&t, 3);
        assert_eq!(t.ancestors(b, true).concept_ids(&t), vec![3, 2, 1]);
        assert_eq!(t.ancestors(b, false).concept_ids(&t), vec![2, 1]);
        assert!(t.ancestors(v(&t, 1), false).is_empty());
    }

    #[test]
    fn descendants_and_leaves() {
        let t = five_node();
        let root = v(&t, 1);
        assert_eq!(t.hyponyms(root, false).len(), 4);
        assert_eq!(t.hyponyms(root, true).get(0), Some(root));
        assert_eq!(t.subsumed_leaves(v(&t, 2), false).concept_ids(&t), vec![3, 5]);
        assert_eq!(t.subsumed_leaves(v(&t, 3), true).concept_ids(&t), vec![3]);
        assert!(t.subsumed_leaves(v(&t, 3), false).is_empty());
    }

    #[test]
    fn adjacency_lists() {
        let t = five_node();
        let a = v(&t, 2);
        assert_eq!(t.parents(a).concept_ids(&t), vec![1]);
        assert_eq!(t.children(a).concept_ids(&t), vec![3, 5]);
        assert_eq!(t.neighbours(a).concept_ids(&t), vec![1, 3, 5]);
    }

    #[test]
    fn mica_and_lcs_pick_the_shared_parent() {
        let t = five_node();
        let (b, d) = (v(&t, 3), v(&t, 5));
        assert_eq!(t.mica(b, d), Some(v(&t, 2)));
        assert_eq!(t.lcs(b, d, DepthMode::Min).unwrap(), Some(v(&t, 2)));
        assert_eq!(t.lcs(b, d, DepthMode::Max).unwrap(), Some(v(&t, 2)));
        assert_eq!(t.mica(b, b), Some(b));
    }

    #[test]
    fn lcs_requires_index() {
        let mut t = Taxonomy::new();
        let r = t.add_vertex(1, &[]).unwrap();
        assert_eq!(t.lcs(r, r, DepthMode::Min), Err(TaxonomyError::NotIndexed));
    }

    #[test]
    fn lcs_ties_resolve_to_lowest_slot() {
        // Two parents at the same depth shared by both children.
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.add_vertex(3, &[1]).unwrap();
        let x = t.add_vertex(4, &[3, 2]).unwrap();
        let y = t.add_vertex(5, &[2, 3]).unwrap();
        t.compute_cached_attributes().unwrap();
        let expected = Some(t.vertex_by_concept(2).unwrap());
        assert_eq!(t.lcs(x, y, DepthMode::Min).unwrap(), expected);
        assert_eq!(t.lcs(y, x, DepthMode::Min).unwrap(), expected);
    }

    #[test]
    fn disjoint_roots_have_no_common_ancestor() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[]).unwrap();
        let a = t.add_vertex(3, &[1]).unwrap();
        let b = t.add_vertex(4, &[2]).unwrap();
        t.compute_cached_attributes().unwrap();
        assert_eq!(t.mica(a, b), None);
        assert_eq!(t.lcs(a, b, DepthMode::Max).unwrap(), None);
    }

    #[test]
    fn mark_ancestors_counts_new_vertices_only() {
        let t = five_node();
        let mut region = VisitedSet::new(t.vertex_count());
        let mut queue = VecDeque::new();
        assert_eq!(t.mark_ancestors(v(&t, 3), &mut region, &mut queue), 3);
        // 5's ancestors 2 and 1 are already marked.
        assert_eq!(t.mark_ancestors(v(&t, 5), &mut region, &mut queue), 1);
        assert!(!region.is_visited(v(&t, 4).index()));
    }
}
