//! One-shot computation of cached vertex attributes.
//!
//! Depths come from a single forward pass over the root-first master list:
//! every parent of a vertex was inserted before it, so its depths are final when
//! the vertex is visited. Descendant and ancestor counts need one bounded
//! traversal per vertex; a single [`VisitedSet`] is reused across all of them.

use std::collections::VecDeque;

use super::access::visited::VisitedSet;
use super::edge::OrientedEdgeType;
use super::graph::Taxonomy;
use super::ids::VertexId;
use super::vertex::CachedAttributes;
use crate::error::TaxonomyError;

impl Taxonomy {
    /// Computes depths, hyponym, subsumed-leaf and ancestor counts for every vertex
    /// and freezes the structure.
    ///
    /// Calling it again recomputes the same values.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::EmptyTaxonomy`] if no vertex was added.
    pub fn compute_cached_attributes(&mut self) -> Result<(), TaxonomyError> {
        if self.vertices.is_empty() {
            return Err(TaxonomyError::EmptyTaxonomy);
        }

        let n = self.vertices.len();
        let mut cache = vec![CachedAttributes::default(); n];

        // Forward pass: parents precede children in slot order.
        for slot in 0..n {
            let vertex = VertexId::from_index(slot);
            let mut depth_min = u32::MAX;
            let mut depth_max = 0;
            let mut has_parent = false;
            for (_, arc) in self.out_arcs(vertex) {
                if arc.is_subclass_of() {
                    let parent = &cache[arc.target.index()];
                    has_parent = true;
                    depth_min = depth_min.min(parent.depth_min + 1);
                    depth_max = depth_max.max(parent.depth_max + 1);
                }
            }
            if !has_parent {
                depth_min = 0;
            }
            cache[slot].depth_min = depth_min;
            cache[slot].depth_max = depth_max;
        }

        let mut visited = VisitedSet::new(n);
        let mut queue = VecDeque::new();
        for slot in 0..n {
            let vertex = VertexId::from_index(slot);

            let (hyponyms, leaves) =
                self.count_reachable(vertex, OrientedEdgeType::SuperClassOf, &mut visited, &mut queue);
            cache[slot].hyponyms = hyponyms;
            cache[slot].subsumed_leaves = leaves;

            let (ancestors, _) =
                self.count_reachable(vertex, OrientedEdgeType::SubClassOf, &mut visited, &mut queue);
            cache[slot].ancestors = ancestors;
        }

        for (v, attrs) in self.vertices.iter_mut().zip(cache) {
            v.cache = attrs;
        }
        self.indexed = true;

        crate::trace_debug!(
            vertices = n,
            edges = self.edges.len(),
            roots = self.vertices.iter().filter(|v| v.is_root()).count(),
            max_depth = self.vertices.iter().map(|v| v.cache.depth_max).max().unwrap_or(0),
            "computed cached taxonomy attributes"
        );
        Ok(())
    }

    /// Counts the vertices reachable from `start` along arcs of one orientation,
    /// excluding `start`. Also returns how many of them are leaves.
    fn count_reachable(
        &self,
        start: VertexId,
        direction: OrientedEdgeType,
        visited: &mut VisitedSet,
        queue: &mut VecDeque<VertexId>,
    ) -> (u32, u32) {
        visited.clear();
        queue.clear();
        visited.try_visit(start.index());
        queue.push_back(start);

        let mut reached = 0u32;
        let mut leaves = 0u32;
        while let Some(current) = queue.pop_front() {
            for (_, arc) in self.out_arcs(current) {
                if arc.kind == direction && visited.try_visit(arc.target.index()) {
                    reached += 1;
                    if self.vertices[arc.target.index()].is_leaf() {
                        leaves += 1;
                    }
                    queue.push_back(arc.target);
                }
            }
        }
        (reached, leaves)
    }

    pub(crate) fn ensure_indexed(&self) -> Result<(), TaxonomyError> {
        if self.indexed {
            Ok(())
        } else {
            Err(TaxonomyError::NotIndexed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root(1) -> a(2) -> b(3); root -> c(4); a -> d(5); c -> e(6) <- d
    fn sample() -> Taxonomy {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.add_vertex(3, &[2]).unwrap();
        t.add_vertex(4, &[1]).unwrap();
        t.add_vertex(5, &[2]).unwrap();
        t.add_vertex(6, &[4, 5]).unwrap();
        t.compute_cached_attributes().unwrap();
        t
    }

    fn by(t: &Taxonomy, id: u64) -> &crate::taxonomy::Vertex {
        t.vertex(t.vertex_by_concept(id).unwrap())
    }

    #[test]
    fn depths_follow_shortest_and_longest_paths() {
        let t = sample();
        assert_eq!(by(&t, 1).depth_min(), 0);
        assert_eq!(by(&t, 1).depth_max(), 0);
        assert_eq!(by(&t, 3).depth_min(), 2);
        // 6 is reached via 1-4-6 (2 edges) and 1-2-5-6 (3 edges).
        assert_eq!(by(&t, 6).depth_min(), 2);
        assert_eq!(by(&t, 6).depth_max(), 3);
        assert_eq!(by(&t, 6).depth_max_base1(), 4);
        for v in t.vertex_ids() {
            assert!(t.vertex(v).depth_min() <= t.vertex(v).depth_max());
        }
    }

    #[test]
    fn descendant_and_ancestor_counts() {
        let t = sample();
        assert_eq!(by(&t, 1).hyponym_count(), 5);
        assert_eq!(by(&t, 1).subsumed_leaf_count(), 2);
        assert_eq!(by(&t, 2).hyponym_count(), 3);
        assert_eq!(by(&t, 3).hyponym_count(), 0);
        assert_eq!(by(&t, 3).inclusive_subsumed_leaf_count(), 1);
        // Shared ancestors are counted once.
        assert_eq!(by(&t, 6).ancestor_count(), 4);
        assert_eq!(by(&t, 1).ancestor_count(), 0);
    }

    #[test]
    fn indexing_freezes_structure() {
        let mut t = sample();
        assert!(t.is_indexed());
        assert_eq!(t.add_vertex(99, &[1]), Err(TaxonomyError::Frozen));
        assert!(t.compute_cached_attributes().is_ok());
    }

    #[test]
    fn empty_taxonomy_cannot_be_indexed() {
        let mut t = Taxonomy::new();
        assert_eq!(t.compute_cached_attributes(), Err(TaxonomyError::EmptyTaxonomy));
        assert_eq!(t.ensure_indexed(), Err(TaxonomyError::NotIndexed));
    }

    #[test]
    fn stats_report_depths_after_indexing() {
        let t = sample();
        let stats = t.stats();
        assert_eq!(stats.vertices, 6);
        assert_eq!(stats.edges, 6);
        assert_eq!(stats.roots, 1);
        assert_eq!(stats.leaves, 2);
        assert_eq!(stats.max_depth_min, 2);
        assert_eq!(stats.max_depth_max, 3);
    }
}
