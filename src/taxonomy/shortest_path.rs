//! Shortest-path distances over the non-oriented view of the taxonomy.
//!
//! Two algorithms:
//!
//! - **Exact**: Dijkstra from the source over every arc, so paths may climb and
//!   descend freely. [`Taxonomy::compute_distance_field`] runs to exhaustion and
//!   leaves the distance of every vertex in the caller's [`DistanceField`].
//! - **AncSPL**: the same relaxation confined to the subgraph induced by the
//!   inclusive ancestors of both endpoints. The subgraph holds every path that
//!   climbs to a common ancestor and descends again, so on tree-shaped taxonomies
//!   the result is exact and elsewhere it is an upper bound on the exact distance.
//!
//! Unreachable targets report [`UNREACHABLE_DISTANCE`].
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `compute_distance_field` | \(O((V + E) \log V)\) | whole component |
//! | `shortest_path_distance` | \(O((V + E) \log V)\) | stops once the target settles |
//! | `fast_shortest_path_distance` | \(O((A + E_A) \log A)\) | `A` = ancestor union size |

use super::access::DistanceField;
use super::edge::HalfEdge;
use super::graph::Taxonomy;
use super::ids::{HalfEdgeId, VertexId};
use crate::config::{EdgeWeighting, PathAlgorithm, QueryConfig};
use crate::UNREACHABLE_DISTANCE;

/// Where a Dijkstra run may go and when it may stop.
#[derive(Clone, Copy)]
struct RunBounds {
    target: Option<VertexId>,
    within_region: bool,
}

impl Taxonomy {
    /// Runs a full single-source relaxation from `source`.
    ///
    /// Afterwards `field.distance(v)` is the exact distance from `source` to every
    /// vertex `v`. Repeating the call with the same arguments yields the same field.
    ///
    /// # Panics
    /// Panics if `source` does not belong to this taxonomy.
    pub fn compute_distance_field(&self, source: VertexId, weighting: EdgeWeighting, field: &mut DistanceField) {
        field.begin(self.vertex_count(), source, weighting);
        self.relax_all(field, RunBounds { target: None, within_region: false }, |id, _| {
            self.arc_cost(id, weighting)
        });
    }

    /// Exact distance from `source` to `target`; symmetric in its arguments.
    ///
    /// # Panics
    /// Panics if either vertex does not belong to this taxonomy.
    pub fn shortest_path_distance(
        &self,
        source: VertexId,
        target: VertexId,
        weighting: EdgeWeighting,
        field: &mut DistanceField,
    ) -> f64 {
        field.begin(self.vertex_count(), source, weighting);
        let bounds = RunBounds { target: Some(target), within_region: false };
        self.relax_all(field, bounds, |id, _| self.arc_cost(id, weighting));
        field.distance(target)
    }

    /// Exact distance using the oriented half-edge weights instead of the shared
    /// edge weight. Climbing and descending the same edge may cost differently.
    ///
    /// # Panics
    /// Panics if either vertex does not belong to this taxonomy.
    pub fn asymmetric_shortest_path_distance(
        &self,
        source: VertexId,
        target: VertexId,
        field: &mut DistanceField,
    ) -> f64 {
        field.begin(self.vertex_count(), source, EdgeWeighting::EdgeWeight);
        let bounds = RunBounds { target: Some(target), within_region: false };
        self.relax_all(field, bounds, |_, arc| arc.weight);
        field.distance(target)
    }

    /// AncSPL distance: Dijkstra restricted to the union of both inclusive
    /// ancestor sets. Never shorter than the exact distance.
    ///
    /// # Panics
    /// Panics if either vertex does not belong to this taxonomy.
    pub fn fast_shortest_path_distance(
        &self,
        source: VertexId,
        target: VertexId,
        weighting: EdgeWeighting,
        field: &mut DistanceField,
    ) -> f64 {
        if source == target {
            field.begin(self.vertex_count(), source, weighting);
            return 0.0;
        }
        self.mark_ancestor_union(source, target, field);
        field.begin(self.vertex_count(), source, weighting);
        let bounds = RunBounds { target: Some(target), within_region: true };
        self.relax_all(field, bounds, |id, _| self.arc_cost(id, weighting));
        field.distance(target)
    }

    /// Number of vertices in the subgraph explored by
    /// [`fast_shortest_path_distance`](Self::fast_shortest_path_distance).
    pub fn ancspl_subgraph_dimension(&self, left: VertexId, right: VertexId, field: &mut DistanceField) -> usize {
        self.mark_ancestor_union(left, right, field)
    }

    /// Distance between `left` and `right` with the algorithm and weighting chosen by `config`.
    pub fn path_distance(&self, left: VertexId, right: VertexId, config: &QueryConfig, field: &mut DistanceField) -> f64 {
        match config.path_algorithm {
            PathAlgorithm::Exact => self.shortest_path_distance(left, right, config.weighting, field),
            PathAlgorithm::AncSpl => self.fast_shortest_path_distance(left, right, config.weighting, field),
        }
    }

    /// Distances from `source` to each of `targets` from a single full run.
    pub fn distances_from(
        &self,
        source: VertexId,
        targets: &[VertexId],
        weighting: EdgeWeighting,
        field: &mut DistanceField,
    ) -> Vec<f64> {
        self.compute_distance_field(source, weighting, field);
        targets.iter().map(|&t| field.distance(t)).collect()
    }

    fn mark_ancestor_union(&self, left: VertexId, right: VertexId, field: &mut DistanceField) -> usize {
        field.region.reset(self.vertex_count());
        self.mark_ancestors(left, &mut field.region, &mut field.queue)
            + self.mark_ancestors(right, &mut field.region, &mut field.queue)
    }

    #[inline]
    fn arc_cost(&self, arc: HalfEdgeId, weighting: EdgeWeighting) -> f64 {
        match weighting {
            EdgeWeighting::Unit => 1.0,
            EdgeWeighting::EdgeWeight => self.edges[arc.edge().index()].weight,
        }
    }

    fn relax_all(&self, field: &mut DistanceField, bounds: RunBounds, cost: impl Fn(HalfEdgeId, &HalfEdge) -> f64) {
        while let Some((current, dist)) = field.pop() {
            if bounds.target == Some(current) {
                break;
            }
            for (id, arc) in self.out_arcs(current) {
                if bounds.within_region && !field.region.is_visited(arc.target.index()) {
                    continue;
                }
                let candidate = dist + cost(id, arc);
                if candidate < UNREACHABLE_DISTANCE {
                    field.relax(arc.target, candidate);
                }
            }
        }
    }
}
