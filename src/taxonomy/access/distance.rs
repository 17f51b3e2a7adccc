//! Caller-owned distance scratch for shortest-path queries.

use core::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use super::visited::VisitedSet;
use crate::config::EdgeWeighting;
use crate::taxonomy::ids::VertexId;
use crate::UNREACHABLE_DISTANCE;

/// Tentative distances from one source vertex.
///
/// A field is reused across queries: each run bumps an epoch so only the
/// vertices touched by the previous run are implicitly reset. After
/// [`Taxonomy::compute_distance_field`](crate::Taxonomy::compute_distance_field)
/// every reachable vertex holds its exact distance from [`source`](Self::source);
/// unreachable vertices report [`UNREACHABLE_DISTANCE`].
///
/// One field serves one query at a time; threads each own a field.
#[derive(Debug, Clone, Default)]
pub struct DistanceField {
    dist: Vec<f64>,
    touched: VisitedSet,
    pub(crate) region: VisitedSet,
    pub(crate) frontier: BinaryHeap<Pending>,
    pub(crate) queue: VecDeque<VertexId>,
    source: Option<VertexId>,
    weighting: EdgeWeighting,
}

impl DistanceField {
    /// Creates an empty field; it grows on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a field sized for a taxonomy of `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            dist: vec![UNREACHABLE_DISTANCE; vertices],
            touched: VisitedSet::new(vertices),
            region: VisitedSet::new(vertices),
            frontier: BinaryHeap::new(),
            queue: VecDeque::new(),
            source: None,
            weighting: EdgeWeighting::Unit,
        }
    }

    /// Source of the last run, if any.
    #[inline]
    pub fn source(&self) -> Option<VertexId> {
        self.source
    }

    /// Weighting of the last run.
    #[inline]
    pub fn weighting(&self) -> EdgeWeighting {
        self.weighting
    }

    /// Distance from the source to `vertex` found by the last run.
    #[inline]
    pub fn distance(&self, vertex: VertexId) -> f64 {
        let slot = vertex.index();
        if self.touched.is_visited(slot) {
            self.dist[slot]
        } else {
            UNREACHABLE_DISTANCE
        }
    }

    /// Whether the last run reached `vertex`.
    #[inline]
    pub fn is_reached(&self, vertex: VertexId) -> bool {
        self.distance(vertex) < UNREACHABLE_DISTANCE
    }

    /// Starts a new run rooted at `source` over a taxonomy of `len` vertices.
    pub(crate) fn begin(&mut self, len: usize, source: VertexId, weighting: EdgeWeighting) {
        if self.dist.len() < len {
            self.dist.resize(len, UNREACHABLE_DISTANCE);
        }
        self.touched.reset(len);
        self.frontier.clear();
        self.source = Some(source);
        self.weighting = weighting;
        self.relax(source, 0.0);
    }

    /// Lowers the tentative distance of `vertex` to `candidate` and queues it.
    /// Returns `false` when the current distance is already at least as short.
    #[inline]
    pub(crate) fn relax(&mut self, vertex: VertexId, candidate: f64) -> bool {
        let slot = vertex.index();
        if self.touched.try_visit(slot) || candidate < self.dist[slot] {
            self.dist[slot] = candidate;
            self.frontier.push(Pending {
                dist: candidate,
                vertex,
            });
            true
        } else {
            false
        }
    }

    /// Pops the closest queued vertex, skipping stale queue entries.
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<(VertexId, f64)> {
        while let Some(Pending { dist, vertex }) = self.frontier.pop() {
            if dist <= self.dist[vertex.index()] {
                return Some((vertex, dist));
            }
        }
        None
    }
}

/// Frontier entry ordered as a min-heap on distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Pending {
    dist: f64,
    vertex: VertexId,
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId::from_index(i)
    }

    #[test]
    fn untouched_vertices_are_unreachable() {
        let mut field = DistanceField::with_capacity(3);
        field.begin(3, v(0), EdgeWeighting::Unit);
        assert_eq!(field.distance(v(0)), 0.0);
        assert_eq!(field.distance(v(2)), UNREACHABLE_DISTANCE);
        assert!(!field.is_reached(v(2)));
    }

    #[test]
    fn pops_in_distance_order_and_skips_stale_entries() {
        let mut field = DistanceField::new();
        field.begin(4, v(0), EdgeWeighting::Unit);
        assert_eq!(field.pop(), Some((v(0), 0.0)));
        assert!(field.relax(v(1), 5.0));
        assert!(field.relax(v(2), 2.0));
        assert!(field.relax(v(1), 1.0));
        assert!(!field.relax(v(1), 3.0));

        assert_eq!(field.pop(), Some((v(1), 1.0)));
        assert_eq!(field.pop(), Some((v(2), 2.0)));
        assert_eq!(field.pop(), None);
    }

    #[test]
    fn a_new_run_forgets_the_previous_one() {
        let mut field = DistanceField::with_capacity(2);
        field.begin(2, v(0), EdgeWeighting::Unit);
        field.relax(v(1), 4.0);
        field.begin(2, v(1), EdgeWeighting::EdgeWeight);
        assert_eq!(field.source(), Some(v(1)));
        assert_eq!(field.weighting(), EdgeWeighting::EdgeWeight);
        assert_eq!(field.distance(v(0)), UNREACHABLE_DISTANCE);
        assert_eq!(field.distance(v(1)), 0.0);
    }
}
