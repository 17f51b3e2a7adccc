//! Conditional-probability IC model.
//!
//! Each parent splits its probability mass among its children in proportion to
//! `subsumed_leaves(child) + 1`. The split is stored on the edges as
//! P(child | parent), and vertex probabilities follow by a forward pass:
//! `p(v) = min(1, sum over parents of P(v | parent) * p(parent))`, with every
//! root at probability 1.

use super::{IcModel, IcModelKind};
use crate::error::TaxonomyError;
use crate::taxonomy::{EdgeId, HalfEdge, Taxonomy};

/// Conditional probabilities estimated from subsumed-leaf counts.
///
/// Besides IC and probability, sets on every edge its conditional probability and
/// weight `-log2 P(child | parent)`. On the half-edges, descending an edge costs
/// its weight and climbing it is free, for use with
/// [`Taxonomy::asymmetric_shortest_path_distance`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CondProbLeaves;

impl IcModel for CondProbLeaves {
    fn kind(&self) -> IcModelKind {
        IcModelKind::CondProbLeaves
    }

    fn annotate(&self, taxonomy: &mut Taxonomy) -> Result<(), TaxonomyError> {
        taxonomy.ensure_indexed()?;

        let mut split: Vec<(EdgeId, f64)> = Vec::with_capacity(taxonomy.edge_count());
        for parent in taxonomy.vertex_ids() {
            let share = |arc: &HalfEdge| {
                taxonomy.vertex(arc.target()).subsumed_leaf_count() as f64 + 1.0
            };
            let down = || taxonomy.out_arcs(parent).filter(|(_, arc)| !arc.is_subclass_of());
            let total: f64 = down().map(|(_, arc)| share(arc)).sum();
            split.extend(down().map(|(id, arc)| (id.edge(), share(arc) / total)));
        }
        for (edge, cond) in split {
            taxonomy.set_edge_cond_probability(edge, cond);
            taxonomy.set_edge_weight(edge, -cond.log2());
        }

        // Parents precede children in slot order.
        for v in taxonomy.vertex_ids().collect::<Vec<_>>() {
            let prob = if taxonomy.vertex(v).is_root() {
                1.0
            } else {
                let mass: f64 = taxonomy
                    .out_arcs(v)
                    .filter(|(_, arc)| arc.is_subclass_of())
                    .map(|(id, arc)| {
                        taxonomy.edge(id.edge()).cond_probability() * taxonomy.vertex(arc.target()).probability()
                    })
                    .sum();
                mass.min(1.0)
            };
            taxonomy.set_probability(v, prob);
            taxonomy.set_ic_value(v, (-prob.log2()).max(0.0));
        }

        let edges: Vec<(EdgeId, f64)> = taxonomy.edges().map(|(id, e)| (id, e.weight())).collect();
        for (edge, weight) in edges {
            taxonomy.set_half_edge_weight(edge.inverse(), weight);
            taxonomy.set_half_edge_weight(edge.direct(), 0.0);
        }
        Ok(())
    }
}
