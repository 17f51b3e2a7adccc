//! Intrinsic IC models: values derived from taxonomy structure alone.

use super::{set_ic_delta_weights, IcModel, IcModelKind};
use crate::error::TaxonomyError;
use crate::taxonomy::{Taxonomy, Vertex};

/// Applies `ic` to every vertex, then weights edges by IC gaps.
fn assign(taxonomy: &mut Taxonomy, ic: impl Fn(&Vertex) -> f64) -> Result<(), TaxonomyError> {
    taxonomy.ensure_indexed()?;
    let values: Vec<f64> = taxonomy.vertex_ids().map(|v| ic(taxonomy.vertex(v))).collect();
    for (v, value) in taxonomy.vertex_ids().zip(values).collect::<Vec<_>>() {
        taxonomy.set_ic_value(v, value);
    }
    set_ic_delta_weights(taxonomy);
    Ok(())
}

/// `ln(x) / ln(base)`, with 0 for a degenerate base.
fn log_ratio(x: f64, base: f64) -> f64 {
    let denom = base.ln();
    if denom > 0.0 {
        x.ln() / denom
    } else {
        0.0
    }
}

/// Seco et al. (2004): `1 - ln(hyponyms + 1) / ln(N)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Seco;

fn seco(vertex: &Vertex, vertex_count: f64) -> f64 {
    let ratio = log_ratio(vertex.hyponym_count() as f64 + 1.0, vertex_count);
    1.0 - ratio
}

impl IcModel for Seco {
    fn kind(&self) -> IcModelKind {
        IcModelKind::Seco
    }

    fn annotate(&self, taxonomy: &mut Taxonomy) -> Result<(), TaxonomyError> {
        let n = taxonomy.vertex_count() as f64;
        assign(taxonomy, |v| seco(v, n))
    }
}

/// Zhou et al. (2008): equal blend of Seco and `ln(depth + 1) / ln(max depth + 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zhou;

impl IcModel for Zhou {
    fn kind(&self) -> IcModelKind {
        IcModelKind::Zhou
    }

    fn annotate(&self, taxonomy: &mut Taxonomy) -> Result<(), TaxonomyError> {
        let n = taxonomy.vertex_count() as f64;
        let max_depth = f64::from(taxonomy.vertex_list().greatest_depth_min_base1(taxonomy));
        assign(taxonomy, |v| {
            0.5 * seco(v, n) + 0.5 * log_ratio(f64::from(v.depth_min_base1()), max_depth)
        })
    }
}

/// Sánchez et al. (2011): `-log2((1 + leaves / subsumers) / (max leaves + 1))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sanchez2011;

impl IcModel for Sanchez2011 {
    fn kind(&self) -> IcModelKind {
        IcModelKind::Sanchez2011
    }

    fn annotate(&self, taxonomy: &mut Taxonomy) -> Result<(), TaxonomyError> {
        let max_leaves = taxonomy.vertex_list().leaf_count(taxonomy) as f64;
        assign(taxonomy, |v| {
            let leaves = v.subsumed_leaf_count() as f64;
            let subsumers = v.ancestor_count() as f64 + 1.0;
            let prob = (1.0 + leaves / subsumers) / (max_leaves + 1.0);
            -prob.log2()
        })
    }
}

/// Blanchard et al. (2008): `-log2(inclusive subsumed leaves / total leaves)`.
///
/// Also stores the leaf probability on each vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blanchard;

impl IcModel for Blanchard {
    fn kind(&self) -> IcModelKind {
        IcModelKind::Blanchard
    }

    fn annotate(&self, taxonomy: &mut Taxonomy) -> Result<(), TaxonomyError> {
        taxonomy.ensure_indexed()?;
        let total = taxonomy.vertex_list().leaf_count(taxonomy) as f64;
        let probs: Vec<_> = taxonomy
            .vertex_ids()
            .map(|v| (v, taxonomy.vertex(v).inclusive_subsumed_leaf_count() as f64 / total))
            .collect();
        for (v, prob) in probs {
            taxonomy.set_probability(v, prob);
            // The root subsumes every leaf: avoid -0.0.
            taxonomy.set_ic_value(v, (-prob.log2()).max(0.0));
        }
        set_ic_delta_weights(taxonomy);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ic::{annotate, IcModelKind};

    /// root(1) -> a(2) -> {b(3), d(5)}; root -> c(4)
    fn five_node() -> Taxonomy {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.add_vertex(3, &[2]).unwrap();
        t.add_vertex(4, &[1]).unwrap();
        t.add_vertex(5, &[2]).unwrap();
        t.compute_cached_attributes().unwrap();
        t
    }

    fn ic(t: &Taxonomy, id: u64) -> f64 {
        t.vertex(t.vertex_by_concept(id).unwrap()).ic()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn seco_spans_zero_to_one() {
        let mut t = five_node();
        annotate(&mut t, IcModelKind::Seco).unwrap();
        assert!(close(ic(&t, 1), 0.0));
        assert!(close(ic(&t, 3), 1.0));
        assert!(close(ic(&t, 2), 1.0 - 3f64.ln() / 5f64.ln()));
    }

    #[test]
    fn zhou_blends_depth() {
        let mut t = five_node();
        annotate(&mut t, IcModelKind::Zhou).unwrap();
        assert!(close(ic(&t, 1), 0.0));
        // Leaf at the deepest level: both terms are 1.
        assert!(close(ic(&t, 3), 1.0));
        let expected = 0.5 + 0.5 * 2f64.ln() / 3f64.ln();
        assert!(close(ic(&t, 4), expected));
    }

    #[test]
    fn sanchez_and_blanchard_leaf_values() {
        let mut t = five_node();
        annotate(&mut t, IcModelKind::Sanchez2011).unwrap();
        // Leaf: (1 + 0) / (3 + 1).
        assert!(close(ic(&t, 3), 2.0));
        // Root: (1 + 3 / 1) / 4 = 1.
        assert!(close(ic(&t, 1), 0.0));

        annotate(&mut t, IcModelKind::Blanchard).unwrap();
        assert!(close(ic(&t, 1), 0.0));
        assert!(close(ic(&t, 2), -(2.0f64 / 3.0).log2()));
        assert!(close(ic(&t, 3), 3f64.log2()));
        let a = t.vertex_by_concept(2).unwrap();
        assert!(close(t.vertex(a).probability(), 2.0 / 3.0));
    }

    #[test]
    fn intrinsic_ic_never_increases_towards_the_root() {
        for kind in [IcModelKind::Seco, IcModelKind::Zhou, IcModelKind::Sanchez2011, IcModelKind::Blanchard] {
            let mut t = five_node();
            annotate(&mut t, kind).unwrap();
            for (_, edge) in t.edges() {
                assert!(t.ic_value(edge.parent()) <= t.ic_value(edge.child()) + 1e-12, "{kind}");
                assert!(edge.weight() >= 0.0);
            }
        }
    }

    #[test]
    fn single_vertex_taxonomy_is_well_defined() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.compute_cached_attributes().unwrap();
        annotate(&mut t, IcModelKind::Zhou).unwrap();
        assert!(ic(&t, 1).is_finite());
    }
}
