//! Measures built on the IC of the MICA.
//!
//! When two concepts share no ancestor these measures report their least similar
//! value: 0 for similarities and [`UNREACHABLE_DISTANCE`] for Jiang-Conrath.

use super::norm::{cosine_norm, distance_to_similarity, exp_norm, logistic_norm, LOGISTIC_SLOPE};
use super::{Measure, MeasureClass, MeasureKind};
use crate::error::TaxonomyError;
use crate::taxonomy::{DistanceField, Taxonomy, VertexId};
use crate::UNREACHABLE_DISTANCE;

/// `(IC(left), IC(right), IC(mica))`, or `None` without a common ancestor.
fn ic_triple(taxonomy: &Taxonomy, left: VertexId, right: VertexId) -> Option<(f64, f64, f64)> {
    let mica = taxonomy.mica(left, right)?;
    Some((taxonomy.ic_value(left), taxonomy.ic_value(right), taxonomy.ic_value(mica)))
}

/// `2 IC(m) / (IC(a) + IC(b))`; 1 for identical zero-IC concepts.
fn lin_ratio(taxonomy: &Taxonomy, left: VertexId, right: VertexId) -> f64 {
    match ic_triple(taxonomy, left, right) {
        Some((a, b, m)) if a + b > 0.0 => 2.0 * m / (a + b),
        Some(_) if left == right => 1.0,
        _ => 0.0,
    }
}

/// Classic Jiang-Conrath distance.
pub(crate) fn jiang_conrath_distance(taxonomy: &Taxonomy, left: VertexId, right: VertexId) -> f64 {
    ic_triple(taxonomy, left, right).map_or(UNREACHABLE_DISTANCE, |(a, b, m)| a + b - 2.0 * m)
}

/// Resnik (1995): IC of the MICA.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resnik;

impl Measure for Resnik {
    fn kind(&self) -> MeasureKind {
        MeasureKind::Resnik
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Similarity
    }

    fn compare(&self, taxonomy: &Taxonomy, _: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        Ok(taxonomy.mica(left, right).map_or(0.0, |m| taxonomy.ic_value(m)))
    }
}

/// Lin (1998).
#[derive(Debug, Clone, Copy, Default)]
pub struct Lin;

impl Measure for Lin {
    fn kind(&self) -> MeasureKind {
        MeasureKind::Lin
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Similarity
    }

    fn compare(&self, taxonomy: &Taxonomy, _: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        Ok(lin_ratio(taxonomy, left, right))
    }
}

/// Lin passed through [`cosine_norm`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineLin;

impl Measure for CosineLin {
    fn kind(&self) -> MeasureKind {
        MeasureKind::CosineLin
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Similarity
    }

    fn compare(&self, taxonomy: &Taxonomy, _: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        Ok(cosine_norm(lin_ratio(taxonomy, left, right)))
    }
}

/// Lin passed through [`logistic_norm`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticLin;

impl Measure for LogisticLin {
    fn kind(&self) -> MeasureKind {
        MeasureKind::LogisticLin
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Similarity
    }

    fn compare(&self, taxonomy: &Taxonomy, _: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        if taxonomy.mica(left, right).is_none() {
            return Ok(0.0);
        }
        Ok(logistic_norm(LOGISTIC_SLOPE, lin_ratio(taxonomy, left, right)))
    }
}

/// Pirró and Euzenat's FaITH (2010): `IC(m) / (IC(a) + IC(b) - IC(m))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Faith;

impl Measure for Faith {
    fn kind(&self) -> MeasureKind {
        MeasureKind::Faith
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Similarity
    }

    fn compare(&self, taxonomy: &Taxonomy, _: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        Ok(match ic_triple(taxonomy, left, right) {
            Some((a, b, m)) if a + b - m > 0.0 => m / (a + b - m),
            Some(_) if left == right => 1.0,
            _ => 0.0,
        })
    }
}

/// Jiang and Conrath (1997) distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct JiangConrath;

impl Measure for JiangConrath {
    fn kind(&self) -> MeasureKind {
        MeasureKind::JiangConrath
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Distance
    }

    fn compare(&self, taxonomy: &Taxonomy, _: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        Ok(jiang_conrath_distance(taxonomy, left, right))
    }
}

/// Jiang-Conrath distance mapped to a similarity and normalised.
///
/// The distance is scaled by the largest leaf IC of the taxonomy, captured when
/// the measure is built.
#[derive(Debug, Clone, Copy)]
pub struct JiangConrathNorm {
    kind: MeasureKind,
    max_distance: f64,
}

impl JiangConrathNorm {
    /// Builds the normalised variant selected by `kind`.
    ///
    /// Any kind other than `CosineNormJiangConrath`, `LogisticNormJiangConrath` or
    /// `ExpNormJiangConrath` falls back to the cosine mapping.
    pub fn new(taxonomy: &Taxonomy, kind: MeasureKind) -> Self {
        let kind = match kind {
            MeasureKind::LogisticNormJiangConrath | MeasureKind::ExpNormJiangConrath => kind,
            _ => MeasureKind::CosineNormJiangConrath,
        };
        let max_distance = taxonomy.leaves().greatest_ic(taxonomy);
        Self { kind, max_distance }
    }

    /// The largest leaf IC used to scale distances.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }
}

impl Measure for JiangConrathNorm {
    fn kind(&self) -> MeasureKind {
        self.kind
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Similarity
    }

    fn compare(&self, taxonomy: &Taxonomy, _: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        let distance = jiang_conrath_distance(taxonomy, left, right);
        if !distance.is_finite() {
            return Ok(0.0);
        }
        let similarity = distance_to_similarity(distance, self.max_distance);
        Ok(match self.kind {
            MeasureKind::LogisticNormJiangConrath => logistic_norm(LOGISTIC_SLOPE, similarity),
            MeasureKind::ExpNormJiangConrath => exp_norm(similarity),
            _ => cosine_norm(similarity),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measures::fixtures::{close, five_node, v};

    #[test]
    fn mica_based_values_on_the_five_node_tree() {
        let t = five_node();
        let mut f = DistanceField::new();
        let (b, d) = (v(&t, 3), v(&t, 5));

        assert!(close(Resnik.compare(&t, &mut f, b, d).unwrap(), 0.3));
        assert!(close(Lin.compare(&t, &mut f, b, d).unwrap(), 0.6 / 1.1));
        assert!(close(CosineLin.compare(&t, &mut f, b, d).unwrap(), cosine_norm(0.6 / 1.1)));
        assert!(close(Faith.compare(&t, &mut f, b, d).unwrap(), 0.3 / 0.8));
        assert!(close(JiangConrath.compare(&t, &mut f, b, d).unwrap(), 0.5));
        assert!(close(JiangConrath.similarity(&t, &mut f, b, d).unwrap(), 0.75));
    }

    #[test]
    fn identical_concepts_are_maximally_similar() {
        let t = five_node();
        let mut f = DistanceField::new();
        let b = v(&t, 3);
        assert!(close(Lin.compare(&t, &mut f, b, b).unwrap(), 1.0));
        assert!(close(Faith.compare(&t, &mut f, b, b).unwrap(), 1.0));
        assert!(close(JiangConrath.compare(&t, &mut f, b, b).unwrap(), 0.0));
        let root = v(&t, 1);
        assert!(close(Lin.compare(&t, &mut f, root, root).unwrap(), 1.0));
    }

    #[test]
    fn normalised_jiang_conrath_uses_largest_leaf_ic() {
        let t = five_node();
        let mut f = DistanceField::new();
        let cos = JiangConrathNorm::new(&t, MeasureKind::CosineNormJiangConrath);
        assert!(close(cos.max_distance(), 0.6));
        let (b, d) = (v(&t, 3), v(&t, 5));
        let sim = 1.0 - 0.5 / 1.2;
        assert!(close(cos.compare(&t, &mut f, b, d).unwrap(), cosine_norm(sim)));

        let logistic = JiangConrathNorm::new(&t, MeasureKind::LogisticNormJiangConrath);
        assert_eq!(logistic.kind(), MeasureKind::LogisticNormJiangConrath);
        assert!(close(logistic.compare(&t, &mut f, b, d).unwrap(), logistic_norm(8.0, sim)));

        let exp = JiangConrathNorm::new(&t, MeasureKind::ExpNormJiangConrath);
        assert!(close(exp.compare(&t, &mut f, b, d).unwrap(), sim.exp() - 1.0));

        assert_eq!(JiangConrathNorm::new(&t, MeasureKind::Rada).kind(), MeasureKind::CosineNormJiangConrath);
    }

    #[test]
    fn disjoint_roots_are_least_similar() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[]).unwrap();
        let a = t.add_vertex(3, &[1]).unwrap();
        let b = t.add_vertex(4, &[2]).unwrap();
        t.set_ic_value(a, 1.0);
        t.set_ic_value(b, 1.0);
        t.compute_cached_attributes().unwrap();
        let mut f = DistanceField::new();
        assert_eq!(Resnik.compare(&t, &mut f, a, b).unwrap(), 0.0);
        assert_eq!(Lin.compare(&t, &mut f, a, b).unwrap(), 0.0);
        assert_eq!(LogisticLin.compare(&t, &mut f, a, b).unwrap(), 0.0);
        assert_eq!(JiangConrath.compare(&t, &mut f, a, b).unwrap(), UNREACHABLE_DISTANCE);
        let cos = JiangConrathNorm::new(&t, MeasureKind::CosineNormJiangConrath);
        assert_eq!(cos.compare(&t, &mut f, a, b).unwrap(), 0.0);
    }
}
