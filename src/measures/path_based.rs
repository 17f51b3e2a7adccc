//! Measures built on shortest-path lengths and depths.
//!
//! Path lengths follow the [`QueryConfig`] the measure was built with: exact or
//! AncSPL, unit or edge weights.

use super::{Measure, MeasureClass, MeasureKind};
use crate::config::{DepthMode, EdgeWeighting, QueryConfig};
use crate::error::TaxonomyError;
use crate::taxonomy::{DistanceField, Taxonomy, VertexId};

/// Rada et al. (1989): the path length itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathLength {
    config: QueryConfig,
}

impl PathLength {
    /// Uses `config` for every path query.
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }
}

impl Measure for PathLength {
    fn kind(&self) -> MeasureKind {
        MeasureKind::Rada
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Distance
    }

    fn compare(&self, taxonomy: &Taxonomy, field: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        Ok(taxonomy.path_distance(left, right, &self.config, field))
    }
}

/// Pedersen's path similarity: `1 / (1 + path length)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PedersenPath {
    config: QueryConfig,
}

impl PedersenPath {
    /// Uses `config` for every path query.
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }
}

impl Measure for PedersenPath {
    fn kind(&self) -> MeasureKind {
        MeasureKind::PedersenPath
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Similarity
    }

    fn compare(&self, taxonomy: &Taxonomy, field: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        Ok(1.0 / (1.0 + taxonomy.path_distance(left, right, &self.config, field)))
    }
}

/// Leacock and Chodorow (1998): `-ln((1 + path length) / (2 * D))`, with `D` the
/// largest minimum depth of the taxonomy (at least 1). Unrelated concepts score
/// `f64::NEG_INFINITY`.
#[derive(Debug, Clone, Copy)]
pub struct LeacockChodorow {
    config: QueryConfig,
    max_depth: f64,
}

impl LeacockChodorow {
    /// Captures the largest depth of `taxonomy`.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::NotIndexed`] if depths were not computed.
    pub fn new(taxonomy: &Taxonomy, config: QueryConfig) -> Result<Self, TaxonomyError> {
        taxonomy.ensure_indexed()?;
        let depth = taxonomy.vertex_list().greatest_depth_min(taxonomy).max(1);
        Ok(Self {
            config,
            max_depth: f64::from(depth),
        })
    }
}

impl Measure for LeacockChodorow {
    fn kind(&self) -> MeasureKind {
        MeasureKind::LeacockChodorow
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Similarity
    }

    fn compare(&self, taxonomy: &Taxonomy, field: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        let length = taxonomy.path_distance(left, right, &self.config, field);
        Ok(-((1.0 + length) / (2.0 * self.max_depth)).ln())
    }
}

/// Li et al. (2003), strategy 3: `exp(-alpha * path length)`.
#[derive(Debug, Clone, Copy)]
pub struct Li2003Strategy3 {
    config: QueryConfig,
    alpha: f64,
}

impl Li2003Strategy3 {
    /// Default path-length decay.
    pub const DEFAULT_ALPHA: f64 = 0.25;

    /// Uses `config` for every path query and [`DEFAULT_ALPHA`](Self::DEFAULT_ALPHA).
    pub fn new(config: QueryConfig) -> Self {
        Self::with_alpha(config, Self::DEFAULT_ALPHA)
    }

    /// Uses a custom decay.
    pub fn with_alpha(config: QueryConfig, alpha: f64) -> Self {
        Self { config, alpha }
    }
}

impl Measure for Li2003Strategy3 {
    fn kind(&self) -> MeasureKind {
        MeasureKind::Li2003Strategy3
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Similarity
    }

    fn compare(&self, taxonomy: &Taxonomy, field: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        let length = taxonomy.path_distance(left, right, &self.config, field);
        Ok((-self.alpha * length).exp())
    }
}

/// Weighted Jiang-Conrath: the shortest path over annotated edge weights.
///
/// With an intrinsic IC model the weights are IC gaps; with the
/// conditional-probability model they are `-log2 P(child | parent)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedJiangConrath {
    config: QueryConfig,
}

impl WeightedJiangConrath {
    /// Uses the path algorithm of `config`; the weighting is always [`EdgeWeighting::EdgeWeight`].
    pub fn new(config: QueryConfig) -> Self {
        Self {
            config: config.with_weighting(EdgeWeighting::EdgeWeight),
        }
    }
}

impl Measure for WeightedJiangConrath {
    fn kind(&self) -> MeasureKind {
        MeasureKind::WeightedJiangConrath
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Distance
    }

    fn compare(&self, taxonomy: &Taxonomy, field: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        Ok(taxonomy.path_distance(left, right, &self.config, field))
    }
}

/// Wu and Palmer (1994): `2 D(lcs) / (2 D(lcs) + d(lcs, a) + d(lcs, b))`.
///
/// Both distances come from one distance field rooted at the LCS. `D` is the
/// depth selected by the configured [`DepthMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WuPalmer {
    config: QueryConfig,
}

impl WuPalmer {
    /// Uses the depth mode and weighting of `config`.
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }
}

impl Measure for WuPalmer {
    fn kind(&self) -> MeasureKind {
        MeasureKind::WuPalmer
    }

    fn class(&self) -> MeasureClass {
        MeasureClass::Similarity
    }

    fn compare(&self, taxonomy: &Taxonomy, field: &mut DistanceField, left: VertexId, right: VertexId) -> Result<f64, TaxonomyError> {
        if left == right {
            return Ok(1.0);
        }
        let Some(lcs) = taxonomy.lcs(left, right, self.config.depth_mode)? else {
            return Ok(0.0);
        };
        taxonomy.compute_distance_field(lcs, self.config.weighting, field);
        let vertex = taxonomy.vertex(lcs);
        let depth = 2.0
            * f64::from(match self.config.depth_mode {
                DepthMode::Min => vertex.depth_min(),
                DepthMode::Max => vertex.depth_max(),
            });
        let spread = field.distance(left) + field.distance(right);
        Ok(if depth + spread > 0.0 { depth / (depth + spread) } else { 0.0 })
    }
}
