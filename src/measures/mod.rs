//! Semantic similarity measures over an indexed, IC-annotated taxonomy.
//!
//! Each published formula is a small [`Measure`] value built once per taxonomy
//! (so constants such as the largest leaf IC are computed up front) and then
//! queried with a caller-owned [`DistanceField`]. [`MeasureRegistry`] maps every
//! [`MeasureKind`] to a constructor closure.
//!
//! ## Unrelated concepts
//!
//! Concepts under disjoint roots have neither a common ancestor nor a path.
//! Distances then report [`UNREACHABLE_DISTANCE`](crate::UNREACHABLE_DISTANCE).
//! Similarities bounded below by 0 (Resnik, the Lin family, FaITH, the normalised
//! Jiang-Conrath variants, Wu-Palmer, Pedersen, Li) report 0. Unbounded ones
//! (Leacock-Chodorow, and [`Measure::similarity`] of a distance) report
//! `f64::NEG_INFINITY`, which ranks below every related pair and is the identity
//! of [`highest_pairwise_similarity`].

use serde::{Deserialize, Serialize};

use crate::collections::VertexList;
use crate::error::TaxonomyError;
use crate::taxonomy::{DistanceField, Taxonomy, VertexId};

pub mod ic_based;
pub mod norm;
pub mod path_based;
pub mod registry;

pub use ic_based::{CosineLin, Faith, JiangConrath, JiangConrathNorm, Lin, LogisticLin, Resnik};
pub use norm::{cosine_norm, distance_to_similarity, exp_norm, logistic_norm};
pub use path_based::{LeacockChodorow, Li2003Strategy3, PathLength, PedersenPath, WeightedJiangConrath, WuPalmer};
pub use registry::{MeasureConstructor, MeasureRegistry};

/// Supported measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureKind {
    /// IC of the MICA.
    Resnik,
    /// `2 IC(m) / (IC(a) + IC(b))`.
    Lin,
    /// Cosine-normalised Lin.
    CosineLin,
    /// Logistic-normalised Lin.
    LogisticLin,
    /// `IC(m) / (IC(a) + IC(b) - IC(m))`.
    Faith,
    /// `IC(a) + IC(b) - 2 IC(m)`.
    JiangConrath,
    /// Cosine-normalised Jiang-Conrath similarity.
    CosineNormJiangConrath,
    /// Logistic-normalised Jiang-Conrath similarity.
    LogisticNormJiangConrath,
    /// Exponential-normalised Jiang-Conrath similarity.
    ExpNormJiangConrath,
    /// Shortest path over IC-weighted edges.
    WeightedJiangConrath,
    /// Depth of the LCS relative to the path through it.
    WuPalmer,
    /// Shortest path length.
    Rada,
    /// `1 / (1 + path length)`.
    PedersenPath,
    /// `-ln((1 + path length) / (2 * max depth))`.
    LeacockChodorow,
    /// `exp(-alpha * path length)`.
    Li2003Strategy3,
}

impl MeasureKind {
    /// Every measure, in declaration order.
    pub const ALL: [MeasureKind; 15] = [
        MeasureKind::Resnik,
        MeasureKind::Lin,
        MeasureKind::CosineLin,
        MeasureKind::LogisticLin,
        MeasureKind::Faith,
        MeasureKind::JiangConrath,
        MeasureKind::CosineNormJiangConrath,
        MeasureKind::LogisticNormJiangConrath,
        MeasureKind::ExpNormJiangConrath,
        MeasureKind::WeightedJiangConrath,
        MeasureKind::WuPalmer,
        MeasureKind::Rada,
        MeasureKind::PedersenPath,
        MeasureKind::LeacockChodorow,
        MeasureKind::Li2003Strategy3,
    ];
}

/// What the raw value of [`Measure::compare`] expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureClass {
    /// Higher means more similar.
    Similarity,
    /// A distance; 0 for identical concepts.
    Distance,
    /// A dissimilarity in `[0, 1]`.
    Dissimilarity,
}

/// A pairwise semantic measure.
pub trait Measure: Send + Sync {
    /// Which formula this is.
    fn kind(&self) -> MeasureKind;

    /// How to read the value returned by [`compare`](Self::compare).
    fn class(&self) -> MeasureClass;

    /// Raw value of the measure between `left` and `right`.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::NotIndexed`] for measures that read cached depths
    /// of a taxonomy that was not indexed.
    fn compare(
        &self,
        taxonomy: &Taxonomy,
        field: &mut DistanceField,
        left: VertexId,
        right: VertexId,
    ) -> Result<f64, TaxonomyError>;

    /// [`compare`](Self::compare) converted to a similarity: distances become
    /// `1 - d / 2` and dissimilarities `1 - d`.
    ///
    /// An unreachable distance becomes `f64::NEG_INFINITY`, never NaN.
    ///
    /// # Errors
    /// Propagates the error of [`compare`](Self::compare).
    fn similarity(
        &self,
        taxonomy: &Taxonomy,
        field: &mut DistanceField,
        left: VertexId,
        right: VertexId,
    ) -> Result<f64, TaxonomyError> {
        let raw = self.compare(taxonomy, field, left, right)?;
        Ok(match self.class() {
            MeasureClass::Similarity => raw,
            MeasureClass::Distance if raw.is_infinite() => f64::NEG_INFINITY,
            MeasureClass::Distance => 1.0 - raw / 2.0,
            MeasureClass::Dissimilarity => 1.0 - raw,
        })
    }
}

/// Best [`Measure::similarity`] over every pair drawn from `lefts` x `rights`.
///
/// Returns negative infinity when either list is empty.
///
/// # Errors
/// Propagates the first error raised by the measure.
pub fn highest_pairwise_similarity(
    measure: &dyn Measure,
    taxonomy: &Taxonomy,
    field: &mut DistanceField,
    lefts: &VertexList,
    rights: &VertexList,
) -> Result<f64, TaxonomyError> {
    let mut best = f64::NEG_INFINITY;
    for left in lefts {
        for right in rights {
            best = best.max(measure.similarity(taxonomy, field, left, right)?);
        }
    }
    Ok(best)
}
