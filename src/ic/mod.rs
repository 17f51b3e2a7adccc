//! Information-content annotation.
//!
//! An [`IcModel`] walks an indexed taxonomy once and assigns every vertex a
//! non-negative IC value (and, for some models, a probability). Models may also
//! annotate edges: intrinsic models weight each edge by the IC gap between its
//! endpoints, the conditional-probability model stores P(child | parent) and
//! oriented half-edge weights.
//!
//! The taxonomy trusts the model: IC monotonicity along "is-a" chains is not
//! checked.

use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;
use crate::taxonomy::Taxonomy;

pub mod cond_prob;
pub mod intrinsic;

pub use cond_prob::CondProbLeaves;
pub use intrinsic::{Blanchard, Sanchez2011, Seco, Zhou};

/// Available IC models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IcModelKind {
    /// Hyponym count relative to taxonomy size.
    Seco,
    /// Seco blended with relative depth.
    Zhou,
    /// Subsumed leaves per subsumer.
    Sanchez2011,
    /// Subsumed-leaf probability.
    Blanchard,
    /// Conditional probability of a child given its parent, from leaf counts.
    CondProbLeaves,
}

impl IcModelKind {
    /// Every model, in declaration order.
    pub const ALL: [IcModelKind; 5] = [
        IcModelKind::Seco,
        IcModelKind::Zhou,
        IcModelKind::Sanchez2011,
        IcModelKind::Blanchard,
        IcModelKind::CondProbLeaves,
    ];

    /// Instantiates the model.
    pub fn build(self) -> Box<dyn IcModel> {
        match self {
            IcModelKind::Seco => Box::new(Seco),
            IcModelKind::Zhou => Box::new(Zhou),
            IcModelKind::Sanchez2011 => Box::new(Sanchez2011),
            IcModelKind::Blanchard => Box::new(Blanchard),
            IcModelKind::CondProbLeaves => Box::new(CondProbLeaves),
        }
    }
}

impl core::fmt::Display for IcModelKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            IcModelKind::Seco => "Seco",
            IcModelKind::Zhou => "Zhou",
            IcModelKind::Sanchez2011 => "Sanchez2011",
            IcModelKind::Blanchard => "Blanchard",
            IcModelKind::CondProbLeaves => "CondProbLeaves",
        };
        f.write_str(name)
    }
}

/// A strategy assigning IC values to every vertex of a taxonomy.
pub trait IcModel: Send + Sync {
    /// Which model this is.
    fn kind(&self) -> IcModelKind;

    /// Annotates every vertex (and possibly every edge) of `taxonomy`.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::NotIndexed`] if cached attributes were not computed.
    fn annotate(&self, taxonomy: &mut Taxonomy) -> Result<(), TaxonomyError>;
}

/// Builds the model for `kind` and applies it to `taxonomy`.
///
/// # Errors
/// Propagates the model's error.
pub fn annotate(taxonomy: &mut Taxonomy, kind: IcModelKind) -> Result<(), TaxonomyError> {
    kind.build().annotate(taxonomy)?;
    crate::trace_debug!(model = %kind, vertices = taxonomy.vertex_count(), "applied IC model");
    Ok(())
}

/// Sets every edge weight to `|IC(child) - IC(parent)|`.
pub fn set_ic_delta_weights(taxonomy: &mut Taxonomy) {
    let deltas: Vec<_> = taxonomy
        .edges()
        .map(|(id, edge)| (id, (taxonomy.ic_value(edge.child()) - taxonomy.ic_value(edge.parent())).abs()))
        .collect();
    for (id, weight) in deltas {
        taxonomy.set_edge_weight(id, weight);
    }
}
