//! Map from [`MeasureKind`] to a constructor closure.

use std::collections::HashMap;

use super::ic_based::{CosineLin, Faith, JiangConrath, JiangConrathNorm, Lin, LogisticLin, Resnik};
use super::path_based::{LeacockChodorow, Li2003Strategy3, PathLength, PedersenPath, WeightedJiangConrath, WuPalmer};
use super::{Measure, MeasureKind};
use crate::config::QueryConfig;
use crate::error::TaxonomyError;
use crate::taxonomy::Taxonomy;

/// Builds a measure for a given taxonomy and query configuration.
pub type MeasureConstructor =
    Box<dyn Fn(&Taxonomy, QueryConfig) -> Result<Box<dyn Measure>, TaxonomyError> + Send + Sync>;

/// Registered measure constructors.
pub struct MeasureRegistry {
    constructors: HashMap<MeasureKind, MeasureConstructor>,
}

impl core::fmt::Debug for MeasureRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut kinds: Vec<_> = self.constructors.keys().collect();
        kinds.sort_by_key(|k| MeasureKind::ALL.iter().position(|a| a == *k));
        f.debug_struct("MeasureRegistry").field("kinds", &kinds).finish()
    }
}

fn boxed<M: Measure + 'static>(measure: M) -> Result<Box<dyn Measure>, TaxonomyError> {
    Ok(Box::new(measure))
}

impl MeasureRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A registry with every [`MeasureKind`] registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MeasureKind::Resnik, Box::new(|_, _| boxed(Resnik)));
        registry.register(MeasureKind::Lin, Box::new(|_, _| boxed(Lin)));
        registry.register(MeasureKind::CosineLin, Box::new(|_, _| boxed(CosineLin)));
        registry.register(MeasureKind::LogisticLin, Box::new(|_, _| boxed(LogisticLin)));
        registry.register(MeasureKind::Faith, Box::new(|_, _| boxed(Faith)));
        registry.register(MeasureKind::JiangConrath, Box::new(|_, _| boxed(JiangConrath)));
        for kind in [
            MeasureKind::CosineNormJiangConrath,
            MeasureKind::LogisticNormJiangConrath,
            MeasureKind::ExpNormJiangConrath,
        ] {
            registry.register(kind, Box::new(move |t, _| boxed(JiangConrathNorm::new(t, kind))));
        }
        registry.register(
            MeasureKind::WeightedJiangConrath,
            Box::new(|_, cfg| boxed(WeightedJiangConrath::new(cfg))),
        );
        registry.register(MeasureKind::WuPalmer, Box::new(|_, cfg| boxed(WuPalmer::new(cfg))));
        registry.register(MeasureKind::Rada, Box::new(|_, cfg| boxed(PathLength::new(cfg))));
        registry.register(MeasureKind::PedersenPath, Box::new(|_, cfg| boxed(PedersenPath::new(cfg))));
        registry.register(
            MeasureKind::LeacockChodorow,
            Box::new(|t, cfg| boxed(LeacockChodorow::new(t, cfg)?)),
        );
        registry.register(
            MeasureKind::Li2003Strategy3,
            Box::new(|_, cfg| boxed(Li2003Strategy3::new(cfg))),
        );
        registry
    }

    /// Registers (or replaces) the constructor for `kind`.
    pub fn register(&mut self, kind: MeasureKind, constructor: MeasureConstructor) {
        self.constructors.insert(kind, constructor);
    }

    /// Whether `kind` has a constructor.
    pub fn contains(&self, kind: MeasureKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Builds the measure for `kind`.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::UnregisteredMeasure`] for a kind without a
    /// constructor, otherwise the constructor's own error.
    pub fn build(&self, kind: MeasureKind, taxonomy: &Taxonomy, config: QueryConfig) -> Result<Box<dyn Measure>, TaxonomyError> {
        let constructor = self
            .constructors
            .get(&kind)
            .ok_or(TaxonomyError::UnregisteredMeasure(kind))?;
        constructor(taxonomy, config)
    }
}

impl Default for MeasureRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
