//! Query configuration consumed by the measure library.
//!
//! All types derive `serde` so a benchmark or service can keep its settings in a
//! JSON document next to the taxonomy it loads.

use serde::{Deserialize, Serialize};

/// Shortest-path algorithm used by path-based measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathAlgorithm {
    /// Dijkstra over the whole non-oriented taxonomy.
    #[default]
    Exact,
    /// Dijkstra restricted to the union of both ancestor sets.
    AncSpl,
}

/// Edge cost used by distance computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWeighting {
    /// Every edge costs 1.
    #[default]
    Unit,
    /// Every edge costs its annotated [`Edge::weight`](crate::taxonomy::Edge::weight).
    EdgeWeight,
}

impl EdgeWeighting {
    /// Maps a `weighted` flag onto a weighting.
    #[inline]
    pub fn from_flag(weighted: bool) -> Self {
        if weighted {
            Self::EdgeWeight
        } else {
            Self::Unit
        }
    }
}

/// Which cached depth defines "lowest" for LCS queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthMode {
    /// Shortest ascending path to a root.
    #[default]
    Min,
    /// Longest ascending path to a root.
    Max,
}

impl DepthMode {
    /// Maps a `use_longest_depth` flag onto a depth mode.
    #[inline]
    pub fn from_longest(use_longest_depth: bool) -> Self {
        if use_longest_depth {
            Self::Max
        } else {
            Self::Min
        }
    }
}

/// Per-measure query settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Exact Dijkstra or AncSPL.
    pub path_algorithm: PathAlgorithm,
    /// Unit or annotated edge weights.
    pub weighting: EdgeWeighting,
    /// Depth semantics for LCS selection.
    pub depth_mode: DepthMode,
}

impl QueryConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns the `serde_json` error for malformed documents or unknown variants.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialises the configuration as pretty-printed JSON.
    ///
    /// # Errors
    /// Propagates `serde_json` serialisation errors.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Returns a copy that uses `algorithm` for path queries.
    #[must_use]
    pub fn with_path_algorithm(mut self, algorithm: PathAlgorithm) -> Self {
        self.path_algorithm = algorithm;
        self
    }

    /// Returns a copy that uses `weighting` for path queries.
    #[must_use]
    pub fn with_weighting(mut self, weighting: EdgeWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Returns a copy that uses `depth_mode` for LCS queries.
    #[must_use]
    pub fn with_depth_mode(mut self, depth_mode: DepthMode) -> Self {
        self.depth_mode = depth_mode;
        self
    }
}
