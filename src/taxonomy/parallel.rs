//! Batch evaluation of vertex pairs on the rayon pool.
//!
//! An indexed taxonomy is only read during queries and all scratch state lives in
//! a [`DistanceField`], so each worker owns one field and shares the taxonomy by
//! reference.

use rayon::prelude::*;

use super::access::DistanceField;
use super::graph::Taxonomy;
use super::ids::VertexId;
use crate::config::QueryConfig;

impl Taxonomy {
    /// Path distance of every pair, computed in parallel; output order matches `pairs`.
    pub fn par_path_distances(&self, pairs: &[(VertexId, VertexId)], config: &QueryConfig) -> Vec<f64> {
        crate::trace_debug!(pairs = pairs.len(), algorithm = ?config.path_algorithm, "parallel path batch");
        pairs
            .par_iter()
            .map_init(
                || DistanceField::with_capacity(self.vertex_count()),
                |field, &(left, right)| self.path_distance(left, right, config, field),
            )
            .collect()
    }

    /// MICA of every pair, computed in parallel; output order matches `pairs`.
    pub fn par_mica(&self, pairs: &[(VertexId, VertexId)]) -> Vec<Option<VertexId>> {
        pairs.par_iter().map(|&(left, right)| self.mica(left, right)).collect()
    }
}
