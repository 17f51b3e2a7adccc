//! # `taxosim` - Taxonomy Graph Engine for Semantic Similarity
//!
//! An in-memory engine for "is-a" taxonomies (WordNet, SNOMED-CT, MeSH, the Gene
//! Ontology) and the similarity measures computed over them.
//!
//! ## Key Features
//!
//! - **Arena storage**: vertices, edges and half-edges in dense vectors addressed
//!   by `u32` slot handles; each vertex keeps a circular ring of outgoing arcs
//! - **One-shot indexing**: depth min/max, hyponym, subsumed-leaf and ancestor
//!   counts computed once over the root-first vertex order
//! - **Common ancestors**: MICA and LCS queries over freshly computed ancestor sets
//! - **Shortest paths**: exact Dijkstra (unit, edge or half-edge weights) and the
//!   AncSPL approximation restricted to the ancestor subgraph
//! - **IC models and measures**: intrinsic and conditional-probability IC models,
//!   IC-based and path-based measures behind a registry
//!
//! ## Architecture
//!
//! Query scratch (tentative distances, visited marks, the Dijkstra frontier) is
//! never stored on the vertices. Callers own a [`DistanceField`] and pass it to
//! every path query, so an indexed `&Taxonomy` is `Sync` and can be shared by
//! worker threads that each own a field (see the `parallel` feature).
//!
//! ### Lifecycle
//!
//! 1. **Build**: [`Taxonomy::add_vertex`] with already-inserted parents, or
//!    [`loader::load_taxonomy`] for an unordered JSON edge list.
//! 2. **Index**: [`Taxonomy::compute_cached_attributes`] freezes the structure.
//! 3. **Annotate**: an [`ic::IcModel`] assigns IC values and edge weights.
//! 4. **Query**: ancestors, [`Taxonomy::mica`], [`Taxonomy::lcs`], path distances,
//!    or a [`measures::Measure`] built from a [`MeasureRegistry`].
//!
//! ## Feature Flags
//!
//! - `parallel`: rayon batch queries over vertex pairs
//! - `tracing`: debug events for indexing, IC annotation, loading and batches
//!
//! ## Example
//!
//! ```rust
//! use taxosim::{DistanceField, EdgeWeighting, DepthMode, Taxonomy};
//!
//! let mut t = Taxonomy::new();
//! t.add_vertex(1, &[]).unwrap();
//! t.add_vertex(2, &[1]).unwrap();
//! let b = t.add_vertex(3, &[2]).unwrap();
//! let d = t.add_vertex(5, &[2]).unwrap();
//! t.compute_cached_attributes().unwrap();
//!
//! let mut field = DistanceField::new();
//! assert_eq!(t.shortest_path_distance(b, d, EdgeWeighting::Unit, &mut field), 2.0);
//! assert_eq!(t.lcs(b, d, DepthMode::Min).unwrap(), t.vertex_by_concept(2));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

/// Distance reported for vertex pairs with no connecting path.
pub const UNREACHABLE_DISTANCE: f64 = f64::INFINITY;

/// Emits a `tracing::debug!` event when the `tracing` feature is enabled.
macro_rules! trace_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::debug!($($arg)*);
        }
    };
}
pub(crate) use trace_debug;

pub mod collections;
pub mod config;
pub mod error;
pub mod ic;
pub mod loader;
pub mod measures;
pub mod taxonomy;

pub use collections::VertexList;
pub use config::{DepthMode, EdgeWeighting, PathAlgorithm, QueryConfig};
pub use error::TaxonomyError;
pub use ic::{IcModel, IcModelKind};
pub use measures::{Measure, MeasureClass, MeasureKind, MeasureRegistry};
pub use taxonomy::{
    ConceptId, DistanceField, Edge, EdgeId, HalfEdge, HalfEdgeId, OrientedEdgeType, Taxonomy, TaxonomyStats, UserTag,
    Vertex, VertexId,
};

// Compile-time layout checks for the arena records.
const _: () = {
    use core::mem;

    assert!(mem::size_of::<VertexId>() == mem::size_of::<u32>());
    assert!(mem::size_of::<HalfEdgeId>() == mem::size_of::<u32>());
    // Traversal-hot record: target, kind, weight and ring link.
    assert!(mem::size_of::<HalfEdge>() <= 24);
};

// An indexed taxonomy is shared by reference across query threads.
const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Taxonomy>();
    assert_send_sync::<DistanceField>();
};
