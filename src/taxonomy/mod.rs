//! The taxonomy graph engine.
//!
//! Storage is arena + index: vertices, edges and half-edges live in dense vectors
//! owned by [`Taxonomy`] and are addressed by the slot handles in [`ids`]. Each
//! vertex keeps a circular ring of its outgoing half-edges (parents and children
//! alike), so one walk serves upward, downward and non-oriented traversals.
//!
//! - `graph`: build phase, accessors and annotation setters
//! - `indexer`: cached depths and subsumption counts
//! - `ancestors`: ancestor/descendant sets, MICA and LCS
//! - `shortest_path`: exact Dijkstra and AncSPL
//! - `parallel`: rayon batch queries (feature `parallel`)

pub(crate) mod access;
pub mod ancestors;
pub mod edge;
pub mod graph;
pub mod ids;
pub mod indexer;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod shortest_path;
pub mod vertex;

pub use access::DistanceField;
pub use edge::{Edge, HalfEdge, OrientedEdgeType};
pub use graph::{OutArcs, Taxonomy, TaxonomyStats};
pub use ids::{ConceptId, EdgeId, HalfEdgeId, VertexId};
pub use vertex::{UserTag, Vertex};
