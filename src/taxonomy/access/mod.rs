//! Scratch buffers shared by taxonomy traversals.
//!
//! Traversal state (visited marks, tentative distances, the Dijkstra frontier)
//! lives here instead of on the vertices. `VisitedSet` stays crate-internal;
//! [`DistanceField`] is public because callers own it across queries.

pub(crate) mod distance;
pub(crate) mod visited;

pub use distance::DistanceField;
