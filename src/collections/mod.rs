//! Vertex collections returned by taxonomy queries.
//!
//! - `vertex_list`: ordered vertex sets with set algebra and attribute aggregates

pub mod vertex_list;

pub use vertex_list::VertexList;
