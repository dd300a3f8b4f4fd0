//! Vertex-centric iteration API.
//!
//! An algorithm is a [`function::VertexUpdateFunction`] paired with a
//! [`function::MessagingFunction`]; an engine implementing
//! [`graph::VertexCentricGraph`] drives them superstep by superstep.

pub mod function;
pub mod graph;
pub mod message;
