//! Flow-matrix construction for transitive transfers.
//!
//! The hub executes a multi-hop transfer from a single flattened
//! structure: the set of touched addresses (vertices), one directed flow
//! edge per hop, the streams grouping terminal edges per recipient, and
//! the per-hop coordinate triples packed as 16-bit big-endian integers.
//!
//! [`FlowMatrix::from_steps`] derives that structure from a pathfinder
//! route and enforces the encoding invariants the contract checks on
//! submission: canonical vertex ordering, step-order edge correspondence,
//! and exact terminal-amount conservation.

mod matrix;
mod vertex;

pub use matrix::{FlowEdge, FlowMatrix, FlowStream};
pub(crate) use vertex::VertexIndex;
