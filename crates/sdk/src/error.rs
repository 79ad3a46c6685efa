use alloy::{
    primitives::{Address, U256},
    transports::TransportError,
};
use thiserror::Error;

/// Errors produced by the SDK.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Input that can never form a valid flow matrix: an empty step list,
    /// a malformed address or amount string, or amounts overflowing U256.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Terminal-edge amounts do not add up to the requested transfer value.
    /// The pathfinder result cannot satisfy the request as returned.
    #[error("path delivers {actual} of requested {expected}")]
    PathConservation { expected: U256, actual: U256 },

    /// The structure has more entries than the 16-bit wire coordinates can
    /// index.
    #[error("flow structure exceeds 16-bit coordinate space ({count} entries)")]
    CoordinateOverflow { count: usize },

    /// A step references an address missing from the computed vertex index.
    /// Indicates a bug in vertex-set construction.
    #[error("address {0} missing from the flow vertex index")]
    InternalConsistency(Address),

    /// The pathfinder answered, but the discovered route cannot carry the
    /// requested value.
    #[error("pathfinder can route {max_flow} of requested {requested}")]
    InsufficientFlow { requested: U256, max_flow: U256 },

    /// Pathfinder transport or response decoding failure.
    #[error(transparent)]
    Rpc(#[from] TransportError),
}
