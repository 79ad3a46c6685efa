mod step;

use alloy::primitives::U256;
pub use step::TransferStep;

use crate::error::FlowError;

/// Position of an address in the sorted flow vertex sequence.
/// The wire format packs coordinates as 16-bit big-endian integers, so a
/// matrix can index at most 65536 distinct addresses.
pub type VertexCoordinate = u16;

/// Stream sink identifier. Zero marks an intermediate edge; terminal edges
/// carry the 1-based id of the stream they deliver to.
pub type StreamSinkId = u16;

/// Transitive route returned by the pathfinder.
#[derive(Clone, Debug)]
pub struct TransferPath {
    max_flow: U256,
    is_final: bool,
    steps: Vec<TransferStep>,
}

impl TransferPath {
    pub fn new(max_flow: U256, is_final: bool, steps: Vec<TransferStep>) -> Self {
        Self { max_flow, is_final, steps }
    }

    /// Largest value the discovered route can carry.
    pub fn max_flow(&self) -> U256 { self.max_flow }

    /// Whether the pathfinder considers the result complete.
    pub fn is_final(&self) -> bool { self.is_final }

    /// Hops of the route, in pathfinder order.
    pub fn steps(&self) -> &[TransferStep] { &self.steps }

    pub fn into_steps(self) -> Vec<TransferStep> { self.steps }

    /// Check the route is complete and can carry `value`.
    pub fn ensure_capacity(&self, value: U256) -> Result<(), FlowError> {
        if !self.is_final || self.max_flow < value {
            return Err(FlowError::InsufficientFlow {
                requested: value,
                max_flow: self.max_flow,
            });
        }
        Ok(())
    }
}
