use std::collections::HashMap;

use alloy::primitives::Address;
use itertools::Itertools;

use crate::{error::FlowError, types::VertexCoordinate};

/// Largest vertex set the 16-bit coordinate space can index.
pub(crate) const MAX_VERTICES: usize = (VertexCoordinate::MAX as usize) + 1;

/// Sorted flow vertex set with coordinate lookup.
///
/// Vertices are ordered by the ascending numeric value of the 20-byte
/// address, which the byte-wise [`Address`] ordering yields directly.
/// The verifying contract recomputes the same order from the same set,
/// so construction must be deterministic for identical inputs.
pub(crate) struct VertexIndex {
    vertices: Vec<Address>,
    coordinates: HashMap<Address, VertexCoordinate>,
}

impl VertexIndex {
    /// Collect the distinct addresses of `members` into a sorted vertex set.
    pub(crate) fn collect(members: impl Iterator<Item = Address>) -> Result<Self, FlowError> {
        let vertices: Vec<Address> = members.sorted_unstable().dedup().collect();
        if vertices.len() > MAX_VERTICES {
            return Err(FlowError::CoordinateOverflow { count: vertices.len() });
        }
        let coordinates = vertices
            .iter()
            .enumerate()
            .map(|(i, address)| (*address, i as VertexCoordinate))
            .collect();
        Ok(Self { vertices, coordinates })
    }

    /// Coordinate of `address` in the sorted vertex sequence.
    pub(crate) fn coordinate(&self, address: Address) -> Result<VertexCoordinate, FlowError> {
        self.coordinates
            .get(&address)
            .copied()
            .ok_or(FlowError::InternalConsistency(address))
    }

    pub(crate) fn into_vertices(self) -> Vec<Address> { self.vertices }
}
