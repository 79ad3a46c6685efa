//! Circles transitive-transfer SDK.
//!
//! # Overview
//!
//! Typed client layer for moving Circles over the trust graph.
//!
//! Use [`pathfinder::Pathfinder`] to ask the indexing node for a transitive
//! route, then [`flow::FlowMatrix::from_steps`] to turn that route into the
//! packed vertex/edge/stream structure the hub's multi-hop transfer
//! operation accepts. [`pathfinder::Pathfinder::transfer_matrix`] composes
//! the two.
//!
//! See `./tests` for examples.
//!
//! # Limitations/follow-ups
//!
//! * Matrices carry a single stream; grouped multi-recipient transfers are
//!   to follow.
//!
//! * Submitting the matrix to the hub is left to the caller; this crate
//!   stops at the typed structure.
//!
//! # Features
//!
//! | Feature | Default | Description |
//! | --- | --- | --- |
//! | `display` | yes | Enables [`std::fmt::Display`] implementation for flow types. |

pub mod error;
pub mod flow;
pub mod num;
pub mod pathfinder;
pub mod types;

use alloy::primitives::{Address, address};

#[derive(Clone, Debug)]
/// Chain the Circles hub is deployed on.
pub struct Chain {
    chain_id: u64,
    hub: Address,
    deployed_at_block: u64,
    pathfinder_url: String,
}

impl Chain {
    pub fn gnosis() -> Self {
        Self {
            chain_id: 100,
            hub: address!("0xc12C1E50ABB450d6205Ea2C3Fa861b3B834d13e8"),
            deployed_at_block: 36_486_011,
            pathfinder_url: "https://rpc.aboutcircles.com/".to_string(),
        }
    }

    pub fn custom(
        chain_id: u64,
        hub: Address,
        deployed_at_block: u64,
        pathfinder_url: String,
    ) -> Self {
        Self { chain_id, hub, deployed_at_block, pathfinder_url }
    }

    pub fn chain_id(&self) -> u64 { self.chain_id }

    pub fn hub(&self) -> Address { self.hub }

    pub fn deployed_at_block(&self) -> u64 { self.deployed_at_block }

    pub fn pathfinder_url(&self) -> &str { &self.pathfinder_url }
}
