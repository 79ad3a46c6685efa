//! Typed client for the pathfinder's JSON-RPC interface.
//!
//! The pathfinder walks the trust graph and answers `compute_transfer`
//! requests with an ordered list of transfer steps. Wire amounts arrive as
//! decimal- or hex-string encoded integers; everything is parsed into
//! typed values here, before any of it reaches the matrix builder.

use std::str::FromStr;

use alloy::{
    primitives::{Address, U256},
    rpc::client::RpcClient,
};
use serde::{Deserialize, Serialize};

use crate::{
    Chain,
    error::FlowError,
    flow::FlowMatrix,
    types::{TransferPath, TransferStep},
};

/// Pathfinder service client.
///
/// One instance may be shared across tasks; requests hold no client state.
/// Failures are terminal for the call, with no retry policy beyond what
/// the transport offers natively.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    client: RpcClient,
}

impl Pathfinder {
    /// Connect to the pathfinder endpoint of `chain`.
    pub async fn connect(chain: &Chain) -> Result<Self, FlowError> {
        Ok(Self { client: RpcClient::builder().connect(chain.pathfinder_url()).await? })
    }

    /// Ask the pathfinder for a transitive route carrying `value` from
    /// `from` to `to`.
    pub async fn compute_transfer(
        &self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<TransferPath, FlowError> {
        let params = ComputeTransferParams { from, to, value: value.to_string() };
        let raw: ComputeTransferResponse =
            self.client.request("compute_transfer", params).await?;
        raw.try_into()
    }

    /// Query a route and build the flow matrix delivering `value` to `to`.
    ///
    /// Incomplete pathfinder results and routes short of the requested
    /// value are rejected before the matrix transform runs.
    pub async fn transfer_matrix(
        &self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<FlowMatrix, FlowError> {
        let path = self.compute_transfer(from, to, value).await?;
        path.ensure_capacity(value)?;
        FlowMatrix::from_steps(from, to, value, path.steps())
    }
}

/// `compute_transfer` request parameters, wire form.
#[derive(Clone, Debug, Serialize)]
struct ComputeTransferParams {
    from: Address,
    to: Address,
    value: String,
}

/// `compute_transfer` response, wire form.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComputeTransferResponse {
    max_flow_value: String,
    #[serde(rename = "final", default)]
    is_final: bool,
    #[serde(default)]
    transfer_steps: Vec<WireTransferStep>,
}

/// One wire-form transfer step. The field is `token_owner` on the wire,
/// with the camel-case spelling accepted from older pathfinder builds.
#[derive(Clone, Debug, Deserialize)]
struct WireTransferStep {
    from: Address,
    to: Address,
    #[serde(alias = "tokenOwner")]
    token_owner: Address,
    value: String,
}

impl TryFrom<ComputeTransferResponse> for TransferPath {
    type Error = FlowError;

    fn try_from(raw: ComputeTransferResponse) -> Result<Self, FlowError> {
        let steps = raw
            .transfer_steps
            .iter()
            .map(|step| {
                Ok(TransferStep {
                    from: step.from,
                    to: step.to,
                    token_owner: step.token_owner,
                    value: parse_amount(&step.value)?,
                })
            })
            .collect::<Result<Vec<TransferStep>, FlowError>>()?;
        Ok(TransferPath::new(parse_amount(&raw.max_flow_value)?, raw.is_final, steps))
    }
}

/// Parse a decimal- or `0x`-prefixed hex-string encoded amount.
fn parse_amount(value: &str) -> Result<U256, FlowError> {
    U256::from_str(value)
        .map_err(|err| FlowError::InvalidInput(format!("invalid amount {value:?}: {err}")))
}
