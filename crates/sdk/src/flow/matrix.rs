use alloy::primitives::{Address, Bytes, U256};

use super::VertexIndex;
use crate::{
    error::FlowError,
    types::{StreamSinkId, TransferStep, VertexCoordinate},
};

/// Sink id assigned to the single stream of a plain transfer.
const SINGLE_STREAM_SINK_ID: StreamSinkId = 1;

/// One directed flow unit of the matrix.
///
/// Edges correspond to path steps index-for-index; the stream's edge-id
/// references rely on that correspondence.
#[derive(Clone, Copy, derive_more::Debug, PartialEq, Eq)]
pub struct FlowEdge {
    stream_sink_id: StreamSinkId,
    #[debug("{amount}")]
    amount: U256,
}

impl FlowEdge {
    /// Amount carried over this edge, in atto-circles.
    pub fn amount(&self) -> U256 { self.amount }

    /// Id of the stream this edge delivers to, zero for intermediate edges.
    pub fn stream_sink_id(&self) -> StreamSinkId { self.stream_sink_id }

    /// Whether this edge delivers to a stream sink rather than feeding an
    /// intermediate hop.
    pub fn is_terminal(&self) -> bool { self.stream_sink_id != 0 }
}

/// One end-to-end transfer request within a flow matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowStream {
    source_coordinate: VertexCoordinate,
    flow_edge_ids: Vec<u16>,
    data: Bytes,
}

impl FlowStream {
    /// Coordinate of the stream's source vertex.
    pub fn source_coordinate(&self) -> VertexCoordinate { self.source_coordinate }

    /// Indices of this stream's terminal edges, ascending.
    pub fn flow_edge_ids(&self) -> &[u16] { &self.flow_edge_ids }

    /// Reserved metadata, empty in current usage.
    pub fn data(&self) -> &Bytes { &self.data }
}

/// Canonical multi-hop transfer structure accepted by the hub.
///
/// Immutable once built; serialize the fields into the contract call and
/// discard. The encoding invariants the contract re-checks:
///
/// * `flow_vertices` ascending by numeric address value, no duplicates;
/// * one edge per path step, in step order;
/// * terminal-edge amounts of a stream summing exactly to its transfer
///   value;
/// * coordinate triples packed per step as 16-bit big-endian integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowMatrix {
    flow_vertices: Vec<Address>,
    flow_edges: Vec<FlowEdge>,
    streams: Vec<FlowStream>,
    packed_coordinates: Bytes,
    source_coordinate: VertexCoordinate,
}

impl FlowMatrix {
    /// Build the matrix delivering `requested_value` from `source` to
    /// `destination` over the pathfinder-returned `steps`.
    ///
    /// Pure function of its inputs: no I/O, nothing mutated, identical
    /// inputs produce byte-identical output. Structural data embedded in
    /// the steps is re-derived, never trusted.
    pub fn from_steps(
        source: Address,
        destination: Address,
        requested_value: U256,
        steps: &[TransferStep],
    ) -> Result<Self, FlowError> {
        if steps.is_empty() {
            return Err(FlowError::InvalidInput("transfer path has no steps".to_string()));
        }

        let index = VertexIndex::collect(
            steps
                .iter()
                .flat_map(|step| [step.from, step.to, step.token_owner])
                .chain([source, destination]),
        )?;

        let mut flow_edges: Vec<FlowEdge> = steps
            .iter()
            .map(|step| FlowEdge {
                stream_sink_id: if step.to == destination { SINGLE_STREAM_SINK_ID } else { 0 },
                amount: step.value,
            })
            .collect();

        // Forced-fallback policy: some routes have no hop ending at the
        // destination (single-hop paths in particular). The last edge is
        // then promoted to terminal.
        if !flow_edges.iter().any(FlowEdge::is_terminal)
            && let Some(last) = flow_edges.last_mut()
        {
            last.stream_sink_id = SINGLE_STREAM_SINK_ID;
        }

        let mut delivered = U256::ZERO;
        for edge in flow_edges.iter().filter(|edge| edge.is_terminal()) {
            delivered = delivered.checked_add(edge.amount).ok_or_else(|| {
                FlowError::InvalidInput("terminal edge amounts overflow U256".to_string())
            })?;
        }
        if delivered != requested_value {
            return Err(FlowError::PathConservation {
                expected: requested_value,
                actual: delivered,
            });
        }

        let flow_edge_ids = flow_edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| edge.is_terminal())
            .map(|(id, _)| {
                u16::try_from(id)
                    .map_err(|_| FlowError::CoordinateOverflow { count: flow_edges.len() })
            })
            .collect::<Result<Vec<u16>, FlowError>>()?;

        let mut packed = Vec::with_capacity(steps.len() * 6);
        for step in steps {
            for address in [step.token_owner, step.from, step.to] {
                packed.extend_from_slice(&index.coordinate(address)?.to_be_bytes());
            }
        }

        let source_coordinate = index.coordinate(source)?;
        let streams = vec![FlowStream {
            source_coordinate,
            flow_edge_ids,
            data: Bytes::new(),
        }];

        Ok(Self {
            flow_vertices: index.into_vertices(),
            flow_edges,
            streams,
            packed_coordinates: packed.into(),
            source_coordinate,
        })
    }

    /// Touched addresses, ascending by numeric value.
    pub fn flow_vertices(&self) -> &[Address] { &self.flow_vertices }

    /// One edge per path hop, in pathfinder step order.
    pub fn flow_edges(&self) -> &[FlowEdge] { &self.flow_edges }

    /// Streams of the matrix; plain transfers produce exactly one.
    pub fn streams(&self) -> &[FlowStream] { &self.streams }

    /// Per-hop (token owner, from, to) coordinate triples, each packed as
    /// a 16-bit big-endian integer. Six bytes per hop.
    pub fn packed_coordinates(&self) -> &Bytes { &self.packed_coordinates }

    /// Coordinate of the transfer's source vertex.
    pub fn source_coordinate(&self) -> VertexCoordinate { self.source_coordinate }
}

#[cfg(feature = "display")]
impl std::fmt::Display for FlowMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use colored::Colorize;
        use tabled::{builder::Builder, settings::Style};

        let circles = crate::num::Converter::new(crate::num::CRC_DECIMALS);
        let coordinate = |i: usize| {
            u16::from_be_bytes([self.packed_coordinates[2 * i], self.packed_coordinates[2 * i + 1]])
                as usize
        };
        let vertex = |i: usize| format!("{:#}", self.flow_vertices[i]);

        writeln!(
            f,
            "{} {} vertices, {} edge(s), {} stream(s)",
            "Flow matrix:".blue(),
            self.flow_vertices.len(),
            self.flow_edges.len(),
            self.streams.len(),
        )?;
        for stream in &self.streams {
            writeln!(
                f,
                "  Stream from {} via edge(s) {:?}",
                vertex(stream.source_coordinate() as usize),
                stream.flow_edge_ids(),
            )?;
        }

        let mut builder = Builder::default();
        builder.push_record(["Edge", "Token owner", "From", "To", "Amount", "Sink"]);
        for (id, edge) in self.flow_edges.iter().enumerate() {
            builder.push_record([
                id.to_string(),
                vertex(coordinate(3 * id)),
                vertex(coordinate(3 * id + 1)),
                vertex(coordinate(3 * id + 2)),
                circles.from_unsigned(edge.amount).to_string(),
                if edge.is_terminal() {
                    edge.stream_sink_id.to_string().green().to_string()
                } else {
                    "-".to_string()
                },
            ]);
        }
        let mut table = builder.build();
        table.with(Style::sharp());
        table.fmt(f)
    }
}
