use alloy::primitives::{Address, U160, U256, address};
use circles_sdk::{
    error::FlowError,
    flow::FlowMatrix,
    types::{TransferPath, TransferStep},
};

const SOURCE: Address = address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1");
const DESTINATION: Address = address!("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2");
const TOKEN: Address = address!("0xccccccccccccccccccccccccccccccccccccccc3");

fn addr(n: u64) -> Address { Address::from(U160::from(n)) }

fn step(from: Address, to: Address, token_owner: Address, value: u64) -> TransferStep {
    TransferStep { from, to, token_owner, value: U256::from(value) }
}

/// Decoded (token owner, from, to) coordinate triple of step `i`.
fn coords(matrix: &FlowMatrix, i: usize) -> (u16, u16, u16) {
    let bytes = &matrix.packed_coordinates()[i * 6..i * 6 + 6];
    (
        u16::from_be_bytes([bytes[0], bytes[1]]),
        u16::from_be_bytes([bytes[2], bytes[3]]),
        u16::from_be_bytes([bytes[4], bytes[5]]),
    )
}

fn coordinate_of(matrix: &FlowMatrix, address: Address) -> u16 {
    matrix
        .flow_vertices()
        .iter()
        .position(|v| *v == address)
        .expect("address must be a flow vertex") as u16
}

/// Single direct hop: the canonical smallest matrix.
#[test]
fn single_step_transfer() {
    let steps = [step(SOURCE, DESTINATION, TOKEN, 100)];
    let matrix = FlowMatrix::from_steps(SOURCE, DESTINATION, U256::from(100u64), &steps).unwrap();

    // Ascending numeric order of the three addresses
    assert_eq!(matrix.flow_vertices(), [SOURCE, DESTINATION, TOKEN]);

    assert_eq!(matrix.flow_edges().len(), 1);
    assert_eq!(matrix.flow_edges()[0].amount(), U256::from(100u64));
    assert_eq!(matrix.flow_edges()[0].stream_sink_id(), 1);

    assert_eq!(matrix.streams().len(), 1);
    assert_eq!(matrix.streams()[0].source_coordinate(), 0);
    assert_eq!(matrix.streams()[0].flow_edge_ids(), [0]);
    assert!(matrix.streams()[0].data().is_empty());
    assert_eq!(matrix.source_coordinate(), 0);

    assert_eq!(matrix.packed_coordinates().len(), 6);
    assert_eq!(matrix.packed_coordinates().as_ref(), [0, 2, 0, 0, 0, 1]);
}

#[test]
fn conservation_mismatch_is_rejected() {
    let steps = [step(SOURCE, DESTINATION, TOKEN, 100)];
    let result = FlowMatrix::from_steps(SOURCE, DESTINATION, U256::from(99u64), &steps);

    assert!(matches!(
        result,
        Err(FlowError::PathConservation { expected, actual })
            if expected == U256::from(99u64) && actual == U256::from(100u64)
    ));
}

#[test]
fn multi_hop_marks_only_destination_edges_terminal() {
    let hop = addr(0x1111);
    let token_a = addr(0x2222);
    let token_b = addr(0x3333);
    let steps = [
        step(SOURCE, hop, token_a, 100),
        step(hop, DESTINATION, token_b, 100),
    ];
    let matrix = FlowMatrix::from_steps(SOURCE, DESTINATION, U256::from(100u64), &steps).unwrap();

    assert!(!matrix.flow_edges()[0].is_terminal());
    assert!(matrix.flow_edges()[1].is_terminal());
    assert_eq!(matrix.streams()[0].flow_edge_ids(), [1]);
    assert_eq!(
        matrix.streams()[0].source_coordinate(),
        coordinate_of(&matrix, SOURCE),
    );
}

/// Every packed triple must decode back to the step's vertex coordinates.
#[test]
fn packed_coordinates_round_trip() {
    let hop = addr(0x1111);
    let token_a = addr(0x2222);
    let token_b = addr(0x3333);
    let steps = [
        step(SOURCE, hop, token_a, 60),
        step(SOURCE, hop, token_b, 40),
        step(hop, DESTINATION, token_b, 100),
    ];
    let matrix = FlowMatrix::from_steps(SOURCE, DESTINATION, U256::from(100u64), &steps).unwrap();

    assert_eq!(matrix.packed_coordinates().len(), steps.len() * 6);
    for (i, s) in steps.iter().enumerate() {
        let (token_owner, from, to) = coords(&matrix, i);
        assert_eq!(token_owner, coordinate_of(&matrix, s.token_owner));
        assert_eq!(from, coordinate_of(&matrix, s.from));
        assert_eq!(to, coordinate_of(&matrix, s.to));
    }
}

/// A route delivering over several final hops references them all, in
/// ascending edge order, and their amounts sum to the requested value.
#[test]
fn split_route_collects_all_terminal_edges() {
    let token_a = addr(0x2222);
    let token_b = addr(0x3333);
    let steps = [
        step(SOURCE, DESTINATION, token_a, 60),
        step(SOURCE, DESTINATION, token_b, 40),
    ];
    let matrix = FlowMatrix::from_steps(SOURCE, DESTINATION, U256::from(100u64), &steps).unwrap();

    assert_eq!(matrix.streams()[0].flow_edge_ids(), [0, 1]);

    let delivered: U256 = matrix.streams()[0]
        .flow_edge_ids()
        .iter()
        .map(|id| matrix.flow_edges()[*id as usize].amount())
        .sum();
    assert_eq!(delivered, U256::from(100u64));
}

/// Pathfinder quirk: no hop ends at the destination. The last edge is
/// promoted to terminal instead of failing.
#[test]
fn forced_fallback_terminal_edge() {
    let hop = addr(0x1111);
    let steps = [step(SOURCE, hop, TOKEN, 100)];
    let matrix = FlowMatrix::from_steps(SOURCE, DESTINATION, U256::from(100u64), &steps).unwrap();

    assert_eq!(matrix.flow_edges()[0].stream_sink_id(), 1);
    assert_eq!(matrix.streams()[0].flow_edge_ids(), [0]);
    // The destination is still a vertex even though no edge reaches it
    assert!(matrix.flow_vertices().contains(&DESTINATION));
}

/// The fallback must not fire when a natural terminal edge exists.
#[test]
fn fallback_skipped_when_destination_reached() {
    let hop = addr(0x1111);
    let steps = [
        step(SOURCE, DESTINATION, TOKEN, 100),
        step(DESTINATION, hop, TOKEN, 100),
    ];
    let matrix = FlowMatrix::from_steps(SOURCE, DESTINATION, U256::from(100u64), &steps).unwrap();

    assert!(matrix.flow_edges()[0].is_terminal());
    assert!(!matrix.flow_edges()[1].is_terminal());
    assert_eq!(matrix.streams()[0].flow_edge_ids(), [0]);
}

#[test]
fn construction_is_deterministic() {
    let hop = addr(0x1111);
    let token_a = addr(0x2222);
    let token_b = addr(0x3333);
    let steps = [
        step(SOURCE, hop, token_a, 70),
        step(SOURCE, hop, token_b, 30),
        step(hop, DESTINATION, token_b, 100),
    ];

    let first = FlowMatrix::from_steps(SOURCE, DESTINATION, U256::from(100u64), &steps).unwrap();
    let second = FlowMatrix::from_steps(SOURCE, DESTINATION, U256::from(100u64), &steps).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.packed_coordinates(), second.packed_coordinates());
}

#[test]
fn vertices_are_sorted_ascending() {
    // Scrambled addresses across the whole 160-bit range
    let members = [
        addr(0xffff_ffff_ffff),
        addr(3),
        Address::repeat_byte(0xfe),
        addr(0x8000_0000),
        Address::repeat_byte(0x01),
        addr(42),
    ];
    let steps: Vec<TransferStep> = members
        .windows(2)
        .map(|pair| step(pair[0], pair[1], pair[0], 10))
        .collect();
    let matrix =
        FlowMatrix::from_steps(members[0], members[5], U256::from(10u64), &steps).unwrap();

    let vertices = matrix.flow_vertices();
    assert_eq!(vertices.len(), members.len());
    assert!(vertices.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn empty_path_is_invalid() {
    let result = FlowMatrix::from_steps(SOURCE, DESTINATION, U256::from(1u64), &[]);

    assert!(matches!(result, Err(FlowError::InvalidInput(_))));
}

/// A path touching more than 65536 distinct addresses cannot be packed
/// into 16-bit coordinates.
#[test]
fn oversized_path_is_rejected() {
    // 32768 chained hops: 32769 holder addresses + 32768 token owners
    let steps: Vec<TransferStep> = (0..32_768u64)
        .map(|i| step(addr(i + 1), addr(i + 2), addr(1_000_000 + i), 1))
        .collect();
    let result = FlowMatrix::from_steps(addr(1), addr(32_769), U256::from(1u64), &steps);

    assert!(matches!(result, Err(FlowError::CoordinateOverflow { .. })));
}

#[test]
fn capacity_gate_rejects_short_and_incomplete_routes() {
    let path = TransferPath::new(U256::from(50u64), true, vec![]);
    assert!(matches!(
        path.ensure_capacity(U256::from(100u64)),
        Err(FlowError::InsufficientFlow { requested, max_flow })
            if requested == U256::from(100u64) && max_flow == U256::from(50u64)
    ));

    let incomplete = TransferPath::new(U256::from(100u64), false, vec![]);
    assert!(matches!(
        incomplete.ensure_capacity(U256::from(100u64)),
        Err(FlowError::InsufficientFlow { .. })
    ));

    let capable = TransferPath::new(U256::from(100u64), true, vec![]);
    assert!(capable.ensure_capacity(U256::from(100u64)).is_ok());
}
