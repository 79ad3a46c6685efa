use alloy::primitives::{Address, U256};

/// One hop of a transitive transfer path.
///
/// `token_owner` identifies whose personal Circles token moves over this
/// hop; `from` and `to` are the holders the balance moves between. Steps
/// are produced by the pathfinder and never modified afterwards; the
/// matrix builder re-derives all structural data (coordinates, terminal
/// marks) itself.
#[derive(Clone, Copy, derive_more::Debug, PartialEq, Eq)]
pub struct TransferStep {
    pub from: Address,
    pub to: Address,
    pub token_owner: Address,
    #[debug("{value}")]
    pub value: U256,
}

impl std::fmt::Display for TransferStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "[{:#} -> {:#} {}]", self.from, self.to, self.value)
        } else {
            write!(
                f,
                "[{} -> {} {} (token {})]",
                self.from, self.to, self.value, self.token_owner,
            )
        }
    }
}
