//! Conversion of fixed-point chain amounts into decimals.

use std::str::FromStr;

use alloy::primitives::U256;
use fastnum::UD256;

/// Decimal places of Circles token amounts (atto-circles).
pub const CRC_DECIMALS: u32 = 18;

/// Converts fixed-point chain integers into decimal numbers for
/// human-facing rendering. Exact [`U256`] values are what the matrix
/// stores and what goes on chain; decimals never flow back.
#[derive(Clone, Copy, Debug)]
pub struct Converter {
    decimals: u32,
}

impl Converter {
    pub const fn new(decimals: u32) -> Self { Self { decimals } }

    /// Decimal value of `amount` scaled down by `10^decimals`.
    pub fn from_unsigned(&self, amount: U256) -> UD256 {
        // Any U256 fits the 256-bit decimal coefficient exactly
        <UD256 as FromStr>::from_str(&format!("{}e-{}", amount, self.decimals))
            .expect("U256 digits parse as a decimal")
    }

    pub fn decimals(&self) -> u32 { self.decimals }
}
