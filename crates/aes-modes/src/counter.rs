//! Initialization values and CTR counter blocks.

use core::fmt;
use core::str::FromStr;

use aes_core::{Error, Result, State, BLOCK_BYTES};

/// A 128-bit big-endian initialization value, the CTR counter seed.
///
/// Defaults to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Iv(u128);

impl Iv {
    /// The all-zero IV.
    pub const ZERO: Iv = Iv(0);

    /// Wraps a 128-bit value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Parses exactly 32 hex digits.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let mut bytes = [0u8; BLOCK_BYTES];
        hex::decode_to_slice(hex_str.trim(), &mut bytes)?;
        Ok(Self(u128::from_be_bytes(bytes)))
    }

    /// Reads the IV from a state in block byte order.
    pub fn from_state(state: &State) -> Self {
        Self(u128::from_be_bytes(state.to_bytes()))
    }

    /// The IV as an integer.
    #[inline]
    pub const fn value(&self) -> u128 {
        self.0
    }

    /// The IV as a state.
    pub fn to_state(&self) -> State {
        State::from_bytes(&self.0.to_be_bytes())
    }

    /// Counter block for block `index`: `(iv + index) mod 2^128`.
    pub fn counter_block(&self, index: i64) -> Result<State> {
        let index = u64::try_from(index).map_err(|_| Error::NegativeCounterIndex(index))?;
        Ok(self.counter_at(u128::from(index)))
    }

    #[inline]
    pub(crate) fn counter_at(&self, index: u128) -> State {
        State::from_bytes(&self.0.wrapping_add(index).to_be_bytes())
    }
}

impl From<u128> for Iv {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl FromStr for Iv {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}
