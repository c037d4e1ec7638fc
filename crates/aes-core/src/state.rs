//! The 4×4 cipher state and its byte-level views.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};
use crate::gf;

/// AES block of 16 bytes.
pub type Block = [u8; 16];

/// A four-byte column of the state or key schedule.
pub type Word = [u8; 4];

/// Number of bytes in a block.
pub const BLOCK_BYTES: usize = 16;

/// Number of rows and columns of the state.
pub const STATE_DIM: usize = 4;

/// The 4×4 cipher state, stored as `rows[row][col]`.
///
/// Byte `k` of a block maps to row `k % 4` and column `k / 4`, so each
/// column holds four consecutive bytes of the block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct State {
    rows: [[u8; STATE_DIM]; STATE_DIM],
}

impl State {
    /// Builds a state from its rows.
    pub const fn from_rows(rows: [[u8; STATE_DIM]; STATE_DIM]) -> Self {
        Self { rows }
    }

    /// Builds a state from its four columns.
    pub fn from_columns(columns: [Word; STATE_DIM]) -> Self {
        let mut rows = [[0u8; STATE_DIM]; STATE_DIM];
        for (col, word) in columns.iter().enumerate() {
            for (row, byte) in word.iter().enumerate() {
                rows[row][col] = *byte;
            }
        }
        Self { rows }
    }

    /// Lays a 16-byte block out column by column.
    pub fn from_bytes(bytes: &Block) -> Self {
        let mut rows = [[0u8; STATE_DIM]; STATE_DIM];
        for (k, byte) in bytes.iter().enumerate() {
            rows[k % STATE_DIM][k / STATE_DIM] = *byte;
        }
        Self { rows }
    }

    /// Parses exactly 32 hex digits into a state.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let mut bytes = [0u8; BLOCK_BYTES];
        hex::decode_to_slice(hex_str.trim(), &mut bytes)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Serializes the state back into block order.
    pub fn to_bytes(&self) -> Block {
        let mut bytes = [0u8; BLOCK_BYTES];
        for (k, byte) in bytes.iter_mut().enumerate() {
            *byte = self.rows[k % STATE_DIM][k / STATE_DIM];
        }
        bytes
    }

    /// Returns the rows of the state.
    #[inline]
    pub fn rows(&self) -> &[[u8; STATE_DIM]; STATE_DIM] {
        &self.rows
    }

    /// Returns the byte at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.rows[row][col]
    }

    /// Returns column `col` as a word.
    #[inline]
    pub fn column(&self, col: usize) -> Word {
        [
            self.rows[0][col],
            self.rows[1][col],
            self.rows[2][col],
            self.rows[3][col],
        ]
    }

    /// Returns all four columns.
    pub fn columns(&self) -> [Word; STATE_DIM] {
        core::array::from_fn(|col| self.column(col))
    }

    /// Applies `f` to every byte, producing a new state.
    pub fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            rows: self.rows.map(|row| row.map(&f)),
        }
    }

    /// Element-wise field addition (XOR) of two states.
    pub fn add(&self, rhs: &State) -> State {
        let mut rows = self.rows;
        for (row, rhs_row) in rows.iter_mut().zip(rhs.rows.iter()) {
            for (byte, rhs_byte) in row.iter_mut().zip(rhs_row.iter()) {
                *byte = gf::add(*byte, *rhs_byte);
            }
        }
        State { rows }
    }
}

impl From<Block> for State {
    fn from(value: Block) -> Self {
        Self::from_bytes(&value)
    }
}

impl From<State> for Block {
    fn from(value: State) -> Self {
        value.to_bytes()
    }
}

impl FromStr for State {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// Lowercase hex of the state in block (column-major) order.
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}
