//! Key types for AES-128.

use core::str::FromStr;

use crate::error::{Error, Result};
use crate::state::{Block, State, Word, STATE_DIM};

/// Number of 32-bit words in an AES-128 key.
pub const KEY_WORDS: usize = 4;

/// Number of rounds for AES-128.
pub const ROUNDS: usize = 10;

/// Number of columns (words) in the expanded key schedule.
pub const SCHEDULE_COLUMNS: usize = STATE_DIM * (ROUNDS + 1);

/// AES-128 key wrapper, laid out column by column like [`State`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Aes128Key(State);

impl Aes128Key {
    /// Parses a key from 32 hex digits.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        State::from_hex(hex_str).map(Self)
    }

    /// The key as a 4×4 matrix.
    #[inline]
    pub fn state(&self) -> &State {
        &self.0
    }

    /// Word `index` of the key, i.e. column `index` of the matrix.
    #[inline]
    pub fn word(&self, index: usize) -> Word {
        self.0.column(index)
    }

    /// Raw key bytes.
    pub fn to_bytes(&self) -> Block {
        self.0.to_bytes()
    }
}

impl From<[u8; 16]> for Aes128Key {
    fn from(value: [u8; 16]) -> Self {
        Self(State::from_bytes(&value))
    }
}

impl From<State> for Aes128Key {
    fn from(value: State) -> Self {
        Self(value)
    }
}

impl FromStr for Aes128Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// Expanded key schedule: a 4×44 byte matrix kept as 44 words.
///
/// Round key `r` is the four words at columns `[4r, 4r + 4)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeySchedule([Word; SCHEDULE_COLUMNS]);

impl KeySchedule {
    pub(crate) fn from_words(words: [Word; SCHEDULE_COLUMNS]) -> Self {
        Self(words)
    }

    /// All 44 words in schedule order.
    #[inline]
    pub fn words(&self) -> &[Word; SCHEDULE_COLUMNS] {
        &self.0
    }

    /// Column `index` of the schedule.
    #[inline]
    pub fn column(&self, index: usize) -> Word {
        self.0[index]
    }

    /// Returns the byte at `(row, col)` of the 4×44 matrix.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.0[col][row]
    }

    /// Returns the round key for the requested round (0..=10).
    pub fn round_key(&self, round: usize) -> State {
        let start = round * STATE_DIM;
        State::from_columns([
            self.0[start],
            self.0[start + 1],
            self.0[start + 2],
            self.0[start + 3],
        ])
    }
}
