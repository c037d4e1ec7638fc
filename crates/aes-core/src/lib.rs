//! AES-128 block cipher following FIPS-197.
//!
//! This crate provides:
//! - GF(2^8) arithmetic and the S-box tables.
//! - The four round transformations and their inverses, as pure functions
//!   over a 4×4 [`State`].
//! - The AES-128 key schedule.
//! - Forward and inverse cipher pipelines, optionally traced round by round
//!   through a caller-supplied [`TraceSink`].
//! - A variable-width [`Matrix`] used to carry multi-block data.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod error;
pub mod gf;
mod key;
mod matrix;
pub mod round;
mod sbox;
mod state;
pub mod trace;

pub use crate::cipher::{
    cipher, cipher_traced, decrypt_block, encrypt_block, expand_key, inv_cipher,
    inv_cipher_traced, RCON,
};
pub use crate::error::{Error, Result};
pub use crate::key::{Aes128Key, KeySchedule, KEY_WORDS, ROUNDS, SCHEDULE_COLUMNS};
pub use crate::matrix::Matrix;
pub use crate::sbox::{inv_sbox, sbox, INV_SBOX, SBOX};
pub use crate::state::{Block, State, Word, BLOCK_BYTES, STATE_DIM};
pub use crate::trace::{Silent, Stage, TraceSink};
