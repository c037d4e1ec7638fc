//! AES round transformations.
//!
//! Every transform takes the state by value and returns a new one.

use crate::gf;
use crate::sbox::{inv_sbox, sbox};
use crate::state::{State, Word, STATE_DIM};

/// Fixed polynomial matrix used by MixColumns.
pub const MIX_MATRIX: [[u8; 4]; 4] = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

/// Inverse of [`MIX_MATRIX`], used by InvMixColumns.
pub const INV_MIX_MATRIX: [[u8; 4]; 4] = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

/// Applies SubBytes.
#[inline]
pub fn sub_bytes(state: State) -> State {
    state.map(sbox)
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: State) -> State {
    state.map(inv_sbox)
}

/// Rotates row `i` left by `i` positions.
pub fn shift_rows(state: State) -> State {
    let mut rows = [[0u8; STATE_DIM]; STATE_DIM];
    for (i, row) in state.rows().iter().enumerate() {
        for j in 0..STATE_DIM {
            rows[i][j] = row[(i + j) % STATE_DIM];
        }
    }
    State::from_rows(rows)
}

/// Rotates row `i` right by `i` positions.
pub fn inv_shift_rows(state: State) -> State {
    let mut rows = [[0u8; STATE_DIM]; STATE_DIM];
    for (i, row) in state.rows().iter().enumerate() {
        for j in 0..STATE_DIM {
            rows[i][(i + j) % STATE_DIM] = row[j];
        }
    }
    State::from_rows(rows)
}

fn mix_single_column(column: Word, matrix: &[[u8; 4]; 4]) -> Word {
    core::array::from_fn(|i| {
        matrix[i]
            .iter()
            .zip(column.iter())
            .fold(0, |acc, (coeff, byte)| gf::add(acc, gf::multiply(*coeff, *byte)))
    })
}

/// MixColumns over all four columns.
pub fn mix_columns(state: State) -> State {
    State::from_columns(state.columns().map(|col| mix_single_column(col, &MIX_MATRIX)))
}

/// Inverse MixColumns over all four columns.
pub fn inv_mix_columns(state: State) -> State {
    State::from_columns(
        state
            .columns()
            .map(|col| mix_single_column(col, &INV_MIX_MATRIX)),
    )
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: State, round_key: &State) -> State {
    state.add(round_key)
}
