//! Counter mode.
//!
//! Block `k` is XORed with the forward cipher of `iv + k`. Encryption and
//! decryption are the same operation.

use aes_core::{cipher_traced, KeySchedule, Matrix, Result, Silent, TraceSink};

use crate::blocks::map_blocks;
use crate::counter::Iv;

/// Applies the CTR keystream to every block.
pub fn apply(blocks: &Matrix, schedule: &KeySchedule, iv: &Iv) -> Result<Matrix> {
    apply_traced(blocks, schedule, iv, &mut Silent)
}

/// Applies the CTR keystream, tracing the cipher run on each counter block.
pub fn apply_traced<S: TraceSink + ?Sized>(
    blocks: &Matrix,
    schedule: &KeySchedule,
    iv: &Iv,
    sink: &mut S,
) -> Result<Matrix> {
    map_blocks(blocks, |index, block| {
        let counter = iv.counter_at(index as u128);
        let keystream = cipher_traced(&counter, schedule, &mut *sink);
        block.add(&keystream)
    })
}

/// Encrypts in CTR mode.
#[inline]
pub fn encrypt(blocks: &Matrix, schedule: &KeySchedule, iv: &Iv) -> Result<Matrix> {
    apply(blocks, schedule, iv)
}

/// Decrypts in CTR mode; identical to [`encrypt`].
#[inline]
pub fn decrypt(blocks: &Matrix, schedule: &KeySchedule, iv: &Iv) -> Result<Matrix> {
    apply(blocks, schedule, iv)
}
