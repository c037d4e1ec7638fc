//! Electronic Codebook mode.

use aes_core::{cipher_traced, inv_cipher_traced, KeySchedule, Matrix, Result, Silent, TraceSink};

use crate::blocks::map_blocks;

/// Encrypts every block independently.
pub fn encrypt(blocks: &Matrix, schedule: &KeySchedule) -> Result<Matrix> {
    encrypt_traced(blocks, schedule, &mut Silent)
}

/// Encrypts every block independently, tracing each block's rounds.
pub fn encrypt_traced<S: TraceSink + ?Sized>(
    blocks: &Matrix,
    schedule: &KeySchedule,
    sink: &mut S,
) -> Result<Matrix> {
    map_blocks(blocks, |_, block| cipher_traced(&block, schedule, &mut *sink))
}

/// Decrypts every block independently.
pub fn decrypt(blocks: &Matrix, schedule: &KeySchedule) -> Result<Matrix> {
    decrypt_traced(blocks, schedule, &mut Silent)
}

/// Decrypts every block independently, tracing each block's rounds.
pub fn decrypt_traced<S: TraceSink + ?Sized>(
    blocks: &Matrix,
    schedule: &KeySchedule,
    sink: &mut S,
) -> Result<Matrix> {
    map_blocks(blocks, |_, block| inv_cipher_traced(&block, schedule, &mut *sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes_core::{encrypt_block, expand_key, Aes128Key, Error};
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn nist_schedule() -> KeySchedule {
        expand_key(&Aes128Key::from_hex("000102030405060708090a0b0c0d0e0f").unwrap())
    }

    #[test]
    fn equal_blocks_give_equal_ciphertext() {
        let plain = hex::decode(
            "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff",
        )
        .unwrap();
        let blocks = Matrix::from_bytes(&plain).unwrap();
        let ct = encrypt(&blocks, &nist_schedule()).unwrap();
        assert_eq!(
            hex::encode(ct.as_bytes()),
            "69c4e0d86a7b0430d8cdb78070b4c55a69c4e0d86a7b0430d8cdb78070b4c55a"
        );
    }

    #[test]
    fn sp800_38a_ecb_vectors() {
        let schedule = expand_key(&Aes128Key::from_hex("2b7e151628aed2a6abf7158809cf4f3c").unwrap());
        let plain = hex::decode(concat!(
            "6bc1bee22e409f96e93d7e117393172a",
            "ae2d8a571e03ac9c9eb76fac45af8e51",
        ))
        .unwrap();
        let expected = concat!(
            "3ad77bb40d7a3660a89ecaf32466ef97",
            "f5d3d58503b9699de785895a96fdbaaf",
        );
        let ct = encrypt(&Matrix::from_bytes(&plain).unwrap(), &schedule).unwrap();
        assert_eq!(hex::encode(ct.as_bytes()), expected);
        let pt = decrypt(&ct, &schedule).unwrap();
        assert_eq!(pt.as_bytes(), &plain[..]);
    }

    #[test]
    fn matches_single_block_cipher() {
        let schedule = nist_schedule();
        let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
        let mut data = vec![0u8; 16 * 5];
        rng.fill_bytes(&mut data);
        let ct = encrypt(&Matrix::from_bytes(&data).unwrap(), &schedule).unwrap();
        for (chunk, out) in data.chunks_exact(16).zip(ct.as_bytes().chunks_exact(16)) {
            let block: [u8; 16] = chunk.try_into().unwrap();
            assert_eq!(&encrypt_block(&block, &schedule)[..], out);
        }
    }

    #[test]
    fn rejects_partial_blocks_before_ciphering() {
        let mut lines: Vec<String> = Vec::new();
        let err = encrypt_traced(&Matrix::zeroed(4, 6), &nist_schedule(), &mut lines).unwrap_err();
        assert!(matches!(err, Error::InvalidBlockShape(_)));
        assert!(lines.is_empty());
    }
}
