//! Stateful AES-128 engine holding a key schedule, mode and IV.

use aes_core::{
    cipher_traced, expand_key, inv_cipher_traced, Aes128Key, Error, KeySchedule, Matrix, Result,
    Silent, TraceSink, STATE_DIM,
};

use crate::blocks;
use crate::counter::Iv;
use crate::transformation::Mode;
use crate::{ctr, ecb};

/// Which way data flows through the cipher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Plaintext to ciphertext.
    #[default]
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

/// AES-128 with a configurable mode of operation.
///
/// The key schedule is derived once in [`Aes128::set_key`] and reused by
/// every call. Single-block input bypasses the mode entirely and goes
/// straight through the forward or inverse cipher; use [`ctr::apply`] for a
/// one-block CTR transform.
#[derive(Clone, Debug, Default)]
pub struct Aes128 {
    key: Option<Aes128Key>,
    schedule: Option<KeySchedule>,
    mode: Option<Mode>,
    iv: Iv,
}

impl Aes128 {
    /// Key length in bits.
    pub const KEY_BITS: usize = 128;
    /// Block length in bits.
    pub const BLOCK_BITS: usize = 128;

    /// Creates an engine with no key, no mode and a zero IV.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the key already installed.
    pub fn with_key(key: Aes128Key) -> Self {
        let mut engine = Self::new();
        engine.set_key(key);
        engine
    }

    /// Installs a key and derives its schedule.
    pub fn set_key(&mut self, key: Aes128Key) {
        self.schedule = Some(expand_key(&key));
        self.key = Some(key);
    }

    /// The installed key, if any.
    pub fn key(&self) -> Option<&Aes128Key> {
        self.key.as_ref()
    }

    /// The derived key schedule, if a key is installed.
    pub fn key_schedule(&self) -> Option<&KeySchedule> {
        self.schedule.as_ref()
    }

    /// Selects the mode used for multi-block input.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = Some(mode);
    }

    /// The selected mode, if any.
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Sets the CTR counter seed.
    pub fn set_iv(&mut self, iv: Iv) {
        self.iv = iv;
    }

    /// The CTR counter seed.
    pub fn iv(&self) -> Iv {
        self.iv
    }

    /// Encrypts a block matrix.
    pub fn encrypt(&self, plaintext: &Matrix) -> Result<Matrix> {
        self.run(Direction::Encrypt, plaintext, &mut Silent)
    }

    /// Encrypts a block matrix, tracing every cipher invocation.
    pub fn encrypt_traced<S: TraceSink + ?Sized>(
        &self,
        plaintext: &Matrix,
        sink: &mut S,
    ) -> Result<Matrix> {
        self.run(Direction::Encrypt, plaintext, sink)
    }

    /// Decrypts a block matrix.
    pub fn decrypt(&self, ciphertext: &Matrix) -> Result<Matrix> {
        self.run(Direction::Decrypt, ciphertext, &mut Silent)
    }

    /// Decrypts a block matrix, tracing every cipher invocation.
    pub fn decrypt_traced<S: TraceSink + ?Sized>(
        &self,
        ciphertext: &Matrix,
        sink: &mut S,
    ) -> Result<Matrix> {
        self.run(Direction::Decrypt, ciphertext, sink)
    }

    /// Runs `direction` over `input`.
    ///
    /// Checks happen in order: key installed, block shape, then mode. No
    /// block is processed unless all of them pass.
    pub fn run<S: TraceSink + ?Sized>(
        &self,
        direction: Direction,
        input: &Matrix,
        sink: &mut S,
    ) -> Result<Matrix> {
        let schedule = self.schedule.as_ref().ok_or(Error::UninitializedKey)?;
        blocks::validate(input)?;

        if input.cols() == STATE_DIM {
            let block = input.block(0)?;
            let output = match direction {
                Direction::Encrypt => cipher_traced(&block, schedule, sink),
                Direction::Decrypt => inv_cipher_traced(&block, schedule, sink),
            };
            return Ok(Matrix::from(output));
        }

        match (self.mode, direction) {
            (Some(Mode::Ecb), Direction::Encrypt) => ecb::encrypt_traced(input, schedule, sink),
            (Some(Mode::Ecb), Direction::Decrypt) => ecb::decrypt_traced(input, schedule, sink),
            (Some(Mode::Ctr), _) => ctr::apply_traced(input, schedule, &self.iv, sink),
            (None, _) => Err(Error::UnsupportedMode("<unset>".to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes_core::State;
    use rand::RngCore;

    fn nist_engine(mode: Mode) -> Aes128 {
        let mut engine =
            Aes128::with_key(Aes128Key::from_hex("000102030405060708090a0b0c0d0e0f").unwrap());
        engine.set_mode(mode);
        engine
    }

    fn nist_plaintext() -> Matrix {
        Matrix::from(State::from_hex("00112233445566778899aabbccddeeff").unwrap())
    }

    #[test]
    fn requires_key() {
        let engine = Aes128::new();
        let err = engine.encrypt(&nist_plaintext()).unwrap_err();
        assert!(matches!(err, Error::UninitializedKey));
        assert!(matches!(
            engine.decrypt(&nist_plaintext()),
            Err(Error::UninitializedKey)
        ));
    }

    #[test]
    fn key_check_precedes_shape_check() {
        let engine = Aes128::new();
        assert!(matches!(
            engine.encrypt(&Matrix::zeroed(4, 0)),
            Err(Error::UninitializedKey)
        ));
    }

    #[test]
    fn single_block_bypasses_mode() {
        for mode in Mode::ALL {
            let engine = nist_engine(mode);
            let ct = engine.encrypt(&nist_plaintext()).unwrap();
            assert_eq!(
                hex::encode(ct.as_bytes()),
                "69c4e0d86a7b0430d8cdb78070b4c55a"
            );
            assert_eq!(engine.decrypt(&ct).unwrap(), nist_plaintext());
        }
        // works even with no mode selected
        let mut engine = nist_engine(Mode::Ecb);
        engine.mode = None;
        assert!(engine.encrypt(&nist_plaintext()).is_ok());
    }

    #[test]
    fn multi_block_without_mode_fails() {
        let mut engine = nist_engine(Mode::Ecb);
        engine.mode = None;
        let err = engine.encrypt(&Matrix::zeroed(4, 8)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedMode(_)));
    }

    #[test]
    fn rejects_misaligned_input() {
        let engine = nist_engine(Mode::Ctr);
        for cols in [0, 2, 5, 10] {
            let err = engine.encrypt(&Matrix::zeroed(4, cols)).unwrap_err();
            assert!(matches!(err, Error::InvalidBlockShape(_)), "{cols}");
        }
        let err = engine.decrypt(&Matrix::zeroed(2, 8)).unwrap_err();
        assert!(matches!(err, Error::InvalidBlockShape(_)));
    }

    #[test]
    fn round_trips_in_both_modes() {
        let mut rng = rand::thread_rng();
        for mode in Mode::ALL {
            let mut key = [0u8; 16];
            let mut data = vec![0u8; 16 * 4];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut data);
            let mut engine = Aes128::with_key(Aes128Key::from(key));
            engine.set_mode(mode);
            engine.set_iv(Iv::new(u128::from(rng.next_u64())));
            let input = Matrix::from_bytes(&data).unwrap();
            let ct = engine.encrypt(&input).unwrap();
            assert_eq!(engine.decrypt(&ct).unwrap(), input, "{mode}");
        }
    }

    #[test]
    fn ctr_encrypt_equals_decrypt() {
        let mut engine = nist_engine(Mode::Ctr);
        engine.set_iv(Iv::from_hex("0000000000000000000000000000fffe").unwrap());
        let data = Matrix::from_bytes(&[0x42; 48]).unwrap();
        assert_eq!(engine.encrypt(&data).unwrap(), engine.decrypt(&data).unwrap());
    }

    #[test]
    fn schedule_is_derived_once_from_key() {
        let engine = nist_engine(Mode::Ecb);
        let key = engine.key().copied().unwrap();
        assert_eq!(engine.key_schedule(), Some(&expand_key(&key)));
        assert_eq!(engine.mode(), Some(Mode::Ecb));
        assert_eq!(engine.iv(), Iv::ZERO);
    }

    #[test]
    fn traced_multi_block_emits_per_block() {
        let engine = nist_engine(Mode::Ecb);
        let mut lines: Vec<String> = Vec::new();
        engine
            .decrypt_traced(&Matrix::zeroed(4, 8), &mut lines)
            .unwrap();
        let banners = lines
            .iter()
            .filter(|l| l.as_str() == "INVERSE CIPHER (DECRYPT):")
            .count();
        assert_eq!(banners, 2);
    }
}
