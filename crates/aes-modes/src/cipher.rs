//! Transformation-driven cipher facade.
//!
//! ```
//! use aes_modes::{Cipher, Direction};
//! use aes_core::{Aes128Key, Matrix};
//!
//! let key = Aes128Key::from([7u8; 16]);
//! let data = Matrix::from_bytes(&[0u8; 32]).unwrap();
//!
//! let mut cipher = Cipher::init("AES128/CTR").unwrap();
//! let ciphertext = cipher.do_final(&data, &key).unwrap();
//! cipher.set_direction(Direction::Decrypt);
//! assert_eq!(cipher.do_final(&ciphertext, &key).unwrap(), data);
//! ```

use aes_core::{Aes128Key, Matrix, Result, Silent, TraceSink};

use crate::counter::Iv;
use crate::engine::{Aes128, Direction};
use crate::transformation::{Algorithm, Mode, Transformation};

/// A cipher configured from a transformation string such as `AES128/ECB`.
#[derive(Clone, Debug)]
pub struct Cipher {
    transformation: Transformation,
    direction: Direction,
    iv: Iv,
}

impl Cipher {
    /// Parses `transformation` and returns an encrypting cipher with a zero IV.
    pub fn init(transformation: &str) -> Result<Self> {
        Ok(Self::new(transformation.parse()?))
    }

    /// Builds a cipher from an already-parsed transformation.
    pub fn new(transformation: Transformation) -> Self {
        Self {
            transformation,
            direction: Direction::default(),
            iv: Iv::default(),
        }
    }

    /// Names of the supported algorithms.
    pub fn supported_algorithms() -> Vec<&'static str> {
        Algorithm::ALL.iter().map(|alg| alg.name()).collect()
    }

    /// Names of the supported modes of operation.
    pub fn supported_modes() -> Vec<&'static str> {
        Mode::ALL.iter().map(|mode| mode.name()).collect()
    }

    /// The parsed transformation.
    pub fn transformation(&self) -> Transformation {
        self.transformation
    }

    /// The current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Switches between encryption and decryption.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Sets the CTR counter seed; ignored by ECB.
    pub fn set_iv(&mut self, iv: Iv) {
        self.iv = iv;
    }

    /// The CTR counter seed.
    pub fn iv(&self) -> Iv {
        self.iv
    }

    /// Installs `key` and runs the configured direction over `input`.
    pub fn do_final(&self, input: &Matrix, key: &Aes128Key) -> Result<Matrix> {
        self.do_final_traced(input, key, &mut Silent)
    }

    /// Like [`Cipher::do_final`], tracing every cipher invocation.
    pub fn do_final_traced<S: TraceSink + ?Sized>(
        &self,
        input: &Matrix,
        key: &Aes128Key,
        sink: &mut S,
    ) -> Result<Matrix> {
        match self.transformation.algorithm {
            Algorithm::Aes128 => {
                let mut engine = Aes128::with_key(*key);
                engine.set_mode(self.transformation.mode);
                engine.set_iv(self.iv);
                engine.run(self.direction, input, sink)
            }
        }
    }
}
