//! Parsing of `ALGORITHM/MODE` transformation strings.

use core::fmt;
use core::str::FromStr;

use aes_core::{Error, Result};

/// Block cipher algorithms that can be selected by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// AES with a 128-bit key.
    Aes128,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Algorithm; 1] = [Algorithm::Aes128];

    /// The name used in transformation strings.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Aes128 => "AES128",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Modes of operation for multi-block data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Electronic Codebook: every block is ciphered independently.
    Ecb,
    /// Counter: blocks are XORed with encrypted successive counter values.
    Ctr,
}

impl Mode {
    /// Every supported mode.
    pub const ALL: [Mode; 2] = [Mode::Ecb, Mode::Ctr];

    /// The name used in transformation strings.
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Ecb => "ECB",
            Mode::Ctr => "CTR",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-sensitive: only `ECB` and `CTR` are accepted.
impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| Error::UnsupportedMode(s.to_owned()))
    }
}

/// An algorithm/mode pair such as `AES128/CTR`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transformation {
    /// Selected block cipher.
    pub algorithm: Algorithm,
    /// Selected mode of operation.
    pub mode: Mode,
}

impl Transformation {
    /// Pairs an algorithm with a mode.
    pub const fn new(algorithm: Algorithm, mode: Mode) -> Self {
        Self { algorithm, mode }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.algorithm, self.mode)
    }
}

impl FromStr for Transformation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('/');
        let (Some(algorithm), Some(mode), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::MalformedTransformation(s.to_owned()));
        };

        let algorithm = Algorithm::ALL
            .into_iter()
            .find(|alg| alg.name() == algorithm)
            .ok_or_else(|| Error::MalformedTransformation(s.to_owned()))?;
        let mode = mode.parse()?;

        Ok(Self { algorithm, mode })
    }
}
