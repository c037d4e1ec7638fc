//! Error type shared by the cipher core and the mode layer.

use thiserror::Error;

/// Failures reported by AES-128 operations.
///
/// Every variant is fatal to the call that produced it; no output is
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum Error {
    /// Encryption or decryption was requested before a key was set.
    #[error("the key has not been initialized")]
    UninitializedKey,

    /// Input is not a 4-row matrix of whole, non-empty blocks.
    #[error("invalid block shape: {0}")]
    InvalidBlockShape(String),

    /// The mode of operation is not one of `ECB` or `CTR`.
    #[error("unsupported mode of operation '{0}', expected one of ECB, CTR")]
    UnsupportedMode(String),

    /// The transformation string is not `ALGORITHM/MODE` or names an unknown algorithm.
    #[error("malformed transformation '{0}', expected 'AES128/MODE'")]
    MalformedTransformation(String),

    /// Two matrices (or a matrix and a column range) have incompatible shapes.
    #[error("dimension mismatch: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        /// Shape of the receiving matrix as `(rows, cols)`.
        left: (usize, usize),
        /// Shape of the operand or requested range as `(rows, cols)`.
        right: (usize, usize),
    },

    /// A counter block was requested for a negative block index.
    #[error("counter index must not be negative, got {0}")]
    NegativeCounterIndex(i64),

    /// Hex input could not be decoded into 16 bytes.
    #[error("invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;
