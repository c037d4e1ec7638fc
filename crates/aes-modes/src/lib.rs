//! ECB and CTR modes of operation over the AES-128 core.
//!
//! Data is carried as a 4-row [`aes_core::Matrix`] in which every four
//! columns form one 16-byte block. The mode functions in [`ecb`] and [`ctr`]
//! validate the shape before touching any block; [`Aes128`] and [`Cipher`]
//! add key management and transformation-string selection on top.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod blocks;
mod cipher;
mod counter;
pub mod ctr;
pub mod ecb;
mod engine;
mod transformation;

pub use crate::blocks::validate;
pub use crate::cipher::Cipher;
pub use crate::counter::Iv;
pub use crate::engine::{Aes128, Direction};
pub use crate::transformation::{Algorithm, Mode, Transformation};
