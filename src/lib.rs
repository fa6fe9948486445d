#![forbid(unsafe_code)]

/// One-block encrypt/decrypt.
pub mod block;
/// Arithmetic and lookup tables for the Rijndael field.
pub mod gf256;
/// Block chaining modes.
pub mod modes;
/// Trailing-block padding schemes.
pub mod padding;
/// The four round transformations and their inverses.
pub mod rounds;
/// Key expansion.
pub mod schedule;

/// High-level cipher interface.
mod cipher;

pub use cipher::{Aes, Error};
pub use modes::Mode;
pub use padding::Padding;
pub use schedule::RoundKeys;

/// Width in bytes of the AES state.
pub const BLOCK_SIZE: usize = 16;
