//! The user-facing cipher object: a key, a chaining mode and a padding
//! scheme, reusable for any number of messages.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;

use crate::modes::{self, Mode};
use crate::padding::Padding;
use crate::schedule::RoundKeys;
use crate::BLOCK_SIZE;

/// Errors surfaced at construction, encryption or decryption.
#[derive(Debug, Error)]
pub enum Error {
    /// Key is not 16, 24 or 32 bytes.
    #[error("invalid key length: {0} bytes, expected 16, 24 or 32")]
    InvalidKeyLength(usize),
    /// Ciphertext is empty, misaligned, or shorter than the mode's minimum.
    #[error("invalid ciphertext length: {0} bytes")]
    InvalidLength(usize),
    /// The decrypted buffer does not end in well-formed padding.
    #[error("invalid padding")]
    InvalidPadding,
    /// The CSPRNG failed while drawing an IV.
    #[error("random source failure: {0}")]
    RandomSource(#[from] rand::Error),
}

/// A reusable AES cipher.
///
/// Holds the expanded key together with the chosen mode and padding.
/// Immutable after construction, so a single instance may serve
/// concurrent encrypt/decrypt calls on distinct messages.
///
/// ```
/// use tinyaes::{Aes, Mode, Padding};
///
/// let aes = Aes::new(&[0u8; 16], Mode::Cbc, Padding::Pkcs7).unwrap();
/// let secret = aes.encrypt(b"attack at dawn").unwrap();
/// assert_eq!(aes.decrypt(&secret).unwrap(), b"attack at dawn");
/// ```
pub struct Aes {
    round_keys: RoundKeys,
    mode: Mode,
    padding: Padding,
}

impl Aes {
    /// Expand `key` and fix the mode and padding for this instance.
    pub fn new(key: &[u8], mode: Mode, padding: Padding) -> Result<Self, Error> {
        Ok(Aes {
            round_keys: RoundKeys::expand(key)?,
            mode,
            padding,
        })
    }

    /// Encrypt `plaintext`, drawing any IV from the operating system.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        self.encrypt_with_rng(plaintext, &mut OsRng)
    }

    /// Encrypt `plaintext` with a caller-supplied CSPRNG for the IV.
    ///
    /// The output length is the plaintext length rounded up to the next
    /// multiple of 16 (a full extra block when already aligned), plus 16
    /// bytes of IV trailer under CBC.
    pub fn encrypt_with_rng(
        &self,
        plaintext: &[u8],
        csrng: &mut (impl CryptoRng + RngCore),
    ) -> Result<Vec<u8>, Error> {
        let pad_size = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;

        let mut data = Vec::with_capacity(plaintext.len() + pad_size + BLOCK_SIZE);
        data.extend_from_slice(plaintext);
        data.resize(plaintext.len() + pad_size, 0);
        self.padding.apply(&mut data[plaintext.len()..]);

        match self.mode {
            Mode::Ecb => modes::ecb_encrypt(&mut data, &self.round_keys),
            Mode::Cbc => modes::cbc_encrypt(&mut data, &self.round_keys, csrng)?,
        }
        Ok(data)
    }

    /// Decrypt `ciphertext` and strip the padding.
    ///
    /// Rejects buffers that are not a positive multiple of 16 bytes, or
    /// too short for the mode (CBC needs at least one data block plus the
    /// IV trailer). A malformed pad after decryption is
    /// [`Error::InvalidPadding`]; nothing is returned in that case.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        let min = match self.mode {
            Mode::Ecb => BLOCK_SIZE,
            Mode::Cbc => 2 * BLOCK_SIZE,
        };
        if ciphertext.len() < min || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(Error::InvalidLength(ciphertext.len()));
        }

        let mut data = ciphertext.to_vec();
        match self.mode {
            Mode::Ecb => modes::ecb_decrypt(&mut data, &self.round_keys),
            Mode::Cbc => modes::cbc_decrypt(&mut data, &self.round_keys),
        }

        let pad = self
            .padding
            .detect(&data)
            .ok_or(Error::InvalidPadding)?;
        data.truncate(data.len() - pad);
        Ok(data)
    }

    /// The chaining mode this instance was built with.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The padding scheme this instance was built with.
    pub fn padding(&self) -> Padding {
        self.padding
    }
}
