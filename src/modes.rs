//! ECB and CBC block chaining.
//!
//! Both modes require the buffer length to be a positive multiple of the
//! block width; the facade validates this before dispatching. CBC wire
//! format is `C_0 .. C_n-1 || IV`: the initialization vector rides as a
//! 16-byte trailer, not a prefix.

use rand::{CryptoRng, RngCore};

use crate::block::{decrypt_block, encrypt_block};
use crate::cipher::Error;
use crate::schedule::RoundKeys;
use crate::BLOCK_SIZE;

/// Chaining mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Electronic codebook: blocks are independent.
    Ecb,
    /// Cipher block chaining with a random IV appended as a trailer.
    Cbc,
}

/// Run `f` over every 16-byte block of `data`.
///
/// With the `parallel` feature the blocks fan out across the rayon pool;
/// output position always matches input position.
fn for_each_block<F>(data: &mut [u8], f: F)
where
    F: Fn(&mut [u8; 16]) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        data.par_chunks_exact_mut(BLOCK_SIZE)
            .for_each(|chunk| f(chunk.try_into().unwrap()));
    }
    #[cfg(not(feature = "parallel"))]
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        f(chunk.try_into().unwrap());
    }
}

pub(crate) fn ecb_encrypt(data: &mut [u8], keys: &RoundKeys) {
    debug_assert!(!data.is_empty() && data.len() % BLOCK_SIZE == 0);
    for_each_block(data, |block| encrypt_block(block, keys));
}

pub(crate) fn ecb_decrypt(data: &mut [u8], keys: &RoundKeys) {
    debug_assert!(!data.is_empty() && data.len() % BLOCK_SIZE == 0);
    for_each_block(data, |block| decrypt_block(block, keys));
}

/// Encrypt in place, chaining each block into the next, then append the IV.
///
/// Strictly sequential: block `i` cannot start before block `i - 1` is done.
pub(crate) fn cbc_encrypt(
    data: &mut Vec<u8>,
    keys: &RoundKeys,
    csrng: &mut (impl CryptoRng + RngCore),
) -> Result<(), Error> {
    debug_assert!(!data.is_empty() && data.len() % BLOCK_SIZE == 0);

    let mut iv = [0u8; BLOCK_SIZE];
    csrng.try_fill_bytes(&mut iv)?;

    let mut prev = iv;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let block: &mut [u8; 16] = chunk.try_into().unwrap();
        xor_block(block, &prev);
        encrypt_block(block, keys);
        prev = *block;
    }

    data.extend_from_slice(&iv);
    Ok(())
}

/// Decrypt in place and drop the trailing IV.
pub(crate) fn cbc_decrypt(data: &mut Vec<u8>, keys: &RoundKeys) {
    debug_assert!(data.len() % BLOCK_SIZE == 0 && data.len() >= 2 * BLOCK_SIZE);

    let body = data.len() - BLOCK_SIZE;
    let mut prev = [0u8; BLOCK_SIZE];
    prev.copy_from_slice(&data[body..]);

    for chunk in data[..body].chunks_exact_mut(BLOCK_SIZE) {
        let block: &mut [u8; 16] = chunk.try_into().unwrap();
        let saved = *block;
        decrypt_block(block, keys);
        xor_block(block, &prev);
        prev = saved;
    }

    data.truncate(body);
}

#[inline]
fn xor_block(block: &mut [u8; 16], rhs: &[u8; 16]) {
    for (b, r) in block.iter_mut().zip(rhs) {
        *b ^= r;
    }
}
