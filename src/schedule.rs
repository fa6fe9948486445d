//! FIPS 197 key expansion.

use zeroize::Zeroize;

use crate::cipher::Error;
use crate::gf256::{RCON, SBOX};
use crate::BLOCK_SIZE;

/// Largest expanded key: 15 round keys for AES-256.
const MAX_EXPANDED: usize = BLOCK_SIZE * 15;

/// The expanded key: `rounds + 1` contiguous 16-byte round keys.
///
/// Built once from a 16-, 24- or 32-byte key and read-only afterwards.
/// The buffer is wiped on drop.
pub struct RoundKeys {
    words: [u8; MAX_EXPANDED],
    rounds: usize,
}

impl RoundKeys {
    /// Expand `key` into the full round-key schedule.
    ///
    /// The number of rounds follows the key length: 10 for AES-128,
    /// 12 for AES-192, 14 for AES-256. Any other length is rejected;
    /// in particular there is no lenient alias for 192-bit keys.
    pub fn expand(key: &[u8]) -> Result<Self, Error> {
        let nk = match key.len() {
            16 => 4,
            24 => 6,
            32 => 8,
            n => return Err(Error::InvalidKeyLength(n)),
        };
        let rounds = nk + 6;

        let mut words = [0u8; MAX_EXPANDED];
        words[..key.len()].copy_from_slice(key);

        for i in nk..4 * (rounds + 1) {
            let mut t = [0u8; 4];
            t.copy_from_slice(&words[4 * (i - 1)..4 * i]);

            if i % nk == 0 {
                // RotWord, SubWord, then fold in the round constant.
                t.rotate_left(1);
                for b in &mut t {
                    *b = SBOX[*b as usize];
                }
                t[0] ^= RCON[i / nk - 1];
            } else if nk > 6 && i % nk == 4 {
                // AES-256 only: SubWord without the rotation.
                for b in &mut t {
                    *b = SBOX[*b as usize];
                }
            }

            for (j, &b) in t.iter().enumerate() {
                words[4 * i + j] = words[4 * (i - nk) + j] ^ b;
            }
        }

        Ok(RoundKeys { words, rounds })
    }

    /// Number of rounds for this key size.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// The 16-byte round key for round `r`, `0 <= r <= rounds`.
    #[inline]
    pub fn round_key(&self, r: usize) -> &[u8] {
        &self.words[BLOCK_SIZE * r..BLOCK_SIZE * (r + 1)]
    }

    /// Total length of the expanded key in bytes.
    #[inline]
    pub fn expanded_len(&self) -> usize {
        BLOCK_SIZE * (self.rounds + 1)
    }
}

impl Drop for RoundKeys {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_rejects_bad_key_lengths() {
        for n in [0, 1, 15, 17, 23, 25, 31, 33, 64] {
            assert!(matches!(
                RoundKeys::expand(&vec![0u8; n]),
                Err(Error::InvalidKeyLength(m)) if m == n
            ));
        }
    }

    #[test]
    fn test_aes128_sizes() {
        let key = hex!("000102030405060708090a0b0c0d0e0f");
        let keys = RoundKeys::expand(&key).unwrap();
        assert_eq!(keys.rounds(), 10);
        assert_eq!(keys.expanded_len(), 176);
        // First round key is the input key itself.
        assert_eq!(keys.round_key(0), key);
    }

    #[test]
    fn test_aes128_zero_key_expansion() {
        let keys = RoundKeys::expand(&[0u8; 16]).unwrap();
        assert_eq!(keys.round_key(1), hex!("62636363626363636263636362636363"));
        assert_eq!(keys.round_key(2), hex!("9b9898c9f9fbfbaa9b9898c9f9fbfbaa"));
        assert_eq!(keys.round_key(10), hex!("b4ef5bcb3e92e21123e951cf6f8f188e"));
    }

    #[test]
    fn test_aes192_expansion() {
        // FIPS 197 appendix A.2.
        let key = hex!("000102030405060708090a0b0c0d0e0f1011121314151617");
        let keys = RoundKeys::expand(&key).unwrap();
        assert_eq!(keys.rounds(), 12);
        assert_eq!(keys.expanded_len(), 208);
        // Round key 1 starts with the key tail and continues into the first
        // generated words (FIPS 197 appendix A.2, w4..w7).
        assert_eq!(keys.round_key(0), &key[..16]);
        assert_eq!(keys.round_key(1), hex!("10111213141516175846f2f95c43f4fe"));
    }

    #[test]
    fn test_aes256_expansion() {
        // FIPS 197 appendix A.3.
        let key = hex!(
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f"
        );
        let keys = RoundKeys::expand(&key).unwrap();
        assert_eq!(keys.rounds(), 14);
        assert_eq!(keys.expanded_len(), 240);
        assert_eq!(keys.round_key(0), &key[..16]);
        assert_eq!(keys.round_key(1), &key[16..]);
        assert_eq!(keys.round_key(2), hex!("a573c29fa176c498a97fce93a572c09c"));
        assert_eq!(keys.round_key(3), hex!("1651a8cd0244beda1a5da4c10640bade"));
        assert_eq!(keys.round_key(13), hex!("4e5a6699a9f24fe07e572baacdf8cdea"));
        assert_eq!(keys.round_key(14), hex!("24fc79ccbf0979e9371ac23c6d68de36"));
    }
}
