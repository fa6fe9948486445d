//! Single-block cipher: the FIPS 197 round schedule over one 16-byte state.

use crate::rounds::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::schedule::RoundKeys;

/// Encrypt one block in place.
pub fn encrypt_block(state: &mut [u8; 16], keys: &RoundKeys) {
    add_round_key(state, keys.round_key(0));

    for r in 1..keys.rounds() {
        sub_bytes(state);
        shift_rows(state);
        mix_columns(state);
        add_round_key(state, keys.round_key(r));
    }

    // Final round skips MixColumns.
    sub_bytes(state);
    shift_rows(state);
    add_round_key(state, keys.round_key(keys.rounds()));
}

/// Decrypt one block in place, running the inverse schedule backwards.
pub fn decrypt_block(state: &mut [u8; 16], keys: &RoundKeys) {
    add_round_key(state, keys.round_key(keys.rounds()));

    for r in (1..keys.rounds()).rev() {
        inv_shift_rows(state);
        inv_sub_bytes(state);
        add_round_key(state, keys.round_key(r));
        inv_mix_columns(state);
    }

    inv_shift_rows(state);
    inv_sub_bytes(state);
    add_round_key(state, keys.round_key(0));
}
