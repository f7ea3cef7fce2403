//! Random set generation for the Cartesian game
//!
//! Set A holds 3-4 unique integers from [1, 10]; Set B holds 3-4 unique
//! symbols from a fixed 5-letter alphabet. Uniqueness is enforced by
//! rejection (redraw on duplicate), which always terminates because the
//! requested size never exceeds the value pool.

use rand::Rng;

use crate::consts::{SET_A_MAX, SET_B_ALPHABET, SET_MAX_LEN, SET_MIN_LEN};

/// Generate a fresh (Set A, Set B) pair for one round
pub fn generate_sets<R: Rng>(rng: &mut R) -> (Vec<i64>, Vec<char>) {
    let len_a = rng.random_range(SET_MIN_LEN..=SET_MAX_LEN);
    let len_b = rng.random_range(SET_MIN_LEN..=SET_MAX_LEN);

    let mut set_a = Vec::with_capacity(len_a);
    while set_a.len() < len_a {
        let v = rng.random_range(1..=SET_A_MAX);
        if !set_a.contains(&v) {
            set_a.push(v);
        }
    }

    let mut set_b = Vec::with_capacity(len_b);
    while set_b.len() < len_b {
        let c = SET_B_ALPHABET[rng.random_range(0..SET_B_ALPHABET.len())];
        if !set_b.contains(&c) {
            set_b.push(c);
        }
    }

    (set_a, set_b)
}
