//! Random sampling primitives shared by the generator.
//!
//! Every function borrows the caller's RNG, so a seeded `SmallRng` makes a
//! full generation run reproducible. Returned items are owned clones: two
//! draws of the same source item never alias.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::error::{Result, TrialError};
use crate::types::KeyMapping;

/// `n` distinct items in random order.
pub fn sample_without_replacement<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    n: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    if items.is_empty() {
        return Err(TrialError::EmptyInput {
            what: "sample_without_replacement items",
        });
    }
    if n > items.len() {
        return Err(TrialError::TooManyRequested {
            requested: n,
            available: items.len(),
        });
    }
    let mut out = shuffle(items, rng);
    out.truncate(n);
    Ok(out)
}

/// `n` independent uniform draws; duplicates are expected.
pub fn sample_with_replacement<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    n: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    if items.is_empty() {
        return Err(TrialError::EmptyInput {
            what: "sample_with_replacement items",
        });
    }
    Ok((0..n)
        .map(|_| items[rng.random_range(0..items.len())].clone())
        .collect())
}

/// A uniformly random permutation; the input is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// One uniform draw.
pub fn sample_one<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Result<&'a T> {
    items.choose(rng).ok_or(TrialError::EmptyInput {
        what: "sample_one items",
    })
}

/// Randomly assign two physical keys to "yes" and "no".
pub fn sample_key_mapping<S: AsRef<str>, R: Rng + ?Sized>(
    valid_keys: &[S],
    rng: &mut R,
) -> Result<KeyMapping> {
    if valid_keys.len() != 2 {
        return Err(TrialError::InvalidKeyCount {
            got: valid_keys.len(),
        });
    }
    let (first, second) = (valid_keys[0].as_ref(), valid_keys[1].as_ref());
    let (yes, no) = if rng.random_bool(0.5) {
        (first, second)
    } else {
        (second, first)
    };
    Ok(KeyMapping {
        yes: yes.to_string(),
        no: no.to_string(),
    })
}
