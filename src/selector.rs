//! Maps an optional caller-supplied seed to one entry of the [`ImageIndex`].

use crate::index::{ImageEntry, ImageIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid seed '{value}': {reason}")]
pub struct SeedError {
    pub value: String,
    pub reason: String,
}

/// Parses the raw `i` query value into a selection seed.
///
/// A missing or blank value means "no seed". Surrounding whitespace is ignored.
/// Any integer is accepted, with an optional sign and single underscores
/// between digits (`1_000`). The seed is the integer's value modulo 2^64, so
/// `-1` and `18446744073709551615` select the same image.
pub fn parse_seed(raw: Option<&str>) -> Result<Option<u64>, SeedError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    fold_integer(raw).map(Some).ok_or_else(|| SeedError {
        value: raw.to_string(),
        reason: "not an integer".to_string(),
    })
}

fn fold_integer(raw: &str) -> Option<u64> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }

    let mut value = 0u64;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(10)?;
        value = value.wrapping_mul(10).wrapping_add(u64::from(digit));
    }
    Some(if negative { value.wrapping_neg() } else { value })
}

/// Selects an entry from `index`.
///
/// Without a seed the pick comes from `rng`. With a seed, a fresh [`StdRng`]
/// seeded from it makes the same single pick, so the result depends only on
/// the seed and the index contents and order.
pub fn select<'a, R: Rng + ?Sized>(
    index: &'a ImageIndex,
    seed: Option<u64>,
    rng: &mut R,
) -> &'a ImageEntry {
    match seed {
        Some(seed) => index.pick(&mut StdRng::seed_from_u64(seed)),
        None => index.pick(rng),
    }
}
