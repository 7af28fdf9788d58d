//! Time-based API key derivation.
//!
//! The service does not accept the raw API key. Instead each login sends a
//! 12-character key built from the seed and the request timestamp:
//!
//! - `n`: the last 6 decimal digits of the millisecond timestamp
//! - `r`: `n >> 1`, zero-padded to 6 digits
//!
//! Each digit `d` of `n` selects `seed[d]`, then each digit `d` of `r`
//! selects `seed[d + 2]`. This is a fixed, non-cryptographic transform; the
//! server recomputes it from the same timestamp, so the digit handling has
//! to match exactly.

use chrono::Utc;
use thiserror::Error;

/// Number of timestamp digits fed into the key
const TIMESTAMP_DIGITS: u32 = 6;

/// Offset added to the digits of the shifted value
const SHIFTED_OFFSET: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObfuscationError {
    #[error("API key seed too short: index {index} needed but seed has {seed_len} characters")]
    IndexOutOfRange { index: usize, seed_len: usize },
}

/// A derived key together with the timestamp it was computed from.
/// Both are sent in the login body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedKey {
    pub key: String,
    pub timestamp_ms: i64,
}

/// Derive the login key from `seed` for the given millisecond timestamp.
pub fn derive_credential(seed: &str, timestamp_ms: i64) -> Result<DerivedKey, ObfuscationError> {
    let alphabet: Vec<char> = seed.chars().collect();
    let (n, r) = timestamp_digits(timestamp_ms);

    let mut key = String::with_capacity(2 * TIMESTAMP_DIGITS as usize);
    for index in digits(&n) {
        key.push(lookup(&alphabet, index)?);
    }
    for index in digits(&r) {
        key.push(lookup(&alphabet, index + SHIFTED_OFFSET)?);
    }

    Ok(DerivedKey { key, timestamp_ms })
}

/// Derive the login key for the current time.
pub fn derive_credential_now(seed: &str) -> Result<DerivedKey, ObfuscationError> {
    derive_credential(seed, Utc::now().timestamp_millis())
}

/// Split a timestamp into the `n` and `r` digit strings.
fn timestamp_digits(timestamp_ms: i64) -> (String, String) {
    let modulus = 10_i64.pow(TIMESTAMP_DIGITS);
    let n = timestamp_ms.rem_euclid(modulus);
    let r = n >> 1;
    (format!("{:06}", n), format!("{:06}", r))
}

fn digits(s: &str) -> impl Iterator<Item = usize> + '_ {
    s.chars().filter_map(|c| c.to_digit(10)).map(|d| d as usize)
}

fn lookup(alphabet: &[char], index: usize) -> Result<char, ObfuscationError> {
    alphabet
        .get(index)
        .copied()
        .ok_or(ObfuscationError::IndexOutOfRange {
            index,
            seed_len: alphabet.len(),
        })
}
