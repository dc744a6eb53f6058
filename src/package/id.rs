//! Package ID generation
//!
//! An ID is a random base-36 token followed by the creation time in
//! milliseconds, also base-36. Collisions are negligible at human scale but
//! not cryptographically ruled out; the store re-rolls on a clash.

use chrono::{DateTime, Utc};
use rand::Rng;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random part of an ID
pub const RANDOM_TOKEN_LENGTH: usize = 11;

/// Generate an ID for a package created at `now`.
pub fn generate_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let mut id: String = (0..RANDOM_TOKEN_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    id.push_str(&to_base36(now.timestamp_millis().max(0) as u64));
    id
}

/// Lowercase base-36 rendering of `value`
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
