//! Base-36 short identifier encoding.
//!
//! Short identifiers are a pure function of the storage-assigned numeric link
//! id. Encoding must only happen once the id has been durably assigned; the
//! result is persisted immediately so lookups go straight by short id.

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Encodes a numeric id as a base-36 string, most significant digit first.
///
/// `encode(0)` is `"0"`. No padding. Injective over all of `u64`.
pub fn encode(id: u64) -> String {
    if id == 0 {
        return "0".to_string();
    }

    let mut n = id;
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();

    // ALPHABET is ASCII, so the buffer is valid UTF-8.
    String::from_utf8(buf).unwrap_or_default()
}

/// Decodes a base-36 short identifier back to its numeric id.
///
/// Returns `None` for an empty string, characters outside `0-9a-z`,
/// or values that would overflow `u64`.
pub fn decode(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }

    let mut n: u64 = 0;
    for c in s.bytes() {
        let digit = match c {
            b'0'..=b'9' => (c - b'0') as u64,
            b'a'..=b'z' => (c - b'a') as u64 + 10,
            _ => return None,
        };
        n = n.checked_mul(36)?.checked_add(digit)?;
    }
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_encode_zero() {
        assert_eq!(encode(0), "0");
    }

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(1), "1");
        assert_eq!(encode(9), "9");
        assert_eq!(encode(10), "a");
        assert_eq!(encode(35), "z");
        assert_eq!(encode(36), "10");
        assert_eq!(encode(36 * 36), "100");
        assert_eq!(encode(1_000_000), "lfls");
    }

    #[test]
    fn test_decode_round_trip() {
        for n in [0u64, 1, 35, 36, 1295, 1296, 99_999, 10_000_000, u64::MAX] {
            assert_eq!(decode(&encode(n)), Some(n));
        }
    }

    #[test]
    fn test_encode_injective_over_sample() {
        let mut seen = HashSet::new();
        for n in (0..10_000_000u64).step_by(997) {
            assert!(seen.insert(encode(n)), "collision at {n}");
        }
    }

    #[test]
    fn test_decode_rejects_invalid_input() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("ABC"), None);
        assert_eq!(decode("a-b"), None);
        assert_eq!(decode("тест"), None);
        // 13 base-36 digits overflow u64
        assert_eq!(decode("zzzzzzzzzzzzz"), None);
    }

    #[test]
    fn test_no_leading_zeros() {
        for n in [1u64, 36, 1296, 50_000] {
            assert!(!encode(n).starts_with('0'));
        }
    }
}
