//! Placeholder-word filter.
//!
//! Contrived identifiers such as `aaa`, `abc` or `aabbcc` are never real words, and the
//! dictionary alone cannot tell them apart from typos.

use crate::checker::casing::TextCasing;

pub const MIN_LENGTH: usize = 3;
const MIN_BLOCK_SEQUENCE_LENGTH: usize = 6;

/// True when `value` is a uniform run, an `ab...` sequence or a block-repeated sequence.
pub fn is_nonsense(value: &str) -> bool {
    if value.len() < MIN_LENGTH || !value.bytes().all(|b| b.is_ascii_alphabetic()) {
        return false;
    }

    if TextCasing::of(value) == TextCasing::Mixed {
        return false;
    }

    let lower: Vec<u8> = value.bytes().map(|b| b.to_ascii_lowercase()).collect();
    is_uniform_run(&lower) || is_alphabetic_sequence(&lower) || is_block_sequence(&lower)
}

fn is_uniform_run(s: &[u8]) -> bool {
    s.iter().all(|&b| b == s[0])
}

fn is_alphabetic_sequence(s: &[u8]) -> bool {
    s.starts_with(b"ab") && is_consecutive(s)
}

// `aabbcc`: equal blocks, each one letter past the previous.
fn is_block_sequence(s: &[u8]) -> bool {
    if s.len() < MIN_BLOCK_SEQUENCE_LENGTH {
        return false;
    }

    let block_len = s.iter().take_while(|&&b| b == s[0]).count();
    if block_len < 2 || block_len == s.len() || s.len() % block_len != 0 {
        return false;
    }

    let blocks: Vec<&[u8]> = s.chunks(block_len).collect();
    if !blocks.iter().all(|block| is_uniform_run(block)) {
        return false;
    }

    let heads: Vec<u8> = blocks.iter().map(|block| block[0]).collect();
    is_consecutive(&heads)
}

fn is_consecutive(s: &[u8]) -> bool {
    s.windows(2).all(|w| w[1] == w[0] + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppressed() {
        for word in ["abc", "ABC", "Abc", "abcdef", "aabbcc", "AABBCC", "aaabbbccc", "xxxx", "AAAA", "aaa"] {
            assert!(is_nonsense(word), "{word} should be suppressed");
        }
    }

    #[test]
    fn test_not_suppressed() {
        for word in ["abd", "xyab", "aBc", "ab", "aabbc", "aabbdd", "aabbbcc", "length", "bcd"] {
            assert!(!is_nonsense(word), "{word} should not be suppressed");
        }
    }

    #[test]
    fn test_non_ascii_is_never_nonsense() {
        assert!(!is_nonsense("ééé"));
    }
}
