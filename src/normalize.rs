//! Case folding into the comparison form shared by needles and haystacks.

use crate::config::WhitespacePolicy;

/// Lowercase a single character, keeping one char per input char.
///
/// The few characters whose lowercase mapping expands to several chars keep
/// only the first one, so char indices computed on the normalized text are
/// valid for the original text.
#[inline]
pub fn fold_char(ch: char) -> char {
    if ch.is_ascii() {
        return ch.to_ascii_lowercase();
    }
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Case-fold `text`. Idempotent and length preserving in chars.
pub fn normalize(text: &str) -> String {
    if text.is_ascii() {
        return text.to_ascii_lowercase();
    }
    text.chars().map(fold_char).collect()
}

/// A normalized query, built once and reused against every candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle {
    normalized: String,
    len: usize,
}

impl Needle {
    pub fn new(pattern: &str, whitespace: WhitespacePolicy) -> Self {
        let normalized: String = match whitespace {
            WhitespacePolicy::Literal => normalize(pattern),
            WhitespacePolicy::Ignore => pattern
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .map(fold_char)
                .collect(),
        };
        let len = normalized.chars().count();
        Self { normalized, len }
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("getContent"), "getcontent");
        assert_eq!(normalize("Foo/BAR.ts"), "foo/bar.ts");
        assert_eq!(normalize("Hello, 世界"), "hello, 世界");
        assert_eq!(normalize("ÀÉÎ"), "àéî");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for text in ["getContent", "ÀÉÎ", "İstanbul", "ΣΑΣ", "a-B_c d.E"] {
            let once = normalize(text);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_normalize_preserves_char_count() {
        for text in ["İstanbul", "ẞtraße", "getContent"] {
            assert_eq!(normalize(text).chars().count(), text.chars().count());
        }
    }

    #[test]
    fn test_needle_whitespace_policy() {
        let literal = Needle::new("Foo Bar", WhitespacePolicy::Literal);
        assert_eq!(literal.as_str(), "foo bar");
        assert_eq!(literal.len(), 7);

        let ignore = Needle::new("Foo Bar", WhitespacePolicy::Ignore);
        assert_eq!(ignore.as_str(), "foobar");
        assert_eq!(ignore.len(), 6);

        assert!(Needle::new("   ", WhitespacePolicy::Ignore).is_empty());
    }
}
