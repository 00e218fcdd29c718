use memchr::memchr;

use crate::IndexType;
#[cfg(test)]
use crate::{score::cmp_desc, FuzzyMatcher};

/// Whether every char of `needle` occurs in `haystack` in order.
///
/// Both sides must already be normalized. Each lookup resumes right after the
/// previous hit, so the whole scan is linear in `needle.len() + haystack.len()`.
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let bytes = haystack.as_bytes();
    let mut cursor = 0;
    for ch in needle.chars() {
        let found = if ch.is_ascii() {
            memchr(ch as u8, &bytes[cursor..]).map(|idx| idx + 1)
        } else {
            haystack[cursor..].find(ch).map(|idx| idx + ch.len_utf8())
        };

        match found {
            Some(advance) => cursor += advance,
            None => return false,
        }
    }

    true
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CharType {
    Slash,
    Separ,
    Dot,
    Lower,
    Upper,
    Other,
}

#[inline]
pub fn char_type_of(ch: char) -> CharType {
    match ch {
        '/' => CharType::Slash,
        '-' | '_' | ' ' => CharType::Separ,
        '.' => CharType::Dot,
        c if c.is_lowercase() => CharType::Lower,
        c if c.is_uppercase() => CharType::Upper,
        _ => CharType::Other,
    }
}

/// Split `text` into alternating unmatched / matched segments.
///
/// Even indices hold unmatched text and odd indices matched text, so the
/// first segment is empty when the match starts at char 0. `positions` are
/// char indices in increasing order.
pub fn split_by_positions<'a>(text: &'a str, positions: &[IndexType]) -> Vec<&'a str> {
    let mut segments = Vec::with_capacity(positions.len() * 2 + 1);
    let mut positions = positions.iter().map(|&pos| pos as usize).peekable();

    let mut start = 0;
    let mut in_match = false;
    for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
        let matched = positions.peek() == Some(&char_idx);
        if matched {
            positions.next();
        }

        if matched != in_match {
            segments.push(&text[start..byte_idx]);
            start = byte_idx;
            in_match = matched;
        }
    }
    segments.push(&text[start..]);

    segments
}

/// Render matched chars in brackets, e.g. `[a]x[b]y[c]z`.
pub fn wrap_matches(line: &str, indices: &[IndexType]) -> String {
    let mut ret = String::new();
    for (idx, segment) in split_by_positions(line, indices).into_iter().enumerate() {
        if idx % 2 == 1 {
            for ch in segment.chars() {
                ret.push('[');
                ret.push(ch);
                ret.push(']');
            }
        } else {
            ret.push_str(segment);
        }
    }
    ret
}

#[cfg(test)]
fn filter_and_sort<M: FuzzyMatcher>(
    matcher: &M,
    pattern: &str,
    lines: &[&'static str],
) -> Vec<&'static str> {
    let mut lines_with_score: Vec<(M::Score, &'static str)> = lines
        .iter()
        .filter_map(|&line| matcher.fuzzy_match(line, pattern).map(|score| (score, line)))
        .collect();
    lines_with_score.sort_by(|(a, _), (b, _)| cmp_desc(a, b));
    lines_with_score.into_iter().map(|(_, line)| line).collect()
}

#[cfg(test)]
pub fn assert_order<M: FuzzyMatcher>(matcher: &M, pattern: &str, choices: &[&'static str]) {
    let result = filter_and_sort(matcher, pattern, choices);

    if result != choices {
        // debug print
        println!("pattern: {}", pattern);
        for &choice in choices.iter() {
            if let Some((score, indices)) = matcher.fuzzy_indices(choice, pattern) {
                println!("{}: {:?}", score, wrap_matches(choice, &indices));
            } else {
                println!("NO MATCH for {}", choice);
            }
        }
    }

    assert_eq!(result, choices);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_subsequence() {
        assert!(is_subsequence("", ""));
        assert!(is_subsequence("", "abc"));
        assert!(!is_subsequence("a", ""));
        assert!(is_subsequence("abc", "axbycz"));
        assert!(is_subsequence("xyz", "axbycz"));
        assert!(!is_subsequence("abx", "abc"));
        assert!(!is_subsequence("ba", "ab"));
        assert!(is_subsequence("aa", "aba"));
        assert!(!is_subsequence("aa", "ab"));
        assert!(is_subsequence("h世", "hello, 世界"));
        assert!(!is_subsequence("中", "abcdefaghi"));
        assert!(is_subsequence("世a", "世界a"));
        assert!(!is_subsequence("界世", "世界"));
    }

    #[test]
    fn test_is_subsequence_literal_space() {
        assert!(is_subsequence("a b", "xa yb"));
        assert!(!is_subsequence("a b", "ab"));
    }

    #[test]
    fn test_char_type_of() {
        assert_eq!(char_type_of('/'), CharType::Slash);
        assert_eq!(char_type_of('-'), CharType::Separ);
        assert_eq!(char_type_of('_'), CharType::Separ);
        assert_eq!(char_type_of(' '), CharType::Separ);
        assert_eq!(char_type_of('.'), CharType::Dot);
        assert_eq!(char_type_of('a'), CharType::Lower);
        assert_eq!(char_type_of('Z'), CharType::Upper);
        assert_eq!(char_type_of('É'), CharType::Upper);
        assert_eq!(char_type_of('1'), CharType::Other);
        assert_eq!(char_type_of('世'), CharType::Other);
    }

    #[test]
    fn test_split_by_positions() {
        assert_eq!(split_by_positions("abc", &[]), ["abc"]);
        assert_eq!(split_by_positions("abc", &[0]), ["", "a", "bc"]);
        assert_eq!(split_by_positions("abc", &[2]), ["ab", "c"]);
        assert_eq!(
            split_by_positions("foo/bar.ts", &[0, 4, 5]),
            ["", "f", "oo/", "ba", "r.ts"]
        );
        assert_eq!(
            split_by_positions("Hello, 世界", &[0, 7]),
            ["", "H", "ello, ", "世", "界"]
        );
        assert_eq!(split_by_positions("", &[]), [""]);
    }

    #[test]
    fn test_wrap_matches() {
        assert_eq!(wrap_matches("axbycz", &[0, 2, 4]), "[a]x[b]y[c]z");
        assert_eq!(wrap_matches("abc", &[0, 1]), "[a][b]c");
        assert_eq!(wrap_matches("Hello, 世界", &[0, 7]), "[H]ello, [世]界");
    }
}
