//! Per-character structural bonuses and the prepared candidate that caches
//! them.

use std::ops::Deref;

use crate::config::ScoreConfig;
use crate::normalize::normalize;
use crate::score::ScoreValue;
use crate::util::{char_type_of, CharType};

/// One bonus per char of a candidate. Never mutated after construction, so
/// it can be shared by concurrent queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Bonuses<S>(Box<[S]>);

impl<S> Bonuses<S> {
    pub fn as_slice(&self) -> &[S] {
        &self.0
    }
}

impl<S> Deref for Bonuses<S> {
    type Target = [S];

    fn deref(&self) -> &[S] {
        &self.0
    }
}

/// Compute the bonus of every char of `haystack`, in original case.
///
/// The bonus depends only on the previous char; a virtual `/` precedes the
/// first one.
pub fn compute_bonuses<S: ScoreValue>(haystack: &str, config: &ScoreConfig<S>) -> Bonuses<S> {
    let zero = S::from_f64(0.0);
    let slash = S::from_f64(config.match_slash);
    let word = S::from_f64(config.match_word);
    let dot = S::from_f64(config.match_dot);
    let capital = S::from_f64(config.match_capital);

    let mut prev_type = CharType::Slash;
    let bonuses = haystack
        .chars()
        .map(|ch| {
            let ch_type = char_type_of(ch);
            let bonus = match (prev_type, ch_type) {
                (CharType::Slash, _) => slash,
                (CharType::Separ, _) => word,
                (CharType::Dot, _) => dot,
                (CharType::Lower, CharType::Upper) => capital,
                _ => zero,
            };
            prev_type = ch_type;
            bonus
        })
        .collect();

    Bonuses(bonuses)
}

/// A candidate prepared once for repeated queries: its normalized form and
/// its bonuses.
#[derive(Debug, Clone)]
pub struct Haystack<S> {
    text: String,
    normalized: String,
    bonuses: Bonuses<S>,
}

impl<S: ScoreValue> Haystack<S> {
    pub fn new(text: &str, config: &ScoreConfig<S>) -> Self {
        Self {
            text: text.to_string(),
            normalized: normalize(text),
            bonuses: compute_bonuses(text, config),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn bonuses(&self) -> &Bonuses<S> {
        &self.bonuses
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }
}
