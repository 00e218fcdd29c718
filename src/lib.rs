//! Fuzzy subsequence matching and ranking.
//!
//! A query ("needle") matches a candidate ("haystack") when its characters
//! appear in the candidate in order, case-insensitively. Matches are scored
//! with a two-matrix dynamic program that rewards contiguous runs and
//! characters sitting on structural boundaries (after `/`, `-`, `_`, ` `, `.`
//! or on a camelCase hump), and the positions of the best alignment can be
//! recovered for highlighting.
//!
//! # Example:
//! ```
//! use fuzzy_radix::FuzzyMatcher;
//! use fuzzy_radix::matcher::Scorer;
//!
//! let scorer = Scorer::<i16>::default();
//! assert_eq!(None, scorer.fuzzy_match("abc", "abx"));
//! assert!(scorer.fuzzy_match("axbycz", "abc").is_some());
//!
//! let (_score, indices) = scorer.fuzzy_indices("getContent", "gc").unwrap();
//! assert_eq!(indices, [0, 3]);
//! ```

pub mod bonus;
pub mod config;
mod engine;
pub mod error;
pub mod matcher;
mod matrix;
pub mod normalize;
pub mod rank;
pub mod score;
pub mod util;

pub use crate::bonus::{Bonuses, Haystack};
pub use crate::config::{ScoreConfig, WhitespacePolicy};
pub use crate::error::ConfigError;
pub use crate::matcher::Scorer;
pub use crate::normalize::Needle;
pub use crate::rank::{Ranked, Ranker};
pub use crate::score::ScoreValue;

#[cfg(not(feature = "compact"))]
pub type IndexType = usize;
#[cfg(feature = "compact")]
pub type IndexType = u32;

/// The seam between the ranking layer and a scoring engine.
///
/// `score` and `score_with_positions` are only meaningful for pairs that
/// passed `is_match`; callers are expected to gate on it.
pub trait FuzzyMatcher: Send + Sync {
    type Score: ScoreValue;

    /// Normalize a query once so it can be reused against many candidates.
    fn needle(&self, pattern: &str) -> Needle;

    /// Normalize a candidate and precompute its bonuses.
    fn haystack(&self, choice: &str) -> Haystack<Self::Score>;

    /// Cheap subsequence gate.
    fn is_match(&self, needle: &Needle, haystack: &Haystack<Self::Score>) -> bool;

    fn score(&self, needle: &Needle, haystack: &Haystack<Self::Score>) -> Self::Score;

    fn score_with_positions(
        &self,
        needle: &Needle,
        haystack: &Haystack<Self::Score>,
    ) -> (Self::Score, Vec<IndexType>);

    /// Candidates longer than this are matched but not scored.
    fn max_haystack_len(&self) -> usize;

    /// fuzzy match `choice` with `pattern`, returning the score of the best
    /// alignment if `pattern` is a subsequence of `choice`
    fn fuzzy_match(&self, choice: &str, pattern: &str) -> Option<Self::Score> {
        let needle = self.needle(pattern);
        let haystack = self.haystack(choice);
        if !self.is_match(&needle, &haystack) {
            return None;
        }
        Some(self.score(&needle, &haystack))
    }

    /// fuzzy match `choice` with `pattern`, returning the score and the
    /// char indices of `choice` that were matched
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<(Self::Score, Vec<IndexType>)> {
        let needle = self.needle(pattern);
        let haystack = self.haystack(choice);
        if !self.is_match(&needle, &haystack) {
            return None;
        }
        Some(self.score_with_positions(&needle, &haystack))
    }
}

/// Normalize `text` into its comparison form, see [`normalize::normalize`].
pub fn normalize(text: &str) -> String {
    normalize::normalize(text)
}

/// Whether `needle` is a subsequence of `haystack`; both already normalized.
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
    util::is_subsequence(needle, haystack)
}

/// Structural bonuses of `haystack` under the default parameterization.
pub fn compute_bonuses(haystack: &str) -> Bonuses<i16> {
    bonus::compute_bonuses(haystack, &ScoreConfig::default())
}

/// Score `needle` against `haystack` with the default parameterization.
///
/// The pair must already satisfy [`is_subsequence`] after normalization.
pub fn score(needle: &str, haystack: &str) -> i16 {
    Scorer::<i16>::default().score_str(needle, haystack)
}

/// Like [`score`], also returning the matched char index of every needle
/// character.
pub fn score_with_positions(needle: &str, haystack: &str) -> (i16, Vec<IndexType>) {
    Scorer::<i16>::default().score_str_with_positions(needle, haystack)
}

/// Rank `haystacks` against `needle` with the default parameterization,
/// best first. Candidates that do not contain `needle` are dropped.
pub fn rank<'a, T: AsRef<str>>(needle: &str, haystacks: &'a [T]) -> Vec<(&'a str, i16)> {
    Ranker::new(Scorer::<i16>::default())
        .rank(needle, haystacks)
        .into_iter()
        .map(|ranked| (ranked.text, ranked.score))
        .collect()
}
