//! The tuning surface of the score engine.
//!
//! Every constant the recurrence reads lives in [`ScoreConfig`]. Four presets
//! are provided, trading score resolution against storage width:
//!
//! | preset                          | storage | range          |
//! |---------------------------------|---------|----------------|
//! | [`ScoreConfig::compact`]        | `i8`    | `[-127, 127]`  |
//! | [`ScoreConfig::standard`]       | `i16`   | `[-32767, 32767]` |
//! | [`ScoreConfig::quantized`]      | `u16`   | `[0, 65535]`   |
//! | [`ScoreConfig::float`]          | `f64`   | unbounded      |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::score::ScoreValue;

/// Candidates longer than this are matched but not scored.
pub const DEFAULT_MAX_HAYSTACK_LEN: usize = 1024;

/// How whitespace inside a query is treated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WhitespacePolicy {
    /// Whitespace is an ordinary character that has to be matched.
    #[default]
    Literal,
    /// Whitespace is always satisfied: it is dropped from the query.
    Ignore,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreConfig<S> {
    /// "No usable score": empty input or oversized candidate.
    pub score_min: S,
    /// Returned when needle and haystack have the same length.
    pub score_max: S,

    /// Per character skipped before the first match.
    pub gap_leading: f64,
    /// Per character skipped after the last needle character matched.
    pub gap_trailing: f64,
    /// Per character skipped between two matched needle characters.
    pub gap_inner: f64,

    /// Extending a run. Must exceed every structural bonus so that an
    /// unbroken run outranks any single boundary match.
    pub match_consecutive: f64,
    /// Match right after `/` (and at the very start of the candidate).
    pub match_slash: f64,
    /// Match right after `-`, `_` or a space.
    pub match_word: f64,
    /// Uppercase match right after a lowercase character.
    pub match_capital: f64,
    /// Match right after `.`.
    pub match_dot: f64,

    /// Added to every first-character match. Keeps scores off `score_min`
    /// when the storage type is unsigned; ordering is unaffected.
    pub base_offset: f64,

    pub max_haystack_len: usize,
    pub whitespace: WhitespacePolicy,
}

impl ScoreConfig<i8> {
    /// Signed 8-bit scores with fractional gap penalties.
    pub fn compact() -> Self {
        Self {
            score_min: -127,
            score_max: 127,
            gap_leading: -0.05,
            gap_trailing: -0.05,
            gap_inner: -0.1,
            match_consecutive: 10.0,
            match_slash: 9.0,
            match_word: 8.0,
            match_capital: 7.0,
            match_dot: 6.0,
            base_offset: 0.0,
            max_haystack_len: DEFAULT_MAX_HAYSTACK_LEN,
            whitespace: WhitespacePolicy::Literal,
        }
    }
}

impl ScoreConfig<i16> {
    /// Signed 16-bit scores. The crate-wide default.
    pub fn standard() -> Self {
        Self {
            score_min: -32767,
            score_max: 32767,
            gap_leading: -0.5,
            gap_trailing: -0.5,
            gap_inner: -1.0,
            match_consecutive: 100.0,
            match_slash: 90.0,
            match_word: 80.0,
            match_capital: 70.0,
            match_dot: 60.0,
            base_offset: 0.0,
            max_haystack_len: DEFAULT_MAX_HAYSTACK_LEN,
            whitespace: WhitespacePolicy::Literal,
        }
    }
}

impl ScoreConfig<u16> {
    pub const DEFAULT_TOLERANCE: f64 = 0.3;

    /// Unsigned 16-bit scores derived from a single `tolerance` knob.
    pub fn quantized(tolerance: f64) -> Self {
        Self::quantized_for_len(tolerance, DEFAULT_MAX_HAYSTACK_LEN)
    }

    /// Like [`quantized`](Self::quantized) for candidates of up to
    /// `max_haystack_len` chars.
    ///
    /// The base offset covers the widest gap penalty on every char of the
    /// longest scorable candidate plus one truncation per needle row, so a
    /// real alignment never saturates at `score_min`.
    pub fn quantized_for_len(tolerance: f64, max_haystack_len: usize) -> Self {
        let consecutive = (200.0 * tolerance).trunc();
        Self {
            score_min: 0,
            score_max: u16::MAX,
            gap_leading: -tolerance,
            gap_trailing: -tolerance,
            gap_inner: -2.0 * tolerance,
            match_consecutive: consecutive,
            match_slash: (consecutive * 0.9).trunc(),
            match_word: (consecutive * 0.8).trunc(),
            match_capital: (consecutive * 0.7).trunc(),
            match_dot: (consecutive * 0.6).trunc(),
            base_offset: 1.0 + (max_haystack_len as f64 * (1.0 + 2.0 * tolerance)).ceil(),
            max_haystack_len,
            whitespace: WhitespacePolicy::Literal,
        }
    }
}

impl ScoreConfig<f64> {
    /// Unbounded floating point scores.
    pub fn float() -> Self {
        Self {
            score_min: f64::NEG_INFINITY,
            score_max: f64::INFINITY,
            gap_leading: -0.005,
            gap_trailing: -0.005,
            gap_inner: -0.01,
            match_consecutive: 1.0,
            match_slash: 0.9,
            match_word: 0.8,
            match_capital: 0.7,
            match_dot: 0.6,
            base_offset: 0.0,
            max_haystack_len: DEFAULT_MAX_HAYSTACK_LEN,
            whitespace: WhitespacePolicy::Literal,
        }
    }
}

impl Default for ScoreConfig<i8> {
    fn default() -> Self {
        Self::compact()
    }
}

impl Default for ScoreConfig<i16> {
    fn default() -> Self {
        Self::standard()
    }
}

impl Default for ScoreConfig<u16> {
    fn default() -> Self {
        Self::quantized(Self::DEFAULT_TOLERANCE)
    }
}

impl Default for ScoreConfig<f64> {
    fn default() -> Self {
        Self::float()
    }
}

impl<S: ScoreValue> ScoreConfig<S> {
    pub fn max_haystack_len(mut self, len: usize) -> Self {
        self.max_haystack_len = len;
        self
    }

    pub fn whitespace(mut self, policy: WhitespacePolicy) -> Self {
        self.whitespace = policy;
        self
    }

    /// Check the orderings the ranking quality depends on.
    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.score_min.to_f64(), self.score_max.to_f64());
        if !(min < max) {
            return Err(ConfigError::EmptyRange { min, max });
        }

        for (name, value) in [
            ("gap_leading", self.gap_leading),
            ("gap_trailing", self.gap_trailing),
            ("gap_inner", self.gap_inner),
        ] {
            if !(value <= 0.0) {
                return Err(ConfigError::PositiveGap { name, value });
            }
        }

        let ordered = self.match_slash > self.match_word
            && self.match_word > self.match_capital
            && self.match_capital > self.match_dot
            && self.match_dot > 0.0;
        if !ordered {
            return Err(ConfigError::BonusOrder {
                slash: self.match_slash,
                word: self.match_word,
                capital: self.match_capital,
                dot: self.match_dot,
            });
        }

        if !(self.match_consecutive > self.match_slash) {
            return Err(ConfigError::ConsecutiveTooSmall {
                consecutive: self.match_consecutive,
                slash: self.match_slash,
            });
        }

        if self.max_haystack_len == 0 {
            return Err(ConfigError::ZeroLengthBound);
        }

        // a first match followed by the widest gap on every other char
        let widest_gap = self
            .gap_leading
            .min(self.gap_trailing)
            .min(self.gap_inner)
            .abs();
        let required = min + self.max_haystack_len as f64 * widest_gap;
        if !(self.base_offset > required) {
            return Err(ConfigError::OffsetTooSmall {
                base_offset: self.base_offset,
                required,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(ScoreConfig::compact().validate(), Ok(()));
        assert_eq!(ScoreConfig::standard().validate(), Ok(()));
        assert_eq!(ScoreConfig::<u16>::default().validate(), Ok(()));
        assert_eq!(ScoreConfig::float().validate(), Ok(()));
    }

    #[test]
    fn test_quantized_constants() {
        let config = ScoreConfig::quantized(0.3);
        assert_eq!(config.match_consecutive, 60.0);
        assert_eq!(config.match_slash, 54.0);
        assert_eq!(config.match_word, 48.0);
        assert_eq!(config.match_capital, 42.0);
        assert_eq!(config.match_dot, 36.0);
        assert_eq!(config.base_offset, 1640.0);
        assert_eq!(config.gap_inner, -0.6);
    }

    #[test]
    fn test_quantized_offset_follows_length_bound() {
        let config = ScoreConfig::quantized_for_len(0.3, 2048);
        assert_eq!(config.max_haystack_len, 2048);
        assert_eq!(config.base_offset, 3278.0);
        assert_eq!(config.validate(), Ok(()));

        // the offset sized for 1024 chars does not cover 4096
        let config = ScoreConfig::<u16>::default().max_haystack_len(4096);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OffsetTooSmall { .. })
        ));

        let config = ScoreConfig {
            base_offset: 309.0,
            ..ScoreConfig::<u16>::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OffsetTooSmall { .. })
        ));
    }

    #[test]
    fn test_builders() {
        let config = ScoreConfig::standard()
            .max_haystack_len(64)
            .whitespace(WhitespacePolicy::Ignore);
        assert_eq!(config.max_haystack_len, 64);
        assert_eq!(config.whitespace, WhitespacePolicy::Ignore);
    }

    #[test]
    fn test_validate_rejects_broken_orderings() {
        let config = ScoreConfig {
            match_word: 95.0,
            ..ScoreConfig::standard()
        };
        assert!(matches!(config.validate(), Err(ConfigError::BonusOrder { .. })));

        let config = ScoreConfig {
            match_consecutive: 90.0,
            ..ScoreConfig::standard()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ConsecutiveTooSmall { .. })
        ));

        let config = ScoreConfig {
            gap_inner: 1.0,
            ..ScoreConfig::standard()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PositiveGap {
                name: "gap_inner",
                value: 1.0
            })
        );

        let config = ScoreConfig {
            score_min: 10,
            score_max: 10,
            ..ScoreConfig::standard()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyRange { .. })));

        let config = ScoreConfig::standard().max_haystack_len(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroLengthBound));
    }
}
