//! Storage types for scores.
//!
//! The recurrence runs in `f64` and every stored cell is quantized into a
//! `ScoreValue`: truncated toward zero for integral types, then clamped into
//! the configured `[score_min, score_max]` range.

use std::fmt::{Debug, Display};

pub trait ScoreValue: Copy + PartialEq + PartialOrd + Debug + Display + Send + Sync + 'static {
    /// Whether values are truncated to whole numbers before being stored.
    const INTEGRAL: bool;

    /// Convert an already truncated and clamped value.
    fn from_f64(value: f64) -> Self;

    fn to_f64(self) -> f64;
}

macro_rules! impl_integral_score {
    ($($t:ty),*) => {
        $(
            impl ScoreValue for $t {
                const INTEGRAL: bool = true;

                #[inline]
                fn from_f64(value: f64) -> Self {
                    // `as` saturates at the type bounds
                    value as $t
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_integral_score!(i8, i16, i32, u16);

impl ScoreValue for f64 {
    const INTEGRAL: bool = false;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Truncate (for integral storage) and saturate `value` into `[min, max]`.
#[inline]
pub(crate) fn quantize<S: ScoreValue>(value: f64, min: f64, max: f64) -> S {
    let value = if S::INTEGRAL { value.trunc() } else { value };
    S::from_f64(value.max(min).min(max))
}

/// Descending order for sorting; incomparable values are treated as equal.
#[inline]
pub(crate) fn cmp_desc<S: ScoreValue>(a: &S, b: &S) -> std::cmp::Ordering {
    b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_truncates_toward_zero() {
        assert_eq!(quantize::<i16>(-0.5, -32767.0, 32767.0), 0);
        assert_eq!(quantize::<i16>(-1.5, -32767.0, 32767.0), -1);
        assert_eq!(quantize::<i16>(176.5, -32767.0, 32767.0), 176);
        assert_eq!(quantize::<f64>(176.5, f64::NEG_INFINITY, f64::INFINITY), 176.5);
    }

    #[test]
    fn test_quantize_saturates() {
        assert_eq!(quantize::<i8>(300.0, -127.0, 127.0), 127);
        assert_eq!(quantize::<i8>(-32768.5, -127.0, 127.0), -127);
        assert_eq!(quantize::<u16>(-0.6, 0.0, 65535.0), 0);
        assert_eq!(quantize::<i16>(f64::NEG_INFINITY, -32767.0, 32767.0), -32767);
    }

    #[test]
    fn test_cmp_desc() {
        let mut scores = vec![3i16, -1, 7, 0];
        scores.sort_by(cmp_desc);
        assert_eq!(scores, [7, 3, 0, -1]);

        let mut scores = vec![0.5f64, f64::NEG_INFINITY, 1.0];
        scores.sort_by(cmp_desc);
        assert_eq!(scores, [1.0, 0.5, f64::NEG_INFINITY]);
    }
}
