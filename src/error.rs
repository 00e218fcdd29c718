use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("score range is empty: min {min} >= max {max}")]
    EmptyRange { min: f64, max: f64 },
    #[error("gap penalty `{name}` must not be positive (got {value})")]
    PositiveGap { name: &'static str, value: f64 },
    #[error(
        "structural bonuses must satisfy slash > word > capital > dot > 0 \
         (got slash {slash}, word {word}, capital {capital}, dot {dot})"
    )]
    BonusOrder {
        slash: f64,
        word: f64,
        capital: f64,
        dot: f64,
    },
    #[error("consecutive match bonus {consecutive} must exceed the slash bonus {slash}")]
    ConsecutiveTooSmall { consecutive: f64, slash: f64 },
    #[error("haystack length bound must be at least 1")]
    ZeroLengthBound,
    #[error("base offset {base_offset} must exceed {required} to cover the longest gap run")]
    OffsetTooSmall { base_offset: f64, required: f64 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
