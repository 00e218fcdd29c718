//! The scorer: a parameterization plus per-thread scratch buffers.
//!
//! # Example:
//! ```
//! use fuzzy_radix::FuzzyMatcher;
//! use fuzzy_radix::matcher::Scorer;
//!
//! let scorer = Scorer::<i16>::default();
//! let needle = scorer.needle("fb");
//! let haystack = scorer.haystack("foo/bar.ts");
//!
//! assert!(scorer.is_match(&needle, &haystack));
//! let (score, positions) = scorer.score_with_positions(&needle, &haystack);
//! assert_eq!(score, scorer.score(&needle, &haystack));
//! assert_eq!(positions, [0, 4]);
//! ```

use std::cell::RefCell;

use log::debug;
use thread_local::ThreadLocal;

use crate::bonus::Haystack;
use crate::config::ScoreConfig;
use crate::engine;
use crate::error::Result;
use crate::normalize::Needle;
use crate::score::ScoreValue;
use crate::util::is_subsequence;
use crate::{FuzzyMatcher, IndexType};

/// Scores needles against haystacks under one [`ScoreConfig`].
///
/// The DP matrices and char buffers are kept per thread, so one `Scorer` can
/// be shared by any number of worker threads.
#[derive(Debug)]
pub struct Scorer<S: ScoreValue> {
    config: ScoreConfig<S>,
    use_cache: bool,

    best_cache: ThreadLocal<RefCell<Vec<S>>>,
    matched_cache: ThreadLocal<RefCell<Vec<S>>>,
    c_cache: ThreadLocal<RefCell<Vec<char>>>, // vector to store the characters of haystack
    p_cache: ThreadLocal<RefCell<Vec<char>>>, // vector to store the characters of needle
}

impl<S: ScoreValue> Default for Scorer<S>
where
    ScoreConfig<S>: Default,
{
    fn default() -> Self {
        Self::with_config(ScoreConfig::default())
    }
}

impl<S: ScoreValue> Scorer<S> {
    pub fn new(config: ScoreConfig<S>) -> Result<Self> {
        config.validate()?;
        debug!(
            "initialized scorer: range [{}, {}], max_haystack_len {}, whitespace {:?}",
            config.score_min, config.score_max, config.max_haystack_len, config.whitespace
        );
        Ok(Self::with_config(config))
    }

    fn with_config(config: ScoreConfig<S>) -> Self {
        Self {
            config,
            use_cache: true,
            best_cache: ThreadLocal::new(),
            matched_cache: ThreadLocal::new(),
            c_cache: ThreadLocal::new(),
            p_cache: ThreadLocal::new(),
        }
    }

    /// Keep the scratch buffers between calls (default) or release them
    /// after every call.
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn config(&self) -> &ScoreConfig<S> {
        &self.config
    }

    /// Prepare many candidates at once.
    pub fn prepare_all<I, T>(&self, choices: I) -> Vec<Haystack<S>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        choices
            .into_iter()
            .map(|choice| Haystack::new(choice.as_ref(), &self.config))
            .collect()
    }

    /// Score two raw strings; both are normalized and the bonuses computed on
    /// the fly.
    pub fn score_str(&self, needle: &str, haystack: &str) -> S {
        self.score(&self.needle(needle), &self.haystack(haystack))
    }

    pub fn score_str_with_positions(&self, needle: &str, haystack: &str) -> (S, Vec<IndexType>) {
        self.score_with_positions(&self.needle(needle), &self.haystack(haystack))
    }

    fn run(
        &self,
        needle: &Needle,
        haystack: &Haystack<S>,
        positions: Option<&mut Vec<IndexType>>,
    ) -> S {
        debug_assert!(
            is_subsequence(needle.as_str(), haystack.normalized()),
            "{:?} is not a subsequence of {:?}",
            needle.as_str(),
            haystack.normalized()
        );

        let mut needle_chars = self
            .p_cache
            .get_or(|| RefCell::new(Vec::new()))
            .borrow_mut();
        let mut haystack_chars = self
            .c_cache
            .get_or(|| RefCell::new(Vec::new()))
            .borrow_mut();
        let mut best = self
            .best_cache
            .get_or(|| RefCell::new(Vec::new()))
            .borrow_mut();
        let mut matched = self
            .matched_cache
            .get_or(|| RefCell::new(Vec::new()))
            .borrow_mut();

        needle_chars.clear();
        needle_chars.extend(needle.as_str().chars());
        haystack_chars.clear();
        haystack_chars.extend(haystack.normalized().chars());

        let score = match positions {
            Some(positions) => engine::score_with_positions(
                &self.config,
                &needle_chars,
                &haystack_chars,
                haystack.bonuses(),
                &mut best,
                &mut matched,
                positions,
            ),
            None => engine::score(
                &self.config,
                &needle_chars,
                &haystack_chars,
                haystack.bonuses(),
                &mut best,
                &mut matched,
            ),
        };

        if !self.use_cache {
            // drop the allocated memory
            *best = Vec::new();
            *matched = Vec::new();
            *haystack_chars = Vec::new();
            *needle_chars = Vec::new();
        }

        score
    }
}

impl<S: ScoreValue> FuzzyMatcher for Scorer<S> {
    type Score = S;

    fn needle(&self, pattern: &str) -> Needle {
        Needle::new(pattern, self.config.whitespace)
    }

    fn haystack(&self, choice: &str) -> Haystack<S> {
        Haystack::new(choice, &self.config)
    }

    fn is_match(&self, needle: &Needle, haystack: &Haystack<S>) -> bool {
        is_subsequence(needle.as_str(), haystack.normalized())
    }

    fn score(&self, needle: &Needle, haystack: &Haystack<S>) -> S {
        self.run(needle, haystack, None)
    }

    fn score_with_positions(&self, needle: &Needle, haystack: &Haystack<S>) -> (S, Vec<IndexType>) {
        let mut positions = Vec::with_capacity(needle.len());
        let score = self.run(needle, haystack, Some(&mut positions));
        (score, positions)
    }

    fn max_haystack_len(&self) -> usize {
        self.config.max_haystack_len
    }
}
