//! Filter, score and sort a collection of candidates against one query.

use std::time::Instant;

use log::{debug, trace};
use rayon::prelude::*;

use crate::bonus::Haystack;
use crate::normalize::Needle;
use crate::score::cmp_desc;
use crate::{FuzzyMatcher, IndexType};

/// One matched candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<'a, S> {
    /// Index of the candidate in the input collection.
    pub index: usize,
    pub text: &'a str,
    pub score: S,
    /// Matched char indices, only filled for the best `positions_top_k`.
    pub positions: Option<Vec<IndexType>>,
    /// Longer than the matcher's length bound: matched but not scored.
    pub oversized: bool,
}

/// Ranks candidates with a [`FuzzyMatcher`].
///
/// Candidates failing the subsequence check are dropped without being scored.
/// Results are sorted by descending score, every oversized candidate after
/// every scored one. Equal scores keep their input order.
#[derive(Debug)]
pub struct Ranker<M> {
    matcher: M,
    positions_top_k: usize,
    limit: Option<usize>,
}

impl<M: FuzzyMatcher> Ranker<M> {
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            positions_top_k: 0,
            limit: None,
        }
    }

    /// Recover match positions for the best `k` results.
    pub fn positions_top_k(mut self, k: usize) -> Self {
        self.positions_top_k = k;
        self
    }

    /// Keep at most `limit` results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Rank raw strings. Each one is prepared on the fly; only matches are
    /// kept around for scoring.
    pub fn rank<'a, T: AsRef<str>>(
        &self,
        needle: &str,
        haystacks: &'a [T],
    ) -> Vec<Ranked<'a, M::Score>> {
        let start = Instant::now();
        let needle = self.matcher.needle(needle);

        let matched: Vec<(usize, &'a str, Haystack<M::Score>)> = haystacks
            .iter()
            .enumerate()
            .filter_map(|(index, text)| {
                let text = text.as_ref();
                let haystack = self.matcher.haystack(text);
                self.matcher
                    .is_match(&needle, &haystack)
                    .then_some((index, text, haystack))
            })
            .collect();

        let entries = matched
            .iter()
            .map(|(index, text, haystack)| {
                (self.score_one(&needle, *index, *text, haystack), haystack)
            })
            .collect();

        self.finish(&needle, entries, haystacks.len(), start)
    }

    /// Rank candidates prepared with [`FuzzyMatcher::haystack`].
    pub fn rank_prepared<'a>(
        &self,
        needle: &Needle,
        haystacks: &'a [Haystack<M::Score>],
    ) -> Vec<Ranked<'a, M::Score>> {
        let start = Instant::now();
        let entries = haystacks
            .iter()
            .enumerate()
            .filter(|(_, haystack)| self.matcher.is_match(needle, haystack))
            .map(|(index, haystack)| {
                (self.score_one(needle, index, haystack.text(), haystack), haystack)
            })
            .collect();

        self.finish(needle, entries, haystacks.len(), start)
    }

    /// [`rank_prepared`](Self::rank_prepared) with the filtering and scoring
    /// spread over rayon's thread pool. The result is identical.
    pub fn par_rank_prepared<'a>(
        &self,
        needle: &Needle,
        haystacks: &'a [Haystack<M::Score>],
    ) -> Vec<Ranked<'a, M::Score>> {
        let start = Instant::now();
        let entries = haystacks
            .par_iter()
            .enumerate()
            .filter(|(_, haystack)| self.matcher.is_match(needle, haystack))
            .map(|(index, haystack)| {
                (self.score_one(needle, index, haystack.text(), haystack), haystack)
            })
            .collect();

        self.finish(needle, entries, haystacks.len(), start)
    }

    fn score_one<'a>(
        &self,
        needle: &Needle,
        index: usize,
        text: &'a str,
        haystack: &Haystack<M::Score>,
    ) -> Ranked<'a, M::Score> {
        let oversized = haystack.len() > self.matcher.max_haystack_len();
        if oversized {
            trace!(
                "candidate {} has {} chars, over the bound of {}; not scored",
                index,
                haystack.len(),
                self.matcher.max_haystack_len()
            );
        }

        Ranked {
            index,
            text,
            score: self.matcher.score(needle, haystack),
            positions: None,
            oversized,
        }
    }

    fn finish<'a>(
        &self,
        needle: &Needle,
        mut entries: Vec<(Ranked<'a, M::Score>, &Haystack<M::Score>)>,
        total: usize,
        start: Instant,
    ) -> Vec<Ranked<'a, M::Score>> {
        let matched = entries.len();

        // stable, so ties keep input order
        entries.sort_by(|(a, _), (b, _)| {
            a.oversized
                .cmp(&b.oversized)
                .then_with(|| cmp_desc(&a.score, &b.score))
        });

        if let Some(limit) = self.limit {
            entries.truncate(limit);
        }

        for (ranked, haystack) in entries.iter_mut().take(self.positions_top_k) {
            let (_score, positions) = self.matcher.score_with_positions(needle, haystack);
            ranked.positions = Some(positions);
        }

        debug!(
            "ranked {:?}: {} of {} candidates matched in {:?}",
            needle.as_str(),
            matched,
            total,
            start.elapsed()
        );

        entries.into_iter().map(|(ranked, _)| ranked).collect()
    }
}
