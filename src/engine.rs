//! The score recurrence and the backtracking that recovers positions.
//!
//! Given needle `n` (i) and haystack `h` (j) we maintain 2 score matrices:
//!
//! ```text
//! D[i][j] = best score of an alignment of n[..=i] in h[..=j] that ends with
//!           n[i] matched against h[j], or score_min if they differ
//! M[i][j] = best score of an alignment of n[..=i] in h[..=j], h[j] matched
//!           or not
//! ```
//!
//! with
//!
//! ```text
//! D[0][j] = j * gap_leading + bonus[j] + base_offset
//! D[i][j] = max(M[i-1][j-1] + bonus[j], D[i-1][j-1] + consecutive)
//! M[i][j] = max(D[i][j], M[i][j-1] + gap)
//! ```
//!
//! where `gap` is `gap_trailing` on the last needle row and `gap_inner`
//! otherwise. Starting a new run pays the structural bonus, extending a run
//! pays the consecutive bonus instead; they never stack.
//!
//! The running `M[i][j-1] + gap` term is carried in `f64`. Every stored cell
//! is quantized (see [`quantize`]) so integral storage gives reproducible
//! scores.

use crate::config::ScoreConfig;
use crate::matrix::ScoreMatrix;
use crate::score::{quantize, ScoreValue};
use crate::IndexType;

/// Scores decided without running the DP.
///
/// `n > m` cannot pass the subsequence check; it is answered with
/// `score_min` instead of being run through the recurrence.
fn fast_path<S: ScoreValue>(config: &ScoreConfig<S>, n: usize, m: usize) -> Option<S> {
    if n == 0 || m == 0 {
        return Some(config.score_min);
    }

    if n == m {
        // a subsequence of the same length is the haystack itself
        return Some(config.score_max);
    }

    if m > config.max_haystack_len || n > m {
        return Some(config.score_min);
    }

    None
}

/// Fill `best` (M) and `matched` (D) row by row.
fn build_score_matrix<S: ScoreValue>(
    config: &ScoreConfig<S>,
    needle: &[char],
    haystack: &[char],
    bonuses: &[S],
    best: &mut ScoreMatrix<S>,
    matched: &mut ScoreMatrix<S>,
) {
    let n = needle.len();
    let (min, max) = (config.score_min.to_f64(), config.score_max.to_f64());

    for (i, &n_ch) in needle.iter().enumerate() {
        let gap = if i == n - 1 {
            config.gap_trailing
        } else {
            config.gap_inner
        };
        let mut prev_score = min;

        for (j, &h_ch) in haystack.iter().enumerate() {
            if n_ch == h_ch {
                let bonus = bonuses[j].to_f64();
                let score = if i == 0 {
                    j as f64 * config.gap_leading + bonus + config.base_offset
                } else if j > 0 {
                    // a cell at score_min holds no alignment and is never extended
                    let mut score = min;
                    let best_prev = best.get(i - 1, j - 1);
                    if best_prev > config.score_min {
                        score = score.max(best_prev.to_f64() + bonus);
                    }
                    let matched_prev = matched.get(i - 1, j - 1);
                    if matched_prev > config.score_min {
                        score = score.max(matched_prev.to_f64() + config.match_consecutive);
                    }
                    score
                } else {
                    min
                };
                matched.set(i, j, quantize(score, min, max));
                prev_score = f64::max(score, prev_score + gap);
            } else {
                matched.set(i, j, config.score_min);
                prev_score += gap;
            }

            best.set(i, j, quantize(prev_score, min, max));
        }
    }
}

/// Walk the full matrices from the bottom-right corner, picking for every
/// needle char the latest column that lies on an optimal path.
///
/// Only called when the final score is above `score_min`, so every row has a
/// live cell left of the column picked for the row below.
fn backtrack<S: ScoreValue>(
    config: &ScoreConfig<S>,
    best: &ScoreMatrix<S>,
    matched: &ScoreMatrix<S>,
    positions: &mut Vec<IndexType>,
) {
    let n = best.rows;
    let (min, max) = (config.score_min.to_f64(), config.score_max.to_f64());

    positions.clear();
    positions.resize(n, 0 as IndexType);

    let mut match_required = false;
    // columns `..j` are still available
    let mut j = best.cols;
    for i in (0..n).rev() {
        let mut found = false;
        while j > 0 {
            j -= 1;
            let score = matched.get(i, j);
            if score > config.score_min && (match_required || score == best.get(i, j)) {
                // the optimum here came from extending a run, so the previous
                // needle char must sit right before this one
                match_required = i > 0
                    && j > 0
                    && matched.get(i - 1, j - 1) > config.score_min
                    && best.get(i, j)
                        == quantize::<S>(
                            matched.get(i - 1, j - 1).to_f64() + config.match_consecutive,
                            min,
                            max,
                        );
                positions[i] = j as IndexType;
                found = true;
                break;
            }
        }
        debug_assert!(found, "no column left for needle char {}", i);
    }
}

/// Leftmost positions, used when the DP is skipped.
fn greedy_positions(needle: &[char], haystack: &[char], positions: &mut Vec<IndexType>) {
    positions.clear();
    let mut j = 0;
    for &ch in needle {
        match haystack[j..].iter().position(|&h_ch| h_ch == ch) {
            Some(offset) => {
                positions.push((j + offset) as IndexType);
                j += offset + 1;
            }
            None => break,
        }
    }
}

/// Best score of `needle` in `haystack`, keeping only two rows of history.
pub(crate) fn score<S: ScoreValue>(
    config: &ScoreConfig<S>,
    needle: &[char],
    haystack: &[char],
    bonuses: &[S],
    best_buf: &mut Vec<S>,
    matched_buf: &mut Vec<S>,
) -> S {
    let (n, m) = (needle.len(), haystack.len());
    if let Some(score) = fast_path(config, n, m) {
        return score;
    }

    let mut best = ScoreMatrix::new(best_buf, n, m, true, config.score_min);
    let mut matched = ScoreMatrix::new(matched_buf, n, m, true, config.score_min);
    build_score_matrix(config, needle, haystack, bonuses, &mut best, &mut matched);

    best.get(n - 1, m - 1)
}

/// Same score as [`score`], also writing the matched haystack index of every
/// needle char into `positions`.
///
/// When the DP is skipped (equal lengths, oversized haystack) or every
/// alignment saturated at `score_min`, the positions are the leftmost
/// occurrences, which for equal lengths is `0..n`.
pub(crate) fn score_with_positions<S: ScoreValue>(
    config: &ScoreConfig<S>,
    needle: &[char],
    haystack: &[char],
    bonuses: &[S],
    best_buf: &mut Vec<S>,
    matched_buf: &mut Vec<S>,
    positions: &mut Vec<IndexType>,
) -> S {
    let (n, m) = (needle.len(), haystack.len());
    if let Some(score) = fast_path(config, n, m) {
        greedy_positions(needle, haystack, positions);
        return score;
    }

    let mut best = ScoreMatrix::new(best_buf, n, m, false, config.score_min);
    let mut matched = ScoreMatrix::new(matched_buf, n, m, false, config.score_min);
    build_score_matrix(config, needle, haystack, bonuses, &mut best, &mut matched);

    let score = best.get(n - 1, m - 1);
    if score > config.score_min {
        backtrack(config, &best, &matched, positions);
    } else {
        greedy_positions(needle, haystack, positions);
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::compute_bonuses;
    use crate::normalize::normalize;

    fn run<S: ScoreValue>(
        config: &ScoreConfig<S>,
        needle: &str,
        haystack: &str,
    ) -> (S, S, Vec<IndexType>) {
        let needle: Vec<char> = normalize(needle).chars().collect();
        let bonuses = compute_bonuses(haystack, config);
        let haystack: Vec<char> = normalize(haystack).chars().collect();

        let (mut best, mut matched) = (Vec::new(), Vec::new());
        let plain = score(config, &needle, &haystack, &bonuses, &mut best, &mut matched);
        let mut positions = Vec::new();
        let full = score_with_positions(
            config,
            &needle,
            &haystack,
            &bonuses,
            &mut best,
            &mut matched,
            &mut positions,
        );
        (plain, full, positions)
    }

    #[test]
    fn test_fast_paths() {
        let config = ScoreConfig::standard();
        assert_eq!(run(&config, "", "abc").0, -32767);
        assert_eq!(run(&config, "", "").0, -32767);
        assert_eq!(run(&config, "abc", "ABC"), (32767, 32767, vec![0, 1, 2]));

        let long = format!("a{}b", "x".repeat(1100));
        let (plain, full, positions) = run(&config, "ab", &long);
        assert_eq!((plain, full), (-32767, -32767));
        assert_eq!(positions, [0, 1101]);
    }

    #[test]
    fn test_known_scores_standard() {
        let config = ScoreConfig::standard();
        assert_eq!(run(&config, "fb", "foo/bar.ts"), (174, 174, vec![0, 4]));
        assert_eq!(run(&config, "fb", "fizzbuzz"), (85, 85, vec![0, 4]));
        assert_eq!(run(&config, "fb", "xfby"), (99, 99, vec![1, 2]));
        assert_eq!(run(&config, "gc", "getContent"), (155, 155, vec![0, 3]));
    }

    #[test]
    fn test_known_scores_other_presets() {
        assert_eq!(run(&ScoreConfig::compact(), "fb", "foo/bar.ts").0, 16);
        assert_eq!(run(&ScoreConfig::compact(), "fb", "xfby").0, 9);
        assert_eq!(run(&ScoreConfig::<u16>::default(), "fb", "foo/bar.ts").0, 1744);
        assert_eq!(run(&ScoreConfig::<u16>::default(), "fb", "xfby").0, 1698);

        let (plain, full, _) = run(&ScoreConfig::float(), "fb", "foo/bar.ts");
        assert!((plain - 1.745).abs() < 1e-9);
        assert_eq!(plain, full);
    }

    #[test]
    fn test_backtrack_follows_runs() {
        let config = ScoreConfig::standard();
        // the bonus on the leading `a` loses against the unbroken `abc` run
        assert_eq!(run(&config, "abc", "axbxcabc"), (198, 198, vec![5, 6, 7]));
        // `b` is taken right after `a` because the run beats the later `b`
        assert_eq!(run(&config, "ab", "abab").2, [0, 1]);
    }

    #[test]
    fn test_backtrack_prefers_latest_on_ties() {
        let config = ScoreConfig::standard();
        assert_eq!(run(&config, "a", "xaxa"), (-1, -1, vec![3]));
    }

    #[test]
    fn test_unsigned_long_gaps() {
        let config = ScoreConfig::<u16>::default();
        let haystack = format!("baaa{}cb_bb{}ab", "x".repeat(700), "x".repeat(80));
        assert_eq!(haystack.chars().count(), 791);
        assert_eq!(
            run(&config, "abbbb", &haystack),
            (1276, 1276, vec![3, 705, 707, 708, 790])
        );

        // the wider gap still costs something
        let near = run(&config, "ab", &format!("a{}b", "x".repeat(600)));
        let far = run(&config, "ab", &format!("a{}b", "x".repeat(700)));
        assert_eq!((near.0, far.0), (1334, 1274));
        assert_eq!(far.2, [0, 701]);
    }

    #[test]
    fn test_saturated_alignment_is_not_extended() {
        // no offset: the gap drives the only alignment down to score_min
        let config = ScoreConfig {
            base_offset: 0.0,
            ..ScoreConfig::<u16>::default()
        };
        let haystack = format!("a{}b", "x".repeat(200));
        assert_eq!(run(&config, "ab", &haystack), (0, 0, vec![0, 201]));

        let config = ScoreConfig {
            base_offset: 309.0,
            ..ScoreConfig::<u16>::default()
        };
        let haystack = format!("baaa{}cb_bb{}ab", "x".repeat(700), "x".repeat(80));
        assert_eq!(run(&config, "abbbb", &haystack), (0, 0, vec![1, 705, 707, 708, 790]));
    }

    #[test]
    fn test_compressed_and_full_agree() {
        for config in [ScoreConfig::standard(), ScoreConfig::standard().max_haystack_len(8)] {
            for (needle, haystack) in [
                ("ab", "aoo_boo"),
                ("cc", "camel case"),
                ("date", "Data.Text.Lazy"),
                ("ast", "INT_FAST16_MAX"),
                ("print", "sprintf"),
            ] {
                let (plain, full, positions) = run(&config, needle, haystack);
                assert_eq!(plain, full, "{} in {}", needle, haystack);
                assert_eq!(positions.len(), needle.len());
            }
        }
    }
}
