//! Rank lines read from stdin against a pattern and highlight the matches.
//!
//! ```text
//! $ find . -type f | fz --top-k 20 --limit 20 srcmain
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::debug;
use termion::style::{Invert, Reset};

use fuzzy_radix::util::split_by_positions;
use fuzzy_radix::{FuzzyMatcher, Ranked, Ranker, ScoreConfig, ScoreValue, Scorer, WhitespacePolicy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scheme {
    /// i8 scores in [-127, 127]
    Compact,
    /// i16 scores in [-32767, 32767]
    Standard,
    /// u16 scores derived from --tolerance
    Quantized,
    /// unbounded f64 scores
    Float,
}

#[derive(Debug, Parser)]
#[command(name = "fz")]
#[command(about = "Fuzzy-rank lines from stdin against a pattern")]
struct Args {
    /// Pattern to look for, matched case-insensitively as a subsequence
    pattern: String,

    /// Score parameterization
    #[arg(long, value_enum, default_value = "standard")]
    scheme: Scheme,

    /// Gap penalty knob of the quantized scheme
    #[arg(long, default_value_t = ScoreConfig::<u16>::DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Highlight the matched characters of the best N lines
    #[arg(long, default_value_t = 100)]
    top_k: usize,

    /// Print at most N lines
    #[arg(long)]
    limit: Option<usize>,

    /// Treat whitespace in the pattern as always satisfied
    #[arg(long)]
    ignore_whitespace: bool,

    /// Lines longer than this (in chars) are listed last, unscored
    #[arg(long, default_value_t = fuzzy_radix::config::DEFAULT_MAX_HAYSTACK_LEN)]
    max_len: usize,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn configure<S: ScoreValue>(config: ScoreConfig<S>, args: &Args) -> ScoreConfig<S> {
    let whitespace = if args.ignore_whitespace {
        WhitespacePolicy::Ignore
    } else {
        WhitespacePolicy::Literal
    };
    config.max_haystack_len(args.max_len).whitespace(whitespace)
}

fn run<S: ScoreValue>(config: ScoreConfig<S>, args: &Args, lines: &[String]) -> Result<()> {
    let scorer = Scorer::new(config).context("invalid score parameters")?;
    let prepared = scorer.prepare_all(lines);

    let mut ranker = Ranker::new(scorer).positions_top_k(args.top_k);
    if let Some(limit) = args.limit {
        ranker = ranker.limit(limit);
    }

    let needle = ranker.matcher().needle(&args.pattern);
    let results = ranker.par_rank_prepared(&needle, &prepared);
    debug!("{} of {} lines matched {:?}", results.len(), lines.len(), args.pattern);

    let mut out = io::stdout().lock();
    for ranked in results {
        writeln!(out, "{:8}: {}", ranked.score, highlight(&ranked))?;
    }
    Ok(())
}

fn highlight<S>(ranked: &Ranked<'_, S>) -> String {
    let Some(positions) = &ranked.positions else {
        return ranked.text.to_string();
    };

    let mut ret = String::new();
    for (idx, segment) in split_by_positions(ranked.text, positions).into_iter().enumerate() {
        if idx % 2 == 1 {
            ret.push_str(&format!("{}{}{}", Invert, segment, Reset));
        } else {
            ret.push_str(segment);
        }
    }
    ret
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let lines = io::stdin()
        .lock()
        .lines()
        .collect::<io::Result<Vec<String>>>()
        .context("failed to read candidates from stdin")?;

    match args.scheme {
        Scheme::Compact => run(configure(ScoreConfig::compact(), &args), &args, &lines),
        Scheme::Standard => run(configure(ScoreConfig::standard(), &args), &args, &lines),
        Scheme::Quantized => run(
            configure(ScoreConfig::quantized_for_len(args.tolerance, args.max_len), &args),
            &args,
            &lines,
        ),
        Scheme::Float => run(configure(ScoreConfig::float(), &args), &args, &lines),
    }
}
