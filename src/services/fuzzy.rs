//! Case-insensitive string similarity on a 0..=100 scale.
//!
//! [`FuzzyMatcher`] runs every configured [`ScoringStrategy`] and keeps the
//! best score. The default set is full ratio, partial ratio and token set
//! ratio. Strategies are plain values with no shared state, so one matcher
//! can be used from any number of threads.

use std::collections::BTreeSet;

/// One way of comparing a query with a candidate. Inputs arrive lowercased.
pub trait ScoringStrategy: Send + Sync {
    fn score(&self, query: &str, candidate: &str) -> u8;
}

/// Levenshtein similarity over the whole strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullRatio;

/// Best window of the candidate, as long as the query, against the query.
/// Only kicks in when the query is strictly shorter than the candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PartialRatio;

/// Whitespace tokens compared as sorted unique sets.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenSetRatio;

pub fn ratio(left: &str, right: &str) -> u8 {
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let similarity = strsim::normalized_levenshtein(left, right);
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

impl ScoringStrategy for FullRatio {
    fn score(&self, query: &str, candidate: &str) -> u8 {
        ratio(query, candidate)
    }
}

impl ScoringStrategy for PartialRatio {
    fn score(&self, query: &str, candidate: &str) -> u8 {
        let query_len = query.chars().count();
        let candidate: Vec<char> = candidate.chars().collect();

        if query_len == 0 || query_len >= candidate.len() {
            return ratio(query, &candidate.iter().collect::<String>());
        }

        let mut best = 0;
        for window in candidate.windows(query_len) {
            let window: String = window.iter().collect();
            best = best.max(ratio(query, &window));
            if best == 100 {
                break;
            }
        }
        best
    }
}

impl ScoringStrategy for TokenSetRatio {
    fn score(&self, query: &str, candidate: &str) -> u8 {
        let left: BTreeSet<&str> = query.split_whitespace().collect();
        let right: BTreeSet<&str> = candidate.split_whitespace().collect();

        let sect = join(left.intersection(&right));
        let left_rest = join(left.difference(&right));
        let right_rest = join(right.difference(&left));

        let combined_left = combine(&sect, &left_rest);
        let combined_right = combine(&sect, &right_rest);

        ratio(&sect, &combined_left)
            .max(ratio(&sect, &combined_right))
            .max(ratio(&combined_left, &combined_right))
    }
}

fn join<'a, 'b: 'a>(tokens: impl Iterator<Item = &'a &'b str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn combine(sect: &str, rest: &str) -> String {
    format!("{sect} {rest}").trim().to_string()
}

pub struct FuzzyMatcher {
    strategies: Vec<Box<dyn ScoringStrategy>>,
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(FullRatio),
            Box::new(PartialRatio),
            Box::new(TokenSetRatio),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn ScoringStrategy>>) -> Self {
        Self { strategies }
    }

    /// Highest score any strategy gives, 0 when there are none.
    pub fn score(&self, query: &str, candidate: &str) -> u8 {
        let query = query.trim().to_lowercase();
        let candidate = candidate.trim().to_lowercase();

        self.strategies
            .iter()
            .map(|strategy| strategy.score(&query, &candidate))
            .max()
            .unwrap_or(0)
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}
