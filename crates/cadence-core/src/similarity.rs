//! Approximate string similarity for vendor descriptions
//!
//! The clusterer only depends on the [`Scorer`] trait, so tests can swap in a
//! deterministic fake. The default implementation is [`TokenSetScorer`], an
//! order-insensitive token overlap ratio on a 0-100 scale.

use regex::Regex;
use std::collections::BTreeSet;
use tracing::warn;

/// A scored candidate returned by [`Scorer::extract`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'c> {
    pub choice: &'c str,
    pub score: u8,
}

/// Pluggable similarity capability
pub trait Scorer {
    /// Similarity of `query` and `choice` in `0..=100`
    fn score(&self, query: &str, choice: &str) -> u8;

    /// Score `query` against every choice and return the best `limit`
    /// matches, highest score first.
    ///
    /// Equal scores keep the order of `choices`.
    fn extract<'c>(&self, query: &str, choices: &'c [String], limit: usize) -> Vec<Match<'c>> {
        let scored = choices
            .iter()
            .map(|choice| Match {
                choice: choice.as_str(),
                score: self.score(query, choice),
            })
            .collect();
        best_matches(scored, limit)
    }
}

impl<F> Scorer for F
where
    F: Fn(&str, &str) -> u8,
{
    fn score(&self, query: &str, choice: &str) -> u8 {
        self(query, choice)
    }
}

fn best_matches(mut scored: Vec<Match<'_>>, limit: usize) -> Vec<Match<'_>> {
    // sort_by is stable, so ties stay in choice order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Token-set ratio scorer.
///
/// Both strings are reduced to lowercase word tokens. The shared tokens
/// and each side's leftovers are sorted and re-joined, and the best indel
/// ratio among `shared`, `shared + left`, `shared + right` is the score. A
/// description fully containing the other's tokens therefore scores 100
/// regardless of word order or extra trailing tokens.
#[derive(Debug, Clone)]
pub struct TokenSetScorer {
    non_word: Regex,
}

impl Default for TokenSetScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSetScorer {
    pub fn new() -> Self {
        Self {
            non_word: Regex::new(r"\W").expect("valid regex"),
        }
    }

    /// Drop Latin-1 supplement characters (U+0080..=U+00FF), replace
    /// non-word characters with spaces, lowercase and trim.
    ///
    /// Characters above U+00FF are kept, so CJK and other scripts still
    /// form tokens.
    pub fn preprocess(&self, s: &str) -> String {
        let kept: String = s
            .chars()
            .filter(|c| !('\u{80}'..='\u{ff}').contains(c))
            .collect();
        self.non_word
            .replace_all(&kept, " ")
            .to_lowercase()
            .trim()
            .to_string()
    }

    /// Token-set ratio of two already preprocessed strings
    ///
    /// An empty side scores 0, even against another empty string.
    pub fn token_set_ratio(&self, a: &str, b: &str) -> u8 {
        if a.is_empty() || b.is_empty() {
            return 0;
        }
        if a == b {
            return 100;
        }

        let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
        let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

        let sect = join_tokens(tokens_a.intersection(&tokens_b).copied());
        let diff_ab = join_tokens(tokens_a.difference(&tokens_b).copied());
        let diff_ba = join_tokens(tokens_b.difference(&tokens_a).copied());

        let combined_ab = format!("{} {}", sect, diff_ab).trim().to_string();
        let combined_ba = format!("{} {}", sect, diff_ba).trim().to_string();

        [
            ratio(&sect, &combined_ab),
            ratio(&sect, &combined_ba),
            ratio(&combined_ab, &combined_ba),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

impl Scorer for TokenSetScorer {
    fn score(&self, query: &str, choice: &str) -> u8 {
        self.token_set_ratio(&self.preprocess(query), &self.preprocess(choice))
    }

    fn extract<'c>(&self, query: &str, choices: &'c [String], limit: usize) -> Vec<Match<'c>> {
        let processed_query = self.preprocess(query);
        if processed_query.is_empty() {
            warn!(
                "Query '{}' reduced to an empty string, matches will score 0",
                query
            );
        }

        let scored = choices
            .iter()
            .map(|choice| Match {
                choice: choice.as_str(),
                score: self.token_set_ratio(&processed_query, &self.preprocess(choice)),
            })
            .collect();
        best_matches(scored, limit)
    }
}

fn join_tokens<'t>(tokens: impl Iterator<Item = &'t str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

/// Indel similarity `2 * LCS / (len_a + len_b)` over characters, scaled to
/// 0-100 and rounded half to even.
fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let lcs = longest_common_subsequence(&a, &b);
    let total = (a.len() + b.len()) as f64;
    (100.0 * 2.0 * lcs as f64 / total).round_ties_even() as u8
}

fn longest_common_subsequence<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
