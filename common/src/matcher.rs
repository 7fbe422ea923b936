//! Ingredient matcher
//!
//! Resolves one free-form ingredient name to a single vocabulary entry.
//!
//! 1. Exact match after trimming and lowercasing both sides
//! 2. Matching-block similarity against the raw input, best candidate only,
//!    accepted at or above [`FUZZY_MATCH_THRESHOLD`]
//! 3. Otherwise unmatched

use crate::vocabulary::MasterVocabulary;
use serde::Serialize;
use std::collections::HashMap;

/// Minimum similarity for a fuzzy match
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult {
    Exact { index: usize, name: String },
    Fuzzy { index: usize, name: String, score: f64 },
    Unmatched,
}

impl MatchResult {
    pub fn is_matched(&self) -> bool {
        !matches!(self, MatchResult::Unmatched)
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            MatchResult::Exact { index, .. } | MatchResult::Fuzzy { index, .. } => Some(*index),
            MatchResult::Unmatched => None,
        }
    }

    pub fn matched_name(&self) -> Option<&str> {
        match self {
            MatchResult::Exact { name, .. } | MatchResult::Fuzzy { name, .. } => Some(name.as_str()),
            MatchResult::Unmatched => None,
        }
    }
}

/// Match an ingredient name against the vocabulary.
///
/// Fuzzy ties go to the earliest vocabulary entry.
pub fn match_ingredient(input: &str, vocabulary: &MasterVocabulary) -> MatchResult {
    let needle = normalize(input);

    if let Some((index, name)) = vocabulary
        .iter()
        .enumerate()
        .find(|(_, entry)| normalize(entry) == needle)
    {
        return MatchResult::Exact {
            index,
            name: name.to_string(),
        };
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, entry) in vocabulary.iter().enumerate() {
        let score = similarity(input, entry);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }

    match best {
        Some((index, score)) if score >= FUZZY_MATCH_THRESHOLD => MatchResult::Fuzzy {
            index,
            name: vocabulary.get(index).unwrap_or_default().to_string(),
            score,
        },
        _ => MatchResult::Unmatched,
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Similarity in `[0, 1]`: `2 * M / T`, where `T` is the combined length
/// and `M` counts the characters in matching blocks. Blocks are found by
/// taking the longest common run (earliest on ties) and recursing on the
/// text to either side of it.
pub fn similarity(input: &str, candidate: &str) -> f64 {
    let a: Vec<char> = candidate.chars().collect();
    let b: Vec<char> = input.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        positions.entry(c).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &positions, (a_lo, a_hi), (b_lo, b_hi));
        if size == 0 {
            continue;
        }
        matched += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Longest common run inside the given ranges as `(start_a, start_b, len)`
fn longest_match(
    a: &[char],
    positions: &HashMap<char, Vec<usize>>,
    (a_lo, a_hi): (usize, usize),
    (b_lo, b_hi): (usize, usize),
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // run length ending at each b position for the previous a character
    let mut runs: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next_runs = HashMap::new();
        for &j in positions.get(c).map(Vec::as_slice).unwrap_or_default() {
            if j < b_lo {
                continue;
            }
            if j >= b_hi {
                break;
            }
            let previous = if j > 0 { runs.get(&(j - 1)).copied().unwrap_or(0) } else { 0 };
            let size = previous + 1;
            next_runs.insert(j, size);
            if size > best_size {
                best_i = i + 1 - size;
                best_j = j + 1 - size;
                best_size = size;
            }
        }
        runs = next_runs;
    }

    (best_i, best_j, best_size)
}
