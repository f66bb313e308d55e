//! Approximate string matching with the Bitap algorithm
//!
//! Scores follow the Fuse.js model: `0` is a perfect match, `1` is a total
//! mismatch. Each candidate's best score is weighted by the number of words
//! in its text so short texts rank above long ones for the same match.
use std::collections::HashMap;

use super::Candidate;

/// Longest pattern the bit vectors can hold, longer patterns are chunked
const MAX_BITS: usize = 32;

/// Lowest score a non-identical text can get
const MIN_SCORE: f64 = 0.001;

/// Matching options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyOptions {
    /// Highest accepted score, `0.0` only accepts exact matches
    pub threshold: f64,
    /// How far from `location` a match may sit before it scores `1.0`
    pub distance: usize,
    /// Where in the text a match is expected
    pub location: usize,
    /// Score on errors alone, wherever the match is
    pub ignore_location: bool,
    pub case_sensitive: bool,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        FuzzyOptions {
            threshold: 0.6,
            distance: 100,
            location: 0,
            ignore_location: false,
            case_sensitive: false,
        }
    }
}

impl From<&lostfound_config::SearchOptions> for FuzzyOptions {
    fn from(options: &lostfound_config::SearchOptions) -> Self {
        FuzzyOptions {
            threshold: options.threshold,
            distance: options.distance,
            location: options.location,
            ignore_location: options.ignore_location,
            case_sensitive: false,
        }
    }
}

/// Candidate accepted by a search
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub id: String,
    pub score: f64,
}

/// Part of the pattern that fits in the bit vectors
#[derive(Debug)]
struct Chunk {
    pattern: Vec<char>,
    alphabet: HashMap<char, u32>,
    start: usize,
}

impl Chunk {
    fn new(pattern: &[char], start: usize) -> Chunk {
        let len = pattern.len();
        let mut alphabet: HashMap<char, u32> = HashMap::new();
        for (i, c) in pattern.iter().enumerate() {
            *alphabet.entry(*c).or_default() |= 1 << (len - i - 1);
        }

        Chunk {
            pattern: pattern.to_vec(),
            alphabet,
            start,
        }
    }
}

/// Compiled query
#[derive(Debug)]
pub struct FuzzyMatcher {
    options: FuzzyOptions,
    pattern: Vec<char>,
    chunks: Vec<Chunk>,
}

impl FuzzyMatcher {
    pub fn new(query: &str, options: FuzzyOptions) -> FuzzyMatcher {
        let pattern: Vec<char> = fold_case(query, options.case_sensitive);

        let mut chunks = vec![];
        if !query.trim().is_empty() {
            let len = pattern.len();
            if len > MAX_BITS {
                let remainder = len % MAX_BITS;
                let end = len - remainder;

                let mut i = 0;
                while i < end {
                    chunks.push(Chunk::new(&pattern[i..i + MAX_BITS], i));
                    i += MAX_BITS;
                }

                if remainder > 0 {
                    let start = len - MAX_BITS;
                    chunks.push(Chunk::new(&pattern[start..], start));
                }
            } else {
                chunks.push(Chunk::new(&pattern, 0));
            }
        }

        FuzzyMatcher {
            options,
            pattern,
            chunks,
        }
    }

    /// Rank the candidates matching the query, best first
    ///
    /// Equal scores keep candidate order. Blank texts never match.
    pub fn search(&self, candidates: &[Candidate]) -> Vec<FuzzyMatch> {
        if self.chunks.is_empty() {
            return vec![];
        }

        let mut matches: Vec<(usize, FuzzyMatch)> = candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| !candidate.text.trim().is_empty())
            .filter_map(|(index, candidate)| {
                let score = self.score(&candidate.text)?;
                Some((
                    index,
                    FuzzyMatch {
                        id: candidate.id.to_string(),
                        score: weigh_by_length(score, &candidate.text),
                    },
                ))
            })
            .collect();

        matches.sort_by(|(a_index, a), (b_index, b)| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a_index.cmp(b_index))
        });

        matches.into_iter().map(|(_, m)| m).collect()
    }

    /// Score one text, `None` if nothing in it is close enough
    pub fn score(&self, text: &str) -> Option<f64> {
        if self.chunks.is_empty() {
            return None;
        }

        let text = fold_case(text, self.options.case_sensitive);
        if text == self.pattern {
            return Some(0.0);
        }

        let mut matched = false;
        let mut total = 0.0;
        for chunk in &self.chunks {
            let (is_match, score) = self.bitap(&text, chunk, self.options.location + chunk.start);
            matched |= is_match;
            total += score;
        }

        matched.then(|| total / self.chunks.len() as f64)
    }

    fn compute_score(&self, pattern_len: usize, errors: usize, current: usize, expected: usize) -> f64 {
        let accuracy = errors as f64 / pattern_len as f64;
        if self.options.ignore_location {
            return accuracy;
        }

        let proximity = current.abs_diff(expected);
        if self.options.distance == 0 {
            return if proximity > 0 { 1.0 } else { accuracy };
        }

        accuracy + proximity as f64 / self.options.distance as f64
    }

    /// Shift-or search allowing up to `pattern_len - 1` errors
    fn bitap(&self, text: &[char], chunk: &Chunk, location: usize) -> (bool, f64) {
        let pattern = &chunk.pattern;
        let pattern_len = pattern.len();
        let text_len = text.len();
        let expected = location.min(text_len);

        // Exact occurrences bound the threshold for the fuzzy pass
        let mut threshold = self.options.threshold;
        let mut from = expected;
        while let Some(index) = find(text, pattern, from) {
            threshold = threshold.min(self.compute_score(pattern_len, 0, index, expected));
            from = index + pattern_len;
        }

        let mut best_location: Option<usize> = None;
        let mut final_score = 1.0;
        let mut last_bits: Vec<u32> = vec![];
        let mut bin_max = pattern_len + text_len;
        let mask: u32 = 1 << (pattern_len - 1);

        for errors in 0..pattern_len {
            // Widest window around the expected location still under threshold
            let mut bin_min = 0;
            let mut bin_mid = bin_max;
            while bin_min < bin_mid {
                if self.compute_score(pattern_len, errors, expected + bin_mid, expected)
                    <= threshold
                {
                    bin_min = bin_mid;
                } else {
                    bin_max = bin_mid;
                }

                bin_mid = (bin_max - bin_min) / 2 + bin_min;
            }
            bin_max = bin_mid;

            let mut start = (expected + 1).saturating_sub(bin_mid).max(1);
            let finish = (expected + bin_mid).min(text_len) + pattern_len;

            let mut bits = vec![0u32; finish + 2];
            bits[finish + 1] = (1u32 << errors) - 1;

            let last = |index: usize| last_bits.get(index).copied().unwrap_or(0);

            let mut j = finish;
            while j >= start {
                let current = j - 1;
                let char_match = text
                    .get(current)
                    .and_then(|c| chunk.alphabet.get(c))
                    .copied()
                    .unwrap_or(0);

                bits[j] = ((bits[j + 1] << 1) | 1) & char_match;
                if errors > 0 {
                    bits[j] |= ((last(j + 1) | last(j)) << 1) | 1 | last(j + 1);
                }

                if bits[j] & mask != 0 {
                    final_score = self.compute_score(pattern_len, errors, current, expected);
                    if final_score <= threshold {
                        threshold = final_score;
                        best_location = Some(current);

                        if current <= expected {
                            break;
                        }

                        start = (2 * expected).saturating_sub(current).max(1);
                    }
                }

                j -= 1;
            }

            if self.compute_score(pattern_len, errors + 1, expected, expected) > threshold {
                break;
            }

            last_bits = bits;
        }

        (best_location.is_some(), final_score.max(MIN_SCORE))
    }
}

/// Rank the candidates matching `query`, best first
pub fn search(query: &str, candidates: &[Candidate], options: FuzzyOptions) -> Vec<FuzzyMatch> {
    FuzzyMatcher::new(query, options).search(candidates)
}

fn fold_case(text: &str, case_sensitive: bool) -> Vec<char> {
    if case_sensitive {
        text.chars().collect()
    } else {
        text.to_lowercase().chars().collect()
    }
}

/// First index at or after `from` where `pattern` occurs in `text`
fn find(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if from + pattern.len() > text.len() {
        return None;
    }

    text[from..]
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|index| index + from)
}

/// Length norm of a text, `1 / sqrt(words)` to three decimals
fn length_norm(text: &str) -> f64 {
    let words = text.split(' ').filter(|word| !word.is_empty()).count().max(1);
    ((1.0 / (words as f64).sqrt()) * 1000.0).round() / 1000.0
}

fn weigh_by_length(score: f64, text: &str) -> f64 {
    let score = if score == 0.0 { f64::EPSILON } else { score };
    score.powf(length_norm(text))
}
