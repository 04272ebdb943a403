//! Levenshtein edit distance.
//!
//! Distance counts single-character insertions, deletions and substitutions.
//! Transpositions count as two edits. Characters are compared as Unicode
//! scalar values, so lengths are measured in `char`s rather than bytes.

use std::cmp::min;

/// Calculate the Levenshtein distance between two strings.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    bounded_distance(&s1_chars, &s2_chars, usize::MAX).unwrap_or(usize::MAX)
}

/// Calculate Levenshtein distance with a maximum threshold for early termination.
///
/// Returns `None` as soon as the distance is known to exceed `threshold`,
/// which makes it cheap to reject most candidates.
pub fn levenshtein_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    bounded_distance(&s1_chars, &s2_chars, threshold)
}

#[allow(clippy::needless_range_loop)]
fn bounded_distance(s1: &[char], s2: &[char], threshold: usize) -> Option<usize> {
    let len1 = s1.len();
    let len2 = s2.len();

    // Early termination if length difference exceeds threshold
    if len1.abs_diff(len2) > threshold {
        return None;
    }

    if len1 == 0 || len2 == 0 {
        return Some(len1.max(len2));
    }

    // Use only two rows for space optimization
    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        let mut min_in_row = i;

        for j in 1..=len2 {
            let cost = if s1[i - 1] == s2[j - 1] { 0 } else { 1 };

            curr_row[j] = min(
                min(
                    prev_row[j] + 1,     // deletion
                    curr_row[j - 1] + 1, // insertion
                ),
                prev_row[j - 1] + cost, // substitution
            );

            min_in_row = min(min_in_row, curr_row[j]);
        }

        // No later row can go below the minimum of this one
        if min_in_row > threshold {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[len2];
    if distance <= threshold {
        Some(distance)
    } else {
        None
    }
}

/// Matches many candidates against one query string within a fixed distance.
///
/// The query is decoded into characters once; each candidate is pruned by
/// its character count before any distance work is done.
#[derive(Debug, Clone)]
pub struct LevenshteinMatcher {
    query_chars: Vec<char>,
    max_distance: usize,
}

impl LevenshteinMatcher {
    /// Create a new matcher for the given query string.
    pub fn new(query: &str, max_distance: usize) -> Self {
        LevenshteinMatcher {
            query_chars: query.chars().collect(),
            max_distance,
        }
    }

    /// Maximum accepted distance.
    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Distance to `candidate`, or `None` if it exceeds the maximum.
    pub fn distance(&self, candidate: &str) -> Option<usize> {
        let candidate_len = candidate.chars().count();
        if candidate_len.abs_diff(self.query_chars.len()) > self.max_distance {
            return None;
        }

        let candidate_chars: Vec<char> = candidate.chars().collect();
        bounded_distance(&self.query_chars, &candidate_chars, self.max_distance)
    }

    /// Check if a candidate is within the maximum edit distance.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.distance(candidate).is_some()
    }
}
