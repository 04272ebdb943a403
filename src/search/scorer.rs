//! TF-IDF scoring and ranking.
//!
//! Every (clause, field, term, document) posting hit contributes
//!
//! ```text
//! (1 + ln tf) * idf * field_boost * clause_boost * norm
//! norm = 1 / (1 - b + b * field_length / average_field_length)
//! ```
//!
//! and a document's score is the sum of its contributions. The sum does not
//! depend on evaluation order, and a document matching more clauses collects
//! more contributions, which is what ranks it above partial matches.

use std::cmp::Ordering;

use ahash::AHashMap;

use crate::index::inverted::{FieldIndex, InvertedIndex};
use crate::index::posting::term_frequency_weight;
use crate::query::matcher::Expansion;
use crate::search::result::{MatchData, SearchResult};

/// Per-document score accumulator.
#[derive(Debug, Default)]
struct Accumulator {
    score: f64,
    matched_clauses: Vec<usize>,
    match_data: MatchData,
}

impl Accumulator {
    fn mark_clause(&mut self, clause: usize) {
        if self.matched_clauses.last() != Some(&clause) {
            self.matched_clauses.push(clause);
        }
    }
}

/// Scores and ranks expanded clauses against an index.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    index: &'a InvertedIndex,
}

impl<'a> Scorer<'a> {
    /// Create a scorer over an index.
    pub fn new(index: &'a InvertedIndex) -> Self {
        Scorer { index }
    }

    /// Length normalization factor for a document's field.
    fn norm(&self, field: &FieldIndex, reference: &str) -> f64 {
        let b = self.index.config().scoring.length_normalization;
        let average = field.average_length();
        if b == 0.0 || average == 0.0 {
            return 1.0;
        }

        let length = f64::from(field.length(reference).unwrap_or(0));
        1.0 / (1.0 - b + b * length / average)
    }

    /// Score every document matched by the expansions and rank them.
    ///
    /// Results are ordered by descending score, ties by ascending reference.
    /// Documents that miss a required clause are dropped.
    pub fn score(&self, expansions: &[Expansion]) -> Vec<SearchResult> {
        let mut accumulators: AHashMap<&str, Accumulator> = AHashMap::new();

        for (clause_index, expansion) in expansions.iter().enumerate() {
            let clause_boost = expansion.clause.boost_value();

            for term_match in &expansion.matches {
                let Some(field) = self.index.field(&term_match.field) else {
                    continue;
                };
                let Some(posting) = field.posting(&term_match.term) else {
                    continue;
                };
                let field_boost = self
                    .index
                    .config()
                    .field(&term_match.field)
                    .map_or(1.0, |f| f.boost);

                for (reference, entry) in posting.iter() {
                    let contribution = term_frequency_weight(entry.frequency)
                        * posting.idf
                        * field_boost
                        * clause_boost
                        * self.norm(field, reference);

                    let accumulator = accumulators.entry(reference).or_default();
                    accumulator.score += contribution;
                    accumulator.mark_clause(clause_index);
                    accumulator
                        .match_data
                        .add(&term_match.field, &term_match.term, entry);
                }
            }
        }

        let required: Vec<usize> = expansions
            .iter()
            .enumerate()
            .filter(|(_, expansion)| expansion.clause.is_required())
            .map(|(i, _)| i)
            .collect();

        let mut results: Vec<SearchResult> = accumulators
            .into_iter()
            .filter(|(_, acc)| {
                required
                    .iter()
                    .all(|clause| acc.matched_clauses.binary_search(clause).is_ok())
            })
            .map(|(reference, acc)| SearchResult {
                reference: reference.to_string(),
                score: acc.score,
                match_data: acc.match_data,
            })
            .collect();

        results.sort_by(compare_results);
        results
    }
}

/// Descending score, then ascending reference.
fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.reference.cmp(&b.reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use crate::config::{FieldConfig, IndexConfig, ScoringConfig};
    use crate::query::clause::{Clause, Presence};
    use crate::query::matcher::TermMatcher;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect()
    }

    fn build(config: IndexConfig, docs: &[(&str, &[&str], &[&str])]) -> InvertedIndex {
        let mut index = InvertedIndex::new(config);
        for (reference, title, body) in docs {
            index
                .field_mut("title")
                .unwrap()
                .add_document(reference, &tokens(title));
            index
                .field_mut("body")
                .unwrap()
                .add_document(reference, &tokens(body));
        }
        index.set_document_count(docs.len());
        index.finalize();
        index
    }

    fn corpus(config: IndexConfig) -> InvertedIndex {
        build(
            config,
            &[
                ("a", &["green"], &["green", "candlestick"]),
                ("b", &["plant"], &["green", "plant"]),
                ("c", &[], &["green", "plant", "plant", "plant"]),
            ],
        )
    }

    fn run(index: &InvertedIndex, clauses: Vec<Clause>) -> Vec<SearchResult> {
        let matcher = TermMatcher::new(index);
        let expansions: Vec<Expansion> = clauses
            .into_iter()
            .map(|clause| {
                let matches = matcher.expand(&clause).unwrap();
                Expansion::new(clause, matches)
            })
            .collect();
        Scorer::new(index).score(&expansions)
    }

    fn refs(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.reference.as_str()).collect()
    }

    #[test]
    fn test_more_matching_fields_rank_higher() {
        let index = corpus(IndexConfig::with_fields(["title", "body"]));
        let results = run(&index, vec![Clause::new("plant")]);

        assert_eq!(refs(&results), vec!["b", "c"]);
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_term_frequency_saturates() {
        let index = corpus(IndexConfig::with_fields(["title", "body"]));
        let results = run(&index, vec![Clause::new("plant").field("body")]);

        assert_eq!(refs(&results), vec!["c", "b"]);
        let ratio = results[0].score / results[1].score;
        assert!((ratio - (1.0 + 3f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_ties_break_by_reference() {
        let index = corpus(IndexConfig::with_fields(["title", "body"]));
        let results = run(&index, vec![Clause::new("green").field("body")]);

        assert_eq!(refs(&results), vec!["a", "b", "c"]);
        assert_eq!(results[0].score, results[1].score);
    }

    #[test]
    fn test_field_boost() {
        let config = IndexConfig::new()
            .add_field(FieldConfig::new("title").with_boost(10.0))
            .add_field(FieldConfig::new("body"));
        let index = corpus(config);

        let results = run(&index, vec![Clause::new("green")]);
        assert_eq!(refs(&results)[0], "a");
        assert_eq!(results[0].match_data.fields.len(), 2);
    }

    #[test]
    fn test_clause_boost_is_proportional() {
        let index = corpus(IndexConfig::with_fields(["title", "body"]));

        let plain = run(&index, vec![Clause::new("candlestick")]);
        let boosted = run(&index, vec![Clause::new("candlestick").boost(5.0)]);
        assert!((boosted[0].score - 5.0 * plain[0].score).abs() < 1e-9);
    }

    #[test]
    fn test_required_clause_filters() {
        let index = corpus(IndexConfig::with_fields(["title", "body"]));

        let results = run(
            &index,
            vec![
                Clause::new("green"),
                Clause::new("plant").presence(Presence::Required),
            ],
        );
        assert_eq!(refs(&results), vec!["b", "c"]);

        let impossible = run(
            &index,
            vec![
                Clause::new("green"),
                Clause::new("foo").presence(Presence::Required),
            ],
        );
        assert!(impossible.is_empty());
    }

    #[test]
    fn test_length_normalization() {
        let scoring = ScoringConfig::default().with_length_normalization(1.0);
        let index = corpus(IndexConfig::with_fields(["title", "body"]).with_scoring(scoring));

        let results = run(&index, vec![Clause::new("green").field("body")]);
        // Shorter bodies rank first once length matters.
        assert_eq!(refs(&results), vec!["a", "b", "c"]);
        assert!(results[0].score > results[2].score);
    }

    #[test]
    fn test_no_matches() {
        let index = corpus(IndexConfig::with_fields(["title", "body"]));

        assert!(run(&index, vec![Clause::new("foo")]).is_empty());
        assert!(run(&index, Vec::new()).is_empty());
    }
}
