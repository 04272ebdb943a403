//! Term expansion.
//!
//! The [`TermMatcher`] turns a clause into the set of concrete vocabulary
//! terms it matches, field by field. A clause without a field scope is
//! expanded in every field independently.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::index::inverted::{FieldIndex, InvertedIndex};
use crate::query::clause::{Clause, Wildcard};
use crate::query::wildcard::WildcardPattern;
use crate::util::levenshtein::LevenshteinMatcher;

/// A vocabulary term matched in a specific field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermMatch {
    /// Field the term was found in.
    pub field: String,
    /// The vocabulary term.
    pub term: String,
}

impl TermMatch {
    /// Create a new term match.
    pub fn new<F: Into<String>, T: Into<String>>(field: F, term: T) -> Self {
        TermMatch {
            field: field.into(),
            term: term.into(),
        }
    }
}

/// A clause together with the terms it expanded to.
#[derive(Debug, Clone)]
pub struct Expansion {
    /// The (normalized) clause.
    pub clause: Clause,
    /// Matched terms; empty when nothing in the vocabulary matched.
    pub matches: BTreeSet<TermMatch>,
}

impl Expansion {
    /// Create a new expansion.
    pub fn new(clause: Clause, matches: BTreeSet<TermMatch>) -> Self {
        Expansion { clause, matches }
    }
}

/// How a clause selects vocabulary terms.
enum TermFilter {
    Exact(String),
    Pattern(WildcardPattern),
    Fuzzy(LevenshteinMatcher),
}

impl TermFilter {
    fn for_clause(clause: &Clause) -> Result<Self> {
        if clause.wildcard() != Wildcard::None {
            return Ok(TermFilter::Pattern(WildcardPattern::new(clause.term())?));
        }

        Ok(match clause.distance() {
            Some(distance) if distance > 0 => {
                TermFilter::Fuzzy(LevenshteinMatcher::new(clause.term(), distance as usize))
            }
            _ => TermFilter::Exact(clause.term().to_string()),
        })
    }

    fn select<'a>(&'a self, field: &'a FieldIndex) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        match self {
            TermFilter::Exact(term) => {
                Box::new(field.contains_term(term).then_some(term.as_str()).into_iter())
            }
            TermFilter::Pattern(pattern) if !pattern.literal_prefix().is_empty() => Box::new(
                field
                    .terms_with_prefix(pattern.literal_prefix())
                    .filter(move |term| pattern.matches(term)),
            ),
            TermFilter::Pattern(pattern) => {
                Box::new(field.terms().filter(move |term| pattern.matches(term)))
            }
            TermFilter::Fuzzy(matcher) => {
                Box::new(field.terms().filter(move |term| matcher.is_match(term)))
            }
        }
    }
}

/// Expands clauses against an inverted index.
#[derive(Debug, Clone, Copy)]
pub struct TermMatcher<'a> {
    index: &'a InvertedIndex,
}

impl<'a> TermMatcher<'a> {
    /// Create a matcher over an index.
    pub fn new(index: &'a InvertedIndex) -> Self {
        TermMatcher { index }
    }

    /// Expand a clause into the terms it matches in each field it applies to.
    ///
    /// Returns an empty set when nothing matches; an unknown field scope
    /// also yields an empty set, since clauses are validated before this.
    pub fn expand(&self, clause: &Clause) -> Result<BTreeSet<TermMatch>> {
        let filter = TermFilter::for_clause(clause)?;
        let mut matches = BTreeSet::new();

        for (name, field) in self.index.fields() {
            if clause.field_name().is_some_and(|scope| scope != name) {
                continue;
            }

            matches.extend(filter.select(field).map(|term| TermMatch::new(name, term)));
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use crate::config::IndexConfig;

    fn index() -> InvertedIndex {
        let mut index = InvertedIndex::new(IndexConfig::with_fields(["title", "body"]));
        let title = ["plumb", "water", "plant"];
        let body = ["professor", "plumb", "green", "plant", "studi", "candlestick"];

        let tokens = |words: &[&str]| -> Vec<Token> {
            words
                .iter()
                .enumerate()
                .map(|(i, w)| Token::new(*w, i))
                .collect()
        };

        index
            .field_mut("title")
            .unwrap()
            .add_document("b", &tokens(&title[..]));
        index
            .field_mut("body")
            .unwrap()
            .add_document("b", &tokens(&body[..]));
        index.set_document_count(1);
        index.finalize();
        index
    }

    fn terms(matches: &BTreeSet<TermMatch>) -> Vec<String> {
        matches
            .iter()
            .map(|m| format!("{}:{}", m.field, m.term))
            .collect()
    }

    #[test]
    fn test_exact() {
        let index = index();
        let matcher = TermMatcher::new(&index);

        let matches = matcher.expand(&Clause::new("plant")).unwrap();
        assert_eq!(terms(&matches), vec!["body:plant", "title:plant"]);

        let scoped = matcher.expand(&Clause::new("plant").field("title")).unwrap();
        assert_eq!(terms(&scoped), vec!["title:plant"]);

        assert!(matcher.expand(&Clause::new("foo")).unwrap().is_empty());
        assert!(
            matcher
                .expand(&Clause::new("candlestick").field("title"))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_wildcards() {
        let index = index();
        let matcher = TermMatcher::new(&index);

        let trailing = matcher.expand(&Clause::new("pl*").field("body")).unwrap();
        assert_eq!(terms(&trailing), vec!["body:plant", "body:plumb"]);

        let leading = matcher.expand(&Clause::new("*ant")).unwrap();
        assert_eq!(terms(&leading), vec!["body:plant", "title:plant"]);

        let contained = matcher.expand(&Clause::new("pl*nt").field("title")).unwrap();
        assert_eq!(terms(&contained), vec!["title:plant"]);

        let both = matcher.expand(&Clause::new("*ee*")).unwrap();
        assert_eq!(terms(&both), vec!["body:green"]);

        assert!(matcher.expand(&Clause::new("fo*")).unwrap().is_empty());
        assert!(matcher.expand(&Clause::new("f*o")).unwrap().is_empty());
    }

    #[test]
    fn test_fuzzy() {
        let index = index();
        let matcher = TermMatcher::new(&index);

        let one = matcher.expand(&Clause::new("plont").edit_distance(1)).unwrap();
        assert_eq!(terms(&one), vec!["body:plant", "title:plant"]);

        let wider = matcher
            .expand(&Clause::new("plont").edit_distance(3).field("body"))
            .unwrap();
        assert_eq!(terms(&wider), vec!["body:plant", "body:plumb"]);

        assert!(
            matcher
                .expand(&Clause::new("plont").edit_distance(0))
                .unwrap()
                .is_empty()
        );
        let zero = matcher.expand(&Clause::new("plant").edit_distance(0)).unwrap();
        assert_eq!(zero, matcher.expand(&Clause::new("plant")).unwrap());
    }
}
