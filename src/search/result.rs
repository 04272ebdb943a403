//! Search results and match provenance.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::index::posting::PostingEntry;

/// Where and how often a matched term occurs in one field of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMetadata {
    /// Term frequency in the field.
    pub frequency: u32,
    /// Token positions of the term in the field.
    pub positions: Vec<u32>,
}

impl From<&PostingEntry> for TermMetadata {
    fn from(entry: &PostingEntry) -> Self {
        TermMetadata {
            frequency: entry.frequency,
            positions: entry.positions.clone(),
        }
    }
}

/// Which vocabulary terms matched a document, overall and per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchData {
    /// Every matched vocabulary term.
    pub terms: BTreeSet<String>,
    /// Field name to matched term to occurrence metadata.
    pub fields: BTreeMap<String, BTreeMap<String, TermMetadata>>,
}

impl MatchData {
    /// Create empty match data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a matched term in a field.
    pub fn add(&mut self, field: &str, term: &str, entry: &PostingEntry) {
        if !self.terms.contains(term) {
            self.terms.insert(term.to_string());
        }

        self.fields
            .entry(field.to_string())
            .or_default()
            .entry(term.to_string())
            .or_insert_with(|| TermMetadata::from(entry));
    }

    /// Matched terms in sorted order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Whether `term` matched in any field.
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The document reference.
    pub reference: String,
    /// Relevance score; higher is better.
    pub score: f64,
    /// Match provenance.
    pub match_data: MatchData,
}
