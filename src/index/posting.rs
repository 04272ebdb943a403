//! Posting lists.
//!
//! A [`Posting`] records, for one (field, term) pair, which documents contain
//! the term, how often, and at which token positions. The inverse document
//! frequency is stored alongside so scoring never recomputes it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Occurrences of a term within one field of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingEntry {
    /// Term frequency in the field.
    pub frequency: u32,
    /// Token positions of the term within the field, ascending.
    pub positions: Vec<u32>,
}

impl PostingEntry {
    /// Create an entry with a single occurrence.
    pub fn new(position: u32) -> Self {
        PostingEntry {
            frequency: 1,
            positions: vec![position],
        }
    }

    /// Record another occurrence at `position`.
    pub fn add_position(&mut self, position: u32) {
        self.positions.push(position);
        self.frequency = self.positions.len() as u32;
    }
}

/// The posting list for a term in a single field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Inverse document frequency, computed once the build is complete.
    pub idf: f64,
    /// Entries keyed by document reference.
    pub documents: BTreeMap<String, PostingEntry>,
}

impl Posting {
    /// Create an empty posting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence of the term in `reference` at `position`.
    pub fn add_occurrence(&mut self, reference: &str, position: u32) {
        match self.documents.get_mut(reference) {
            Some(entry) => entry.add_position(position),
            None => {
                self.documents
                    .insert(reference.to_string(), PostingEntry::new(position));
            }
        }
    }

    /// Number of documents containing the term.
    pub fn document_frequency(&self) -> usize {
        self.documents.len()
    }

    /// Entry for a document, if it contains the term.
    pub fn entry(&self, reference: &str) -> Option<&PostingEntry> {
        self.documents.get(reference)
    }

    /// Iterate over `(reference, entry)` pairs in reference order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingEntry)> {
        self.documents.iter().map(|(r, e)| (r.as_str(), e))
    }
}

/// Inverse document frequency of a term.
///
/// `idf = ln(1 + (N - df + 0.5) / (df + 0.5))`, clipped at zero, where `N` is
/// the number of documents in the index and `df` the number containing the
/// term. Decreases monotonically as `df` grows.
pub fn inverse_document_frequency(document_frequency: usize, document_count: usize) -> f64 {
    let n = document_count as f64;
    let df = document_frequency as f64;

    (1.0 + (n - df + 0.5) / (df + 0.5)).ln().max(0.0)
}

/// Saturating weight of a raw term frequency: `1 + ln(f)`, 0 for `f = 0`.
pub fn term_frequency_weight(frequency: u32) -> f64 {
    if frequency == 0 {
        return 0.0;
    }

    1.0 + (frequency as f64).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_occurrence() {
        let mut posting = Posting::new();
        posting.add_occurrence("a", 3);
        posting.add_occurrence("b", 0);
        posting.add_occurrence("a", 7);

        assert_eq!(posting.document_frequency(), 2);

        let entry = posting.entry("a").unwrap();
        assert_eq!(entry.frequency, 2);
        assert_eq!(entry.positions, vec![3, 7]);

        let refs: Vec<&str> = posting.iter().map(|(r, _)| r).collect();
        assert_eq!(refs, vec!["a", "b"]);
    }

    #[test]
    fn test_inverse_document_frequency() {
        let rare = inverse_document_frequency(1, 3);
        let common = inverse_document_frequency(2, 3);
        let everywhere = inverse_document_frequency(3, 3);

        assert!((rare - (1.0f64 + 2.5 / 1.5).ln()).abs() < 1e-12);
        assert!(rare > common);
        assert!(common > everywhere);
        assert!(everywhere >= 0.0);
        assert!(inverse_document_frequency(5, 3) >= 0.0);
    }

    #[test]
    fn test_term_frequency_weight() {
        assert_eq!(term_frequency_weight(0), 0.0);
        assert_eq!(term_frequency_weight(1), 1.0);
        assert!(term_frequency_weight(4) < 4.0);
        assert!(term_frequency_weight(4) > term_frequency_weight(2));
    }
}
