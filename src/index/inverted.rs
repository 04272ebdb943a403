//! The inverted index.
//!
//! Each indexed field owns a sorted vocabulary mapping terms to postings and
//! a table of field lengths per document. The sorted vocabulary lets prefix
//! wildcards scan only the range of terms sharing the prefix.

use std::collections::BTreeMap;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::config::IndexConfig;
use crate::error::{KestrelError, Result};
use crate::index::posting::{Posting, inverse_document_frequency};

/// Vocabulary, postings and lengths of a single field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldIndex {
    /// Term to posting list, sorted by term.
    terms: BTreeMap<String, Posting>,
    /// Token count of the field per document reference.
    lengths: BTreeMap<String, u32>,
    /// Sum of all lengths.
    total_length: u64,
}

impl FieldIndex {
    /// Create an empty field index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the analyzed tokens of one document's field text.
    pub(crate) fn add_document(&mut self, reference: &str, tokens: &[Token]) {
        for token in tokens {
            self.terms
                .entry(token.text.clone())
                .or_default()
                .add_occurrence(reference, token.position as u32);
        }

        let length = tokens.len() as u32;
        self.lengths.insert(reference.to_string(), length);
        self.total_length += u64::from(length);
    }

    /// Compute the IDF of every term.
    pub(crate) fn compute_idf(&mut self, document_count: usize) {
        for posting in self.terms.values_mut() {
            posting.idf = inverse_document_frequency(posting.document_frequency(), document_count);
        }
    }

    /// Posting list for a term.
    pub fn posting(&self, term: &str) -> Option<&Posting> {
        self.terms.get(term)
    }

    /// Whether the vocabulary contains `term`.
    pub fn contains_term(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// All terms in sorted order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Terms starting with `prefix`, in sorted order.
    pub fn terms_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.terms
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(term, _)| term.as_str())
            .take_while(move |term| term.starts_with(prefix))
    }

    /// Number of distinct terms.
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Token count of the field in a document.
    pub fn length(&self, reference: &str) -> Option<u32> {
        self.lengths.get(reference).copied()
    }

    /// Sum of the field lengths of all documents.
    pub fn total_length(&self) -> u64 {
        self.total_length
    }

    /// Average field length, 0 for an empty index.
    pub fn average_length(&self) -> f64 {
        if self.lengths.is_empty() {
            return 0.0;
        }
        self.total_length as f64 / self.lengths.len() as f64
    }

    /// Document references with a recorded length.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.lengths.keys().map(String::as_str)
    }
}

/// The complete inverted index over all configured fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvertedIndex {
    config: IndexConfig,
    document_count: usize,
    fields: BTreeMap<String, FieldIndex>,
}

impl InvertedIndex {
    /// Create an empty index with one field index per configured field.
    pub fn new(config: IndexConfig) -> Self {
        let fields = config
            .field_names()
            .map(|name| (name.to_string(), FieldIndex::new()))
            .collect();

        InvertedIndex {
            config,
            document_count: 0,
            fields,
        }
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut FieldIndex> {
        self.fields.get_mut(name)
    }

    pub(crate) fn set_document_count(&mut self, document_count: usize) {
        self.document_count = document_count;
    }

    /// Compute IDF values for every field. Called once at the end of a build.
    pub(crate) fn finalize(&mut self) {
        let document_count = self.document_count;
        for field in self.fields.values_mut() {
            field.compute_idf(document_count);
        }
    }

    /// The configuration the index was built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// The index of one field.
    pub fn field(&self, name: &str) -> Option<&FieldIndex> {
        self.fields.get(name)
    }

    /// Field indexes in configuration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldIndex)> {
        self.config
            .field_names()
            .filter_map(|name| self.fields.get(name).map(|field| (name, field)))
    }

    /// Posting list for a term in a field.
    pub fn posting(&self, field: &str, term: &str) -> Option<&Posting> {
        self.field(field).and_then(|f| f.posting(term))
    }

    /// Summary statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            document_count: self.document_count,
            fields: self
                .fields()
                .map(|(name, field)| FieldStats {
                    name: name.to_string(),
                    vocabulary_size: field.vocabulary_size(),
                    average_length: field.average_length(),
                })
                .collect(),
        }
    }

    /// Verify the structural invariants of a deserialized index.
    pub fn check_consistency(&self) -> Result<()> {
        self.config.validate()?;

        if self.fields.len() != self.config.fields.len() {
            return Err(KestrelError::snapshot(format!(
                "index holds {} fields but its configuration declares {}",
                self.fields.len(),
                self.config.fields.len()
            )));
        }

        for name in self.config.field_names() {
            let field = self.fields.get(name).ok_or_else(|| {
                KestrelError::snapshot(format!("configured field `{name}` has no index"))
            })?;

            if field.lengths.len() != self.document_count {
                return Err(KestrelError::snapshot(format!(
                    "field `{name}` records {} lengths for {} documents",
                    field.lengths.len(),
                    self.document_count
                )));
            }

            let total: u64 = field.lengths.values().map(|&l| u64::from(l)).sum();
            if total != field.total_length {
                return Err(KestrelError::snapshot(format!(
                    "field `{name}` total length {} does not match recorded lengths",
                    field.total_length
                )));
            }

            for (term, posting) in &field.terms {
                if posting.document_frequency() > self.document_count {
                    return Err(KestrelError::snapshot(format!(
                        "term `{term}` in field `{name}` lists more documents than the index holds"
                    )));
                }
                if let Some((reference, _)) = posting
                    .iter()
                    .find(|(reference, _)| !field.lengths.contains_key(*reference))
                {
                    return Err(KestrelError::snapshot(format!(
                        "term `{term}` in field `{name}` refers to unknown document `{reference}`"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Statistics for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStats {
    /// Field name.
    pub name: String,
    /// Number of distinct terms.
    pub vocabulary_size: usize,
    /// Average token count per document.
    pub average_length: f64,
}

/// Statistics about an index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    /// Number of documents in the index.
    pub document_count: usize,
    /// Per-field statistics in configuration order.
    pub fields: Vec<FieldStats>,
}
