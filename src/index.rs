//! The searchable index.
//!
//! An [`Index`] pairs an immutable [`InvertedIndex`] with the token pipeline
//! it was built with. The same pipeline normalizes query terms, so a query
//! for `water` meets documents that said `watered`.
//!
//! # Examples
//!
//! ```
//! use kestrel::analysis::pipeline::Pipeline;
//! use kestrel::config::IndexConfig;
//! use kestrel::document::Document;
//! use kestrel::index::Index;
//!
//! let index = Index::build(
//!     IndexConfig::with_fields(["title", "body"]),
//!     Pipeline::english().unwrap(),
//!     vec![
//!         Document::new("b").with_field("title", "Plumb waters plant"),
//!         Document::new("c").with_field("body", "Miss Scarlett watered the plant"),
//!     ],
//! )
//! .unwrap();
//!
//! let results = index.search("water").unwrap();
//! assert_eq!(results.len(), 2);
//! ```

use crate::analysis::pipeline::Pipeline;
use crate::config::IndexConfig;
use crate::document::Document;
use crate::error::Result;
use crate::query::clause::{Clause, Wildcard};
use crate::query::matcher::{Expansion, TermMatcher};
use crate::query::parser::QueryParser;
use crate::search::result::SearchResult;
use crate::search::scorer::Scorer;

pub mod builder;
pub mod inverted;
pub mod posting;
pub mod snapshot;

pub use builder::IndexBuilder;
pub use inverted::{FieldIndex, IndexStats, InvertedIndex};

/// An immutable, searchable index.
#[derive(Debug, Clone)]
pub struct Index {
    inverted: InvertedIndex,
    pipeline: Pipeline,
}

impl Index {
    /// Start building an index.
    pub fn builder(config: IndexConfig) -> IndexBuilder {
        IndexBuilder::new(config)
    }

    /// Build an index from a batch of documents.
    pub fn build<I>(config: IndexConfig, pipeline: Pipeline, documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut builder = IndexBuilder::new(config).with_pipeline(pipeline);
        builder.add_all(documents)?;
        builder.build()
    }

    pub(crate) fn from_parts(inverted: InvertedIndex, pipeline: Pipeline) -> Self {
        Index { inverted, pipeline }
    }

    /// The configuration the index was built with.
    pub fn config(&self) -> &IndexConfig {
        self.inverted.config()
    }

    /// The underlying inverted index.
    pub fn inverted(&self) -> &InvertedIndex {
        &self.inverted
    }

    /// The token pipeline shared by indexing and querying.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.inverted.document_count()
    }

    /// Summary statistics.
    pub fn stats(&self) -> IndexStats {
        self.inverted.stats()
    }

    /// A query parser bound to this index's fields.
    pub fn parser(&self) -> QueryParser<'_> {
        QueryParser::new(self.config())
    }

    /// Parse a query string into clauses without running it.
    pub fn parse(&self, query: &str) -> Result<Vec<Clause>> {
        self.parser().parse(query)
    }

    /// Parse and run a query string.
    ///
    /// Parse errors are returned before any matching happens. A query that
    /// matches nothing returns an empty vector.
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let clauses = self.parse(query)?;
        self.query(&clauses)
    }

    /// Run pre-built clauses.
    ///
    /// Clause terms are normalized with the index pipeline first, so the
    /// parsed query `PL*` and `Clause::new("PL*")` behave the same.
    pub fn query(&self, clauses: &[Clause]) -> Result<Vec<SearchResult>> {
        let matcher = TermMatcher::new(&self.inverted);
        let mut expansions = Vec::with_capacity(clauses.len());

        for clause in clauses {
            clause.validate(self.config())?;

            let normalized = self.normalize(clause)?;
            if normalized.is_empty() {
                log::trace!("Clause `{clause}` removed by the token pipeline");
            }

            for clause in normalized {
                let matches = matcher.expand(&clause)?;
                log::trace!("Clause `{clause}` expanded to {} terms", matches.len());
                expansions.push(Expansion::new(clause, matches));
            }
        }

        Ok(Scorer::new(&self.inverted).score(&expansions))
    }

    /// Analyze exact and fuzzy terms like document text. A term the
    /// tokenizer splits yields one clause per surviving token, each keeping
    /// the field, boost, distance and presence. Wildcard patterns keep their
    /// stars and only get the filters' literal normalization.
    fn normalize(&self, clause: &Clause) -> Result<Vec<Clause>> {
        if clause.wildcard() != Wildcard::None {
            let pattern = self.pipeline.run_pattern(clause.term());
            return Ok(vec![clause.clone().with_term(pattern)]);
        }

        Ok(self
            .pipeline
            .analyze(clause.term())?
            .into_iter()
            .map(|token| clause.clone().with_term(token.text))
            .collect())
    }
}
