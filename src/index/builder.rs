//! Batch index construction.
//!
//! Documents are validated as they are added and analyzed when the index is
//! built. A build either produces a complete immutable [`Index`] or fails;
//! there is no partially built index.

use ahash::AHashSet;

use crate::analysis::pipeline::Pipeline;
use crate::config::IndexConfig;
use crate::document::Document;
use crate::error::{KestrelError, Result};
use crate::index::Index;
use crate::index::inverted::InvertedIndex;

/// Collects documents and builds an [`Index`] from them.
///
/// # Examples
///
/// ```
/// use kestrel::config::IndexConfig;
/// use kestrel::document::Document;
/// use kestrel::index::builder::IndexBuilder;
///
/// let mut builder = IndexBuilder::new(IndexConfig::with_fields(["title", "body"]));
/// builder.add(Document::new("a").with_field("title", "Mr. Green")).unwrap();
/// builder.add(Document::new("b").with_field("body", "a green plant")).unwrap();
///
/// let index = builder.build().unwrap();
/// assert_eq!(index.document_count(), 2);
/// ```
#[derive(Debug)]
pub struct IndexBuilder {
    config: IndexConfig,
    pipeline: Option<Pipeline>,
    documents: Vec<Document>,
    references: AHashSet<String>,
}

impl IndexBuilder {
    /// Create a builder. The English pipeline is used unless another one is set.
    pub fn new(config: IndexConfig) -> Self {
        IndexBuilder {
            config,
            pipeline: None,
            documents: Vec::new(),
            references: AHashSet::new(),
        }
    }

    /// Use a custom token pipeline.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Number of documents added so far.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents have been added.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Add a document.
    ///
    /// Fails on an empty or duplicate reference, and when a required field
    /// has no text.
    pub fn add(&mut self, document: Document) -> Result<()> {
        if document.reference().is_empty() {
            return Err(KestrelError::invalid_document("document reference is empty"));
        }

        for field in self.config.fields.iter().filter(|f| f.required) {
            let present = document
                .field(&field.name)
                .is_some_and(|text| !text.trim().is_empty());
            if !present {
                return Err(KestrelError::MissingField {
                    reference: document.reference().to_string(),
                    field: field.name.clone(),
                });
            }
        }

        if !self.references.insert(document.reference().to_string()) {
            return Err(KestrelError::DuplicateReference(
                document.reference().to_string(),
            ));
        }

        self.documents.push(document);
        Ok(())
    }

    /// Add every document from an iterator, stopping at the first error.
    pub fn add_all<I>(&mut self, documents: I) -> Result<()>
    where
        I: IntoIterator<Item = Document>,
    {
        documents.into_iter().try_for_each(|doc| self.add(doc))
    }

    /// Analyze all documents and build the index.
    pub fn build(self) -> Result<Index> {
        self.config.validate()?;

        let pipeline = match self.pipeline {
            Some(pipeline) => pipeline,
            None => Pipeline::english()?,
        };

        let mut inverted = InvertedIndex::new(self.config.clone());

        for document in &self.documents {
            for name in self.config.field_names() {
                let tokens = match document.field(name) {
                    Some(text) => pipeline.analyze(text)?,
                    None => Vec::new(),
                };

                if let Some(field) = inverted.field_mut(name) {
                    field.add_document(document.reference(), &tokens);
                }
            }
        }

        inverted.set_document_count(self.documents.len());
        inverted.finalize();

        log::debug!(
            "Built index: {} documents, {} fields, {} terms",
            inverted.document_count(),
            self.config.fields.len(),
            inverted
                .fields()
                .map(|(_, field)| field.vocabulary_size())
                .sum::<usize>()
        );

        Ok(Index::from_parts(inverted, pipeline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;

    fn config() -> IndexConfig {
        IndexConfig::with_fields(["title", "body"])
    }

    #[test]
    fn test_build() {
        let mut builder = IndexBuilder::new(config());
        builder
            .add_all(vec![
                Document::new("a").with_field("title", "Green plants"),
                Document::new("b").with_field("body", "The plant, the plant!"),
            ])
            .unwrap();
        assert_eq!(builder.len(), 2);

        let index = builder.build().unwrap();
        let inverted = index.inverted();

        assert_eq!(inverted.document_count(), 2);
        assert_eq!(inverted.field("title").unwrap().length("b"), Some(0));
        assert_eq!(inverted.field("body").unwrap().length("b"), Some(2));

        let body_plant = inverted.posting("body", "plant").unwrap();
        assert_eq!(body_plant.entry("b").unwrap().frequency, 2);
        assert_eq!(body_plant.entry("b").unwrap().positions, vec![1, 3]);
        assert!(inverted.posting("title", "plant").unwrap().entry("b").is_none());
    }

    #[test]
    fn test_duplicate_reference() {
        let mut builder = IndexBuilder::new(config());
        builder.add(Document::new("a")).unwrap();

        let err = builder.add(Document::new("a")).unwrap_err();
        assert!(matches!(err, KestrelError::DuplicateReference(r) if r == "a"));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_missing_required_field() {
        let config = IndexConfig::new()
            .add_field(FieldConfig::new("title").required(true))
            .add_field(FieldConfig::new("body"));
        let mut builder = IndexBuilder::new(config);

        builder
            .add(Document::new("a").with_field("title", "present"))
            .unwrap();

        let err = builder
            .add(Document::new("b").with_field("body", "no title"))
            .unwrap_err();
        assert!(matches!(
            err,
            KestrelError::MissingField { ref reference, ref field }
                if reference == "b" && field == "title"
        ));

        let blank = builder.add(Document::new("c").with_field("title", "   "));
        assert!(blank.is_err());
    }

    #[test]
    fn test_empty_reference() {
        let mut builder = IndexBuilder::new(config());
        assert!(matches!(
            builder.add(Document::new("")),
            Err(KestrelError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_invalid_config() {
        let builder = IndexBuilder::new(IndexConfig::new());
        assert!(matches!(builder.build(), Err(KestrelError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_build() {
        let index = IndexBuilder::new(config()).build().unwrap();
        assert_eq!(index.document_count(), 0);
        assert!(index.search("anything").unwrap().is_empty());
    }
}
