//! Index snapshots.
//!
//! A snapshot is the complete inverted index (configuration, vocabulary,
//! postings, field lengths and IDF values) plus a description of the pipeline
//! it was built with and the crate version that wrote it. Pipelines hold code
//! and cannot be serialized, so the caller supplies one on import; its
//! signature (tokenizer pattern, filter order, stop list, stemmer) must match
//! the recorded one. Custom filters that do not override
//! [`TokenFilter::signature`](crate::analysis::token_filter::TokenFilter::signature)
//! are compared by name only.
//!
//! Snapshots can be written as JSON or as compact bincode.
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
//!     IndexConfig::with_fields(["body"]),
//!     Pipeline::english().unwrap(),
//!     vec![Document::new("a").with_field("body", "green plant")],
//! )
//! .unwrap();
//!
//! let json = index.to_json().unwrap();
//! let restored = Index::from_json(&json, Pipeline::english().unwrap()).unwrap();
//! assert_eq!(index.search("plant").unwrap(), restored.search("plant").unwrap());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::pipeline::Pipeline;
use crate::error::{KestrelError, Result};
use crate::index::Index;
use crate::index::inverted::InvertedIndex;

/// Serialized form of an [`Index`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    /// Version of the crate that wrote the snapshot.
    pub version: String,
    /// Filter names of the pipeline the index was built with.
    pub pipeline: Vec<String>,
    /// Tokenizer and filter signatures of that pipeline.
    pub signature: Vec<String>,
    /// The index data.
    pub index: InvertedIndex,
}

/// Encoding of a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// Self-describing JSON.
    Json,
    /// Compact bincode.
    Binary,
}

impl SnapshotFormat {
    /// Choose the format from a file extension: `.json` is JSON, anything
    /// else is binary.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let is_json = path
            .as_ref()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            SnapshotFormat::Json
        } else {
            SnapshotFormat::Binary
        }
    }
}

impl IndexSnapshot {
    /// Capture an index.
    pub fn new(index: &Index) -> Self {
        IndexSnapshot {
            version: crate::VERSION.to_string(),
            pipeline: index.pipeline().filter_names(),
            signature: index.pipeline().signature(),
            index: index.inverted().clone(),
        }
    }

    /// Rebuild an index, checking the pipeline and the index invariants.
    pub fn into_index(self, pipeline: Pipeline) -> Result<Index> {
        if self.version != crate::VERSION {
            log::warn!(
                "Snapshot was written by version {} and is being read by version {}",
                self.version,
                crate::VERSION
            );
        }

        let signature = pipeline.signature();
        if signature != self.signature {
            return Err(KestrelError::snapshot(format!(
                "pipeline mismatch: snapshot was built with [{}], got [{}]",
                self.signature.join(", "),
                signature.join(", ")
            )));
        }

        self.index.check_consistency()?;

        log::debug!(
            "Restored index with {} documents",
            self.index.document_count()
        );

        Ok(Index::from_parts(self.index, pipeline))
    }
}

impl Index {
    /// Export the index as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&IndexSnapshot::new(self))?)
    }

    /// Export the index as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&IndexSnapshot::new(self))?)
    }

    /// Import an index from JSON.
    pub fn from_json(json: &str, pipeline: Pipeline) -> Result<Self> {
        let snapshot: IndexSnapshot = serde_json::from_str(json)?;
        snapshot.into_index(pipeline)
    }

    /// Export the index as bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&IndexSnapshot::new(self))?)
    }

    /// Import an index from bincode.
    pub fn from_bytes(bytes: &[u8], pipeline: Pipeline) -> Result<Self> {
        let snapshot: IndexSnapshot = bincode::deserialize(bytes)?;
        snapshot.into_index(pipeline)
    }

    /// Write the index to a file, choosing the format from the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = match SnapshotFormat::from_path(path) {
            SnapshotFormat::Json => self.to_json()?.into_bytes(),
            SnapshotFormat::Binary => self.to_bytes()?,
        };

        fs::write(path, data)?;
        log::debug!("Saved index snapshot to {}", path.display());
        Ok(())
    }

    /// Read an index from a file written by [`Index::save`].
    pub fn load<P: AsRef<Path>>(path: P, pipeline: Pipeline) -> Result<Self> {
        let path = path.as_ref();

        match SnapshotFormat::from_path(path) {
            SnapshotFormat::Json => Self::from_json(&fs::read_to_string(path)?, pipeline),
            SnapshotFormat::Binary => Self::from_bytes(&fs::read(path)?, pipeline),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::token_filter::lowercase::LowercaseFilter;
    use crate::analysis::token_filter::stem::StemFilter;
    use crate::analysis::token_filter::stop::StopFilter;
    use crate::analysis::token_filter::trimmer::TrimmerFilter;
    use crate::analysis::tokenizer::regex::RegexTokenizer;
    use crate::config::IndexConfig;
    use crate::document::Document;

    fn index() -> Index {
        Index::build(
            IndexConfig::with_fields(["title", "body"]),
            Pipeline::english().unwrap(),
            vec![
                Document::new("a").with_field("title", "Green candlestick"),
                Document::new("b").with_field("body", "Plumb waters the plant"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SnapshotFormat::from_path("index.json"), SnapshotFormat::Json);
        assert_eq!(SnapshotFormat::from_path("INDEX.JSON"), SnapshotFormat::Json);
        assert_eq!(SnapshotFormat::from_path("index.bin"), SnapshotFormat::Binary);
        assert_eq!(SnapshotFormat::from_path("index"), SnapshotFormat::Binary);
    }

    #[test]
    fn test_snapshot_records_pipeline() {
        let snapshot = IndexSnapshot::new(&index());

        assert_eq!(snapshot.version, crate::VERSION);
        assert_eq!(
            snapshot.pipeline,
            vec!["trimmer", "lowercase", "stop_words", "stemmer"]
        );
        assert_eq!(snapshot.signature, Pipeline::english().unwrap().signature());
    }

    #[test]
    fn test_json_round_trip() {
        let index = index();
        let restored = Index::from_json(&index.to_json().unwrap(), Pipeline::english().unwrap())
            .unwrap();

        assert_eq!(index.inverted(), restored.inverted());
    }

    #[test]
    fn test_binary_round_trip() {
        let index = index();
        let restored =
            Index::from_bytes(&index.to_bytes().unwrap(), Pipeline::english().unwrap()).unwrap();

        assert_eq!(index.inverted(), restored.inverted());
    }

    #[test]
    fn test_pipeline_mismatch() {
        let json = index().to_json().unwrap();
        let other = Pipeline::new(Arc::new(RegexTokenizer::new().unwrap()))
            .add_filter(Arc::new(LowercaseFilter::new()));

        let err = Index::from_json(&json, other).unwrap_err();
        assert!(matches!(err, KestrelError::Snapshot(_)));
    }

    #[test]
    fn test_stop_list_mismatch() {
        let custom = Pipeline::new(Arc::new(RegexTokenizer::separator().unwrap()))
            .add_filter(Arc::new(TrimmerFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::from_words(vec!["foo"])))
            .add_filter(Arc::new(StemFilter::new()));
        let index = Index::build(
            IndexConfig::with_fields(["body"]),
            custom.clone(),
            vec![Document::new("a").with_field("body", "the foo plant")],
        )
        .unwrap();
        let json = index.to_json().unwrap();

        let err = Index::from_json(&json, Pipeline::english().unwrap()).unwrap_err();
        assert!(matches!(err, KestrelError::Snapshot(_)));

        let restored = Index::from_json(&json, custom).unwrap();
        assert_eq!(restored.search("the").unwrap().len(), 1);
        assert!(restored.search("foo").unwrap().is_empty());
    }

    #[test]
    fn test_tokenizer_mismatch() {
        let json = index().to_json().unwrap();
        let words = Pipeline::new(Arc::new(RegexTokenizer::new().unwrap()))
            .add_filter(Arc::new(TrimmerFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(StemFilter::new()));

        assert!(matches!(
            Index::from_json(&json, words),
            Err(KestrelError::Snapshot(_))
        ));
    }

    #[test]
    fn test_version_skew_is_accepted() {
        let mut snapshot = IndexSnapshot::new(&index());
        snapshot.version = "0.0.0".to_string();

        assert!(snapshot.into_index(Pipeline::english().unwrap()).is_ok());
    }

    #[test]
    fn test_malformed_input() {
        let pipeline = Pipeline::english().unwrap();

        assert!(matches!(
            Index::from_json("{\"version\": 1}", pipeline.clone()),
            Err(KestrelError::Json(_))
        ));
        assert!(matches!(
            Index::from_bytes(&[1, 2, 3], pipeline),
            Err(KestrelError::Bincode(_))
        ));
    }
}
