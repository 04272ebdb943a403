//! # Kestrel
//!
//! An in-process full-text search library.
//!
//! ## Features
//!
//! - Batch-built, immutable inverted index
//! - Pluggable text analysis pipeline with an English default
//! - Field-scoped, wildcard, fuzzy and boosted query terms
//! - TF-IDF scoring with deterministic ranking
//! - JSON and binary index snapshots
//!
//! ## Example
//!
//! ```
//! use kestrel::prelude::*;
//!
//! let index = Index::build(
//!     IndexConfig::with_fields(["title", "body"]),
//!     Pipeline::english().unwrap(),
//!     vec![
//!         Document::new("a").with_field("title", "Mr. Green kills Colonel Mustard"),
//!         Document::new("c").with_field("body", "Miss Scarlett watered the plant"),
//!     ],
//! )
//! .unwrap();
//!
//! let results = index.search("scarlett").unwrap();
//! assert_eq!(results[0].reference, "c");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod search;
pub mod util;

pub mod prelude {
    pub use crate::analysis::pipeline::Pipeline;
    pub use crate::config::{FieldConfig, IndexConfig, ScoringConfig};
    pub use crate::document::Document;
    pub use crate::error::{KestrelError, Result};
    pub use crate::index::{Index, IndexBuilder};
    pub use crate::query::{Clause, Presence, Wildcard};
    pub use crate::search::{MatchData, SearchResult};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
