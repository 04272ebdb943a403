//! Scoring and ranking of matched documents.

pub mod result;
pub mod scorer;

pub use result::{MatchData, SearchResult, TermMetadata};
pub use scorer::Scorer;
