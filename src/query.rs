//! Query parsing and term expansion.
//!
//! A query string is parsed into [`Clause`]s, and each clause is expanded
//! against the vocabulary into the concrete terms it matches.

pub mod clause;
pub mod matcher;
pub mod parser;
pub mod wildcard;

pub use clause::{Clause, Presence, Wildcard};
pub use matcher::{Expansion, TermMatch, TermMatcher};
pub use parser::QueryParser;
pub use wildcard::WildcardPattern;
