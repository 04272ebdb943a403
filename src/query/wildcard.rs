//! Wildcard patterns over vocabulary terms.
//!
//! Only `*` is special: it matches zero or more characters. Everything else
//! is literal, so a pattern is compiled to an anchored regex with each
//! literal segment escaped.

use regex::Regex;

use crate::error::{KestrelError, Result};
use crate::query::clause::WILDCARD;

/// A compiled wildcard pattern.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    /// The wildcard pattern.
    pattern: String,
    /// The compiled regex for matching.
    regex: Regex,
    /// Literal text before the first star.
    literal_prefix: String,
}

impl WildcardPattern {
    /// Compile a wildcard pattern.
    pub fn new<S: Into<String>>(pattern: S) -> Result<Self> {
        let pattern = pattern.into();
        let regex = Self::compile_pattern(&pattern)?;
        let literal_prefix = pattern
            .split(WILDCARD)
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(WildcardPattern {
            pattern,
            regex,
            literal_prefix,
        })
    }

    /// Compile a wildcard pattern into a regex.
    fn compile_pattern(pattern: &str) -> Result<Regex> {
        let body = pattern
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        Regex::new(&format!("^{body}$"))
            .map_err(|e| KestrelError::analysis(format!("Invalid wildcard pattern: {e}")))
    }

    /// Get the wildcard pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Literal text every match must start with. Empty for leading stars.
    pub fn literal_prefix(&self) -> &str {
        &self.literal_prefix
    }

    /// Check if a term matches the wildcard pattern.
    pub fn matches(&self, term: &str) -> bool {
        self.regex.is_match(term)
    }
}
