//! Lowercase filter implementation.

use crate::analysis::token::Token;
use crate::analysis::token_filter::TokenFilter;

/// A filter that converts tokens to lowercase.
///
/// ASCII text takes a fast path; anything else uses Unicode-aware lowercasing.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

fn lowercase(text: &str) -> String {
    if text.is_ascii() {
        text.to_ascii_lowercase()
    } else {
        text.to_lowercase()
    }
}

impl TokenFilter for LowercaseFilter {
    fn apply(&self, token: Token) -> Option<Token> {
        let lowered = lowercase(&token.text);
        Some(token.with_text(lowered))
    }

    fn name(&self) -> &str {
        "lowercase"
    }

    fn apply_literal(&self, literal: &str) -> String {
        lowercase(literal)
    }
}
