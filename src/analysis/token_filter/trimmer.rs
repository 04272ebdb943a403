//! Trimmer filter implementation.

use crate::analysis::token::Token;
use crate::analysis::token_filter::TokenFilter;

/// A filter that removes non-word characters from both ends of a token.
///
/// Word characters are alphanumerics and `_`. A token made only of
/// punctuation trims to nothing and is dropped. Interior punctuation is kept.
#[derive(Clone, Debug, Default)]
pub struct TrimmerFilter;

impl TrimmerFilter {
    /// Create a new trimmer filter.
    pub fn new() -> Self {
        TrimmerFilter
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl TokenFilter for TrimmerFilter {
    fn apply(&self, token: Token) -> Option<Token> {
        let trimmed = token.text.trim_matches(|c: char| !is_word_char(c));
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == token.text.len() {
            Some(token)
        } else {
            let trimmed = trimmed.to_string();
            Some(token.with_text(trimmed))
        }
    }

    fn name(&self) -> &str {
        "trimmer"
    }
}
