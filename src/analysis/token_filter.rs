//! Token filters: per-token transforms applied after tokenization.
//!
//! Each filter maps one token to zero or one token. Returning `None` removes
//! the token from the stream (stop words, tokens trimmed to nothing).
//!
//! # Available Filters
//!
//! - [`trimmer::TrimmerFilter`] - Strips non-word characters from token edges
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Removes stop words
//! - [`stem::StemFilter`] - Reduces words to their stem form
//! - [`FnFilter`] - Wraps a closure
//!
//! # Examples
//!
//! ```
//! use kestrel::analysis::token::Token;
//! use kestrel::analysis::token_filter::TokenFilter;
//! use kestrel::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let filter = LowercaseFilter::new();
//! let token = filter.apply(Token::new("Hello", 0)).unwrap();
//! assert_eq!(token.text, "hello");
//! ```

use std::fmt;

use crate::analysis::token::Token;

/// Trait for filters that transform single tokens.
///
/// Filters must be pure: the same input token always yields the same output,
/// because they run both when documents are indexed and when query terms are
/// normalized.
pub trait TokenFilter: Send + Sync {
    /// Transform a token, or drop it by returning `None`.
    fn apply(&self, token: Token) -> Option<Token>;

    /// Get the name of this filter.
    fn name(&self) -> &str;

    /// Normalize a literal run of a wildcard pattern.
    ///
    /// Only case folding filters override this. Stemming or stop lists do not
    /// apply to partial words.
    fn apply_literal(&self, literal: &str) -> String {
        literal.to_string()
    }

    /// Identity of the filter and its settings, recorded in index snapshots
    /// and compared when a snapshot is loaded back with a pipeline.
    fn signature(&self) -> String {
        self.name().to_string()
    }
}

/// A filter backed by a closure.
///
/// ```
/// use kestrel::analysis::token::Token;
/// use kestrel::analysis::token_filter::{FnFilter, TokenFilter};
///
/// let no_digits = FnFilter::new("no_digits", |token: Token| {
///     if token.text.chars().all(|c| c.is_ascii_digit()) {
///         None
///     } else {
///         Some(token)
///     }
/// });
/// assert!(no_digits.apply(Token::new("1999", 0)).is_none());
/// ```
pub struct FnFilter<F> {
    name: String,
    func: F,
}

impl<F> FnFilter<F>
where
    F: Fn(Token) -> Option<Token> + Send + Sync,
{
    /// Create a named filter from a closure.
    pub fn new<S: Into<String>>(name: S, func: F) -> Self {
        FnFilter {
            name: name.into(),
            func,
        }
    }
}

impl<F> TokenFilter for FnFilter<F>
where
    F: Fn(Token) -> Option<Token> + Send + Sync,
{
    fn apply(&self, token: Token) -> Option<Token> {
        (self.func)(token)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFilter").field("name", &self.name).finish()
    }
}

pub mod lowercase;
pub mod stem;
pub mod stop;
pub mod trimmer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_filter() {
        let filter = FnFilter::new("reverse", |token: Token| {
            let reversed: String = token.text.chars().rev().collect();
            Some(token.with_text(reversed))
        });

        assert_eq!(filter.name(), "reverse");
        assert_eq!(filter.apply(Token::new("abc", 2)).unwrap().text, "cba");
        assert_eq!(format!("{filter:?}"), "FnFilter { name: \"reverse\" }");
    }
}
