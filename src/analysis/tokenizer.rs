//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of a [`Pipeline`](crate::analysis::Pipeline):
//! they split a field's raw text into an ordered sequence of tokens.
//!
//! # Available Tokenizers
//!
//! - [`regex::RegexTokenizer`] - Extracts matches of (or gaps between) a regex
//!
//! # Examples
//!
//! ```
//! use kestrel::analysis::tokenizer::Tokenizer;
//! use kestrel::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::new().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so that an index holding a tokenizer can
/// be shared between threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Identity of the tokenizer and its settings, recorded in index
    /// snapshots.
    fn signature(&self) -> String {
        self.name().to_string()
    }
}

pub mod regex;
