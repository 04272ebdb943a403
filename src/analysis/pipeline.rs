//! Token pipeline: a tokenizer followed by an ordered list of token filters.
//!
//! The pipeline is injected into the index at build time and reused for query
//! terms, so indexing and querying always normalize text the same way.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use kestrel::analysis::pipeline::Pipeline;
//! use kestrel::analysis::token_filter::lowercase::LowercaseFilter;
//! use kestrel::analysis::token_filter::stop::StopFilter;
//! use kestrel::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let pipeline = Pipeline::new(Arc::new(RegexTokenizer::new().unwrap()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])));
//!
//! let tokens = pipeline.analyze("Hello THE world AND test").unwrap();
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["hello", "world", "test"]);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::token::Token;
use crate::analysis::token_filter::TokenFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::token_filter::trimmer::TrimmerFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;
use crate::query::clause::WILDCARD;

/// A tokenizer combined with a chain of filters.
#[derive(Clone)]
pub struct Pipeline {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn TokenFilter>>,
}

impl Pipeline {
    /// Create a pipeline with the given tokenizer and no filters.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Pipeline {
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// The default English pipeline.
    ///
    /// Splits on whitespace and hyphens, then trims punctuation, lowercases,
    /// removes English stop words and applies the Porter stemmer.
    pub fn english() -> Result<Self> {
        Ok(Self::new(Arc::new(RegexTokenizer::separator()?))
            .add_filter(Arc::new(TrimmerFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(StemFilter::new())))
    }

    /// Append a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Get the tokenizer used by this pipeline.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this pipeline, in application order.
    pub fn filters(&self) -> &[Arc<dyn TokenFilter>] {
        &self.filters
    }

    /// Names of the filters, in application order.
    pub fn filter_names(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.name().to_string()).collect()
    }

    /// Run a single token through every filter.
    pub fn run_token(&self, token: Token) -> Option<Token> {
        self.filters
            .iter()
            .try_fold(token, |token, filter| filter.apply(token))
    }

    /// Tokenize `text` and run every token through the filters.
    pub fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self
            .tokenizer
            .tokenize(text)?
            .filter_map(|token| self.run_token(token))
            .collect())
    }

    /// Normalize a single query term with the filters (the tokenizer is not
    /// applied). Returns `None` when a filter drops the term.
    pub fn run_term(&self, term: &str) -> Option<String> {
        self.run_token(Token::new(term, 0)).map(|token| token.text)
    }

    /// Normalize a wildcard pattern. Stars are kept and the literal runs
    /// between them pass through [`TokenFilter::apply_literal`] of every
    /// filter, so a pipeline that folds case at index time folds the pattern
    /// too.
    pub fn run_pattern(&self, pattern: &str) -> String {
        pattern
            .split(WILDCARD)
            .map(|literal| {
                self.filters
                    .iter()
                    .fold(literal.to_string(), |text, filter| filter.apply_literal(&text))
            })
            .collect::<Vec<_>>()
            .join(&WILDCARD.to_string())
    }

    /// Tokenizer and filter signatures, in application order.
    pub fn signature(&self) -> Vec<String> {
        std::iter::once(self.tokenizer.signature())
            .chain(self.filters.iter().map(|f| f.signature()))
            .collect()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &self.filter_names())
            .finish()
    }
}
