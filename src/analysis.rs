//! Text analysis for Kestrel.
//!
//! Raw field text flows through a [`Pipeline`]: a [`Tokenizer`] splits it into
//! [`Token`]s, then an ordered list of [`TokenFilter`]s rewrites or drops each
//! token. The same filters are applied to query terms so that inflected query
//! words meet the forms stored in the index.
//!
//! ```text
//! Text → Tokenizer → Trimmer → Lowercase → Stop words → Stemmer → Index
//! ```

pub mod pipeline;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use pipeline::Pipeline;
pub use token::Token;
pub use token_filter::TokenFilter;
pub use tokenizer::Tokenizer;
