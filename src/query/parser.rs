//! Query parser for converting query strings into clauses.
//!
//! Supported syntax, one clause per whitespace-separated word:
//! - Simple terms: `plant`
//! - Field-scoped terms: `title:plant`
//! - Wildcards: `pl*`, `*ant`, `pl*nt`
//! - Fuzzy terms: `plont~1`
//! - Boosts: `candlestick^5`
//!
//! `~N` and `^N` may follow the term in either order, each at most once.
//! Terms are kept as written; the index normalizes them with its pipeline
//! when the query runs. Every clause is optional: a document matching any
//! clause is a candidate, and matching more clauses scores higher.

use std::iter::Peekable;
use std::str::Chars;

use crate::config::IndexConfig;
use crate::error::{KestrelError, Result};
use crate::query::clause::Clause;

const FIELD_SEPARATOR: char = ':';
const EDIT_DISTANCE: char = '~';
const BOOST: char = '^';

/// Parses query strings against the fields of an index.
///
/// # Examples
///
/// ```
/// use kestrel::config::IndexConfig;
/// use kestrel::query::clause::Wildcard;
/// use kestrel::query::parser::QueryParser;
///
/// let config = IndexConfig::with_fields(["title", "body"]);
/// let parser = QueryParser::new(&config);
///
/// let clauses = parser.parse("title:Pl*  plont~1^2").unwrap();
/// assert_eq!(clauses.len(), 2);
/// assert_eq!(clauses[0].field_name(), Some("title"));
/// assert_eq!(clauses[0].wildcard(), Wildcard::Trailing);
/// assert_eq!(clauses[1].distance(), Some(1));
/// assert_eq!(clauses[1].boost_value(), 2.0);
///
/// assert!(parser.parse("author:plant").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryParser<'a> {
    config: &'a IndexConfig,
}

impl<'a> QueryParser<'a> {
    /// Create a parser that accepts the fields of `config`.
    pub fn new(config: &'a IndexConfig) -> Self {
        QueryParser { config }
    }

    /// Parse a query string. An empty query yields no clauses.
    pub fn parse(&self, query_str: &str) -> Result<Vec<Clause>> {
        query_str
            .split_whitespace()
            .map(|fragment| self.parse_clause(fragment))
            .collect()
    }

    /// Parse a single whitespace-free clause.
    pub fn parse_clause(&self, fragment: &str) -> Result<Clause> {
        let clause = ClauseParser::new(fragment).parse()?;

        clause.validate(self.config).map_err(|e| match e {
            KestrelError::QueryParse { message, .. } => KestrelError::query_parse(message, fragment),
            other => other,
        })?;

        Ok(clause)
    }
}

/// Internal parser for a single clause.
struct ClauseParser<'a> {
    fragment: &'a str,
    chars: Peekable<Chars<'a>>,
}

impl<'a> ClauseParser<'a> {
    fn new(fragment: &'a str) -> Self {
        ClauseParser {
            fragment,
            chars: fragment.chars().peekable(),
        }
    }

    fn error<S: Into<String>>(&self, message: S) -> KestrelError {
        KestrelError::query_parse(message, self.fragment)
    }

    fn parse(&mut self) -> Result<Clause> {
        let field = match self.fragment.split_once(FIELD_SEPARATOR) {
            Some(("", _)) => return Err(self.error("empty field name")),
            Some((field, rest)) => {
                self.chars = rest.chars().peekable();
                Some(field)
            }
            None => None,
        };

        let body = self.consume_until_modifier();
        if body.contains(FIELD_SEPARATOR) {
            return Err(self.error(format!("unexpected `{FIELD_SEPARATOR}` in term")));
        }
        if body.is_empty() {
            return Err(self.error("empty term"));
        }

        let mut clause = Clause::new(body);
        if let Some(field) = field {
            clause = clause.field(field);
        }

        let mut seen_distance = false;
        let mut seen_boost = false;

        while let Some(modifier) = self.chars.next() {
            let value = self.consume_until_modifier();

            if modifier == EDIT_DISTANCE {
                if seen_distance {
                    return Err(self.error("edit distance given more than once"));
                }
                seen_distance = true;
                clause = clause.edit_distance(self.parse_distance(&value)?);
            } else {
                if seen_boost {
                    return Err(self.error("boost given more than once"));
                }
                seen_boost = true;
                clause = clause.boost(self.parse_boost(&value)?);
            }
        }

        Ok(clause)
    }

    /// Consume characters up to the next `~` or `^`.
    fn consume_until_modifier(&mut self) -> String {
        let mut text = String::new();

        while let Some(&ch) = self.chars.peek() {
            if ch == EDIT_DISTANCE || ch == BOOST {
                break;
            }
            text.push(ch);
            self.chars.next();
        }

        text
    }

    fn parse_distance(&self, value: &str) -> Result<u32> {
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(self.error(format!("invalid edit distance `{value}`")));
        }

        value
            .parse::<u32>()
            .map_err(|e| self.error(format!("invalid edit distance `{value}`: {e}")))
    }

    fn parse_boost(&self, value: &str) -> Result<f64> {
        let valid_chars = value.chars().all(|c| c.is_ascii_digit() || c == '.');
        let boost = value
            .parse::<f64>()
            .ok()
            .filter(|_| valid_chars && !value.is_empty())
            .ok_or_else(|| self.error(format!("invalid boost `{value}`")))?;

        if boost <= 0.0 {
            return Err(self.error(format!("boost must be positive, got `{value}`")));
        }

        Ok(boost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::clause::{Presence, Wildcard};

    fn config() -> IndexConfig {
        IndexConfig::with_fields(["title", "body"])
    }

    fn parse(query: &str) -> Result<Vec<Clause>> {
        let config = config();
        QueryParser::new(&config).parse(query)
    }

    fn parse_one(query: &str) -> Clause {
        let mut clauses = parse(query).unwrap();
        assert_eq!(clauses.len(), 1, "{query}");
        clauses.remove(0)
    }

    #[test]
    fn test_simple_terms() {
        let clauses = parse("  fellow   Candlestick ").unwrap();

        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].term(), "fellow");
        assert_eq!(clauses[1].term(), "Candlestick");
        assert!(clauses.iter().all(|c| c.field_name().is_none()));
        assert!(clauses.iter().all(|c| c.boost_value() == 1.0));
        assert!(
            clauses
                .iter()
                .all(|c| c.presence_value() == Presence::Optional)
        );
    }

    #[test]
    fn test_empty_query() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse(" \t\n").unwrap().is_empty());
    }

    #[test]
    fn test_field_scope() {
        let clause = parse_one("title:plant");
        assert_eq!(clause.field_name(), Some("title"));
        assert_eq!(clause.term(), "plant");

        let err = parse("unknown-field:plant").unwrap_err();
        assert!(err.is_query_parse());
        assert!(err.to_string().contains("unknown-field"));

        assert!(parse(":plant").is_err());
        assert!(parse("title:").is_err());
        assert!(parse("title:body:plant").is_err());
    }

    #[test]
    fn test_wildcards() {
        assert_eq!(parse_one("candle*").wildcard(), Wildcard::Trailing);
        assert_eq!(parse_one("*ant").wildcard(), Wildcard::Leading);
        assert_eq!(parse_one("*lan*").wildcard(), Wildcard::Both);
        assert_eq!(parse_one("pl*nt").wildcard(), Wildcard::Contained);
        assert_eq!(parse_one("PL*").term(), "PL*");

        assert!(parse("*").is_err());
        assert!(parse("title:**").is_err());
    }

    #[test]
    fn test_edit_distance() {
        let clause = parse_one("plont~1");
        assert_eq!(clause.term(), "plont");
        assert_eq!(clause.distance(), Some(1));
        assert_eq!(parse_one("plant~0").distance(), Some(0));

        assert!(parse("plont~").is_err());
        assert!(parse("plont~x").is_err());
        assert!(parse("plont~-1").is_err());
        assert!(parse("plont~1.5").is_err());
        assert!(parse("plont~1~2").is_err());
        assert!(parse("~1").is_err());
    }

    #[test]
    fn test_boost() {
        assert_eq!(parse_one("candlestick^5").boost_value(), 5.0);
        assert_eq!(parse_one("candlestick^0.5").boost_value(), 0.5);

        assert!(parse("foo^").is_err());
        assert!(parse("foo^0").is_err());
        assert!(parse("foo^-2").is_err());
        assert!(parse("foo^abc").is_err());
        assert!(parse("foo^1^2").is_err());
        assert!(parse("foo^inf").is_err());
    }

    #[test]
    fn test_modifiers_in_either_order() {
        let a = parse_one("title:plont~1^2");
        let b = parse_one("title:plont^2~1");

        assert_eq!(a, b);
        assert_eq!(a.distance(), Some(1));
        assert_eq!(a.boost_value(), 2.0);
    }

    #[test]
    fn test_hyphenated_term_is_one_clause() {
        let clause = parse_one("title:Colonel-Mustard^2");

        assert_eq!(clause.term(), "Colonel-Mustard");
        assert_eq!(clause.field_name(), Some("title"));
        assert_eq!(clause.boost_value(), 2.0);
    }

    #[test]
    fn test_wildcard_with_fuzzy_is_rejected() {
        let err = parse("pl*~1").unwrap_err();
        assert!(err.is_query_parse());
    }

    #[test]
    fn test_error_reports_fragment() {
        let err = parse("plant title:x^zero").unwrap_err();
        match err {
            KestrelError::QueryParse { fragment, .. } => assert_eq!(fragment, "title:x^zero"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
