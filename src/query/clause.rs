//! Query clauses.
//!
//! A [`Clause`] is one parsed unit of a query: a term, an optional field
//! scope, the matching mode and a boost. Clauses can be produced by the
//! [`QueryParser`](crate::query::parser::QueryParser) or built directly.
//!
//! # Examples
//!
//! ```
//! use kestrel::query::clause::{Clause, Presence, Wildcard};
//!
//! let clause = Clause::new("pl*").field("title").boost(2.0);
//! assert_eq!(clause.wildcard(), Wildcard::Trailing);
//! assert_eq!(clause.to_string(), "title:pl*^2");
//!
//! let fuzzy = Clause::new("plont").edit_distance(1).presence(Presence::Required);
//! assert_eq!(fuzzy.to_string(), "+plont~1");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::IndexConfig;
use crate::error::{KestrelError, Result};

/// Wildcard character in query terms.
pub const WILDCARD: char = '*';

/// Where a clause term carries wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wildcard {
    /// No wildcard; the term must match exactly.
    None,
    /// `*term`: the vocabulary term must end with the literal.
    Leading,
    /// `term*`: the vocabulary term must start with the literal.
    Trailing,
    /// `*term*`: the vocabulary term must contain the literal.
    Both,
    /// `te*rm`: a star inside the term; prefix and suffix must both match.
    Contained,
}

impl Wildcard {
    /// Classify a term by the position of its stars.
    pub fn classify(term: &str) -> Self {
        let last = term.char_indices().last().map(|(i, _)| i);
        let (mut leading, mut trailing, mut interior) = (false, false, false);

        for (i, _) in term.char_indices().filter(|&(_, c)| c == WILDCARD) {
            if i == 0 {
                leading = true;
            } else if Some(i) == last {
                trailing = true;
            } else {
                interior = true;
            }
        }

        match (leading, trailing, interior) {
            (_, _, true) => Wildcard::Contained,
            (false, false, false) => Wildcard::None,
            (true, false, false) => Wildcard::Leading,
            (false, true, false) => Wildcard::Trailing,
            (true, true, false) => Wildcard::Both,
        }
    }
}

/// Whether a document must match a clause to be returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presence {
    /// Matching the clause adds to the score but is not needed.
    #[default]
    Optional,
    /// Documents that do not match the clause are dropped.
    Required,
}

/// A single query clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    term: String,
    field: Option<String>,
    wildcard: Wildcard,
    edit_distance: Option<u32>,
    boost: f64,
    presence: Presence,
}

impl Clause {
    /// Create an optional clause with boost 1. Stars in `term` set the
    /// wildcard mode.
    pub fn new<S: Into<String>>(term: S) -> Self {
        let term = term.into();
        Clause {
            wildcard: Wildcard::classify(&term),
            term,
            field: None,
            edit_distance: None,
            boost: 1.0,
            presence: Presence::Optional,
        }
    }

    /// Restrict the clause to one field.
    pub fn field<S: Into<String>>(mut self, field: S) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Match vocabulary terms within `distance` edits.
    pub fn edit_distance(mut self, distance: u32) -> Self {
        self.edit_distance = Some(distance);
        self
    }

    /// Set the clause boost.
    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    /// Set whether the clause is required.
    pub fn presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    /// Replace the term, keeping every modifier.
    pub(crate) fn with_term<S: Into<String>>(mut self, term: S) -> Self {
        self.term = term.into();
        self.wildcard = Wildcard::classify(&self.term);
        self
    }

    /// The clause term, including any stars.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The field the clause is bound to, if any.
    pub fn field_name(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// The wildcard mode.
    pub fn wildcard(&self) -> Wildcard {
        self.wildcard
    }

    /// The fuzzy edit distance, if any.
    pub fn distance(&self) -> Option<u32> {
        self.edit_distance
    }

    /// The boost multiplier.
    pub fn boost_value(&self) -> f64 {
        self.boost
    }

    /// Whether the clause is optional or required.
    pub fn presence_value(&self) -> Presence {
        self.presence
    }

    /// Whether the clause is required.
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    /// Check the clause against an index configuration.
    pub fn validate(&self, config: &IndexConfig) -> Result<()> {
        let fragment = self.to_string();

        if self.term.chars().all(|c| c == WILDCARD) {
            return Err(KestrelError::query_parse("empty term", fragment));
        }
        if let Some(field) = &self.field {
            if config.field(field).is_none() {
                return Err(KestrelError::query_parse(
                    format!("unknown field `{field}`"),
                    fragment,
                ));
            }
        }
        if !self.boost.is_finite() || self.boost <= 0.0 {
            return Err(KestrelError::query_parse(
                format!("boost must be a positive number, got {}", self.boost),
                fragment,
            ));
        }
        if self.wildcard != Wildcard::None && self.edit_distance.is_some() {
            return Err(KestrelError::query_parse(
                "wildcards cannot be combined with an edit distance",
                fragment,
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.presence == Presence::Required {
            write!(f, "+")?;
        }
        if let Some(field) = &self.field {
            write!(f, "{field}:")?;
        }
        write!(f, "{}", self.term)?;
        if let Some(distance) = self.edit_distance {
            write!(f, "~{distance}")?;
        }
        if self.boost != 1.0 {
            write!(f, "^{}", self.boost)?;
        }
        Ok(())
    }
}
