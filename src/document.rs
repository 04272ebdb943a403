//! Documents accepted by the index builder.
//!
//! A [`Document`] is an application-supplied reference plus raw text per
//! field. Documents can be built directly or read from JSON objects, either a
//! JSON array of objects or one object per line (JSONL).
//!
//! # Examples
//!
//! ```
//! use kestrel::document::Document;
//!
//! let doc = Document::new("b")
//!     .with_field("title", "Plumb waters plant")
//!     .with_field("body", "Professor Plumb has a green plant in his study");
//!
//! assert_eq!(doc.reference(), "b");
//! assert_eq!(doc.field("title"), Some("Plumb waters plant"));
//! assert_eq!(doc.field("author"), None);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{KestrelError, Result};

/// A document to be indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    reference: String,
    fields: BTreeMap<String, String>,
}

impl Document {
    /// Create a document with no field text.
    pub fn new<S: Into<String>>(reference: S) -> Self {
        Document {
            reference: reference.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set the text of a field.
    pub fn with_field<N: Into<String>, T: Into<String>>(mut self, name: N, text: T) -> Self {
        self.fields.insert(name.into(), text.into());
        self
    }

    /// The document reference.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The text of a field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// All field texts by name.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Build a document from a JSON object.
    ///
    /// The reference is read from `reference_field` and may be a string or a
    /// number. Other keys become fields: strings are taken as-is, numbers and
    /// booleans are stringified, arrays of scalars are joined with spaces.
    /// Nulls and nested objects are skipped.
    pub fn from_json(value: &Value, reference_field: &str) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            KestrelError::invalid_document(format!("expected a JSON object, got {value}"))
        })?;

        let reference = match object.get(reference_field) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(KestrelError::invalid_document(format!(
                    "reference `{reference_field}` must be a non-empty string or number, got {other}"
                )));
            }
            None => {
                return Err(KestrelError::invalid_document(format!(
                    "missing reference field `{reference_field}`"
                )));
            }
        };

        let fields = object
            .iter()
            .filter(|(key, _)| key.as_str() != reference_field)
            .filter_map(|(key, value)| json_text(value).map(|text| (key.clone(), text)))
            .collect();

        Ok(Document { reference, fields })
    }

    /// Parse a JSON array of objects, or JSONL with one object per line.
    pub fn parse_many(input: &str, reference_field: &str) -> Result<Vec<Self>> {
        let trimmed = input.trim_start();

        if trimmed.starts_with('[') {
            let values: Vec<Value> = serde_json::from_str(trimmed)?;
            return values
                .iter()
                .map(|value| Self::from_json(value, reference_field))
                .collect();
        }

        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let value: Value = serde_json::from_str(line)?;
                Self::from_json(&value, reference_field)
            })
            .collect()
    }
}

fn json_scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(json_scalar_text).collect();
            Some(parts.join(" "))
        }
        other => json_scalar_text(other),
    }
}
