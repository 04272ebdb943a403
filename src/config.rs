//! Index configuration.
//!
//! An [`IndexConfig`] names the document reference key, the indexed fields
//! with their boosts, and the scoring parameters. It is stored inside index
//! snapshots so a loaded index scores exactly like the one that was saved.
//!
//! # Examples
//!
//! ```
//! use kestrel::config::{FieldConfig, IndexConfig};
//!
//! let config = IndexConfig::new()
//!     .with_reference_field("slug")
//!     .add_field(FieldConfig::new("title").with_boost(2.0))
//!     .add_field(FieldConfig::new("body"));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.field("title").unwrap().boost, 2.0);
//! ```

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{KestrelError, Result};

/// Configuration for one indexed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Field name, as used in documents and in `field:term` queries.
    pub name: String,

    /// Multiplier applied to every score contribution from this field.
    pub boost: f64,

    /// Whether every document must supply text for this field.
    pub required: bool,
}

impl FieldConfig {
    /// Create an optional field with boost 1.0.
    pub fn new<S: Into<String>>(name: S) -> Self {
        FieldConfig {
            name: name.into(),
            boost: 1.0,
            required: false,
        }
    }

    /// Set the field boost.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    /// Mark the field as required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Scoring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Field-length normalization strength in `[0, 1]`.
    ///
    /// At 0 the field length is ignored. At 1 a term in a field twice the
    /// average length contributes half as much.
    pub length_normalization: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            length_normalization: 0.0,
        }
    }
}

impl ScoringConfig {
    /// Set the length normalization strength.
    pub fn with_length_normalization(mut self, b: f64) -> Self {
        self.length_normalization = b;
        self
    }
}

/// Configuration of an index: reference key, fields and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Key holding the document reference when documents are read from JSON.
    pub reference_field: String,

    /// Indexed fields, in declaration order.
    pub fields: Vec<FieldConfig>,

    /// Scoring parameters.
    pub scoring: ScoringConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            reference_field: "id".to_string(),
            fields: Vec::new(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl IndexConfig {
    /// Create an empty configuration with reference key `id`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with the given fields at boost 1.0.
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        fields
            .into_iter()
            .fold(Self::default(), |config, name| {
                config.add_field(FieldConfig::new(name))
            })
    }

    /// Set the reference key.
    pub fn with_reference_field<S: Into<String>>(mut self, reference_field: S) -> Self {
        self.reference_field = reference_field.into();
        self
    }

    /// Add a field.
    pub fn add_field(mut self, field: FieldConfig) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the scoring parameters.
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all fields, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Check the configuration for problems that would make an index unusable.
    pub fn validate(&self) -> Result<()> {
        if self.reference_field.is_empty() {
            return Err(KestrelError::invalid_config("reference field name is empty"));
        }
        if self.fields.is_empty() {
            return Err(KestrelError::invalid_config("at least one field is required"));
        }

        let mut seen = AHashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(KestrelError::invalid_config("field name is empty"));
            }
            if field.name.contains(':') || field.name.chars().any(char::is_whitespace) {
                return Err(KestrelError::invalid_config(format!(
                    "field name `{}` may not contain `:` or whitespace",
                    field.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(KestrelError::invalid_config(format!(
                    "field `{}` is declared twice",
                    field.name
                )));
            }
            if !field.boost.is_finite() || field.boost <= 0.0 {
                return Err(KestrelError::invalid_config(format!(
                    "field `{}` has invalid boost {}",
                    field.name, field.boost
                )));
            }
        }

        let b = self.scoring.length_normalization;
        if !(0.0..=1.0).contains(&b) {
            return Err(KestrelError::invalid_config(format!(
                "length normalization must be within [0, 1], got {b}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_fields() {
        let config = IndexConfig::with_fields(["title", "body"]);

        assert_eq!(config.reference_field, "id");
        assert_eq!(config.field_names().collect::<Vec<_>>(), vec!["title", "body"]);
        assert!(config.fields.iter().all(|f| f.boost == 1.0 && !f.required));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        assert!(IndexConfig::new().validate().is_err());
        assert!(IndexConfig::with_fields(["title", "title"]).validate().is_err());
        assert!(
            IndexConfig::with_fields(["title", "body", "title"])
                .validate()
                .unwrap_err()
                .to_string()
                .contains("declared twice")
        );
        assert!(IndexConfig::with_fields(["a:b"]).validate().is_err());
        assert!(IndexConfig::with_fields(["a b"]).validate().is_err());

        let zero_boost = IndexConfig::new().add_field(FieldConfig::new("title").with_boost(0.0));
        assert!(zero_boost.validate().is_err());

        let nan_boost =
            IndexConfig::new().add_field(FieldConfig::new("title").with_boost(f64::NAN));
        assert!(nan_boost.validate().is_err());

        let bad_norm = IndexConfig::with_fields(["title"])
            .with_scoring(ScoringConfig::default().with_length_normalization(1.5));
        assert!(bad_norm.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = IndexConfig::with_fields(["title"])
            .add_field(FieldConfig::new("body").with_boost(0.5).required(true));

        let json = serde_json::to_string(&config).unwrap();
        let restored: IndexConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
