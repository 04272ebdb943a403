//! Command line argument parsing for the Kestrel CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;

/// Kestrel - an in-process full-text search engine
#[derive(Parser, Debug, Clone)]
#[command(name = "kestrel")]
#[command(about = "Build and query full-text search index snapshots")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KestrelArgs {
    /// Verbosity level (repeat for more: -v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KestrelArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build an index snapshot from a document file
    Index(IndexArgs),

    /// Search an index snapshot
    Search(SearchArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Arguments for building an index
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Document file (JSON array or JSONL)
    #[arg(value_name = "DOCUMENT_FILE")]
    pub document_file: PathBuf,

    /// Output snapshot path (`.json` for JSON, anything else for binary)
    #[arg(short, long, value_name = "SNAPSHOT")]
    pub output: PathBuf,

    /// Document key holding the reference
    #[arg(short, long = "ref", default_value = "id")]
    pub reference_field: String,

    /// Field to index, optionally with a boost (`body^2`)
    #[arg(long = "field", value_name = "FIELD[^BOOST]", required = true, value_parser = parse_field_spec)]
    pub fields: Vec<FieldConfig>,

    /// Field every document must supply
    #[arg(long = "require", value_name = "FIELD")]
    pub required: Vec<String>,

    /// Field-length normalization strength in [0, 1]
    #[arg(long, default_value = "0.0")]
    pub length_normalization: f64,

    /// Overwrite an existing snapshot
    #[arg(long)]
    pub force: bool,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Index snapshot path
    #[arg(value_name = "SNAPSHOT")]
    pub index_path: PathBuf,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Include per-field match details
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for index statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Index snapshot path
    #[arg(value_name = "SNAPSHOT")]
    pub index_path: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

/// Parse a `name` or `name^boost` field specification.
pub fn parse_field_spec(spec: &str) -> Result<FieldConfig, String> {
    let (name, boost) = match spec.split_once('^') {
        Some((name, boost)) => {
            let boost: f64 = boost
                .parse()
                .map_err(|e| format!("invalid boost in `{spec}`: {e}"))?;
            (name, boost)
        }
        None => (spec, 1.0),
    };

    if name.is_empty() {
        return Err(format!("missing field name in `{spec}`"));
    }
    if !boost.is_finite() || boost <= 0.0 {
        return Err(format!("boost must be positive in `{spec}`"));
    }

    Ok(FieldConfig::new(name).with_boost(boost))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_spec() {
        let plain = parse_field_spec("title").unwrap();
        assert_eq!(plain.name, "title");
        assert_eq!(plain.boost, 1.0);

        let boosted = parse_field_spec("body^2.5").unwrap();
        assert_eq!(boosted.name, "body");
        assert_eq!(boosted.boost, 2.5);

        assert!(parse_field_spec("^2").is_err());
        assert!(parse_field_spec("body^x").is_err());
        assert!(parse_field_spec("body^0").is_err());
    }

    #[test]
    fn test_parse_index_command() {
        let args = KestrelArgs::try_parse_from([
            "kestrel",
            "-vv",
            "index",
            "docs.jsonl",
            "-o",
            "index.bin",
            "--field",
            "title^2",
            "--field",
            "body",
            "--require",
            "title",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 3);
        match args.command {
            Command::Index(index) => {
                assert_eq!(index.reference_field, "id");
                assert_eq!(index.fields.len(), 2);
                assert_eq!(index.fields[0].boost, 2.0);
                assert_eq!(index.required, vec!["title"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_search_command() {
        let args = KestrelArgs::try_parse_from([
            "kestrel",
            "search",
            "index.json",
            "pl* green",
            "--limit",
            "3",
            "--format",
            "json",
            "-q",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 0);
        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Search(search) => {
                assert_eq!(search.query, "pl* green");
                assert_eq!(search.limit, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_index_requires_a_field() {
        let result =
            KestrelArgs::try_parse_from(["kestrel", "index", "docs.json", "-o", "out.json"]);
        assert!(result.is_err());
    }
}
