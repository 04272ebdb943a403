//! Command implementations for the Kestrel CLI.

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result, bail};

use crate::analysis::pipeline::Pipeline;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{IndexConfig, ScoringConfig};
use crate::document::Document;
use crate::index::Index;

/// Execute a CLI command.
pub fn execute_command(args: KestrelArgs) -> Result<()> {
    match &args.command {
        Command::Index(index_args) => build_index(index_args, &args),
        Command::Search(search_args) => search_index(search_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// Build the index configuration from command line arguments.
fn index_config(args: &IndexArgs) -> Result<IndexConfig> {
    let mut config = IndexConfig::new()
        .with_reference_field(args.reference_field.clone())
        .with_scoring(
            ScoringConfig::default().with_length_normalization(args.length_normalization),
        );

    for field in &args.fields {
        config = config.add_field(field.clone());
    }

    for name in &args.required {
        match config.fields.iter_mut().find(|f| &f.name == name) {
            Some(field) => field.required = true,
            None => bail!("--require names `{name}`, which is not an indexed --field"),
        }
    }

    config.validate()?;
    Ok(config)
}

/// Build an index snapshot from a document file.
fn build_index(args: &IndexArgs, cli_args: &KestrelArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        );
    }

    let config = index_config(args)?;
    let start_time = Instant::now();

    let input = fs::read_to_string(&args.document_file)
        .with_context(|| format!("failed to read {}", args.document_file.display()))?;
    let documents = Document::parse_many(&input, &config.reference_field)
        .with_context(|| format!("failed to parse {}", args.document_file.display()))?;

    log::info!(
        "Read {} documents from {}",
        documents.len(),
        args.document_file.display()
    );

    let fields = config.field_names().map(str::to_string).collect();
    let index = Index::build(config, Pipeline::english()?, documents)?;

    index
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    let snapshot_bytes = fs::metadata(&args.output).map(|m| m.len()).unwrap_or(0);
    let stats = index.stats();

    output_result(
        &IndexBuildResult {
            path: args.output.to_string_lossy().to_string(),
            documents: stats.document_count,
            fields,
            terms: stats.fields.iter().map(|f| f.vocabulary_size).sum(),
            snapshot_bytes,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )?;

    Ok(())
}

/// Load a snapshot written by `kestrel index`.
fn load_index(path: &std::path::Path) -> Result<Index> {
    Index::load(path, Pipeline::english()?)
        .with_context(|| format!("failed to load index {}", path.display()))
}

/// Search an index snapshot.
fn search_index(args: &SearchArgs, cli_args: &KestrelArgs) -> Result<()> {
    let index = load_index(&args.index_path)?;

    let start_time = Instant::now();
    let mut hits = index.search(&args.query)?;
    let duration = start_time.elapsed();

    let total_hits = hits.len();
    hits.truncate(args.limit);

    if !args.explain {
        for hit in &mut hits {
            hit.match_data.fields.clear();
        }
    }

    output_result(
        &SearchResults {
            query: args.query.clone(),
            total_hits,
            duration_ms: duration.as_millis() as u64,
            hits,
        },
        cli_args,
    )?;

    Ok(())
}

/// Show statistics of an index snapshot.
fn show_stats(args: &StatsArgs, cli_args: &KestrelArgs) -> Result<()> {
    let index = load_index(&args.index_path)?;
    output_result(&index.stats(), cli_args)?;
    Ok(())
}
