//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::args::{KestrelArgs, OutputFormat};
use crate::error::Result;
use crate::index::inverted::IndexStats;
use crate::search::result::SearchResult;

/// Result structure for index construction.
#[derive(Debug, Serialize)]
pub struct IndexBuildResult {
    pub path: String,
    pub documents: usize,
    pub fields: Vec<String>,
    pub terms: usize,
    pub snapshot_bytes: u64,
    pub duration_ms: u64,
}

/// Result structure for search operations.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub total_hits: usize,
    pub duration_ms: u64,
    pub hits: Vec<SearchResult>,
}

/// Types that know how to print themselves for a human reader.
pub trait HumanOutput {
    /// Write the human-readable form.
    fn write_human(&self, out: &mut dyn Write, args: &KestrelArgs) -> io::Result<()>;
}

impl HumanOutput for IndexBuildResult {
    fn write_human(&self, out: &mut dyn Write, args: &KestrelArgs) -> io::Result<()> {
        writeln!(out, "Indexed {} documents into {}", self.documents, self.path)?;

        if args.verbosity() > 1 {
            writeln!(out, "Fields: {}", self.fields.join(", "))?;
            writeln!(out, "Terms: {}", self.terms)?;
            writeln!(out, "Snapshot size: {}", format_bytes(self.snapshot_bytes))?;
            writeln!(out, "Build time: {}ms", self.duration_ms)?;
        }
        Ok(())
    }
}

impl HumanOutput for SearchResults {
    fn write_human(&self, out: &mut dyn Write, args: &KestrelArgs) -> io::Result<()> {
        if self.hits.is_empty() {
            writeln!(out, "No results for `{}`", self.query)?;
            return Ok(());
        }

        writeln!(out, "Search Results:")?;
        writeln!(out, "═══════════════")?;

        for (i, hit) in self.hits.iter().enumerate() {
            let terms: Vec<&str> = hit.match_data.terms().collect();
            writeln!(
                out,
                "{:>3}. {} (Score: {:.3}) [{}]",
                i + 1,
                hit.reference,
                hit.score,
                terms.join(", ")
            )?;

            if args.verbosity() > 1 {
                for (field, terms) in &hit.match_data.fields {
                    for (term, meta) in terms {
                        writeln!(
                            out,
                            "       {field}:{term} x{} at {:?}",
                            meta.frequency, meta.positions
                        )?;
                    }
                }
            }
        }

        writeln!(out)?;
        writeln!(out, "Total hits: {}", self.total_hits)?;
        if args.verbosity() > 1 {
            writeln!(out, "Search time: {}ms", self.duration_ms)?;
        }
        Ok(())
    }
}

impl HumanOutput for IndexStats {
    fn write_human(&self, out: &mut dyn Write, _args: &KestrelArgs) -> io::Result<()> {
        writeln!(out, "Index Statistics:")?;
        writeln!(out, "════════════════")?;
        writeln!(out, "Total documents: {}", self.document_count)?;

        for field in &self.fields {
            writeln!(out)?;
            writeln!(out, "Field: {}", field.name)?;
            writeln!(out, "  Unique terms: {}", field.vocabulary_size)?;
            writeln!(out, "  Average length: {:.1}", field.average_length)?;
        }
        Ok(())
    }
}

/// Output a result in the format selected on the command line.
pub fn output_result<T>(result: &T, args: &KestrelArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, result, args)
}

/// Write a result to `out` in the selected format.
pub fn write_result<T>(out: &mut dyn Write, result: &T, args: &KestrelArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                result.write_human(out, args)?;
            }
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

/// Format a byte count with a binary unit.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let unit = UNITS[unit_index];
    if unit_index == 0 {
        format!("{bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}
