//! Command-line interface for accession-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **classify**: Classify one or more accessions
//! - **rules**: Summarize, inspect, or export a rules document
//! - **fetch**: Download NCBI's prefix tables into a rules document
//!
//! ## Usage
//!
//! ```text
//! # Classify against the embedded rules
//! accession-solver classify AE014297 NC_000962
//!
//! # Use a custom rules document, JSON output
//! accession-solver classify --rules accession_rules.json ERR5413122 --format json
//!
//! # Classify a list, one accession per line
//! cut -f1 samples.tsv | accession-solver classify --input -
//!
//! # Refresh the rules from NCBI
//! accession-solver fetch --output accession_rules.json
//! ```

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::rules::index::RuleIndex;

pub mod classify;
pub mod fetch;
pub mod rules;

#[derive(Parser)]
#[command(name = "accession-solver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Classify sequence database accessions by prefix")]
#[command(
    long_about = "accession-solver tells you which database an accession belongs to and what kind of record it names, from the accession's letter prefix alone.\n\nIt reports:\n- The owning database (GenBank, EMBL, DDBJ, NCBI)\n- The record type (nucleotide, protein, SRA, WGS, MGA, or the RefSeq molecule type)\n- A description of the accession series"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify accessions
    Classify(classify::ClassifyArgs),

    /// Inspect or export a rules document
    Rules(rules::RulesArgs),

    /// Fetch accession rules from NCBI
    Fetch(fetch::FetchArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Compile the rules document at `path`, or the embedded one
pub(crate) fn load_index(path: Option<&Path>, verbose: bool) -> anyhow::Result<RuleIndex> {
    let index = if let Some(path) = path {
        RuleIndex::load_from_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?
    } else {
        RuleIndex::load_embedded().context("Failed to load embedded rules")?
    };

    if verbose {
        eprintln!(
            "Loaded {} rules ({} RefSeq) across {} prefix lengths",
            index.len(),
            index.refseq_rules().len(),
            index.prefix_lengths().count()
        );
    }

    Ok(index)
}
