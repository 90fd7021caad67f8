use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};

use crate::cli::{load_index, OutputFormat};
use crate::rules::document::RulesDocument;
use crate::rules::index::{RuleEntry, RuleIndex};
use crate::rules::matcher::PrefixMatcher;

#[derive(Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommands,
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// Summarize rule counts per prefix length
    Summary {
        /// Path to a rules document (defaults to the embedded rules)
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Show the rules for one prefix length, in match order
    Show {
        /// Prefix length (1-6) or "refseq"
        #[arg(required = true)]
        bucket: String,

        /// Path to a rules document (defaults to the embedded rules)
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Export the rules document as JSON
    Export {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to a rules document to export (defaults to the embedded rules)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

pub fn run(args: RulesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        RulesCommands::Summary { rules } => {
            let index = load_index(rules.as_deref(), verbose)?;
            run_summary(&index, format)
        }
        RulesCommands::Show { bucket, rules } => {
            let index = load_index(rules.as_deref(), verbose)?;
            run_show(&index, &bucket, format)
        }
        RulesCommands::Export { output, rules } => run_export(output, rules),
    }
}

fn run_summary(index: &RuleIndex, format: OutputFormat) -> anyhow::Result<()> {
    let rows: Vec<(String, usize)> = index
        .prefix_lengths()
        .map(|len| (len.to_string(), index.bucket(len).map_or(0, <[RuleEntry]>::len)))
        .chain(std::iter::once((
            "refseq".to_string(),
            index.refseq_rules().len(),
        )))
        .collect();

    match format {
        OutputFormat::Text => {
            println!("Accession Rules ({} total)\n", index.len());
            println!("{:<8} {:>6}", "Bucket", "Rules");
            println!("{}", "-".repeat(15));
            for (bucket, count) in &rows {
                println!("{bucket:<8} {count:>6}");
            }
        }
        OutputFormat::Json => {
            let buckets: serde_json::Map<String, serde_json::Value> = rows
                .into_iter()
                .map(|(bucket, count)| (bucket, serde_json::json!(count)))
                .collect();
            let output = serde_json::json!({
                "total": index.len(),
                "buckets": buckets,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("bucket\trules");
            for (bucket, count) in &rows {
                println!("{bucket}\t{count}");
            }
        }
    }

    Ok(())
}

fn run_show(index: &RuleIndex, bucket: &str, format: OutputFormat) -> anyhow::Result<()> {
    let entries = if bucket.eq_ignore_ascii_case("refseq") {
        index.refseq_rules()
    } else {
        let len: usize = bucket
            .parse()
            .with_context(|| format!("Bucket must be a prefix length or 'refseq', got '{bucket}'"))?;
        index
            .bucket(len)
            .ok_or_else(|| anyhow::anyhow!("No rules for {len}-letter prefixes"))?
    };

    match format {
        OutputFormat::Text => {
            for (i, entry) in entries.iter().enumerate() {
                println!(
                    "{:>4}  {:<16} {:<18} {:<10} {}",
                    i + 1,
                    entry.matcher.to_string(),
                    entry.database,
                    entry.molecule_type,
                    entry.description
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = entries
                .iter()
                .map(|entry| {
                    let mut json = serde_json::json!({
                        "prefix": entry.matcher.to_string(),
                        "database": entry.database,
                        "molecule_type": entry.molecule_type,
                        "description": entry.description,
                    });
                    if let PrefixMatcher::Range(range) = &entry.matcher {
                        json["range"] = serde_json::json!({
                            "fixed_prefix": range.prefix(),
                            "suffix_length": range.suffix_length(),
                        });
                    }
                    json
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("rank\tprefix\tdatabase\tmolecule_type\tdescription");
            for (i, entry) in entries.iter().enumerate() {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    i + 1,
                    entry.matcher,
                    entry.database,
                    entry.molecule_type,
                    entry.description
                );
            }
        }
    }

    Ok(())
}

fn run_export(output: Option<PathBuf>, rules_path: Option<PathBuf>) -> anyhow::Result<()> {
    let document = if let Some(path) = rules_path {
        RulesDocument::load_from_file(&path)?
    } else {
        RulesDocument::load_embedded()?
    };

    // Refuse to export a document that would not compile
    RuleIndex::compile(&document)?;

    let json = document.to_json()?;
    if let Some(output) = output {
        std::fs::write(&output, json)?;
        eprintln!(
            "Exported {} rule rows to {}",
            document.len(),
            output.display()
        );
    } else {
        println!("{json}");
    }

    Ok(())
}
