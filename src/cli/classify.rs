use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::{load_index, OutputFormat};
use crate::core::types::Classification;
use crate::matching::engine::{AccessionClassifier, InvalidAccessionError};
use crate::utils::validation::{parse_accession_lines, validate_accession};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Accessions to classify (e.g. AE014297 NC_000962)
    pub accessions: Vec<String>,

    /// Path to a rules document (defaults to the embedded rules)
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// File with one accession per line; use '-' for stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

type Outcome = (String, Result<Classification, InvalidAccessionError>);

/// Execute classify subcommand
///
/// # Errors
///
/// Returns an error if the rules cannot be loaded, the input cannot be read,
/// or any accession fails to classify.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ClassifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let accessions = collect_accessions(&args)?;
    if accessions.is_empty() {
        anyhow::bail!("No accessions given; pass them as arguments or with --input");
    }

    let index = load_index(args.rules.as_deref(), verbose)?;
    let classifier = AccessionClassifier::new(&index);
    let outcomes = classifier.classify_all(accessions);

    match format {
        OutputFormat::Text => print_text_results(&outcomes),
        OutputFormat::Json => print_json_results(&outcomes)?,
        OutputFormat::Tsv => print_tsv_results(&outcomes),
    }

    let failed = outcomes.iter().filter(|(_, r)| r.is_err()).count();
    if failed > 0 {
        anyhow::bail!(
            "InvalidAccessionError: {failed} of {} accessions could not be classified",
            outcomes.len()
        );
    }

    Ok(())
}

fn collect_accessions(args: &ClassifyArgs) -> anyhow::Result<Vec<String>> {
    let mut accessions = Vec::with_capacity(args.accessions.len());
    for arg in &args.accessions {
        accessions.push(validate_accession(arg)?.to_string());
    }

    if let Some(path) = &args.input {
        accessions.extend(parse_accession_lines(&read_input(path)?)?);
    }

    Ok(accessions)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn print_text_results(outcomes: &[Outcome]) {
    let single = outcomes.len() == 1;
    for (accession, result) in outcomes {
        match result {
            Ok(c) if single => println!("{c}"),
            Ok(c) => println!("{accession}: {c}"),
            Err(e) => eprintln!("InvalidAccessionError: {e}"),
        }
    }
}

fn print_json_results(outcomes: &[Outcome]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|(accession, result)| match result {
            Ok(c) => serde_json::json!({
                "accession": accession,
                "database": c.database,
                "type": c.accession_type,
                "description": c.description,
            }),
            Err(e) => serde_json::json!({
                "accession": accession,
                "error": "InvalidAccessionError",
                "message": e.to_string(),
            }),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(outcomes: &[Outcome]) {
    println!("accession\tdatabase\ttype\tdescription");
    for (accession, result) in outcomes {
        match result {
            Ok(c) => println!(
                "{accession}\t{}\t{}\t{}",
                c.database, c.accession_type, c.description
            ),
            Err(e) => eprintln!("InvalidAccessionError: {e}"),
        }
    }
}
