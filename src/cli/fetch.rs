use std::path::PathBuf;

use clap::Args;

use crate::rules::index::RuleIndex;
use crate::scraping::fetch::{
    FetchConfig, RulesFetcher, DEFAULT_REFSEQ_URL, DEFAULT_RULES_URL, DEFAULT_TIMEOUT_SECS,
};

#[derive(Args)]
pub struct FetchArgs {
    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// URL of the accession prefix page
    #[arg(long, default_value = DEFAULT_RULES_URL)]
    pub url: String,

    /// URL of the RefSeq prefix table
    #[arg(long, default_value = DEFAULT_REFSEQ_URL)]
    pub refseq_url: String,

    /// Skip the RefSeq table
    #[arg(long)]
    pub no_refseq: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FetchArgs, verbose: bool) -> anyhow::Result<()> {
    let config = FetchConfig {
        url: args.url,
        refseq_url: (!args.no_refseq).then_some(args.refseq_url),
        timeout_secs: args.timeout,
        ..FetchConfig::default()
    };

    let fetcher = RulesFetcher::new(config)?;
    let document = fetcher.fetch_rules()?;

    // Scraped rows must still compile before they are saved
    let index = RuleIndex::compile(&document)?;
    if verbose {
        eprintln!(
            "Fetched {} rule rows ({} compiled rules, {} RefSeq)",
            document.len(),
            index.len(),
            index.refseq_rules().len()
        );
    }

    let json = document.to_json()?;
    if let Some(output) = args.output {
        std::fs::write(&output, json)?;
        eprintln!("Saved {} rule rows to {}", document.len(), output.display());
    } else {
        println!("{json}");
    }

    Ok(())
}
