use std::io::Read;
use std::time::Duration;

use thiserror::Error;

use crate::rules::document::RulesDocument;
use crate::scraping::html::{parse_refseq_rules, parse_rules};

/// NCBI page listing GenBank/EMBL/DDBJ accession prefixes
pub const DEFAULT_RULES_URL: &str = "https://www.ncbi.nlm.nih.gov/Sequin/acc.html";

/// NCBI table of RefSeq accession prefixes and molecule types
pub const DEFAULT_REFSEQ_URL: &str = "https://www.ncbi.nlm.nih.gov/books/NBK21091/table/ch18.T.refseq_accession_numbers_and_mole/?report=objectonly";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Upper bound on a downloaded page
pub const MAX_PAGE_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read response body: {0}")]
    Body(#[from] std::io::Error),

    #[error("Failed to download {url}: HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("No accession rules found at {url}")]
    NoRulesFound { url: String },
}

/// Where and how to fetch the rule tables
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub url: String,
    /// RefSeq table; `None` skips the RefSeq pass
    pub refseq_url: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RULES_URL.to_string(),
            refseq_url: Some(DEFAULT_REFSEQ_URL.to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("accession-solver/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Downloads the NCBI prefix tables and turns them into a rules document
pub struct RulesFetcher {
    config: FetchConfig,
    client: reqwest::blocking::Client,
}

impl RulesFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch a page body, failing on any non-success status
    pub fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "Fetching page");
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let mut body = String::new();
        response.take(MAX_PAGE_BYTES).read_to_string(&mut body)?;
        Ok(body)
    }

    /// Fetch the general prefix page and, when configured, the RefSeq table,
    /// and merge them into one document (RefSeq rows last)
    pub fn fetch_rules(&self) -> Result<RulesDocument, FetchError> {
        let mut document = parse_rules(&self.fetch_page(&self.config.url)?);
        if document.is_empty() {
            return Err(FetchError::NoRulesFound {
                url: self.config.url.clone(),
            });
        }

        if let Some(refseq_url) = &self.config.refseq_url {
            let refseq = parse_refseq_rules(&self.fetch_page(refseq_url)?);
            if refseq.is_empty() {
                return Err(FetchError::NoRulesFound {
                    url: refseq_url.clone(),
                });
            }
            document.extend(refseq);
        }

        tracing::info!(rows = document.len(), "Fetched accession rules");
        Ok(document)
    }
}
