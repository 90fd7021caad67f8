//! # accession-solver
//!
//! A library for classifying sequence database accessions from their prefix.
//!
//! Accessions such as `AE014297`, `NC_000962` or `ERR5413122` encode where they
//! came from in their leading letters. `accession-solver` reads a table of
//! prefix rules, compiles it into an index keyed by prefix length, and answers
//! "which database, which record type, what is it" without querying any
//! database.
//!
//! ## Features
//!
//! - **Prefix-length dispatch**: one bucket of rules per letter-prefix length
//! - **Range prefixes**: `BAAA-BZZZ` style ranges compile to anchored matchers
//! - **RefSeq grammar**: `XX_` accessions resolve to their molecule type
//! - **Embedded rules**: a default rules document ships inside the binary
//! - **Rule refresh**: rebuild the rules document from NCBI's prefix tables
//!
//! ## Example
//!
//! ```rust,no_run
//! use accession_solver::{classify, RuleIndex};
//!
//! // Compile the embedded rules once, classify many times
//! let index = RuleIndex::load_embedded().unwrap();
//!
//! let c = classify("AE014297", &index).unwrap();
//! assert_eq!(c.as_tuple(), ("GenBank", "nucleotide", "Genome project data"));
//!
//! let c = classify("NC_000962", &index).unwrap();
//! assert_eq!(c.accession_type, "Genomic");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Accession structure and result types
//! - [`rules`]: Rules document, range matchers, and the compiled index
//! - [`matching`]: The classification engine
//! - [`scraping`]: Building a rules document from NCBI's web pages
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod rules;
pub mod scraping;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::types::*;
pub use crate::matching::engine::{classify, AccessionClassifier, InvalidAccessionError};
pub use crate::rules::document::{RuleRecord, RulesDocument, RulesError};
pub use crate::rules::index::{RuleEntry, RuleIndex};
pub use crate::rules::matcher::{MalformedRuleError, PrefixMatcher, RangeMatcher};
