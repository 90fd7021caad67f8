//! Classification of accessions against compiled rules.
//!
//! Resolution runs in layers:
//!
//! 1. The leading capital letters pick a coarse category (nucleotide, protein,
//!    SRA, WGS, MGA).
//! 2. RefSeq-shaped accessions (`NC_000962`) are tried against the RefSeq rules.
//! 3. Otherwise, the bucket for the prefix length is scanned in document order;
//!    ranges match by pattern, plain prefixes by equality.
//!
//! ## Example
//!
//! ```rust,no_run
//! use accession_solver::{AccessionClassifier, RuleIndex};
//!
//! let index = RuleIndex::load_embedded().unwrap();
//! let classifier = AccessionClassifier::new(&index);
//!
//! let c = classifier.classify("AE014297").unwrap();
//! println!("{} {} {}", c.database, c.accession_type, c.description);
//! ```

pub mod engine;
