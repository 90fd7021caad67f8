//! Accession rules: the JSON document and its compiled index.
//!
//! A rules document is an ordered JSON array of rows:
//!
//! ```text
//! [ [prefixList, database, moleculeType, description], ... ]
//! ```
//!
//! Each entry of `prefixList` is one of:
//!
//! - a plain prefix (`AE`), matched by equality with the accession's letters
//! - a RefSeq prefix (`NC_`), kept in a dedicated bucket
//! - a range (`BAAA-BZZZ` or `BAAA_BZZZ`), compiled into a pattern matcher
//!
//! An embedded document is compiled into the binary; custom documents can be
//! loaded from files.
//!
//! ## Example
//!
//! ```rust,no_run
//! use accession_solver::RuleIndex;
//! use std::path::Path;
//!
//! let index = RuleIndex::load_embedded().unwrap();
//! let custom = RuleIndex::load_from_file(Path::new("my_rules.json")).unwrap();
//!
//! for len in index.prefix_lengths() {
//!     println!("{len}: {} rules", index.bucket(len).unwrap().len());
//! }
//! ```

pub mod document;
pub mod index;
pub mod matcher;
