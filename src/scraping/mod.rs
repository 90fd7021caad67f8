//! Build a rules document from NCBI's published prefix tables.
//!
//! Two pages are read: the accession prefix page (GenBank, EMBL, DDBJ
//! prefixes) and the RefSeq prefix table. Their rows are merged into one
//! [`RulesDocument`](crate::rules::document::RulesDocument), general rows
//! first.

pub mod fetch;
pub mod html;
