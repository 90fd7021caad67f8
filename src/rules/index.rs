use std::collections::BTreeMap;
use std::path::Path;

use crate::core::accession::is_refseq_prefix;
use crate::core::types::Classification;
use crate::matching::engine::{AccessionClassifier, InvalidAccessionError};
use crate::rules::document::{RulesDocument, RulesError};
use crate::rules::matcher::{is_range_spec, parse_range, MalformedRuleError, PrefixMatcher};

/// One compiled classification rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub matcher: PrefixMatcher,
    pub database: String,
    pub molecule_type: String,
    pub description: String,
}

/// Rules compiled from a [`RulesDocument`], bucketed by letter-prefix length.
///
/// RefSeq rules (`NC_`, `NM_`, ...) live in their own bucket since RefSeq
/// accessions use a two-letter, underscore, digits grammar regardless of the
/// rule's declared length. Every bucket keeps document order, which is the
/// order rules are tried in.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    by_length: BTreeMap<usize, Vec<RuleEntry>>,
    refseq: Vec<RuleEntry>,
}

impl RuleIndex {
    /// Compile a rules document.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRuleError` if a range specifier cannot be parsed.
    pub fn compile(document: &RulesDocument) -> Result<Self, MalformedRuleError> {
        let mut index = Self::default();

        for record in &document.records {
            for prefix in &record.prefixes {
                let entry = |matcher| RuleEntry {
                    matcher,
                    database: record.database.clone(),
                    molecule_type: record.molecule_type.clone(),
                    description: record.description.clone(),
                };

                if is_refseq_prefix(prefix) {
                    index
                        .refseq
                        .push(entry(PrefixMatcher::Exact(prefix.clone())));
                } else if is_range_spec(prefix) {
                    let range = parse_range(prefix)?;
                    index
                        .by_length
                        .entry(range.prefix_length())
                        .or_default()
                        .push(entry(PrefixMatcher::Range(range)));
                } else {
                    index
                        .by_length
                        .entry(prefix.len())
                        .or_default()
                        .push(entry(PrefixMatcher::Exact(prefix.clone())));
                }
            }
        }

        tracing::debug!(
            buckets = ?index.by_length.iter().map(|(k, v)| (*k, v.len())).collect::<Vec<_>>(),
            refseq = index.refseq.len(),
            "Compiled accession rules"
        );

        Ok(index)
    }

    /// Compile the embedded default rules document
    pub fn load_embedded() -> Result<Self, RulesError> {
        Ok(Self::compile(&RulesDocument::load_embedded()?)?)
    }

    /// Read and compile a rules document from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, RulesError> {
        Ok(Self::compile(&RulesDocument::load_from_file(path)?)?)
    }

    /// Parse and compile a rules document from a JSON string
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        Ok(Self::compile(&RulesDocument::from_json(json)?)?)
    }

    /// Rules for letter prefixes of length `len`, in priority order
    pub fn bucket(&self, len: usize) -> Option<&[RuleEntry]> {
        self.by_length.get(&len).map(Vec::as_slice)
    }

    /// RefSeq rules in priority order
    pub fn refseq_rules(&self) -> &[RuleEntry] {
        &self.refseq
    }

    /// Prefix lengths that have at least one rule, ascending
    pub fn prefix_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_length.keys().copied()
    }

    /// Classify one accession against this index
    pub fn classify(&self, accession: &str) -> Result<Classification, InvalidAccessionError> {
        AccessionClassifier::new(self).classify(accession)
    }

    /// Total number of compiled rules, RefSeq included
    pub fn len(&self) -> usize {
        self.refseq.len() + self.by_length.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
