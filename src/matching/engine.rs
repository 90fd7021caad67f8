use thiserror::Error;

use crate::core::accession::{
    infer_category, is_refseq_accession, letter_prefix, MAX_LETTER_PREFIX,
};
use crate::core::types::Classification;
use crate::rules::index::RuleIndex;

/// Prefix added to the description of RefSeq classifications
pub const REFSEQ_DESCRIPTION_PREFIX: &str = "RefSeq: ";

/// Reasons a string is not a recognised accession
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAccessionError {
    #[error("An accession must start with at least one capital letter: '{0}'")]
    NoLeadingLetters(String),

    #[error("An accession must start with at most {max} capital letters, '{accession}' has {count}", max = MAX_LETTER_PREFIX)]
    TooManyLetters { accession: String, count: usize },

    #[error("No rules for {length}-letter prefixes, cannot classify '{accession}'")]
    NoRulesForLength { accession: String, length: usize },

    #[error("No rule matches accession '{0}'")]
    NoMatchingRule(String),
}

/// Outcome of the RefSeq rule scan
enum RefSeqLookup<'a> {
    Matched(Classification),
    Missed { last_molecule_type: Option<&'a str> },
}

/// Classifies accessions against a compiled [`RuleIndex`]
pub struct AccessionClassifier<'a> {
    index: &'a RuleIndex,
}

impl<'a> AccessionClassifier<'a> {
    pub fn new(index: &'a RuleIndex) -> Self {
        Self { index }
    }

    /// Classify a single accession.
    ///
    /// The letter-prefix length picks a coarse category. RefSeq accessions
    /// (underscore at index 2) are resolved against the RefSeq rules first and
    /// take the matching rule's molecule type. Everything else is resolved
    /// against the bucket for its prefix length, and the first matching rule
    /// wins.
    ///
    /// A RefSeq-shaped accession that no RefSeq rule claims is still resolved
    /// against its length bucket, but reports the molecule type of the last
    /// RefSeq rule scanned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccessionError` if the accession has no leading capitals,
    /// more than six, or no rule matches it.
    pub fn classify(&self, accession: &str) -> Result<Classification, InvalidAccessionError> {
        let letters = letter_prefix(accession);
        let Some(category) = infer_category(letters) else {
            return Err(if letters.is_empty() {
                InvalidAccessionError::NoLeadingLetters(accession.to_string())
            } else {
                InvalidAccessionError::TooManyLetters {
                    accession: accession.to_string(),
                    count: letters.len(),
                }
            });
        };

        let mut accession_type = category.as_str();
        if is_refseq_accession(accession) {
            match self.classify_refseq(accession) {
                RefSeqLookup::Matched(found) => return Ok(found),
                RefSeqLookup::Missed { last_molecule_type } => {
                    accession_type = last_molecule_type.unwrap_or(accession_type);
                }
            }
            tracing::debug!(
                accession,
                accession_type,
                "No RefSeq rule matched, using length bucket"
            );
        }

        let rules = self.index.bucket(letters.len()).ok_or_else(|| {
            InvalidAccessionError::NoRulesForLength {
                accession: accession.to_string(),
                length: letters.len(),
            }
        })?;

        rules
            .iter()
            .find(|rule| rule.matcher.matches(accession, letters))
            .map(|rule| {
                Classification::new(
                    rule.database.clone(),
                    accession_type,
                    rule.description.clone(),
                )
            })
            .ok_or_else(|| InvalidAccessionError::NoMatchingRule(accession.to_string()))
    }

    /// Scan the RefSeq rules in order, remembering each rule's molecule type
    /// as the provisional type until one matches.
    fn classify_refseq(&self, accession: &str) -> RefSeqLookup<'a> {
        let index: &'a RuleIndex = self.index;
        let head = accession.get(..3);
        let mut last_molecule_type = None;
        for rule in index.refseq_rules() {
            last_molecule_type = Some(rule.molecule_type.as_str());
            if head.is_some_and(|head| rule.matcher.matches(accession, head)) {
                return RefSeqLookup::Matched(Classification::new(
                    rule.database.clone(),
                    rule.molecule_type.clone(),
                    format!("{REFSEQ_DESCRIPTION_PREFIX}{}", rule.description),
                ));
            }
        }
        RefSeqLookup::Missed { last_molecule_type }
    }

    /// Classify a batch, one result per input in order
    pub fn classify_all<I, S>(
        &self,
        accessions: I,
    ) -> Vec<(S, Result<Classification, InvalidAccessionError>)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        accessions
            .into_iter()
            .map(|accession| {
                let result = self.classify(accession.as_ref());
                (accession, result)
            })
            .collect()
    }
}

/// Classify one accession against a compiled index
///
/// # Errors
///
/// See [`AccessionClassifier::classify`].
pub fn classify(accession: &str, index: &RuleIndex) -> Result<Classification, InvalidAccessionError> {
    AccessionClassifier::new(index).classify(accession)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::accession::SRA_PREFIXES;

    const TEST_RULES: &str = r#"[
        [["A", "B"], "EMBL", "unknown", "Patents"],
        [["AE"], "GenBank", "unknown", "Genome project data"],
        [["NC"], "GenBank", "unknown", "Direct submissions"],
        [["ERR"], "EMBL", "unknown", "ERA run accession"],
        [["EAA-EZZ"], "GenBank", "unknown", "Protein"],
        [["BAAA-BZZZ"], "DDBJ", "unknown", "WGS"],
        [["BCDE"], "GenBank", "unknown", "Shadowed by the range"],
        [["AAAAA-AZZZZ"], "DDBJ", "unknown", "MGA"],
        [["AAAAAA-AZZZZZ"], "GenBank", "unknown", "WGS"],
        [["NC_"], "NCBI", "Genomic", "Complete genomic molecule, usually reference assembly"],
        [["NM_"], "NCBI", "mRNA", "Protein-coding transcripts (usually curated)"]
    ]"#;

    fn make_test_index() -> RuleIndex {
        RuleIndex::from_json(TEST_RULES).unwrap()
    }

    #[test]
    fn test_classify_nucleotide() {
        let index = make_test_index();
        let c = classify("AE014297", &index).unwrap();
        assert_eq!(
            c.as_tuple(),
            ("GenBank", "nucleotide", "Genome project data")
        );

        let c = classify("A00001", &index).unwrap();
        assert_eq!(c.as_tuple(), ("EMBL", "nucleotide", "Patents"));
    }

    #[test]
    fn test_classify_refseq() {
        let index = make_test_index();
        let c = classify("NC_000962", &index).unwrap();
        assert_eq!(c.database, "NCBI");
        assert_eq!(c.accession_type, "Genomic");
        assert_eq!(
            c.description,
            "RefSeq: Complete genomic molecule, usually reference assembly"
        );

        let c = classify("NM_000546.6", &index).unwrap();
        assert_eq!(c.accession_type, "mRNA");
    }

    #[test]
    fn test_refseq_miss_falls_through_to_bucket() {
        let index = make_test_index();
        // "AE_" is RefSeq-shaped but no RefSeq rule claims it; the type left
        // over from the RefSeq scan is the last rule's molecule type
        let c = classify("AE_000001", &index).unwrap();
        assert_eq!(c.as_tuple(), ("GenBank", "mRNA", "Genome project data"));
    }

    #[test]
    fn test_refseq_miss_without_refseq_rules_keeps_category() {
        let index =
            RuleIndex::from_json(r#"[[["AE"], "GenBank", "unknown", "Genome project data"]]"#)
                .unwrap();
        let c = classify("AE_000001", &index).unwrap();
        assert_eq!(
            c.as_tuple(),
            ("GenBank", "nucleotide", "Genome project data")
        );
    }

    #[test]
    fn test_refseq_miss_takes_last_scanned_type() {
        let index = RuleIndex::from_json(
            r#"[
                [["AE"], "GenBank", "unknown", "Genome project data"],
                [["NC_"], "NCBI", "Genomic", "Complete genomic molecule"],
                [["WP_"], "NCBI", "Protein", "Non-redundant protein"]
            ]"#,
        )
        .unwrap();
        let c = classify("AE_000001", &index).unwrap();
        assert_eq!(c.as_tuple(), ("GenBank", "Protein", "Genome project data"));
    }

    #[test]
    fn test_classify_sra_first_match_wins() {
        let index = make_test_index();
        let c = classify("ERR5413122", &index).unwrap();
        assert_eq!(c.as_tuple(), ("EMBL", "SRA", "ERA run accession"));

        // Not an SRA code: falls to the protein range
        let c = classify("EAB12345", &index).unwrap();
        assert_eq!(c.as_tuple(), ("GenBank", "protein", "Protein"));

        // SRA category is inferred from the prefix even when a range claims it
        let c = classify("ERA000001", &index).unwrap();
        assert_eq!(c.as_tuple(), ("GenBank", "SRA", "Protein"));
    }

    #[test]
    fn test_classify_range_before_exact() {
        let index = make_test_index();
        let c = classify("BCDE01000001", &index).unwrap();
        assert_eq!(c.as_tuple(), ("DDBJ", "WGS", "WGS"));
    }

    #[test]
    fn test_classify_mga_and_six_letter_wgs() {
        let index = make_test_index();
        let c = classify("ABCDE0000001", &index).unwrap();
        assert_eq!(c.as_tuple(), ("DDBJ", "MGA", "MGA"));

        let c = classify("ABCDEF010000001", &index).unwrap();
        assert_eq!(c.as_tuple(), ("GenBank", "WGS", "WGS"));
    }

    #[test]
    fn test_classify_no_leading_letters() {
        let index = make_test_index();
        assert_eq!(
            classify("014297", &index),
            Err(InvalidAccessionError::NoLeadingLetters("014297".to_string()))
        );
        assert!(matches!(
            classify("", &index),
            Err(InvalidAccessionError::NoLeadingLetters(_))
        ));
        assert!(matches!(
            classify("ae014297", &index),
            Err(InvalidAccessionError::NoLeadingLetters(_))
        ));
    }

    #[test]
    fn test_classify_too_many_letters() {
        let index = make_test_index();
        assert_eq!(
            classify("ABCDEFG123", &index),
            Err(InvalidAccessionError::TooManyLetters {
                accession: "ABCDEFG123".to_string(),
                count: 7
            })
        );
    }

    #[test]
    fn test_classify_missing_bucket() {
        let index = RuleIndex::from_json(r#"[[["AE"], "GenBank", "unknown", "x"]]"#).unwrap();
        assert_eq!(
            classify("AAA12345", &index),
            Err(InvalidAccessionError::NoRulesForLength {
                accession: "AAA12345".to_string(),
                length: 3
            })
        );
    }

    #[test]
    fn test_classify_no_matching_rule() {
        let index = make_test_index();
        assert_eq!(
            classify("ZZ123456", &index),
            Err(InvalidAccessionError::NoMatchingRule("ZZ123456".to_string()))
        );
        // Range requires a digit after the free letters
        assert!(matches!(
            classify("BCDF", &index),
            Err(InvalidAccessionError::NoMatchingRule(_))
        ));
    }

    #[test]
    fn test_sra_codes_are_sra() {
        let rules = format!(
            "[[[{}], \"NCBI\", \"unknown\", \"SRA object\"]]",
            SRA_PREFIXES
                .iter()
                .map(|p| format!("\"{p}\""))
                .collect::<Vec<_>>()
                .join(",")
        );
        let index = RuleIndex::from_json(&rules).unwrap();
        for code in SRA_PREFIXES {
            let c = classify(&format!("{code}000123"), &index).unwrap();
            assert_eq!(c.accession_type, "SRA", "{code}");
        }
    }

    #[test]
    fn test_classify_all_keeps_order() {
        let index = make_test_index();
        let classifier = AccessionClassifier::new(&index);
        let results = classifier.classify_all(["AE014297", "014297", "NC_000962"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, "AE014297");
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
        assert_eq!(results[2].1.as_ref().unwrap().database, "NCBI");
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let a = make_test_index();
        let b = make_test_index();
        for accession in ["AE014297", "NC_000962", "ERR5413122", "BCDE01000001", "ZZ1"] {
            assert_eq!(classify(accession, &a), classify(accession, &b));
        }
    }
}
