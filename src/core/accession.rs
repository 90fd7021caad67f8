//! Structural inspection of accession strings.
//!
//! Nothing here consults a rules document: these helpers only look at the
//! shape of the string (its leading letters and the RefSeq separator).

use crate::core::types::AccessionCategory;

/// Maximum number of leading letters an accession may carry
pub const MAX_LETTER_PREFIX: usize = 6;

/// Separator used by RefSeq accessions (`NC_000962`)
pub const REFSEQ_SEPARATOR: u8 = b'_';

/// Three-letter prefixes of Sequence Read Archive objects, across the
/// NCBI (`SR*`), EBI (`ER*`) and DDBJ (`DR*`) registries
pub const SRA_PREFIXES: [&str; 18] = [
    "SRA", "SRP", "SRX", "SRR", "SRS", "SRZ", "ERA", "ERP", "ERX", "ERR", "ERS", "ERZ", "DRA",
    "DRP", "DRX", "DRR", "DRS", "DRZ",
];

/// Return the maximal leading run of ASCII uppercase letters.
///
/// # Examples
///
/// ```
/// use accession_solver::core::accession::letter_prefix;
///
/// assert_eq!(letter_prefix("AE014297"), "AE");
/// assert_eq!(letter_prefix("NC_000962"), "NC");
/// assert_eq!(letter_prefix("014297"), "");
/// ```
#[must_use]
pub fn letter_prefix(accession: &str) -> &str {
    let end = accession
        .bytes()
        .position(|b| !b.is_ascii_uppercase())
        .unwrap_or(accession.len());
    &accession[..end]
}

/// Infer the coarse category from a letter prefix.
///
/// Returns `None` for an empty prefix or one longer than [`MAX_LETTER_PREFIX`].
#[must_use]
pub fn infer_category(letter_prefix: &str) -> Option<AccessionCategory> {
    match letter_prefix.len() {
        1 | 2 => Some(AccessionCategory::Nucleotide),
        3 if is_sra_prefix(letter_prefix) => Some(AccessionCategory::Sra),
        3 => Some(AccessionCategory::Protein),
        4 | 6 => Some(AccessionCategory::Wgs),
        5 => Some(AccessionCategory::Mga),
        _ => None,
    }
}

#[must_use]
pub fn is_sra_prefix(prefix: &str) -> bool {
    SRA_PREFIXES.contains(&prefix)
}

/// Whether the accession follows the RefSeq grammar (underscore at index 2)
#[must_use]
pub fn is_refseq_accession(accession: &str) -> bool {
    accession.as_bytes().get(2) == Some(&REFSEQ_SEPARATOR)
}

/// Whether a rules-document prefix names a RefSeq series: two uppercase
/// letters followed by an underscore, e.g. `NC_`
#[must_use]
pub fn is_refseq_prefix(prefix: &str) -> bool {
    let bytes = prefix.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_uppercase()
        && bytes[1].is_ascii_uppercase()
        && bytes[2] == REFSEQ_SEPARATOR
}
