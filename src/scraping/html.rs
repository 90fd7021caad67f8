//! Extract accession rules from the NCBI prefix tables.
//!
//! Tables are pulled apart with regular expressions; the pages are static
//! HTML without nested tables.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::accession::is_refseq_prefix;
use crate::rules::document::{RuleRecord, RulesDocument, UNKNOWN_MOLECULE_TYPE};

/// Database that owns every RefSeq series
pub const REFSEQ_DATABASE: &str = "NCBI";

// Non-greedy up to the first `</table>`: a nested table would cut the outer
// one short. The NCBI prefix pages have none.
static TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<table\b([^>]*)>(.*?)</table>").unwrap());
static CELLPADDING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)cellpadding\s*=\s*["']?3["']?"#).unwrap());
static ROW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").unwrap());
static CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<t([dh])\b[^>]*>(.*?)</t[dh]>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// A table row as cleaned cell text
#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    cells: Vec<String>,
    is_header: bool,
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Strip tags, decode entities and collapse whitespace
fn cell_text(html: &str) -> String {
    let text = decode_entities(&TAG_RE.replace_all(html, " "));
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn rows(table_body: &str) -> Vec<Row> {
    ROW_RE
        .captures_iter(table_body)
        .map(|row| {
            let mut is_header = false;
            let cells = CELL_RE
                .captures_iter(&row[1])
                .map(|cell| {
                    is_header |= cell[1].eq_ignore_ascii_case("h");
                    cell_text(&cell[2])
                })
                .collect();
            Row { cells, is_header }
        })
        .collect()
}

/// Split a prefix cell such as `"AE, AF"` or `"BAAA - BZZZ"` into prefixes
fn split_prefixes(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(|p| p.split_whitespace().collect::<String>())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Parse the general prefix tables (`<table cellpadding="3">`) of the NCBI
/// accession page. Each row is `prefix, database, description`.
pub fn parse_rules(html: &str) -> RulesDocument {
    let mut records = Vec::new();

    for table in TABLE_RE.captures_iter(html) {
        if !CELLPADDING_RE.is_match(&table[1]) {
            continue;
        }
        for row in rows(&table[2]) {
            if row.is_header || row.cells.is_empty() {
                continue;
            }
            if row.cells[0].eq_ignore_ascii_case("prefix") {
                continue;
            }
            if row.cells.len() < 3 {
                tracing::warn!(cells = ?row.cells, "Skipping short prefix table row");
                continue;
            }
            let prefixes = split_prefixes(&row.cells[0]);
            if prefixes.is_empty() {
                continue;
            }
            records.push(RuleRecord::new(
                prefixes,
                row.cells[1].clone(),
                UNKNOWN_MOLECULE_TYPE,
                row.cells[2].clone(),
            ));
        }
    }

    tracing::debug!(rows = records.len(), "Parsed accession prefix tables");
    RulesDocument::new(records)
}

/// Parse the RefSeq prefix table. Rows are `prefix, molecule type, description`;
/// only rows whose first cell is a RefSeq prefix (`NC_`) are kept.
pub fn parse_refseq_rules(html: &str) -> RulesDocument {
    let mut records = Vec::new();

    for table in TABLE_RE.captures_iter(html) {
        for row in rows(&table[2]) {
            if row.is_header || row.cells.len() < 3 {
                continue;
            }
            let prefix = row.cells[0].split_whitespace().collect::<String>();
            if !is_refseq_prefix(&prefix) {
                continue;
            }
            records.push(RuleRecord::new(
                vec![prefix],
                REFSEQ_DATABASE,
                row.cells[1].clone(),
                row.cells[2].clone(),
            ));
        }
    }

    tracing::debug!(rows = records.len(), "Parsed RefSeq prefix table");
    RulesDocument::new(records)
}
