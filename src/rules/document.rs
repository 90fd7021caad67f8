use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;
use thiserror::Error;

use crate::rules::matcher::MalformedRuleError;

/// Molecule type recorded for rows that do not declare one
pub const UNKNOWN_MOLECULE_TYPE: &str = "unknown";

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Failed to read rules document: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse rules document: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Malformed rule: {0}")]
    Malformed(#[from] MalformedRuleError),
}

/// One row of a rules document: a prefix group sharing a database,
/// molecule type and description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    /// Plain prefixes (`AE`), RefSeq prefixes (`NC_`) or ranges (`BAAA-BZZZ`)
    pub prefixes: Vec<String>,
    pub database: String,
    pub molecule_type: String,
    pub description: String,
}

impl RuleRecord {
    pub fn new(
        prefixes: Vec<String>,
        database: impl Into<String>,
        molecule_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            prefixes,
            database: database.into(),
            molecule_type: molecule_type.into(),
            description: description.into(),
        }
    }
}

/// On-disk row shapes. Early documents omitted the molecule type.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecord {
    Full(Vec<String>, String, String, String),
    Legacy(Vec<String>, String, String),
}

impl<'de> Deserialize<'de> for RuleRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawRecord::deserialize(deserializer)? {
            RawRecord::Full(prefixes, database, molecule_type, description) => {
                Self::new(prefixes, database, molecule_type, description)
            }
            RawRecord::Legacy(prefixes, database, description) => {
                Self::new(prefixes, database, UNKNOWN_MOLECULE_TYPE, description)
            }
        })
    }
}

impl Serialize for RuleRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            &self.prefixes,
            &self.database,
            &self.molecule_type,
            &self.description,
        )
            .serialize(serializer)
    }
}

/// An ordered rules document. Row order is match priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulesDocument {
    pub records: Vec<RuleRecord>,
}

impl RulesDocument {
    pub fn new(records: Vec<RuleRecord>) -> Self {
        Self { records }
    }

    /// Load the embedded default rules document
    pub fn load_embedded() -> Result<Self, RulesError> {
        // Validated at compile time by build.rs
        const EMBEDDED_RULES: &str = include_str!("../../catalogs/accession_rules.json");
        Self::from_json(EMBEDDED_RULES)
    }

    /// Load a rules document from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Export as pretty-printed JSON with four-element rows
    pub fn to_json(&self) -> Result<String, RulesError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append the rows of another document after this one's
    pub fn extend(&mut self, other: RulesDocument) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_document() {
        let doc = RulesDocument::load_embedded().unwrap();
        assert!(!doc.is_empty());
        assert!(doc
            .records
            .iter()
            .any(|r| r.prefixes.iter().any(|p| p == "NC_")));
    }

    #[test]
    fn test_from_json_four_element_rows() {
        let json = r#"[[["AE"], "GenBank", "unknown", "Genome project data"],
                       [["NC_"], "NCBI", "Genomic", "Complete genomic molecule"]]"#;
        let doc = RulesDocument::from_json(json).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.records[0].prefixes, vec!["AE".to_string()]);
        assert_eq!(doc.records[1].molecule_type, "Genomic");
    }

    #[test]
    fn test_from_json_legacy_rows() {
        let json = r#"[[["AE", "AF"], "GenBank", "Genome project data"]]"#;
        let doc = RulesDocument::from_json(json).unwrap();
        assert_eq!(doc.records[0].molecule_type, UNKNOWN_MOLECULE_TYPE);
        assert_eq!(doc.records[0].description, "Genome project data");
        assert_eq!(doc.records[0].prefixes.len(), 2);
    }

    #[test]
    fn test_from_json_rejects_bad_rows() {
        assert!(matches!(
            RulesDocument::from_json(r#"[["AE", "GenBank", "x", "y"]]"#),
            Err(RulesError::ParseError(_))
        ));
        assert!(matches!(
            RulesDocument::from_json(r#"{"rules": []}"#),
            Err(RulesError::ParseError(_))
        ));
    }

    #[test]
    fn test_to_json_writes_four_element_rows() {
        let doc = RulesDocument::from_json(r#"[[["AE"], "GenBank", "Genome project data"]]"#)
            .unwrap();
        let json = doc.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let row = value[0].as_array().unwrap();
        assert_eq!(row.len(), 4);
        assert_eq!(row[2], "unknown");

        assert_eq!(RulesDocument::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = RulesDocument::load_from_file(Path::new("/nonexistent/rules.json"));
        assert!(matches!(result, Err(RulesError::ReadError(_))));
    }

    #[test]
    fn test_extend_preserves_order() {
        let mut a = RulesDocument::new(vec![RuleRecord::new(
            vec!["AE".to_string()],
            "GenBank",
            UNKNOWN_MOLECULE_TYPE,
            "Genome project data",
        )]);
        let b = RulesDocument::new(vec![RuleRecord::new(
            vec!["NC_".to_string()],
            "NCBI",
            "Genomic",
            "Complete genomic molecule",
        )]);
        a.extend(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.records[1].database, "NCBI");
    }
}
