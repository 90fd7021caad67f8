use serde::{Deserialize, Serialize};

/// Coarse record category inferred from the length of an accession's letter prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessionCategory {
    /// One or two letters (e.g. `AE014297`)
    #[serde(rename = "nucleotide")]
    Nucleotide,
    /// Three letters that are not an SRA code
    #[serde(rename = "protein")]
    Protein,
    /// Sequence Read Archive object (`SRR`, `ERX`, `DRP`, ...)
    #[serde(rename = "SRA")]
    Sra,
    /// Whole genome shotgun, four or six letters
    #[serde(rename = "WGS")]
    Wgs,
    /// Mass sequence for Genome Annotation, five letters
    #[serde(rename = "MGA")]
    Mga,
}

impl AccessionCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nucleotide => "nucleotide",
            Self::Protein => "protein",
            Self::Sra => "SRA",
            Self::Wgs => "WGS",
            Self::Mga => "MGA",
        }
    }
}

impl std::fmt::Display for AccessionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of classifying an accession
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Owning database (e.g. "GenBank", "NCBI", "EMBL")
    pub database: String,

    /// Record type: the coarse category, or the molecule type for RefSeq accessions
    pub accession_type: String,

    /// Human-readable description of the accession series
    pub description: String,
}

impl Classification {
    pub fn new(
        database: impl Into<String>,
        accession_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            accession_type: accession_type.into(),
            description: description.into(),
        }
    }

    /// View as a `(database, type, description)` tuple
    #[must_use]
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.database, &self.accession_type, &self.description)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:?}, {:?}, {:?})",
            self.database, self.accession_type, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(AccessionCategory::Nucleotide.to_string(), "nucleotide");
        assert_eq!(AccessionCategory::Sra.to_string(), "SRA");
        assert_eq!(AccessionCategory::Mga.to_string(), "MGA");
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&AccessionCategory::Wgs).unwrap();
        assert_eq!(json, "\"WGS\"");
    }

    #[test]
    fn test_classification_display_as_tuple() {
        let c = Classification::new("GenBank", "nucleotide", "Genome project data");
        assert_eq!(
            c.to_string(),
            "(\"GenBank\", \"nucleotide\", \"Genome project data\")"
        );
        assert_eq!(
            c.as_tuple(),
            ("GenBank", "nucleotide", "Genome project data")
        );
    }
}
