//! Prefix matchers for classification rules.
//!
//! A rule either names a literal letter prefix (`AE`) or a range of prefixes
//! (`BAAA-BZZZ`). Ranges are compiled into a [`RangeMatcher`]: the literal
//! head shared by both bounds, followed by a fixed number of free letters,
//! followed by a digit.

use regex::Regex;
use thiserror::Error;

/// Errors raised while compiling a range specifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRuleError {
    #[error("Range specifier '{spec}' has no '-' or '_' separator")]
    MissingSeparator { spec: String },

    #[error("Range specifier '{spec}' does not end in 'Z'")]
    UnterminatedRange { spec: String },

    #[error("Range specifier '{spec}' has no variable segment")]
    NoVariableSegment { spec: String },

    #[error("Range specifier '{spec}' has mismatched bounds: {reason}")]
    MismatchedBounds { spec: String, reason: String },

    #[error("Range specifier '{spec}' contains characters other than A-Z")]
    InvalidCharacters { spec: String },

    #[error("Range specifier '{spec}' produced an invalid pattern: {reason}")]
    InvalidPattern { spec: String, reason: String },
}

/// Matches accessions whose letter prefix falls within a range such as `BAAA-BZZZ`
#[derive(Debug, Clone)]
pub struct RangeMatcher {
    /// Specifier text the matcher was compiled from
    spec: String,
    /// Literal head shared by both bounds
    prefix: String,
    /// Number of free letters after the head
    suffix_length: usize,
    pattern: Regex,
}

impl RangeMatcher {
    /// Build a matcher for `prefix` followed by `suffix_length` letters and a digit.
    /// The specifier is the full range, e.g. `B` and 3 give `BAAA-BZZZ`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRuleError::InvalidPattern` if the pattern cannot be compiled.
    pub fn new(prefix: &str, suffix_length: usize) -> Result<Self, MalformedRuleError> {
        let spec = format!(
            "{prefix}{}-{prefix}{}",
            "A".repeat(suffix_length),
            "Z".repeat(suffix_length)
        );
        Self::with_spec(spec, prefix, suffix_length)
    }

    fn with_spec(
        spec: String,
        prefix: &str,
        suffix_length: usize,
    ) -> Result<Self, MalformedRuleError> {
        // Letters alone would also match the head of a longer prefix, so a digit
        // must follow the free letters.
        let source = format!("^{}[A-Z]{{{suffix_length}}}[0-9]", regex::escape(prefix));
        let pattern = Regex::new(&source).map_err(|e| MalformedRuleError::InvalidPattern {
            spec: spec.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            spec,
            prefix: prefix.to_string(),
            suffix_length,
            pattern,
        })
    }

    /// True if `accession` is the literal head, exactly `suffix_length`
    /// uppercase letters, then at least one digit
    #[must_use]
    pub fn matches(&self, accession: &str) -> bool {
        self.pattern.is_match(accession)
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn suffix_length(&self) -> usize {
        self.suffix_length
    }

    /// Total letter-prefix length this matcher accepts
    #[must_use]
    pub fn prefix_length(&self) -> usize {
        self.prefix.len() + self.suffix_length
    }

    #[must_use]
    pub fn spec(&self) -> &str {
        &self.spec
    }
}

impl PartialEq for RangeMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix && self.suffix_length == other.suffix_length
    }
}

impl Eq for RangeMatcher {}

/// How a rule recognises its accessions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixMatcher {
    /// Letter prefix must equal this string
    Exact(String),
    /// Accession must fall inside a compiled range
    Range(RangeMatcher),
}

impl PrefixMatcher {
    /// Test a rule against an accession and its already-extracted letter prefix
    #[must_use]
    pub fn matches(&self, accession: &str, letter_prefix: &str) -> bool {
        match self {
            Self::Exact(prefix) => prefix == letter_prefix,
            Self::Range(range) => range.matches(accession),
        }
    }
}

impl std::fmt::Display for PrefixMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(prefix) => write!(f, "{prefix}"),
            Self::Range(range) => write!(f, "{}", range.spec),
        }
    }
}

/// Whether a rules-document prefix is written as a range (`BAAA-BZZZ`, `BAAA_BZZZ`)
#[must_use]
pub fn is_range_spec(spec: &str) -> bool {
    spec.contains('-') || spec.contains('_')
}

/// Compile a range specifier such as `BAAA-BZZZ` into a [`RangeMatcher`].
///
/// The bounds are split on `-` (or `_` when no `-` is present). The head
/// shared by both bounds becomes the literal prefix; the remaining positions
/// are free letters.
///
/// # Errors
///
/// Returns a `MalformedRuleError` if the specifier has no separator, more than
/// two bounds, bounds of different lengths, characters outside `A-Z`, an end
/// bound not ending in `Z`, or bounds that never differ.
///
/// # Examples
///
/// ```
/// use accession_solver::rules::matcher::parse_range;
///
/// let range = parse_range("BAAA-BZZZ").unwrap();
/// assert_eq!(range.prefix(), "B");
/// assert_eq!(range.suffix_length(), 3);
/// assert!(range.matches("BCDE01000001"));
/// ```
pub fn parse_range(spec: &str) -> Result<RangeMatcher, MalformedRuleError> {
    let separator = if spec.contains('-') {
        '-'
    } else if spec.contains('_') {
        '_'
    } else {
        return Err(MalformedRuleError::MissingSeparator {
            spec: spec.to_string(),
        });
    };

    let bounds: Vec<&str> = spec.split(separator).collect();
    let (start, end) = match bounds.as_slice() {
        [start, end] => (*start, *end),
        _ => {
            return Err(MalformedRuleError::MismatchedBounds {
                spec: spec.to_string(),
                reason: format!("expected two bounds, found {}", bounds.len()),
            })
        }
    };

    if start.is_empty() || end.is_empty() {
        return Err(MalformedRuleError::MismatchedBounds {
            spec: spec.to_string(),
            reason: "empty bound".to_string(),
        });
    }

    if !end.ends_with('Z') {
        return Err(MalformedRuleError::UnterminatedRange {
            spec: spec.to_string(),
        });
    }

    let is_letters = |s: &str| s.bytes().all(|b| b.is_ascii_uppercase());
    if !is_letters(start) || !is_letters(end) {
        return Err(MalformedRuleError::InvalidCharacters {
            spec: spec.to_string(),
        });
    }

    if start.len() != end.len() {
        return Err(MalformedRuleError::MismatchedBounds {
            spec: spec.to_string(),
            reason: format!(
                "start has {} letters, end has {}",
                start.len(),
                end.len()
            ),
        });
    }

    let split = start
        .bytes()
        .zip(end.bytes())
        .position(|(a, b)| a != b)
        .ok_or_else(|| MalformedRuleError::NoVariableSegment {
            spec: spec.to_string(),
        })?;

    RangeMatcher::with_spec(spec.to_string(), &start[..split], start.len() - split)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_dash() {
        let range = parse_range("BAAA-BZZZ").unwrap();
        assert_eq!(range.prefix(), "B");
        assert_eq!(range.suffix_length(), 3);
        assert_eq!(range.prefix_length(), 4);
        assert_eq!(range.spec(), "BAAA-BZZZ");
        assert_eq!(PrefixMatcher::Range(range).to_string(), "BAAA-BZZZ");

        // The generated specifier parses back to the same matcher
        let wide = RangeMatcher::new("AB", 4).unwrap();
        assert_eq!(wide.spec(), "ABAAAA-ABZZZZ");
        assert_eq!(parse_range(wide.spec()).unwrap(), wide);
    }

    #[test]
    fn test_parse_range_underscore() {
        let range = parse_range("BAAA_BZZZ").unwrap();
        assert_eq!(range.prefix(), "B");
        assert_eq!(range.suffix_length(), 3);
    }

    #[test]
    fn test_parse_range_longer_head() {
        let range = parse_range("ABCAA-ABCZZ").unwrap();
        assert_eq!(range.prefix(), "ABC");
        assert_eq!(range.suffix_length(), 2);
        assert_eq!(range.prefix_length(), 5);
    }

    #[test]
    fn test_parse_range_no_head() {
        let range = parse_range("AAA-ZZZ").unwrap();
        assert_eq!(range.prefix(), "");
        assert_eq!(range.suffix_length(), 3);
        assert!(range.matches("QRS12345"));
    }

    #[test]
    fn test_range_matches_requires_trailing_digit() {
        let range = parse_range("BAAA-BZZZ").unwrap();
        assert!(range.matches("BCDE1234"));
        assert!(!range.matches("BCDE"));
        assert!(!range.matches("CAAA1234"));
        // A five-letter prefix must not be swallowed by a four-letter range
        assert!(!range.matches("BCDEF1234"));
        assert!(!range.matches("BCD1234"));
    }

    #[test]
    fn test_range_matches_is_anchored() {
        let range = parse_range("BAAA-BZZZ").unwrap();
        assert!(!range.matches("XBCDE1234"));
    }

    #[test]
    fn test_parse_range_missing_separator() {
        let err = parse_range("BAAABZZZ").unwrap_err();
        assert!(matches!(err, MalformedRuleError::MissingSeparator { .. }));
    }

    #[test]
    fn test_parse_range_unterminated() {
        let err = parse_range("BAAA-BZZY").unwrap_err();
        assert!(matches!(err, MalformedRuleError::UnterminatedRange { .. }));
        assert!(err.to_string().contains("BAAA-BZZY"));
    }

    #[test]
    fn test_parse_range_no_variable_segment() {
        let err = parse_range("BZZZ-BZZZ").unwrap_err();
        assert!(matches!(err, MalformedRuleError::NoVariableSegment { .. }));
    }

    #[test]
    fn test_parse_range_mismatched_bounds() {
        assert!(matches!(
            parse_range("BAA-BZZZ").unwrap_err(),
            MalformedRuleError::MismatchedBounds { .. }
        ));
        assert!(matches!(
            parse_range("BAAA-BMMM-BZZZ").unwrap_err(),
            MalformedRuleError::MismatchedBounds { .. }
        ));
        assert!(matches!(
            parse_range("-BZZZ").unwrap_err(),
            MalformedRuleError::MismatchedBounds { .. }
        ));
    }

    #[test]
    fn test_parse_range_invalid_characters() {
        let err = parse_range("B1AA-BZZZ").unwrap_err();
        assert!(matches!(err, MalformedRuleError::InvalidCharacters { .. }));
    }

    #[test]
    fn test_prefix_matcher_dispatch() {
        let exact = PrefixMatcher::Exact("AE".to_string());
        assert!(exact.matches("AE014297", "AE"));
        assert!(!exact.matches("AF014297", "AF"));

        let range = PrefixMatcher::Range(parse_range("BAAA-BZZZ").unwrap());
        assert!(range.matches("BCDE1234", "BCDE"));
        assert!(!range.matches("BCDE", "BCDE"));
        assert_eq!(range.to_string(), "BAAA-BZZZ");
        assert_eq!(exact.to_string(), "AE");
    }

    #[test]
    fn test_range_matcher_new() {
        let range = RangeMatcher::new("B", 3).unwrap();
        assert_eq!(range, parse_range("BAAA-BZZZ").unwrap());
        assert_eq!(range.spec(), "BAAA-BZZZ");
        assert_eq!(PrefixMatcher::Range(range).to_string(), "BAAA-BZZZ");

        // The generated specifier parses back to the same matcher
        let wide = RangeMatcher::new("AB", 4).unwrap();
        assert_eq!(wide.spec(), "ABAAAA-ABZZZZ");
        assert_eq!(parse_range(wide.spec()).unwrap(), wide);
    }

    #[test]
    fn test_is_range_spec() {
        assert!(is_range_spec("BAAA-BZZZ"));
        assert!(is_range_spec("BAAA_BZZZ"));
        assert!(!is_range_spec("AE"));
    }
}
