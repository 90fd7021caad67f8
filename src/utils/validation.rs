//! Centralized validation for accession input.

/// Maximum number of accessions accepted from a single input (`DoS` protection)
pub const MAX_ACCESSIONS: usize = 1_000_000;

/// Longest accession string accepted; real accessions are far shorter
pub const MAX_ACCESSION_LENGTH: usize = 256;

/// Input validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Accession too long: exceeds {MAX_ACCESSION_LENGTH} characters")]
    AccessionTooLong,
    #[error("Accession contains whitespace or control characters: {0:?}")]
    InvalidCharacters(String),
    #[error("Empty accession provided")]
    EmptyAccession,
    #[error("Too many accessions: more than {MAX_ACCESSIONS}")]
    TooManyAccessions,
}

/// Check if adding another accession would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new accession.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_accession_limit(count: usize) -> Option<String> {
    if count >= MAX_ACCESSIONS {
        Some(format!(
            "Too many accessions: adding another would exceed maximum of {MAX_ACCESSIONS}"
        ))
    } else {
        None
    }
}

/// Validate one accession argument, trimming surrounding whitespace.
///
/// Case is left untouched: `ae014297` is passed through and will fail
/// classification rather than be upper-cased here.
///
/// # Errors
///
/// Returns `ValidationError::EmptyAccession` for blank input,
/// `ValidationError::AccessionTooLong` past [`MAX_ACCESSION_LENGTH`], or
/// `ValidationError::InvalidCharacters` for embedded whitespace or control characters.
///
/// # Examples
///
/// ```
/// use accession_solver::utils::validation::validate_accession;
///
/// assert_eq!(validate_accession("  NC_000962.3\n").unwrap(), "NC_000962.3");
/// assert!(validate_accession("NC 000962").is_err());
/// ```
pub fn validate_accession(input: &str) -> Result<&str, ValidationError> {
    let accession = input.trim();
    if accession.is_empty() {
        return Err(ValidationError::EmptyAccession);
    }
    if accession.len() > MAX_ACCESSION_LENGTH {
        return Err(ValidationError::AccessionTooLong);
    }
    if accession
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(ValidationError::InvalidCharacters(accession.to_string()));
    }
    Ok(accession)
}

/// Read accessions one per line, skipping blank lines and `#` comments.
///
/// # Errors
///
/// Returns a `ValidationError` for the first invalid line, or
/// `ValidationError::TooManyAccessions` if the input exceeds [`MAX_ACCESSIONS`].
pub fn parse_accession_lines(text: &str) -> Result<Vec<String>, ValidationError> {
    let mut accessions = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if check_accession_limit(accessions.len()).is_some() {
            return Err(ValidationError::TooManyAccessions);
        }
        accessions.push(validate_accession(trimmed)?.to_string());
    }
    Ok(accessions)
}
