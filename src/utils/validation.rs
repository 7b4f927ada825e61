//! Centralized validation and helper functions.

/// Maximum number of genomes allowed in a single set or catalog (DOS protection)
pub const MAX_GENOMES: usize = 1_000_000;

/// Maximum length of a genome or family identifier
pub const MAX_IDENTIFIER_LENGTH: usize = 256;

/// Validation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{name} must be a fraction between 0 and 1, got {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },
    #[error("Identifier is empty")]
    EmptyIdentifier,
    #[error("Identifier too long: exceeds {MAX_IDENTIFIER_LENGTH} characters")]
    IdentifierTooLong,
    #[error("Identifier '{0}' contains whitespace or control characters")]
    InvalidIdentifier(String),
}

/// Validate that a threshold lies in `[0, 1]`.
///
/// NaN is rejected.
///
/// # Examples
///
/// ```
/// use famsig::utils::validation::validate_fraction;
///
/// assert!(validate_fraction("min_in", 0.9).is_ok());
/// assert!(validate_fraction("min_in", 1.5).is_err());
/// assert!(validate_fraction("max_out", f64::NAN).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::FractionOutOfRange` if the value is outside `[0, 1]`.
pub fn validate_fraction(name: &'static str, value: f64) -> Result<f64, ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::FractionOutOfRange { name, value })
    }
}

/// Validate a genome or family identifier.
///
/// Identifiers are opaque, but must be non-empty, bounded in length and free
/// of whitespace so they survive a round trip through a tab-separated table.
///
/// # Errors
///
/// Returns `ValidationError::EmptyIdentifier`, `ValidationError::IdentifierTooLong`
/// or `ValidationError::InvalidIdentifier`.
pub fn validate_identifier(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyIdentifier);
    }
    if id.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::IdentifierTooLong);
    }
    if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

/// Check if adding another genome would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new genome.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_genome_limit(count: usize) -> Option<String> {
    if count >= MAX_GENOMES {
        Some(format!(
            "Too many genomes: adding another would exceed maximum of {MAX_GENOMES}"
        ))
    } else {
        None
    }
}

/// Fraction of a set containing something, with an empty set counting as zero.
#[must_use]
pub fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fraction_bounds() {
        assert_eq!(validate_fraction("min_in", 0.0), Ok(0.0));
        assert_eq!(validate_fraction("min_in", 1.0), Ok(1.0));
        assert!(matches!(
            validate_fraction("max_out", -0.01),
            Err(ValidationError::FractionOutOfRange { name: "max_out", .. })
        ));
        assert!(validate_fraction("max_out", f64::INFINITY).is_err());
        assert!(validate_fraction("max_out", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("fig|83333.1.peg.4").is_ok());
        assert_eq!(validate_identifier(""), Err(ValidationError::EmptyIdentifier));
        assert_eq!(
            validate_identifier(&"x".repeat(MAX_IDENTIFIER_LENGTH + 1)),
            Err(ValidationError::IdentifierTooLong)
        );
        assert!(matches!(
            validate_identifier("two words"),
            Err(ValidationError::InvalidIdentifier(_))
        ));
        assert!(validate_identifier("tab\there").is_err());
    }

    #[test]
    fn test_check_genome_limit() {
        assert!(check_genome_limit(0).is_none());
        assert!(check_genome_limit(MAX_GENOMES - 1).is_none());
        assert!(check_genome_limit(MAX_GENOMES).is_some());
    }

    #[test]
    fn test_fraction_zero_total() {
        assert!((fraction(0, 0) - 0.0).abs() < f64::EPSILON);
        assert!((fraction(5, 0) - 0.0).abs() < f64::EPSILON);
        assert!((fraction(1, 4) - 0.25).abs() < f64::EPSILON);
        assert!((fraction(9, 10) - 0.9).abs() < f64::EPSILON);
    }
}
