//! Unified error types for the domain layer
//!
//! Provides a common error type for domain operations so adapters don't have
//! to fall back to String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for malformed field values.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a constraint violation error
    ///
    /// Used when a persisted record breaks an invariant that the domain
    /// always upholds on write (e.g. a draft whose expiry was edited).
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for BookingStep {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "consultant" => Ok(Self::Consultant),
    ///             _ => Err(DomainError::parse(format!("Unknown booking step: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("email cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: email cannot be empty");
    }

    #[test]
    fn test_constraint_error() {
        let err = DomainError::constraint("expiry does not match TTL");
        assert_eq!(
            err.to_string(),
            "Constraint violation: expiry does not match TTL"
        );
    }

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown booking step: payment");
        assert!(matches!(err, DomainError::Parse(_)));
        assert!(err.to_string().contains("payment"));
    }
}
