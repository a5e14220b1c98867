//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (counts and periods > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: &BreakerSettings → Result<(), Vec<ValidationError>>
//! - Runs before a breaker is built from the settings

use thiserror::Error;

use crate::config::schema::{BreakerSettings, GateConfig};

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must be greater than 0")]
    NotPositive(&'static str),

    #[error("breaker id must not be empty")]
    EmptyId,
}

/// Check breaker settings.
pub fn validate_settings(settings: &BreakerSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.threshold == 0 {
        errors.push(ValidationError::NotPositive("threshold"));
    }
    if settings.threshold_period_ms == 0 {
        errors.push(ValidationError::NotPositive("threshold_period_ms"));
    }
    if settings.reset_period_ms == 0 {
        errors.push(ValidationError::NotPositive("reset_period_ms"));
    }
    if settings.num_requests_to_close_circuit == 0 {
        errors.push(ValidationError::NotPositive("num_requests_to_close_circuit"));
    }
    if matches!(settings.id.as_deref(), Some(id) if id.trim().is_empty()) {
        errors.push(ValidationError::EmptyId);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a whole configuration file.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    validate_settings(&config.breaker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_settings(&BreakerSettings::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let settings = BreakerSettings {
            id: Some("  ".into()),
            threshold: 0,
            threshold_period_ms: 0,
            reset_period_ms: 0,
            num_requests_to_close_circuit: 0,
        };

        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::NotPositive("threshold"),
                ValidationError::NotPositive("threshold_period_ms"),
                ValidationError::NotPositive("reset_period_ms"),
                ValidationError::NotPositive("num_requests_to_close_circuit"),
                ValidationError::EmptyId,
            ]
        );
    }

    #[test]
    fn test_single_violation() {
        let settings = BreakerSettings {
            num_requests_to_close_circuit: 0,
            ..Default::default()
        };
        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "num_requests_to_close_circuit must be greater than 0");
    }
}
