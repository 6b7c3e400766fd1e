//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, delay curve well-formed)
//! - Check URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: ClientConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::ClientConfig;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("api.base_url", &config.api.base_url),
        ("api.internal_url", &config.api.internal_url),
    ] {
        if let Err(e) = value.parse::<url::Url>() {
            errors.push(ValidationError {
                field,
                message: format!("invalid URL '{}': {}", value, e),
            });
        }
    }

    if config.api.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "api.timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.retries.base_delay_ms == 0 {
        errors.push(ValidationError {
            field: "retries.base_delay_ms",
            message: "backoff must provide a real delay".to_string(),
        });
    }

    if config.retries.max_delay_ms < config.retries.base_delay_ms {
        errors.push(ValidationError {
            field: "retries.max_delay_ms",
            message: "must be at least base_delay_ms".to_string(),
        });
    }

    if config.retries.max_attempts > 10 {
        errors.push(ValidationError {
            field: "retries.max_attempts",
            message: "more than 10 retries hammers the backend".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = ClientConfig::default();
        config.api.base_url = "not a url".to_string();
        config.api.timeout_secs = 0;
        config.retries.base_delay_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "api.base_url"));
        assert!(errors.iter().any(|e| e.field == "api.timeout_secs"));
        assert!(errors.iter().any(|e| e.field == "retries.base_delay_ms"));
    }

    #[test]
    fn test_delay_curve_must_be_well_formed() {
        let mut config = ClientConfig::default();
        config.retries.base_delay_ms = 1_000;
        config.retries.max_delay_ms = 100;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "retries.max_delay_ms");
    }
}
