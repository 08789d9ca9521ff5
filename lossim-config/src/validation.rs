//! Custom validation functions for configuration.

use validator::ValidationError;

/// Rejects NaN and infinities.
pub fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_finite"))
    }
}

/// Validate a tracing level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = ["trace", "debug", "info", "warn", "error", "off"]
        .contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values() {
        assert!(validate_finite(3.5).is_ok());
        assert!(validate_finite(f64::NAN).is_err());
        assert!(validate_finite(f64::INFINITY).is_err());
    }

    #[test]
    fn log_levels() {
        assert!(validate_log_level("DEBUG").is_ok());
        assert!(validate_log_level("verbose").is_err());
    }
}
