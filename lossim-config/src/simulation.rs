//! Model parameters for a single run.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{validation, ConfigError};

/// Field order of the legacy parameter file.
const LEGACY_FIELDS: [&str; 4] = ["mean_interarrival", "mean_service", "closing_time", "servers"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SimulationParams {
    /// Mean time between arrivals.
    #[validate(range(exclusive_min = 0.0))]
    #[validate(custom(function = validation::validate_finite))]
    pub mean_interarrival: f64,

    /// Mean service time.
    #[validate(range(exclusive_min = 0.0))]
    #[validate(custom(function = validation::validate_finite))]
    pub mean_service: f64,

    /// No arrivals are accepted at or after this time; in-flight services still drain.
    #[validate(range(min = 0.0))]
    #[validate(custom(function = validation::validate_finite))]
    pub closing_time: f64,

    /// Number of servers.
    #[validate(range(min = 1))]
    pub servers: usize,

    /// Fixed RNG seed; a wall-clock seed is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimulationParams {
    /// Parses and validates the legacy layout: mean interarrival time, mean
    /// service time, closing time and server count, separated by whitespace.
    ///
    /// ```
    /// let params = lossim_config::SimulationParams::from_legacy_str("2.0 5.0 1000 3").unwrap();
    /// assert_eq!(params.servers, 3);
    /// ```
    pub fn from_legacy_str(input: &str) -> Result<Self, ConfigError> {
        let params = Self::parse_legacy(input)?;
        params.validate()?;
        Ok(params)
    }

    pub(crate) fn parse_legacy(input: &str) -> Result<Self, ConfigError> {
        let mut tokens = input.split_whitespace();
        let mut next = |position: usize| {
            tokens.next().ok_or_else(|| ConfigError::Legacy {
                field: LEGACY_FIELDS[position],
                position: position + 1,
                reason: "missing value".into(),
            })
        };

        let mean_interarrival = parse_field(next(0)?, 0)?;
        let mean_service = parse_field(next(1)?, 1)?;
        let closing_time = parse_field(next(2)?, 2)?;
        let servers = parse_field(next(3)?, 3)?;

        Ok(Self {
            mean_interarrival,
            mean_service,
            closing_time,
            servers,
            seed: None,
        })
    }
}

fn parse_field<T>(token: &str, position: usize) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    token.parse().map_err(|e: T::Err| ConfigError::Legacy {
        field: LEGACY_FIELDS[position],
        position: position + 1,
        reason: format!("cannot parse '{token}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_four_scalars() {
        let params = SimulationParams::from_legacy_str("10.0\t25.5\n1e4 16").unwrap();
        assert_eq!(params.mean_interarrival, 10.0);
        assert_eq!(params.mean_service, 25.5);
        assert_eq!(params.closing_time, 10_000.0);
        assert_eq!(params.servers, 16);
        assert_eq!(params.seed, None);
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let params = SimulationParams::from_legacy_str("1 1 1 1 extra").unwrap();
        assert_eq!(params.servers, 1);
    }

    #[test]
    fn missing_value_names_the_field() {
        let err = SimulationParams::from_legacy_str("1.0 2.0 3.0").unwrap_err();
        match err {
            ConfigError::Legacy {
                field, position, ..
            } => {
                assert_eq!(field, "servers");
                assert_eq!(position, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unparsable_value_is_rejected() {
        let err = SimulationParams::from_legacy_str("1.0 abc 3.0 1").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Legacy {
                field: "mean_service",
                ..
            }
        ));
    }

    #[test]
    fn fractional_server_count_is_rejected() {
        assert!(SimulationParams::from_legacy_str("1 1 1 2.5").is_err());
    }

    #[test]
    fn non_positive_means_fail_validation() {
        let err = SimulationParams::from_legacy_str("0 1 10 1").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        let err = SimulationParams::from_legacy_str("1 -2 10 1").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn zero_closing_time_is_valid() {
        let params = SimulationParams::from_legacy_str("1 1 0 1").unwrap();
        assert_eq!(params.closing_time, 0.0);
    }

    #[test]
    fn infinite_closing_time_is_rejected() {
        let err = SimulationParams::from_legacy_str("1 1 inf 1").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
