//! # lossim Configuration System
//!
//! Layered configuration for the loss-system simulator.
//!
//! ## Sources
//! - **YAML files** (`.yaml`/`.yml`): full configuration with `simulation`, `sweep`
//!   and `telemetry` sections.
//! - **Legacy parameter files** (any other extension): four whitespace-separated
//!   scalars, see [`SimulationParams::from_legacy_str`].
//! - **Environment**: `LOSSIM_*` variables, `__` separating nested keys
//!   (e.g. `LOSSIM_SIMULATION__SERVERS=4`).
//!
//! Every loaded configuration is validated before it is returned.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod simulation;
mod sweep;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use simulation::SimulationParams;
pub use sweep::SweepConfig;
pub use telemetry::TelemetryConfig;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "LOSSIM_";

/// Top‑level configuration container.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LossimConfig {
    /// Model parameters. Required: there are no defaults for the model itself.
    #[validate(nested)]
    pub simulation: SimulationParams,

    /// Parameter sweep settings.
    #[serde(default)]
    #[validate(nested)]
    pub sweep: SweepConfig,

    /// Logging and metrics.
    #[serde(default)]
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl LossimConfig {
    /// Wraps already-known parameters with default sweep and telemetry settings.
    pub fn with_params(simulation: SimulationParams) -> Self {
        Self {
            simulation,
            sweep: SweepConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }

    /// Load configuration from a file, then apply `LOSSIM_*` environment overrides.
    ///
    /// Hierarchy:
    /// 1. Default sweep and telemetry values
    /// 2. The file: YAML for `.yaml`/`.yml`, the legacy four-scalar layout otherwise
    /// 3. `LOSSIM_*` environment variables
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        let figment = Self::base_figment();
        let figment = if is_yaml(path) {
            figment.merge(Yaml::file(path))
        } else {
            let params = SimulationParams::parse_legacy(&std::fs::read_to_string(path)?)?;
            figment.merge(Serialized::default("simulation", params))
        };

        Self::from_figment(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extracts and validates a configuration from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Re-validates after programmatic overrides (e.g. command-line flags).
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    fn base_figment() -> Figment {
        Figment::new()
            .merge(Serialized::default("sweep", SweepConfig::default()))
            .merge(Serialized::default("telemetry", TelemetryConfig::default()))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    const YAML: &str = r#"
simulation:
  mean_interarrival: 2.0
  mean_service: 5.0
  closing_time: 1000.0
  servers: 3
sweep:
  iterations: 10
"#;

    #[test]
    fn yaml_config_with_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("lossim.yaml", YAML)?;
            let config = LossimConfig::load_from_path("lossim.yaml").map_err(|e| e.to_string())?;
            assert_eq!(config.simulation.servers, 3);
            assert_eq!(config.simulation.seed, None);
            assert_eq!(config.sweep.iterations, 10);
            assert_eq!(config.sweep.interarrival_step, 1.0);
            assert_eq!(config.telemetry.log_level, "info");
            Ok(())
        });
    }

    #[test]
    fn legacy_config_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.in", "1.5 4.0 500 2\n")?;
            let config = LossimConfig::load_from_path("config.in").map_err(|e| e.to_string())?;
            assert_eq!(config.simulation.mean_interarrival, 1.5);
            assert_eq!(config.simulation.mean_service, 4.0);
            assert_eq!(config.simulation.closing_time, 500.0);
            assert_eq!(config.simulation.servers, 2);
            assert_eq!(config.sweep, SweepConfig::default());
            Ok(())
        });
    }

    #[test]
    fn legacy_config_file_is_validated_after_env() {
        Jail::expect_with(|jail| {
            jail.create_file("config.in", "1.5 4.0 500 0\n")?;
            assert!(matches!(
                LossimConfig::load_from_path("config.in"),
                Err(ConfigError::Validation(_))
            ));

            jail.set_env("LOSSIM_SIMULATION__SERVERS", "3");
            let config = LossimConfig::load_from_path("config.in").map_err(|e| e.to_string())?;
            assert_eq!(config.simulation.servers, 3);
            Ok(())
        });
    }

    #[test]
    fn truncated_legacy_file_names_the_field() {
        Jail::expect_with(|jail| {
            jail.create_file("config.in", "1.5 4.0\n")?;
            match LossimConfig::load_from_path("config.in") {
                Err(ConfigError::Legacy { field, position, .. }) => {
                    assert_eq!(field, "closing_time");
                    assert_eq!(position, 3);
                }
                other => panic!("expected a legacy parse error, got {other:?}"),
            }
            Ok(())
        });
    }

    #[test]
    fn environment_override() {
        Jail::expect_with(|jail| {
            jail.create_file("lossim.yaml", YAML)?;
            jail.set_env("LOSSIM_SIMULATION__SERVERS", "8");
            jail.set_env("LOSSIM_SIMULATION__SEED", "99");
            let config = LossimConfig::load_from_path("lossim.yaml").map_err(|e| e.to_string())?;
            assert_eq!(config.simulation.servers, 8);
            assert_eq!(config.simulation.seed, Some(99));
            Ok(())
        });
    }

    #[test]
    fn missing_simulation_section_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("lossim.yaml", "sweep:\n  iterations: 3\n")?;
            let err = LossimConfig::load_from_path("lossim.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::Parsing(_)));
            Ok(())
        });
    }

    #[test]
    fn invalid_values_fail_validation() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "lossim.yaml",
                "simulation:\n  mean_interarrival: 0.0\n  mean_service: 1.0\n  closing_time: 10.0\n  servers: 0\n",
            )?;
            let err = LossimConfig::load_from_path("lossim.yaml").unwrap_err();
            let message = err.to_string();
            assert!(matches!(err, ConfigError::Validation(_)));
            assert!(message.contains("mean_interarrival"));
            assert!(message.contains("servers"));
            Ok(())
        });
    }

    #[test]
    fn overrides_are_revalidated() {
        let mut config = LossimConfig::with_params(
            SimulationParams::from_legacy_str("1 1 10 1").unwrap(),
        );
        assert!(config.clone().validated().is_ok());
        config.sweep.interarrival_step = -1.0;
        assert!(matches!(config.validated(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = LossimConfig::load_from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
