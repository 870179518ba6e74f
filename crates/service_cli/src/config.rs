//! CLI configuration management.
//!
//! Loads `auditrix.toml` with environment variable overrides:
//!
//! ```toml
//! [cli]
//! log_level = "info"
//! output_format = "json"   # or "table"
//! pretty = true
//!
//! [params]                 # optional default SamplingParams (camelCase keys)
//! fiscalYear = 2024
//! ...
//! ```
//!
//! | Variable                 | Overrides                 |
//! |--------------------------|---------------------------|
//! | `AUDITRIX_LOG_LEVEL`     | `cli.log_level`           |
//! | `AUDITRIX_OUTPUT_FORMAT` | `cli.output_format`       |
//! | `AUDITRIX_SEED`          | seed of every parameter set |
//!
//! Only the `[cli]` settings are validated here. Parameter business rules are
//! checked by each command after overrides are applied.

use std::path::Path;
use std::str::FromStr;

use sampling_engine::SamplingParams;
use serde::Deserialize;
use thiserror::Error;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Rendering of sampling results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Full result as JSON
    Json,
    /// Human-readable table
    Table,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            other => Err(ConfigError::Validation(vec![format!(
                "Invalid output_format '{}'. Valid values: json, table",
                other
            )])),
        }
    }
}

/// `[cli]` table
#[derive(Debug, Clone, Deserialize)]
pub struct CliSettings {
    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default output format
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_format() -> String {
    "json".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output_format: default_output_format(),
            pretty: default_pretty(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// CLI settings
    #[serde(default)]
    pub cli: CliSettings,

    /// Default sampling parameters
    #[serde(default)]
    pub params: Option<SamplingParams>,

    /// Seed taken from `AUDITRIX_SEED`
    #[serde(skip)]
    pub seed_override: Option<u64>,

    #[serde(skip)]
    env_errors: Vec<String>,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration if the file exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(log_level) = lookup("AUDITRIX_LOG_LEVEL") {
            self.cli.log_level = log_level;
        }

        if let Some(format) = lookup("AUDITRIX_OUTPUT_FORMAT") {
            self.cli.output_format = format;
        }

        if let Some(seed) = lookup("AUDITRIX_SEED") {
            match seed.parse::<u64>() {
                Ok(seed) => self.seed_override = Some(seed),
                Err(_) => self
                    .env_errors
                    .push(format!("AUDITRIX_SEED '{}' is not a non-negative integer", seed)),
            }
        }

        self
    }

    /// Output format from the settings
    pub fn output_format(&self) -> Result<OutputFormat, ConfigError> {
        self.cli.output_format.parse()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.env_errors.clone();

        if !VALID_LOG_LEVELS.contains(&self.cli.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.cli.log_level, VALID_LOG_LEVELS
            ));
        }

        if let Err(ConfigError::Validation(mut format_errors)) = self.output_format() {
            errors.append(&mut format_errors);
        }

        if self.seed_override == Some(0) {
            errors.push("AUDITRIX_SEED must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation errors, all reported together
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_default_config_validates() {
        let config = CliConfig::default();
        assert_eq!(config.cli.log_level, "info");
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_cli_table() {
        let config = CliConfig::parse(
            r#"
            [cli]
            log_level = "debug"
            output_format = "table"
            pretty = false
            "#,
        )
        .unwrap();
        assert_eq!(config.cli.log_level, "debug");
        assert_eq!(config.output_format().unwrap(), OutputFormat::Table);
        assert!(!config.cli.pretty);
        assert!(config.params.is_none());
    }

    #[test]
    fn test_parse_params_table() {
        let config = CliConfig::parse(
            r#"
            [params]
            fiscalYear = 2024
            testType = "SUBSTANTIVE"
            method = "MUS"
            populationSize = 100
            populationSum = 5050000.0
            materiality = 100000.0
            expectedMisstatement = 10000.0
            confidenceLevel = 95
            riskLevel = "moderate"
            seed = 12345

            [params.riskMatrix]
            low = 0.8
            moderate = 1.0
            high = 1.2
            "#,
        )
        .unwrap();
        let params = config.params.as_ref().unwrap();
        assert_eq!(params.seed, 12345);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_method_is_parse_error() {
        let result = CliConfig::parse(
            r#"
            [params]
            fiscalYear = 2024
            testType = "SUBSTANTIVE"
            method = "CLUSTER"
            populationSize = 1
            populationSum = 1.0
            confidenceLevel = 95
            riskLevel = "low"
            seed = 1
            riskMatrix = { low = 0.8, moderate = 1.0, high = 1.2 }
            "#,
        );
        match result {
            Err(ConfigError::Parse(msg)) => assert!(msg.contains("CLUSTER")),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_env_override() {
        let config = CliConfig::default().with_overrides(env(&[
            ("AUDITRIX_LOG_LEVEL", "warn"),
            ("AUDITRIX_OUTPUT_FORMAT", "TABLE"),
            ("AUDITRIX_SEED", "54321"),
        ]));
        assert_eq!(config.cli.log_level, "warn");
        assert_eq!(config.output_format().unwrap(), OutputFormat::Table);
        assert_eq!(config.seed_override, Some(54321));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_multiple_errors() {
        let config = CliConfig::default().with_overrides(env(&[
            ("AUDITRIX_LOG_LEVEL", "loud"),
            ("AUDITRIX_OUTPUT_FORMAT", "xml"),
            ("AUDITRIX_SEED", "minus-one"),
        ]));

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.contains("log_level")));
                assert!(errors.iter().any(|e| e.contains("output_format")));
                assert!(errors.iter().any(|e| e.contains("AUDITRIX_SEED")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_params_table_left_to_commands() {
        let config = CliConfig::parse(
            r#"
            [params]
            fiscalYear = 2024
            testType = "SUBSTANTIVE"
            method = "SRS"
            populationSize = 10
            populationSum = 1000.0
            materiality = 100.0
            expectedMisstatement = 500.0
            confidenceLevel = 95
            riskLevel = "low"
            seed = 0
            riskMatrix = { low = 0.8, moderate = 1.0, high = 1.2 }
            "#,
        )
        .unwrap()
        .with_overrides(env(&[("AUDITRIX_SEED", "5")]));

        assert!(config.validate().is_ok());
        assert_eq!(config.params.as_ref().unwrap().seed, 0);
        assert_eq!(config.seed_override, Some(5));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = CliConfig::load_or_default(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.cli.output_format, "json");
    }
}
