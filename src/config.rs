//! Application configuration management
//!
//! Configuration is loaded from environment variables (and an optional
//! `.env` file) once at startup and validated before the screening runs.

use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_MIN_EXPERIENCE_YEARS,
    DEFAULT_MIN_MATCHING_SKILLS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
    pub screening: ScreeningConfig,
}

/// Log output configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub rust_log: String,
    pub format: LogFormat,
    /// Attach the host name to decorated action logs
    pub monitoring: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Screening policy configuration
#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    pub min_experience_years: u32,
    pub min_matching_skills: usize,
    /// JSON `RuleConfig` replacing the default eligibility specification
    pub rule_file: Option<PathBuf>,
    /// JSON list of applicants replacing the built-in sample
    pub applicants_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            logging: LoggingConfig::from_env()?,
            screening: ScreeningConfig::from_env()?,
        })
    }
}

impl LoggingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| DEFAULT_LOG_FORMAT.to_string())
                .parse()?,
            monitoring: parse_bool("LOG_MONITORING", env::var("LOG_MONITORING").ok())?,
        })
    }
}

impl ScreeningConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Read the screening settings through `lookup`, which maps a variable
    /// name to its value when set.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            min_experience_years: parse_or(
                "SCREENING_MIN_EXPERIENCE",
                lookup("SCREENING_MIN_EXPERIENCE"),
                DEFAULT_MIN_EXPERIENCE_YEARS,
            )?,
            min_matching_skills: parse_or(
                "SCREENING_MIN_SKILLS",
                lookup("SCREENING_MIN_SKILLS"),
                DEFAULT_MIN_MATCHING_SKILLS,
            )?,
            rule_file: lookup("SCREENING_RULE_FILE").map(PathBuf::from),
            applicants_file: lookup("SCREENING_APPLICANTS_FILE").map(PathBuf::from),
        })
    }
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            min_experience_years: DEFAULT_MIN_EXPERIENCE_YEARS,
            min_matching_skills: DEFAULT_MIN_MATCHING_SKILLS,
            rule_file: None,
            applicants_file: None,
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        }
    }
}

fn parse_or<V: std::str::FromStr>(
    var: &str,
    value: Option<String>,
    default: V,
) -> Result<V, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(var.to_string())),
    }
}

fn parse_bool(var: &str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some("1") | Some("true") | Some("yes") => Ok(true),
        Some("0") | Some("false") | Some("no") => Ok(false),
        Some(_) => Err(ConfigError::InvalidValue(var.to_string())),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
