//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_API_BASE_URL: &str = "http://localhost:8080/api";
    pub const DEV_DOWNLOAD_DIR: &str = ".";
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// What to do when a dashboard metrics fetch fails.
///
/// The view always falls back to an all-zero summary; this only controls
/// whether the user is told about the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsErrorPolicy {
    /// Substitute zeros without telling the user.
    #[default]
    SilentZeroFill,
    /// Substitute zeros and surface a notification.
    Notify,
}

impl MetricsErrorPolicy {
    /// Parse policy from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "silent" | "zero-fill" => Some(Self::SilentZeroFill),
            "notify" | "banner" => Some(Self::Notify),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Backend API base URL, including the `/api` prefix
    pub api_base_url: String,
    /// Directory where exported CSV files are saved
    pub download_dir: PathBuf,
    /// HTTP connect timeout in seconds (no timeout when unset)
    pub connect_timeout_secs: Option<u64>,
    /// HTTP request timeout in seconds (no timeout when unset)
    pub request_timeout_secs: Option<u64>,
    /// Behavior when a dashboard metrics fetch fails
    pub metrics_error_policy: MetricsErrorPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development) all variables have
    /// defaults; only RUST_ENV is required. In production mode
    /// TFA_API_BASE_URL must be set to a non-default value.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `TFA_API_BASE_URL`: Backend base URL (default: http://localhost:8080/api)
    /// - `TFA_DOWNLOAD_DIR`: Directory for CSV downloads (default: current directory)
    /// - `TFA_CONNECT_TIMEOUT_SECS`: HTTP connect timeout (default: none)
    /// - `TFA_REQUEST_TIMEOUT_SECS`: HTTP request timeout (default: none)
    /// - `TFA_METRICS_ERROR_POLICY`: silent | notify (default: silent)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Parse environment - required
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let api_base_url = env::var("TFA_API_BASE_URL")
            .unwrap_or_else(|_| defaults::DEV_API_BASE_URL.to_string());

        let download_dir = env::var("TFA_DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(defaults::DEV_DOWNLOAD_DIR));

        let connect_timeout_secs = parse_optional_secs("TFA_CONNECT_TIMEOUT_SECS")?;
        let request_timeout_secs = parse_optional_secs("TFA_REQUEST_TIMEOUT_SECS")?;

        let metrics_error_policy = match env::var("TFA_METRICS_ERROR_POLICY") {
            Ok(s) => MetricsErrorPolicy::parse(&s).ok_or(ConfigError::InvalidValue(
                "TFA_METRICS_ERROR_POLICY must be 'silent' or 'notify'",
            ))?,
            Err(_) => MetricsErrorPolicy::default(),
        };

        let config = Config {
            environment,
            api_base_url,
            download_dir,
            connect_timeout_secs,
            request_timeout_secs,
            metrics_error_policy,
        };

        // Validate production configuration
        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.api_base_url == defaults::DEV_API_BASE_URL {
            errors.push(format!(
                "TFA_API_BASE_URL is using development default '{}'. Set the production backend URL.",
                defaults::DEV_API_BASE_URL
            ));
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Parse an optional seconds value from the environment.
fn parse_optional_secs(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(var) {
        Ok(s) => s
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue("timeout must be a whole number of seconds")),
        Err(_) => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
