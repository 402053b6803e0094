use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::scoring::{InterpolationWeights, PartialYearPolicy, ScoringPolicy};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: load_scoring_policy()?,
        })
    }
}

fn load_scoring_policy() -> Result<ScoringPolicy, ConfigError> {
    let mut policy = ScoringPolicy::default();

    if let Ok(raw) = env::var("SCORE_PARTIAL_YEAR_POLICY") {
        policy.partial_year =
            PartialYearPolicy::parse(&raw).ok_or(ConfigError::InvalidPartialYearPolicy(raw))?;
    }

    if let Some(weights) = weights_from_env("SCORE_EMPTY_FIRST_YEAR_WEIGHTS")? {
        policy.substitution.empty_first_year = weights;
    }
    if let Some(weights) = weights_from_env("SCORE_EMPTY_SECOND_YEAR_WEIGHTS")? {
        policy.substitution.empty_second_year = weights;
    }

    policy
        .validate()
        .map_err(|source| ConfigError::InvalidScoringPolicy(source.to_string()))?;

    Ok(policy)
}

fn weights_from_env(var: &'static str) -> Result<Option<InterpolationWeights>, ConfigError> {
    match env::var(var) {
        Ok(raw) => InterpolationWeights::parse(&raw)
            .map(Some)
            .ok_or(ConfigError::InvalidWeights { var, value: raw }),
        Err(_) => Ok(None),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPartialYearPolicy(String),
    InvalidWeights { var: &'static str, value: String },
    InvalidScoringPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPartialYearPolicy(value) => write!(
                f,
                "SCORE_PARTIAL_YEAR_POLICY must be 'present' or 'empty', found '{}'",
                value
            ),
            ConfigError::InvalidWeights { var, value } => write!(
                f,
                "{} must look like '<adjacent>,<third>', found '{}'",
                var, value
            ),
            ConfigError::InvalidScoringPolicy(reason) => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPartialYearPolicy(_)
            | ConfigError::InvalidWeights { .. }
            | ConfigError::InvalidScoringPolicy(_) => None,
        }
    }
}
