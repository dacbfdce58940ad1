//! Server configuration.
//!
//! Configuration comes from environment variables (a `.env` file is loaded
//! first by the binary). Every variable is optional and falls back to the
//! values in [`cafm_core::defaults`].
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `HOST` | `0.0.0.0` | Bind address |
//! | `PORT` | `3000` | Bind port |
//! | `RATE_LIMIT_ENABLED` | `true` | Global rate limiter on/off |
//! | `RATE_LIMIT_REQUESTS` | `100` | Requests allowed per period |
//! | `RATE_LIMIT_PERIOD_SECS` | `60` | Rate limit period |
//! | `ALLOWED_ORIGINS` | localhost dev origins | Comma-separated CORS allow-list |
//! | `AUTO_ASSIGN` | `true` | Assign new tickets automatically |
//! | `ASSIGNMENT_POLICY` | `round_robin` | `round_robin` or `random` |
//! | `TECHNICIANS_FILE` | unset | JSON array of technicians to seed |

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use cafm_core::{defaults, CreateTechnicianRequest};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read technicians file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse technicians file: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How a technician is chosen among the active holders of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentPolicyKind {
    #[default]
    RoundRobin,
    Random,
}

impl FromStr for AssignmentPolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "round_robin" | "round-robin" | "roundrobin" => Ok(Self::RoundRobin),
            "random" => Ok(Self::Random),
            _ => Err(format!("Invalid assignment policy: {}", s)),
        }
    }
}

impl fmt::Display for AssignmentPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin => write!(f, "round_robin"),
            Self::Random => write!(f, "random"),
        }
    }
}

/// Global rate limit settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests: u32,
    pub period_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests: defaults::RATE_LIMIT_REQUESTS as u32,
            period_secs: defaults::RATE_LIMIT_PERIOD_SECS,
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit: RateLimitConfig,
    pub allowed_origins: Vec<String>,
    pub auto_assign: bool,
    pub assignment_policy: AssignmentPolicyKind,
    pub technicians_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            rate_limit: RateLimitConfig::default(),
            allowed_origins: parse_origins(defaults::ALLOWED_ORIGINS),
            auto_assign: true,
            assignment_policy: AssignmentPolicyKind::default(),
            technicians_file: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse_value("PORT", &port)?;
        }
        if let Some(enabled) = lookup("RATE_LIMIT_ENABLED") {
            config.rate_limit.enabled = parse_bool("RATE_LIMIT_ENABLED", &enabled)?;
        }
        if let Some(requests) = lookup("RATE_LIMIT_REQUESTS") {
            config.rate_limit.requests = parse_value("RATE_LIMIT_REQUESTS", &requests)?;
        }
        if let Some(period) = lookup("RATE_LIMIT_PERIOD_SECS") {
            config.rate_limit.period_secs = parse_value("RATE_LIMIT_PERIOD_SECS", &period)?;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            let parsed = parse_origins(&origins);
            if !parsed.is_empty() {
                config.allowed_origins = parsed;
            }
        }
        if let Some(auto_assign) = lookup("AUTO_ASSIGN") {
            config.auto_assign = parse_bool("AUTO_ASSIGN", &auto_assign)?;
        }
        if let Some(policy) = lookup("ASSIGNMENT_POLICY") {
            config.assignment_policy =
                policy
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "ASSIGNMENT_POLICY",
                        value: policy.clone(),
                    })?;
        }
        config.technicians_file = lookup("TECHNICIANS_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        config.validate()?;
        debug!(
            host = %config.host,
            port = config.port,
            auto_assign = config.auto_assign,
            assignment_policy = %config.assignment_policy,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.rate_limit.enabled {
            if self.rate_limit.requests == 0 {
                return Err(ConfigError::Validation(
                    "RATE_LIMIT_REQUESTS must be greater than zero".to_string(),
                ));
            }
            if self.rate_limit.period_secs == 0 {
                return Err(ConfigError::Validation(
                    "RATE_LIMIT_PERIOD_SECS must be greater than zero".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> ConfigResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "HOST",
                value: self.host.clone(),
            })
    }
}

/// Read the technicians seed file: a JSON array of
/// `{"name", "role", "email"?, "active"?}` objects.
pub fn load_technicians(path: &Path) -> ConfigResult<Vec<CreateTechnicianRequest>> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
