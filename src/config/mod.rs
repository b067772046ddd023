//! Configuration for the patient directory.
//!
//! Values come from three layers, later ones winning: the defaults below,
//! `PATIENT_*` environment variables, then command-line flags applied by the
//! binary.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{DirectoryError, Result};
use crate::query::params::{DEFAULT_LIMIT, DEFAULT_MAX_LIMIT, ParameterLimits};
use crate::snapshot::RefreshPolicy;

/// Environment variable naming the dataset file
pub const ENV_DATA_PATH: &str = "PATIENT_DATA_PATH";
/// Environment variable naming the listen address
pub const ENV_BIND_ADDR: &str = "PATIENT_BIND_ADDR";
/// Environment variable holding the refresh policy
pub const ENV_REFRESH: &str = "PATIENT_REFRESH";
/// Environment variable holding the default page size
pub const ENV_DEFAULT_LIMIT: &str = "PATIENT_DEFAULT_LIMIT";
/// Environment variable holding the largest accepted page size
pub const ENV_MAX_LIMIT: &str = "PATIENT_MAX_LIMIT";
/// Environment variable toggling the CORS layer
pub const ENV_CORS: &str = "PATIENT_CORS";

/// Configuration for the directory service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// JSON file holding the patient collection
    pub data_path: PathBuf,
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// When the in-memory snapshot is reloaded
    pub refresh: RefreshPolicy,
    /// Page size used when a request omits `limit`
    pub default_limit: u32,
    /// Largest `limit` a request may ask for
    pub max_limit: u32,
    /// Whether to attach a permissive CORS layer
    pub enable_cors: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("public/data.json"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            refresh: RefreshPolicy::Once,
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            enable_cors: true,
        }
    }
}

impl DirectoryConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `PATIENT_*` key
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATA_PATH) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            config.bind_addr = addr
                .parse::<SocketAddr>()
                .map_err(|e| config_error(ENV_BIND_ADDR, &addr, e))?;
        }
        if let Some(refresh) = lookup(ENV_REFRESH) {
            config.refresh = refresh.parse()?;
        }
        if let Some(limit) = lookup(ENV_DEFAULT_LIMIT) {
            config.default_limit = limit
                .parse::<u32>()
                .map_err(|e| config_error(ENV_DEFAULT_LIMIT, &limit, e))?;
        }
        if let Some(limit) = lookup(ENV_MAX_LIMIT) {
            config.max_limit = limit
                .parse::<u32>()
                .map_err(|e| config_error(ENV_MAX_LIMIT, &limit, e))?;
        }
        if let Some(cors) = lookup(ENV_CORS) {
            config.enable_cors = parse_flag(&cors).ok_or_else(|| {
                DirectoryError::Config(format!("{ENV_CORS} must be true or false, got '{cors}'"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the page-size bounds are consistent
    pub fn validate(&self) -> Result<()> {
        if self.max_limit == 0 {
            return Err(DirectoryError::Config(
                "max_limit must be at least 1".to_string(),
            ));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(DirectoryError::Config(format!(
                "default_limit must be between 1 and max_limit ({}), got {}",
                self.max_limit, self.default_limit
            )));
        }
        Ok(())
    }

    /// Page-size bounds for query validation
    #[must_use]
    pub const fn parameter_limits(&self) -> ParameterLimits {
        ParameterLimits {
            default_limit: self.default_limit,
            max_limit: self.max_limit,
        }
    }
}

impl fmt::Display for DirectoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Directory Configuration:")?;
        writeln!(f, "  Data Path: {}", self.data_path.display())?;
        writeln!(f, "  Bind Address: {}", self.bind_addr)?;
        writeln!(f, "  Refresh Policy: {}", self.refresh)?;
        writeln!(f, "  Default Limit: {}", self.default_limit)?;
        writeln!(f, "  Max Limit: {}", self.max_limit)?;
        writeln!(f, "  CORS Enabled: {}", self.enable_cors)?;
        Ok(())
    }
}

fn config_error(key: &str, value: &str, error: impl fmt::Display) -> DirectoryError {
    DirectoryError::Config(format!("invalid value '{value}' for {key}: {error}"))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
