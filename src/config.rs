//! Runtime configuration.
//!
//! Settings are layered file → environment → CLI:
//!
//! ```toml
//! [api]
//! base_url = "https://api.shop.paywhirl.com/2022-04"
//! timeout_secs = 30
//!
//! [throttle]
//! batch_size = 30
//! pause_secs = 60
//!
//! [audit]
//! path = "logs/audit.csv"
//! ```
//!
//! The API token is only ever read from the environment (`PAYWHIRL_API_TOKEN`).

use crate::batch::ThrottleConfig;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TOKEN_ENV: &str = "PAYWHIRL_API_TOKEN";
pub const BASE_URL_ENV: &str = "PAYWHIRL_API_BASE";
pub const DEFAULT_BASE_URL: &str = "https://api.shop.paywhirl.com/2022-04";
pub const DEFAULT_AUDIT_LOG: &str = "logs/audit.csv";
pub const DEFAULT_CONFIG_FILE: &str = "delivery-price.toml";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_THROTTLE_BATCH_SIZE: usize = 30;
const DEFAULT_THROTTLE_PAUSE_SECS: u64 = 60;

/// `[api]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSection {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// `[throttle]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThrottleSection {
    /// Records processed between pauses
    #[serde(default)]
    pub batch_size: Option<usize>,
    /// Pause length in seconds
    #[serde(default)]
    pub pause_secs: Option<u64>,
}

/// `[audit]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditSection {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Contents of `delivery-price.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub throttle: ThrottleSection,
    #[serde(default)]
    pub audit: AuditSection,
}

impl FileConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Load `path` if given (it must exist), else `default_path` if it exists,
    /// else an empty config.
    pub fn load_or_default(path: Option<&Path>, default_path: &Path) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None if default_path.exists() => Self::load(default_path),
            None => Ok(Self::default()),
        }
    }
}

/// Connection settings handed to the HTTP client.
#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    token: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Overrides supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub audit_log: Option<PathBuf>,
}

/// Fully resolved runtime configuration.
#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub throttle: ThrottleConfig,
    pub audit_log: PathBuf,
    token: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("throttle", &self.throttle)
            .field("audit_log", &self.audit_log)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn load(overrides: &CliOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, Path::new(DEFAULT_CONFIG_FILE), |key| {
            std::env::var(key).ok()
        })
    }

    /// Resolve configuration with an explicit environment lookup.
    pub fn resolve<F>(
        overrides: &CliOverrides,
        default_config_file: &Path,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file =
            FileConfig::load_or_default(overrides.config_file.as_deref(), default_config_file)?;

        let base_url = env(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .or(file.api.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = file.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "api.timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }

        let batch_size = file
            .throttle
            .batch_size
            .unwrap_or(DEFAULT_THROTTLE_BATCH_SIZE);
        if batch_size == 0 {
            return Err(ConfigError::Invalid {
                key: "throttle.batch_size",
                message: "must be at least 1".to_string(),
            });
        }
        let pause = Duration::from_secs(
            file.throttle
                .pause_secs
                .unwrap_or(DEFAULT_THROTTLE_PAUSE_SECS),
        );

        let audit_log = overrides
            .audit_log
            .clone()
            .or(file.audit.path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIT_LOG));

        let token = env(TOKEN_ENV)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            throttle: ThrottleConfig::new(batch_size, pause),
            audit_log,
            token,
        })
    }

    /// Client settings for the billing API.
    ///
    /// Fails with `MissingToken` when `PAYWHIRL_API_TOKEN` is absent or blank.
    pub fn api_config(&self) -> Result<ApiConfig, ConfigError> {
        let token = self
            .token
            .as_deref()
            .ok_or(ConfigError::MissingToken(TOKEN_ENV))?;
        Ok(ApiConfig::new(&self.base_url, token, self.timeout))
    }
}
