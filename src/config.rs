//! Configuration loading.
//!
//! Reads `config.toml` from `~/.discord-formatter/` (or `$DISCORD_FORMATTER_CONFIG`).
//! Every section has defaults, so a missing or empty file is valid.
//!
//! Precedence: CLI flags > env vars > config file > defaults. CLI flags are
//! applied by the binary; this module handles the rest.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::envelope::EnvelopeFormat;
use crate::options::FormattingOptions;

/// Backend endpoint used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "https://discord-formatterr.onrender.com/ask-gemini";

/// Env var naming an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "DISCORD_FORMATTER_CONFIG";

/// An env override whose value could not be parsed and was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    /// Variable name.
    pub var: &'static str,
    /// Raw value that failed to parse.
    pub value: String,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend endpoint settings.
    pub backend: BackendConfig,
    /// Option values used when the caller does not pick one.
    pub defaults: FormattingOptions,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Where and how to reach the formatting backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Full URL of the proxy endpoint.
    pub url: String,
    /// Request timeout; `None` leaves it to the transport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Shape of the response body.
    pub envelope: EnvelopeFormat,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_owned(),
            timeout_secs: None,
            envelope: EnvelopeFormat::default(),
        }
    }
}

impl BackendConfig {
    /// Config pointing at `url` with everything else defaulted.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for JSON log files; stderr only when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            dir: None,
        }
    }
}

impl Config {
    /// Load from `path` (or the default location), then apply env overrides.
    ///
    /// A missing file yields defaults. Overrides that could not be parsed are
    /// returned alongside the config so the caller can report them once
    /// logging is up.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the resulting backend URL is invalid.
    pub fn load(path: Option<&Path>) -> anyhow::Result<(Self, Vec<RejectedOverride>)> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path_with(|key| std::env::var(key).ok())?,
        };
        let mut config = load_config_file(&path)?;
        let rejected = config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok((config, rejected))
    }

    /// Parse a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str).context("failed to parse config TOML")
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }

    /// Apply environment overrides through a resolver (tests pass a closure
    /// instead of touching the process environment).
    ///
    /// Values that do not parse leave the setting untouched and are returned.
    pub fn apply_overrides(
        &mut self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Vec<RejectedOverride> {
        let mut rejected = Vec::new();

        if let Some(v) = env("DISCORD_FORMATTER_BACKEND_URL") {
            self.backend.url = v;
        }
        if let Some(v) = env("DISCORD_FORMATTER_TIMEOUT_SECS") {
            match v.parse() {
                Ok(n) => self.backend.timeout_secs = Some(n),
                Err(_) => rejected.push(RejectedOverride {
                    var: "DISCORD_FORMATTER_TIMEOUT_SECS",
                    value: v,
                }),
            }
        }
        if let Some(v) = env("DISCORD_FORMATTER_LOG_LEVEL") {
            self.logging.level = v;
        }

        rejected
    }

    /// Check that the backend URL is an absolute http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns an error describing the invalid URL.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_backend_url(&self.backend.url)
    }
}

/// Check that `raw` is an absolute http(s) URL.
///
/// # Errors
///
/// Returns an error if the URL does not parse or uses another scheme.
pub fn validate_backend_url(raw: &str) -> anyhow::Result<()> {
    let url = url::Url::parse(raw).with_context(|| format!("invalid backend URL {raw:?}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => anyhow::bail!("backend URL {raw:?} must use http or https, not {other}"),
    }
}

/// Read and parse a config file, returning defaults if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            tracing::debug!(path = %path.display(), "loading config from file");
            toml::from_str(&contents)
                .with_context(|| format!("failed to parse config at {}", path.display()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(anyhow::anyhow!(
            "failed to read config at {}: {e}",
            path.display()
        )),
    }
}

/// Resolve the default config directory (`~/.discord-formatter/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".discord-formatter"))
}

/// Resolve the config file path using a custom env resolver.
///
/// # Errors
///
/// Returns an error if no explicit path is set and the home directory
/// cannot be determined.
pub fn config_path_with(env: impl Fn(&str) -> Option<String>) -> anyhow::Result<PathBuf> {
    if let Some(p) = env(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(p));
    }
    Ok(config_dir()?.join("config.toml"))
}
