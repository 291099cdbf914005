//! Configuration types for the cabinet client.
//!
//! Settings live in `~/.cabinet/config.toml`:
//!
//! - [`Config`] - Root configuration struct
//! - [`ApiConfig`] - Backend base URL and request timeout
//! - [`NotificationsConfig`] - Notification polling
//! - [`DownloadsConfig`] - Where downloaded files are written
//!
//! A missing file is not an error: every section falls back to defaults
//! suitable for a local backend.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::constants;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be shown but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// config.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub downloads: DownloadsConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Config pointing at `base_url` with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl NotificationsConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadsConfig {
    #[serde(default = "default_download_dir")]
    pub dir: PathBuf,
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            dir: default_download_dir(),
        }
    }
}

fn default_base_url() -> String {
    constants::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    constants::DEFAULT_TIMEOUT_SECS
}

fn default_poll_interval_secs() -> u64 {
    constants::NOTIFICATION_POLL_INTERVAL_SECS
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from `~/.cabinet/config.toml`, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be resolved or the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = crate::paths::get_config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - Fields have invalid types
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply a base URL override, ignoring empty values.
    ///
    /// Precedence is caller-defined; the CLI passes `--api-url` first, then
    /// `CABINET_API_URL`.
    #[must_use]
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url
            && !url.trim().is_empty()
        {
            self.api.base_url = url.trim().to_string();
        }
        self
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Validate configuration with comprehensive checks.
    ///
    /// # Errors
    ///
    /// Returns an error listing every problem found:
    /// - Base URL that does not parse or is not http(s)
    /// - Zero request timeout
    /// - Zero poll interval
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // 1. Base URL
        match Url::parse(&self.api.base_url) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    errors.push(format!(
                        "api.base_url must use http or https (got: '{}')",
                        url.scheme()
                    ));
                } else if url.scheme() == "http"
                    && !matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "::1"))
                {
                    warnings.push(format!(
                        "api.base_url uses plain http for a remote host ({})\n  \
                         The session token will be sent unencrypted",
                        self.api.base_url
                    ));
                }
            },
            Err(e) => errors.push(format!(
                "api.base_url is not a valid URL: '{}' ({e})",
                self.api.base_url
            )),
        }

        // 2. Timeout
        if self.api.timeout_secs == 0 {
            errors.push("api.timeout_secs cannot be 0 (default: 30)".to_string());
        }

        // 3. Notification polling
        if self.notifications.poll_interval_secs == 0 {
            errors.push("notifications.poll_interval_secs cannot be 0 (default: 30)".to_string());
        } else if self.notifications.poll_interval_secs < constants::MIN_RECOMMENDED_POLL_SECS {
            warnings.push(format!(
                "notifications.poll_interval_secs {} is very low\n  \
                 Recommendation: poll every {} seconds or more",
                self.notifications.poll_interval_secs,
                constants::MIN_RECOMMENDED_POLL_SECS
            ));
        }

        // 4. Download directory
        if self.downloads.dir.exists() && !self.downloads.dir.is_dir() {
            errors.push(format!(
                "downloads.dir is not a directory: {}",
                self.downloads.dir.display()
            ));
        }

        if !errors.is_empty() {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }

        Ok(ValidationResult { warnings })
    }
}
