use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use strum::{EnumString, IntoStaticStr};
use thiserror::Error;
use url::Url;

use crate::{models::TemplateId, routes::Route};

/// Address of the portfolio API when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

const DEFAULT_LOG_LEVEL: &str = "info";
const APP_DIR: &str = "localpro-canvas";
const SESSION_FILE: &str = "session.toml";

/// Overrides [`Config::api_base_url`].
pub const ENV_API_BASE_URL: &str = "CANVAS_API_BASE_URL";
/// Overrides [`Config::share_base_url`].
pub const ENV_SHARE_BASE_URL: &str = "CANVAS_SHARE_BASE_URL";
/// Overrides [`Config::session_path`].
pub const ENV_SESSION_PATH: &str = "CANVAS_SESSION_PATH";
/// Overrides [`LoggingConfig::level`].
pub const ENV_LOG_LEVEL: &str = "CANVAS_LOG_LEVEL";
/// Overrides [`LoggingConfig::format`]; `text` or `json`.
pub const ENV_LOG_FORMAT: &str = "CANVAS_LOG_FORMAT";
/// Overrides [`Config::request_timeout_secs`].
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "CANVAS_REQUEST_TIMEOUT_SECS";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for [`Config`].
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// The file is not valid JSON for [`Config`].
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither YAML nor JSON.
    #[error("unsupported configuration format for {0}; use 'yaml' or 'json'")]
    UnsupportedFormat(PathBuf),

    /// An environment variable holds a value that cannot be used.
    #[error("invalid {var} value: {reason}")]
    InvalidEnv {
        /// Name of the offending variable.
        var: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The merged configuration breaks a constraint.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// No session path is set and the platform has no config directory.
    #[error("no configuration directory available for the session file")]
    NoConfigDir,
}

/// Output format of the log subscriber.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Log level and output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Output format of log events.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Client configuration for LocalPro Canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL every API path is joined onto.
    pub api_base_url: Url,

    /// Origin of the web app, used for shareable portfolio links. Links
    /// point at the API's public endpoint when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_base_url: Option<Url>,

    /// Where the credential is persisted. `None` means the per-user config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_path: Option<PathBuf>,

    /// Per-request timeout. Requests wait indefinitely when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Log level and format.
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn default_api_base_url() -> Url {
    Url::parse(DEFAULT_API_BASE_URL)
        .unwrap_or_else(|err| unreachable!("default API base URL is invalid: {err}"))
}

impl Config {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            share_base_url: None,
            session_path: None,
            request_timeout_secs: None,
            logging: LoggingConfig::default(),
        }
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// File values are applied first. Environment variables only fill in values
    /// still at their default, and `base_url_override` wins over both.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the file cannot be read or parsed, has an
    /// unsupported extension, or an environment variable holds an invalid value.
    pub fn load_config(
        config_path: Option<&Path>,
        base_url_override: Option<Url>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::with_defaults(),
        };

        config.apply_env_overrides()?;

        if let Some(url) = base_url_override {
            config.api_base_url = url;
        }

        config.validate()?;
        tracing::debug!(api_base_url = %config.api_base_url, "configuration loaded");
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(serde_yml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let defaults = Self::with_defaults();

        if self.api_base_url == defaults.api_base_url
            && let Ok(value) = env::var(ENV_API_BASE_URL)
        {
            self.api_base_url = Url::parse(&value).map_err(|err| ConfigError::InvalidEnv {
                var: ENV_API_BASE_URL,
                reason: err.to_string(),
            })?;
        }
        if self.share_base_url.is_none()
            && let Ok(value) = env::var(ENV_SHARE_BASE_URL)
        {
            self.share_base_url = Some(Url::parse(&value).map_err(|err| {
                ConfigError::InvalidEnv {
                    var: ENV_SHARE_BASE_URL,
                    reason: err.to_string(),
                }
            })?);
        }
        if self.session_path.is_none()
            && let Ok(value) = env::var(ENV_SESSION_PATH)
        {
            self.session_path = Some(PathBuf::from(value));
        }
        if self.logging.level == defaults.logging.level
            && let Ok(value) = env::var(ENV_LOG_LEVEL)
        {
            self.logging.level = value;
        }
        if self.logging.format == defaults.logging.format
            && let Ok(value) = env::var(ENV_LOG_FORMAT)
        {
            self.logging.format = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_LOG_FORMAT,
                reason: format!("expected 'text' or 'json', got '{value}'"),
            })?;
        }
        if self.request_timeout_secs.is_none()
            && let Ok(value) = env::var(ENV_REQUEST_TIMEOUT_SECS)
        {
            let secs = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_REQUEST_TIMEOUT_SECS,
                reason: format!("expected a number of seconds, got '{value}'"),
            })?;
            self.request_timeout_secs = Some(secs);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let urls = [
            Some(("api_base_url", &self.api_base_url)),
            self.share_base_url
                .as_ref()
                .map(|url| ("share_base_url", url)),
        ];
        for (name, url) in urls.into_iter().flatten() {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "{name} must use http or https, got '{}'",
                    url.scheme()
                )));
            }
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Session file location, falling back to `<config dir>/localpro-canvas/session.toml`.
    ///
    /// # Errors
    /// [`ConfigError::NoConfigDir`] when no path is configured and the
    /// platform has no per-user config directory.
    pub fn resolved_session_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.session_path {
            return Ok(path.clone());
        }
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(APP_DIR).join(SESSION_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// [`Config::request_timeout_secs`] as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Shareable address of a portfolio.
    ///
    /// With [`Config::share_base_url`] set this is the web app's template
    /// route; otherwise the API's public `/p/{id}` endpoint.
    #[must_use]
    pub fn portfolio_link(&self, template: TemplateId, unique_id: &str) -> String {
        match &self.share_base_url {
            Some(base) => join_path(base, &Route::portfolio(template, unique_id).path()),
            None => join_path(&self.api_base_url, &format!("/p/{unique_id}")),
        }
    }
}

fn join_path(base: &Url, path: &str) -> String {
    format!("{}{path}", base.as_str().trim_end_matches('/'))
}
