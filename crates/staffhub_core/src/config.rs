//! App shell configuration.
//!
//! # Responsibility
//! - Describe data-fetch policy, theme and guard fallback paths.
//! - Load configuration from JSON with per-field defaults.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.
//! - Fallback paths are absolute (`/`-prefixed).

use crate::guard::route_guard::{GuardFallback, DEFAULT_LOGIN_PATH};
use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const DEFAULT_RETRY: u32 = 1;
const DEFAULT_STALE_TIME_MS: i64 = 5 * 60 * 1000;

/// Data-fetch caching policy applied to every domain store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryPolicy {
    /// Extra attempts after the first failed fetch.
    pub retry: u32,
    /// Committed data younger than this is fresh.
    pub stale_time_ms: i64,
    pub refetch_on_window_focus: bool,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self {
            retry: DEFAULT_RETRY,
            stale_time_ms: DEFAULT_STALE_TIME_MS,
            refetch_on_window_focus: false,
        }
    }
}

/// Why a refetch is being considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefetchTrigger {
    /// Screen mounted or navigated to.
    Mount,
    /// Browser window regained focus.
    WindowFocus,
    /// User asked explicitly (pull-to-refresh, retry button).
    Manual,
}

impl QueryPolicy {
    /// Never-fetched data is stale.
    pub fn is_stale(&self, last_fetched_at: Option<i64>, now_ms: i64) -> bool {
        match last_fetched_at {
            None => true,
            Some(fetched_at) => now_ms.saturating_sub(fetched_at) >= self.stale_time_ms,
        }
    }

    pub fn should_refetch(
        &self,
        trigger: RefetchTrigger,
        last_fetched_at: Option<i64>,
        now_ms: i64,
    ) -> bool {
        match trigger {
            RefetchTrigger::Manual => true,
            RefetchTrigger::Mount => self.is_stale(last_fetched_at, now_ms),
            RefetchTrigger::WindowFocus => {
                self.refetch_on_window_focus && self.is_stale(last_fetched_at, now_ms)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub mode: ThemeMode,
    /// CSS color for primary accents.
    pub accent: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Light,
            accent: "#2563eb".to_string(),
        }
    }
}

/// Composition-root configuration for one app instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub query: QueryPolicy,
    pub theme: ThemeConfig,
    pub login_path: String,
    pub unauthorized_path: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            query: QueryPolicy::default(),
            theme: ThemeConfig::default(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            unauthorized_path: DEFAULT_LOGIN_PATH.to_string(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl AppConfig {
    /// Parses and validates JSON config text.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("login_path", &self.login_path),
            ("unauthorized_path", &self.unauthorized_path),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::InvalidField {
                    field,
                    message: format!("expected absolute path, got `{value}`"),
                });
            }
        }
        let level = self.log_level.trim().to_ascii_lowercase();
        if !matches!(
            level.as_str(),
            "trace" | "debug" | "info" | "warn" | "warning" | "error"
        ) {
            return Err(ConfigError::InvalidField {
                field: "log_level",
                message: format!("unsupported level `{}`", self.log_level),
            });
        }
        if self.query.stale_time_ms < 0 {
            return Err(ConfigError::InvalidField {
                field: "query.stale_time_ms",
                message: "must not be negative".to_string(),
            });
        }
        Ok(())
    }

    /// Starts file logging at the configured level.
    pub fn start_logging(&self, log_dir: &str) -> Result<(), String> {
        crate::logging::init_logging(&self.log_level, log_dir)
    }

    pub fn guard_fallback(&self) -> GuardFallback {
        GuardFallback {
            login_path: self.login_path.clone(),
            unauthorized_path: self.unauthorized_path.clone(),
        }
    }
}

/// Configuration load errors.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::InvalidField { field, message } => {
                write!(f, "invalid config field `{field}`: {message}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidField { .. } => None,
        }
    }
}
