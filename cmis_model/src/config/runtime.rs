// RUNTIME PREFERENCES

use super::constants::{cache, query};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingPreferences {
    /// Entries held per direction by the qualified-name cache
    pub qname_cache_capacity: usize,

    /// Namespace URI given to bare local names
    pub default_namespace: String,

    /// Locale used to choose the sort variant of text fields (e.g. `en_GB`)
    pub sort_locale: String,

    /// Range query boundaries
    pub range: RangeSentinels,

    pub logging: LoggingPreferences,
}

impl Default for MappingPreferences {
    fn default() -> Self {
        Self {
            qname_cache_capacity: env::var(env_vars::QNAME_CACHE_CAPACITY)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(cache::DEFAULT_QNAME_CACHE_CAPACITY),
            default_namespace: env::var(env_vars::DEFAULT_NAMESPACE)
                .unwrap_or_else(|_| crate::qname::DEFAULT_URI.to_string()),
            sort_locale: env::var(env_vars::SORT_LOCALE).unwrap_or_else(|_| "en".to_string()),
            range: RangeSentinels::default(),
            logging: LoggingPreferences::default(),
        }
    }
}

impl MappingPreferences {
    /// Parse preferences from TOML; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ModelError> {
        let preferences: Self = toml::from_str(source)
            .map_err(|e| ModelError::configuration(format!("invalid TOML: {}", e)))?;
        preferences.validate()?;
        Ok(preferences)
    }

    /// Load preferences from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            ModelError::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.qname_cache_capacity == 0 {
            return Err(ModelError::configuration(
                "qname_cache_capacity must be greater than zero",
            ));
        }
        if self.qname_cache_capacity > cache::MAX_QNAME_CACHE_CAPACITY {
            return Err(ModelError::configuration(format!(
                "qname_cache_capacity {} exceeds maximum {}",
                self.qname_cache_capacity,
                cache::MAX_QNAME_CACHE_CAPACITY
            )));
        }
        if self.range.numeric_min == self.range.numeric_max
            || self.range.string_min == self.range.string_max
        {
            return Err(ModelError::configuration(
                "range sentinels must differ",
            ));
        }
        Ok(())
    }
}

/// Boundary tokens substituted for the open end of a range predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeSentinels {
    /// Lower bound for numeric and date fields
    pub numeric_min: String,
    /// Upper bound for numeric and date fields
    pub numeric_max: String,
    /// Lower bound for text fields
    pub string_min: String,
    /// Upper bound for text fields
    pub string_max: String,
}

impl Default for RangeSentinels {
    fn default() -> Self {
        Self {
            numeric_min: env::var(env_vars::RANGE_NUMERIC_MIN)
                .unwrap_or_else(|_| query::NUMERIC_MIN.to_string()),
            numeric_max: env::var(env_vars::RANGE_NUMERIC_MAX)
                .unwrap_or_else(|_| query::NUMERIC_MAX.to_string()),
            string_min: query::STRING_MIN.to_string(),
            string_max: query::STRING_MAX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Cache and naming
    pub const QNAME_CACHE_CAPACITY: &str = "CMIS_QNAME_CACHE_CAPACITY";
    pub const DEFAULT_NAMESPACE: &str = "CMIS_DEFAULT_NAMESPACE";

    // Query
    pub const SORT_LOCALE: &str = "CMIS_SORT_LOCALE";
    pub const RANGE_NUMERIC_MIN: &str = "CMIS_RANGE_NUMERIC_MIN";
    pub const RANGE_NUMERIC_MAX: &str = "CMIS_RANGE_NUMERIC_MAX";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "CMIS_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "CMIS_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "CMIS_LOGGING_MIN_LEVEL";
}
