//! h-at Configuration Management
//!
//! Handles configuration from environment variables and TOML files
//! with sensible defaults for local development.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::TemplateKind;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Annotation service connection
    pub annotator: AnnotatorConfig,

    /// Template engine settings
    pub engine: EngineConfig,

    /// Document acquisition settings
    pub source: SourceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Annotation service
        if let Ok(url) = std::env::var("HAT_ANNOTATOR_URL") {
            config.annotator.url = url;
        }
        if let Ok(timeout) = std::env::var("HAT_ANNOTATOR_TIMEOUT_SECS") {
            config.annotator.timeout_secs =
                timeout.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "HAT_ANNOTATOR_TIMEOUT_SECS".to_string(),
                    value: timeout,
                })?;
        }

        // Engine
        if let Ok(parallel) = std::env::var("HAT_PARALLEL") {
            config.engine.parallel = parse_bool("HAT_PARALLEL", &parallel)?;
        }
        if let Ok(templates) = std::env::var("HAT_TEMPLATES") {
            config.engine.templates = templates
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse)
                .collect::<Result<_, _>>()?;
        }

        // Sources
        if let Ok(url) = std::env::var("HAT_WIKIPEDIA_API_URL") {
            config.source.wikipedia_api_url = url;
        }
        if let Ok(concurrency) = std::env::var("HAT_CONCURRENCY") {
            config.source.concurrency =
                concurrency.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "HAT_CONCURRENCY".to_string(),
                    value: concurrency,
                })?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = std::env::var("LOG_JSON") {
            config.logging.json_format = parse_bool("LOG_JSON", &json)?;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;

        // Only override if env values differ from defaults
        if env_config.annotator.url != AnnotatorConfig::default().url {
            self.annotator.url = env_config.annotator.url;
        }
        if env_config.annotator.timeout_secs != AnnotatorConfig::default().timeout_secs {
            self.annotator.timeout_secs = env_config.annotator.timeout_secs;
        }
        if env_config.engine.parallel != EngineConfig::default().parallel {
            self.engine.parallel = env_config.engine.parallel;
        }
        if env_config.engine.templates != EngineConfig::default().templates {
            self.engine.templates = env_config.engine.templates;
        }
        if env_config.source.wikipedia_api_url != SourceConfig::default().wikipedia_api_url {
            self.source.wikipedia_api_url = env_config.source.wikipedia_api_url;
        }
        if env_config.source.concurrency != SourceConfig::default().concurrency {
            self.source.concurrency = env_config.source.concurrency;
        }
        if env_config.logging.level != LoggingConfig::default().level {
            self.logging.level = env_config.logging.level;
        }
        if env_config.logging.json_format {
            self.logging.json_format = true;
        }

        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Annotation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Endpoint accepting `{"title": ..., "text": ...}` and returning an annotated document
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/annotate".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Template engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Evaluate sentences on the rayon pool
    pub parallel: bool,

    /// Recursion ceiling for dependency tree search
    pub max_tree_depth: usize,

    /// Built-in templates to register, in order
    pub templates: Vec<TemplateKind>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            max_tree_depth: 256,
            templates: TemplateKind::ALL.to_vec(),
        }
    }
}

/// Document acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// MediaWiki API endpoint
    pub wikipedia_api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Documents fetched and annotated concurrently
    pub concurrency: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            wikipedia_api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            timeout_secs: 30,
            concurrency: 4,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
