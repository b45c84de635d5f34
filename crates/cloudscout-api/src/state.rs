//! # Application State & Configuration
//!
//! [`AppState`] is the shared, read-only context handed to request
//! handlers: the stat catalog and the compiled player validators. It is
//! built once at startup from [`AppConfig`] and cloned cheaply per request.
//!
//! ## Environment
//!
//! | Variable                   | Meaning                              | Default  |
//! |----------------------------|--------------------------------------|----------|
//! | `CLOUDSCOUT_STATS_CATALOG` | path to a stat catalog YAML file     | built-in |
//! | `CLOUDSCOUT_LOG_FORMAT`    | `plain` or `json`                    | `plain`  |
//! | `RUST_LOG`                 | `tracing` env filter                 | `info`   |

use std::path::PathBuf;
use std::sync::Arc;

use cloudscout_core::{CatalogError, StatCatalog};
use cloudscout_schema::{PlayerValidator, SchemaValidationError};
use thiserror::Error;

use crate::telemetry::{LogFormat, UnknownLogFormat};

/// Environment variable naming the stat catalog file.
pub const STATS_CATALOG_ENV: &str = "CLOUDSCOUT_STATS_CATALOG";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "CLOUDSCOUT_LOG_FORMAT";

/// Errors raised while building the application state.
#[derive(Error, Debug)]
pub enum StateError {
    /// The stat catalog could not be loaded.
    #[error("stat catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// A composed schema could not be compiled.
    #[error("schema: {0}")]
    Schema(#[from] SchemaValidationError),

    /// A configuration value could not be parsed.
    #[error("config: {0}")]
    Config(#[from] UnknownLogFormat),
}

/// Startup configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Stat catalog file; the built-in catalog is used when absent.
    pub stats_catalog: Option<PathBuf>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, StateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StateError> {
        let stats_catalog = lookup(STATS_CATALOG_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(value) if !value.is_empty() => value.parse()?,
            _ => LogFormat::default(),
        };
        Ok(Self {
            stats_catalog,
            log_format,
        })
    }

    /// Load the configured stat catalog.
    pub fn load_catalog(&self) -> Result<StatCatalog, CatalogError> {
        match &self.stats_catalog {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading stat catalog");
                StatCatalog::from_path(path)
            }
            None => Ok(StatCatalog::builtin()),
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    validator: Arc<PlayerValidator>,
}

impl AppState {
    /// Compile validators for `catalog`.
    pub fn new(catalog: StatCatalog) -> Result<Self, StateError> {
        let validator = PlayerValidator::new(catalog)?;
        Ok(Self {
            validator: Arc::new(validator),
        })
    }

    /// Load the configured catalog and compile validators for it.
    pub fn from_config(config: &AppConfig) -> Result<Self, StateError> {
        Self::new(config.load_catalog()?)
    }

    /// The compiled player validators.
    pub fn validator(&self) -> &PlayerValidator {
        &self.validator
    }

    /// The stat catalog in effect.
    pub fn catalog(&self) -> &StatCatalog {
        self.validator.catalog()
    }
}
