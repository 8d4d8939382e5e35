//! Configuration loading
//!
//! Sources are layered in this order, later ones winning:
//! 1. Built-in defaults
//! 2. An optional configuration file (any format the `config` crate reads)
//! 3. Environment variables prefixed with `SIFT`, nested with `__`
//!    (e.g. `SIFT__CLIENT__RETRIES=3`, `SIFT__PAGINATION__DEFAULT_SIZE=25`)
//!
//! A `.env` file in the working directory is loaded before the environment
//! is read.

use crate::engine::{DEFAULT_PAGE_NAME, DEFAULT_PAGE_SIZE};
use crate::Result;
use serde::{Deserialize, Serialize};
use sift_client::ClientConfig;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    pub client: ClientConfig,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used by `paginate()`.
    pub default_size: u32,
    /// Query parameter carrying the page number.
    pub page_name: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            page_name: DEFAULT_PAGE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for the sift crates when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// One of `daily`, `hourly`, `minutely`, `never`.
    pub file_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "./logs".to_string(),
            file_prefix: "sift".to_string(),
            file_rotation: "daily".to_string(),
        }
    }
}

impl SiftConfig {
    /// Load configuration from defaults, `path` (if given) and the environment.
    ///
    /// # Errors
    /// Returns `Error::Config` if the file cannot be read or a value does not
    /// deserialize into its field.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("SIFT")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("client.hosts")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
