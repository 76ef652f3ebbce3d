//! Configuration data structures for the [Torrust Tracker Dashboard](https://docs.rs/torrust-tracker-dashboard).
//!
//! The configuration is loaded with [figment](https://docs.rs/figment) from
//! three layers, each one overriding the previous one:
//!
//! 1. The default values.
//! 2. A TOML document. Either the whole content in the
//!    `TORRUST_DASHBOARD_CONFIG_TOML` environment variable or a file whose path
//!    is in `TORRUST_DASHBOARD_CONFIG_TOML_PATH` (or the default path).
//! 3. Environment variables prefixed with `TORRUST_DASHBOARD_`. Nested
//!    options are separated with a double underscore, for example
//!    `TORRUST_DASHBOARD_TRACKER_API__TIMEOUT=5`.
//!
//! A complete configuration with the default values:
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [tracker_api]
//! base_url = "http://127.0.0.1:8000/"
//! timeout = 30
//!
//! [tracker_api.headers]
//!
//! [polling]
//! interval = 10
//!
//! [downloads]
//! output_dir = "./storage/dashboard/downloads"
//! ```
//!
//! `[tracker_api.headers]` is a table of static headers added to every request
//! sent to the tracker, for example an `Authorization` header when the tracker
//! sits behind a proxy that requires one.
pub mod v1;

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default timeout for the requests to the tracker API.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default time between two refreshes of the torrent list and the statistics.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(10);

/// The prefix of the environment variables that override single options.
pub const ENV_VAR_PREFIX: &str = "TORRUST_DASHBOARD_";

// Environment variables

/// The whole `dashboard.toml` file content. It has priority over the config file.
/// Even if the file is not on the default path.
const ENV_VAR_CONFIG_TOML: &str = "TORRUST_DASHBOARD_CONFIG_TOML";

/// The `dashboard.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "TORRUST_DASHBOARD_CONFIG_TOML_PATH";

pub type Configuration = v1::Configuration;
pub type Logging = v1::logging::Logging;
pub type Threshold = v1::logging::Threshold;
pub type TrackerApi = v1::tracker_api::TrackerApi;
pub type Polling = v1::polling::Polling;
pub type Downloads = v1::downloads::Downloads;

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build Configuration Info
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            eprintln!("Loading extra configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Ok(config_toml_path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            eprintln!("Loading extra configuration from file: `{config_toml_path}` ...");
            config_toml_path
        } else {
            eprintln!("Loading extra configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }

    /// Builds the info from an in-memory TOML document.
    #[must_use]
    pub fn from_toml(config_toml: &str) -> Self {
        Self {
            config_toml: Some(config_toml.to_owned()),
            config_toml_path: String::new(),
        }
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Unable to load or deserialize the configuration.
    #[error("Failed processing the configuration: {source}")]
    ConfigError { source: Box<figment::Error> },

    #[error("Invalid configuration option `{option}`: {reason}")]
    InvalidOption { option: &'static str, reason: String },
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigError { source: Box::new(err) }
    }
}
