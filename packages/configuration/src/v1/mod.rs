//! Version `1` of the dashboard configuration.
pub mod downloads;
pub mod logging;
pub mod polling;
pub mod tracker_api;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::downloads::Downloads;
use self::logging::Logging;
use self::polling::Polling;
use self::tracker_api::TrackerApi;
use crate::{Error, Info, ENV_VAR_PREFIX};

/// Core configuration for the dashboard.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Configuration {
    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,

    /// The tracker REST API the dashboard talks to.
    #[serde(default)]
    pub tracker_api: TrackerApi,

    /// Background refresh of the tracker data.
    #[serde(default)]
    pub polling: Polling,

    /// Where downloaded torrent files are saved.
    #[serde(default)]
    pub downloads: Downloads,
}

impl Configuration {
    /// Loads the configuration from the `Info` struct.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the TOML document or the environment variables
    /// contain an invalid configuration.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            // Config in env var has priority over config file path
            Figment::from(Serialized::defaults(Configuration::default())).merge(Toml::string(config_toml))
        } else {
            Figment::from(Serialized::defaults(Configuration::default())).merge(Toml::file(&info.config_toml_path))
        };

        let figment = figment.merge(Env::prefixed(ENV_VAR_PREFIX).split("__"));

        let config: Configuration = figment.extract()?;

        config.validate()?;

        Ok(config)
    }

    /// Checks the options whose values can't be expressed by their types.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the polling interval or the API timeout are zero,
    /// or if the tracker base URL can't have paths joined to it.
    pub fn validate(&self) -> Result<(), Error> {
        if self.polling.interval == 0 {
            return Err(Error::InvalidOption {
                option: "polling.interval",
                reason: "it must be greater than zero".to_string(),
            });
        }

        if self.tracker_api.timeout == 0 {
            return Err(Error::InvalidOption {
                option: "tracker_api.timeout",
                reason: "it must be greater than zero".to_string(),
            });
        }

        if self.tracker_api.base_url.cannot_be_a_base() {
            return Err(Error::InvalidOption {
                option: "tracker_api.base_url",
                reason: format!("`{}` can't be used as a base URL", self.tracker_api.base_url),
            });
        }

        Ok(())
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Panics
    ///
    /// Will panic if it can't be converted to TOML.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string(self).expect("Could not encode TOML value")
    }
}
