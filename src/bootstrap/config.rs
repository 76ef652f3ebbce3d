//! Initialize configuration from file or env var.
//!
//! All environment variables are prefixed with `TORRUST_DASHBOARD_`.
use torrust_tracker_dashboard_configuration::{Configuration, Error, Info};

// Default values
pub const DEFAULT_PATH_CONFIG: &str = "./share/default/config/dashboard.development.toml";

/// It loads the application configuration from the environment.
///
/// There are two methods to inject the configuration:
///
/// 1. By using a config file: `dashboard.toml`. The path can be changed with
///    the `TORRUST_DASHBOARD_CONFIG_TOML_PATH` env var.
/// 2. Environment variable: `TORRUST_DASHBOARD_CONFIG_TOML`. The variable
///    contains the same contents as the `dashboard.toml` file.
///
/// Environment variable has priority over the config file. Single options
/// can be overridden with `TORRUST_DASHBOARD_<SECTION>__<OPTION>` env vars.
///
/// Refer to the [configuration documentation](https://docs.rs/torrust-tracker-dashboard-configuration)
/// for the configuration options.
///
/// # Errors
///
/// Will return an error if the configuration can't be loaded or it's not
/// valid.
pub fn initialize_configuration(default_path: Option<&str>) -> Result<Configuration, Error> {
    let info = Info::new(default_path.unwrap_or(DEFAULT_PATH_CONFIG).to_string())?;

    Configuration::load(&info)
}
