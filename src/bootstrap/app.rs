//! Setup for the main dashboard application.
//!
//! The [`setup`] only builds the application and its dependencies but it does
//! not start the polling job.
//!
//! Setup steps:
//!
//! 1. Load the global application configuration.
//! 2. Initialize static variables.
//! 3. Initialize logging.
//! 4. Initialize the tracker API client and the dashboard state.
use std::sync::Arc;

use anyhow::{Context, Result};
use torrust_tracker_dashboard_clock::static_time;
use torrust_tracker_dashboard_configuration::Configuration;

use super::config::initialize_configuration;
use crate::bootstrap;
use crate::core::dashboard::Dashboard;
use crate::core::transport::{self, Client};

/// It loads the configuration from the environment and builds the main
/// dashboard [`Dashboard`] struct.
///
/// # Errors
///
/// Will return an error if the configuration can't be loaded or the tracker
/// API client can't be built.
pub fn setup(config_path: Option<&str>) -> Result<(Configuration, Arc<Dashboard<Client>>)> {
    let configuration = initialize_configuration(config_path).context("failed to load the configuration")?;

    let dashboard = initialize_with_configuration(&configuration).context("failed to build the tracker API client")?;

    Ok((configuration, dashboard))
}

/// It initializes the application with the given configuration.
///
/// # Errors
///
/// Will return an error if the tracker API client can't be built.
pub fn initialize_with_configuration(configuration: &Configuration) -> Result<Arc<Dashboard<Client>>, transport::Error> {
    initialize_static();
    initialize_logging(configuration);
    Ok(Arc::new(initialize_dashboard(configuration)?))
}

/// It initializes the application static values.
///
/// These values are accessible throughout the entire application:
///
/// - The time when the application started.
pub fn initialize_static() {
    // Set the time of the dashboard starting
    lazy_static::initialize(&static_time::TIME_AT_APP_START);
}

/// It builds the dashboard on top of a client for the configured tracker API.
///
/// # Errors
///
/// Will return an error if the tracker API client can't be built.
pub fn initialize_dashboard(configuration: &Configuration) -> Result<Dashboard<Client>, transport::Error> {
    let client = Client::from_config(&configuration.tracker_api)?;

    tracing::info!(base_url = %client.base_url(), "tracker API client ready");

    Ok(Dashboard::new(Arc::new(client)))
}

/// It initializes the log threshold, format and channel.
///
/// See [the logging setup](crate::bootstrap::logging::setup) for more info about logging.
pub fn initialize_logging(config: &Configuration) {
    bootstrap::logging::setup(&config.logging);
}
