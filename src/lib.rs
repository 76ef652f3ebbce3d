//! **Torrust Tracker Dashboard** is a console dashboard for the REST API of a
//! [Torrust Tracker](https://github.com/torrust/torrust-tracker).
//!
//! It lets you:
//!
//! - Upload a file to the tracker to create a new torrent, following the
//!   progress of the upload.
//! - List the torrents the tracker knows about.
//! - Inspect the peers of a torrent.
//! - Follow the tracker statistics.
//! - Download the torrent file of a torrent.
//!
//! # Table of contents
//!
//! - [Usage](#usage)
//! - [Configuration](#configuration)
//! - [Components](#components)
//!
//! # Usage
//!
//! ```text
//! cargo run -- watch
//! ```
//!
//! See the [console app](crate::console::app) for the other commands.
//!
//! # Configuration
//!
//! The dashboard loads its configuration from a TOML file. By default it's:
//!
//! ```text
//! ./share/default/config/dashboard.development.toml
//! ```
//!
//! Any value can be overridden with an environment variable prefixed with
//! `TORRUST_DASHBOARD_`, using `__` as the section separator:
//!
//! ```text
//! TORRUST_DASHBOARD_TRACKER_API__BASE_URL="http://tracker.example.com/" cargo run -- stats
//! ```
//!
//! Refer to the [`torrust-tracker-dashboard-configuration`](torrust_tracker_dashboard_configuration)
//! package for all the options.
//!
//! # Components
//!
//! The dashboard logic lives in the [`core`] module. The [`bootstrap`] module
//! builds it from the configuration and the [`console`] module presents it.
pub mod bootstrap;
pub mod console;
pub mod core;
pub mod signals;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = torrust_tracker_dashboard_clock::clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = torrust_tracker_dashboard_clock::clock::Stopped;
