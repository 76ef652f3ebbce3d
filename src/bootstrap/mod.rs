//! Dashboard bootstrapping.
//!
//! This module includes all the functions to load the configuration, set up
//! logging, build the dashboard and run its jobs.
//!
//! The only job is the polling job, which keeps the torrent list and the
//! tracker statistics in sync with the tracker.
pub mod app;
pub mod config;
pub mod jobs;
pub mod logging;
