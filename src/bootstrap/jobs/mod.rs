//! Application jobs launchers.
//!
//! The main application setup has only one main stage:
//!
//! 1. Setup the dashboard: load the configuration, set up logging and build
//!    the dashboard state.
//!
//! The polling job is then started from the console commands that need it.
//! Its launcher is in the [`polling`] module.
pub mod polling;
