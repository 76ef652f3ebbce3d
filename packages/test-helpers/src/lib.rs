//! Testing helpers for [Torrust Tracker Dashboard](https://docs.rs/torrust-tracker-dashboard).
//!
//! A collection of functions and types to help with testing the dashboard.
pub mod configuration;
pub mod random;
