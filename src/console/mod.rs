//! Console front end of the dashboard.
pub mod app;
pub mod console;
pub mod logger;
pub mod printer;
pub mod render;
