pub mod logging;
pub mod tracker;
