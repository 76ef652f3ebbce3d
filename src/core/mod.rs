//! The `core` module contains the dashboard logic, independent of how the
//! dashboard is presented.
//!
//! ```text
//! Presentation layer     Domain layer                      Delivery layer
//!
//!                        Polling synchronizer   |
//!     Console        |>  Upload pipeline        |> API  |> Transport client
//!                        Selection fetcher      |
//!                        View composer
//! ```
//!
//! - [`transport`]: the HTTP client used for every request to the tracker.
//!   Every failure goes through a single error hook.
//! - [`api`]: the tracker REST API endpoints used by the dashboard.
//! - [`upload`]: uploads a file and reports its progress.
//! - [`polling`]: keeps the torrent list and the statistics up to date.
//! - [`selection`]: fetches the peers of the selected torrent.
//! - [`view`]: derives what the dashboard shows from its state.
//! - [`download`]: saves the torrent file of a torrent.
//! - [`dashboard`]: wires all of them together.
pub mod api;
pub mod dashboard;
pub mod download;
pub mod polling;
pub mod selection;
pub mod transport;
pub mod upload;
pub mod view;
