use std::env;

use camino::Utf8PathBuf;
use torrust_tracker_dashboard_configuration::{Configuration, Threshold};
use url::Url;

use crate::random;

/// This configuration is used for testing. It points the dashboard to the
/// tracker API listening on `base_url` and uses a random download directory so
/// tests running at the same time do not write to the same place.
///
/// # Panics
///
/// Will panic if the temporary directory is not a valid UTF-8 path.
#[must_use]
pub fn ephemeral(base_url: &Url) -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `debug` for tests debugging

    config.tracker_api.base_url = base_url.clone();
    config.tracker_api.timeout = 5;

    config.polling.interval = 1;

    let temp_directory = Utf8PathBuf::from_path_buf(env::temp_dir()).expect("the temp dir should be a valid UTF-8 path");
    config.downloads.output_dir = temp_directory.join(format!("dashboard_downloads_{}", random::string(16)));

    config
}
