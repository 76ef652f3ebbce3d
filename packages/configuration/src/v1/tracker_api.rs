use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

pub type Headers = BTreeMap<String, String>;

/// Connection to the tracker REST API.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct TrackerApi {
    /// The base URL every API path is joined to. For example:
    /// `http://127.0.0.1:8000/`.
    #[serde(default = "TrackerApi::default_base_url")]
    pub base_url: Url,

    /// Seconds to wait for a request to complete, including the upload of
    /// the file body. Requests exceeding it fail with a timeout error.
    #[serde(default = "TrackerApi::default_timeout")]
    pub timeout: u64,

    /// Static headers added to every request.
    #[serde(default)]
    pub headers: Headers,
}

impl Default for TrackerApi {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: Self::default_timeout(),
            headers: Headers::default(),
        }
    }
}

impl TrackerApi {
    fn default_base_url() -> Url {
        Url::parse("http://127.0.0.1:8000/").expect("the default base url should be valid")
    }

    fn default_timeout() -> u64 {
        crate::DEFAULT_TIMEOUT.as_secs()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
