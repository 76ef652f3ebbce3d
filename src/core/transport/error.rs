use std::sync::Arc;

use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the tracker API client.
///
/// They are `Clone` so the same error can be returned to the caller and
/// published on the client diagnostics channel.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Failed to build the HTTP client: {err}")]
    ClientBuilding { err: Arc<reqwest::Error> },

    #[error("`{base_url}` can't be used as the base URL of the tracker API")]
    InvalidBaseUrl { base_url: Url },

    #[error("Invalid header `{name}` in the tracker API configuration")]
    InvalidHeader { name: String },

    #[error("{method} {url} timed out")]
    Timeout { method: Method, url: Url },

    #[error("{method} {url} failed: {err}")]
    Network {
        method: Method,
        url: Url,
        err: Arc<reqwest::Error>,
    },

    #[error("{method} {url} returned a non-success code: \"{status}\"")]
    UnsuccessfulResponse {
        method: Method,
        url: Url,
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("{method} {url} returned an unexpected body: {err}")]
    InvalidBody {
        method: Method,
        url: Url,
        err: Arc<reqwest::Error>,
    },
}

impl Error {
    /// Classifies an error returned by `reqwest` while sending a request or
    /// reading its response body.
    #[must_use]
    pub fn from_reqwest(method: &Method, url: &Url, err: reqwest::Error) -> Self {
        let method = method.clone();
        let url = url.clone();

        if err.is_timeout() {
            Self::Timeout { method, url }
        } else if err.is_decode() {
            Self::InvalidBody {
                method,
                url,
                err: Arc::new(err),
            }
        } else {
            Self::Network {
                method,
                url,
                err: Arc::new(err),
            }
        }
    }

    /// The message the tracker attached to a non-success response, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::UnsuccessfulResponse { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnsuccessfulResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The error body returned by the tracker: `{ "detail": ... }`.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Extracts the `detail` message from a tracker error body.
///
/// The tracker usually sends a string, but validation errors come as a
/// structured value. Those are kept as their JSON text.
#[must_use]
pub fn parse_detail(body: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(body).ok()?;

    match body.detail? {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) => Some(detail),
        detail => Some(detail.to_string()),
    }
}
