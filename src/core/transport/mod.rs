//! HTTP client for the tracker REST API.
//!
//! All the requests the dashboard makes go through a single [`Client`]. It
//! owns the base URL, the default timeout and the request
//! [`interceptors`](interceptor). Every failed request (network error,
//! timeout, non-success status or unexpected body) passes through one
//! error hook which logs it and publishes it on a diagnostics channel before
//! returning it, unchanged, to the caller.
//!
//! ```text
//! caller --> Client::request --> interceptors --> tracker API
//!                  |
//!                  +--> on error: log + diagnostics channel --> caller
//! ```
pub mod error;
pub mod interceptor;

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Method, Response, Url};
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use torrust_tracker_dashboard_configuration::TrackerApi;

pub use self::error::Error;
use self::error::parse_detail;
use self::interceptor::{Interceptor, StaticHeaders};

/// How many failures the diagnostics channel keeps for slow subscribers.
const DIAGNOSTICS_CAPACITY: usize = 64;

/// The body of a request.
pub enum Payload {
    Multipart(Form),
}

/// Per request options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Overrides the client default timeout.
    pub timeout: Option<Duration>,
}

#[derive(Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    interceptors: Vec<Arc<dyn Interceptor>>,
    diagnostics: broadcast::Sender<Error>,
}

impl Client {
    /// # Errors
    ///
    /// Will return an error if the base URL can't have path segments or the
    /// HTTP client can't be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl { base_url });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| Error::ClientBuilding { err: Arc::new(err) })?;

        let (diagnostics, _) = broadcast::channel(DIAGNOSTICS_CAPACITY);

        Ok(Self {
            base_url,
            http,
            interceptors: Vec::new(),
            diagnostics,
        })
    }

    /// Builds a client from the `tracker_api` section of the configuration.
    ///
    /// Configured headers are added to every request.
    ///
    /// # Errors
    ///
    /// Will return an error if the configuration contains an invalid base URL
    /// or header.
    pub fn from_config(config: &TrackerApi) -> Result<Self, Error> {
        let client = Self::new(config.base_url.clone(), config.timeout())?;

        let headers = StaticHeaders::try_from_pairs(&config.headers)?;

        if headers.is_empty() {
            Ok(client)
        } else {
            Ok(client.with_interceptor(headers))
        }
    }

    #[must_use]
    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Subscribes to the failures of all the requests made from now on.
    #[must_use]
    pub fn diagnostics(&self) -> broadcast::Receiver<Error> {
        self.diagnostics.subscribe()
    }

    /// Sends a request to the path built from `segments`, relative to the base
    /// URL. Segments are percent-encoded.
    ///
    /// # Errors
    ///
    /// Will return an error if the request can't be sent, it times out or the
    /// tracker responds with a non-success status.
    pub async fn request(&self, method: Method, segments: &[&str], payload: Option<Payload>, options: Options) -> Result<Response, Error> {
        let result = self.send(method, segments, payload, options).await;
        self.intercept(result)
    }

    /// # Errors
    ///
    /// Will return an error if the request fails or the body is not the
    /// expected JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let response = self.request(Method::GET, segments, None, Options::default()).await?;
        let url = response.url().clone();

        let result = response
            .json::<T>()
            .await
            .map_err(|err| Error::from_reqwest(&Method::GET, &url, err));

        self.intercept(result)
    }

    /// # Errors
    ///
    /// Will return an error if the request fails or the body can't be read.
    pub async fn get_bytes(&self, segments: &[&str]) -> Result<Vec<u8>, Error> {
        let response = self.request(Method::GET, segments, None, Options::default()).await?;
        let url = response.url().clone();

        let result = response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|err| Error::from_reqwest(&Method::GET, &url, err));

        self.intercept(result)
    }

    /// # Errors
    ///
    /// Will return an error if the request fails or the body is not the
    /// expected JSON.
    pub async fn post_multipart<T: DeserializeOwned>(&self, segments: &[&str], form: Form, options: Options) -> Result<T, Error> {
        let response = self.request(Method::POST, segments, Some(Payload::Multipart(form)), options).await?;
        let url = response.url().clone();

        let result = response
            .json::<T>()
            .await
            .map_err(|err| Error::from_reqwest(&Method::POST, &url, err));

        self.intercept(result)
    }

    /// # Errors
    ///
    /// Will return an error if the base URL can't have path segments.
    pub fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl {
                base_url: self.base_url.clone(),
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn send(&self, method: Method, segments: &[&str], payload: Option<Payload>, options: Options) -> Result<Response, Error> {
        let url = self.url(segments)?;

        let mut request = self.http.request(method.clone(), url.clone());

        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        request = match payload {
            Some(Payload::Multipart(form)) => request.multipart(form),
            None => request,
        };

        for interceptor in &self.interceptors {
            request = interceptor.on_request(request);
        }

        tracing::debug!(%method, %url, "sending request");

        let response = request.send().await.map_err(|err| Error::from_reqwest(&method, &url, err))?;

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let detail = match response.text().await {
            Ok(body) => parse_detail(&body),
            Err(_) => None,
        };

        Err(Error::UnsuccessfulResponse {
            method,
            url,
            status,
            detail,
        })
    }

    /// The single error hook. It logs and publishes the failure and returns
    /// the result unchanged.
    fn intercept<T>(&self, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(err) = &result {
            tracing::error!(%err, "tracker API request failed");

            // No subscribers is not an error.
            let _ = self.diagnostics.send(err.clone());
        }

        result
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Url;

    use super::{Client, Error};

    fn client(base_url: &str) -> Client {
        Client::new(Url::parse(base_url).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn it_should_build_request_urls_relative_to_the_base_url() {
        let client = client("http://127.0.0.1:8000/");

        assert_eq!(
            client.url(&["api", "tracker", "torrents"]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/tracker/torrents"
        );
    }

    #[test]
    fn it_should_keep_the_base_url_path_prefix() {
        let client = client("http://tracker.example.com/dashboard/");

        assert_eq!(
            client.url(&["api", "tracker", "stats"]).unwrap().as_str(),
            "http://tracker.example.com/dashboard/api/tracker/stats"
        );
    }

    #[test]
    fn it_should_percent_encode_path_segments() {
        let client = client("http://127.0.0.1:8000");

        assert_eq!(
            client.url(&["api", "tracker", "peers", "a/b c"]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/tracker/peers/a%2Fb%20c"
        );
    }

    #[test]
    fn it_should_reject_base_urls_that_cannot_have_a_path() {
        let result = Client::new(Url::parse("mailto:admin@example.com").unwrap(), Duration::from_secs(5));

        assert!(matches!(result, Err(Error::InvalidBaseUrl { .. })));
    }

    #[tokio::test]
    async fn it_should_publish_failures_on_the_diagnostics_channel() {
        // Nothing listens on port 9 of the loopback interface.
        let client = client("http://127.0.0.1:9/");
        let mut diagnostics = client.diagnostics();

        let result = client.get_bytes(&["api", "tracker", "stats"]).await;

        let published = diagnostics.recv().await.unwrap();

        assert!(result.is_err());
        assert_eq!(published.to_string(), result.unwrap_err().to_string());
    }
}
