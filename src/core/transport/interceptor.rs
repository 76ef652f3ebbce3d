//! Request interceptors.
//!
//! Every request the [`Client`](super::Client) sends goes through its
//! interceptors, in the order they were added, right before it's sent. They
//! are the place to add headers (for example authentication) without
//! changing the code that builds the requests.
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::RequestBuilder;

use super::Error;

pub trait Interceptor: Send + Sync {
    fn on_request(&self, request: RequestBuilder) -> RequestBuilder;
}

impl<F> Interceptor for F
where
    F: Fn(RequestBuilder) -> RequestBuilder + Send + Sync,
{
    fn on_request(&self, request: RequestBuilder) -> RequestBuilder {
        self(request)
    }
}

/// Adds a fixed set of headers to every request.
#[derive(Debug, Clone, Default)]
pub struct StaticHeaders {
    headers: HeaderMap,
}

impl StaticHeaders {
    /// # Errors
    ///
    /// Will return an error if a header name or value is not valid.
    pub fn try_from_pairs<'a, I>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut headers = HeaderMap::new();

        for (name, value) in pairs {
            let header_name = HeaderName::try_from(name.as_str()).map_err(|_| Error::InvalidHeader { name: name.clone() })?;
            let header_value = HeaderValue::try_from(value.as_str()).map_err(|_| Error::InvalidHeader { name: name.clone() })?;

            headers.insert(header_name, header_value);
        }

        Ok(Self { headers })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl Interceptor for StaticHeaders {
    fn on_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.headers(self.headers.clone())
    }
}
