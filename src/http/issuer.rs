use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use tokio::time::Instant;
use tracing::debug;

use crate::args::DEFAULT_USER_AGENT;
use crate::config::RunConfig;
use crate::error::{AppError, AppResult, HttpError};
use crate::metrics::RequestOutcome;

/// Response header the proxy uses to report cache status.
pub const CACHE_HEADER: &str = "X-Cache";
/// Exact (case-sensitive) header value that marks a cache hit.
pub const CACHE_HIT_VALUE: &str = "HIT";

/// Issues one request for an endpoint path and reports its outcome.
///
/// Implementations never fail: transport problems are folded into the
/// returned [`RequestOutcome`].
#[async_trait]
pub trait RequestIssuer: Send + Sync {
    async fn issue(&self, endpoint: &str) -> RequestOutcome;
}

/// reqwest-backed issuer bound to one base URL.
#[derive(Debug, Clone)]
pub struct HttpIssuer {
    client: Client,
    base_url: String,
}

impl HttpIssuer {
    /// Builds an issuer from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when a configured header is invalid or the client
    /// cannot be built.
    pub fn from_config(config: &RunConfig) -> AppResult<Self> {
        Self::new(&config.base_url, config.timeout, &config.headers)
    }

    /// Builds an issuer that sends `headers` on every request and bounds each
    /// request by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when a header is invalid or the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration, headers: &[(String, String)]) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(build_header_map(headers)?)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self {
            client,
            base_url: base_url.to_owned(),
        })
    }

    /// Sends a GET for `endpoint` with optional per-request headers.
    pub async fn send(&self, endpoint: &str, extra_headers: Option<HeaderMap>) -> RequestOutcome {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.client.get(&url);
        if let Some(headers) = extra_headers {
            request = request.headers(headers);
        }

        let start = Instant::now();
        match request.send().await {
            Ok(response) => {
                let elapsed = start.elapsed();
                let cache_hit = is_cache_hit(response.headers());
                RequestOutcome::response(response.status().as_u16(), elapsed, cache_hit)
            }
            Err(err) => {
                let elapsed = start.elapsed();
                debug!("Request to {} failed after {:?}: {}", url, elapsed, err);
                RequestOutcome::failure(elapsed, err.to_string())
            }
        }
    }
}

#[async_trait]
impl RequestIssuer for HttpIssuer {
    async fn issue(&self, endpoint: &str) -> RequestOutcome {
        self.send(endpoint, None).await
    }
}

/// True only for an `X-Cache` value of exactly `HIT`.
pub(crate) fn is_cache_hit(headers: &HeaderMap) -> bool {
    headers
        .get(CACHE_HEADER)
        .is_some_and(|value| value.as_bytes() == CACHE_HIT_VALUE.as_bytes())
}

pub(crate) fn build_header_map(headers: &[(String, String)]) -> AppResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            AppError::http(HttpError::InvalidHeaderName {
                header: name.clone(),
                source: err,
            })
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|err| {
            AppError::http(HttpError::InvalidHeaderValue {
                header: name.clone(),
                source: err,
            })
        })?;
        map.append(header_name, header_value);
    }
    Ok(map)
}
