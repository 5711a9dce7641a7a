//! reqwest-backed transport.

use crate::{HttpTransportConfig, HttpTransportError, Result, query::queryify};
use async_trait::async_trait;
use braintree_client::{ResolvedCall, Transport, TransportOutcome};
use http::{HeaderName, HeaderValue, Method};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};

/// Status reported when a call failed before any HTTP status was received.
pub const NO_STATUS: i32 = 0;

/// HTTP transport built on reqwest.
#[derive(Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    config: Arc<HttpTransportConfig>,
}

impl HttpTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: HttpTransportConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.gzip)
            .build()?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Create a new transport with default configuration.
    pub fn default_transport() -> Result<Self> {
        Self::new(HttpTransportConfig::default())
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// Translate a resolved call into a reqwest request.
    ///
    /// GET and DELETE carry `data` in the query string; every other method
    /// sends it as a JSON body. Null data sends no body at all.
    pub fn build_request(&self, call: &ResolvedCall) -> Result<reqwest::Request> {
        let method = Method::from_bytes(call.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| HttpTransportError::InvalidMethod(call.method.clone()))?;
        let mut url = url::Url::parse(&call.url)?;

        let sends_query = method == Method::GET || method == Method::DELETE;
        if sends_query {
            let pairs = queryify(&call.data);
            if !pairs.is_empty() {
                let mut query_pairs = url.query_pairs_mut();
                for (key, value) in &pairs {
                    query_pairs.append_pair(key, value);
                }
            }
        }

        let mut request = self
            .inner
            .request(method, url)
            .timeout(call.timeout.unwrap_or(self.config.timeout));

        if !sends_query && !call.data.is_null() {
            let body = serde_json::to_vec(&call.data)?;
            request = request
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        if let Some(headers) = &call.headers {
            for (name, value) in headers {
                let name = HeaderName::try_from(name.as_str())
                    .map_err(|_| HttpTransportError::InvalidHeader(name.clone()))?;
                let value = HeaderValue::try_from(value.as_str())
                    .map_err(|_| HttpTransportError::InvalidHeader(name.to_string()))?;
                request = request.header(name, value);
            }
        }

        Ok(request.build()?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, call: ResolvedCall) -> TransportOutcome {
        let request = match self.build_request(&call) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, url = %call.url, "Failed to build request");
                return TransportOutcome::failure(Value::from(e.to_string()), NO_STATUS);
            }
        };

        debug!(method = %request.method(), url = %request.url(), "Sending HTTP request");

        let response = match self.inner.execute(request).await {
            Ok(response) => response,
            Err(e) => return outcome_for_error(&e),
        };

        let status = i32::from(response.status().as_u16());
        let success = response.status().is_success();
        trace!(status, "Received HTTP response");

        let body = match response.bytes().await {
            Ok(bytes) => parse_body(&bytes),
            Err(e) => return outcome_for_error(&e),
        };

        if success {
            TransportOutcome::success(body, status)
        } else {
            TransportOutcome::failure(body, status)
        }
    }
}

fn outcome_for_error(error: &reqwest::Error) -> TransportOutcome {
    if error.is_timeout() {
        debug!("HTTP request timed out");
        return TransportOutcome::timeout();
    }

    debug!(error = %error, "HTTP request failed");
    let status = error
        .status()
        .map(|s| i32::from(s.as_u16()))
        .unwrap_or(NO_STATUS);
    TransportOutcome::failure(Value::from(error.to_string()), status)
}

/// Parse a response body as JSON, falling back to the raw text.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
