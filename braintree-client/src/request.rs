//! Request descriptors and resolved calls.

use crate::{ClientError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Backend API surface a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Api {
    /// The versioned client API (`<clientApiUrl>/v1/...`).
    ClientApi,
    /// The bearer-token Braintree API (`<braintreeApi.url>/...`).
    BraintreeApi,
}

impl Api {
    /// Get the option value naming this surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientApi => "clientApi",
            Self::BraintreeApi => "braintreeApi",
        }
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Api {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "clientApi" => Ok(Self::ClientApi),
            "braintreeApi" => Ok(Self::BraintreeApi),
            other => Err(other.to_string()),
        }
    }
}

/// A logical request, before routing.
///
/// Fields are loose on purpose; [`crate::Client::request`] validates them and
/// reports problems through the outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDescriptor {
    pub method: Option<String>,
    pub endpoint: Option<String>,
    /// Surface name; `None` selects the legacy gateway surface.
    pub api: Option<String>,
    pub data: Option<Value>,
    pub headers: Option<HashMap<String, String>>,
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// Create a descriptor for `method` and `endpoint`.
    pub fn new(method: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            endpoint: Some(endpoint.into()),
            ..Default::default()
        }
    }

    /// Create a GET descriptor.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new("get", endpoint)
    }

    /// Create a POST descriptor.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new("post", endpoint)
    }

    /// Target a named surface.
    pub fn api(mut self, api: impl Into<String>) -> Self {
        self.api = Some(api.into());
        self
    }

    /// Target the braintreeApi surface.
    pub fn braintree_api(self) -> Self {
        self.api(Api::BraintreeApi.as_str())
    }

    /// Target the clientApi surface.
    pub fn client_api(self) -> Self {
        self.api(Api::ClientApi.as_str())
    }

    /// Set the request payload.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Add a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set the transport timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl RequestDescriptor {
    /// Check mandatory options and parse the surface name.
    ///
    /// Empty `method`/`endpoint` count as missing; an empty `api` is invalid
    /// rather than unset.
    pub fn validate(self) -> Result<ValidatedRequest> {
        let method = self
            .method
            .filter(|m| !m.is_empty())
            .ok_or(ClientError::OptionRequired { option: "method" })?;
        let endpoint = self
            .endpoint
            .filter(|e| !e.is_empty())
            .ok_or(ClientError::OptionRequired { option: "endpoint" })?;
        let api = self
            .api
            .map(|api| {
                api.parse::<Api>()
                    .map_err(|value| ClientError::OptionInvalid { option: "api", value })
            })
            .transpose()?;

        Ok(ValidatedRequest {
            method,
            endpoint,
            api,
            data: self.data,
            headers: self.headers,
            timeout: self.timeout,
        })
    }
}

/// Descriptor whose mandatory options have been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub method: String,
    pub endpoint: String,
    pub api: Option<Api>,
    pub data: Option<Value>,
    pub headers: Option<HashMap<String, String>>,
    pub timeout: Option<Duration>,
}

/// Fully routed request handed to a [`crate::Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall {
    pub url: String,
    pub method: String,
    pub data: Value,
    pub headers: Option<HashMap<String, String>>,
    pub timeout: Option<Duration>,
}

impl ResolvedCall {
    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }
}
