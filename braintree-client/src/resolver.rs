//! Routing of validated requests onto a backend surface.

use crate::{
    Api, ClientError, ConfigurationStore, LIBRARY_VERSION, ResolvedCall, Result, ValidatedRequest,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Protocol version sent to the braintreeApi surface.
pub const BRAINTREE_API_VERSION: &str = "2016-10-07";

/// Resolves requests against a configuration store.
#[derive(Debug, Clone, Copy)]
pub struct UrlResolver<'a> {
    store: &'a ConfigurationStore,
}

impl<'a> UrlResolver<'a> {
    /// Create a resolver over `store`.
    pub fn new(store: &'a ConfigurationStore) -> Self {
        Self { store }
    }

    /// Build the call for `request`.
    ///
    /// Each call gets fresh `data` and headers; nothing is cached.
    pub fn resolve(&self, request: ValidatedRequest) -> Result<ResolvedCall> {
        match request.api {
            None | Some(Api::ClientApi) => self.resolve_client_api(request),
            Some(Api::BraintreeApi) => self.resolve_braintree_api(request),
        }
    }

    fn resolve_client_api(&self, request: ValidatedRequest) -> Result<ResolvedCall> {
        let base = self
            .store
            .gateway()
            .client_api_url
            .as_deref()
            .ok_or(ClientError::ApiUrlUnavailable)?;

        Ok(ResolvedCall {
            url: join(base, &format!("v1/{}", request.endpoint.trim_start_matches('/'))),
            method: request.method,
            data: self.add_metadata(request.data)?,
            headers: request.headers,
            timeout: request.timeout,
        })
    }

    fn resolve_braintree_api(&self, request: ValidatedRequest) -> Result<ResolvedCall> {
        let api = self
            .store
            .gateway()
            .braintree_api
            .as_ref()
            .ok_or(ClientError::BraintreeApiAccessRestricted)?;

        let mut headers = request.headers.unwrap_or_default();
        headers.retain(|name, _| {
            !name.eq_ignore_ascii_case("Braintree-Version")
                && !name.eq_ignore_ascii_case("Authorization")
        });
        headers.extend(braintree_api_headers(&api.access_token));

        Ok(ResolvedCall {
            url: join(&api.url, request.endpoint.trim_start_matches('/')),
            method: request.method,
            data: request.data.unwrap_or(Value::Null),
            headers: Some(headers),
            timeout: request.timeout,
        })
    }

    /// Merge the library version, `_meta` and credentials into `data`.
    ///
    /// Caller `_meta` keys override the generated analytics metadata. A
    /// `_meta` that is not an object is rejected along with the request.
    fn add_metadata(&self, data: Option<Value>) -> Result<Value> {
        let mut attrs = match data {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(ClientError::OptionInvalid {
                    option: "data",
                    value: other.to_string(),
                });
            }
        };

        let mut meta = self.store.analytics().to_map();
        match attrs.remove("_meta") {
            None | Some(Value::Null) => {}
            Some(Value::Object(caller_meta)) => meta.extend(caller_meta),
            Some(other) => {
                return Err(ClientError::OptionInvalid {
                    option: "data",
                    value: format!("_meta: {other}"),
                });
            }
        }

        attrs.insert("braintreeLibraryVersion".into(), Value::from(LIBRARY_VERSION));
        attrs.insert("_meta".into(), Value::Object(meta));
        attrs.extend(self.store.authorization().attrs());

        Ok(Value::Object(attrs))
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// Headers every braintreeApi call carries.
pub fn braintree_api_headers(access_token: &str) -> HashMap<String, String> {
    HashMap::from([
        ("Braintree-Version".to_string(), BRAINTREE_API_VERSION.to_string()),
        ("Authorization".to_string(), format!("Bearer {access_token}")),
    ])
}
