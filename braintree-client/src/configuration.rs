//! Gateway configuration and the frozen configuration store.

use crate::{
    Authorization, ClientConfig, ClientError, ConfigField, Result, domain::is_trusted_url,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Gateway-issued configuration.
///
/// Only the URL-bearing fields are typed; feature-specific sections are kept
/// verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub braintree_api: Option<BraintreeApiConfiguration>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GatewayConfiguration {
    /// Every present URL field, tagged with its name.
    fn urls(&self) -> impl Iterator<Item = (ConfigField, &str)> {
        [
            (ConfigField::AssetsUrl, self.assets_url.as_deref()),
            (ConfigField::ClientApiUrl, self.client_api_url.as_deref()),
            (ConfigField::ConfigUrl, self.config_url.as_deref()),
            (
                ConfigField::BraintreeApiUrl,
                self.braintree_api.as_ref().map(|api| api.url.as_str()),
            ),
        ]
        .into_iter()
        .filter_map(|(field, url)| url.map(|url| (field, url)))
    }
}

/// Access details for the braintreeApi surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BraintreeApiConfiguration {
    pub url: String,
    pub access_token: String,
}

/// Metadata attached to every legacy and clientApi request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsMetadata {
    pub sdk_version: String,
    pub merchant_app_id: String,
    pub session_id: String,
    pub platform: String,
    pub source: String,
    pub integration: String,
    pub integration_type: String,
}

impl AnalyticsMetadata {
    /// Generate metadata for a fresh session.
    pub fn generate(config: &ClientConfig) -> Self {
        Self {
            sdk_version: config.sdk_version.clone(),
            merchant_app_id: config.merchant_app_id.clone(),
            session_id: Uuid::new_v4().to_string(),
            platform: config.platform.clone(),
            source: config.source.clone(),
            integration: config.integration.clone(),
            integration_type: config.integration_type.clone(),
        }
    }

    /// Apply caller overrides field by field.
    pub fn merge(mut self, overrides: AnalyticsOverrides) -> Self {
        let AnalyticsOverrides {
            sdk_version,
            merchant_app_id,
            session_id,
            platform,
            source,
            integration,
            integration_type,
        } = overrides;

        if let Some(v) = sdk_version {
            self.sdk_version = v;
        }
        if let Some(v) = merchant_app_id {
            self.merchant_app_id = v;
        }
        if let Some(v) = session_id {
            self.session_id = v;
        }
        if let Some(v) = platform {
            self.platform = v;
        }
        if let Some(v) = source {
            self.source = v;
        }
        if let Some(v) = integration {
            self.integration = v;
        }
        if let Some(v) = integration_type {
            self.integration_type = v;
        }
        self
    }

    /// Render as a JSON object.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Caller-supplied analytics metadata; unset fields keep generated values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverrides {
    pub sdk_version: Option<String>,
    pub merchant_app_id: Option<String>,
    pub session_id: Option<String>,
    pub platform: Option<String>,
    pub source: Option<String>,
    pub integration: Option<String>,
    pub integration_type: Option<String>,
}

/// Input to client construction.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub authorization: String,
    pub analytics_metadata: Option<AnalyticsOverrides>,
    pub gateway_configuration: Option<GatewayConfiguration>,
}

impl ClientOptions {
    /// Create options for an authorization and gateway configuration.
    pub fn new(authorization: impl Into<String>, gateway_configuration: GatewayConfiguration) -> Self {
        Self {
            authorization: authorization.into(),
            analytics_metadata: None,
            gateway_configuration: Some(gateway_configuration),
        }
    }

    /// Override analytics metadata fields.
    pub fn analytics_metadata(mut self, overrides: AnalyticsOverrides) -> Self {
        self.analytics_metadata = Some(overrides);
        self
    }
}

/// Immutable view of everything a client was built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSnapshot {
    pub authorization: String,
    pub analytics_metadata: AnalyticsMetadata,
    pub gateway_configuration: GatewayConfiguration,
}

/// Validated, frozen configuration.
///
/// The snapshot is never handed out by reference; readers get their own copy.
#[derive(Debug, Clone)]
pub struct ConfigurationStore {
    snapshot: Arc<ConfigurationSnapshot>,
    authorization: Arc<Authorization>,
}

impl ConfigurationStore {
    /// Validate `options` and freeze them.
    pub fn new(options: ClientOptions, config: &ClientConfig) -> Result<Self> {
        let ClientOptions {
            authorization,
            analytics_metadata,
            gateway_configuration,
        } = options;

        let gateway_configuration =
            gateway_configuration.ok_or(ClientError::MissingGatewayConfiguration)?;

        for (field, url) in gateway_configuration.urls() {
            if !is_trusted_url(url, config) {
                tracing::warn!(field = %field, url, "Rejecting untrusted gateway URL");
                return Err(ClientError::UntrustedDomain {
                    field,
                    url: url.to_string(),
                });
            }
        }

        let parsed = Authorization::parse(&authorization)?;

        let mut metadata = AnalyticsMetadata::generate(config);
        if let Some(overrides) = analytics_metadata {
            metadata = metadata.merge(overrides);
        }

        Ok(Self {
            snapshot: Arc::new(ConfigurationSnapshot {
                authorization,
                analytics_metadata: metadata,
                gateway_configuration,
            }),
            authorization: Arc::new(parsed),
        })
    }

    /// Get an independent copy of the snapshot.
    pub fn snapshot(&self) -> ConfigurationSnapshot {
        (*self.snapshot).clone()
    }

    pub(crate) fn gateway(&self) -> &GatewayConfiguration {
        &self.snapshot.gateway_configuration
    }

    pub(crate) fn analytics(&self) -> &AnalyticsMetadata {
        &self.snapshot.analytics_metadata
    }

    pub(crate) fn authorization(&self) -> &Authorization {
        &self.authorization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEY: &str = "sandbox_abc123_merchant";

    fn gateway() -> GatewayConfiguration {
        serde_json::from_value(json!({
            "assetsUrl": "https://assets.braintreegateway.com",
            "clientApiUrl": "https://api.sandbox.braintreegateway.com/merchants/m/client_api",
            "configUrl": "https://api.sandbox.braintreegateway.com/merchants/m/client_api/v1/configuration",
            "braintreeApi": {
                "url": "https://payments.sandbox.braintree-api.com",
                "accessToken": "token"
            },
            "paypal": {"clientId": "abc", "nested": {"flag": true}}
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_gateway_configuration() {
        let options = ClientOptions {
            authorization: KEY.into(),
            ..Default::default()
        };
        let err = ConfigurationStore::new(options, &ClientConfig::default()).unwrap_err();
        assert_eq!(err, ClientError::MissingGatewayConfiguration);
    }

    #[test]
    fn test_untrusted_domain_names_field() {
        let cases: [(ConfigField, fn(&mut GatewayConfiguration)); 4] = [
            (ConfigField::AssetsUrl, |g| {
                g.assets_url = Some("https://evil.com".into())
            }),
            (ConfigField::ClientApiUrl, |g| {
                g.client_api_url = Some("https://evil.com".into())
            }),
            (ConfigField::ConfigUrl, |g| {
                g.config_url = Some("https://evil.com".into())
            }),
            (ConfigField::BraintreeApiUrl, |g| {
                if let Some(api) = g.braintree_api.as_mut() {
                    api.url = "https://evil.com".into();
                }
            }),
        ];

        for (expected, mutate) in cases {
            let mut gateway = gateway();
            mutate(&mut gateway);
            let err = ConfigurationStore::new(
                ClientOptions::new(KEY, gateway),
                &ClientConfig::default(),
            )
            .unwrap_err();
            match err {
                ClientError::UntrustedDomain { field, .. } => assert_eq!(field, expected),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_absent_urls_are_not_checked() {
        let store = ConfigurationStore::new(
            ClientOptions::new(KEY, GatewayConfiguration::default()),
            &ClientConfig::default(),
        );
        assert!(store.is_ok());
    }

    #[test]
    fn test_snapshot_preserves_feature_sections() {
        let store =
            ConfigurationStore::new(ClientOptions::new(KEY, gateway()), &ClientConfig::default())
                .unwrap();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.gateway_configuration, gateway());
        assert_eq!(snapshot.gateway_configuration.extra["paypal"]["nested"]["flag"], true);
        assert_eq!(snapshot.authorization, KEY);
    }

    #[test]
    fn test_snapshot_copies_are_independent() {
        let store =
            ConfigurationStore::new(ClientOptions::new(KEY, gateway()), &ClientConfig::default())
                .unwrap();

        let mut first = store.snapshot();
        first.gateway_configuration.client_api_url = Some("https://mutated".into());
        first.analytics_metadata.session_id = "mutated".into();
        first
            .gateway_configuration
            .extra
            .insert("paypal".into(), json!(null));

        let second = store.snapshot();
        assert_eq!(second.gateway_configuration, gateway());
        assert_ne!(second.analytics_metadata.session_id, "mutated");
    }

    #[test]
    fn test_analytics_overrides_win() {
        let options = ClientOptions::new(KEY, gateway()).analytics_metadata(AnalyticsOverrides {
            session_id: Some("session".into()),
            source: Some("dropin".into()),
            ..Default::default()
        });
        let store = ConfigurationStore::new(options, &ClientConfig::default()).unwrap();
        let metadata = store.snapshot().analytics_metadata;
        assert_eq!(metadata.session_id, "session");
        assert_eq!(metadata.source, "dropin");
        assert_eq!(metadata.integration, "custom");
    }

    #[test]
    fn test_invalid_authorization_fails_construction() {
        let err = ConfigurationStore::new(
            ClientOptions::new("garbage", gateway()),
            &ClientConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, ClientError::InvalidAuthorization);
    }
}
