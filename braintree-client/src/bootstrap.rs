//! Fetching the gateway configuration for an authorization.

use crate::{
    AnalyticsMetadata, AnalyticsOverrides, Authorization, Client, ClientConfig, ClientError,
    ClientOptions, ConfigField, GatewayConfiguration, LIBRARY_VERSION, ResolvedCall, Result,
    Transport, TransportOutcome, domain::is_trusted_url,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration schema version requested from the gateway.
pub const CONFIG_VERSION: &str = "3";

impl Client {
    /// Fetch the gateway configuration for `authorization` and build a client.
    ///
    /// The fetch goes through `transport`, the same transport later requests
    /// use.
    pub async fn create(
        authorization: &str,
        transport: Arc<dyn Transport>,
        config: ClientConfig,
    ) -> Result<Self> {
        let parsed = Authorization::parse(authorization)?;
        let config_url = parsed.config_url();

        if !is_trusted_url(&config_url, &config) {
            warn!(url = %config_url, "Refusing to fetch configuration from untrusted URL");
            return Err(ClientError::UntrustedDomain {
                field: ConfigField::ConfigUrl,
                url: config_url,
            });
        }

        let metadata = AnalyticsMetadata::generate(&config);
        let mut data = parsed.attrs();
        data.insert("configVersion".into(), Value::from(CONFIG_VERSION));
        data.insert("braintreeLibraryVersion".into(), Value::from(LIBRARY_VERSION));
        data.insert("_meta".into(), Value::Object(metadata.to_map()));

        debug!(url = %config_url, "Fetching gateway configuration");

        let TransportOutcome { error, body, .. } = transport
            .perform(ResolvedCall {
                url: config_url,
                method: "GET".into(),
                data: Value::Object(data),
                headers: None,
                timeout: None,
            })
            .await;

        if let Some(original) = error {
            warn!(error = %original, "Gateway configuration fetch failed");
            return Err(ClientError::GatewayNetwork { original });
        }

        let gateway_configuration: GatewayConfiguration =
            serde_json::from_value(body.unwrap_or(Value::Null))
                .map_err(|e| ClientError::MalformedConfiguration(e.to_string()))?;

        let options = ClientOptions {
            authorization: authorization.to_string(),
            analytics_metadata: Some(AnalyticsOverrides {
                session_id: Some(metadata.session_id),
                ..Default::default()
            }),
            gateway_configuration: Some(gateway_configuration),
        };

        Self::with_config(options, transport, &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorCode, RequestDescriptor, testing::MockTransport};
    use serde_json::json;

    const KEY: &str = "sandbox_abc_merchant";

    fn configuration() -> Value {
        json!({
            "clientApiUrl": "https://api.sandbox.braintreegateway.com:443/merchants/merchant/client_api",
            "assetsUrl": "https://assets.braintreegateway.com",
            "configUrl": "https://api.sandbox.braintreegateway.com:443/merchants/merchant/client_api/v1/configuration",
            "creditCards": {"supportedCardTypes": ["Visa"]}
        })
    }

    #[tokio::test]
    async fn test_create_fetches_configuration() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(configuration(), 200);

        let client = Client::create(KEY, transport.clone(), ClientConfig::default())
            .await
            .unwrap();

        let fetch = transport.last_call().unwrap();
        assert_eq!(
            fetch.url,
            "https://api.sandbox.braintreegateway.com:443/merchants/merchant/client_api/v1/configuration"
        );
        assert_eq!(fetch.method, "GET");
        assert_eq!(fetch.data["configVersion"], "3");
        assert_eq!(fetch.data["tokenizationKey"], KEY);

        let snapshot = client.get_configuration();
        assert_eq!(snapshot.authorization, KEY);
        assert_eq!(
            snapshot.gateway_configuration.extra["creditCards"]["supportedCardTypes"][0],
            "Visa"
        );
        assert_eq!(
            snapshot.analytics_metadata.session_id,
            fetch.data["_meta"]["sessionId"]
        );
    }

    #[tokio::test]
    async fn test_created_client_routes_requests() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(configuration(), 200);

        let client = Client::create(KEY, transport.clone(), ClientConfig::default())
            .await
            .unwrap();
        client.request(RequestDescriptor::get("payment_methods")).await;

        assert_eq!(
            transport.last_call().unwrap().url,
            "https://api.sandbox.braintreegateway.com:443/merchants/merchant/client_api/v1/payment_methods"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_is_gateway_network() {
        let transport = Arc::new(MockTransport::new());
        transport.fail(json!({"error": "down"}), 503);

        let err = Client::create(KEY, transport, ClientConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::GatewayNetwork);
        assert_eq!(err.details(), Some(&json!({"error": "down"})));
    }

    #[tokio::test]
    async fn test_malformed_configuration() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(json!("not an object"), 200);

        let err = Client::create(KEY, transport, ClientConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::GatewayConfigurationMalformed);
    }

    #[tokio::test]
    async fn test_untrusted_config_url_is_never_fetched() {
        use base64::{Engine, engine::general_purpose::STANDARD};

        let token = STANDARD.encode(
            json!({
                "authorizationFingerprint": "fp",
                "configUrl": "https://evil.example.com/configuration"
            })
            .to_string(),
        );
        let transport = Arc::new(MockTransport::new());

        let err = Client::create(&token, transport.clone(), ClientConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::UntrustedDomain {
                field: ConfigField::ConfigUrl,
                ..
            }
        ));
        assert!(transport.calls().is_empty());
    }
}
