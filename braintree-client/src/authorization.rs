//! Tokenization keys and client tokens.

use crate::{ClientError, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use serde_json::{Map, Value};

const PRODUCTION_API_URL: &str = "https://api.braintreegateway.com:443";
const SANDBOX_API_URL: &str = "https://api.sandbox.braintreegateway.com:443";

/// Parsed merchant authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Static, publishable tokenization key.
    TokenizationKey {
        /// The raw key.
        key: String,
        /// Gateway environment encoded in the key.
        environment: String,
        /// Merchant the key belongs to.
        merchant_id: String,
    },
    /// Short-lived client token issued by the merchant server.
    ClientToken {
        /// Fingerprint sent with every gateway request.
        authorization_fingerprint: String,
        /// Where the gateway configuration is fetched from.
        config_url: String,
        /// Gateway environment, when the token names one.
        environment: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientTokenPayload {
    authorization_fingerprint: String,
    config_url: String,
    #[serde(default)]
    environment: Option<String>,
}

impl Authorization {
    /// Parse a tokenization key or a base64 client token.
    pub fn parse(raw: &str) -> Result<Self> {
        if let Some((environment, merchant_id)) = split_tokenization_key(raw) {
            return Ok(Self::TokenizationKey {
                key: raw.to_string(),
                environment: environment.to_string(),
                merchant_id: merchant_id.to_string(),
            });
        }

        let decoded = STANDARD
            .decode(raw.trim())
            .map_err(|_| ClientError::InvalidAuthorization)?;
        let payload: ClientTokenPayload =
            serde_json::from_slice(&decoded).map_err(|_| ClientError::InvalidAuthorization)?;

        Ok(Self::ClientToken {
            authorization_fingerprint: payload.authorization_fingerprint,
            config_url: payload.config_url,
            environment: payload.environment,
        })
    }

    /// Get the URL the gateway configuration is served from.
    pub fn config_url(&self) -> String {
        match self {
            Self::TokenizationKey {
                environment,
                merchant_id,
                ..
            } => {
                let base = if environment == "production" {
                    PRODUCTION_API_URL
                } else {
                    SANDBOX_API_URL
                };
                format!("{base}/merchants/{merchant_id}/client_api/v1/configuration")
            }
            Self::ClientToken { config_url, .. } => config_url.clone(),
        }
    }

    /// Get the gateway environment, if known.
    pub fn environment(&self) -> Option<&str> {
        match self {
            Self::TokenizationKey { environment, .. } => Some(environment),
            Self::ClientToken { environment, .. } => environment.as_deref(),
        }
    }

    /// Credential attributes merged into gateway request data.
    pub fn attrs(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        match self {
            Self::TokenizationKey { key, .. } => {
                attrs.insert("tokenizationKey".into(), Value::from(key.as_str()));
            }
            Self::ClientToken {
                authorization_fingerprint,
                ..
            } => {
                attrs.insert(
                    "authorizationFingerprint".into(),
                    Value::from(authorization_fingerprint.as_str()),
                );
            }
        }
        attrs
    }
}

/// Split `<env>_<segment>_<merchant id>` into environment and merchant id.
fn split_tokenization_key(raw: &str) -> Option<(&str, &str)> {
    let mut parts = raw.splitn(3, '_');
    let environment = parts.next()?;
    let segment = parts.next()?;
    let merchant_id = parts.next()?;

    let alnum = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric());
    let merchant_ok = !merchant_id.is_empty()
        && merchant_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');

    (alnum(environment) && alnum(segment) && merchant_ok).then_some((environment, merchant_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_token(payload: Value) -> String {
        STANDARD.encode(payload.to_string())
    }

    #[test]
    fn test_parse_tokenization_key() {
        let auth = Authorization::parse("sandbox_abc123_merchant_id").unwrap();
        assert_eq!(auth.environment(), Some("sandbox"));
        assert_eq!(
            auth.config_url(),
            "https://api.sandbox.braintreegateway.com:443/merchants/merchant_id/client_api/v1/configuration"
        );
        assert_eq!(
            auth.attrs().get("tokenizationKey"),
            Some(&json!("sandbox_abc123_merchant_id"))
        );
    }

    #[test]
    fn test_production_tokenization_key() {
        let auth = Authorization::parse("production_xyz_mid").unwrap();
        assert!(auth.config_url().starts_with("https://api.braintreegateway.com:443/"));
    }

    #[test]
    fn test_parse_client_token() {
        let token = client_token(json!({
            "authorizationFingerprint": "fingerprint",
            "configUrl": "https://api.sandbox.braintreegateway.com/config",
            "environment": "sandbox"
        }));
        let auth = Authorization::parse(&token).unwrap();
        assert_eq!(
            auth.config_url(),
            "https://api.sandbox.braintreegateway.com/config"
        );
        assert_eq!(
            auth.attrs().get("authorizationFingerprint"),
            Some(&json!("fingerprint"))
        );
        assert!(auth.attrs().get("tokenizationKey").is_none());
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            Authorization::parse("not a token"),
            Err(ClientError::InvalidAuthorization)
        );
        assert_eq!(
            Authorization::parse(&STANDARD.encode("{\"configUrl\": 1}")),
            Err(ClientError::InvalidAuthorization)
        );
    }
}
