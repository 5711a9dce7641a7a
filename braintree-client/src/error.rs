//! Client error types.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Broad origin of an error.
///
/// Integrations branch on this rather than on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Programmer misuse inside the SDK or its configuration.
    Internal,
    /// Merchant integration mistake.
    Merchant,
    /// The credentials do not allow the operation.
    Authorization,
    /// Transport or upstream failure.
    Network,
}

impl ErrorType {
    /// Get the wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "INTERNAL",
            Self::Merchant => "MERCHANT",
            Self::Authorization => "AUTHORIZATION",
            Self::Network => "NETWORK",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MissingGatewayConfiguration,
    GatewayConfigurationInvalidDomain,
    GatewayConfigurationMalformed,
    InvalidAuthorization,
    OptionRequired,
    OptionInvalid,
    ApiUrlUnavailable,
    BraintreeApiAccessRestricted,
    AuthorizationInsufficient,
    RateLimited,
    RequestTimeout,
    RequestError,
    GatewayNetwork,
}

impl ErrorCode {
    /// Get the wire name of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingGatewayConfiguration => "CLIENT_MISSING_GATEWAY_CONFIGURATION",
            Self::GatewayConfigurationInvalidDomain => {
                "CLIENT_GATEWAY_CONFIGURATION_INVALID_DOMAIN"
            }
            Self::GatewayConfigurationMalformed => "CLIENT_GATEWAY_CONFIGURATION_MALFORMED",
            Self::InvalidAuthorization => "CLIENT_INVALID_AUTHORIZATION",
            Self::OptionRequired => "CLIENT_OPTION_REQUIRED",
            Self::OptionInvalid => "CLIENT_OPTION_INVALID",
            Self::ApiUrlUnavailable => "CLIENT_API_URL_UNAVAILABLE",
            Self::BraintreeApiAccessRestricted => "CLIENT_BRAINTREE_API_ACCESS_RESTRICTED",
            Self::AuthorizationInsufficient => "CLIENT_AUTHORIZATION_INSUFFICIENT",
            Self::RateLimited => "CLIENT_RATE_LIMITED",
            Self::RequestTimeout => "CLIENT_REQUEST_TIMEOUT",
            Self::RequestError => "CLIENT_REQUEST_ERROR",
            Self::GatewayNetwork => "CLIENT_GATEWAY_NETWORK",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gateway configuration fields that hold a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    AssetsUrl,
    ClientApiUrl,
    ConfigUrl,
    BraintreeApiUrl,
}

impl ConfigField {
    /// Get the field path as it appears in the gateway configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssetsUrl => "assetsUrl",
            Self::ClientApiUrl => "clientApiUrl",
            Self::ConfigUrl => "configUrl",
            Self::BraintreeApiUrl => "braintreeApi.url",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The client was built without a gateway configuration.
    #[error("Missing gatewayConfiguration")]
    MissingGatewayConfiguration,

    /// A configured URL points outside the trusted domains.
    #[error("{field} property is on an invalid domain")]
    UntrustedDomain {
        /// Offending field.
        field: ConfigField,
        /// Rejected URL.
        url: String,
    },

    /// The fetched gateway configuration could not be decoded.
    #[error("Gateway configuration is malformed: {0}")]
    MalformedConfiguration(String),

    /// The authorization is neither a tokenization key nor a client token.
    #[error("Authorization is invalid. Make sure your client token or tokenization key is valid.")]
    InvalidAuthorization,

    /// A mandatory request option was not supplied.
    #[error("options.{option} is required when making a request")]
    OptionRequired {
        /// Option name.
        option: &'static str,
    },

    /// A request option has an unsupported value.
    #[error("options.{option} is invalid")]
    OptionInvalid {
        /// Option name.
        option: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The configuration has no base URL for the requested surface.
    #[error("Gateway configuration does not provide clientApiUrl")]
    ApiUrlUnavailable,

    /// braintreeApi was requested but is not provisioned for this merchant.
    #[error("This account does not have access to make requests to the Braintree API")]
    BraintreeApiAccessRestricted,

    /// The gateway answered 403.
    #[error("Client authorization insufficient")]
    AuthorizationInsufficient {
        /// Raw transport error.
        original: Value,
    },

    /// The gateway answered 429.
    #[error("You are being rate-limited; please try again in a few minutes")]
    RateLimited {
        /// Raw transport error.
        original: Value,
    },

    /// The transport gave up waiting for a response.
    #[error("Request timed out")]
    RequestTimeout {
        /// Raw transport error.
        original: Value,
    },

    /// The gateway rejected the request with a 4xx status.
    #[error("There was a problem with your request")]
    RequestError {
        /// HTTP status code.
        status: i32,
        /// Raw transport error.
        original: Value,
    },

    /// The gateway or the network failed.
    #[error("Cannot contact the gateway at this time")]
    GatewayNetwork {
        /// Raw transport error.
        original: Value,
    },
}

impl ClientError {
    /// Get the error type.
    pub fn error_type(&self) -> ErrorType {
        match self {
            Self::MissingGatewayConfiguration
            | Self::UntrustedDomain { .. }
            | Self::MalformedConfiguration(_)
            | Self::ApiUrlUnavailable => ErrorType::Internal,
            Self::InvalidAuthorization | Self::OptionRequired { .. } | Self::OptionInvalid { .. } => {
                ErrorType::Merchant
            }
            Self::BraintreeApiAccessRestricted
            | Self::AuthorizationInsufficient { .. }
            | Self::RateLimited { .. } => ErrorType::Authorization,
            Self::RequestTimeout { .. } | Self::RequestError { .. } | Self::GatewayNetwork { .. } => {
                ErrorType::Network
            }
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingGatewayConfiguration => ErrorCode::MissingGatewayConfiguration,
            Self::UntrustedDomain { .. } => ErrorCode::GatewayConfigurationInvalidDomain,
            Self::MalformedConfiguration(_) => ErrorCode::GatewayConfigurationMalformed,
            Self::InvalidAuthorization => ErrorCode::InvalidAuthorization,
            Self::OptionRequired { .. } => ErrorCode::OptionRequired,
            Self::OptionInvalid { .. } => ErrorCode::OptionInvalid,
            Self::ApiUrlUnavailable => ErrorCode::ApiUrlUnavailable,
            Self::BraintreeApiAccessRestricted => ErrorCode::BraintreeApiAccessRestricted,
            Self::AuthorizationInsufficient { .. } => ErrorCode::AuthorizationInsufficient,
            Self::RateLimited { .. } => ErrorCode::RateLimited,
            Self::RequestTimeout { .. } => ErrorCode::RequestTimeout,
            Self::RequestError { .. } => ErrorCode::RequestError,
            Self::GatewayNetwork { .. } => ErrorCode::GatewayNetwork,
        }
    }

    /// Get the human readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Get the raw transport error this error wraps, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::AuthorizationInsufficient { original }
            | Self::RateLimited { original }
            | Self::RequestTimeout { original }
            | Self::RequestError { original, .. }
            | Self::GatewayNetwork { original } => Some(original),
            _ => None,
        }
    }

    /// Check if this error was raised by the gateway or the network.
    pub fn is_network(&self) -> bool {
        self.error_type() == ErrorType::Network
    }

    /// Render the `{type, code, message, details}` shape used by integrations.
    pub fn to_value(&self) -> Value {
        let mut object = serde_json::Map::new();
        object.insert("type".into(), Value::from(self.error_type().as_str()));
        object.insert("code".into(), Value::from(self.code().as_str()));
        object.insert("message".into(), Value::from(self.message()));
        if let Some(original) = self.details() {
            object.insert(
                "details".into(),
                serde_json::json!({ "originalError": original }),
            );
        }
        Value::Object(object)
    }
}
