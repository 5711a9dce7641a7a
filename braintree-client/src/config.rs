//! Client configuration.

use crate::VERSION;

/// Domains every gateway-supplied URL must belong to.
pub const DEFAULT_TRUSTED_DOMAINS: &[&str] = &[
    "braintreegateway.com",
    "braintreepayments.com",
    "braintree-api.com",
    "paypal.com",
];

/// Client configuration.
///
/// Controls the analytics metadata a client generates and which hosts it
/// accepts in a gateway configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// SDK version reported in analytics metadata.
    pub sdk_version: String,
    /// Platform reported in analytics metadata.
    pub platform: String,
    /// Default `_meta.source` value.
    pub source: String,
    /// Integration name.
    pub integration: String,
    /// Integration type.
    pub integration_type: String,
    /// Identifier of the merchant application.
    pub merchant_app_id: String,
    /// Trusted domains in addition to [`DEFAULT_TRUSTED_DOMAINS`].
    pub trusted_domains: Vec<String>,
    /// Accept plain `http` URLs on trusted hosts.
    pub allow_insecure_urls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sdk_version: VERSION.to_string(),
            platform: "rust".to_string(),
            source: "client".to_string(),
            integration: "custom".to_string(),
            integration_type: "custom".to_string(),
            merchant_app_id: String::new(),
            trusted_domains: Vec::new(),
            allow_insecure_urls: false,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Iterate over every trusted domain suffix.
    pub fn trusted_domains(&self) -> impl Iterator<Item = &str> {
        DEFAULT_TRUSTED_DOMAINS
            .iter()
            .copied()
            .chain(self.trusted_domains.iter().map(String::as_str))
    }
}

/// Builder for client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the SDK version.
    pub fn sdk_version(mut self, version: impl Into<String>) -> Self {
        self.config.sdk_version = version.into();
        self
    }

    /// Set the platform.
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.config.platform = platform.into();
        self
    }

    /// Set the default request source.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.config.source = source.into();
        self
    }

    /// Set the integration name.
    pub fn integration(mut self, integration: impl Into<String>) -> Self {
        self.config.integration = integration.into();
        self
    }

    /// Set the integration type.
    pub fn integration_type(mut self, integration_type: impl Into<String>) -> Self {
        self.config.integration_type = integration_type.into();
        self
    }

    /// Set the merchant application identifier.
    pub fn merchant_app_id(mut self, id: impl Into<String>) -> Self {
        self.config.merchant_app_id = id.into();
        self
    }

    /// Trust an additional domain and all of its subdomains.
    pub fn trust_domain(mut self, domain: impl Into<String>) -> Self {
        self.config
            .trusted_domains
            .push(domain.into().to_ascii_lowercase());
        self
    }

    /// Accept plain `http` URLs.
    pub fn allow_insecure_urls(mut self, allow: bool) -> Self {
        self.config.allow_insecure_urls = allow;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
