//! Trusted-domain checks for gateway-supplied URLs.

use crate::ClientConfig;
use url::Url;

/// Check whether `url` lives on one of the configured trusted domains.
///
/// The host must equal a trusted suffix or be a subdomain of one, and the
/// scheme must be `https` unless the config allows insecure URLs.
pub fn is_trusted_url(url: &str, config: &ClientConfig) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    match parsed.scheme() {
        "https" => {}
        "http" if config.allow_insecure_urls => {}
        _ => return false,
    }

    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();

    config
        .trusted_domains()
        .any(|suffix| host_matches(&host, &suffix.to_ascii_lowercase()))
}

fn host_matches(host: &str, suffix: &str) -> bool {
    host == suffix
        || host
            .strip_suffix(suffix)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::default()
    }

    #[test]
    fn test_accepts_trusted_hosts() {
        let config = config();
        assert!(is_trusted_url("https://braintreegateway.com", &config));
        assert!(is_trusted_url(
            "https://api.sandbox.braintreegateway.com:443/merchants/x",
            &config
        ));
        assert!(is_trusted_url("https://assets.braintreegateway.com", &config));
        assert!(is_trusted_url("https://payments.sandbox.braintree-api.com/graphql", &config));
        assert!(is_trusted_url("https://www.paypal.com", &config));
        assert!(is_trusted_url("https://API.BraintreeGateway.COM", &config));
    }

    #[test]
    fn test_rejects_lookalike_hosts() {
        let config = config();
        assert!(!is_trusted_url("https://evilbraintreegateway.com", &config));
        assert!(!is_trusted_url("https://braintreegateway.com.evil.com", &config));
        assert!(!is_trusted_url("https://example.com", &config));
        assert!(!is_trusted_url("not a url", &config));
    }

    #[test]
    fn test_requires_https_by_default() {
        assert!(!is_trusted_url("http://braintreegateway.com", &config()));

        let insecure = ClientConfig::builder().allow_insecure_urls(true).build();
        assert!(is_trusted_url("http://braintreegateway.com", &insecure));
        assert!(!is_trusted_url("ftp://braintreegateway.com", &insecure));
    }

    #[test]
    fn test_extra_trusted_domains() {
        let config = ClientConfig::builder()
            .trust_domain("127.0.0.1")
            .allow_insecure_urls(true)
            .build();
        assert!(is_trusted_url("http://127.0.0.1:8080/v1", &config));
    }
}
