//! Mapping of transport failures onto [`ClientError`].

use crate::ClientError;
use serde_json::Value;

/// Status a transport reports when it timed out before any response.
pub const TIMEOUT_STATUS: i32 = -1;

/// Classify a failed transport outcome.
///
/// Only called when the transport reported an error; the status alone never
/// decides success. Specific codes are checked before the broad ranges.
pub fn classify(original: Value, status: i32) -> ClientError {
    match status {
        403 => ClientError::AuthorizationInsufficient { original },
        429 => ClientError::RateLimited { original },
        TIMEOUT_STATUS => ClientError::RequestTimeout { original },
        400..=499 => ClientError::RequestError { status, original },
        500..=599 => ClientError::GatewayNetwork { original },
        // No status, redirects, or an error on a 2xx: still an upstream failure.
        _ => ClientError::GatewayNetwork { original },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorCode, ErrorType};
    use serde_json::json;

    fn raw() -> Value {
        json!({"error": {"message": "boom"}})
    }

    #[test]
    fn test_authorization_statuses() {
        let err = classify(raw(), 403);
        assert_eq!(err.code(), ErrorCode::AuthorizationInsufficient);
        assert_eq!(err.error_type(), ErrorType::Authorization);

        let err = classify(raw(), 429);
        assert_eq!(err.code(), ErrorCode::RateLimited);
        assert_eq!(err.error_type(), ErrorType::Authorization);
    }

    #[test]
    fn test_timeout() {
        let err = classify(json!("timeout"), TIMEOUT_STATUS);
        assert_eq!(err.code(), ErrorCode::RequestTimeout);
        assert_eq!(err.error_type(), ErrorType::Network);
        assert_eq!(err.details(), Some(&json!("timeout")));
    }

    #[test]
    fn test_client_errors_keep_original() {
        for status in [400, 401, 404, 422, 499] {
            let err = classify(raw(), status);
            assert_eq!(err.code(), ErrorCode::RequestError, "status {status}");
            assert_eq!(err.error_type(), ErrorType::Network);
            assert_eq!(err.details(), Some(&raw()));
        }
    }

    #[test]
    fn test_server_errors() {
        for status in [500, 502, 503, 599] {
            let err = classify(raw(), status);
            assert_eq!(err.code(), ErrorCode::GatewayNetwork, "status {status}");
        }
    }

    #[test]
    fn test_unclassified_failures_are_not_swallowed() {
        for status in [0, 200, 302, 600] {
            let err = classify(raw(), status);
            assert_eq!(err.code(), ErrorCode::GatewayNetwork, "status {status}");
            assert_eq!(err.details(), Some(&raw()));
        }
    }
}
