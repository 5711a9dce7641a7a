//! The transport seam.

use crate::{ResolvedCall, classify::TIMEOUT_STATUS};
use async_trait::async_trait;
use serde_json::Value;

/// Raw result of performing a call.
///
/// `error` being present marks a failure regardless of `status`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportOutcome {
    pub error: Option<Value>,
    pub body: Option<Value>,
    pub status: i32,
}

impl TransportOutcome {
    /// Successful outcome.
    pub fn success(body: Value, status: i32) -> Self {
        Self {
            error: None,
            body: Some(body),
            status,
        }
    }

    /// Failed outcome.
    pub fn failure(error: Value, status: i32) -> Self {
        Self {
            error: Some(error),
            body: None,
            status,
        }
    }

    /// Timeout before any response arrived.
    pub fn timeout() -> Self {
        Self::failure(Value::from("timeout"), TIMEOUT_STATUS)
    }
}

/// Performs resolved calls.
///
/// Implementations complete every call exactly once and own cancellation,
/// timeouts and any retry policy.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform `call` and report what happened.
    async fn perform(&self, call: ResolvedCall) -> TransportOutcome;
}
