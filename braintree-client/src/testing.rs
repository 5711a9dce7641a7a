//! In-memory transport for tests.

use crate::{ResolvedCall, Transport, TransportOutcome};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

/// Transport that records calls and replays canned outcomes.
///
/// When the queue is empty every call succeeds with `{}` and status 200.
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<TransportOutcome>>,
    calls: Mutex<Vec<ResolvedCall>>,
}

impl MockTransport {
    /// Create an empty mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next call.
    pub fn push(&self, outcome: TransportOutcome) -> &Self {
        self.outcomes.lock().push_back(outcome);
        self
    }

    /// Queue a successful outcome.
    pub fn respond(&self, body: Value, status: i32) -> &Self {
        self.push(TransportOutcome::success(body, status))
    }

    /// Queue a failed outcome.
    pub fn fail(&self, error: Value, status: i32) -> &Self {
        self.push(TransportOutcome::failure(error, status))
    }

    /// Every call performed so far.
    pub fn calls(&self) -> Vec<ResolvedCall> {
        self.calls.lock().clone()
    }

    /// The most recent call.
    pub fn last_call(&self) -> Option<ResolvedCall> {
        self.calls.lock().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn perform(&self, call: ResolvedCall) -> TransportOutcome {
        self.calls.lock().push(call);
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or_else(|| TransportOutcome::success(Value::Object(Default::default()), 200))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(url: &str) -> ResolvedCall {
        ResolvedCall {
            url: url.into(),
            method: "GET".into(),
            data: Value::Null,
            headers: None,
            timeout: None,
        }
    }

    #[test]
    fn test_replays_in_order_then_defaults() {
        let transport = MockTransport::new();
        transport
            .respond(json!({"first": true}), 200)
            .fail(json!("boom"), 500);

        let first = tokio_test::block_on(transport.perform(call("https://a")));
        assert_eq!(first.body, Some(json!({"first": true})));

        let second = tokio_test::block_on(transport.perform(call("https://b")));
        assert_eq!(second.error, Some(json!("boom")));
        assert_eq!(second.status, 500);

        let third = tokio_test::block_on(transport.perform(call("https://c")));
        assert_eq!(third.body, Some(json!({})));
        assert_eq!(third.status, 200);
    }

    #[test]
    fn test_records_calls() {
        let transport = MockTransport::new();
        assert!(transport.last_call().is_none());

        tokio_test::block_on(transport.perform(call("https://a")));
        tokio_test::block_on(transport.perform(call("https://b")));

        assert_eq!(transport.calls().len(), 2);
        assert_eq!(transport.last_call().unwrap().url, "https://b");
    }
}
