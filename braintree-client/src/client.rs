//! Request dispatcher.

use crate::{
    ClientConfig, ClientError, ClientOptions, ConfigurationSnapshot, ConfigurationStore,
    RequestDescriptor, Result, Transport, TransportOutcome, UrlResolver, VERSION,
    classify::classify,
};
use parking_lot::RwLock;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Strategy used by [`Client::get_configuration`].
pub type ConfigurationAccessor =
    Arc<dyn Fn(&ConfigurationStore) -> ConfigurationSnapshot + Send + Sync>;

/// Completion of a [`Client::request`].
///
/// Exactly one of `error` and `data` is set. `status` is `None` when the
/// request was rejected before reaching the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome {
    pub error: Option<ClientError>,
    pub data: Option<Value>,
    pub status: Option<i32>,
}

impl RequestOutcome {
    fn rejected(error: ClientError) -> Self {
        Self {
            error: Some(error),
            data: None,
            status: None,
        }
    }

    /// Check if the request succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`, dropping the status.
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data.unwrap_or(Value::Null)),
        }
    }
}

struct Inner {
    store: ConfigurationStore,
    transport: Arc<dyn Transport>,
    accessor: RwLock<ConfigurationAccessor>,
}

/// Gateway client.
///
/// Cheap to clone; clones share the frozen configuration and transport.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

impl Client {
    /// Create a client with default configuration.
    pub fn new(options: ClientOptions, transport: Arc<dyn Transport>) -> Result<Self> {
        Self::with_config(options, transport, &ClientConfig::default())
    }

    /// Create a client, validating and freezing `options`.
    pub fn with_config(
        options: ClientOptions,
        transport: Arc<dyn Transport>,
        config: &ClientConfig,
    ) -> Result<Self> {
        let store = ConfigurationStore::new(options, config)?;
        debug!(
            session_id = %store.analytics().session_id,
            "Created gateway client"
        );

        let accessor: ConfigurationAccessor = Arc::new(ConfigurationStore::snapshot);
        Ok(Self {
            inner: Arc::new(Inner {
                store,
                transport,
                accessor: RwLock::new(accessor),
            }),
        })
    }

    /// SDK version.
    pub fn version(&self) -> &'static str {
        VERSION
    }

    /// Get the configuration through the current accessor.
    pub fn get_configuration(&self) -> ConfigurationSnapshot {
        let accessor = self.inner.accessor.read().clone();
        accessor(&self.inner.store)
    }

    /// Replace the strategy behind [`Client::get_configuration`].
    pub fn set_configuration_accessor<F>(&self, accessor: F)
    where
        F: Fn(&ConfigurationStore) -> ConfigurationSnapshot + Send + Sync + 'static,
    {
        *self.inner.accessor.write() = Arc::new(accessor);
    }

    /// Serializable view of the client; always forwards to
    /// [`Client::get_configuration`].
    pub fn to_json(&self) -> ConfigurationSnapshot {
        self.get_configuration()
    }

    /// Route `descriptor` and hand it to the transport.
    ///
    /// Never fails outright: misuse and transport failures are both reported
    /// through the returned outcome. Nothing is retried.
    pub async fn request(&self, descriptor: RequestDescriptor) -> RequestOutcome {
        let resolved = descriptor
            .validate()
            .and_then(|request| UrlResolver::new(&self.inner.store).resolve(request));

        let call = match resolved {
            Ok(call) => call,
            Err(error) => {
                warn!(code = %error.code(), error = %error, "Rejected request before dispatch");
                return RequestOutcome::rejected(error);
            }
        };

        debug!(method = %call.method, url = %call.url, "Dispatching gateway request");

        let TransportOutcome {
            error,
            body,
            status,
        } = self.inner.transport.perform(call).await;

        match error {
            Some(original) => {
                let error = classify(original, status);
                debug!(status, code = %error.code(), "Gateway request failed");
                RequestOutcome {
                    error: Some(error),
                    data: None,
                    status: Some(status),
                }
            }
            None => RequestOutcome {
                error: None,
                data: body,
                status: Some(status),
            },
        }
    }
}

impl Serialize for Client {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("store", &self.inner.store)
            .finish_non_exhaustive()
    }
}
