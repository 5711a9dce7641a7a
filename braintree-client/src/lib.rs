//! # Braintree Client
//!
//! Request routing and configuration integrity for the Braintree client SDK.
//!
//! A [`Client`] freezes the gateway configuration it was built with, routes
//! logical requests onto one of the gateway's API surfaces and turns transport
//! failures into a closed [`ClientError`] taxonomy.
//!
//! ## Overview
//!
//! ```text
//! RequestDescriptor ──validate──▶ ValidatedRequest ──UrlResolver──▶ ResolvedCall
//!                                                                       │
//!                                                                   Transport
//!                                                                       │
//! RequestOutcome ◀──────────────── classify() ◀──────────────── TransportOutcome
//! ```
//!
//! | surface | base URL | path | extras |
//! |---|---|---|---|
//! | legacy / `clientApi` | `clientApiUrl` | `/v1/<endpoint>` | library version, `_meta`, credentials in `data` |
//! | `braintreeApi` | `braintreeApi.url` | `/<endpoint>` | `Braintree-Version` and bearer `Authorization` headers |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use braintree_client::{Client, ClientConfig, RequestDescriptor, Result, Transport};
//! use std::sync::Arc;
//!
//! async fn list_payment_methods(transport: Arc<dyn Transport>) -> Result<()> {
//!     let client =
//!         Client::create("sandbox_abc123_merchant", transport, ClientConfig::default()).await?;
//!
//!     let outcome = client.request(RequestDescriptor::get("payment_methods")).await;
//!     match outcome.error {
//!         Some(err) => eprintln!("{} {}: {}", err.error_type(), err.code(), err),
//!         None => println!("{:?}", outcome.data),
//!     }
//!     Ok(())
//! }
//! ```

mod authorization;
mod bootstrap;
mod classify;
mod client;
mod config;
mod configuration;
mod domain;
mod error;
mod request;
mod resolver;
mod transport;

pub mod testing;

pub use authorization::Authorization;
pub use bootstrap::CONFIG_VERSION;
pub use classify::{TIMEOUT_STATUS, classify};
pub use client::{Client, ConfigurationAccessor, RequestOutcome};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_TRUSTED_DOMAINS};
pub use configuration::{
    AnalyticsMetadata, AnalyticsOverrides, BraintreeApiConfiguration, ClientOptions,
    ConfigurationSnapshot, ConfigurationStore, GatewayConfiguration,
};
pub use domain::is_trusted_url;
pub use error::{ClientError, ConfigField, ErrorCode, ErrorType, Result};
pub use request::{Api, RequestDescriptor, ResolvedCall, ValidatedRequest};
pub use resolver::{BRAINTREE_API_VERSION, UrlResolver, braintree_api_headers};
pub use transport::{Transport, TransportOutcome};

/// SDK version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library tag merged into legacy and clientApi request data.
pub const LIBRARY_VERSION: &str = concat!("braintree/rust/", env!("CARGO_PKG_VERSION"));

/// Prelude for common imports.
///
/// ```
/// use braintree_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{Client, RequestOutcome};
    pub use crate::config::{ClientConfig, ClientConfigBuilder};
    pub use crate::configuration::{ClientOptions, ConfigurationSnapshot, GatewayConfiguration};
    pub use crate::error::{ClientError, ErrorCode, ErrorType, Result};
    pub use crate::request::{Api, RequestDescriptor, ResolvedCall};
    pub use crate::transport::{Transport, TransportOutcome};
}
