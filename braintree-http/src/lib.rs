//! # Braintree HTTP Transport
//!
//! A [`Transport`](braintree_client::Transport) implementation on top of
//! reqwest, with connection pooling, gzip and per-call timeouts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use braintree_client::{Client, ClientConfig, RequestDescriptor};
//! use braintree_http::{HttpTransport, HttpTransportConfig};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new(
//!         HttpTransportConfig::builder()
//!             .timeout(Duration::from_secs(30))
//!             .build(),
//!     )?;
//!
//!     let client = Client::create(
//!         "sandbox_abc123_merchant",
//!         Arc::new(transport),
//!         ClientConfig::default(),
//!     )
//!     .await?;
//!
//!     let outcome = client.request(RequestDescriptor::get("payment_methods")).await;
//!     println!("Status: {:?}", outcome.status);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod query;
mod transport;

pub use config::{HttpTransportConfig, HttpTransportConfigBuilder};
pub use error::{HttpTransportError, Result};
pub use query::queryify;
pub use transport::{HttpTransport, NO_STATUS};
