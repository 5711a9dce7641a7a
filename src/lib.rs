// Braintree SDK - client-side gateway access for Rust
//
// This library validates gateway configuration, routes requests onto the
// gateway's API surfaces and classifies failures into typed errors.

// Re-export core functionality
pub use braintree_client::*;

// Re-export optional crates
#[cfg(feature = "http")]
pub use braintree_http;

#[cfg(feature = "http")]
pub use braintree_http::{HttpTransport, HttpTransportConfig};

// Prelude for common imports
pub mod prelude {
    pub use braintree_client::prelude::*;

    #[cfg(feature = "http")]
    pub use braintree_http::{HttpTransport, HttpTransportConfig};
}
