//! Clients - HTTP Clients for the storefront REST backend
//!
//! This module contains the transport seam and the REST gateway built on it.

pub mod rest_client;
pub mod transport;

// Re-export main types for convenience
pub use rest_client::{Resource, RestGateway};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
