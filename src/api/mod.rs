//! Rental API plumbing.
//!
//! The plugin cannot perform HTTP itself; it describes calls as [`HttpCall`]s
//! which the shim hands to the host, and decodes the `WebRequestResult` that
//! comes back. Nothing in this module touches the plugin runtime.
//!
//! # Organization
//!
//! - [`request`]: The endpoint catalogue
//! - [`client`]: URL resolution and credential headers
//! - [`response`]: Status classification and JSON decoding
//! - [`context`]: Request/response correlation and trace propagation

pub mod client;
pub mod context;
pub mod request;
pub mod response;

pub use client::{ApiClient, HttpCall, DEFAULT_API_URL};
pub use context::{RequestContext, TraceContext};
pub use request::{ApiRequest, Method, Target};
