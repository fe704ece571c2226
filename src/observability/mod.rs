//! OpenTelemetry tracing with file-based OTLP export.
//!
//! A Zellij plugin has no collector to talk to, so spans are written as OTLP
//! JSON lines to a rotating file under the host's data directory:
//!
//! ```text
//! tracing → tracing-opentelemetry → opentelemetry_sdk → TraceFileExporter → rentaldesk-otlp.json
//! ```
//!
//! The level comes from the `trace_level` plugin option (default `info`).
//! Request contexts carry the issuing span's ids, so the handling of a
//! `WebRequestResult` shows up in the same trace as the request.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider and the file exporter
//! - [`span_formatter`]: OTLP JSON serialization
//! - [`file_writer`]: Size-based rotating writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};

/// `service.name` resource attribute and instrumentation scope.
pub const SERVICE_NAME: &str = "rentaldesk";
