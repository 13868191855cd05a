//! Process-level helpers for the server binary.
//!
//! - [`sig_down`] - Graceful shutdown on SIGTERM and SIGINT
//! - [`telemetry`] - Logging and OpenTelemetry export

pub mod sig_down;
pub mod telemetry;

pub use sig_down::*;
pub use telemetry::*;
