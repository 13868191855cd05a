//! Token info server for the Solana explorer.
//!
//! Serves token metadata to the explorer front end, backed by the token metadata
//! service and the legacy token list (see the `explorer-tokens-client` crate).
//!
//! # Modules
//!
//! - [`config`] - Server configuration from file, environment and defaults
//! - [`handlers`] - `/api/token-info`, `/api/full-token-info` and `/health`
//! - [`response_cache`] - TTL cache of token info answers
//! - [`util`] - Telemetry and graceful shutdown

pub mod config;
pub mod handlers;
pub mod response_cache;
pub mod util;
