#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the explorer token pipeline.
//!
//! This crate is free of I/O. It answers two questions for the rest of the workspace:
//! which chain a cluster belongs to, and what a token record looks like.
//!
//! # Modules
//!
//! - [`chain`] - [`Cluster`](chain::Cluster), [`ChainId`](chain::ChainId) resolution and cluster validation
//! - [`networks`] - Registry of known clusters and their genesis hashes
//! - [`token`] - Token metadata records and the primary/legacy merge
//! - [`cache_key`] - Deterministic keys for request deduplication
//! - [`encoding`] - Hex, base58 and base64 byte encodings
//! - [`scaled_ui_amount`] - Token-2022 UI amount multipliers
//! - [`timestamp`] - Unix timestamps

pub mod cache_key;
pub mod chain;
pub mod encoding;
pub mod networks;
pub mod scaled_ui_amount;
pub mod timestamp;
pub mod token;
