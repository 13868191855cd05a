//! Cluster and chain identity.
//!
//! - [`Cluster`] - the network the explorer is pointed at
//! - [`ChainId`] - the identifier the token services use for that network
//! - [`is_valid_cluster`] - trust-boundary check for externally supplied clusters

mod chain_id;
mod cluster;
mod validate;

pub use chain_id::*;
pub use cluster::*;
pub use validate::*;
