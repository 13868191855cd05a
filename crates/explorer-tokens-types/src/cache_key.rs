//! Deterministic cache keys for token lookups.
//!
//! Request deduplication layers (the explorer's data-fetching hooks, the server's
//! response cache) key entries by these values. Equal inputs always produce equal keys
//! and identical string forms.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chain::Cluster;

/// Key of a single [`TokenInfo`](crate::token::TokenInfo) lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenInfoKey {
    pub address: String,
    pub cluster: Cluster,
    pub genesis_hash: Option<String>,
}

impl TokenInfoKey {
    pub const PREFIX: &'static str = "get-token-info";

    pub fn new(address: impl Into<String>, cluster: Cluster, genesis_hash: Option<&str>) -> Self {
        Self {
            address: address.into(),
            cluster,
            genesis_hash: genesis_hash.map(str::to_owned),
        }
    }
}

impl fmt::Display for TokenInfoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            Self::PREFIX,
            self.address,
            self.cluster.as_u8(),
            self.genesis_hash.as_deref().unwrap_or_default()
        )
    }
}

/// Key of a [`FullTokenInfo`](crate::token::FullTokenInfo) lookup.
///
/// Carries the cluster URL too, so switching custom endpoints invalidates the entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FullTokenInfoKey {
    pub address: String,
    pub cluster: Cluster,
    pub url: String,
    pub genesis_hash: Option<String>,
}

impl FullTokenInfoKey {
    pub const PREFIX: &'static str = "get-full-token-info";

    pub fn new(
        address: impl Into<String>,
        cluster: Cluster,
        url: impl Into<String>,
        genesis_hash: Option<&str>,
    ) -> Self {
        Self {
            address: address.into(),
            cluster,
            url: url.into(),
            genesis_hash: genesis_hash.map(str::to_owned),
        }
    }
}

impl fmt::Display for FullTokenInfoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            Self::PREFIX,
            self.address,
            self.cluster.as_u8(),
            self.url,
            self.genesis_hash.as_deref().unwrap_or_default()
        )
    }
}
