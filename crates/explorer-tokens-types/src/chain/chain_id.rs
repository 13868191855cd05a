//! Token-list chain identifiers and their resolution from a cluster.
//!
//! The token metadata service and the legacy token list both identify networks by a
//! small integer (`101` mainnet, `102` testnet, `103` devnet). The explorer, however,
//! only knows which [`Cluster`] it is pointed at and, for generic clusters, the
//! genesis hash reported by the node. [`ChainId::resolve`] bridges the two.
//!
//! # Examples
//!
//! ```
//! use explorer_tokens_types::chain::{ChainId, Cluster};
//! use explorer_tokens_types::networks::genesis_hashes;
//!
//! assert_eq!(ChainId::resolve(Cluster::Devnet, None), Some(ChainId::Devnet));
//! assert_eq!(
//!     ChainId::resolve(Cluster::Custom, Some(genesis_hashes::MAINNET)),
//!     Some(ChainId::Mainnet)
//! );
//! assert_eq!(ChainId::resolve(Cluster::Custom, None), None);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

use crate::chain::Cluster;
use crate::networks::{SOLANA_NAMESPACE, genesis_hashes};

/// Chain identifier understood by the token metadata service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ChainId {
    Mainnet = 101,
    Testnet = 102,
    Devnet = 103,
}

impl ChainId {
    /// Resolves the chain of `cluster`.
    ///
    /// Fixed clusters map unconditionally and ignore `genesis_hash`, even when it
    /// belongs to another network. Generic clusters resolve only when `genesis_hash`
    /// exactly matches a known genesis hash.
    pub fn resolve(cluster: Cluster, genesis_hash: Option<&str>) -> Option<Self> {
        match cluster {
            Cluster::MainnetBeta => Some(ChainId::Mainnet),
            Cluster::Testnet => Some(ChainId::Testnet),
            Cluster::Devnet => Some(ChainId::Devnet),
            Cluster::Simd296 | Cluster::Custom => genesis_hash.and_then(Self::from_genesis_hash),
        }
    }

    /// Resolves a chain from a genesis hash alone.
    pub fn from_genesis_hash(genesis_hash: &str) -> Option<Self> {
        match genesis_hash {
            genesis_hashes::MAINNET => Some(ChainId::Mainnet),
            genesis_hashes::DEVNET => Some(ChainId::Devnet),
            genesis_hashes::TESTNET => Some(ChainId::Testnet),
            _ => None,
        }
    }

    pub const fn from_u64(value: u64) -> Option<Self> {
        match value {
            101 => Some(ChainId::Mainnet),
            102 => Some(ChainId::Testnet),
            103 => Some(ChainId::Devnet),
            _ => None,
        }
    }

    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Full genesis hash of this chain.
    pub const fn genesis_hash(self) -> &'static str {
        match self {
            ChainId::Mainnet => genesis_hashes::MAINNET,
            ChainId::Testnet => genesis_hashes::TESTNET,
            ChainId::Devnet => genesis_hashes::DEVNET,
        }
    }

    /// CAIP-2 form, e.g. `solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp`.
    ///
    /// The reference is the first 32 characters of the genesis hash.
    pub fn caip2(self) -> String {
        format!("{}:{}", SOLANA_NAMESPACE, &self.genesis_hash()[..32])
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

impl From<ChainId> for u16 {
    fn from(value: ChainId) -> Self {
        value.as_u16()
    }
}

/// Error returned when parsing an unknown chain id.
#[derive(Debug, thiserror::Error)]
#[error("Invalid chain id {0}")]
pub struct ChainIdFormatError(String);

impl FromStr for ChainId {
    type Err = ChainIdFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .ok()
            .and_then(ChainId::from_u64)
            .ok_or_else(|| ChainIdFormatError(s.into()))
    }
}

impl Serialize for ChainId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.as_u16())
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u64::deserialize(deserializer)?;
        ChainId::from_u64(value).ok_or_else(|| de::Error::custom(format!("unknown chain id {value}")))
    }
}
