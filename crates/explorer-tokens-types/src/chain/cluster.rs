//! Network clusters the explorer can be pointed at.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

use crate::networks;

/// A Solana-style network cluster.
///
/// The numeric discriminants are part of the wire format: the explorer front-end
/// sends clusters as plain numbers (`{"cluster": 0}` for mainnet-beta), so the
/// values here must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Cluster {
    MainnetBeta = 0,
    Testnet = 1,
    Devnet = 2,
    /// A cluster identified only by its genesis hash (SIMD-296).
    Simd296 = 3,
    /// A user supplied RPC endpoint.
    Custom = 4,
}

impl Cluster {
    /// All clusters, in discriminant order.
    pub const ALL: [Cluster; 5] = [
        Cluster::MainnetBeta,
        Cluster::Testnet,
        Cluster::Devnet,
        Cluster::Simd296,
        Cluster::Custom,
    ];

    /// Returns the cluster for a wire discriminant, if it names one.
    pub const fn from_u64(value: u64) -> Option<Self> {
        match value {
            0 => Some(Cluster::MainnetBeta),
            1 => Some(Cluster::Testnet),
            2 => Some(Cluster::Devnet),
            3 => Some(Cluster::Simd296),
            4 => Some(Cluster::Custom),
            _ => None,
        }
    }

    /// The wire discriminant.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Fixed clusters always map to the same chain regardless of genesis hash.
    pub const fn is_fixed(self) -> bool {
        matches!(
            self,
            Cluster::MainnetBeta | Cluster::Testnet | Cluster::Devnet
        )
    }

    /// URL-friendly name, e.g. `mainnet-beta`.
    pub fn slug(self) -> &'static str {
        networks::cluster_info(self).slug
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown cluster {0}")]
pub struct ClusterParseError(String);

impl FromStr for Cluster {
    type Err = ClusterParseError;

    /// Accepts either a slug (`devnet`) or a wire discriminant (`2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(cluster) = networks::cluster_by_slug(s) {
            return Ok(cluster);
        }
        s.parse::<u64>()
            .ok()
            .and_then(Cluster::from_u64)
            .ok_or_else(|| ClusterParseError(s.to_string()))
    }
}

impl Serialize for Cluster {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Cluster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u64::deserialize(deserializer)?;
        Cluster::from_u64(value)
            .ok_or_else(|| de::Error::custom(format!("unknown cluster discriminant {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants_are_stable() {
        assert_eq!(Cluster::MainnetBeta.as_u8(), 0);
        assert_eq!(Cluster::Testnet.as_u8(), 1);
        assert_eq!(Cluster::Devnet.as_u8(), 2);
        assert_eq!(Cluster::Simd296.as_u8(), 3);
        assert_eq!(Cluster::Custom.as_u8(), 4);
        assert_eq!(Cluster::from_u64(5), None);
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&Cluster::Devnet).unwrap();
        assert_eq!(json, "2");
        let cluster: Cluster = serde_json::from_str("4").unwrap();
        assert_eq!(cluster, Cluster::Custom);
        assert!(serde_json::from_str::<Cluster>("7").is_err());
        assert!(serde_json::from_str::<Cluster>("\"devnet\"").is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("mainnet-beta".parse::<Cluster>().unwrap(), Cluster::MainnetBeta);
        assert_eq!("simd296".parse::<Cluster>().unwrap(), Cluster::Simd296);
        assert_eq!("1".parse::<Cluster>().unwrap(), Cluster::Testnet);
        assert!("localnet".parse::<Cluster>().is_err());
    }
}
