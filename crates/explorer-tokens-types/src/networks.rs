//! Registry of the clusters the explorer knows about.
//!
//! Each fixed cluster (mainnet-beta, testnet, devnet) is pinned to its genesis hash so
//! that chain identity can be determined without asking the RPC node. The generic
//! clusters ([`Cluster::Simd296`] and [`Cluster::Custom`]) carry no genesis hash of their
//! own; callers must supply one, and it is matched against [`genesis_hashes`].
//!
//! # Examples
//!
//! ```
//! use explorer_tokens_types::chain::Cluster;
//! use explorer_tokens_types::networks::{cluster_by_slug, cluster_info};
//!
//! assert_eq!(cluster_by_slug("devnet"), Some(Cluster::Devnet));
//! assert_eq!(
//!     cluster_info(Cluster::MainnetBeta).genesis_hash,
//!     Some("5eykt4UsFv8P8NJdTREpY1vzqKqZKvdpKuc147dw2N9d")
//! );
//! ```

use crate::chain::Cluster;

/// The CAIP-2 namespace for Solana chains.
pub const SOLANA_NAMESPACE: &str = "solana";

/// Genesis hashes of the public clusters.
///
/// Fixed values avoid an extra `getGenesisHash` round trip for the well-known clusters.
pub mod genesis_hashes {
    pub const DEVNET: &str = "EtWTRABZaYq6iMfeYKouRu166VU2xqa1wcaWoxPkrZBG";
    pub const MAINNET: &str = "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdpKuc147dw2N9d";
    pub const TESTNET: &str = "4uhcVJyU9pJkvQyS88uRDiswHXSCkY3zQawwpjk2NsNY";
}

/// Static description of a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterInfo {
    pub cluster: Cluster,
    /// URL-friendly name (e.g., "mainnet-beta")
    pub slug: &'static str,
    /// Genesis hash for fixed clusters
    pub genesis_hash: Option<&'static str>,
}

static KNOWN_CLUSTERS: &[ClusterInfo] = &[
    ClusterInfo {
        cluster: Cluster::MainnetBeta,
        slug: "mainnet-beta",
        genesis_hash: Some(genesis_hashes::MAINNET),
    },
    ClusterInfo {
        cluster: Cluster::Testnet,
        slug: "testnet",
        genesis_hash: Some(genesis_hashes::TESTNET),
    },
    ClusterInfo {
        cluster: Cluster::Devnet,
        slug: "devnet",
        genesis_hash: Some(genesis_hashes::DEVNET),
    },
    ClusterInfo {
        cluster: Cluster::Simd296,
        slug: "simd296",
        genesis_hash: None,
    },
    ClusterInfo {
        cluster: Cluster::Custom,
        slug: "custom",
        genesis_hash: None,
    },
];

/// Returns the static description of `cluster`.
pub fn cluster_info(cluster: Cluster) -> &'static ClusterInfo {
    // KNOWN_CLUSTERS is indexed by discriminant.
    &KNOWN_CLUSTERS[cluster.as_u8() as usize]
}

/// Looks up a cluster by its slug. Case-sensitive.
pub fn cluster_by_slug(slug: &str) -> Option<Cluster> {
    KNOWN_CLUSTERS
        .iter()
        .find(|info| info.slug == slug)
        .map(|info| info.cluster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_indexed_by_discriminant() {
        for cluster in Cluster::ALL {
            assert_eq!(cluster_info(cluster).cluster, cluster);
        }
    }

    #[test]
    fn test_cluster_by_slug() {
        for cluster in Cluster::ALL {
            assert_eq!(cluster_by_slug(cluster_info(cluster).slug), Some(cluster));
        }
        assert_eq!(cluster_by_slug("Devnet"), None);
        assert_eq!(cluster_by_slug("localnet"), None);
    }

    #[test]
    fn test_only_fixed_clusters_have_genesis_hashes() {
        for cluster in Cluster::ALL {
            assert_eq!(
                cluster_info(cluster).genesis_hash.is_some(),
                cluster.is_fixed()
            );
        }
    }
}
