//! Token lookups as the explorer front end performs them.
//!
//! Public clusters are served through the explorer's own API route, which is cached
//! and talks to the metadata service. Custom and local clusters are invisible to that
//! service, so their mints are read directly from the cluster's RPC endpoint.

use explorer_tokens_types::chain::{ChainId, Cluster};
use explorer_tokens_types::token::TokenInfo;
use solana_client::nonblocking::rpc_client::RpcClient;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::instrument;
use url::{Host, Url};

use crate::api_route::ApiRouteClient;
use crate::on_chain::{MintAccountsFetcher, OnChainTokenSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTransport {
    /// Read the mint through the cluster's RPC endpoint.
    OnChain,
    /// Ask the explorer's `/api/token-info` route.
    ApiRoute,
}

/// Whether `url` points at this machine.
pub fn is_local_url(url: &str) -> bool {
    let Ok(url) = Url::parse(url) else {
        return false;
    };
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
        Some(Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
        None => false,
    }
}

pub fn select_transport(cluster: Cluster, url: &str) -> TokenTransport {
    if cluster == Cluster::Custom || is_local_url(url) {
        TokenTransport::OnChain
    } else {
        TokenTransport::ApiRoute
    }
}

/// Client-side token lookup with transport selection.
#[derive(Clone, Debug)]
pub struct ExplorerTokenInfo {
    api: ApiRouteClient,
}

impl ExplorerTokenInfo {
    pub fn new(api: ApiRouteClient) -> Self {
        Self { api }
    }

    /// Looks up `address` on the cluster served at `url`.
    ///
    /// Every failure is logged and reported as `None`.
    pub async fn get_token_info(
        &self,
        address: &str,
        cluster: Cluster,
        url: &str,
        genesis_hash: Option<&str>,
    ) -> Option<TokenInfo> {
        self.get_token_info_with(address, cluster, url, genesis_hash, |url| {
            Arc::new(RpcClient::new(url.to_string()))
        })
        .await
    }

    /// Same as [`ExplorerTokenInfo::get_token_info`] with a custom RPC client factory.
    #[instrument(name = "explorer_tokens.explorer.get_token_info", skip_all, fields(address = %address, cluster = %cluster))]
    pub async fn get_token_info_with<R, F>(
        &self,
        address: &str,
        cluster: Cluster,
        url: &str,
        genesis_hash: Option<&str>,
        connect: F,
    ) -> Option<TokenInfo>
    where
        R: MintAccountsFetcher,
        F: FnOnce(&str) -> R,
    {
        let chain_id = ChainId::resolve(cluster, genesis_hash)?;
        match select_transport(cluster, url) {
            TokenTransport::OnChain => {
                let source = OnChainTokenSource::new(connect(url));
                match source.get_token_info(address).await {
                    Ok(info) => info.map(|info| TokenInfo {
                        chain_id: Some(chain_id.as_u16()),
                        ..info
                    }),
                    Err(error) => {
                        tracing::warn!(error = %error, "On-chain token lookup failed");
                        None
                    }
                }
            }
            TokenTransport::ApiRoute => match self.api.get_token_info(address, cluster, genesis_hash).await {
                Ok(info) => info,
                Err(error) => {
                    tracing::warn!(error = %error, "Token info route lookup failed");
                    None
                }
            },
        }
    }
}
