#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Token metadata clients for the Solana explorer.
//!
//! - [`UtlClient`] - batched lookups against the token metadata service
//! - [`LegacyTokenListClient`] - the frozen legacy token list on the CDN
//! - [`FullTokenInfoResolver`] - both of the above, merged into a [`FullTokenInfo`](explorer_tokens_types::token::FullTokenInfo)
//! - [`OnChainTokenSource`] - mint and Metaplex metadata accounts read over RPC
//! - [`ExplorerTokenInfo`] - picks between the RPC path and the explorer's API route
//!
//! ## Example
//!
//! ```rust,no_run
//! use explorer_tokens_client::{FetchConfig, UtlClient};
//! use explorer_tokens_types::chain::Cluster;
//!
//! # async fn run() {
//! let client = UtlClient::try_from(UtlClient::DEFAULT_BASE_URL).unwrap();
//! let addresses = vec!["So11111111111111111111111111111111111111112".to_string()];
//! let tokens = client
//!     .fetch_token_infos(&addresses, Cluster::MainnetBeta, None, &FetchConfig::default())
//!     .await;
//! # }
//! ```

pub mod api_route;
pub mod denylist;
pub mod error;
pub mod explorer;
pub mod fetch_config;
pub mod full_token_info;
pub mod legacy_list;
pub mod on_chain;
pub mod utl_client;

pub use api_route::{ApiRouteClient, ApiRouteError};
pub use denylist::RedactedTokens;
pub use error::{ClientBuildError, TokenInfoError, TransportError};
pub use explorer::{ExplorerTokenInfo, TokenTransport, select_transport};
pub use fetch_config::{CacheHint, ErrorObserver, FetchConfig};
pub use full_token_info::FullTokenInfoResolver;
pub use legacy_list::{LegacyTokenListClient, LegacyTokenListError};
pub use on_chain::{MintAccountsFetcher, OnChainError, OnChainTokenSource};
pub use utl_client::UtlClient;
