//! Client for the token metadata service (the "unified token list" API).
//!
//! [`UtlClient`] resolves the chain of a cluster, then asks the service for a batch of
//! mints with a single `POST /v1/mints?chainId=<id>` request.
//!
//! ## Example
//!
//! ```rust
//! use explorer_tokens_client::UtlClient;
//!
//! let client = UtlClient::try_from("https://token-list-api.solana.cloud").unwrap();
//! assert_eq!(client.mints_url().as_str(), "https://token-list-api.solana.cloud/v1/mints");
//! ```
//!
//! ## Error Handling
//!
//! Failures never escape [`UtlClient::fetch_token_infos`]. They are classified as
//! - transport failures (connection errors, timeouts, cancellation),
//! - HTTP failures (non-2xx status),
//! - invalid responses (2xx without a `content` array),
//!
//! reported once through [`FetchConfig::on_error`], logged, and turned into an
//! empty result. [`UtlClient::try_fetch_token_infos`] exposes the same request as a
//! plain `Result`.

use explorer_tokens_types::chain::{ChainId, Cluster};
use explorer_tokens_types::token::TokenInfo;
use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::error::{ClientBuildError, TokenInfoError, TransportError, join, normalize_base_url};
use crate::fetch_config::FetchConfig;

/// Request body of `POST /v1/mints`.
#[derive(Debug, Serialize)]
struct MintsRequest<'a> {
    addresses: &'a [String],
}

/// Response body of `POST /v1/mints`.
#[derive(Debug, Deserialize)]
struct MintsResponse {
    content: Option<Vec<TokenInfo>>,
}

/// A client for the token metadata service.
#[derive(Clone, Debug)]
pub struct UtlClient {
    /// Base URL of the service (e.g. `https://token-list-api.solana.cloud/`)
    base_url: Url,
    /// Full URL of `POST /v1/mints`, without the query
    mints_url: Url,
    /// Shared Reqwest HTTP client
    client: Client,
    /// Timeout applied when the call does not override it
    timeout: Duration,
}

impl UtlClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://token-list-api.solana.cloud";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5_000);

    /// Constructs a client for `base_url`, with `./v1/mints` resolved against it.
    pub fn try_new(base_url: Url) -> Result<Self, ClientBuildError> {
        let mints_url = join(&base_url, "./v1/mints", "Failed to construct ./v1/mints URL")?;
        Ok(Self {
            base_url,
            mints_url,
            client: Client::new(),
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn mints_url(&self) -> &Url {
        &self.mints_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sets the default timeout for all future requests.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut this = self.clone();
        this.timeout = timeout;
        this
    }

    /// Reuses an existing connection pool.
    pub fn with_http_client(&self, client: Client) -> Self {
        let mut this = self.clone();
        this.client = client;
        this
    }

    /// Fetches metadata for `addresses` on `cluster`.
    ///
    /// Returns an empty list without touching the network when `addresses` is empty or
    /// the chain cannot be resolved. Any failure is reported to `config.on_error` and
    /// yields an empty list.
    ///
    /// The service decides the order of the returned records; match them by `address`.
    #[instrument(name = "explorer_tokens.utl_client.fetch_token_infos", skip_all, fields(cluster = %cluster, count = addresses.len()))]
    pub async fn fetch_token_infos(
        &self,
        addresses: &[String],
        cluster: Cluster,
        genesis_hash: Option<&str>,
        config: &FetchConfig,
    ) -> Vec<TokenInfo> {
        match self
            .try_fetch_token_infos(addresses, cluster, genesis_hash, config)
            .await
        {
            Ok(tokens) => tokens,
            Err(error) => {
                tracing::warn!(error = %error, "Token info request failed");
                config.report(&error);
                Vec::new()
            }
        }
    }

    /// Fetches metadata for a single mint.
    pub async fn fetch_token_info(
        &self,
        address: &str,
        cluster: Cluster,
        genesis_hash: Option<&str>,
        config: &FetchConfig,
    ) -> Option<TokenInfo> {
        let addresses = [address.to_string()];
        self.fetch_token_infos(&addresses, cluster, genesis_hash, config)
            .await
            .into_iter()
            .next()
    }

    /// Same request as [`UtlClient::fetch_token_infos`], with the failure returned
    /// instead of reported.
    pub async fn try_fetch_token_infos(
        &self,
        addresses: &[String],
        cluster: Cluster,
        genesis_hash: Option<&str>,
        config: &FetchConfig,
    ) -> Result<Vec<TokenInfo>, TokenInfoError> {
        if addresses.is_empty() {
            return Ok(Vec::new());
        }
        let Some(chain_id) = ChainId::resolve(cluster, genesis_hash) else {
            tracing::debug!(cluster = %cluster, "Unresolvable chain, skipping token info request");
            return Ok(Vec::new());
        };
        tracing::debug!(chain = %chain_id.caip2(), "Requesting token info");

        let request = self.post_mints(addresses, chain_id, config);
        let response = match &config.signal {
            Some(signal) => tokio::select! {
                biased;
                _ = signal.cancelled() => return Err(TransportError::Cancelled.into()),
                response = request => response?,
            },
            None => request.await?,
        };
        response.content.ok_or_else(TokenInfoError::missing_content)
    }

    /// Sends the request and decodes the body of a successful response.
    async fn post_mints(
        &self,
        addresses: &[String],
        chain_id: ChainId,
        config: &FetchConfig,
    ) -> Result<MintsResponse, TokenInfoError> {
        let mut url = self.mints_url.clone();
        url.query_pairs_mut()
            .append_pair("chainId", &chain_id.to_string());

        let mut req = self
            .client
            .post(url)
            .json(&MintsRequest { addresses })
            .timeout(config.timeout.unwrap_or(self.timeout));
        if let Some(cache) = config.cache {
            req = req.header(CACHE_CONTROL, cache.header_value());
        }

        let http_response = req.send().await.map_err(TransportError::from)?;
        let status = http_response.status();
        if !status.is_success() {
            return Err(TokenInfoError::http(status));
        }
        http_response.json::<MintsResponse>().await.map_err(|e| {
            if e.is_decode() {
                TokenInfoError::InvalidResponse(format!("Invalid response: {e}"))
            } else {
                TransportError::from(e).into()
            }
        })
    }
}

/// Parses and normalizes a base URL, then calls [`UtlClient::try_new`].
impl TryFrom<&str> for UtlClient {
    type Error = ClientBuildError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        UtlClient::try_new(normalize_base_url(value)?)
    }
}

impl TryFrom<String> for UtlClient {
    type Error = ClientBuildError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UtlClient::try_from(value.as_str())
    }
}
