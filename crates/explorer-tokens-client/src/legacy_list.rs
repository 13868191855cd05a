//! Client for the frozen legacy token list served from a CDN.
//!
//! The list is a single large JSON document (`{ "tokens": [...] }`). It no longer
//! changes, so a downloaded copy is kept for [`LegacyTokenListClient::DEFAULT_CACHE_TTL`].

use explorer_tokens_types::chain::ChainId;
use explorer_tokens_types::token::{LegacyTokenInfo, LegacyTokenList};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::instrument;
use url::Url;

use crate::error::ClientBuildError;

#[derive(Debug, thiserror::Error)]
pub enum LegacyTokenListError {
    #[error("Failed to fetch legacy token list: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Legacy token list request failed: HTTP {0}")]
    Status(u16),
    #[error("Failed to decode legacy token list: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug)]
struct TokenListCacheState {
    list: Arc<LegacyTokenList>,
    expires_at: Instant,
}

/// TTL cache of the downloaded list.
///
/// Each clone has an independent cache state. Refreshes are serialized, so a cold
/// cache is filled by a single download however many lookups are waiting on it.
#[derive(Debug)]
pub struct TokenListCache {
    ttl: Duration,
    state: RwLock<Option<TokenListCacheState>>,
    refresh: Mutex<()>,
}

impl TokenListCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub async fn get(&self) -> Option<Arc<LegacyTokenList>> {
        let guard = self.state.read().await;
        let cache = guard.as_ref()?;
        if Instant::now() < cache.expires_at {
            Some(cache.list.clone())
        } else {
            None
        }
    }

    pub async fn set(&self, list: Arc<LegacyTokenList>) {
        let mut guard = self.state.write().await;
        *guard = Some(TokenListCacheState {
            list,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Returns the cached list, or stores and returns the result of `fetch`.
    ///
    /// Callers arriving while a refresh is running wait for it and reuse its list.
    /// A failed refresh is not cached.
    pub async fn get_or_refresh<F, Fut, E>(&self, fetch: F) -> Result<Arc<LegacyTokenList>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<LegacyTokenList, E>>,
    {
        if let Some(list) = self.get().await {
            return Ok(list);
        }
        let _refresh = self.refresh.lock().await;
        if let Some(list) = self.get().await {
            return Ok(list);
        }
        let list = Arc::new(fetch().await?);
        self.set(list.clone()).await;
        Ok(list)
    }
}

impl Clone for TokenListCache {
    fn clone(&self) -> Self {
        Self::new(self.ttl)
    }
}

/// Reads entries of the legacy token list.
#[derive(Clone, Debug)]
pub struct LegacyTokenListClient {
    url: Url,
    client: Client,
    cache: Arc<TokenListCache>,
}

impl LegacyTokenListClient {
    pub const DEFAULT_URL: &'static str =
        "https://cdn.jsdelivr.net/gh/solana-labs/token-list@latest/src/tokens/solana.tokenlist.json";
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: Client::new(),
            cache: Arc::new(TokenListCache::new(Self::DEFAULT_CACHE_TTL)),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn with_http_client(&self, client: Client) -> Self {
        let mut this = self.clone();
        this.client = client;
        this
    }

    /// Replaces the cache, dropping anything downloaded so far.
    pub fn with_cache_ttl(&self, ttl: Duration) -> Self {
        let mut this = self.clone();
        this.cache = Arc::new(TokenListCache::new(ttl));
        this
    }

    /// Looks up `address` on `chain_id`.
    ///
    /// Matching requires both the address and the chain id to be equal.
    pub async fn get_token_info(
        &self,
        address: &str,
        chain_id: ChainId,
    ) -> Result<Option<LegacyTokenInfo>, LegacyTokenListError> {
        let list = self.fetch_list().await?;
        Ok(list.find(address, chain_id).cloned())
    }

    /// Returns the whole list, downloading it when the cached copy is missing or stale.
    #[instrument(name = "explorer_tokens.legacy_list.fetch", skip_all, fields(url = %self.url))]
    pub async fn fetch_list(&self) -> Result<Arc<LegacyTokenList>, LegacyTokenListError> {
        self.cache.get_or_refresh(|| self.download()).await
    }

    async fn download(&self) -> Result<LegacyTokenList, LegacyTokenListError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(LegacyTokenListError::Request)?;
        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(LegacyTokenListError::Status(status.as_u16()));
        }
        let list = response
            .json::<LegacyTokenList>()
            .await
            .map_err(LegacyTokenListError::Decode)?;
        tracing::debug!(count = list.tokens.len(), "Legacy token list downloaded");
        Ok(list)
    }
}

impl TryFrom<&str> for LegacyTokenListClient {
    type Error = ClientBuildError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let url = Url::parse(value).map_err(|e| ClientBuildError::UrlParse {
            context: "Failed to parse token list url",
            source: e,
        })?;
        Ok(Self::new(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WSOL: &str = "So11111111111111111111111111111111111111112";

    fn list_body() -> serde_json::Value {
        json!({
            "name": "Solana Token List",
            "tokens": [
                {
                    "chainId": 101,
                    "address": WSOL,
                    "symbol": "SOL",
                    "name": "Wrapped SOL",
                    "decimals": 9,
                    "logoURI": "https://example.com/sol.png",
                    "tags": ["wrapped"],
                    "extensions": { "website": "https://solana.com", "coingeckoId": "solana" }
                },
                {
                    "chainId": 103,
                    "address": WSOL,
                    "symbol": "SOL",
                    "name": "Wrapped SOL (devnet)",
                    "decimals": 9
                }
            ]
        })
    }

    fn client(server: &MockServer) -> LegacyTokenListClient {
        LegacyTokenListClient::try_from(format!("{}/tokens.json", server.uri()).as_str()).unwrap()
    }

    #[tokio::test]
    async fn test_matches_address_and_chain() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
            .mount(&server)
            .await;

        let client = client(&server);
        let mainnet = client.get_token_info(WSOL, ChainId::Mainnet).await.unwrap().unwrap();
        assert_eq!(mainnet.name, "Wrapped SOL");
        assert_eq!(
            mainnet.extensions.unwrap().coingecko_id.as_deref(),
            Some("solana")
        );
        let devnet = client.get_token_info(WSOL, ChainId::Devnet).await.unwrap().unwrap();
        assert_eq!(devnet.name, "Wrapped SOL (devnet)");
        assert!(client.get_token_info(WSOL, ChainId::Testnet).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_downloaded_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        for _ in 0..3 {
            assert!(client.get_token_info(WSOL, ChainId::Mainnet).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_concurrent_cold_lookups_share_one_download() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(list_body())
                    .set_delay(Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let (mainnet, devnet, missing) = tokio::join!(
            client.get_token_info(WSOL, ChainId::Mainnet),
            client.get_token_info(WSOL, ChainId::Devnet),
            client.get_token_info(WSOL, ChainId::Testnet),
        );
        assert!(mainnet.unwrap().is_some());
        assert!(devnet.unwrap().is_some());
        assert!(missing.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_download_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens.json"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tokens.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let result = client.get_token_info(WSOL, ChainId::Mainnet).await;
        assert!(matches!(result, Err(LegacyTokenListError::Status(503))));
        assert!(client.get_token_info(WSOL, ChainId::Mainnet).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client(&server).get_token_info(WSOL, ChainId::Mainnet).await;
        assert!(matches!(result, Err(LegacyTokenListError::Status(404))));
    }

    #[tokio::test]
    async fn test_malformed_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client(&server).fetch_list().await;
        assert!(matches!(result, Err(LegacyTokenListError::Decode(_))));
    }

    #[tokio::test]
    async fn test_expired_cache_is_refreshed() {
        let cache = TokenListCache::new(Duration::from_millis(10));
        cache.set(Arc::new(LegacyTokenList::default())).await;
        assert!(cache.get().await.is_some());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.get().await.is_none());
    }
}
