//! Token detail lookups combining the metadata service with the legacy token list.

use explorer_tokens_types::chain::{ChainId, Cluster};
use explorer_tokens_types::token::FullTokenInfo;
use tracing::instrument;

use crate::denylist::RedactedTokens;
use crate::fetch_config::FetchConfig;
use crate::legacy_list::LegacyTokenListClient;
use crate::utl_client::UtlClient;

/// Resolves [`FullTokenInfo`] records.
///
/// Both sources are queried concurrently. A failing source counts as "no data" for its
/// half of the merge, so one outage never hides what the other source knows.
#[derive(Clone, Debug)]
pub struct FullTokenInfoResolver {
    utl: UtlClient,
    legacy: LegacyTokenListClient,
    redacted: RedactedTokens,
}

impl FullTokenInfoResolver {
    pub fn new(utl: UtlClient, legacy: LegacyTokenListClient) -> Self {
        Self {
            utl,
            legacy,
            redacted: RedactedTokens::default(),
        }
    }

    pub fn with_redacted_tokens(mut self, redacted: RedactedTokens) -> Self {
        self.redacted = redacted;
        self
    }

    pub fn utl_client(&self) -> &UtlClient {
        &self.utl
    }

    pub fn redacted_tokens(&self) -> &RedactedTokens {
        &self.redacted
    }

    #[instrument(name = "explorer_tokens.full_token_info", skip_all, fields(address = %address, cluster = %cluster, chain = tracing::field::Empty))]
    pub async fn get_full_token_info(
        &self,
        address: &str,
        cluster: Cluster,
        genesis_hash: Option<&str>,
        config: &FetchConfig,
    ) -> Option<FullTokenInfo> {
        if self.redacted.contains(address) {
            tracing::debug!("Token is redacted");
            return None;
        }
        let chain_id = ChainId::resolve(cluster, genesis_hash)?;
        tracing::Span::current().record("chain", chain_id.caip2().as_str());

        let (legacy, primary) = tokio::join!(
            async {
                self.legacy
                    .get_token_info(address, chain_id)
                    .await
                    .unwrap_or_else(|error| {
                        tracing::error!(error = %error, "Legacy token list lookup failed");
                        None
                    })
            },
            self.utl.fetch_token_info(address, cluster, genesis_hash, config),
        );

        FullTokenInfo::merge(primary, legacy, chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_tokens_types::networks::genesis_hashes;
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WSOL: &str = "So11111111111111111111111111111111111111112";

    fn primary_body(tags: Option<Value>) -> Value {
        let mut token = json!({
            "address": WSOL,
            "name": "Wrapped SOL (service)",
            "symbol": "wSOL",
            "decimals": 9,
            "logoURI": "https://service.example/sol.png",
            "verified": false
        });
        if let Some(tags) = tags {
            token["tags"] = tags;
        }
        json!({ "content": [token] })
    }

    fn legacy_body() -> Value {
        json!({
            "tokens": [{
                "chainId": 101,
                "address": WSOL,
                "symbol": "SOL",
                "name": "Wrapped SOL",
                "decimals": 9,
                "logoURI": "https://cdn.example/sol.png",
                "tags": ["wrapped-sol"],
                "extensions": { "website": "https://solana.com" }
            }]
        })
    }

    async fn mount_primary(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/v1/mints"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    async fn mount_legacy(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/tokens.json"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    fn resolver(server: &MockServer) -> FullTokenInfoResolver {
        let utl = UtlClient::try_from(server.uri()).unwrap();
        let legacy =
            LegacyTokenListClient::try_from(format!("{}/tokens.json", server.uri()).as_str()).unwrap();
        FullTokenInfoResolver::new(utl, legacy)
    }

    async fn lookup(resolver: &FullTokenInfoResolver, cluster: Cluster) -> Option<FullTokenInfo> {
        resolver
            .get_full_token_info(WSOL, cluster, None, &FetchConfig::default())
            .await
    }

    #[tokio::test]
    async fn test_primary_wins_and_legacy_adds_extensions() {
        let server = MockServer::start().await;
        mount_primary(&server, ResponseTemplate::new(200).set_body_json(primary_body(None))).await;
        mount_legacy(&server, ResponseTemplate::new(200).set_body_json(legacy_body())).await;

        let info = lookup(&resolver(&server), Cluster::MainnetBeta).await.unwrap();
        assert_eq!(info.chain_id, 101);
        assert_eq!(info.name, "Wrapped SOL (service)");
        assert_eq!(info.symbol, "wSOL");
        assert_eq!(info.logo_uri.as_deref(), Some("https://service.example/sol.png"));
        assert!(!info.verified);
        assert_eq!(info.tags, vec!["wrapped-sol".to_string()]);
        assert_eq!(
            info.extensions.unwrap().website.as_deref(),
            Some("https://solana.com")
        );
    }

    #[tokio::test]
    async fn test_empty_primary_tags_win() {
        let server = MockServer::start().await;
        mount_primary(
            &server,
            ResponseTemplate::new(200).set_body_json(primary_body(Some(json!([])))),
        )
        .await;
        mount_legacy(&server, ResponseTemplate::new(200).set_body_json(legacy_body())).await;

        let info = lookup(&resolver(&server), Cluster::MainnetBeta).await.unwrap();
        assert!(info.tags.is_empty());
    }

    #[tokio::test]
    async fn test_legacy_only_is_verified() {
        let server = MockServer::start().await;
        mount_primary(&server, ResponseTemplate::new(200).set_body_json(json!({ "content": [] }))).await;
        mount_legacy(&server, ResponseTemplate::new(200).set_body_json(legacy_body())).await;

        let info = lookup(&resolver(&server), Cluster::MainnetBeta).await.unwrap();
        assert_eq!(info.name, "Wrapped SOL");
        assert!(info.verified);
        assert_eq!(info.chain_id, 101);
    }

    #[tokio::test]
    async fn test_legacy_failure_keeps_primary() {
        let server = MockServer::start().await;
        mount_primary(&server, ResponseTemplate::new(200).set_body_json(primary_body(None))).await;
        mount_legacy(&server, ResponseTemplate::new(503)).await;

        let info = lookup(&resolver(&server), Cluster::MainnetBeta).await.unwrap();
        assert_eq!(info.name, "Wrapped SOL (service)");
        assert!(info.tags.is_empty());
        assert!(info.extensions.is_none());
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back_to_legacy() {
        let server = MockServer::start().await;
        mount_primary(&server, ResponseTemplate::new(500)).await;
        mount_legacy(&server, ResponseTemplate::new(200).set_body_json(legacy_body())).await;

        let info = lookup(&resolver(&server), Cluster::MainnetBeta).await.unwrap();
        assert!(info.verified);
        assert_eq!(info.symbol, "SOL");
    }

    #[tokio::test]
    async fn test_neither_source_knows_the_token() {
        let server = MockServer::start().await;
        mount_primary(&server, ResponseTemplate::new(200).set_body_json(json!({ "content": [] }))).await;
        mount_legacy(&server, ResponseTemplate::new(200).set_body_json(json!({ "tokens": [] }))).await;

        assert!(lookup(&resolver(&server), Cluster::MainnetBeta).await.is_none());
    }

    #[tokio::test]
    async fn test_redacted_token_skips_the_network() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let resolver = resolver(&server).with_redacted_tokens(RedactedTokens::parse(&format!(" {WSOL} ")));
        assert!(lookup(&resolver, Cluster::MainnetBeta).await.is_none());
    }

    #[tokio::test]
    async fn test_unresolved_chain_skips_the_network() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        assert!(lookup(&resolver(&server), Cluster::Custom).await.is_none());
    }

    #[tokio::test]
    async fn test_custom_cluster_with_genesis_hash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/mints"))
            .and(query_param("chainId", "101"))
            .respond_with(ResponseTemplate::new(200).set_body_json(primary_body(None)))
            .expect(1)
            .mount(&server)
            .await;
        mount_legacy(&server, ResponseTemplate::new(200).set_body_json(legacy_body())).await;

        let info = resolver(&server)
            .get_full_token_info(
                WSOL,
                Cluster::Custom,
                Some(genesis_hashes::MAINNET),
                &FetchConfig::default(),
            )
            .await
            .unwrap();
        assert_eq!(info.chain_id, 101);
        assert_eq!(info.extensions.unwrap().website.as_deref(), Some("https://solana.com"));
    }
}
