//! HTTP endpoints of the token info server.
//!
//! - `POST /api/token-info` - metadata service record for one mint
//! - `POST /api/full-token-info` - record merged with the legacy token list
//! - `GET /health` - liveness probe
//!
//! Both lookup routes take `{ "address": string, "cluster": number, "genesisHash"?: string }`
//! and answer `{ "content": ... }`, with `content` absent when the token is unknown.
//! A non-string address or an unsupported cluster yields
//! `400 { "error": "Invalid request" }`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use explorer_tokens_client::{CacheHint, FetchConfig, FullTokenInfoResolver, UtlClient};
use explorer_tokens_types::cache_key::TokenInfoKey;
use explorer_tokens_types::chain::{Cluster, is_valid_cluster};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::instrument;

use crate::response_cache::ResponseCache;

/// Shared state of the lookup routes.
#[derive(Debug, Clone)]
pub struct AppState {
    utl: UtlClient,
    full_token_info: FullTokenInfoResolver,
    cache: ResponseCache,
}

impl AppState {
    pub fn new(full_token_info: FullTokenInfoResolver, cache: ResponseCache) -> Self {
        Self {
            utl: full_token_info.utl_client().clone(),
            full_token_info,
            cache,
        }
    }

    fn fetch_config(&self) -> FetchConfig {
        FetchConfig::new().with_cache(CacheHint {
            revalidate: self.cache.ttl(),
        })
    }

    fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache.ttl().as_secs())
    }
}

pub type SharedState = Arc<AppState>;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/health", get(get_health))
        .route("/api/token-info", post(post_token_info))
        .route("/api/full-token-info", post(post_full_token_info))
}

/// Raw request body; every field is checked by hand so malformed input maps to one error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfoRequest {
    #[serde(default)]
    pub address: Value,
    #[serde(default)]
    pub cluster: Value,
    #[serde(default)]
    pub genesis_hash: Value,
}

/// A request that passed validation.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidTokenInfoRequest<'a> {
    pub address: &'a str,
    pub cluster: Cluster,
    pub genesis_hash: Option<&'a str>,
}

impl TokenInfoRequest {
    /// `None` when the address is not a string or the cluster is unsupported.
    pub fn validate(&self) -> Option<ValidTokenInfoRequest<'_>> {
        let address = self.address.as_str()?;
        let genesis_hash = self.genesis_hash.as_str();
        let cluster = is_valid_cluster(&self.cluster, genesis_hash)?;
        Some(ValidTokenInfoRequest {
            address,
            cluster,
            genesis_hash,
        })
    }
}

#[derive(Debug, Serialize)]
struct ContentResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<T>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

fn invalid_request() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Invalid request",
        }),
    )
        .into_response()
}

#[instrument(skip_all)]
pub async fn get_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// `POST /api/token-info`
#[instrument(skip_all)]
pub async fn post_token_info(
    State(state): State<SharedState>,
    body: Result<Json<TokenInfoRequest>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected token info request body");
            return invalid_request();
        }
    };
    let Some(request) = body.validate() else {
        return invalid_request();
    };

    let key = TokenInfoKey::new(request.address, request.cluster, request.genesis_hash);
    let content = match state.cache.get(&key) {
        Some(content) => content,
        None => {
            let config = state.fetch_config();
            let addresses = [request.address.to_string()];
            // Only answers the service actually gave are cached, misses included.
            match state
                .utl
                .try_fetch_token_infos(&addresses, request.cluster, request.genesis_hash, &config)
                .await
            {
                Ok(tokens) => {
                    let content = tokens.into_iter().next();
                    state.cache.insert(key, content.clone());
                    content
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Token info request failed");
                    config.report(&error);
                    None
                }
            }
        }
    };

    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, state.cache_control())],
        Json(ContentResponse { content }),
    )
        .into_response()
}

/// `POST /api/full-token-info`
#[instrument(skip_all)]
pub async fn post_full_token_info(
    State(state): State<SharedState>,
    body: Result<Json<TokenInfoRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return invalid_request();
    };
    let Some(request) = body.validate() else {
        return invalid_request();
    };

    let content = state
        .full_token_info
        .get_full_token_info(
            request.address,
            request.cluster,
            request.genesis_hash,
            &state.fetch_config(),
        )
        .await;

    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, state.cache_control())],
        Json(ContentResponse { content }),
    )
        .into_response()
}
