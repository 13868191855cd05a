//! Token info HTTP entrypoint.
//!
//! Endpoints:
//! - `POST /api/token-info` – Metadata of one mint from the token metadata service
//! - `POST /api/full-token-info` – Same, merged with the legacy token list
//! - `GET /health` – Liveness probe
//!
//! This server includes:
//! - OpenTelemetry tracing via `TraceLayer`
//! - CORS support for cross-origin clients
//! - An in-process TTL cache of token info answers
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `HOST`, `PORT` control binding address
//! - `UTL_API_BASE_URL`, `UTL_API_TIMEOUT_MS`, `TOKEN_LIST_URL`, `BAD_TOKENS` configure lookups
//! - `OTEL_*` variables enable tracing to systems like Honeycomb

use axum::Router;
use axum::http::Method;
use dotenvy::dotenv;
use explorer_tokens::config::Config;
use explorer_tokens::handlers::{self, AppState};
use explorer_tokens::response_cache::ResponseCache;
use explorer_tokens::util::{SigDown, Telemetry};
use explorer_tokens_client::{FullTokenInfoResolver, LegacyTokenListClient, UtlClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let telemetry = Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .register();

    let config = Config::load()?;

    let utl = UtlClient::try_from(config.utl_api_base_url())?.with_timeout(config.utl_api_timeout());
    let legacy = LegacyTokenListClient::try_from(config.token_list_url())?;
    let redacted = config.redacted_tokens();
    tracing::info!(
        utl = %utl.base_url(),
        token_list = %legacy.url(),
        redacted = redacted.len(),
        "Token sources configured"
    );
    let resolver = FullTokenInfoResolver::new(utl, legacy).with_redacted_tokens(redacted);
    let cache = ResponseCache::new(config.response_cache_ttl());
    let axum_state = Arc::new(AppState::new(resolver, cache.clone()));

    let http_endpoints = Router::new()
        .merge(handlers::routes().with_state(axum_state))
        .layer(telemetry.http_tracing())
        .layer(
            cors::CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(cors::Any),
        );

    let addr = SocketAddr::new(config.host(), config.port());
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| tracing::error!("Failed to bind to {}: {}", addr, e))?;

    let sig_down = SigDown::try_new()?;

    // Expired answers are dropped lazily on read; sweep the rest now and then.
    let sweep_token = sig_down.cancellation_token();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cache.ttl().max(std::time::Duration::from_secs(60)));
        loop {
            tokio::select! {
                _ = sweep_token.cancelled() => break,
                _ = interval.tick() => cache.purge_expired(),
            }
        }
    });

    axum::serve(listener, http_endpoints)
        .with_graceful_shutdown(sig_down.shutdown())
        .await?;

    Ok(())
}
