//! Client for the explorer's own `POST /api/token-info` route.

use explorer_tokens_types::chain::Cluster;
use explorer_tokens_types::token::TokenInfo;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::error::{ClientBuildError, join, normalize_base_url};

#[derive(Debug, thiserror::Error)]
pub enum ApiRouteError {
    #[error("Token info route request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Token info route returned HTTP {0}")]
    Status(u16),
    #[error("Failed to decode token info route response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenInfoRouteRequest<'a> {
    address: &'a str,
    cluster: Cluster,
    #[serde(skip_serializing_if = "Option::is_none")]
    genesis_hash: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TokenInfoRouteResponse {
    #[serde(default)]
    content: Option<TokenInfo>,
}

/// Calls the token info route of an explorer deployment.
#[derive(Clone, Debug)]
pub struct ApiRouteClient {
    base_url: Url,
    token_info_url: Url,
    client: Client,
    timeout: Option<Duration>,
}

impl ApiRouteClient {
    pub fn try_new(base_url: Url) -> Result<Self, ClientBuildError> {
        let token_info_url = join(&base_url, "./api/token-info", "Failed to construct ./api/token-info URL")?;
        Ok(Self {
            base_url,
            token_info_url,
            client: Client::new(),
            timeout: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token_info_url(&self) -> &Url {
        &self.token_info_url
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut this = self.clone();
        this.timeout = Some(timeout);
        this
    }

    /// Asks the route for `address`.
    ///
    /// `Ok(None)` when the route answers without `content`.
    #[instrument(name = "explorer_tokens.api_route.get_token_info", skip_all, fields(address = %address, cluster = %cluster))]
    pub async fn get_token_info(
        &self,
        address: &str,
        cluster: Cluster,
        genesis_hash: Option<&str>,
    ) -> Result<Option<TokenInfo>, ApiRouteError> {
        let mut req = self.client.post(self.token_info_url.clone()).json(&TokenInfoRouteRequest {
            address,
            cluster,
            genesis_hash,
        });
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let response = req.send().await.map_err(ApiRouteError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiRouteError::Status(status.as_u16()));
        }
        let body = response
            .json::<TokenInfoRouteResponse>()
            .await
            .map_err(ApiRouteError::Decode)?;
        Ok(body.content)
    }
}

impl TryFrom<&str> for ApiRouteClient {
    type Error = ClientBuildError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ApiRouteClient::try_new(normalize_base_url(value)?)
    }
}

impl TryFrom<String> for ApiRouteClient {
    type Error = ClientBuildError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ApiRouteClient::try_from(value.as_str())
    }
}
