use reqwest::StatusCode;

/// Failure of a token metadata request.
///
/// Every variant is recoverable: the clients report it through the
/// [`FetchConfig`](crate::FetchConfig) observer and hand back an empty result.
#[derive(Debug, thiserror::Error)]
pub enum TokenInfoError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The service answered with a status outside `200..=299`.
    ///
    /// `status_text` is the canonical reason phrase of `status`, not the phrase the
    /// server sent. HTTP/2 has no reason phrase at all.
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },
    /// The service answered successfully but broke the response contract.
    #[error("{0}")]
    InvalidResponse(String),
}

impl TokenInfoError {
    pub const MISSING_CONTENT: &'static str = "Invalid response: missing content";

    pub fn http(status: StatusCode) -> Self {
        TokenInfoError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    pub fn missing_content() -> Self {
        TokenInfoError::InvalidResponse(Self::MISSING_CONTENT.to_string())
    }
}

/// Network-level failures.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("request timed out")]
    TimedOut,
    #[error("request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            TransportError::TimedOut
        } else {
            TransportError::Request(value)
        }
    }
}

/// Errors raised while constructing a client.
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        context: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Normalizes a base URL so relative joins append to its path.
pub(crate) fn normalize_base_url(value: &str) -> Result<url::Url, ClientBuildError> {
    let mut normalized = value.trim_end_matches('/').to_string();
    normalized.push('/');
    url::Url::parse(&normalized).map_err(|e| ClientBuildError::UrlParse {
        context: "Failed to parse base url",
        source: e,
    })
}

pub(crate) fn join(base: &url::Url, path: &str, context: &'static str) -> Result<url::Url, ClientBuildError> {
    base.join(path)
        .map_err(|e| ClientBuildError::UrlParse { context, source: e })
}
