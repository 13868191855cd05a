use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::TokenInfoError;

/// Callback invoked with every recoverable request failure.
pub type ErrorObserver = Arc<dyn Fn(&TokenInfoError) + Send + Sync>;

/// Caching hint forwarded to the metadata service as `Cache-Control: max-age=<secs>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheHint {
    pub revalidate: Duration,
}

impl CacheHint {
    pub const fn revalidate_secs(secs: u64) -> Self {
        Self {
            revalidate: Duration::from_secs(secs),
        }
    }

    pub fn header_value(&self) -> String {
        format!("max-age={}", self.revalidate.as_secs())
    }
}

/// Per-call options for [`UtlClient`](crate::UtlClient) requests.
#[derive(Clone, Default)]
pub struct FetchConfig {
    /// Abandons the request when cancelled.
    pub signal: Option<CancellationToken>,
    /// Overrides the client's default timeout.
    pub timeout: Option<Duration>,
    pub cache: Option<CacheHint>,
    pub on_error: Option<ErrorObserver>,
}

impl FetchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cache(mut self, cache: CacheHint) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_on_error<F>(mut self, on_error: F) -> Self
    where
        F: Fn(&TokenInfoError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(on_error));
        self
    }

    pub fn report(&self, error: &TokenInfoError) {
        if let Some(on_error) = &self.on_error {
            on_error(error);
        }
    }
}

impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("signal", &self.signal)
            .field("timeout", &self.timeout)
            .field("cache", &self.cache)
            .field("on_error", &self.on_error.as_ref().map(|_| "<observer>"))
            .finish()
    }
}
