use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Turns the first SIGTERM or SIGINT into a cancelled [`CancellationToken`].
///
/// The server hands [`SigDown::shutdown`] to axum so in-flight token lookups can finish
/// before the process exits.
pub struct SigDown {
    task_tracker: TaskTracker,
    cancellation_token: CancellationToken,
}

impl SigDown {
    /// Registers the signal handlers.
    pub fn try_new() -> Result<Self, std::io::Error> {
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let cancellation_token = CancellationToken::new();
        let task_tracker = TaskTracker::new();
        let token = cancellation_token.clone();
        task_tracker.spawn(async move {
            let name = tokio::select! {
                _ = sigterm.recv() => "SIGTERM",
                _ = sigint.recv() => "SIGINT",
                _ = token.cancelled() => return,
            };
            tracing::info!(signal = name, "Shutting down");
            token.cancel();
        });
        task_tracker.close();
        Ok(Self {
            task_tracker,
            cancellation_token,
        })
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Resolves once shutdown was requested.
    pub fn shutdown(&self) -> impl Future<Output = ()> + Send + 'static {
        let token = self.cancellation_token.clone();
        async move { token.cancelled().await }
    }

    /// Waits for shutdown and for the signal task to exit.
    pub async fn recv(&self) {
        self.cancellation_token.cancelled().await;
        self.task_tracker.wait().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_manual_cancel_stops_signal_task() {
        let sig_down = SigDown::try_new().unwrap();
        let shutdown = sig_down.shutdown();
        sig_down.cancellation_token().cancel();
        tokio::time::timeout(Duration::from_secs(1), shutdown).await.unwrap();
        tokio::time::timeout(Duration::from_secs(1), sig_down.recv()).await.unwrap();
    }
}
