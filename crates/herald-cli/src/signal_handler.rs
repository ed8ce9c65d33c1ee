//! Ctrl+C handling

use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancels a token on SIGINT or SIGTERM
pub struct ShutdownSignal {
    token: CancellationToken,
    task_handle: JoinHandle<()>,
}

impl ShutdownSignal {
    /// Start listening for termination signals
    pub fn install() -> std::io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let token = CancellationToken::new();
        let cancel = token.clone();

        let task_handle = tokio::spawn(async move {
            if let Some(signal) = signals.next().await {
                info!(signal, "Shutdown requested");
                cancel.cancel();
            }
        });

        Ok(Self { token, task_handle })
    }

    /// Token cancelled once a signal arrives
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for ShutdownSignal {
    fn drop(&mut self) {
        self.task_handle.abort();
    }
}
