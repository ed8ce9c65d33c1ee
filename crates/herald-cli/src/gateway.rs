//! Gateway event pump
//!
//! Feeds JSON-lines gateway events into a started [`Bot`]. Bad lines are
//! logged and skipped; the pump ends at EOF or when the token is cancelled.

use futures::future::join_all;
use herald_core::bot::{Bot, GatewayEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Counters of one pump run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpStats {
    pub events: usize,
    pub skipped: usize,
}

/// Emit every event read from `reader` on the bot's event bus
///
/// Waits for the spawned handler tasks before returning.
pub async fn pump<R>(bot: &Bot, reader: R, shutdown: CancellationToken) -> anyhow::Result<PumpStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut stats = PumpStats::default();
    let mut in_flight: Vec<JoinHandle<()>> = Vec::new();

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Stopping event pump");
                break;
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            debug!("Gateway stream closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match GatewayEvent::parse_line(&line) {
            Ok(event) => {
                debug!(event = %event.name, "Gateway event");
                stats.events += 1;
                in_flight.retain(|handle| !handle.is_finished());
                in_flight.extend(bot.handle(event));
            }
            Err(e) => {
                warn!(error = %e, "Skipping gateway line");
                stats.skipped += 1;
            }
        }
    }

    join_all(in_flight).await;
    Ok(stats)
}
