use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::join;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{info, warn};

use crate::forward::client::Forwarder;
use crate::store::record_store::log_store_outcome;
use crate::store::writer::StoreWriter;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelaySummary {
    pub events: usize,
    pub skipped: usize,
}

/// Reads newline-delimited JSON events and, per event, stores it and forwards
/// it concurrently. Blank lines are ignored, malformed lines are logged and
/// skipped. Returns once the input ends and every event has been handled.
///
/// Records are queued for the store in input order before any task is spawned,
/// so the log keeps the order of the input. At most `max_in_flight` events are
/// handled at once; reading pauses while the limit is reached.
pub async fn run_relay<R>(
    reader: R,
    writer: StoreWriter,
    forwarder: Option<Forwarder>,
    max_in_flight: usize,
) -> std::io::Result<RelaySummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = RelaySummary::default();
    let mut join_set = JoinSet::new();
    let permits = Arc::new(Semaphore::new(max_in_flight.max(1)));

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let event: Value = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                warn!("relay: skipping malformed event: {}", e);
                summary.skipped += 1;
                continue;
            }
        };
        summary.events += 1;

        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let pending = writer.enqueue(&event).await;
        let forwarder = forwarder.clone();
        join_set.spawn(async move {
            let _permit = permit;
            let store = async {
                log_store_outcome(match pending {
                    Ok(pending) => pending.wait().await,
                    Err(e) => Err(e),
                })
            };
            let forward = async {
                if let Some(forwarder) = &forwarder {
                    forwarder.send_data(&event).await;
                }
            };
            join!(store, forward);
        });

        // reap finished events so the set only holds work still running
        while let Some(res) = join_set.try_join_next() {
            log_task_failure(res);
        }
    }

    while let Some(res) = join_set.join_next().await {
        log_task_failure(res);
    }
    info!("relay: handled {} events, skipped {}", summary.events, summary.skipped);
    Ok(summary)
}

fn log_task_failure(res: Result<(), JoinError>) {
    if let Err(e) = res {
        warn!("relay: event task failed: {}", e);
    }
}
