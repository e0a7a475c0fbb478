use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::info;

use crate::error::{RelayError, Result};
use crate::store::record_store::{append_record, log_store_outcome};

const BUFFER_SIZE: usize = 50;

struct AppendRequest {
    record: Value,
    ack: oneshot::Sender<Result<()>>,
}

/// Handle to the single task that owns a record file.
///
/// Appends sent through any clone of the handle are applied one at a time in
/// arrival order, so concurrent callers never lose each other's records. The
/// task exits once every handle is dropped.
#[derive(Clone)]
pub struct StoreWriter {
    path: PathBuf,
    sender: mpsc::Sender<AppendRequest>,
}

impl StoreWriter {
    pub fn spawn(path: impl Into<PathBuf>) -> (Self, JoinHandle<()>) {
        let path = path.into();
        let (sender, receiver) = mpsc::channel(BUFFER_SIZE);
        let worker = tokio::spawn(writer_loop(path.clone(), receiver));
        (Self { path, sender }, worker)
    }

    /// Queues `record` and waits until it is on disk (or failed).
    pub async fn append<T>(&self, record: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.enqueue(record).await?.wait().await
    }

    /// Queues `record` and returns as soon as it holds its place in the queue.
    /// Records enqueued one after another by the same caller are written in
    /// that order.
    pub async fn enqueue<T>(&self, record: &T) -> Result<PendingAppend>
    where
        T: Serialize + ?Sized,
    {
        let record = serde_json::to_value(record).map_err(RelayError::Serialize)?;
        let (ack, done) = oneshot::channel();
        self.sender
            .send(AppendRequest { record, ack })
            .await
            .map_err(|_| self.closed())?;
        Ok(PendingAppend { path: self.path.clone(), done })
    }

    /// Fire-and-forget variant of [`StoreWriter::append`].
    pub async fn store<T>(&self, record: &T)
    where
        T: Serialize + ?Sized,
    {
        log_store_outcome(self.append(record).await);
    }

    fn closed(&self) -> RelayError {
        RelayError::WriterClosed { path: self.path.clone() }
    }
}

/// A queued append whose outcome has not been collected yet.
pub struct PendingAppend {
    path: PathBuf,
    done: oneshot::Receiver<Result<()>>,
}

impl PendingAppend {
    pub async fn wait(self) -> Result<()> {
        let path = self.path;
        self.done
            .await
            .map_err(|_| RelayError::WriterClosed { path })?
    }
}

async fn writer_loop(path: PathBuf, mut receiver: mpsc::Receiver<AppendRequest>) {
    info!("store writer started for {}", path.display());
    while let Some(AppendRequest { record, ack }) = receiver.recv().await {
        let res = append_record(&path, &record).await;
        // caller may have stopped waiting
        let _ = ack.send(res);
    }
    info!("store writer stopped for {}", path.display());
}
