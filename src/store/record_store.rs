use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, error, info};

use crate::error::{RelayError, Result};
use crate::utils::constants::EMPTY_STORE;

/// Appends `record` to the JSON array stored at `path`.
///
/// Read-modify-write: the whole file is parsed, extended by one trailing
/// element and rewritten pretty-printed. Nothing is written unless the file
/// was read and parsed as an array. Two calls racing on the same path can
/// lose one of the records; use [`StoreWriter`](crate::store::writer::StoreWriter)
/// when appends may overlap.
pub async fn append_record<T>(path: impl AsRef<Path>, record: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    append_record_with(path.as_ref(), record, |path, body| async move {
        fs::write(path, body).await
    })
    .await
}

async fn append_record_with<T, W, Fut>(path: &Path, record: &T, write: W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: FnOnce(PathBuf, String) -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    let record = serde_json::to_value(record).map_err(RelayError::Serialize)?;

    let content = fs::read_to_string(path)
        .await
        .map_err(|source| RelayError::Read { path: path.to_owned(), source })?;

    let mut stored: Value = serde_json::from_str(&content)
        .map_err(|source| RelayError::Parse { path: path.to_owned(), source })?;

    let records = stored
        .as_array_mut()
        .ok_or_else(|| RelayError::NotAnArray { path: path.to_owned() })?;
    records.push(record);
    debug!("store: {} now holds {} records", path.display(), records.len());

    // serde_json pretty printer indents with two spaces
    let body = serde_json::to_string_pretty(&stored).map_err(RelayError::Serialize)?;
    write(path.to_owned(), body)
        .await
        .map_err(|source| RelayError::Write { path: path.to_owned(), source })
}

/// Fire-and-forget variant of [`append_record`]: the outcome is only logged.
pub async fn store_record<T>(path: impl AsRef<Path>, record: &T)
where
    T: Serialize + ?Sized,
{
    log_store_outcome(append_record(path, record).await);
}

pub(crate) fn log_store_outcome(res: Result<()>) {
    match res {
        Ok(()) => info!("New token data stored successfully."),
        Err(e) => error!("{}", e),
    }
}

/// Creates `path` holding an empty array unless it already exists.
/// Returns `true` when the file was created.
pub async fn init_store(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match fs::metadata(path).await {
        Ok(_) => Ok(false),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| RelayError::Write { path: path.to_owned(), source })?;
            }
            fs::write(path, EMPTY_STORE)
                .await
                .map_err(|source| RelayError::Write { path: path.to_owned(), source })?;
            info!("store: created empty record file {}", path.display());
            Ok(true)
        }
        Err(source) => Err(RelayError::Read { path: path.to_owned(), source }),
    }
}
