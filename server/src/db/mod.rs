use moodnotes_core::{open_db, NoteStore, StoreResult, OPERATION_TIMEOUT};
use std::path::Path;
use tracing::info;

use crate::errors::{RestError, RestResult};

/// Open or create the notes database and wrap it in a shared store
pub fn open_store(path: &Path) -> Result<NoteStore, rusqlite::Error> {
    info!("Setting up mood notes database at {:?}", path);
    let conn = open_db(path)?;

    info!("Mood notes database ready");
    Ok(NoteStore::new(conn))
}

/// Run a blocking store operation off the async workers, bounded by the
/// per-operation timeout.
pub async fn run_store<T, F>(store: &NoteStore, op: F) -> RestResult<T>
where
    F: FnOnce(&NoteStore) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = store.clone();
    let task = tokio::task::spawn_blocking(move || op(&store));

    match tokio::time::timeout(OPERATION_TIMEOUT, task).await {
        Err(_) => Err(RestError::Internal(format!(
            "store operation timed out after {:?}",
            OPERATION_TIMEOUT
        ))),
        Ok(Err(e)) => Err(RestError::Internal(format!("store task failed: {}", e))),
        Ok(Ok(result)) => result.map_err(RestError::from),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use moodnotes_core::{NoteDraft, StoreError};
    use std::sync::mpsc;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_store_passes_result_through() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir.path().join("notes.db")).unwrap();

        let note = run_store(&store, |s| s.insert(&NoteDraft::new("t", "c")))
            .await
            .unwrap();

        assert_eq!(note.version, 1);
    }

    #[tokio::test]
    async fn test_run_store_maps_not_found() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir.path().join("notes.db")).unwrap();

        let result = run_store(&store, |s| s.get(12)).await;

        assert!(matches!(result, Err(RestError::NotFound)));
    }

    #[tokio::test]
    async fn test_run_store_maps_other_failures_to_internal() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir.path().join("notes.db")).unwrap();

        let result: RestResult<()> = run_store(&store, |_| Err(StoreError::Timeout)).await;

        assert!(matches!(result, Err(RestError::Internal(_))));
    }

    #[tokio::test]
    async fn test_run_store_times_out_slow_operation() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir.path().join("notes.db")).unwrap();
        let (release, held) = mpsc::channel::<()>();

        let started = Instant::now();
        let result: RestResult<()> = run_store(&store, move |_| {
            // Outlast the timeout, but let go once the test is done
            let _ = held.recv_timeout(OPERATION_TIMEOUT * 3);
            Ok(())
        })
        .await;
        let elapsed = started.elapsed();
        let _ = release.send(());

        assert!(matches!(result, Err(RestError::Internal(_))));
        assert!(elapsed >= OPERATION_TIMEOUT);
        assert!(elapsed < OPERATION_TIMEOUT + Duration::from_secs(2));
    }
}
