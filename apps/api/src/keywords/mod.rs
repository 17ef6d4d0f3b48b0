//! Search-term popularity tracking with debounced JSON persistence.
//!
//! The in-memory map is authoritative; the on-disk snapshot may lag by up to
//! one debounce interval. Counts recorded inside the final window before an
//! ungraceful stop are lost, which is the accepted trade for not rewriting
//! the file on every request.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet period before counts are flushed to disk.
pub const DEFAULT_FLUSH_DELAY: Duration = Duration::from_millis(2000);

/// Process-wide counter of searched title terms. Cheap to clone; all clones
/// share one map and one pending-flush slot.
#[derive(Clone)]
pub struct KeywordTracker {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    flush_delay: Duration,
    counts: Mutex<HashMap<String, u64>>,
    /// At most one pending flush exists at any time; `record` replaces it.
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl KeywordTracker {
    /// Loads persisted counts if the snapshot file exists and parses. Any
    /// read or parse failure falls back to an empty map so startup never
    /// blocks on a corrupt snapshot.
    pub fn load(path: impl Into<PathBuf>, flush_delay: Duration) -> Self {
        let path = path.into();
        let counts = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, u64>>(&raw) {
                Ok(counts) => counts,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        "corrupt keyword snapshot, starting empty: {e}"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no keyword snapshot yet");
                HashMap::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    "unreadable keyword snapshot, starting empty: {e}"
                );
                HashMap::new()
            }
        };

        Self {
            inner: Arc::new(Inner {
                path,
                flush_delay,
                counts: Mutex::new(counts),
                pending: Mutex::new(None),
            }),
        }
    }

    /// Records one occurrence of a searched title term. Whitespace-only terms
    /// are ignored; everything else is trimmed and lowercased before
    /// counting. Each call restarts the debounce timer.
    pub fn record(&self, raw_term: &str) {
        let term = raw_term.trim();
        if term.is_empty() {
            return;
        }
        let term = term.to_lowercase();
        {
            let mut counts = self.lock_counts();
            *counts.entry(term).or_insert(0) += 1;
        }
        self.schedule_flush();
    }

    /// Current in-memory counts. Callers sort and truncate.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.lock_counts().clone()
    }

    /// Serializes the full map and rewrites the snapshot file. Write failures
    /// go to the operator log and never to any in-flight request.
    pub async fn flush(&self) {
        let json = match serde_json::to_string_pretty(&self.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("failed to serialize keyword counts: {e}");
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&self.inner.path, json).await {
            tracing::error!(
                path = %self.inner.path.display(),
                "failed to persist keyword counts: {e}"
            );
        }
    }

    /// Awaits the currently scheduled flush, if any. Used on graceful
    /// shutdown and in tests; request paths never wait on persistence.
    pub async fn wait_for_pending_flush(&self) {
        let handle = self.lock_pending().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Cancel-then-reschedule: aborts any pending flush task and starts a new
    /// one, so at most one flush is ever scheduled.
    fn schedule_flush(&self) {
        let mut pending = self.lock_pending();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        let tracker = self.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(tracker.inner.flush_delay).await;
            tracker.flush().await;
        }));
    }

    fn lock_counts(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.inner
            .counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn tracker_at(dir: &Path) -> (KeywordTracker, PathBuf) {
        let path = dir.join("search_keywords.json");
        (KeywordTracker::load(&path, DEFAULT_FLUSH_DELAY), path)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_flushes_once_with_merged_counts() {
        let dir = tempdir().unwrap();
        let (tracker, path) = tracker_at(dir.path());

        tracker.record("Remote");
        tracker.record("remote ");
        assert!(!path.exists(), "flush must wait for the quiet period");

        tracker.wait_for_pending_flush().await;
        let raw = std::fs::read_to_string(&path).unwrap();
        let counts: HashMap<String, u64> = serde_json::from_str(&raw).unwrap();
        assert_eq!(counts.get("remote"), Some(&2));
        assert_eq!(counts.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_record_normalizes_terms() {
        let dir = tempdir().unwrap();
        let (tracker, _) = tracker_at(dir.path());

        tracker.record(" Python ");
        tracker.record("PYTHON");
        tracker.record("java");

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.get("python"), Some(&2));
        assert_eq!(snapshot.get("java"), Some(&1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_terms_are_ignored() {
        let dir = tempdir().unwrap();
        let (tracker, path) = tracker_at(dir.path());

        tracker.record("   ");
        tracker.record("");

        assert!(tracker.snapshot().is_empty());
        tracker.wait_for_pending_flush().await;
        assert!(!path.exists(), "no flush should be scheduled for blanks");
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_then_reload_roundtrip() {
        let dir = tempdir().unwrap();
        let (tracker, path) = tracker_at(dir.path());

        tracker.record("rust");
        tracker.record("rust");
        tracker.record("golang");
        tracker.wait_for_pending_flush().await;

        let reloaded = KeywordTracker::load(&path, DEFAULT_FLUSH_DELAY);
        assert_eq!(reloaded.snapshot().get("rust"), Some(&2));
        assert_eq!(reloaded.snapshot().get("golang"), Some(&1));
    }

    #[test]
    fn test_load_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let (tracker, _) = tracker_at(dir.path());
        assert!(tracker.snapshot().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("search_keywords.json");
        std::fs::write(&path, "{ not json").unwrap();

        let tracker = KeywordTracker::load(&path, DEFAULT_FLUSH_DELAY);
        assert!(tracker.snapshot().is_empty());
    }
}
