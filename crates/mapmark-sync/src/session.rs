//! Import policy: deciding whether a remote history replaces the local one.

use tracing::info;

use mapmark_store::HistoryStore;
use mapmark_types::Snapshot;

use crate::{Result, SnapshotTransport};

/// How to reconcile a fetched remote history with local state.
///
/// There is no merging: the unit of exchange is the whole history, and one
/// side wins wholesale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportPolicy {
    /// The remote history always replaces local state, even when local
    /// edits are newer or the remote is empty.
    ReplaceAlways,
    /// Last-write-wins by final snapshot timestamp: local state is kept
    /// when its latest snapshot is newer than the remote's latest, or when
    /// the remote is empty. Ties go to the remote.
    PreferNewer,
}

/// What an import decided to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The local history was replaced by the remote one.
    Replaced { snapshot_count: usize },
    /// Local edits were newer; the remote history was discarded.
    KeptLocal,
}

/// Apply `policy` to a fetched remote history.
///
/// The store is touched only when the remote wins, via its all-or-nothing
/// `load_from_snapshots`; a `KeptLocal` outcome leaves it untouched.
pub fn import_remote(
    store: &mut HistoryStore,
    remote: Vec<Snapshot>,
    policy: ImportPolicy,
) -> ImportOutcome {
    if policy == ImportPolicy::PreferNewer {
        let local_last = store.snapshots().last().map(Snapshot::timestamp);
        let remote_last = remote.last().map(Snapshot::timestamp);
        let keep_local = match (local_last, remote_last) {
            (Some(local), Some(remote)) => local > remote,
            (Some(_), None) => true,
            _ => false,
        };
        if keep_local {
            info!("remote history is older, keeping local state");
            return ImportOutcome::KeptLocal;
        }
    }
    let snapshot_count = remote.len();
    store.load_from_snapshots(remote);
    ImportOutcome::Replaced { snapshot_count }
}

/// Fetch the remote history and apply `policy`.
pub async fn pull<T>(
    store: &mut HistoryStore,
    transport: &T,
    policy: ImportPolicy,
) -> Result<ImportOutcome>
where
    T: SnapshotTransport + ?Sized,
{
    let remote = transport.fetch_snapshots().await?;
    Ok(import_remote(store, remote, policy))
}

/// Upload the full local history to the remote.
pub async fn push<T>(store: &HistoryStore, transport: &T) -> Result<()>
where
    T: SnapshotTransport + ?Sized,
{
    transport.upload_snapshots(&store.export_snapshots()).await
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, TimeDelta, Utc};

    use mapmark_types::{Color, Marker, MarkerId, Position};

    fn snapshot_at(at: DateTime<Utc>, notes: &[&str]) -> Snapshot {
        let markers = notes
            .iter()
            .map(|note| Marker::new(Position::new(0.5, 0.5).unwrap(), *note, Color::default()))
            .collect();
        Snapshot::new(at, markers, "")
    }

    fn store_with_history(last_at: DateTime<Utc>) -> HistoryStore {
        let mut store = HistoryStore::new();
        store.load_from_snapshots(vec![
            snapshot_at(last_at - TimeDelta::seconds(60), &["old"]),
            snapshot_at(last_at, &["local"]),
        ]);
        store
    }

    // ── Policy table ────────────────────────────────────────────────────

    #[test]
    fn test_replace_always_overwrites_newer_local() {
        let now = Utc::now();
        let mut store = store_with_history(now);
        let remote = vec![snapshot_at(now - TimeDelta::hours(1), &["remote"])];

        let outcome = import_remote(&mut store, remote, ImportPolicy::ReplaceAlways);
        assert_eq!(outcome, ImportOutcome::Replaced { snapshot_count: 1 });
        assert_eq!(store.snapshot_count(), 1);
        assert_eq!(store.current_markers()[0].note(), "remote");
    }

    #[test]
    fn test_prefer_newer_keeps_newer_local() {
        let now = Utc::now();
        let mut store = store_with_history(now);
        let remote = vec![snapshot_at(now - TimeDelta::hours(1), &["remote"])];

        let outcome = import_remote(&mut store, remote, ImportPolicy::PreferNewer);
        assert_eq!(outcome, ImportOutcome::KeptLocal);
        assert_eq!(store.snapshot_count(), 2);
        assert_eq!(store.current_markers()[0].note(), "local");
    }

    #[test]
    fn test_prefer_newer_adopts_newer_remote() {
        let now = Utc::now();
        let mut store = store_with_history(now - TimeDelta::hours(1));
        let remote = vec![snapshot_at(now, &["remote"])];

        let outcome = import_remote(&mut store, remote, ImportPolicy::PreferNewer);
        assert_eq!(outcome, ImportOutcome::Replaced { snapshot_count: 1 });
        assert_eq!(store.current_markers()[0].note(), "remote");
    }

    #[test]
    fn test_prefer_newer_never_clobbers_with_empty_remote() {
        let mut store = store_with_history(Utc::now());
        let outcome = import_remote(&mut store, Vec::new(), ImportPolicy::PreferNewer);
        assert_eq!(outcome, ImportOutcome::KeptLocal);
        assert_eq!(store.snapshot_count(), 2);
    }

    #[test]
    fn test_replace_always_accepts_empty_remote() {
        let mut store = store_with_history(Utc::now());
        let outcome = import_remote(&mut store, Vec::new(), ImportPolicy::ReplaceAlways);
        assert_eq!(outcome, ImportOutcome::Replaced { snapshot_count: 0 });
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_local_adopts_remote_under_either_policy() {
        let remote = vec![snapshot_at(Utc::now(), &["remote"])];
        for policy in [ImportPolicy::ReplaceAlways, ImportPolicy::PreferNewer] {
            let mut store = HistoryStore::new();
            let outcome = import_remote(&mut store, remote.clone(), policy);
            assert_eq!(outcome, ImportOutcome::Replaced { snapshot_count: 1 });
        }
    }

    // ── pull / push against a mock transport ────────────────────────────

    struct FixedTransport {
        remote: Vec<Snapshot>,
        uploaded: Mutex<Vec<usize>>,
    }

    impl FixedTransport {
        fn new(remote: Vec<Snapshot>) -> Self {
            Self {
                remote,
                uploaded: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SnapshotTransport for FixedTransport {
        async fn fetch_snapshots(&self) -> crate::Result<Vec<Snapshot>> {
            Ok(self.remote.clone())
        }

        async fn upload_snapshots(&self, snapshots: &[Snapshot]) -> crate::Result<()> {
            self.uploaded.lock().unwrap().push(snapshots.len());
            Ok(())
        }

        async fn notify_marker_added(&self, _marker: &Marker) -> crate::Result<()> {
            Ok(())
        }

        async fn notify_marker_deleted(&self, _id: &MarkerId) -> crate::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_pull_applies_policy() {
        let now = Utc::now();
        let transport = FixedTransport::new(vec![snapshot_at(now, &["remote"])]);

        let mut store = store_with_history(now - TimeDelta::hours(1));
        let outcome = pull(&mut store, &transport, ImportPolicy::PreferNewer)
            .await
            .unwrap();
        assert_eq!(outcome, ImportOutcome::Replaced { snapshot_count: 1 });
        assert_eq!(store.current_markers()[0].note(), "remote");
    }

    #[tokio::test]
    async fn test_push_uploads_full_export() {
        let transport = FixedTransport::new(Vec::new());
        let store = store_with_history(Utc::now());

        push(&store, &transport).await.unwrap();
        assert_eq!(*transport.uploaded.lock().unwrap(), vec![2]);
    }
}
