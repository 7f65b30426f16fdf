//! Per-user unit completion store.

use std::collections::HashMap;
use chrono::Utc;
use lms_core::{CompletionRecord, CourseProgress, UnitId, UserId};
use lms_storage::{Storage, StorageError};
use tracing::{debug, warn};
use crate::codec::{self, RecordLoad};
use crate::error::{ProgressError, Result};

/// Configuration for the progress store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressConfig {
    /// Prefix of every per-user storage key
    pub key_prefix: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            key_prefix: "progress_".to_string(),
        }
    }
}

/// Tracks which units each learner has completed.
///
/// Each user's records live under a single storage key and are rewritten as a
/// whole on every mutation. Two stores writing the same key race with
/// last-write-wins semantics; an update made between another writer's read
/// and write is lost.
pub struct ProgressStore<S: Storage> {
    storage: S,
    config: ProgressConfig,
}

impl<S: Storage> ProgressStore<S> {
    /// Create a store over `storage` with the default configuration.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: ProgressConfig::default(),
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: ProgressConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Storage key holding `user`'s records.
    pub fn key_for(&self, user: &UserId) -> String {
        format!("{}{}", self.config.key_prefix, user)
    }

    /// Read `user`'s records, reporting why the set is empty when it is.
    pub async fn load(&self, user: &UserId) -> RecordLoad {
        match self.read(user).await {
            Ok(load) => load,
            Err(e) => {
                warn!(%user, key = %self.key_for(user), "Failed to read progress: {}", e);
                RecordLoad::ReadFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Read and decode `user`'s records. Backend failures other than a
    /// missing medium are returned so writers can refuse to overwrite.
    async fn read(&self, user: &UserId) -> std::result::Result<RecordLoad, StorageError> {
        let key = self.key_for(user);
        let bytes = match self.storage.get(&key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(RecordLoad::Missing),
            Err(e) if e.is_unavailable() => {
                debug!(%user, "Progress storage unavailable: {}", e);
                return Ok(RecordLoad::Unavailable);
            }
            Err(e) => return Err(e),
        };

        let decoded = match codec::decode(&bytes, user) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(%user, key = %key, "Progress parsing error: {}", e);
                return Ok(RecordLoad::Corrupt {
                    reason: e.to_string(),
                });
            }
        };
        if decoded.skipped > 0 {
            warn!(%user, key = %key, skipped = decoded.skipped, "Ignoring unreadable progress records");
        }

        let (records, dropped) = codec::dedupe(decoded.records);
        if dropped > 0 {
            warn!(%user, key = %key, dropped, "Ignoring duplicate progress records");
        }
        Ok(RecordLoad::Loaded(records))
    }

    /// All records stored for `user`, in storage order.
    ///
    /// Missing, unavailable and corrupt data all read as an empty set.
    pub async fn get_all(&self, user: &UserId) -> Vec<CompletionRecord> {
        self.load(user).await.into_records()
    }

    /// The record for one unit, if any.
    pub async fn get_unit_progress(&self, user: &UserId, unit: &UnitId) -> Option<CompletionRecord> {
        self.get_all(user)
            .await
            .into_iter()
            .find(|r| r.unit_id() == unit)
    }

    /// Mark `unit` done for `user`, stamping the current time.
    pub async fn mark_completed(&mut self, user: &UserId, unit: &UnitId) -> Result<()> {
        let now = Utc::now();
        self.update(user, unit, |record| record.mark_completed(now), || {
            CompletionRecord::completed(user.clone(), unit.clone(), now)
        })
        .await?;
        debug!(%user, %unit, "Marked unit completed");
        Ok(())
    }

    /// Mark `unit` not done for `user`, clearing its timestamp.
    pub async fn mark_incomplete(&mut self, user: &UserId, unit: &UnitId) -> Result<()> {
        self.update(user, unit, CompletionRecord::mark_incomplete, || {
            CompletionRecord::incomplete(user.clone(), unit.clone())
        })
        .await?;
        debug!(%user, %unit, "Marked unit incomplete");
        Ok(())
    }

    /// Flip the completion state of `unit` and return the new state.
    pub async fn toggle(&mut self, user: &UserId, unit: &UnitId) -> Result<bool> {
        let done = self
            .get_unit_progress(user, unit)
            .await
            .is_some_and(|r| r.is_completed());
        if done {
            self.mark_incomplete(user, unit).await?;
        } else {
            self.mark_completed(user, unit).await?;
        }
        Ok(!done)
    }

    /// Completion of the course made of `unit_ids`.
    ///
    /// Every entry counts, so a repeated id weighs twice.
    pub async fn course_progress(&self, user: &UserId, unit_ids: &[UnitId]) -> CourseProgress {
        if unit_ids.is_empty() {
            return CourseProgress::default();
        }

        let records = self.get_all(user).await;
        let done: HashMap<&UnitId, bool> = records
            .iter()
            .map(|r| (r.unit_id(), r.is_completed()))
            .collect();
        let completed = unit_ids
            .iter()
            .filter(|id| done.get(id).copied().unwrap_or(false))
            .count();

        CourseProgress::new(completed, unit_ids.len())
    }

    /// Rounded completion percentage of the course made of `unit_ids`.
    pub async fn course_completion_percentage(&self, user: &UserId, unit_ids: &[UnitId]) -> u8 {
        self.course_progress(user, unit_ids).await.percentage
    }

    /// Ids of completed units, in storage order.
    pub async fn completed_units(&self, user: &UserId) -> Vec<UnitId> {
        self.get_all(user)
            .await
            .into_iter()
            .filter(|r| r.is_completed())
            .map(|r| r.unit_id().clone())
            .collect()
    }

    /// Replace `user`'s whole record set.
    pub async fn replace_all(&mut self, user: &UserId, records: Vec<CompletionRecord>) -> Result<()> {
        if let Some(foreign) = records.iter().find(|r| r.user_id() != user) {
            return Err(ProgressError::ForeignRecord {
                expected: user.clone(),
                found: foreign.user_id().clone(),
            });
        }
        let (records, dropped) = codec::dedupe(records);
        if dropped > 0 {
            debug!(%user, dropped, "Collapsed duplicate records on replace");
        }
        self.write(user, &records).await
    }

    /// Users with stored progress, in key order.
    ///
    /// Keys outside this store's prefix are ignored.
    pub async fn users(&self) -> Vec<UserId> {
        let keys = match self.storage.keys().await {
            Ok(keys) => keys,
            Err(e) if e.is_unavailable() => {
                debug!("Progress storage unavailable: {}", e);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to list progress keys: {}", e);
                return Vec::new();
            }
        };
        keys.iter()
            .filter_map(|key| key.strip_prefix(&self.config.key_prefix))
            .filter_map(|id| UserId::new(id).ok())
            .collect()
    }

    /// Forget everything recorded for `user`.
    pub async fn reset(&mut self, user: &UserId) -> Result<()> {
        let key = self.key_for(user);
        match self.storage.remove(&key).await {
            Ok(()) => {
                debug!(%user, "Reset progress");
                Ok(())
            }
            Err(e) if e.is_unavailable() => {
                debug!(%user, "Progress storage unavailable, reset skipped: {}", e);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read-modify-write of a single unit's record.
    async fn update(
        &mut self,
        user: &UserId,
        unit: &UnitId,
        apply: impl FnOnce(&mut CompletionRecord),
        create: impl FnOnce() -> CompletionRecord,
    ) -> Result<()> {
        let mut records = match self.read(user).await? {
            RecordLoad::Loaded(records) => records,
            RecordLoad::Missing | RecordLoad::Corrupt { .. } => Vec::new(),
            RecordLoad::ReadFailed { reason } => {
                return Err(StorageError::Other(reason).into());
            }
            RecordLoad::Unavailable => {
                debug!(%user, %unit, "Progress storage unavailable, update skipped");
                return Ok(());
            }
        };
        match records.iter_mut().find(|r| r.unit_id() == unit) {
            Some(record) => apply(record),
            None => records.push(create()),
        }
        self.write(user, &records).await
    }

    async fn write(&mut self, user: &UserId, records: &[CompletionRecord]) -> Result<()> {
        let key = self.key_for(user);
        let bytes = codec::encode(records)?;
        match self.storage.set(&key, &bytes).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_unavailable() => {
                debug!(%user, "Progress storage unavailable, write skipped: {}", e);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_storage::{JsonFileStorage, MemoryStorage, UnavailableStorage};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn unit(id: &str) -> UnitId {
        UnitId::new(id).unwrap()
    }

    fn units(ids: &[&str]) -> Vec<UnitId> {
        ids.iter().map(|id| unit(id)).collect()
    }

    fn memory_store() -> (ProgressStore<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        (ProgressStore::new(storage.clone()), storage)
    }

    /// Reads succeed, writes fail with an I/O error.
    struct ReadOnlyStorage;

    #[async_trait::async_trait]
    impl Storage for ReadOnlyStorage {
        async fn get(&self, _key: &str) -> lms_storage::Result<Option<Vec<u8>>> { Ok(None) }
        async fn set(&mut self, _key: &str, _value: &[u8]) -> lms_storage::Result<()> {
            Err(StorageError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only")))
        }
        async fn remove(&mut self, _key: &str) -> lms_storage::Result<()> {
            Err(StorageError::Other("read-only".to_string()))
        }
        async fn keys(&self) -> lms_storage::Result<Vec<String>> { Ok(vec![]) }
    }

    /// Memory storage whose reads can be switched to fail.
    #[derive(Clone, Default)]
    struct FlakyReadStorage {
        inner: MemoryStorage,
        fail_reads: Arc<AtomicBool>,
    }

    #[async_trait::async_trait]
    impl Storage for FlakyReadStorage {
        async fn get(&self, key: &str) -> lms_storage::Result<Option<Vec<u8>>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StorageError::Io(std::io::Error::new(std::io::ErrorKind::Interrupted, "flaky")));
            }
            self.inner.get(key).await
        }
        async fn set(&mut self, key: &str, value: &[u8]) -> lms_storage::Result<()> {
            self.inner.set(key, value).await
        }
        async fn remove(&mut self, key: &str) -> lms_storage::Result<()> {
            self.inner.remove(key).await
        }
        async fn keys(&self) -> lms_storage::Result<Vec<String>> {
            self.inner.keys().await
        }
    }

    #[tokio::test]
    async fn test_mark_completed_creates_record() {
        let (mut store, _) = memory_store();
        let before = Utc::now();

        store.mark_completed(&user("u3"), &unit("curr-1")).await.unwrap();

        let record = store.get_unit_progress(&user("u3"), &unit("curr-1")).await.unwrap();
        assert!(record.is_completed());
        assert_eq!(record.user_id(), &user("u3"));
        let at = record.completed_at().unwrap();
        assert!(at >= before && at <= Utc::now());
    }

    #[tokio::test]
    async fn test_mark_completed_is_idempotent() {
        let (mut store, _) = memory_store();
        let (u, c) = (user("u1"), unit("c1"));

        store.mark_completed(&u, &c).await.unwrap();
        let first = store.get_unit_progress(&u, &c).await.unwrap();
        store.mark_completed(&u, &c).await.unwrap();
        let second = store.get_unit_progress(&u, &c).await.unwrap();

        assert!(second.is_completed());
        assert!(second.completed_at() >= first.completed_at());
        assert_eq!(store.get_all(&u).await.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_incomplete_after_completed() {
        let (mut store, _) = memory_store();
        let (u, c) = (user("u1"), unit("c1"));

        store.mark_completed(&u, &c).await.unwrap();
        store.mark_incomplete(&u, &c).await.unwrap();

        let record = store.get_unit_progress(&u, &c).await.unwrap();
        assert!(!record.is_completed());
        assert_eq!(record.completed_at(), None);
        assert_eq!(store.get_all(&u).await.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_incomplete_creates_record() {
        let (mut store, _) = memory_store();
        let u = user("u1");
        store.mark_completed(&u, &unit("c1")).await.unwrap();
        let before = store.get_all(&u).await.len();

        store.mark_incomplete(&u, &unit("c2")).await.unwrap();

        let all = store.get_all(&u).await;
        assert_eq!(all.len(), before + 1);
        let record = store.get_unit_progress(&u, &unit("c2")).await.unwrap();
        assert!(!record.is_completed());
        assert_eq!(record.completed_at(), None);
    }

    #[tokio::test]
    async fn test_unknown_unit_is_absent() {
        let (store, _) = memory_store();
        assert_eq!(store.get_unit_progress(&user("u1"), &unit("c1")).await, None);
        assert!(store.get_all(&user("u1")).await.is_empty());
    }

    #[tokio::test]
    async fn test_one_record_per_unit_after_any_sequence() {
        let (mut store, _) = memory_store();
        let u = user("u1");
        let ops = [
            ("c1", true), ("c2", false), ("c1", false), ("c3", true),
            ("c2", true), ("c1", true), ("c3", false), ("c3", false),
        ];

        for (id, done) in ops {
            if done {
                store.mark_completed(&u, &unit(id)).await.unwrap();
            } else {
                store.mark_incomplete(&u, &unit(id)).await.unwrap();
            }
        }

        let all = store.get_all(&u).await;
        let ids: Vec<&str> = all.iter().map(|r| r.unit_id().as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
        assert_eq!(store.completed_units(&u).await, units(&["c1", "c2"]));
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let (mut store, _) = memory_store();
        store.mark_completed(&user("A"), &unit("U1")).await.unwrap();

        assert_eq!(store.get_unit_progress(&user("B"), &unit("U1")).await, None);
        assert_ne!(store.key_for(&user("A")), store.key_for(&user("B")));
    }

    #[tokio::test]
    async fn test_course_percentage() {
        let (mut store, _) = memory_store();
        let u = user("u3");
        store.mark_completed(&u, &unit("c1")).await.unwrap();
        store.mark_completed(&u, &unit("c4")).await.unwrap();
        store.mark_incomplete(&u, &unit("c2")).await.unwrap();

        let course = units(&["c1", "c2", "c3", "c4"]);
        assert_eq!(store.course_completion_percentage(&u, &course).await, 50);

        let progress = store.course_progress(&u, &course).await;
        assert_eq!(progress, CourseProgress { completed_units: 2, total_units: 4, percentage: 50 });

        let thirds = units(&["c1", "c2", "c3"]);
        assert_eq!(store.course_completion_percentage(&u, &thirds).await, 33);
    }

    #[tokio::test]
    async fn test_course_percentage_edge_cases() {
        let (mut store, _) = memory_store();
        let u = user("u1");
        assert_eq!(store.course_completion_percentage(&u, &[]).await, 0);

        store.mark_completed(&u, &unit("c1")).await.unwrap();
        assert_eq!(store.course_completion_percentage(&u, &[]).await, 0);
        assert_eq!(store.course_completion_percentage(&u, &units(&["c1"])).await, 100);
        assert_eq!(store.course_completion_percentage(&u, &units(&["x", "y"])).await, 0);
        // repeated ids count per entry
        assert_eq!(store.course_completion_percentage(&u, &units(&["c1", "c1", "c2"])).await, 67);
    }

    #[tokio::test]
    async fn test_toggle_flips_state() {
        let (mut store, _) = memory_store();
        let (u, c) = (user("u1"), unit("c1"));

        assert!(store.toggle(&u, &c).await.unwrap());
        assert!(store.get_unit_progress(&u, &c).await.unwrap().is_completed());
        assert!(!store.toggle(&u, &c).await.unwrap());
        assert!(!store.get_unit_progress(&u, &c).await.unwrap().is_completed());
    }

    #[tokio::test]
    async fn test_persisted_layout() {
        let (mut store, storage) = memory_store();
        store.mark_completed(&user("u3"), &unit("curr-1")).await.unwrap();
        store.mark_incomplete(&user("u3"), &unit("curr-2")).await.unwrap();

        let bytes = storage.get("progress_u3").await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["userId"], "u3");
        assert_eq!(items[0]["chapterId"], "curr-1");
        assert_eq!(items[0]["completed"], true);
        assert!(items[0]["completedAt"].is_string());
        assert_eq!(items[1]["completed"], false);
        assert!(items[1].get("completedAt").is_none());
    }

    #[tokio::test]
    async fn test_reads_existing_browser_data() {
        let (store, mut storage) = memory_store();
        let blob = r#"[
            {"userId":"u3","chapterId":"c1","completed":true,"completedAt":"2024-05-01T10:00:00.000Z"},
            {"userId":"u3","chapterId":"c2","completed":false},
            {"userId":"u3","chapterId":"c1","completed":false}
        ]"#;
        storage.set("progress_u3", blob.as_bytes()).await.unwrap();

        let all = store.get_all(&user("u3")).await;
        assert_eq!(all.len(), 2);
        assert!(store.get_unit_progress(&user("u3"), &unit("c1")).await.unwrap().is_completed());
    }

    #[tokio::test]
    async fn test_corrupt_blob_reads_as_empty() {
        let (mut store, mut storage) = memory_store();
        let u = user("u1");
        storage.set("progress_u1", b"{\"broken\":").await.unwrap();

        assert!(store.load(&u).await.is_corrupt());
        assert!(store.get_all(&u).await.is_empty());
        assert_eq!(store.get_unit_progress(&u, &unit("c1")).await, None);
        assert_eq!(store.course_completion_percentage(&u, &units(&["c1"])).await, 0);

        // the next write starts a fresh set
        store.mark_completed(&u, &unit("c1")).await.unwrap();
        assert_eq!(store.get_all(&u).await.len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_storage_is_silent() {
        let mut store = ProgressStore::new(UnavailableStorage);
        let (u, c) = (user("u1"), unit("c1"));

        assert_eq!(store.load(&u).await, RecordLoad::Unavailable);
        store.mark_completed(&u, &c).await.unwrap();
        store.mark_incomplete(&u, &c).await.unwrap();
        store.reset(&u).await.unwrap();
        assert!(store.get_all(&u).await.is_empty());
        assert_eq!(store.course_completion_percentage(&u, &[c]).await, 0);
    }

    #[tokio::test]
    async fn test_write_failures_are_reported() {
        let mut store = ProgressStore::new(ReadOnlyStorage);
        let err = store.mark_completed(&user("u1"), &unit("c1")).await.unwrap_err();
        assert!(matches!(err, ProgressError::Storage(StorageError::Io(_))));
        assert!(store.reset(&user("u1")).await.is_err());
    }

    #[tokio::test]
    async fn test_replace_all_and_reset() {
        let (mut store, storage) = memory_store();
        let u = user("u1");
        store.mark_completed(&u, &unit("old")).await.unwrap();

        let now = Utc::now();
        let records = vec![
            CompletionRecord::completed(u.clone(), unit("c1"), now),
            CompletionRecord::incomplete(u.clone(), unit("c2")),
            CompletionRecord::incomplete(u.clone(), unit("c1")),
        ];
        store.replace_all(&u, records).await.unwrap();

        let all = store.get_all(&u).await;
        assert_eq!(all.len(), 2);
        assert_eq!(store.get_unit_progress(&u, &unit("old")).await, None);
        assert_eq!(store.completed_units(&u).await, units(&["c1"]));

        store.reset(&u).await.unwrap();
        assert_eq!(store.load(&u).await, RecordLoad::Missing);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_replace_all_rejects_foreign_records() {
        let (mut store, _) = memory_store();
        let records = vec![CompletionRecord::incomplete(user("B"), unit("c1"))];

        let err = store.replace_all(&user("A"), records).await.unwrap_err();
        assert!(matches!(err, ProgressError::ForeignRecord { .. }));
        assert!(store.get_all(&user("A")).await.is_empty());
    }

    #[tokio::test]
    async fn test_custom_key_prefix() {
        let storage = MemoryStorage::new();
        let mut store = ProgressStore::new(storage.clone()).with_config(ProgressConfig {
            key_prefix: "lms/progress/".to_string(),
        });

        store.mark_completed(&user("u1"), &unit("c1")).await.unwrap();
        assert_eq!(storage.keys().await.unwrap(), vec!["lms/progress/u1"]);
    }

    #[tokio::test]
    async fn test_file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let u = user("user/with/slashes");

        let storage = JsonFileStorage::open(dir.path()).await.unwrap();
        let mut store = ProgressStore::new(storage);
        store.mark_completed(&u, &unit("c1")).await.unwrap();
        store.mark_incomplete(&u, &unit("c2")).await.unwrap();
        drop(store);

        let reopened = ProgressStore::new(JsonFileStorage::open_existing(dir.path()));
        assert_eq!(reopened.get_all(&u).await.len(), 2);
        assert_eq!(reopened.course_completion_percentage(&u, &units(&["c1", "c2"])).await, 50);
    }

    #[tokio::test]
    async fn test_failed_read_never_overwrites() {
        let storage = FlakyReadStorage::default();
        let mut store = ProgressStore::new(storage.clone());
        let u = user("u1");
        for id in ["c1", "c2", "c3"] {
            store.mark_completed(&u, &unit(id)).await.unwrap();
        }

        storage.fail_reads.store(true, Ordering::SeqCst);
        assert!(matches!(store.load(&u).await, RecordLoad::ReadFailed { .. }));
        assert!(store.get_all(&u).await.is_empty());

        let err = store.mark_completed(&u, &unit("c4")).await.unwrap_err();
        assert!(matches!(err, ProgressError::Storage(StorageError::Io(_))));
        assert!(store.mark_incomplete(&u, &unit("c1")).await.is_err());
        assert!(store.toggle(&u, &unit("c2")).await.is_err());

        storage.fail_reads.store(false, Ordering::SeqCst);
        assert_eq!(store.completed_units(&u).await, units(&["c1", "c2", "c3"]));
    }

    #[tokio::test]
    async fn test_bad_element_does_not_cost_valid_records() {
        let (mut store, mut storage) = memory_store();
        let u = user("u1");
        let blob = r#"[
            {"userId":"u1","chapterId":"c1","completed":true,"completedAt":"2024-05-01T10:00:00.000Z"},
            {"userId":"u1","chapterId":"c2","completed":true,"completedAt":"not a date"},
            {"userId":"u1","chapterId":["c9"],"completed":true}
        ]"#;
        storage.set("progress_u1", blob.as_bytes()).await.unwrap();

        assert!(matches!(store.load(&u).await, RecordLoad::Loaded(_)));
        store.mark_completed(&u, &unit("c3")).await.unwrap();

        let all = store.get_all(&u).await;
        let ids: Vec<&str> = all.iter().map(|r| r.unit_id().as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
        let c2 = store.get_unit_progress(&u, &unit("c2")).await.unwrap();
        assert!(c2.is_completed());
        assert_eq!(c2.completed_at(), None);
    }

    #[tokio::test]
    async fn test_lists_users_under_prefix() {
        let (mut store, mut storage) = memory_store();
        store.mark_completed(&user("b"), &unit("c1")).await.unwrap();
        store.mark_incomplete(&user("a"), &unit("c1")).await.unwrap();
        storage.set("settings", b"{}").await.unwrap();
        storage.set("progress_", b"[]").await.unwrap();

        assert_eq!(store.users().await, vec![user("a"), user("b")]);
        assert!(ProgressStore::new(UnavailableStorage).users().await.is_empty());
    }
}
