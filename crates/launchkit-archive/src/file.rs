use std::fs;
use std::io::ErrorKind;
use std::time::Duration;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use fd_lock::RwLock;
use launchkit_config::Config;
use launchkit_model::{LaunchKit, WorkflowSnapshot};
use launchkit_utils::atomic_write::write_json_atomic;
use launchkit_utils::error::ArchiveError;
use launchkit_utils::user_key::user_key;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::KitArchive;

/// Archive backed by one JSON file per user under `<state_dir>/kits/`.
///
/// Saves are serialized in-process by an async mutex and across processes
/// by an exclusive lock on `<user-key>.lock`, held for the whole
/// read-modify-write. Collections are replaced atomically.
#[derive(Debug)]
pub struct FileKitArchive {
    kits_dir: Utf8PathBuf,
    latency: Duration,
    write_guard: Mutex<()>,
}

impl FileKitArchive {
    pub fn new(state_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            kits_dir: state_dir.into().join("kits"),
            latency: Duration::ZERO,
            write_guard: Mutex::new(()),
        }
    }

    /// Delay every operation by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// # Errors
    ///
    /// Returns `ArchiveError::Io` when the configured state directory is not
    /// valid UTF-8.
    pub fn from_config(config: &Config) -> Result<Self, ArchiveError> {
        let state_dir = Utf8PathBuf::from_path_buf(config.state_dir()).map_err(|path| {
            ArchiveError::Io {
                path: path.display().to_string(),
                reason: "state directory is not valid UTF-8".to_string(),
            }
        })?;
        Ok(Self::new(state_dir).with_latency(config.archive_latency()))
    }

    pub fn kits_dir(&self) -> &Utf8Path {
        &self.kits_dir
    }

    fn collection_path(&self, key: &str) -> Utf8PathBuf {
        self.kits_dir.join(format!("{key}.json"))
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn io_error(path: &Utf8Path, err: impl std::fmt::Display) -> ArchiveError {
    ArchiveError::Io {
        path: path.to_string(),
        reason: err.to_string(),
    }
}

fn read_collection(path: &Utf8Path) -> Result<Vec<LaunchKit>, ArchiveError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(path, e)),
    };
    serde_json::from_str(&content).map_err(|e| ArchiveError::Corrupt {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Append one kit under an exclusive file lock and persist the collection.
fn append_locked(
    kits_dir: &Utf8Path,
    key: &str,
    snapshot: &WorkflowSnapshot,
) -> Result<Vec<LaunchKit>, ArchiveError> {
    fs::create_dir_all(kits_dir).map_err(|e| io_error(kits_dir, e))?;

    let lock_path = kits_dir.join(format!("{key}.lock"));
    let lock_file = fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(|e| io_error(&lock_path, e))?;
    let mut rw_lock = RwLock::new(lock_file);
    let _guard = rw_lock.write().map_err(|e| ArchiveError::Locked {
        path: lock_path.to_string(),
        reason: e.to_string(),
    })?;

    let path = kits_dir.join(format!("{key}.json"));
    let mut kits = read_collection(&path)?;
    let kit = LaunchKit::new(snapshot, Utc::now(), &kits);
    debug!(path = %path, kit_id = %kit.id, "Appending kit");
    kits.push(kit);

    write_json_atomic(&path, &kits).map_err(|e| io_error(&path, format!("{e:#}")))?;
    Ok(kits)
}

#[async_trait]
impl KitArchive for FileKitArchive {
    async fn list(&self, user: &str) -> Result<Vec<LaunchKit>, ArchiveError> {
        if user.trim().is_empty() {
            return Ok(Vec::new());
        }
        let key = user_key(user)?;
        self.simulate_latency().await;

        let path = self.collection_path(&key);
        tokio::task::spawn_blocking(move || read_collection(&path))
            .await
            .map_err(|e| io_error(&self.kits_dir, e))?
    }

    async fn save(
        &self,
        user: &str,
        snapshot: &WorkflowSnapshot,
    ) -> Result<Vec<LaunchKit>, ArchiveError> {
        let key = user_key(user)?;
        self.simulate_latency().await;

        let _serialized = self.write_guard.lock().await;
        let kits_dir = self.kits_dir.clone();
        let snapshot = snapshot.clone();
        let task_key = key.clone();
        let kits = tokio::task::spawn_blocking(move || {
            append_locked(&kits_dir, &task_key, &snapshot)
        })
        .await
        .map_err(|e| io_error(&self.kits_dir, e))??;

        info!(user_key = %key, kits = kits.len(), "Saved launch kit");
        Ok(kits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchkit_model::{UNTITLED_KIT, fixtures};
    use tempfile::TempDir;

    fn archive(temp: &TempDir) -> FileKitArchive {
        FileKitArchive::new(Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(archive(&temp).list("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_user_lists_nothing_and_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let archive = archive(&temp);
        assert!(archive.list(" ").await.unwrap().is_empty());
        assert!(matches!(
            archive.save("", &fixtures::completed_snapshot()).await,
            Err(ArchiveError::InvalidUserId(_))
        ));
        assert!(!archive.kits_dir().exists());
    }

    #[tokio::test]
    async fn test_save_writes_camel_case_records() {
        let temp = TempDir::new().unwrap();
        let archive = archive(&temp);
        archive
            .save("alice", &fixtures::completed_snapshot())
            .await
            .unwrap();

        let key = user_key("alice").unwrap();
        let raw = fs::read_to_string(archive.collection_path(&key)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let record = &value[0];
        assert_eq!(record["productName"], "EcoBottle - Smart Water Bottle");
        assert!(record["createdAt"].is_string());
        assert_eq!(record["snapshot"]["isBusy"], false);
    }

    #[tokio::test]
    async fn test_saves_append_in_order() {
        let temp = TempDir::new().unwrap();
        let archive = archive(&temp);
        let first = archive
            .save("alice", &fixtures::completed_snapshot())
            .await
            .unwrap();
        let second = archive
            .save("alice", &WorkflowSnapshot::default())
            .await
            .unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(second[0], first[0]);
        assert_eq!(second[1].product_name, UNTITLED_KIT);
        assert_ne!(second[0].id, second[1].id);
        assert_eq!(archive.list("alice").await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_reported() {
        let temp = TempDir::new().unwrap();
        let archive = archive(&temp);
        let key = user_key("alice").unwrap();
        fs::create_dir_all(archive.kits_dir()).unwrap();
        fs::write(archive.collection_path(&key), "{not json").unwrap();

        assert!(matches!(
            archive.list("alice").await,
            Err(ArchiveError::Corrupt { .. })
        ));
        assert!(matches!(
            archive.save("alice", &WorkflowSnapshot::default()).await,
            Err(ArchiveError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_transient_fields_are_not_archived() {
        let temp = TempDir::new().unwrap();
        let archive = archive(&temp);
        let mut snapshot = fixtures::completed_snapshot();
        snapshot.is_busy = true;
        snapshot.status_message = "Working".to_string();
        snapshot.last_error = Some("boom".to_string());

        let kits = archive.save("alice", &snapshot).await.unwrap();

        assert!(!kits[0].snapshot.is_busy);
        assert!(kits[0].snapshot.status_message.is_empty());
        assert_eq!(kits[0].snapshot.last_error, None);
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let temp = TempDir::new().unwrap();
        let archive = archive(&temp).with_latency(Duration::from_millis(50));
        let started = std::time::Instant::now();

        archive.list("alice").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
