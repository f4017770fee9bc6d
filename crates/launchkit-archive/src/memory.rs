use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use launchkit_model::{LaunchKit, WorkflowSnapshot};
use launchkit_utils::error::ArchiveError;
use launchkit_utils::user_key::user_key;
use tokio::sync::Mutex;

use crate::KitArchive;

/// Process-local archive. Collections live as long as the value.
#[derive(Debug, Default)]
pub struct InMemoryKitArchive {
    collections: Mutex<HashMap<String, Vec<LaunchKit>>>,
}

impl InMemoryKitArchive {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KitArchive for InMemoryKitArchive {
    async fn list(&self, user: &str) -> Result<Vec<LaunchKit>, ArchiveError> {
        if user.trim().is_empty() {
            return Ok(Vec::new());
        }
        let key = user_key(user)?;
        Ok(self
            .collections
            .lock()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(
        &self,
        user: &str,
        snapshot: &WorkflowSnapshot,
    ) -> Result<Vec<LaunchKit>, ArchiveError> {
        let key = user_key(user)?;
        let mut collections = self.collections.lock().await;
        let kits = collections.entry(key).or_default();
        let kit = LaunchKit::new(snapshot, Utc::now(), kits);
        kits.push(kit);
        Ok(kits.clone())
    }
}
