//! Archive of completed launch kits, partitioned by user.
//!
//! A kit is an immutable record of a finished run. Each user's kits form an
//! ordered collection; saving appends one kit and returns the whole
//! collection in creation order.

mod file;
mod memory;

pub use file::FileKitArchive;
pub use memory::InMemoryKitArchive;

use async_trait::async_trait;
use launchkit_model::{LaunchKit, WorkflowSnapshot};
use launchkit_utils::error::ArchiveError;

#[async_trait]
pub trait KitArchive: Send + Sync {
    /// Kits saved by `user`, oldest first. Unknown and blank users have none.
    async fn list(&self, user: &str) -> Result<Vec<LaunchKit>, ArchiveError>;

    /// Append a kit built from `snapshot` and return the updated collection.
    /// A blank `user` is rejected with `InvalidUserId`.
    async fn save(
        &self,
        user: &str,
        snapshot: &WorkflowSnapshot,
    ) -> Result<Vec<LaunchKit>, ArchiveError>;

    /// One kit by id.
    async fn find(&self, user: &str, id: &str) -> Result<LaunchKit, ArchiveError> {
        self.list(user)
            .await?
            .into_iter()
            .find(|kit| kit.id == id)
            .ok_or_else(|| ArchiveError::KitNotFound { id: id.to_string() })
    }
}
